use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("XML write error: {message}")]
    XmlWrite { message: String },

    #[error("Malformed XML response: {message}")]
    MalformedXml { message: String },

    #[error("Response is missing required element <{element}>")]
    MissingElement { element: String },

    #[error("Configuration error: {field} = {value}")]
    Configuration { field: String, value: String },
}

#[cfg(not(target_arch = "wasm32"))]
impl From<reqwest::Error> for RegistrationError {
    fn from(error: reqwest::Error) -> Self {
        RegistrationError::Transport {
            message: error.to_string(),
        }
    }
}

impl From<quick_xml::Error> for RegistrationError {
    fn from(error: quick_xml::Error) -> Self {
        RegistrationError::MalformedXml {
            message: error.to_string(),
        }
    }
}

pub type RegistrationResult<T> = Result<T, RegistrationError>;

impl RegistrationError {
    pub fn missing(element: &str) -> Self {
        RegistrationError::MissingElement {
            element: element.to_string(),
        }
    }
}
