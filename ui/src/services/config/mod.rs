use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::services::errors::{RegistrationError, RegistrationResult};

pub const DEFAULT_ENDPOINT_PATH: &str = "/CAFrontEnd/rest/user/register";
pub const DEFAULT_CONTENT_TYPE: &str = "text/xml";

/// Where and how registration requests are sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationConfig {
    /// Origin the endpoint path is resolved against. `None` keeps the path relative.
    pub base_url: Option<String>,
    pub endpoint_path: String,
    pub content_type: String,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            endpoint_path: DEFAULT_ENDPOINT_PATH.to_string(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}

impl RegistrationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Resolve the base URL from the page origin.
    /// reqwest on wasm rejects relative URLs, so the browser build always goes through here.
    #[cfg(target_arch = "wasm32")]
    pub fn for_current_page() -> Self {
        let origin = web_sys::window().and_then(|w| w.location().origin().ok());
        match origin {
            Some(origin) => Self::default().with_base_url(origin),
            None => {
                crate::console_warn!("[Config] No window origin, endpoint stays relative");
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn for_current_page() -> Self {
        get_global_config()
    }

    pub fn endpoint_url(&self) -> String {
        match &self.base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                self.endpoint_path.trim_start_matches('/')
            ),
            None => self.endpoint_path.clone(),
        }
    }

    pub fn validate(&self) -> RegistrationResult<()> {
        if self.endpoint_path.trim().is_empty() {
            return Err(RegistrationError::Configuration {
                field: "endpoint_path".to_string(),
                value: self.endpoint_path.clone(),
            });
        }

        if self.content_type.trim().is_empty() {
            return Err(RegistrationError::Configuration {
                field: "content_type".to_string(),
                value: self.content_type.clone(),
            });
        }

        if let Some(base) = &self.base_url {
            if !(base.starts_with("http://") || base.starts_with("https://")) {
                return Err(RegistrationError::Configuration {
                    field: "base_url".to_string(),
                    value: base.clone(),
                });
            }
        }

        Ok(())
    }
}

static GLOBAL_CONFIG: OnceLock<RegistrationConfig> = OnceLock::new();

/// Get the global configuration, initialized with defaults
pub fn get_global_config() -> RegistrationConfig {
    GLOBAL_CONFIG
        .get_or_init(|| {
            let config = RegistrationConfig::new();
            if let Err(e) = config.validate() {
                tracing::warn!("Invalid configuration: {}", e);
            }
            config
        })
        .clone()
}
