use serde::{Deserialize, Serialize};

/// Field values of one registration attempt, taken verbatim from the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub username: String,
    pub password: String,
    /// Confirmation field. Sent as `registerPassword` and never compared locally.
    pub confirm_password: String,
}

impl RegistrationRequest {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }
}

/// Lifecycle of a browser request, as reported by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Unsent,
    Opened,
    HeadersReceived,
    Loading,
    Done,
}

/// What the transport observed for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpExchange {
    pub ready_state: ReadyState,
    pub status: u16,
    pub status_text: String,
    pub body: Option<String>,
}

impl HttpExchange {
    pub fn done(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            ready_state: ReadyState::Done,
            status,
            status_text: status_text.into(),
            body: Some(body.into()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.ready_state == ReadyState::Done
    }

    /// Body text, if the exchange carried a non-empty one
    pub fn non_empty_body(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.is_empty())
    }
}

/// Parsed view of a server reply. Body fields are only read on the paths that need them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerResponse {
    pub http_status: u16,
    pub status_text: String,
    pub body_status: Option<String>,
    pub body_message: Option<String>,
    pub method: Option<String>,
}

impl ServerResponse {
    /// `status` compared case-insensitively against "ok"
    pub fn status_is_ok(&self) -> bool {
        self.body_status
            .as_deref()
            .map(|s| s.to_lowercase() == "ok")
            .unwrap_or(false)
    }

    /// `method` compared exactly against the given token
    pub fn method_is(&self, token: &str) -> bool {
        self.method.as_deref() == Some(token)
    }
}
