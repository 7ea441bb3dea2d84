//! Outbound HTTP for registration requests

use async_trait::async_trait;

use super::types::HttpExchange;
use crate::services::errors::RegistrationResult;

/// Sends one XML document and reports the completed exchange.
/// Browser futures are not `Send`, so neither is this trait.
#[async_trait(?Send)]
pub trait RegistrationTransport {
    async fn post_xml(
        &self,
        url: &str,
        content_type: &str,
        body: String,
    ) -> RegistrationResult<HttpExchange>;
}

/// Transport the page uses on this target
#[cfg(target_arch = "wasm32")]
pub type DefaultTransport = super::wasm_http_client::FetchTransport;

#[cfg(not(target_arch = "wasm32"))]
pub type DefaultTransport = native::ReqwestTransport;

#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestTransport;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use async_trait::async_trait;
    use hyper::ext::ReasonPhrase;
    use reqwest::header::CONTENT_TYPE;
    use reqwest::Client;
    use tracing::debug;

    use super::RegistrationTransport;
    use crate::services::client::types::{HttpExchange, ReadyState};
    use crate::services::errors::RegistrationResult;

    /// Transport backed by reqwest for non-browser builds
    #[derive(Clone)]
    pub struct ReqwestTransport {
        http_client: Client,
    }

    impl Default for ReqwestTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self {
                http_client: Client::new(),
            }
        }
    }

    #[async_trait(?Send)]
    impl RegistrationTransport for ReqwestTransport {
        async fn post_xml(
            &self,
            url: &str,
            content_type: &str,
            body: String,
        ) -> RegistrationResult<HttpExchange> {
            debug!("POST {} ({} bytes)", url, body.len());

            let response = self
                .http_client
                .post(url)
                .header(CONTENT_TYPE, content_type)
                .body(body)
                .send()
                .await?;

            let status = response.status();
            // hyper only records the phrase when it differs from the canonical one
            let status_text = match response.extensions().get::<ReasonPhrase>() {
                Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
                None => status.canonical_reason().unwrap_or_default().to_string(),
            };
            let body = response.text().await?;

            Ok(HttpExchange {
                ready_state: ReadyState::Done,
                status: status.as_u16(),
                status_text,
                body: Some(body),
            })
        }
    }

}
