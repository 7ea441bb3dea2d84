//! Registration transport over the browser fetch API

use async_trait::async_trait;
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Headers, Request, RequestInit, Response};

use super::transport::RegistrationTransport;
use super::types::{HttpExchange, ReadyState};
use crate::services::errors::{RegistrationError, RegistrationResult};

fn fetch_error(context: &str, error: JsValue) -> RegistrationError {
    RegistrationError::Transport {
        message: format!("{}: {:?}", context, error),
    }
}

/// Posts with `window.fetch` and keeps the server's own status text.
/// Non-2xx replies are returned as exchanges, not errors.
#[derive(Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl RegistrationTransport for FetchTransport {
    async fn post_xml(
        &self,
        url: &str,
        content_type: &str,
        body: String,
    ) -> RegistrationResult<HttpExchange> {
        debug!("POST {} ({} bytes)", url, body.len());

        let window = window().ok_or_else(|| RegistrationError::Transport {
            message: "No window object".to_string(),
        })?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&JsValue::from_str(&body));

        let headers = Headers::new().map_err(|e| fetch_error("Failed to create headers", e))?;
        headers
            .set("Content-Type", content_type)
            .map_err(|e| fetch_error("Failed to set header", e))?;
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(url, &opts)
            .map_err(|e| fetch_error("Failed to create request", e))?;

        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| fetch_error("Fetch failed", e))?;
        let response: Response = response
            .dyn_into()
            .map_err(|e| fetch_error("Failed to cast to Response", e))?;

        let text = response
            .text()
            .map_err(|e| fetch_error("Failed to read body", e))?;
        let text = JsFuture::from(text)
            .await
            .map_err(|e| fetch_error("Failed to read body", e))?;

        Ok(HttpExchange {
            ready_state: ReadyState::Done,
            status: response.status(),
            status_text: response.status_text(),
            body: text.as_string(),
        })
    }
}
