// Client-side registration against the CAFrontEnd user service
//
// This module provides:
// - XML request/response bodies for the register endpoint
// - A fetch-backed transport
// - The registration client that classifies replies and drives the dialog

pub mod registration_client;
pub mod transport;
pub mod types;
#[cfg(target_arch = "wasm32")]
pub mod wasm_http_client;
pub mod xml;

// Re-export core types for easy access
pub use types::{HttpExchange, ReadyState, RegistrationRequest, ServerResponse};

pub use registration_client::{
    classify, DialogHandle, FormHandle, IgnoreReason, RegistrationClient, RegistrationOutcome,
};
pub use transport::{DefaultTransport, RegistrationTransport};

#[cfg(not(target_arch = "wasm32"))]
pub use transport::ReqwestTransport;
#[cfg(target_arch = "wasm32")]
pub use wasm_http_client::FetchTransport;
