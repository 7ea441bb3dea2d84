//! Infrastructure Services
//!
//! This module provides the infrastructure behind the registration page:
//!
//! - **client**: XML codec, HTTP transport and the registration client
//! - **config**: Endpoint configuration and global settings
//! - **errors**: Common error types
//!
//! The services are designed to be WASM-first, using async traits
//! without Send/Sync bounds for compatibility.

pub mod client;
pub mod config;
pub mod errors;
