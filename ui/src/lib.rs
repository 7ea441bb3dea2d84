//! This crate contains the registration page: its components, state and client services.

pub mod app;
pub use app::RegistrationPage;

pub mod components;
pub mod features;
pub mod services;
pub mod utils;
