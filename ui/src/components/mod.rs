//! User Interface Components
//!
//! Dioxus components for the registration page:
//!
//! - **forms**: the registration form
//! - **inputs**: input fields and form controls
//! - **dialog**: modal message overlay

pub mod dialog;
pub mod forms;
pub mod inputs;

pub use dialog::Dialog;
pub use forms::RegistrationForm;
pub use inputs::{InputType, ValidatedInput};
