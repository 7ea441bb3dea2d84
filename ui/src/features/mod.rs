//! Page state for registration
//!
//! - **registration**: form fields, dialog state and the action reducer

pub mod registration;
