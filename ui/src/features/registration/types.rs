use dioxus::prelude::EventHandler;

use crate::services::client::{DialogHandle, FormHandle, RegistrationRequest};

// Form state, field names follow the page markup
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistrationFormFields {
    pub username: String,
    pub password: String,
    pub registeration_password: String,
}

impl RegistrationFormFields {
    pub fn to_request(&self) -> RegistrationRequest {
        RegistrationRequest::new(
            self.username.clone(),
            self.password.clone(),
            self.registeration_password.clone(),
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DialogState {
    pub title: String,
    pub message: String,
    pub visible: bool,
}

impl DialogState {
    pub fn show(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.title = title.into();
        self.message = message.into();
        self.visible = true;
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Class attribute of the overlay
    pub fn overlay_class(&self) -> &'static str {
        if self.visible {
            ""
        } else {
            "hidden"
        }
    }
}

// Action enum for state mutations
#[derive(Clone, Debug, PartialEq)]
pub enum RegistrationAction {
    SetUsername(String),
    SetPassword(String),
    SetRegisterationPassword(String),
    ResetForm,

    ShowDialog { title: String, message: String },
    DismissDialog,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistrationState {
    pub form: RegistrationFormFields,
    pub dialog: DialogState,
}

impl RegistrationState {
    pub fn reduce_in_place(&mut self, action: RegistrationAction) {
        match action {
            RegistrationAction::SetUsername(username) => {
                self.form.username = username;
            }
            RegistrationAction::SetPassword(password) => {
                self.form.password = password;
            }
            RegistrationAction::SetRegisterationPassword(password) => {
                self.form.registeration_password = password;
            }
            RegistrationAction::ResetForm => {
                self.form = RegistrationFormFields::default();
            }
            RegistrationAction::ShowDialog { title, message } => {
                self.dialog.show(title, message);
            }
            RegistrationAction::DismissDialog => {
                self.dialog.dismiss();
            }
        }
    }
}

/// Dialog and form handle that routes through the page dispatcher
#[derive(Clone, Copy)]
pub struct DispatchHandle {
    dispatch: EventHandler<RegistrationAction>,
}

impl DispatchHandle {
    pub fn new(dispatch: EventHandler<RegistrationAction>) -> Self {
        Self { dispatch }
    }
}

impl DialogHandle for DispatchHandle {
    fn show(&self, title: &str, message: &str) {
        self.dispatch.call(RegistrationAction::ShowDialog {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn dismiss(&self) {
        self.dispatch.call(RegistrationAction::DismissDialog);
    }
}

impl FormHandle for DispatchHandle {
    fn reset(&self) {
        self.dispatch.call(RegistrationAction::ResetForm);
    }
}
