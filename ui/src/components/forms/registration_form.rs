use dioxus::prelude::*;

use crate::components::inputs::{InputType, ValidatedInput};
use crate::features::registration::{RegistrationAction, RegistrationState};

#[derive(Props, PartialEq, Clone)]
pub struct RegistrationFormProps {
    pub state: Signal<RegistrationState>,
    pub dispatch: EventHandler<RegistrationAction>,
    pub on_submit: EventHandler<FormEvent>,
}

#[component]
pub fn RegistrationForm(props: RegistrationFormProps) -> Element {
    let state = props.state;
    let dispatch = props.dispatch;

    rsx! {
        form {
            id: "regForm",
            class: "registration-form",
            onsubmit: move |event| props.on_submit.call(event),

            h2 {
                class: "form-title",
                "Create an account"
            }

            div {
                class: "input-section",
                label {
                    class: "input-label",
                    r#for: "username",
                    "Username:"
                }
                ValidatedInput {
                    name: "username".to_string(),
                    value: state().form.username,
                    placeholder: "Choose a username".to_string(),
                    input_type: InputType::Text,
                    input_class: "input-field".to_string(),
                    on_change: move |data: String| {
                        dispatch.call(RegistrationAction::SetUsername(data));
                    }
                }
            }

            div {
                class: "input-section",
                label {
                    class: "input-label",
                    r#for: "password",
                    "Password:"
                }
                ValidatedInput {
                    name: "password".to_string(),
                    value: state().form.password,
                    placeholder: "Enter a password".to_string(),
                    input_type: InputType::Password,
                    input_class: "input-field".to_string(),
                    on_change: move |data: String| {
                        dispatch.call(RegistrationAction::SetPassword(data));
                    }
                }
            }

            div {
                class: "input-section",
                label {
                    class: "input-label",
                    r#for: "registeration_password",
                    "Confirm password:"
                }
                ValidatedInput {
                    name: "registeration_password".to_string(),
                    value: state().form.registeration_password,
                    placeholder: "Enter the password again".to_string(),
                    input_type: InputType::Password,
                    input_class: "input-field".to_string(),
                    on_change: move |data: String| {
                        dispatch.call(RegistrationAction::SetRegisterationPassword(data));
                    }
                }
            }

            div {
                class: "button-section",
                button {
                    class: "register-button",
                    r#type: "submit",
                    "Register"
                }
            }
        }
    }
}
