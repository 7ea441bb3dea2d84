use std::rc::Rc;

use dioxus::prelude::*;

use crate::components::{Dialog, RegistrationForm};
use crate::features::registration::{DispatchHandle, RegistrationAction, RegistrationState};
use crate::services::client::{DefaultTransport, RegistrationClient};
use crate::services::config::RegistrationConfig;
use crate::{console_error, console_info};

#[component]
pub fn RegistrationPage() -> Element {
    let mut state = use_signal(RegistrationState::default);

    // Dispatch function for actions - in-place reduction keeps Signal reactivity
    let dispatch = use_callback(move |action: RegistrationAction| {
        state.with_mut(|s| {
            s.reduce_in_place(action);
        });
    });

    let client = use_hook(move || {
        let config = RegistrationConfig::for_current_page();
        if let Err(e) = config.validate() {
            console_error!("[Registration] {}", e);
        }
        let handle = Rc::new(DispatchHandle::new(dispatch));
        RegistrationClient::new(
            config,
            Rc::new(DefaultTransport::new()),
            handle.clone(),
            handle,
        )
    });

    let submit_client = client.clone();
    let on_submit = move |event: FormEvent| {
        let request = state().form.to_request();
        console_info!(
            "[Registration] Submitting to {}",
            submit_client.config().endpoint_url()
        );
        let allow_native = submit_client.submit(request, |task| {
            spawn(task);
        });
        if !allow_native {
            event.prevent_default();
        }
    };

    rsx! {
        div {
            class: "registration-container",

            h1 {
                class: "registration-title",
                "Register"
            }

            RegistrationForm {
                state: state,
                dispatch: dispatch,
                on_submit: on_submit
            }

            Dialog {
                dialog: state().dialog,
                on_accept: move |_| client.dismiss()
            }
        }
    }
}
