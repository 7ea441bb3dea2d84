use dioxus::prelude::*;

use crate::features::registration::DialogState;

#[derive(Props, PartialEq, Clone)]
pub struct DialogProps {
    pub dialog: DialogState,
    pub on_accept: EventHandler<()>,
}

/// Modal overlay. Hidden through the `hidden` class rather than removed.
#[component]
pub fn Dialog(props: DialogProps) -> Element {
    rsx! {
        div {
            id: "overlay",
            class: "{props.dialog.overlay_class()}",

            div {
                class: "dialog",
                role: "dialog",

                h2 {
                    id: "dialog-title",
                    class: "dialog-title",
                    "{props.dialog.title}"
                }
                p {
                    id: "dialog-message",
                    class: "dialog-message",
                    "{props.dialog.message}"
                }
                button {
                    class: "dialog-accept",
                    r#type: "button",
                    onclick: move |_| props.on_accept.call(()),
                    "OK"
                }
            }
        }
    }
}
