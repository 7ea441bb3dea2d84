use dioxus::prelude::*;
use register_ui::RegistrationPage;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Register" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

#[derive(Clone, Routable, Debug, PartialEq)]
enum Route {
    #[route("/")]
    Register {},
}

#[component]
fn Register() -> Element {
    rsx! {
        div {
            RegistrationPage {}
        }
    }
}
