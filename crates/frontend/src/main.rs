mod api;
mod components;
mod dom;
mod map;
mod pages;
mod upload;

use dioxus::prelude::*;
use pages::dashboard::Dashboard;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
    #[route("/dashboard")]
    Dashboard {},
}

#[component]
fn Home() -> Element {
    rsx! {
        Dashboard {}
    }
}

const CSS: Asset = asset!("/assets/main.css");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Stylesheet { href: CSS }
        Router::<Route> {}
    }
}

fn main() {
    launch(App);
}
