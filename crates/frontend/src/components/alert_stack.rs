use dioxus::prelude::*;

use crate::upload::banner::{Banner, BannerStack};

#[component]
pub fn AlertStack(banners: Signal<BannerStack>) -> Element {
    let items: Vec<Banner> = banners.read().iter().cloned().collect();

    rsx! {
        for banner in items {
            div {
                key: "{banner.id}",
                class: banner.kind.css_class(),
                role: "alert",
                "{banner.message}"
                button {
                    r#type: "button",
                    class: "btn-close",
                    "aria-label": "Close",
                    onclick: move |_| {
                        banners.write().dismiss(banner.id);
                    },
                }
            }
        }
    }
}
