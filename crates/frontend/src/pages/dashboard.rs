use dioxus::prelude::*;

use crate::components::map_panel::MapPanel;
use crate::components::receipt_form::ReceiptForm;
use crate::map::kakao::KakaoSdk;
use crate::map::{MapController, SharedMap};

/// Receipt upload next to the cafe map. The form drops a marker on the map
/// for every receipt the backend could geolocate.
#[component]
pub fn Dashboard() -> Element {
    let map = use_hook(|| SharedMap::new(MapController::new(KakaoSdk::default())));

    rsx! {
        div { class: "app",
            header { class: "header",
                h1 { "카페 다이어리" }
            }
            div { class: "main-layout",
                div { class: "sidebar",
                    ReceiptForm { map: Some(map.clone()) }
                }
                div { class: "map-area",
                    MapPanel { map }
                }
            }
        }
    }
}
