use cafe_diary_shared::models::GeocodeResult;
use cafe_diary_shared::page::{DEFAULT_CENTER, MAP_CONTAINER_ID};
use dioxus::prelude::*;

use crate::map::kakao::{self, KakaoSdk};
use crate::map::SharedMap;

#[component]
pub fn MapPanel(map: SharedMap<KakaoSdk>) -> Element {
    let mut query = use_signal(String::new);
    let mut found = use_signal(|| None::<GeocodeResult>);
    let mut search_error = use_signal(|| None::<String>);

    // Runs after the first render so the container div exists.
    let loader = map.clone();
    use_effect(move || {
        let map = loader.clone();
        spawn(async move {
            if let Err(e) = kakao::load_sdk().await {
                tracing::error!(error = %e, "map SDK unavailable");
                return;
            }
            match map.init(MAP_CONTAINER_ID, DEFAULT_CENTER) {
                Ok(()) => tracing::info!("map ready"),
                Err(e) => tracing::error!(error = %e, "map init failed"),
            }
        });
    });

    let clearer = map.clone();
    let on_clear = move |_: MouseEvent| {
        tracing::debug!(count = clearer.marker_count(), "clearing markers");
        clearer.clear_markers();
    };

    let on_search = move |evt: Event<FormData>| {
        evt.prevent_default();
        let address = query.read().trim().to_string();
        if address.is_empty() {
            return;
        }
        let map = map.clone();
        spawn(async move {
            match map.search_address(&address).await {
                Ok(result) => {
                    map.pan_to(result.lat, result.lng);
                    search_error.set(None);
                    found.set(Some(result));
                }
                Err(e) => {
                    tracing::debug!(error = %e, %address, "address search failed");
                    found.set(None);
                    search_error.set(Some(e.to_string()));
                }
            }
        });
    };

    rsx! {
        div { class: "panel map-panel",
            form { class: "address-search", onsubmit: on_search,
                input {
                    r#type: "text",
                    class: "form-control",
                    placeholder: "주소 검색",
                    value: "{query}",
                    oninput: move |evt| query.set(evt.value()),
                }
                button { r#type: "submit", class: "btn btn-outline-secondary", "검색" }
                button { r#type: "button", class: "btn btn-outline-secondary", onclick: on_clear, "마커 지우기" }
            }
            if let Some(result) = found() {
                p { class: "search-result", "{result.address}" }
            }
            if let Some(message) = search_error() {
                p { class: "search-error", "{message}" }
            }
            div { id: MAP_CONTAINER_ID, class: "map" }
        }
    }
}
