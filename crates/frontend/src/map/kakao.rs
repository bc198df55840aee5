//! Bindings to the Kakao Maps JavaScript SDK.
//!
//! The page host injects the loader with `autoload=false&libraries=services`,
//! so [`load_sdk`] must complete before any other call here.

use std::cell::OnceCell;

use cafe_diary_shared::models::LatLng;
use futures::channel::oneshot;
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::{AddressHit, GeocodeCallback, GeocodeStatus, MapError, MapSdk};

mod sdk {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = ["kakao", "maps"])]
        #[derive(Debug, Clone)]
        pub type LatLng;

        #[wasm_bindgen(constructor, js_namespace = ["kakao", "maps"])]
        pub fn new(lat: f64, lng: f64) -> LatLng;

        #[wasm_bindgen(js_namespace = ["kakao", "maps"])]
        #[derive(Debug, Clone)]
        pub type Map;

        #[wasm_bindgen(constructor, js_namespace = ["kakao", "maps"])]
        pub fn new(container: &web_sys::Element, options: &js_sys::Object) -> Map;

        #[wasm_bindgen(method, js_name = addControl)]
        pub fn add_control(this: &Map, control: &ZoomControl, position: &JsValue);

        #[wasm_bindgen(method, js_name = panTo)]
        pub fn pan_to(this: &Map, position: &LatLng);

        #[wasm_bindgen(js_namespace = ["kakao", "maps"])]
        #[derive(Debug, Clone)]
        pub type ZoomControl;

        #[wasm_bindgen(constructor, js_namespace = ["kakao", "maps"])]
        pub fn new() -> ZoomControl;

        #[wasm_bindgen(js_namespace = ["kakao", "maps"])]
        #[derive(Debug, Clone)]
        pub type Marker;

        #[wasm_bindgen(constructor, js_namespace = ["kakao", "maps"])]
        pub fn new(options: &js_sys::Object) -> Marker;

        #[wasm_bindgen(method, js_name = setMap)]
        pub fn set_map(this: &Marker, map: &JsValue);

        #[wasm_bindgen(js_namespace = ["kakao", "maps"])]
        #[derive(Debug, Clone)]
        pub type InfoWindow;

        #[wasm_bindgen(constructor, js_namespace = ["kakao", "maps"])]
        pub fn new(options: &js_sys::Object) -> InfoWindow;

        #[wasm_bindgen(method)]
        pub fn open(this: &InfoWindow, map: &Map, marker: &Marker);

        #[wasm_bindgen(js_namespace = ["kakao", "maps", "event"], js_name = addListener)]
        pub fn add_listener(target: &JsValue, event: &str, handler: &js_sys::Function);

        #[wasm_bindgen(js_namespace = ["kakao", "maps", "services"])]
        #[derive(Debug, Clone)]
        pub type Geocoder;

        #[wasm_bindgen(constructor, js_namespace = ["kakao", "maps", "services"])]
        pub fn new() -> Geocoder;

        #[wasm_bindgen(method, js_name = addressSearch)]
        pub fn address_search(this: &Geocoder, address: &str, callback: &js_sys::Function);

        #[wasm_bindgen(js_namespace = ["kakao", "maps"], js_name = load)]
        pub fn load(callback: &js_sys::Function);
    }
}

/// Walk `path` from the global object, e.g. `["kakao", "maps"]`.
fn global_path(path: &[&str]) -> Option<JsValue> {
    let mut value: JsValue = js_sys::global().into();
    for key in path {
        value = Reflect::get(&value, &JsValue::from_str(key)).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
    }
    Some(value)
}

fn options(entries: &[(&str, &JsValue)]) -> Object {
    let obj = Object::new();
    for (key, value) in entries {
        let _ = Reflect::set(&obj, &JsValue::from_str(key), value);
    }
    obj
}

fn to_sdk(position: LatLng) -> sdk::LatLng {
    sdk::LatLng::new(position.lat, position.lng)
}

/// Wait for the SDK's deferred libraries to finish loading.
pub async fn load_sdk() -> Result<(), MapError> {
    if global_path(&["kakao", "maps", "load"]).is_none() {
        return Err(MapError::SdkUnavailable);
    }
    let (tx, rx) = oneshot::channel::<()>();
    let done = Closure::once_into_js(move || {
        let _ = tx.send(());
    });
    sdk::load(done.unchecked_ref());
    rx.await.map_err(|_| MapError::SdkUnavailable)
}

/// [`MapSdk`] backed by the Kakao Maps SDK.
///
/// One geocoder per instance, created on the first lookup since the services
/// library is only usable after [`load_sdk`].
#[derive(Debug, Default)]
pub struct KakaoSdk {
    geocoder: OnceCell<sdk::Geocoder>,
}

impl KakaoSdk {
    fn geocoder(&self) -> &sdk::Geocoder {
        self.geocoder.get_or_init(sdk::Geocoder::new)
    }
}

impl MapSdk for KakaoSdk {
    type Map = sdk::Map;
    type Marker = sdk::Marker;

    fn create_map(
        &self,
        container_id: &str,
        center: LatLng,
        level: u8,
    ) -> Result<sdk::Map, MapError> {
        if global_path(&["kakao", "maps", "Map"]).is_none() {
            return Err(MapError::SdkUnavailable);
        }
        let container = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(container_id))
            .ok_or_else(|| MapError::ContainerMissing(container_id.to_string()))?;
        let center: JsValue = to_sdk(center).into();
        let opts = options(&[("center", &center), ("level", &JsValue::from(level))]);
        Ok(sdk::Map::new(&container, &opts))
    }

    fn add_zoom_control(&self, map: &sdk::Map) {
        let position = global_path(&["kakao", "maps", "ControlPosition", "RIGHT"])
            .unwrap_or(JsValue::UNDEFINED);
        map.add_control(&sdk::ZoomControl::new(), &position);
    }

    fn create_marker(&self, map: &sdk::Map, position: LatLng) -> sdk::Marker {
        let position: JsValue = to_sdk(position).into();
        let map: &JsValue = map.as_ref();
        let opts = options(&[("position", &position), ("map", map)]);
        sdk::Marker::new(&opts)
    }

    fn bind_info_window(&self, map: &sdk::Map, marker: &sdk::Marker, html: &str) {
        let info_window = sdk::InfoWindow::new(&options(&[
            ("content", &JsValue::from_str(html)),
            ("removable", &JsValue::TRUE),
        ]));
        let (map, anchor) = (map.clone(), marker.clone());
        let on_click = Closure::<dyn FnMut()>::new(move || {
            info_window.open(&map, &anchor);
        });
        sdk::add_listener(marker.as_ref(), "click", on_click.as_ref().unchecked_ref());
        // Listeners live as long as the page
        on_click.forget();
    }

    fn detach_marker(&self, marker: &sdk::Marker) {
        marker.set_map(&JsValue::NULL);
    }

    fn pan_to(&self, map: &sdk::Map, position: LatLng) {
        map.pan_to(&to_sdk(position));
    }

    fn address_search(&self, address: &str, done: GeocodeCallback) {
        let callback = Closure::once_into_js(move |result: JsValue, status: JsValue| {
            let status = GeocodeStatus::from_sdk(&status.as_string().unwrap_or_default());
            let hits: Vec<AddressHit> = serde_wasm_bindgen::from_value(result).unwrap_or_default();
            done(status, hits);
        });
        self.geocoder()
            .address_search(address, callback.unchecked_ref::<Function>());
    }
}
