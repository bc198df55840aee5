pub mod kakao;

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use cafe_diary_shared::format::info_window_html;
use cafe_diary_shared::models::{CafeInfo, GeocodeResult, LatLng};
use cafe_diary_shared::page::{ADDRESS_NOT_FOUND_MESSAGE, MAP_LEVEL};
use futures::channel::oneshot;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    #[error("map container `{0}` not found")]
    ContainerMissing(String),
    #[error("map is not initialized")]
    NotInitialized,
    #[error("{}", ADDRESS_NOT_FOUND_MESSAGE)]
    AddressNotFound,
    #[error("geocoder dropped the request without answering")]
    GeocoderDropped,
    #[error("map SDK is not loaded")]
    SdkUnavailable,
}

/// Status reported by the geocoding service alongside its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodeStatus {
    Ok,
    ZeroResult,
    Error,
}

impl GeocodeStatus {
    pub fn from_sdk(status: &str) -> Self {
        match status {
            "OK" => GeocodeStatus::Ok,
            "ZERO_RESULT" => GeocodeStatus::ZeroResult,
            _ => GeocodeStatus::Error,
        }
    }
}

/// One geocoder hit. Coordinates arrive as decimal strings: `x` is the
/// longitude, `y` the latitude.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddressHit {
    pub address_name: String,
    pub x: String,
    pub y: String,
}

pub type GeocodeCallback = Box<dyn FnOnce(GeocodeStatus, Vec<AddressHit>)>;

/// The slice of the map widget the controller relies on.
pub trait MapSdk {
    type Map: Clone;
    type Marker: Clone;

    fn create_map(&self, container_id: &str, center: LatLng, level: u8)
        -> Result<Self::Map, MapError>;
    fn add_zoom_control(&self, map: &Self::Map);
    fn create_marker(&self, map: &Self::Map, position: LatLng) -> Self::Marker;
    /// Build an info window with `html` and open it whenever `marker` is clicked.
    fn bind_info_window(&self, map: &Self::Map, marker: &Self::Marker, html: &str);
    fn detach_marker(&self, marker: &Self::Marker);
    fn pan_to(&self, map: &Self::Map, position: LatLng);
    /// Start an address lookup. `done` must be invoked at most once.
    fn address_search(&self, address: &str, done: GeocodeCallback);
}

/// Turn a geocoder answer into the first usable result.
pub fn resolve_hits(
    status: GeocodeStatus,
    hits: Vec<AddressHit>,
) -> Result<GeocodeResult, MapError> {
    if status != GeocodeStatus::Ok {
        return Err(MapError::AddressNotFound);
    }
    let first = hits.into_iter().next().ok_or(MapError::AddressNotFound)?;
    let lat: f64 = first.y.trim().parse().map_err(|_| MapError::AddressNotFound)?;
    let lng: f64 = first.x.trim().parse().map_err(|_| MapError::AddressNotFound)?;
    Ok(GeocodeResult {
        lat,
        lng,
        address: first.address_name,
    })
}

pub struct MapController<S: MapSdk> {
    sdk: S,
    map: Option<S::Map>,
    markers: Vec<S::Marker>,
}

impl<S: MapSdk> MapController<S> {
    pub fn new(sdk: S) -> Self {
        MapController {
            sdk,
            map: None,
            markers: Vec::new(),
        }
    }

    /// Create the map inside `container_id`, centred on `center`, and attach
    /// a zoom control.
    pub fn init(&mut self, container_id: &str, center: LatLng) -> Result<(), MapError> {
        let map = self.sdk.create_map(container_id, center, MAP_LEVEL)?;
        self.sdk.add_zoom_control(&map);
        tracing::debug!(container_id, lat = center.lat, lng = center.lng, "map initialized");
        self.map = Some(map);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.map.is_some()
    }

    pub fn add_marker(
        &mut self,
        lat: f64,
        lng: f64,
        info: &CafeInfo,
    ) -> Result<S::Marker, MapError> {
        let map = self.map.as_ref().ok_or(MapError::NotInitialized)?;
        let marker = self.sdk.create_marker(map, LatLng::new(lat, lng));
        self.sdk
            .bind_info_window(map, &marker, &info_window_html(info));
        self.markers.push(marker.clone());
        Ok(marker)
    }

    /// Geocode `address`.
    ///
    /// The lookup starts immediately; the returned future does not borrow the
    /// controller, so callers may release any lock on it before awaiting.
    pub fn search_address(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<GeocodeResult, MapError>> + 'static {
        let (tx, rx) = oneshot::channel();
        self.sdk.address_search(
            address,
            Box::new(move |status, hits| {
                let _ = tx.send(resolve_hits(status, hits));
            }),
        );
        async move { rx.await.unwrap_or(Err(MapError::GeocoderDropped)) }
    }

    pub fn clear_markers(&mut self) {
        for marker in self.markers.drain(..) {
            self.sdk.detach_marker(&marker);
        }
    }

    pub fn pan_to(&self, lat: f64, lng: f64) {
        if let Some(map) = &self.map {
            self.sdk.pan_to(map, LatLng::new(lat, lng));
        }
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    #[cfg(test)]
    pub fn sdk(&self) -> &S {
        &self.sdk
    }
}

/// Capability to drop a pin for a newly recorded visit.
pub trait MarkerSink {
    fn place_marker(&self, position: LatLng, info: CafeInfo);
}

/// The page's single map controller, shared between components.
pub struct SharedMap<S: MapSdk>(Rc<RefCell<MapController<S>>>);

impl<S: MapSdk> Clone for SharedMap<S> {
    fn clone(&self) -> Self {
        SharedMap(Rc::clone(&self.0))
    }
}

/// Two handles are equal when they point at the same controller.
impl<S: MapSdk> PartialEq for SharedMap<S> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<S: MapSdk> SharedMap<S> {
    pub fn new(controller: MapController<S>) -> Self {
        SharedMap(Rc::new(RefCell::new(controller)))
    }

    pub fn init(&self, container_id: &str, center: LatLng) -> Result<(), MapError> {
        self.0.borrow_mut().init(container_id, center)
    }

    pub fn pan_to(&self, lat: f64, lng: f64) {
        self.0.borrow().pan_to(lat, lng);
    }

    pub fn clear_markers(&self) {
        self.0.borrow_mut().clear_markers();
    }

    pub fn marker_count(&self) -> usize {
        self.0.borrow().marker_count()
    }

    pub async fn search_address(&self, address: &str) -> Result<GeocodeResult, MapError> {
        let lookup = self.0.borrow().search_address(address);
        lookup.await
    }
}

impl<S: MapSdk> MarkerSink for SharedMap<S> {
    fn place_marker(&self, position: LatLng, info: CafeInfo) {
        if let Err(e) = self
            .0
            .borrow_mut()
            .add_marker(position.lat, position.lng, &info)
        {
            tracing::warn!(error = %e, name = %info.name, "could not add marker");
        }
    }
}
