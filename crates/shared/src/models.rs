use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }
}

/// Payload shown in a marker's info window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CafeInfo {
    pub name: String,
    pub address: String,
    pub rating: f64,
}

/// A resolved address. Produced per query and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

impl GeocodeResult {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
}

/// Menu items as sent by the OCR backend: either already joined into a
/// display string, or the raw list of recognised lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MenuItems {
    Text(String),
    List(Vec<MenuItem>),
}

/// OCR result for one receipt. Every field is optional; the form renders
/// missing values as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptData {
    pub store_name: Option<String>,
    #[serde(alias = "datetime")]
    pub visit_date: Option<String>,
    pub menu_items: Option<MenuItems>,
    pub total_price: Option<f64>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl ReceiptData {
    /// Position of the store, when the backend returned both coordinates.
    pub fn position(&self) -> Option<LatLng> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(LatLng::new(lat, lng)),
            _ => None,
        }
    }

    /// Marker payload for a freshly uploaded visit. New visits have no rating yet.
    pub fn cafe_info(&self) -> CafeInfo {
        CafeInfo {
            name: self.store_name.clone().unwrap_or_default(),
            address: self.location.clone().unwrap_or_default(),
            rating: 0.0,
        }
    }
}

/// Body of `POST /upload_receipt`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, alias = "receipt_info")]
    pub data: Option<ReceiptData>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_success_deserializes() {
        let json = r#"{"success":true,"data":{"store_name":"Cafe A","visit_date":"2024-03-01 10:30","menu_items":"Latte","total_price":4500,"location":"Seoul","latitude":37.5,"longitude":127.0}}"#;
        let resp: UploadResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        let data = resp.data.unwrap();
        assert_eq!(data.store_name.as_deref(), Some("Cafe A"));
        assert_eq!(data.total_price, Some(4500.0));
        assert_eq!(data.menu_items, Some(MenuItems::Text("Latte".to_string())));
        assert_eq!(data.position(), Some(LatLng::new(37.5, 127.0)));
    }

    #[test]
    fn test_upload_response_error_only() {
        let json = r#"{"success":false,"error":"bad image"}"#;
        let resp: UploadResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.success);
        assert!(resp.data.is_none());
        assert_eq!(resp.error.as_deref(), Some("bad image"));
    }

    #[test]
    fn test_upload_response_missing_success_is_false() {
        // The backend answers 4xx/5xx with only an `error` key
        let json = r#"{"error":"선택된 파일이 없습니다."}"#;
        let resp: UploadResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.success);
    }

    #[test]
    fn test_receipt_info_alias_and_menu_list() {
        let json = r#"{"success":true,"message":"ok","receipt_info":{"store_name":"Cafe B","datetime":"2024-03-01 10:30","menu_items":[{"name":"Americano","price":4000},{"name":"Scone","price":null}],"total_price":4000}}"#;
        let resp: UploadResponse = serde_json::from_str(json).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data.visit_date.as_deref(), Some("2024-03-01 10:30"));
        match data.menu_items.clone().unwrap() {
            MenuItems::List(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].price, Some(4000.0));
                assert!(items[1].price.is_none());
            }
            other => panic!("expected list, got {:?}", other),
        }
        assert!(data.position().is_none());
    }

    #[test]
    fn test_cafe_info_defaults_rating_to_zero() {
        let data = ReceiptData {
            store_name: Some("Cafe A".to_string()),
            location: None,
            ..Default::default()
        };
        let info = data.cafe_info();
        assert_eq!(info.name, "Cafe A");
        assert_eq!(info.address, "");
        assert_eq!(info.rating, 0.0);
    }

    #[test]
    fn test_position_requires_both_coordinates() {
        let data = ReceiptData {
            latitude: Some(37.5),
            ..Default::default()
        };
        assert!(data.position().is_none());
    }
}
