//! Fixed identifiers, endpoints and timings shared by the dashboard page.
//!
//! The browser layer has no runtime configuration; everything it needs to
//! agree on with the page markup and the upload backend lives here.

use crate::models::LatLng;

/// Receipt upload endpoint on the page's own origin.
pub const UPLOAD_ENDPOINT: &str = "/upload_receipt";
/// Multipart field carrying the receipt image.
pub const RECEIPT_FIELD: &str = "receipt";

// DOM ids
pub const MAP_CONTAINER_ID: &str = "map";
pub const RECEIPT_FORM_ID: &str = "receipt-form";
pub const FILE_INPUT_ID: &str = "receipt-file";
pub const PREVIEW_ID: &str = "receipt-preview";
pub const LOADING_INDICATOR_ID: &str = "loading-indicator";
pub const RESULTS_SECTION_ID: &str = "ocr-results";
pub const FIELD_CAFE_NAME: &str = "cafe-name";
pub const FIELD_VISIT_DATE: &str = "visit-date";
pub const FIELD_MENU_ITEMS: &str = "menu-items";
pub const FIELD_TOTAL_PRICE: &str = "total-price";

/// Seoul City Hall.
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 37.566826,
    lng: 126.978656,
};
/// Kakao zoom level used when the map is created (lower is closer).
pub const MAP_LEVEL: u8 = 3;

pub const BANNER_TTL_MS: u32 = 3000;
pub const RELOAD_DELAY_MS: u32 = 1500;

pub const CURRENCY_SUFFIX: &str = "원";

// User-facing messages
pub const UPLOAD_SUCCESS_MESSAGE: &str = "영수증이 성공적으로 처리되었습니다.";
pub const UPLOAD_FAILED_MESSAGE: &str = "영수증 처리 중 오류가 발생했습니다.";
pub const NO_FILE_MESSAGE: &str = "파일이 업로드되지 않았습니다.";
pub const ADDRESS_NOT_FOUND_MESSAGE: &str = "주소를 찾을 수 없습니다.";
