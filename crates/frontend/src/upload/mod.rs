pub mod banner;

use std::cell::{Cell, RefCell};
use std::future::Future;

use base64::Engine;
use cafe_diary_shared::format::ResultFields;
use cafe_diary_shared::models::ReceiptData;
use cafe_diary_shared::page::{
    BANNER_TTL_MS, NO_FILE_MESSAGE, RELOAD_DELAY_MS, UPLOAD_FAILED_MESSAGE,
    UPLOAD_SUCCESS_MESSAGE,
};

use crate::map::MarkerSink;
use banner::BannerKind;

/// A receipt image picked in the file input.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ReceiptFile {
    /// `data:` URL used as the preview image source.
    pub fn data_url(&self) -> String {
        let mime = if self.mime.is_empty() {
            "application/octet-stream"
        } else {
            self.mime.as_str()
        };
        format!(
            "data:{};base64,{}",
            mime,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// A successful OCR answer.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedReceipt {
    pub data: ReceiptData,
    pub message: Option<String>,
}

/// Why an upload attempt failed. `Display` is the banner text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UploadError {
    #[error("{}", NO_FILE_MESSAGE)]
    NoFile,
    #[error("{0}")]
    Network(String),
    #[error("{msg} (HTTP {0})", msg = UPLOAD_FAILED_MESSAGE)]
    Status(u16),
    #[error("{msg} ({0})", msg = UPLOAD_FAILED_MESSAGE)]
    Decode(String),
    #[error("{}", .0.as_deref().unwrap_or(UPLOAD_FAILED_MESSAGE))]
    Rejected(Option<String>),
}

/// Transport for `POST /upload_receipt`.
pub trait ReceiptApi {
    fn upload(&self, file: ReceiptFile)
        -> impl Future<Output = Result<UploadedReceipt, UploadError>>;
}

/// Page updates driven by the controller.
pub trait ReceiptView {
    fn show_preview(&self, data_url: String);
    fn set_loading(&self, visible: bool);
    /// Reveal the results section and fill its inputs.
    fn show_results(&self, fields: ResultFields);
    /// Show an alert and return its id.
    fn show_banner(&self, kind: BannerKind, message: String) -> u64;
    /// Remove banner `id` once `delay_ms` has passed, unless it is already gone.
    fn schedule_dismiss(&self, id: u64, delay_ms: u32);
    fn schedule_reload(&self, delay_ms: u32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    FileSelected,
    Submitting,
    PopulatingForm,
    ReloadScheduled,
    MessageShown,
}

/// Drives the receipt form: preview on file selection, upload on submit,
/// and result/banner/marker updates once the backend answers.
///
/// Concurrent submissions are not coalesced; each one runs to completion and
/// produces its own banner.
pub struct ReceiptUploadController<A, V, M> {
    api: A,
    view: V,
    markers: Option<M>,
    phase: Cell<UploadPhase>,
    file: RefCell<Option<ReceiptFile>>,
}

impl<A, V, M> ReceiptUploadController<A, V, M>
where
    A: ReceiptApi,
    V: ReceiptView,
    M: MarkerSink,
{
    pub fn new(api: A, view: V, markers: Option<M>) -> Self {
        ReceiptUploadController {
            api,
            view,
            markers,
            phase: Cell::new(UploadPhase::Idle),
            file: RefCell::new(None),
        }
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase.get()
    }

    pub fn select_file(&self, file: ReceiptFile) {
        tracing::debug!(name = %file.name, size = file.bytes.len(), "receipt selected");
        self.view.show_preview(file.data_url());
        *self.file.borrow_mut() = Some(file);
        self.phase.set(UploadPhase::FileSelected);
    }

    pub async fn submit(&self) {
        self.phase.set(UploadPhase::Submitting);
        self.view.set_loading(true);

        let file = self.file.borrow().clone();
        let outcome = match file {
            Some(file) => {
                tracing::info!(name = %file.name, "uploading receipt");
                self.api.upload(file).await
            }
            None => Err(UploadError::NoFile),
        };

        match outcome {
            Ok(receipt) => self.apply_success(receipt),
            Err(e) => {
                tracing::warn!(error = %e, "receipt upload failed");
                self.announce(BannerKind::Error, e.to_string());
                self.phase.set(UploadPhase::MessageShown);
            }
        }

        self.view.set_loading(false);
    }

    /// Every banner expires on its own timer.
    fn announce(&self, kind: BannerKind, message: String) {
        let id = self.view.show_banner(kind, message);
        self.view.schedule_dismiss(id, BANNER_TTL_MS);
    }

    fn apply_success(&self, receipt: UploadedReceipt) {
        self.phase.set(UploadPhase::PopulatingForm);
        let UploadedReceipt { data, message } = receipt;
        tracing::info!(store = ?data.store_name, "receipt recognised");

        self.view.show_results(ResultFields::from_receipt(&data));
        self.announce(
            BannerKind::Success,
            message.unwrap_or_else(|| UPLOAD_SUCCESS_MESSAGE.to_string()),
        );

        if let Some(markers) = &self.markers {
            match data.position() {
                Some(position) => markers.place_marker(position, data.cafe_info()),
                None => tracing::warn!("upload response has no coordinates, skipping marker"),
            }
        }

        self.view.schedule_reload(RELOAD_DELAY_MS);
        self.phase.set(UploadPhase::ReloadScheduled);
    }
}
