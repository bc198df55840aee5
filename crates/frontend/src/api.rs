use cafe_diary_shared::models::UploadResponse;
use cafe_diary_shared::page::{RECEIPT_FIELD, UPLOAD_ENDPOINT};
use reqwest::multipart::{Form, Part};

use crate::upload::{ReceiptApi, ReceiptFile, UploadError, UploadedReceipt};

fn upload_url() -> String {
    // Same origin as the page; reqwest needs an absolute URL in the browser.
    let origin = web_sys::window().and_then(|w| w.location().origin().ok());
    match origin {
        Some(origin) => format!("{}{}", origin, UPLOAD_ENDPOINT),
        None => UPLOAD_ENDPOINT.to_string(),
    }
}

/// Interpret the upload endpoint's answer.
///
/// Error bodies (`{"error": "..."}`) are honoured on any status; a non-2xx
/// answer without a readable body reports the status code instead.
pub fn decode_upload_response(status: u16, body: &str) -> Result<UploadedReceipt, UploadError> {
    let ok_status = (200..300).contains(&status);
    match serde_json::from_str::<UploadResponse>(body) {
        Ok(resp) if ok_status && resp.success => match resp.data {
            Some(data) => Ok(UploadedReceipt {
                data,
                message: resp.message,
            }),
            None => Err(UploadError::Decode("response has no receipt data".to_string())),
        },
        Ok(resp) if ok_status || resp.error.is_some() => Err(UploadError::Rejected(resp.error)),
        Ok(_) => Err(UploadError::Status(status)),
        Err(e) if ok_status => Err(UploadError::Decode(e.to_string())),
        Err(_) => Err(UploadError::Status(status)),
    }
}

/// Uploads receipts to the page's own backend.
#[derive(Debug, Clone, Default)]
pub struct HttpReceiptApi {
    client: reqwest::Client,
}

impl ReceiptApi for HttpReceiptApi {
    async fn upload(&self, file: ReceiptFile) -> Result<UploadedReceipt, UploadError> {
        let mut part = Part::bytes(file.bytes).file_name(file.name);
        if !file.mime.is_empty() {
            part = part
                .mime_str(&file.mime)
                .map_err(|e| UploadError::Network(e.to_string()))?;
        }
        let form = Form::new().part(RECEIPT_FIELD, part);

        let resp = self
            .client
            .post(upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        tracing::debug!(status, "upload response received");
        let body = resp
            .text()
            .await
            .map_err(|e| UploadError::Network(e.to_string()))?;
        decode_upload_response(status, &body)
    }
}
