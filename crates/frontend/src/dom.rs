use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::upload::ReceiptFile;

/// Read the first file chosen in the `<input type="file">` with `input_id`.
pub async fn read_selected_file(input_id: &str) -> Option<ReceiptFile> {
    let input = web_sys::window()?
        .document()?
        .get_element_by_id(input_id)?
        .dyn_into::<web_sys::HtmlInputElement>()
        .ok()?;
    let file = input.files()?.get(0)?;

    let buffer = match JsFuture::from(file.array_buffer()).await {
        Ok(buffer) => buffer,
        Err(e) => {
            tracing::warn!(error = ?e, "could not read selected file");
            return None;
        }
    };
    Some(ReceiptFile {
        name: file.name(),
        mime: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

/// Reload the page after `delay_ms`. Not cancellable.
pub fn reload_after(delay_ms: u32) {
    wasm_bindgen_futures::spawn_local(async move {
        TimeoutFuture::new(delay_ms).await;
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().reload() {
                tracing::warn!(error = ?e, "page reload failed");
            }
        }
    });
}
