use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewerError {
    #[error("document rendering engine is not available on this page")]
    EngineUnavailable,
    #[error("document request failed with HTTP status {0}")]
    Fetch(u16),
    #[error("network error while fetching document: {0}")]
    Network(String),
    #[error("document could not be parsed: {0}")]
    Parse(String),
    #[error("page {page} failed to render: {reason}")]
    Render { page: u32, reason: String },
}

/// Best-effort human readable text for a thrown JS value.
pub fn describe_js_error(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
