//! Structured error types for yardcheck.
//!
//! Only serialization and input-decoding failures ever reach a caller.
//! Asset and delivery failures are recorded with these types too, but the
//! fallback chains swallow them after logging.

/// All errors that can occur while building or delivering an export.
#[derive(Debug, thiserror::Error)]
pub enum YardCheckError {
    /// ZIP packaging error.
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding of a snapshot or config.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot handed in by the UI could not be decoded.
    #[error("Invalid snapshot: {0}")]
    Snapshot(String),

    /// A logo source failed (load, rasterize, refetch, unknown format).
    #[error("Logo unavailable: {0}")]
    Asset(String),

    /// A delivery route failed (share rejected, DOM call failed).
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, YardCheckError>;

impl From<String> for YardCheckError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for YardCheckError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<YardCheckError> for wasm_bindgen::JsValue {
    fn from(e: YardCheckError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

/// Render a JS exception into a readable message.
#[cfg(target_arch = "wasm32")]
pub(crate) fn js_message(value: &wasm_bindgen::JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &wasm_bindgen::JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
