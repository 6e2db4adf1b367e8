//! yardcheck - Perdue yard check form exporter
//!
//! Turns a snapshot of the yard check form (shift metadata plus 25 trailer
//! rows) into three downloadable documents:
//! - Word (`.docx`) with the Stevens Transport logo and a fixed-height table
//! - Excel (`.xlsx`) with banners, borders, striping and a one-page print area
//! - Plain text (`.txt`), tab delimited
//!
//! In the browser the logo is pulled from an `<img>` on the page and the
//! result is handed to the user by download, share sheet or a new tab.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { export_spreadsheet } from 'yardcheck';
//! await init();
//! await export_spreadsheet(snapshot, document.getElementById('logo'));
//! ```

pub mod asset;
pub mod cell_ref;
pub mod config;
pub mod delivery;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod report;
pub mod status;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod logging;

use wasm_bindgen::prelude::*;

pub use config::ReportConfig;
pub use error::{Result as YardCheckResult, YardCheckError};
pub use export::{render_spreadsheet, render_text, render_word, Exporter, Renderer};
pub use pipeline::{run_export, ExportOutcome};
pub use types::*;

/// Decode a JS value, treating `undefined`/`null` as the default.
fn from_js_or_default<T>(value: JsValue) -> error::Result<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| YardCheckError::Snapshot(e.to_string()))
}

/// Module start: panic messages and `log` output go to the console.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

#[cfg(target_arch = "wasm32")]
async fn export_in_browser(
    format: ExportFormat,
    snapshot: JsValue,
    logo: Option<web_sys::HtmlImageElement>,
    config: JsValue,
) -> std::result::Result<(), JsValue> {
    let snapshot: FormSnapshot = from_js_or_default(snapshot)?;
    let config: ReportConfig = from_js_or_default(config)?;
    let sources = logo
        .as_ref()
        .map(asset::web::browser_sources)
        .unwrap_or_default();
    let platform = delivery::web::BrowserPlatform::new()?;
    let exporter = Exporter::new(config);

    run_export(format, &snapshot, &sources, &platform, &exporter).await?;
    Ok(())
}

/// Export the form as a Word document and download it.
///
/// `logo` is the page's logo `<img>`; pass `undefined` to skip it.
/// `config` is an optional [`ReportConfig`] object.
///
/// # Errors
/// Rejects if the snapshot or config cannot be decoded, or rendering fails.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn export_word(
    snapshot: JsValue,
    logo: Option<web_sys::HtmlImageElement>,
    config: JsValue,
) -> std::result::Result<(), JsValue> {
    export_in_browser(ExportFormat::Word, snapshot, logo, config).await
}

/// Export the form as an Excel workbook and share or open it.
///
/// # Errors
/// Rejects if the snapshot or config cannot be decoded, or rendering fails.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn export_spreadsheet(
    snapshot: JsValue,
    logo: Option<web_sys::HtmlImageElement>,
    config: JsValue,
) -> std::result::Result<(), JsValue> {
    export_in_browser(ExportFormat::Spreadsheet, snapshot, logo, config).await
}

/// Export the form as a text report and download it.
///
/// # Errors
/// Rejects if the snapshot or config cannot be decoded.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn export_text(snapshot: JsValue, config: JsValue) -> std::result::Result<(), JsValue> {
    export_in_browser(ExportFormat::Text, snapshot, None, config).await
}

/// Render the text report and return its UTF-8 bytes without delivering.
///
/// # Errors
/// Returns an error if the snapshot cannot be decoded.
#[wasm_bindgen]
pub fn render_text_report(snapshot: JsValue) -> std::result::Result<Vec<u8>, JsValue> {
    let snapshot: FormSnapshot =
        from_js_or_default(snapshot).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(render_text(&snapshot, &ReportConfig::default()))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
