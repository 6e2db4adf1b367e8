//! Browser-only tests for the JavaScript entry points.
//!
//! Run with: wasm-pack test --headless --chrome

#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use yardcheck::delivery::web::BrowserPlatform;
use yardcheck::{render_text_report, version, FormSnapshot};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_text_report_from_js_object() {
    let snapshot = js_sys::JSON::parse(
        r#"{"metadata":{"truck":"T-12"},"rows":[{"trailer":"53021","status":"Red Tagged","issues":"leak"}]}"#,
    )
    .unwrap();
    let text = String::from_utf8(render_text_report(snapshot).unwrap()).unwrap();
    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(lines[3], "Date/Time:  | Truck: T-12 | Trip:  | Location: ");
    assert_eq!(lines[6], "1. 53021\t\t\tleak\t");
    assert_eq!(lines.len(), 31);
}

#[wasm_bindgen_test]
fn test_undefined_snapshot_is_blank_form() {
    let bytes = render_text_report(JsValue::UNDEFINED).unwrap();
    let expected = yardcheck::render_text(&FormSnapshot::default(), &Default::default());
    assert_eq!(bytes, expected);
}

#[wasm_bindgen_test]
fn test_malformed_snapshot_rejected() {
    assert!(render_text_report(JsValue::from_f64(4.0)).is_err());
}

#[wasm_bindgen_test]
fn test_browser_platform_available() {
    assert!(BrowserPlatform::new().is_ok());
    assert!(!version().is_empty());
}
