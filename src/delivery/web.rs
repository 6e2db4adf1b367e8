//! Browser implementation of [`Platform`].

use futures::future::{FutureExt, LocalBoxFuture};
use js_sys::{Array, Function, Object, Promise, Reflect, Uint8Array};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, FilePropertyBag, HtmlAnchorElement, Url, Window};

use super::{AnchorRequest, Platform};
use crate::error::{js_message, Result, YardCheckError};
use crate::types::ExportArtifact;

fn delivery_err(e: &JsValue) -> YardCheckError {
    YardCheckError::Delivery(js_message(e))
}

/// Delivery through the DOM of the current window.
pub struct BrowserPlatform {
    window: Window,
}

impl BrowserPlatform {
    /// # Errors
    /// Returns an error outside a browsing context (e.g. in a worker).
    pub fn new() -> Result<Self> {
        let window =
            web_sys::window().ok_or_else(|| YardCheckError::Delivery("no window".into()))?;
        Ok(Self { window })
    }

    fn byte_parts(bytes: &[u8]) -> Array {
        Array::of1(&Uint8Array::from(bytes))
    }

    fn to_blob(artifact: &ExportArtifact) -> Result<Blob> {
        let options = BlobPropertyBag::new();
        options.set_type(artifact.mime_type);
        Blob::new_with_u8_array_sequence_and_options(&Self::byte_parts(&artifact.bytes), &options)
            .map_err(|e| delivery_err(&e))
    }

    fn to_file(artifact: &ExportArtifact) -> Result<File> {
        let options = FilePropertyBag::new();
        options.set_type(artifact.mime_type);
        File::new_with_u8_array_sequence_and_options(
            &Self::byte_parts(&artifact.bytes),
            &artifact.filename,
            &options,
        )
        .map_err(|e| delivery_err(&e))
    }
}

/// `navigator.share({ files: [file], title })`.
async fn share_file(navigator: JsValue, share: Function, artifact: &ExportArtifact) -> Result<()> {
    let file = BrowserPlatform::to_file(artifact)?;
    let data = Object::new();
    Reflect::set(&data, &JsValue::from_str("files"), &Array::of1(&file))
        .map_err(|e| delivery_err(&e))?;
    Reflect::set(
        &data,
        &JsValue::from_str("title"),
        &JsValue::from_str(&artifact.filename),
    )
    .map_err(|e| delivery_err(&e))?;

    let promise: Promise = share
        .call1(&navigator, &data)
        .map_err(|e| delivery_err(&e))?
        .dyn_into()
        .map_err(|_| YardCheckError::Delivery("share did not return a promise".into()))?;
    // Rejects when the user cancels or files are not shareable.
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| delivery_err(&e))
}

impl Platform for BrowserPlatform {
    fn share<'a>(
        &'a self,
        artifact: &'a ExportArtifact,
    ) -> Option<LocalBoxFuture<'a, Result<()>>> {
        let navigator: JsValue = self.window.navigator().into();
        let share = Reflect::get(&navigator, &JsValue::from_str("share"))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        Some(share_file(navigator, share, artifact).boxed_local())
    }

    fn create_object_url(&self, artifact: &ExportArtifact) -> Result<String> {
        let blob = Self::to_blob(artifact)?;
        Url::create_object_url_with_blob(&blob).map_err(|e| delivery_err(&e))
    }

    fn click_anchor(&self, anchor: &AnchorRequest<'_>) -> Result<()> {
        let document = self
            .window
            .document()
            .ok_or_else(|| YardCheckError::Delivery("no document".into()))?;
        let body = document
            .body()
            .ok_or_else(|| YardCheckError::Delivery("no body".into()))?;

        let link = document
            .create_element("a")
            .map_err(|e| delivery_err(&e))?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| YardCheckError::Delivery("anchor has wrong type".into()))?;
        link.set_href(anchor.href);
        link.set_download(anchor.filename);
        if anchor.new_tab {
            link.set_target("_blank");
            link.set_rel("noopener");
        }
        link.set_hidden(true);

        body.append_child(&link).map_err(|e| delivery_err(&e))?;
        link.click();
        link.remove();
        Ok(())
    }

    fn revoke_object_url(&self, url: &str) {
        if let Err(e) = Url::revoke_object_url(url) {
            log::debug!("revoking {url} failed: {}", js_message(&e));
        }
    }

    fn revoke_object_url_later(&self, url: &str, delay_ms: u32) {
        let owned = url.to_string();
        let callback = Closure::once_into_js(move || {
            let _ = Url::revoke_object_url(&owned);
        });
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        if self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
            .is_err()
        {
            // No timer available; the URL stays alive.
            log::debug!("could not schedule revocation of {url}");
        }
    }
}
