//! Browser logo sources.
//!
//! [`RasterSource`] redraws the `<img>` onto an off-screen canvas and encodes
//! it as PNG. That is cheap but fails once the canvas is tainted by a
//! cross-origin image, so [`RefetchSource`] follows it and downloads the
//! image's `src` again as raw bytes.

use base64::Engine;
use futures::future::{FutureExt, LocalBoxFuture};
use js_sys::{Promise, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement,
    Response,
};

use super::LogoSource;
use crate::error::{js_message, Result, YardCheckError};

/// Raster first, refetch second.
#[must_use]
pub fn browser_sources(image: &HtmlImageElement) -> Vec<Box<dyn LogoSource>> {
    vec![
        Box::new(RasterSource {
            image: image.clone(),
        }),
        Box::new(RefetchSource {
            image: image.clone(),
        }),
    ]
}

/// Wait until the element has finished loading.
///
/// Settles on the element's own `load`/`error` events. An element that is
/// already complete but has no natural width failed earlier and will never
/// fire again, so it is reported as an error straight away.
async fn wait_until_loaded(image: &HtmlImageElement) -> Result<()> {
    if image.complete() {
        return if image.natural_width() > 0 {
            Ok(())
        } else {
            Err(YardCheckError::Asset("logo image is broken".into()))
        };
    }

    let promise = Promise::new(&mut |resolve, reject| {
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        let _ = image.add_event_listener_with_callback_and_add_event_listener_options(
            "load", &resolve, &options,
        );
        let _ = image.add_event_listener_with_callback_and_add_event_listener_options(
            "error", &reject, &options,
        );
    });

    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|_| YardCheckError::Asset("logo image failed to load".into()))
}

/// Draw the loaded image onto a canvas and encode it as PNG.
pub struct RasterSource {
    image: HtmlImageElement,
}

impl RasterSource {
    async fn rasterize(&self) -> Result<Vec<u8>> {
        wait_until_loaded(&self.image).await?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| YardCheckError::Asset("no document".into()))?;
        let canvas = document
            .create_element("canvas")
            .map_err(|e| YardCheckError::Asset(js_message(&e)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| YardCheckError::Asset("canvas element has wrong type".into()))?;
        canvas.set_width(self.image.natural_width());
        canvas.set_height(self.image.natural_height());

        let ctx = canvas
            .get_context("2d")
            .map_err(|e| YardCheckError::Asset(js_message(&e)))?
            .ok_or_else(|| YardCheckError::Asset("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| YardCheckError::Asset("2d context has wrong type".into()))?;
        ctx.draw_image_with_html_image_element(&self.image, 0.0, 0.0)
            .map_err(|e| YardCheckError::Asset(js_message(&e)))?;

        // Throws a SecurityError when the canvas is tainted.
        let data_url = canvas
            .to_data_url_with_type("image/png")
            .map_err(|e| YardCheckError::Asset(js_message(&e)))?;
        decode_data_url(&data_url)
    }
}

impl LogoSource for RasterSource {
    fn name(&self) -> &'static str {
        "raster"
    }

    fn load(&self) -> LocalBoxFuture<'_, Result<Vec<u8>>> {
        self.rasterize().boxed_local()
    }
}

/// Download the image's `src` again and use the body as-is.
pub struct RefetchSource {
    image: HtmlImageElement,
}

impl RefetchSource {
    async fn refetch(&self) -> Result<Vec<u8>> {
        let src = self.image.src();
        if src.is_empty() {
            return Err(YardCheckError::Asset("logo has no src".into()));
        }
        let window =
            web_sys::window().ok_or_else(|| YardCheckError::Asset("no window".into()))?;

        let response: Response = JsFuture::from(window.fetch_with_str(&src))
            .await
            .map_err(|e| YardCheckError::Asset(js_message(&e)))?
            .dyn_into()
            .map_err(|_| YardCheckError::Asset("fetch did not return a Response".into()))?;
        if !response.ok() {
            return Err(YardCheckError::Asset(format!(
                "refetch of {src} returned HTTP {}",
                response.status()
            )));
        }

        let buffer = response
            .array_buffer()
            .map_err(|e| YardCheckError::Asset(js_message(&e)))?;
        let buffer = JsFuture::from(buffer)
            .await
            .map_err(|e| YardCheckError::Asset(js_message(&e)))?;
        Ok(Uint8Array::new(&buffer).to_vec())
    }
}

impl LogoSource for RefetchSource {
    fn name(&self) -> &'static str {
        "refetch"
    }

    fn load(&self) -> LocalBoxFuture<'_, Result<Vec<u8>>> {
        self.refetch().boxed_local()
    }
}

/// Decode the payload of a base64 `data:` URL.
fn decode_data_url(data_url: &str) -> Result<Vec<u8>> {
    let (_, payload) = data_url
        .split_once(',')
        .ok_or_else(|| YardCheckError::Asset("malformed data URL".into()))?;
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| YardCheckError::Asset(format!("data URL payload: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_decode_data_url() {
        let bytes = decode_data_url("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(bytes, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[wasm_bindgen_test]
    fn test_decode_data_url_without_comma() {
        assert!(decode_data_url("data:image/png;base64").is_err());
    }
}
