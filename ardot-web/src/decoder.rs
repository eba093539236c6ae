//! Browser image decoding for the reference loader.

use ardot_core::ImageDecoder;
use js_sys::Promise;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

/// Decodes through `<img>` elements, settling on `load` or `error`
pub struct HtmlImageDecoder;

impl ImageDecoder for HtmlImageDecoder {
    type Image = HtmlImageElement;
    type Error = String;

    async fn decode(&self, url: &str) -> Result<HtmlImageElement, String> {
        let image = HtmlImageElement::new().map_err(describe)?;

        let settled = Promise::new(&mut |resolve, reject| {
            image.set_onload(Some(&resolve));
            image.set_onerror(Some(&reject));
        });
        image.set_src(url);

        let outcome = JsFuture::from(settled).await;
        image.set_onload(None);
        image.set_onerror(None);

        match outcome {
            Ok(_) => Ok(image),
            Err(_) => Err(format!("image at {url} could not be decoded")),
        }
    }
}

fn describe(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
