//! Browser tests; run with `wasm-pack test --headless --firefox ardot-web`.
#![cfg(target_arch = "wasm32")]

use ardot_core::{load_references, ArError, ImageDecoder, Manifest, ReferenceEntry};
use ardot_web::dom::camera_api_present;
use ardot_web::HtmlImageDecoder;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

/// 1x1 transparent PNG
const PIXEL_PNG: &str = "data:image/png;base64,\
    iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

const BROKEN_PNG: &str = "data:image/png;base64,AAAA";

#[wasm_bindgen_test]
async fn decode_valid_image() {
    let image = HtmlImageDecoder.decode(PIXEL_PNG).await.unwrap();
    assert_eq!(image.natural_width(), 1);
}

#[wasm_bindgen_test]
async fn decode_broken_image_errors() {
    let err = HtmlImageDecoder.decode(BROKEN_PNG).await.unwrap_err();
    assert!(err.contains("could not be decoded"));
}

#[wasm_bindgen_test]
async fn load_names_broken_reference() {
    let manifest: Manifest = [
        ReferenceEntry::new("dot.png", PIXEL_PNG),
        ReferenceEntry::new("broken.png", BROKEN_PNG),
    ]
    .into_iter()
    .collect();

    let report = load_references(&manifest, &HtmlImageDecoder).await;
    assert_eq!(report.len(), 2);
    match report.into_references() {
        Err(ArError::ReferenceLoad { name, .. }) => assert_eq!(name, "broken.png"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[wasm_bindgen_test]
fn camera_api_detection() {
    let navigator = js_sys::Object::new();
    assert!(!camera_api_present(&navigator));

    js_sys::Reflect::set(&navigator, &JsValue::from_str("mediaDevices"), &js_sys::Object::new())
        .unwrap();
    assert!(camera_api_present(&navigator));
}
