//! DOM bindings for the overlay dot, status banner and scan hint.

use ardot_core::{ArError, OverlayState, StatusUpdate, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

const FOUND_CLASS: &str = "status--found";

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

fn element(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id} element")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("#{id} is not an HTML element")))
}

/// The window's inner size; the overlay is positioned in this space
pub fn window_viewport() -> Result<Viewport, JsValue> {
    let window = window()?;
    let width = window.inner_width()?.as_f64().unwrap_or_default();
    let height = window.inner_height()?.as_f64().unwrap_or_default();
    Ok(Viewport::new(width as f32, height as f32))
}

/// Whether `navigator.mediaDevices` exists. The web-sys getter does not
/// throw when it is missing, it returns `undefined`.
pub fn camera_api_present(navigator: &JsValue) -> bool {
    js_sys::Reflect::get(navigator, &JsValue::from_str("mediaDevices"))
        .map(|devices| !devices.is_undefined() && !devices.is_null())
        .unwrap_or(false)
}

/// Fail when the page cannot open the camera
pub fn ensure_supported() -> Result<(), ArError> {
    let unsupported = |user_agent: String| ArError::UnsupportedDevice { user_agent };
    let Some(window) = web_sys::window() else {
        return Err(unsupported(String::from("unknown")));
    };
    let navigator = window.navigator();
    let user_agent = navigator.user_agent().unwrap_or_default();

    if !window.is_secure_context() || !camera_api_present(&navigator) {
        return Err(unsupported(user_agent));
    }
    Ok(())
}

/// The `#dot` element
pub struct DotOverlay {
    element: HtmlElement,
}

impl DotOverlay {
    pub fn attach() -> Result<Self, JsValue> {
        Ok(Self {
            element: element(&document()?, "dot")?,
        })
    }

    /// Mirror `state` onto the element
    pub fn render(&self, state: &OverlayState) -> Result<(), JsValue> {
        let style = self.element.style();
        let position = state.position();
        style.set_property("left", &format!("{}px", position.x))?;
        style.set_property("top", &format!("{}px", position.y))?;
        style.set_property("display", if state.is_visible() { "block" } else { "none" })
    }
}

/// The `#status` banner and optional `#scan` hint
pub struct StatusBanner {
    status: HtmlElement,
    scan: Option<HtmlElement>,
}

impl StatusBanner {
    pub fn attach() -> Result<Self, JsValue> {
        let document = document()?;
        let scan = element(&document, "scan").ok();
        if let Some(scan) = &scan {
            scan.style().set_property("pointer-events", "none")?;
        }
        Ok(Self {
            status: element(&document, "status")?,
            scan,
        })
    }

    pub fn show(&self, update: &StatusUpdate) -> Result<(), JsValue> {
        let classes = self.status.class_list();
        if update.is_found() {
            classes.add_1(FOUND_CLASS)?;
        } else {
            classes.remove_1(FOUND_CLASS)?;
        }
        self.status.set_text_content(Some(&update.message()));
        if let Some(scan) = &self.scan {
            scan.set_hidden(update.is_found());
        }
        Ok(())
    }
}
