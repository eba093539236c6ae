/// ARDot Web - WASM front-end for the AR overlay
///
/// The page's tracking engine reports targets and per-frame matrices here;
/// this crate runs them through the core session and mirrors the result onto
/// the `#dot` overlay and `#status` banner.

use std::time::Duration;

use ardot_core::build_info::{EngineVersion, FeatureFlags};
use ardot_core::{
    ArError, EventSender, FrameOutcome, Manifest, PoseMatrices, Reference, TrackingConfig,
    TrackingSession, Transform,
};
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

pub mod decoder;
pub mod dom;

pub use decoder::HtmlImageDecoder;
use dom::{DotOverlay, StatusBanner};

fn to_js(err: ArError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Wall-clock time, matching the timestamps the tracker events are taken at
fn now() -> Duration {
    Duration::from_secs_f64(js_sys::Date::now() / 1000.0)
}

/// Screen position handed back to the page
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct OverlayPoint {
    pub x: f32,
    pub y: f32,
}

/// Drives the overlay dot from tracker events and animation frames
#[wasm_bindgen]
pub struct OverlayTracker {
    session: TrackingSession,
    events: EventSender,
    dot: DotOverlay,
    status: StatusBanner,
}

#[wasm_bindgen]
impl OverlayTracker {
    #[wasm_bindgen(constructor)]
    pub fn new(stability_window_ms: Option<u32>) -> Result<OverlayTracker, JsValue> {
        let mut config = TrackingConfig::default();
        if let Some(window_ms) = stability_window_ms {
            config.stability_window_ms = u64::from(window_ms);
        }

        let session = TrackingSession::new(&config, dom::window_viewport()?);
        let tracker = OverlayTracker {
            events: session.sender(),
            session,
            dot: DotOverlay::attach()?,
            status: StatusBanner::attach()?,
        };
        tracker.dot.render(tracker.session.overlay())?;
        Ok(tracker)
    }

    /// The tracker's "target found" callback
    pub fn target_found(&mut self, name: String) -> Result<(), JsValue> {
        self.events.target_found(name);
        self.sync()
    }

    /// The tracker's "target lost" callback
    pub fn target_lost(&mut self) -> Result<(), JsValue> {
        self.events.target_lost();
        self.sync()
    }

    /// One animation frame with a tracked target. Matrices are 16 floats,
    /// column-major. Returns the new dot position when the overlay moved.
    pub fn frame(
        &mut self,
        projection: &[f32],
        view: &[f32],
        model: &[f32],
    ) -> Result<Option<OverlayPoint>, JsValue> {
        self.session.resize(dom::window_viewport()?);
        self.sync()?;

        let pose = PoseMatrices {
            projection: Transform::from_column_major(projection).map_err(to_js)?,
            view: Transform::from_column_major(view).map_err(to_js)?,
            model: Transform::from_column_major(model).map_err(to_js)?,
        };

        match self.session.frame(now(), Some(&pose)) {
            FrameOutcome::Projected(point) => {
                self.dot.render(self.session.overlay())?;
                Ok(Some(OverlayPoint {
                    x: point.x,
                    y: point.y,
                }))
            }
            _ => Ok(None),
        }
    }

    /// One animation frame without any trackable
    pub fn idle_frame(&mut self) -> Result<(), JsValue> {
        self.sync()
    }

    pub fn is_dot_visible(&self) -> bool {
        self.session.overlay().is_visible()
    }

    fn sync(&mut self) -> Result<(), JsValue> {
        let updates = self.session.pump(now());
        for update in &updates {
            log::info!("{}", update.message());
            self.status.show(update)?;
        }
        if !updates.is_empty() {
            self.dot.render(self.session.overlay())?;
        }
        Ok(())
    }
}

/// Check device support, alerting the user when it is missing, then attach
#[wasm_bindgen]
pub fn start_overlay(stability_window_ms: Option<u32>) -> Result<OverlayTracker, JsValue> {
    if let Err(err) = dom::ensure_supported() {
        let message = err.to_string();
        log::error!("{message}");
        if let Ok(window) = dom::window() {
            window.alert_with_message(&message)?;
        }
        return Err(JsValue::from_str(&message));
    }
    OverlayTracker::new(stability_window_ms)
}

/// Decoded reference images in manifest order
#[wasm_bindgen]
pub struct ReferenceSet {
    references: Vec<Reference<HtmlImageElement>>,
}

#[wasm_bindgen]
impl ReferenceSet {
    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn name(&self, index: usize) -> Option<String> {
        self.references.get(index).map(|r| r.name().to_string())
    }

    pub fn url(&self, index: usize) -> Option<String> {
        self.references.get(index).map(|r| r.url().to_string())
    }

    pub fn image(&self, index: usize) -> Option<HtmlImageElement> {
        self.references.get(index).map(|r| r.image.clone())
    }

    /// Image registered under `name`
    pub fn image_named(&self, name: &str) -> Option<HtmlImageElement> {
        self.references
            .iter()
            .find(|r| r.name() == name)
            .map(|r| r.image.clone())
    }
}

/// Decode every image in the manifest; rejects naming the first failure
#[wasm_bindgen]
pub async fn load_references(manifest_json: String) -> Result<ReferenceSet, JsValue> {
    let manifest = Manifest::from_json(&manifest_json).map_err(to_js)?;
    let report = ardot_core::load_references(&manifest, &HtmlImageDecoder).await;
    let references = report.into_references().map_err(to_js)?;
    Ok(ReferenceSet { references })
}

#[wasm_bindgen]
pub fn engine_version() -> Result<String, JsValue> {
    EngineVersion::current().map(|v| v.to_string()).map_err(to_js)
}

#[wasm_bindgen]
pub fn feature_flags() -> Result<u32, JsValue> {
    FeatureFlags::current().map(|flags| flags.0).map_err(to_js)
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    log::info!("ARDot web {}", ardot_core::build_info::AR_VERSION);
    Ok(())
}
