/// ARDot Core Library - projection and tracking state for the AR overlay
///
/// This library holds everything about the overlay that does not touch the
/// browser: projecting a tracked target's origin to screen pixels, the
/// stability gate that debounces fresh detections, the typed tracker event
/// queue, and the reference manifest and its image loader.

pub mod build_info;
pub mod config;
pub mod error;
pub mod event;
pub mod loader;
pub mod manifest;
pub mod overlay;
pub mod projection;
pub mod session;
pub mod stability;
pub mod transform;

// Re-export commonly used types
pub use config::TrackingConfig;
pub use error::{ArError, Result};
pub use event::{event_queue, EventReceiver, EventSender, TrackingEvent};
pub use loader::{load_references, ImageDecoder, LoadReport, Reference};
pub use manifest::{Manifest, ReferenceEntry};
pub use overlay::OverlayState;
pub use projection::{project_origin, try_project_origin, ScreenPoint, Viewport};
pub use session::{FrameOutcome, PoseMatrices, TrackingSession};
pub use stability::{ProjectionTicket, SessionState, StabilityGate, StatusUpdate, TrackingStatus};
pub use transform::Transform;
