/// Screen-space projection of a tracked target's origin
use nalgebra::{Matrix4, Vector4};

use crate::transform::Transform;

/// Clip-space w values closer to zero than this are treated as degenerate
const MIN_CLIP_W: f32 = 1e-6;

/// Size of the area the overlay is positioned in, in CSS pixels.
///
/// The front-end passes the window's inner size here, and the overlay
/// element is positioned in that same space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(&self, point: &ScreenPoint) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

/// A pixel position with +Y pointing down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Clip-space position of the model-space origin
fn origin_clip(
    projection: &Matrix4<f32>,
    view: &Matrix4<f32>,
    model: &Matrix4<f32>,
) -> Vector4<f32> {
    let mvp = Transform::mvp_matrix(projection, view, model);
    mvp * Vector4::new(0.0, 0.0, 0.0, 1.0)
}

/// Map NDC to screen pixels, flipping Y so that +Y points down
fn ndc_to_screen(x_ndc: f32, y_ndc: f32, viewport: &Viewport) -> ScreenPoint {
    let screen_x = (x_ndc * 0.5 + 0.5) * viewport.width;
    let screen_y = (1.0 - (y_ndc * 0.5 + 0.5)) * viewport.height;
    ScreenPoint::new(screen_x, screen_y)
}

/// Project the model-space origin `(0, 0, 0, 1)` to screen pixels.
///
/// No guard is applied: a clip-space `w` of zero yields non-finite
/// coordinates. Callers should only invoke this with a settled pose, or use
/// [`try_project_origin`].
pub fn project_origin(
    projection: &Matrix4<f32>,
    view: &Matrix4<f32>,
    model: &Matrix4<f32>,
    viewport: &Viewport,
) -> ScreenPoint {
    let clip = origin_clip(projection, view, model);
    let (x_clip, y_clip, w_clip) = (clip[0], clip[1], clip[3]);

    let x_ndc = x_clip / w_clip;
    let y_ndc = y_clip / w_clip;

    ndc_to_screen(x_ndc, y_ndc, viewport)
}

/// Like [`project_origin`], but returns `None` for a degenerate clip-space `w`
pub fn try_project_origin(
    projection: &Matrix4<f32>,
    view: &Matrix4<f32>,
    model: &Matrix4<f32>,
    viewport: &Viewport,
) -> Option<ScreenPoint> {
    let clip = origin_clip(projection, view, model);
    let w_clip = clip[3];

    // Prevent division by near-zero w
    if w_clip.abs() < MIN_CLIP_W {
        return None;
    }

    let point = ndc_to_screen(clip[0] / w_clip, clip[1] / w_clip, viewport);
    point.is_finite().then_some(point)
}

/// Recover NDC `(x, y)` from a screen point (inverse of the screen mapping)
pub fn ndc_from_screen(point: &ScreenPoint, viewport: &Viewport) -> (f32, f32) {
    let x_ndc = (point.x / viewport.width - 0.5) * 2.0;
    let y_ndc = ((1.0 - point.y / viewport.height) - 0.5) * 2.0;
    (x_ndc, y_ndc)
}
