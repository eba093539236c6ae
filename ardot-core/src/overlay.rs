/// Position and visibility of the overlay dot
use crate::projection::{ScreenPoint, Viewport};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayState {
    visible: bool,
    position: ScreenPoint,
}

impl OverlayState {
    /// A hidden dot parked at the viewport center
    pub fn hidden(viewport: &Viewport) -> Self {
        Self {
            visible: false,
            position: viewport.center(),
        }
    }

    pub fn show(&mut self, point: ScreenPoint) {
        self.position = point;
        self.visible = true;
    }

    /// Hide the dot and park it at the viewport center
    pub fn hide(&mut self, viewport: &Viewport) {
        *self = Self::hidden(viewport);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> ScreenPoint {
        self.position
    }
}
