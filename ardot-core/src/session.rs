//! Per-frame driver tying events, the stability gate and projection together.

use std::time::Duration;

use nalgebra::Matrix4;

use crate::config::TrackingConfig;
use crate::event::{event_queue, EventReceiver, EventSender};
use crate::overlay::OverlayState;
use crate::projection::{try_project_origin, ScreenPoint, Viewport};
use crate::stability::{ProjectionTicket, SessionState, StabilityGate, StatusUpdate};

/// Matrices describing a tracked target for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct PoseMatrices {
    pub projection: Matrix4<f32>,
    pub view: Matrix4<f32>,
    pub model: Matrix4<f32>,
}

/// What one animation frame did to the overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// No trackable in this frame's results
    NoTarget,
    /// Target present but not yet stable (or not found); overlay untouched
    Unstable,
    /// Overlay moved to this point
    Projected(ScreenPoint),
    /// Pose produced a degenerate clip-space w; overlay untouched
    Degenerate,
    /// Target was lost while the projection was in flight
    Discarded,
}

pub struct TrackingSession {
    state: SessionState,
    gate: StabilityGate,
    overlay: OverlayState,
    viewport: Viewport,
    sender: EventSender,
    events: EventReceiver,
}

impl TrackingSession {
    pub fn new(config: &TrackingConfig, viewport: Viewport) -> Self {
        let (sender, events) = event_queue();
        Self {
            state: SessionState::new(),
            gate: StabilityGate::from_config(config),
            overlay: OverlayState::hidden(&viewport),
            viewport,
            sender,
            events,
        }
    }

    /// A handle for the tracker callbacks to report through
    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if !self.overlay.is_visible() {
            self.overlay.hide(&viewport);
        }
    }

    /// Apply every queued event, returning the resulting status changes in order
    pub fn pump(&mut self, now: Duration) -> Vec<StatusUpdate> {
        self.events
            .drain()
            .into_iter()
            .map(|event| {
                let update = self.state.apply(event, now);
                if !update.is_found() {
                    self.overlay.hide(&self.viewport);
                }
                update
            })
            .collect()
    }

    /// First half of a frame: a ticket if the target is stable at `now`
    pub fn begin_frame(&self, now: Duration) -> Option<ProjectionTicket> {
        self.state.begin_projection(now, &self.gate)
    }

    /// Second half of a frame: apply a finished projection unless it went stale
    pub fn complete_frame(
        &mut self,
        ticket: ProjectionTicket,
        point: Option<ScreenPoint>,
    ) -> FrameOutcome {
        if !self.state.accepts(&ticket) {
            log::debug!(
                "discarding projection from generation {} (now {})",
                ticket.generation(),
                self.state.generation()
            );
            return FrameOutcome::Discarded;
        }

        match point {
            Some(point) => {
                self.overlay.show(point);
                FrameOutcome::Projected(point)
            }
            None => {
                log::warn!("degenerate pose, overlay left in place");
                FrameOutcome::Degenerate
            }
        }
    }

    /// Run one frame synchronously. `pose` is `None` when no target is tracked.
    pub fn frame(&mut self, now: Duration, pose: Option<&PoseMatrices>) -> FrameOutcome {
        let Some(pose) = pose else {
            return FrameOutcome::NoTarget;
        };
        let Some(ticket) = self.begin_frame(now) else {
            return FrameOutcome::Unstable;
        };

        let point = try_project_origin(&pose.projection, &pose.view, &pose.model, &self.viewport);
        self.complete_frame(ticket, point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transform;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn pose() -> PoseMatrices {
        PoseMatrices {
            projection: Transform::perspective_matrix(60.0, 800.0 / 600.0, 0.1, 100.0),
            view: Matrix4::identity(),
            model: Transform::translation_matrix(0.1, 0.1, -1.0),
        }
    }

    fn session() -> TrackingSession {
        TrackingSession::new(&TrackingConfig::default(), Viewport::new(800.0, 600.0))
    }

    #[test]
    fn test_lost_before_window_never_moves_overlay() {
        let mut session = session();
        let events = session.sender();
        let pose = pose();

        events.target_found("dog");
        session.pump(ms(0));
        assert_eq!(session.frame(ms(5), Some(&pose)), FrameOutcome::Unstable);

        events.target_lost();
        let updates = session.pump(ms(10));
        assert_eq!(updates, vec![StatusUpdate::Searching]);

        for t in (16..200).step_by(16) {
            assert!(!matches!(
                session.frame(ms(t), Some(&pose)),
                FrameOutcome::Projected(_)
            ));
        }
        assert!(!session.overlay().is_visible());
    }

    #[test]
    fn test_first_update_waits_for_window() {
        let mut session = session();
        session.sender().target_found("cat");
        let updates = session.pump(ms(0));
        assert_eq!(updates[0].message(), "Target found: cat");

        let pose = pose();
        let mut first = None;
        for t in (0..120).step_by(8) {
            if let FrameOutcome::Projected(point) = session.frame(ms(t), Some(&pose)) {
                assert!(Viewport::new(800.0, 600.0).contains(&point));
                first = Some(t);
                break;
            }
        }
        assert!(first.unwrap() >= 50);
        assert!(session.overlay().is_visible());
    }

    #[test]
    fn test_no_target_leaves_overlay() {
        let mut session = session();
        session.sender().target_found("cat");
        session.pump(ms(0));
        assert_eq!(session.frame(ms(100), None), FrameOutcome::NoTarget);
        assert!(!session.overlay().is_visible());
    }

    #[test]
    fn test_in_flight_projection_discarded_after_loss() {
        let mut session = session();
        let events = session.sender();
        events.target_found("dog");
        session.pump(ms(0));

        let ticket = session.begin_frame(ms(80)).unwrap();
        events.target_lost();
        session.pump(ms(81));

        let outcome = session.complete_frame(ticket, Some(ScreenPoint::new(1.0, 2.0)));
        assert_eq!(outcome, FrameOutcome::Discarded);
        assert!(!session.overlay().is_visible());
        assert_eq!(session.overlay().position(), ScreenPoint::new(400.0, 300.0));
    }

    #[test]
    fn test_loss_hides_and_recenters() {
        let mut session = session();
        let events = session.sender();
        events.target_found("dog");
        session.pump(ms(0));
        assert!(matches!(
            session.frame(ms(60), Some(&pose())),
            FrameOutcome::Projected(_)
        ));

        events.target_lost();
        session.pump(ms(70));
        assert!(!session.overlay().is_visible());
        assert_eq!(session.overlay().position(), session.viewport().center());
    }

    #[test]
    fn test_degenerate_pose() {
        let mut session = session();
        session.sender().target_found("dog");
        session.pump(ms(0));

        let mut flat = pose();
        flat.projection = Matrix4::zeros();
        assert_eq!(session.frame(ms(60), Some(&flat)), FrameOutcome::Degenerate);
        assert!(!session.overlay().is_visible());
    }

    #[test]
    fn test_resize_recenters_hidden_overlay() {
        let mut session = session();
        session.resize(Viewport::new(400.0, 200.0));
        assert_eq!(session.overlay().position(), ScreenPoint::new(200.0, 100.0));
    }
}
