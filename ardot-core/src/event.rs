//! Tracker events and the queue that carries them to the frame loop.
//!
//! The tracking engine's callbacks only push onto the queue; the frame loop
//! drains it once per animation frame, so the state machine never runs
//! re-entrantly inside an engine callback.

use crossbeam_channel::{Receiver, Sender, TryRecvError};

/// Something the image tracker reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingEvent {
    /// A reference image was recognised.
    TargetFound { name: String },
    /// The previously found target is no longer tracked.
    TargetLost,
}

/// Producer half of the event queue.
#[derive(Debug, Clone)]
pub struct EventSender {
    inner: Sender<TrackingEvent>,
}

impl EventSender {
    pub fn target_found(&self, name: impl Into<String>) {
        self.send(TrackingEvent::TargetFound { name: name.into() });
    }

    pub fn target_lost(&self) {
        self.send(TrackingEvent::TargetLost);
    }

    pub fn send(&self, event: TrackingEvent) {
        // The receiver lives as long as the session; a closed queue means the
        // session is gone and the event has nowhere to go.
        if self.inner.send(event).is_err() {
            log::debug!("tracking session dropped, event discarded");
        }
    }
}

/// Consumer half of the event queue.
#[derive(Debug)]
pub struct EventReceiver {
    inner: Receiver<TrackingEvent>,
}

impl EventReceiver {
    /// Take every queued event without blocking.
    pub fn drain(&self) -> Vec<TrackingEvent> {
        let mut events = Vec::new();
        loop {
            match self.inner.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }
}

/// Create an unbounded event queue.
pub fn event_queue() -> (EventSender, EventReceiver) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (EventSender { inner: tx }, EventReceiver { inner: rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let (tx, rx) = event_queue();
        tx.target_found("dog");
        tx.target_lost();
        tx.target_found("cat");

        assert_eq!(
            rx.drain(),
            vec![
                TrackingEvent::TargetFound { name: "dog".into() },
                TrackingEvent::TargetLost,
                TrackingEvent::TargetFound { name: "cat".into() },
            ]
        );
        assert!(rx.drain().is_empty());
    }

    #[test]
    fn test_send_after_receiver_dropped_is_silent() {
        let (tx, rx) = event_queue();
        drop(rx);
        tx.target_lost();
    }
}
