//! Tracking-stability gate.
//!
//! A freshly found target is not trusted straight away: its pose tends to
//! jitter for the first few frames. [`SessionState`] records when the target
//! was found and only hands out a [`ProjectionTicket`] once the
//! [`StabilityGate`] window has elapsed. Each loss bumps a generation counter
//! so projections started before the loss can be recognised and dropped.

use std::time::Duration;

use crate::config::TrackingConfig;
use crate::event::TrackingEvent;

/// Debounce applied after a target is found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilityGate {
    window: Duration,
}

impl StabilityGate {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn from_config(config: &TrackingConfig) -> Self {
        Self::new(config.stability_window())
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether a target found at `since` counts as stable at `now`
    pub fn is_stable(&self, since: Duration, now: Duration) -> bool {
        since + self.window < now
    }
}

impl Default for StabilityGate {
    fn default() -> Self {
        Self::from_config(&TrackingConfig::default())
    }
}

/// Where the tracker currently stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrackingStatus {
    #[default]
    Searching,
    Found { name: String, since: Duration },
}

/// UI-facing consequence of a tracking event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    Found { name: String },
    Searching,
}

impl StatusUpdate {
    pub fn message(&self) -> String {
        match self {
            StatusUpdate::Found { name } => format!("Target found: {name}"),
            StatusUpdate::Searching => "Searching for target...".to_string(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, StatusUpdate::Found { .. })
    }
}

/// Permission to apply one projection, tied to the generation it began in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionTicket {
    generation: u64,
}

impl ProjectionTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Session-wide tracking state threaded through event handling and frames
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    status: TrackingStatus,
    generation: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &TrackingStatus {
        &self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply one tracker event observed at `now`
    pub fn apply(&mut self, event: TrackingEvent, now: Duration) -> StatusUpdate {
        match event {
            TrackingEvent::TargetFound { name } => {
                // A projection started for another target must not land on this one
                if matches!(&self.status, TrackingStatus::Found { name: current, .. } if *current != name) {
                    self.generation = self.generation.wrapping_add(1);
                }
                log::debug!("target '{name}' found at {now:?}");
                self.status = TrackingStatus::Found {
                    name: name.clone(),
                    since: now,
                };
                StatusUpdate::Found { name }
            }
            TrackingEvent::TargetLost => {
                self.generation = self.generation.wrapping_add(1);
                log::debug!("target lost, generation {}", self.generation);
                self.status = TrackingStatus::Searching;
                StatusUpdate::Searching
            }
        }
    }

    /// Ask to project this frame; `None` until the found target is stable
    pub fn begin_projection(&self, now: Duration, gate: &StabilityGate) -> Option<ProjectionTicket> {
        match &self.status {
            TrackingStatus::Found { since, .. } if gate.is_stable(*since, now) => {
                Some(ProjectionTicket {
                    generation: self.generation,
                })
            }
            _ => None,
        }
    }

    /// Whether a projection started with `ticket` may still be applied
    pub fn accepts(&self, ticket: &ProjectionTicket) -> bool {
        ticket.generation == self.generation && matches!(self.status, TrackingStatus::Found { .. })
    }
}
