//! Tracking configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How long a target must stay found before its pose is trusted.
pub const DEFAULT_STABILITY_WINDOW_MS: u64 = 50;

/// Settings for the per-frame overlay update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Debounce after "target found" before projections are applied
    pub stability_window_ms: u64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            stability_window_ms: DEFAULT_STABILITY_WINDOW_MS,
        }
    }
}

impl TrackingConfig {
    pub fn stability_window(&self) -> Duration {
        Duration::from_millis(self.stability_window_ms)
    }

    /// Parse from JSON; absent keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
