//! Poller configuration.

use std::time::Duration;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::{PollerError, Result};

/// Configuration for the [`NotificationPoller`](crate::NotificationPoller).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Delay between two fetch cycles, in milliseconds.
    pub poll_interval_ms: u64,

    /// How far back a fresh or stale watermark reaches, in milliseconds.
    pub lookback_ms: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 60_000,
            lookback_ms: 86_400_000,
        }
    }
}

impl PollerConfig {
    /// Create a new poller configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the poll interval
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the lookback window
    #[must_use]
    pub fn with_lookback(mut self, lookback: Duration) -> Self {
        self.lookback_ms = u64::try_from(lookback.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Delay between two fetch cycles.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Lookback window as a signed calendar delta.
    pub fn lookback(&self) -> TimeDelta {
        i64::try_from(self.lookback_ms)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .unwrap_or(TimeDelta::MAX)
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PollerError::InvalidConfig`] for a zero poll interval.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(PollerError::InvalidConfig(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
