//! Watermark: the instant up to which notifications are known.

use chrono::{DateTime, FixedOffset, TimeDelta};
use serde::{Deserialize, Serialize};

/// Persisted poller state, loaded before `start` and saved on shutdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationData {
    /// Whether the user wants notifications shown.
    pub is_enabled: bool,
    /// Watermark at the time the record was produced.
    pub last_notification_date: DateTime<FixedOffset>,
}

/// Monotonic notification watermark.
///
/// Comparisons are on instants, so `10:00+02:00` is older than `09:30Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Watermark(DateTime<FixedOffset>);

impl Watermark {
    /// Starting watermark: the persisted value, clamped to `now - lookback`.
    ///
    /// A missing value starts at `now - lookback`.
    pub fn initial(
        persisted: Option<DateTime<FixedOffset>>,
        now: DateTime<FixedOffset>,
        lookback: TimeDelta,
    ) -> Self {
        let floor = now.checked_sub_signed(lookback);
        let start = match (persisted, floor) {
            (Some(persisted), Some(floor)) => persisted.max(floor),
            (Some(persisted), None) => persisted,
            (None, Some(floor)) => floor,
            (None, None) => now,
        };
        Self(start)
    }

    /// Current value.
    pub fn get(self) -> DateTime<FixedOffset> {
        self.0
    }

    /// Move forward to `candidate`. Older candidates are ignored.
    ///
    /// Returns `true` if the watermark moved.
    pub fn advance(&mut self, candidate: DateTime<FixedOffset>) -> bool {
        if candidate > self.0 {
            self.0 = candidate;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(raw: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(raw).unwrap()
    }

    #[test]
    fn test_stale_persisted_value_is_clamped() {
        let now = at("2024-06-10T12:00:00Z");
        let watermark = Watermark::initial(
            Some(at("2000-01-01T00:00:00+01:00")),
            now,
            TimeDelta::hours(24),
        );
        assert_eq!(watermark.get(), at("2024-06-09T12:00:00Z"));
    }

    #[test]
    fn test_missing_value_uses_lookback() {
        let now = at("2024-06-10T12:00:00Z");
        let watermark = Watermark::initial(None, now, TimeDelta::hours(24));
        assert_eq!(watermark.get(), at("2024-06-09T12:00:00Z"));
    }

    #[test]
    fn test_recent_persisted_value_is_kept() {
        let now = at("2024-06-10T12:00:00Z");
        let recent = at("2024-06-10T09:15:00+02:00");
        let watermark = Watermark::initial(Some(recent), now, TimeDelta::hours(24));
        assert_eq!(watermark.get(), recent);
    }

    #[test]
    fn test_unrepresentable_floor_keeps_persisted_value() {
        let persisted = at("2000-01-01T00:00:00Z");
        let watermark = Watermark::initial(Some(persisted), persisted, TimeDelta::MAX);
        assert_eq!(watermark.get(), persisted);
    }

    #[test]
    fn test_advance_never_regresses() {
        let mut watermark = Watermark::initial(
            Some(at("2024-06-10T10:00:00Z")),
            at("2024-06-10T12:00:00Z"),
            TimeDelta::hours(24),
        );

        assert!(watermark.advance(at("2024-06-10T11:00:00Z")));
        assert!(!watermark.advance(at("2024-06-10T10:30:00Z")));
        // same instant, different offset
        assert!(!watermark.advance(at("2024-06-10T13:00:00+02:00")));
        assert_eq!(watermark.get(), at("2024-06-10T11:00:00Z"));
    }

    #[test]
    fn test_persisted_record_shape() {
        let data = NotificationData {
            is_enabled: false,
            last_notification_date: at("2024-06-10T11:00:00+02:00"),
        };
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "is_enabled": false,
                "last_notification_date": "2024-06-10T11:00:00+02:00",
            })
        );
    }
}
