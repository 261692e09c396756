//! Consumer-facing notification model.

use std::fmt::Debug;

use parking_lot::RwLock;
use sonarlink_client::Notification;

/// What the poller publishes to.
///
/// Rendering is up to the implementor; the poller only flips flags and hands
/// over batches.
pub trait NotificationModel: Send + Sync + Debug {
    /// Show or hide the notification indicator.
    fn set_visible(&self, visible: bool);

    /// Whether the indicator is shown.
    fn is_visible(&self) -> bool;

    /// Record the user's enabled preference.
    fn set_enabled(&self, enabled: bool);

    /// Whether notifications are enabled.
    fn is_enabled(&self) -> bool;

    /// Replace the displayed events with a fresh batch.
    fn publish(&self, events: Vec<Notification>);
}

#[derive(Debug)]
struct IndicatorState {
    visible: bool,
    enabled: bool,
    events: Vec<Notification>,
}

/// In-memory [`NotificationModel`].
#[derive(Debug)]
pub struct NotificationIndicator {
    state: RwLock<IndicatorState>,
}

impl Default for NotificationIndicator {
    fn default() -> Self {
        Self {
            state: RwLock::new(IndicatorState {
                visible: false,
                enabled: true,
                events: Vec::new(),
            }),
        }
    }
}

impl NotificationIndicator {
    /// Hidden, enabled, no events.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently published batch.
    pub fn events(&self) -> Vec<Notification> {
        self.state.read().events.clone()
    }
}

impl NotificationModel for NotificationIndicator {
    fn set_visible(&self, visible: bool) {
        self.state.write().visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.state.read().visible
    }

    fn set_enabled(&self, enabled: bool) {
        self.state.write().enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.state.read().enabled
    }

    fn publish(&self, events: Vec<Notification>) {
        self.state.write().events = events;
    }
}
