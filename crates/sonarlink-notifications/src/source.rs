//! Where the poller gets its events from, and for which project.

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use parking_lot::RwLock;
use sonarlink_client::{NotificationOutcome, Session, SessionError};
use sonarlink_transport::Transport;
use tokio_util::sync::CancellationToken;

/// Notification query capability.
///
/// Implemented for [`Session`]; tests may substitute their own.
#[async_trait]
pub trait NotificationSource: Send + Sync + Debug {
    /// Whether queries can currently be made.
    fn is_connected(&self) -> bool;

    /// Events for `project_key` strictly newer than `since`.
    async fn notification_events(
        &self,
        project_key: &str,
        since: DateTime<FixedOffset>,
        cancel: &CancellationToken,
    ) -> Result<NotificationOutcome, SessionError>;
}

#[async_trait]
impl<T: Transport + 'static> NotificationSource for Session<T> {
    fn is_connected(&self) -> bool {
        Session::is_connected(self)
    }

    async fn notification_events(
        &self,
        project_key: &str,
        since: DateTime<FixedOffset>,
        cancel: &CancellationToken,
    ) -> Result<NotificationOutcome, SessionError> {
        Session::notification_events(self, project_key, since, cancel).await
    }
}

/// Supplies the project the poller watches.
pub trait ProjectBinding: Send + Sync + Debug {
    /// Key of the bound project, `None` when nothing is bound.
    fn project_key(&self) -> Option<String>;
}

/// Mutable project binding the host updates as the user binds and unbinds.
#[derive(Debug, Default)]
pub struct BoundProject {
    key: RwLock<Option<String>>,
}

impl BoundProject {
    /// No project bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound to `project_key`.
    pub fn bound(project_key: impl Into<String>) -> Self {
        Self {
            key: RwLock::new(Some(project_key.into())),
        }
    }

    /// Bind to `project_key`.
    pub fn bind(&self, project_key: impl Into<String>) {
        *self.key.write() = Some(project_key.into());
    }

    /// Remove the binding.
    pub fn unbind(&self) {
        *self.key.write() = None;
    }
}

impl ProjectBinding for BoundProject {
    fn project_key(&self) -> Option<String> {
        self.key.read().clone()
    }
}
