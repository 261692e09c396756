//! Developer notification query.

use chrono::{DateTime, FixedOffset};
use sonarlink_transport::operations::NotificationsRequest;
use sonarlink_transport::{StatusCode, Transport};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::Result;
use crate::models::{Notification, NotificationOutcome};
use crate::session::{Session, decode};

impl<T: Transport> Session<T> {
    /// Notifications of `project_key` strictly newer than `since`.
    ///
    /// A `404` means the server has no notification endpoint and yields
    /// [`NotificationOutcome::NotSupported`]. Any other failure status is an
    /// error, so callers can tell "unsupported" from "failed this time".
    ///
    /// # Errors
    ///
    /// Returns `NotConnected` when disconnected, `RemoteOperationFailed` for
    /// non-404 failures, or the transport error.
    pub async fn notification_events(
        &self,
        project_key: &str,
        since: DateTime<FixedOffset>,
        cancel: &CancellationToken,
    ) -> Result<NotificationOutcome> {
        let connected = self.connected()?;
        let request = NotificationsRequest {
            project_key: project_key.to_string(),
            events_since: since,
        };

        let response = self.send(&connected.connection, &request, cancel).await?;
        if response.status == StatusCode::NOT_FOUND {
            debug!(project_key, "Server does not support notifications");
            return Ok(NotificationOutcome::NotSupported);
        }

        let events = decode::<NotificationsRequest>(response)?;
        Ok(NotificationOutcome::Events(
            events.into_iter().map(Notification::from).collect(),
        ))
    }
}
