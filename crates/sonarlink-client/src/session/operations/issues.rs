//! Suppressed issue listing.

use sonarlink_transport::Transport;
use sonarlink_transport::operations::IssuesRequest;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::Result;
use crate::models::Issue;
use crate::session::Session;

impl<T: Transport> Session<T> {
    /// Issues of `project_key` resolved as won't-fix or false positive.
    ///
    /// Issues in any other resolution state, including unresolved and
    /// unrecognized ones, are dropped. Server order is kept.
    ///
    /// # Errors
    ///
    /// Returns `NotConnected` when disconnected, or the remote failure.
    pub async fn suppressed_issues(
        &self,
        project_key: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Issue>> {
        let connected = self.connected()?;
        let request = IssuesRequest {
            project_key: project_key.to_string(),
        };

        let issues = self
            .request(&connected.connection, &request, cancel)
            .await?;
        let total = issues.len();

        let suppressed: Vec<Issue> = issues
            .into_iter()
            .map(Issue::from)
            .filter(|issue| issue.resolution_state.is_suppressed())
            .collect();

        debug!(
            project_key,
            total,
            suppressed = suppressed.len(),
            "Filtered suppressed issues"
        );
        Ok(suppressed)
    }
}
