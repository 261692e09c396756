//! Quality profile operations.

use sonarlink_transport::operations::{
    ExportProfileRequest, ExportProfileResponse, QualityProfileChangeLogRequest,
    QualityProfilesRequest,
};
use sonarlink_transport::{StatusCode, Transport};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{Result, SessionError};
use crate::models::{Language, QualityProfile};
use crate::profiles::select_profile;
use crate::session::{Session, decode};

impl<T: Transport> Session<T> {
    /// Resolve the effective quality profile of `project_key` for `language`.
    ///
    /// 1. Ask for the profiles of the project. A project that was never
    ///    analyzed answers `404`; in that case ask once more for the
    ///    server-wide profiles.
    /// 2. Select the profile for `language` (see [`select_profile`]).
    /// 3. Read the single most recent change log entry; its date becomes
    ///    [`QualityProfile::last_modified`].
    ///
    /// # Errors
    ///
    /// - `NotConnected` when disconnected.
    /// - `RemoteOperationFailed` for any failure other than the handled `404`.
    /// - `ProfileNotFound` when no profile matches, or the change log does
    ///   not hold exactly one entry.
    /// - `AmbiguousProfile` when several profiles match and the default flag
    ///   does not single one out.
    pub async fn quality_profile(
        &self,
        project_key: &str,
        language: &Language,
        cancel: &CancellationToken,
    ) -> Result<QualityProfile> {
        let connected = self.connected()?;
        let connection = &connected.connection;

        let scoped = QualityProfilesRequest {
            project_key: Some(project_key.to_string()),
        };
        let mut response = self.send(connection, &scoped, cancel).await?;

        if response.status == StatusCode::NOT_FOUND {
            debug!(
                project_key,
                "Project has no quality profiles yet, falling back to server defaults"
            );
            response = self
                .send(connection, &QualityProfilesRequest::default(), cancel)
                .await?;
        }

        let profiles = decode::<QualityProfilesRequest>(response)?;
        let profile = select_profile(profiles, language)?;

        let change_log_request = QualityProfileChangeLogRequest {
            quality_profile_key: profile.key.clone(),
            page_size: 1,
        };
        let change_log = self
            .request(connection, &change_log_request, cancel)
            .await?;

        let [event] = change_log.events.as_slice() else {
            return Err(SessionError::ProfileNotFound(format!(
                "profile '{}' has {} change log entries, expected exactly one",
                profile.key,
                change_log.events.len()
            )));
        };
        let last_modified = event.date;

        debug!(
            project_key,
            language = %language.key,
            profile = %profile.key,
            "Resolved quality profile"
        );
        Ok(QualityProfile::from_response(profile, last_modified))
    }

    /// Analyzer export of the profile named `profile_name` for `language`.
    ///
    /// # Errors
    ///
    /// Returns `NotConnected` when disconnected, or the remote failure.
    pub async fn export_profile(
        &self,
        profile_name: &str,
        language: &Language,
        cancel: &CancellationToken,
    ) -> Result<ExportProfileResponse> {
        let connected = self.connected()?;
        let request = ExportProfileRequest {
            quality_profile_name: profile_name.to_string(),
            language_key: language.key.clone(),
        };

        self.request(&connected.connection, &request, cancel).await
    }
}
