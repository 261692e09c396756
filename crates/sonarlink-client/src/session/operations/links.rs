//! Browser links into the server.

use sonarlink_transport::Transport;
use url::Url;

use crate::error::{Result, SessionError};
use crate::session::Session;

const PROJECT_DASHBOARD_PATH: &str = "dashboard/index/";

impl<T: Transport> Session<T> {
    /// Dashboard page of `project_key`, relative to the server URI.
    ///
    /// # Errors
    ///
    /// Returns `NotConnected` when disconnected, or `InvalidUrl` if the link
    /// cannot be built.
    pub fn project_dashboard_url(&self, project_key: &str) -> Result<Url> {
        let connected = self.connected()?;
        connected
            .connection
            .server_uri
            .join(&format!("{PROJECT_DASHBOARD_PATH}{project_key}"))
            .map_err(|e| SessionError::InvalidUrl(e.to_string()))
    }
}
