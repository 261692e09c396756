//! Connection session for a code-quality server.
//!
//! `Session<T>` is the single authority on whether we are connected, to which
//! server and at which version. Every remote operation other than `connect`
//! goes through [`Session::ensure_connected`] first.
//!
//! # Architecture
//!
//! `Session<T>` is a cheaply-cloneable Arc wrapper with interior mutability:
//!
//! - **`RwLock<ConnectionState>`** for the connection state (short, never held across await)
//! - **`Arc<SessionInner<T>>`** for cheap cloning; all clones share one connection
//!
//! Operations live in [`operations`], one module per area.

pub mod operations;

use std::sync::Arc;

use parking_lot::RwLock;
use sonarlink_transport::operations::{
    CredentialsResponse, Operation, ValidateCredentialsRequest, VersionRequest, VersionResponse,
};
use sonarlink_transport::{ConnectionRequest, RemoteRequest, RemoteResponse, Transport};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::version::ServerVersion;

/// Parameters of an established connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedState {
    /// Validated connection parameters.
    pub connection: ConnectionRequest,
    /// Parsed server version.
    pub server_version: ServerVersion,
}

/// Connection state of a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No connection has been established, or it was torn down.
    #[default]
    Disconnected,
    /// Credentials were accepted and the server version is known.
    Connected(Arc<ConnectedState>),
}

pub(crate) struct SessionInner<T: Transport> {
    pub(crate) transport: T,
    pub(crate) config: SessionConfig,
    state: RwLock<ConnectionState>,
}

/// Stateful client session.
///
/// Created disconnected; [`connect`](Self::connect) is the only way in and
/// [`disconnect`](Self::disconnect) the only way out.
///
/// # Examples
///
/// ```rust,ignore
/// use sonarlink_client::{Language, Session};
/// use sonarlink_transport::ConnectionRequest;
/// use tokio_util::sync::CancellationToken;
///
/// let session = Session::new(transport);
/// let cancel = CancellationToken::new();
/// let uri = url::Url::parse("https://quality.example.com")?;
/// session.connect(ConnectionRequest::basic(uri, "token", ""), &cancel).await?;
///
/// let profile = session.quality_profile("my-app", &Language::csharp(), &cancel).await?;
/// println!("{} last changed {}", profile.name, profile.last_modified);
/// ```
pub struct Session<T: Transport> {
    pub(crate) inner: Arc<SessionInner<T>>,
}

impl<T: Transport> Clone for Session<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> std::fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("transport", &self.inner.transport)
            .field("config", &self.inner.config)
            .field("state", &*self.inner.state.read())
            .finish()
    }
}

impl<T: Transport> Session<T> {
    /// Create a disconnected session on `transport`.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, SessionConfig::default())
    }

    /// Create a disconnected session with custom configuration.
    pub fn with_config(transport: T, config: SessionConfig) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                transport,
                config,
                state: RwLock::new(ConnectionState::Disconnected),
            }),
        }
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Snapshot of the current connection state.
    pub fn state(&self) -> ConnectionState {
        self.inner.state.read().clone()
    }

    /// Returns `true` once `connect` has succeeded.
    pub fn is_connected(&self) -> bool {
        matches!(*self.inner.state.read(), ConnectionState::Connected(_))
    }

    /// Connect to a server.
    ///
    /// Validates the credentials, then fetches and parses the server version.
    /// The session only becomes connected after both calls succeed; any
    /// failure leaves it disconnected.
    ///
    /// # Errors
    ///
    /// - [`SessionError::AlreadyConnected`] if the session is connected.
    /// - [`SessionError::InvalidCredentials`] if the server rejects the credentials.
    /// - [`SessionError::RemoteOperationFailed`] / [`SessionError::Transport`] on remote failure.
    /// - [`SessionError::InvalidVersion`] if the version string cannot be parsed.
    /// - [`SessionError::OperationCancelled`] if `cancel` fires.
    pub async fn connect(
        &self,
        connection: ConnectionRequest,
        cancel: &CancellationToken,
    ) -> Result<ServerVersion> {
        if self.is_connected() {
            return Err(SessionError::AlreadyConnected);
        }

        debug!(server = %connection.server_uri, "Validating credentials");
        let credentials: CredentialsResponse = self
            .request(&connection, &ValidateCredentialsRequest, cancel)
            .await?;
        if !credentials.valid {
            return Err(SessionError::InvalidCredentials);
        }

        let version: VersionResponse = self.request(&connection, &VersionRequest, cancel).await?;
        let server_version: ServerVersion = version.version.parse()?;

        let mut state = self.inner.state.write();
        // A concurrent connect may have won while we were awaiting
        if matches!(*state, ConnectionState::Connected(_)) {
            return Err(SessionError::AlreadyConnected);
        }

        info!(
            server = %connection.server_uri,
            version = %server_version,
            "Session connected"
        );
        *state = ConnectionState::Connected(Arc::new(ConnectedState {
            connection,
            server_version,
        }));

        Ok(server_version)
    }

    /// Tear the connection down. A no-op when already disconnected.
    pub fn disconnect(&self) {
        let previous = std::mem::take(&mut *self.inner.state.write());
        if let ConnectionState::Connected(connected) = previous {
            info!(server = %connected.connection.server_uri, "Session disconnected");
        }
    }

    /// Fail unless the session is connected.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotConnected`] when disconnected.
    pub fn ensure_connected(&self) -> Result<()> {
        self.connected().map(|_| ())
    }

    /// Whether the server supports organizations (version 6.2 and later).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotConnected`] when disconnected.
    pub fn has_organizations_feature(&self) -> Result<bool> {
        Ok(self.server_version()? >= ServerVersion::ORGANIZATIONS_FEATURE)
    }

    /// Version of the connected server.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotConnected`] when disconnected.
    pub fn server_version(&self) -> Result<ServerVersion> {
        Ok(self.connected()?.server_version)
    }

    /// Connection parameters of the connected server.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotConnected`] when disconnected.
    pub fn connection(&self) -> Result<ConnectionRequest> {
        Ok(self.connected()?.connection.clone())
    }

    pub(crate) fn connected(&self) -> Result<Arc<ConnectedState>> {
        match &*self.inner.state.read() {
            ConnectionState::Connected(connected) => Ok(Arc::clone(connected)),
            ConnectionState::Disconnected => Err(SessionError::NotConnected),
        }
    }

    /// Execute `request` and return the raw response, whatever its status.
    ///
    /// The transport call is raced against `cancel`.
    pub(crate) async fn send<O: Operation>(
        &self,
        connection: &ConnectionRequest,
        request: &O,
        cancel: &CancellationToken,
    ) -> Result<RemoteResponse> {
        let payload =
            serde_json::to_value(request).map_err(|e| SessionError::UnexpectedPayload {
                operation: O::NAME,
                reason: format!("failed to serialize request: {e}"),
            })?;

        let remote = RemoteRequest {
            operation: O::NAME,
            connection: connection.clone(),
            payload,
        };

        debug!(operation = O::NAME, "Executing remote operation");
        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(SessionError::OperationCancelled),
            result = self.inner.transport.execute(remote, cancel.clone()) => result?,
        };
        debug!(
            operation = O::NAME,
            status = %response.status,
            "Remote operation completed"
        );

        Ok(response)
    }

    /// Execute `request`, require a success status and decode the body.
    pub(crate) async fn request<O: Operation>(
        &self,
        connection: &ConnectionRequest,
        request: &O,
        cancel: &CancellationToken,
    ) -> Result<O::Response> {
        let response = self.send(connection, request, cancel).await?;
        decode::<O>(response)
    }
}

/// Decode a success response into `O::Response`.
pub(crate) fn decode<O: Operation>(response: RemoteResponse) -> Result<O::Response> {
    if !response.is_success() {
        return Err(SessionError::RemoteOperationFailed {
            operation: O::NAME,
            status: response.status,
        });
    }

    let body = response.body.ok_or_else(|| SessionError::UnexpectedPayload {
        operation: O::NAME,
        reason: "success response without body".to_string(),
    })?;

    serde_json::from_value(body).map_err(|e| SessionError::UnexpectedPayload {
        operation: O::NAME,
        reason: e.to_string(),
    })
}
