//! Request and response envelopes exchanged with a [`Transport`](crate::Transport).

use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

/// How the transport authenticates against the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthenticationType {
    /// HTTP basic authentication with login and password (or a token as login).
    #[default]
    Basic,
    /// No credentials are sent.
    Anonymous,
}

/// Validated connection parameters attached to every remote call.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRequest {
    /// Base URI of the server.
    pub server_uri: Url,
    /// Authentication scheme.
    pub authentication: AuthenticationType,
    /// Login or user token.
    pub login: Option<String>,
    /// Password; never printed by `Debug`.
    pub password: Option<String>,
}

impl ConnectionRequest {
    /// Anonymous connection to `server_uri`.
    pub fn anonymous(server_uri: Url) -> Self {
        Self {
            server_uri,
            authentication: AuthenticationType::Anonymous,
            login: None,
            password: None,
        }
    }

    /// Basic-auth connection to `server_uri`.
    pub fn basic(server_uri: Url, login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            server_uri,
            authentication: AuthenticationType::Basic,
            login: Some(login.into()),
            password: Some(password.into()),
        }
    }
}

impl fmt::Debug for ConnectionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionRequest")
            .field("server_uri", &self.server_uri.as_str())
            .field("authentication", &self.authentication)
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A single named remote operation ready to be executed.
#[derive(Debug, Clone)]
pub struct RemoteRequest {
    /// Operation name, see [`Operation::NAME`](crate::Operation::NAME).
    pub operation: &'static str,
    /// Connection the call is made on.
    pub connection: ConnectionRequest,
    /// Serialized request payload.
    pub payload: serde_json::Value,
}

/// Outcome of a remote operation as seen by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResponse {
    /// HTTP-like status reported by the server.
    pub status: StatusCode,
    /// JSON body, present on success.
    pub body: Option<serde_json::Value>,
}

impl RemoteResponse {
    /// A `200 OK` response carrying `body`.
    pub fn ok(body: serde_json::Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: Some(body),
        }
    }

    /// A bodiless response with the given status.
    pub fn status(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    /// Returns `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
