//! Session error types.

use sonarlink_transport::{StatusCode, TransportError};
use thiserror::Error;

/// A specialized `Result` type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors surfaced by [`Session`](crate::Session) operations.
///
/// `NotConnected` and `AlreadyConnected` are precondition violations and are
/// never worth retrying. Nothing in this crate retries anything; callers own
/// that policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    /// The operation requires a connected session.
    #[error("This operation expects the session to be connected")]
    NotConnected,

    /// `connect` was called on a session that is already connected.
    #[error("This operation expects the session not to be connected")]
    AlreadyConnected,

    /// The server rejected the supplied credentials.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The server answered with a non-success status.
    #[error("Remote operation '{operation}' failed with status {status}")]
    RemoteOperationFailed {
        /// Operation name.
        operation: &'static str,
        /// Status reported by the server.
        status: StatusCode,
    },

    /// No usable quality profile exists for the request.
    #[error("Quality profile not found: {0}")]
    ProfileNotFound(String),

    /// Several profiles match and the default flag does not single one out.
    #[error("Ambiguous quality profile: {0}")]
    AmbiguousProfile(String),

    /// The operation's cancellation token fired.
    #[error("Operation cancelled")]
    OperationCancelled,

    /// The server reported a version that is not `major.minor[...]`.
    #[error("Invalid server version '{0}'")]
    InvalidVersion(String),

    /// A URL could not be built from the connection's server URI.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A success response carried no body, or one of the wrong shape.
    #[error("Unexpected payload for '{operation}': {reason}")]
    UnexpectedPayload {
        /// Operation name.
        operation: &'static str,
        /// What went wrong.
        reason: String,
    },

    /// A paged listing hit the configured page cap before an empty page.
    #[error("Pagination for '{operation}' exceeded {max_pages} pages")]
    PaginationLimitExceeded {
        /// Operation name.
        operation: &'static str,
        /// Configured cap.
        max_pages: u32,
    },

    /// The transport failed below the HTTP level.
    #[error("Transport error: {0}")]
    Transport(TransportError),
}

impl SessionError {
    /// Status code of a [`RemoteOperationFailed`](Self::RemoteOperationFailed) error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::RemoteOperationFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the server answered `404 Not Found`.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

impl From<TransportError> for SessionError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Cancelled => Self::OperationCancelled,
            other => Self::Transport(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_cancellation_maps_to_operation_cancelled() {
        assert_eq!(
            SessionError::from(TransportError::Cancelled),
            SessionError::OperationCancelled
        );
        assert_eq!(
            SessionError::from(TransportError::Timeout),
            SessionError::Transport(TransportError::Timeout)
        );
    }

    #[test]
    fn test_not_found_detection() {
        let err = SessionError::RemoteOperationFailed {
            operation: "api/qualityprofiles/search",
            status: StatusCode::NOT_FOUND,
        };
        assert!(err.is_not_found());
        assert!(!SessionError::NotConnected.is_not_found());
        assert_eq!(SessionError::NotConnected.status(), None);
    }
}
