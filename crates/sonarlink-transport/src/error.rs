//! Transport error types.

use thiserror::Error;

/// A specialized `Result` type for transport operations.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Failures below the HTTP status level.
///
/// A server that answers with a non-success status is *not* a transport error;
/// that outcome travels in [`RemoteResponse::status`](crate::RemoteResponse).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportError {
    /// Failed to establish a connection to the server.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Failed to send the request or read the response.
    #[error("Send failed: {0}")]
    SendFailed(String),

    /// Failed to serialize or deserialize a message.
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// The operation did not complete within the transport's own timeout.
    #[error("Operation timed out")]
    Timeout,

    /// The call was aborted through its cancellation token.
    #[error("Operation cancelled")]
    Cancelled,

    /// An unexpected internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_error_maps_to_serialization_failed() {
        let err = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let err = TransportError::from(err);
        assert!(matches!(err, TransportError::SerializationFailed(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            TransportError::ConnectionFailed("refused".into()).to_string(),
            "Connection failed: refused"
        );
        assert_eq!(TransportError::Cancelled.to_string(), "Operation cancelled");
    }
}
