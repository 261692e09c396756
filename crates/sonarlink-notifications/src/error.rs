//! Poller error types.

use thiserror::Error;

/// Errors raised by the notification poller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PollerError {
    /// `start` was called on a running poller.
    #[error("Notification poller is already running")]
    AlreadyRunning,

    /// Configuration rejected at construction.
    #[error("Invalid poller configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for poller operations.
pub type Result<T> = std::result::Result<T, PollerError>;
