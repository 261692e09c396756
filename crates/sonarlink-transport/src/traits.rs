//! Core transport trait.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TransportResult;
use crate::message::{RemoteRequest, RemoteResponse};

/// Executes one named remote operation against the server.
///
/// Implementations own HTTP, TLS and serialization details. They must not
/// retry; a failed call is reported once and the caller decides what to do.
/// A non-success HTTP status is returned as `Ok` with that status, while
/// failures below the HTTP level (refused connection, broken stream) are `Err`.
///
/// `cancel` is the caller's cancellation signal. Implementations should abort
/// promptly once it fires; callers race it independently as well.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Execute `request` and return the server's answer.
    async fn execute(
        &self,
        request: RemoteRequest,
        cancel: CancellationToken,
    ) -> TransportResult<RemoteResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(
        &self,
        request: RemoteRequest,
        cancel: CancellationToken,
    ) -> TransportResult<RemoteResponse> {
        (**self).execute(request, cancel).await
    }
}
