//! # sonarlink transport
//!
//! The narrow capability the session client consumes to talk to a code-quality
//! server. A transport executes exactly one named remote operation per call and
//! reports the outcome as an HTTP-like status plus an optional JSON body. It
//! never retries.
//!
//! ## Overview
//!
//! - **Traits**: [`Transport`]
//! - **Operations**: [`Operation`] and the request/response catalogue in [`operations`]
//! - **Messages**: [`RemoteRequest`], [`RemoteResponse`], [`ConnectionRequest`]
//! - **Errors**: [`TransportError`], [`TransportResult`]
//!
//! Transport implementations only see untyped JSON. Typing happens one layer up,
//! where the session serializes an [`Operation`] and deserializes its
//! [`Operation::Response`].
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use sonarlink_transport::{RemoteRequest, RemoteResponse, Transport, TransportResult};
//! use tokio_util::sync::CancellationToken;
//!
//! #[derive(Debug)]
//! struct MyTransport { /* ... */ }
//!
//! #[async_trait]
//! impl Transport for MyTransport {
//!     async fn execute(
//!         &self,
//!         request: RemoteRequest,
//!         cancel: CancellationToken,
//!     ) -> TransportResult<RemoteResponse> {
//!         // issue the HTTP call for request.operation
//!     }
//! }
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all
)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod message;
pub mod operations;
mod traits;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

pub use error::{TransportError, TransportResult};
pub use http::StatusCode;
pub use message::{AuthenticationType, ConnectionRequest, RemoteRequest, RemoteResponse};
pub use operations::Operation;
pub use traits::Transport;
