//! # sonarlink client
//!
//! Stateful session client for a remote code-quality server.
//!
//! ## Features
//!
//! - Connection lifecycle with credential validation and version detection
//! - Connection gating: every operation fails fast with `NotConnected`
//! - Server-version feature gating (organizations on 6.2+)
//! - Paged listings walked until the first empty page
//! - Quality profile resolution with unscoped fallback and default tie-break
//! - Suppressed issue listing (won't-fix and false-positive only)
//! - Notification query that tells "unsupported" apart from "nothing new"
//! - Cooperative cancellation on every remote call
//!
//! ## Architecture
//!
//! ```text
//! Application / notification poller
//!        ↓
//! Session<T> (this crate)
//!        ↓
//! Transport (sonarlink-transport)
//! ```
//!
//! The session never retries. Remote failures surface as
//! [`SessionError::RemoteOperationFailed`] with the server's status, and
//! retry policy stays with the caller.

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    clippy::all
)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod profiles;
pub mod session;
pub mod version;

pub use config::{MAXIMUM_PAGE_SIZE, SessionConfig};
pub use error::{Result, SessionError};
pub use models::{
    Issue, IssueResolutionState, Language, Notification, NotificationOutcome, Organization,
    Plugin, Project, Property, QualityProfile,
};
pub use session::{ConnectedState, ConnectionState, Session};
pub use version::ServerVersion;

pub use sonarlink_transport::ConnectionRequest;
