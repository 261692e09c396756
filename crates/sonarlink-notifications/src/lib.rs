//! # sonarlink notifications
//!
//! Background poller that surfaces new server notifications for the bound
//! project.
//!
//! ## Lifecycle
//!
//! ```text
//!            start(persisted)                 stop() / NotSupported
//! Stopped ───────────────────► Running ───────────────────────────► Stopped
//!                  │                ▲  │
//!                  │ first cycle    │  │ every poll interval
//!                  └────────────────┘  └── fetch → advance watermark → publish
//! ```
//!
//! The poller keeps a [`Watermark`]: the instant up to which events are
//! known. It only moves forward. The host persists it through
//! [`NotificationPoller::current_watermark`] and hands it back to the next
//! [`NotificationPoller::start`].
//!
//! ## Failure policy
//!
//! | cycle outcome                   | effect                                   |
//! |---------------------------------|------------------------------------------|
//! | events (possibly none)          | visible, watermark advanced, published   |
//! | server has no notification API  | poller stops itself                      |
//! | cancelled                       | ignored, a stop is in progress           |
//! | any other failure               | logged, nothing changes, next tick retries |
//! | not connected or no project     | nothing changes                          |

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
pub mod model;
pub mod poller;
pub mod source;
pub mod timer;
pub mod watermark;

pub use config::PollerConfig;
pub use error::{PollerError, Result};
pub use model::{NotificationIndicator, NotificationModel};
pub use poller::{NotificationPoller, PollerState};
pub use source::{BoundProject, NotificationSource, ProjectBinding};
pub use timer::PollTimer;
pub use watermark::{NotificationData, Watermark};
