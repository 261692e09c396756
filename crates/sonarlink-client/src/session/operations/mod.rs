//! Session operations
//!
//! Every operation checks the connection first, then issues one or more
//! transport calls and maps the raw entries to domain entities:
//!
//! - `listings`: organizations, projects, plugins, properties
//! - `issues`: suppressed issues of a project
//! - `profiles`: quality profile resolution and analyzer export
//! - `notifications`: developer notification query
//! - `links`: browser links into the server

pub mod issues;
pub mod links;
pub mod listings;
pub mod notifications;
pub mod profiles;
