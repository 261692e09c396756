//! Session configuration.

use serde::{Deserialize, Serialize};

/// Largest page size the server accepts for paged listings.
pub const MAXIMUM_PAGE_SIZE: u32 = 500;

/// Tuning knobs for a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Items requested per page by paged listings.
    pub page_size: u32,

    /// Upper bound on page requests per paged listing.
    ///
    /// `None` keeps walking until the server returns an empty page, however
    /// long that takes.
    pub max_pages: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            page_size: MAXIMUM_PAGE_SIZE,
            max_pages: None,
        }
    }
}

impl SessionConfig {
    /// Create a new session configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size, clamped to `1..=MAXIMUM_PAGE_SIZE`
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAXIMUM_PAGE_SIZE);
        self
    }

    /// Cap the number of page requests per listing
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }
}
