//! Page-walking for paged listings.

use std::future::Future;

use tracing::trace;

use crate::error::{Result, SessionError};

/// Fetch pages `1, 2, 3, ...` until one comes back empty.
///
/// `fetch_page` receives the 1-based page index and `page_size`. Items are
/// returned in fetch order. The first failed page aborts the walk and its error
/// is returned; nothing fetched so far is handed back. Each page is requested
/// exactly once.
///
/// With `max_pages = None` the walk is unbounded, so a server that never
/// returns an empty page keeps it going forever. `Some(n)` allows at most `n`
/// requests and fails with [`SessionError::PaginationLimitExceeded`] instead of
/// truncating.
///
/// # Errors
///
/// Returns the first error produced by `fetch_page`, or
/// `PaginationLimitExceeded` when the cap is reached.
pub async fn fetch_all_pages<T, F, Fut>(
    operation: &'static str,
    page_size: u32,
    max_pages: Option<u32>,
    mut fetch_page: F,
) -> Result<Vec<T>>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut items = Vec::new();
    let mut page = 1;

    loop {
        if let Some(max_pages) = max_pages
            && page > max_pages
        {
            return Err(SessionError::PaginationLimitExceeded {
                operation,
                max_pages,
            });
        }

        let batch = fetch_page(page, page_size).await?;
        trace!(operation, page, count = batch.len(), "Fetched page");

        if batch.is_empty() {
            return Ok(items);
        }

        items.extend(batch);
        page += 1;
    }
}
