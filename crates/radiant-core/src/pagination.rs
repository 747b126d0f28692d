//! Paginated collection over the platform's paged-list endpoints.
//!
//! Every listing endpoint (projects, scenes, exports, map tokens, shapes,
//! annotations) answers with the same envelope: a page index, a `hasNext`
//! flag and an item array. [`collect`] drives any such endpoint to the end
//! and concatenates the items in server order.

use crate::error::{RadiantError, Result};
use crate::models::page::{ItemField, Page};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Fetch pages starting at index 0 until the server reports no successor.
///
/// The next index is always the server-reported `page + 1`. Items are
/// neither reordered nor deduplicated, and the first fetch error is
/// returned as-is.
pub fn collect<T, F>(mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Result<Page<T>>,
{
    let mut items = Vec::new();
    let mut index = 0u32;

    loop {
        let page = fetch_page(index)?;
        tracing::debug!(
            requested = index,
            page = page.page,
            count = page.items.len(),
            has_next = page.has_next,
            "Fetched page"
        );

        items.extend(page.items);

        if !page.has_next {
            break;
        }

        index = page.page.checked_add(1).ok_or_else(|| {
            RadiantError::Serialization(format!("page index {} cannot be advanced", page.page))
        })?;
    }

    Ok(items)
}

/// Like [`collect`], but over raw JSON responses whose items live in `field`.
pub fn collect_field<T, F>(mut fetch_raw: F, field: &ItemField) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    F: FnMut(u32) -> Result<Value>,
{
    collect(|index| Page::from_value(fetch_raw(index)?, field))
}
