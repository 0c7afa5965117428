//! Visibility filter and name ordering for page listings

use super::types::Page;
use tracing::debug;

/// Drop builder-three pages that have not been published
///
/// Every other page passes through unchanged and in order.
pub fn strip_unpublished_builder_pages(mut pages: Vec<Page>) -> Vec<Page> {
    let before = pages.len();
    pages.retain(|page| !page.is_unpublished_builder_page());
    if pages.len() != before {
        debug!(removed = before - pages.len(), "Stripped unpublished builder pages");
    }
    pages
}

/// Stable sort by case-folded name; names keep their original case
pub fn sort_by_name(mut pages: Vec<Page>) -> Vec<Page> {
    pages.sort_by_cached_key(|page| page.name.to_lowercase());
    pages
}

/// Strip, then sort
pub fn filter_and_sort(pages: Vec<Page>) -> Vec<Page> {
    sort_by_name(strip_unpublished_builder_pages(pages))
}
