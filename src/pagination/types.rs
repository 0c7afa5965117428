//! Pagination types
//!
//! The list endpoint returns `{"_items": [...], "_meta": {"hasMore", "nextCursor"}}`.
//! These types decode one such page and track the cursor walk across pages.

use crate::pages::{Page, PageCollection};
use crate::response::OperationError;
use crate::types::{null_as_default, CursorToken};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;

/// Shown to users whose account has no pages at all
pub const NO_PAGES_MESSAGE: &str = "You appear to have no Leadpages created yet. Please login to Leadpages (https://my.leadpages.net) and create a Leadpage to continue.";

/// One page of the list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageListResponse {
    #[serde(rename = "_items", default, deserialize_with = "null_as_default")]
    pub items: Vec<Page>,

    #[serde(rename = "_meta", default, deserialize_with = "null_as_default")]
    pub meta: ListMeta,
}

/// Continuation metadata of a list page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_more: bool,

    #[serde(default)]
    pub next_cursor: Option<CursorToken>,
}

impl PageListResponse {
    /// Decide whether to follow this page's cursor
    ///
    /// A page that claims more results but carries no usable cursor, or hands
    /// back a cursor already followed, cannot be continued safely.
    pub fn next_page(&self, state: &PaginationState) -> Result<NextPage, OperationError> {
        if !self.meta.has_more {
            return Ok(NextPage::Done);
        }

        match self.meta.next_cursor.as_deref() {
            Some(cursor) if !cursor.is_empty() => {
                if state.has_seen(cursor) {
                    Err(OperationError::decode(format!(
                        "cursor '{cursor}' was returned twice"
                    )))
                } else {
                    Ok(NextPage::Continue {
                        cursor: cursor.to_string(),
                    })
                }
            }
            _ => Err(OperationError::decode(
                "hasMore is set but no nextCursor was returned",
            )),
        }
    }
}

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch again with this cursor
    Continue { cursor: CursorToken },
    /// No more pages
    Done,
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Number of list requests made so far
    pub page: u32,
    /// Cursor for the next request
    pub cursor: Option<CursorToken>,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Every cursor followed so far
    seen: HashSet<CursorToken>,
}

impl PaginationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment page number
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// Set cursor and remember it
    pub fn set_cursor(&mut self, cursor: CursorToken) {
        self.seen.insert(cursor.clone());
        self.cursor = Some(cursor);
    }

    pub fn has_seen(&self, cursor: &str) -> bool {
        self.seen.contains(cursor)
    }

    /// Add to total fetched
    pub fn add_fetched(&mut self, count: u64) {
        self.total_fetched += count;
    }
}

/// Outcome of aggregating every list page
#[derive(Debug, Clone, PartialEq)]
pub enum PageListing {
    /// The filtered, sorted pages
    Pages(PageCollection),
    /// The very first page was empty
    NoPages,
}

impl PageListing {
    pub fn pages(&self) -> Option<&PageCollection> {
        match self {
            Self::Pages(pages) => Some(pages),
            Self::NoPages => None,
        }
    }

    pub fn is_no_pages(&self) -> bool {
        matches!(self, Self::NoPages)
    }

    /// The user-facing message for an empty account
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Pages(_) => None,
            Self::NoPages => Some(NO_PAGES_MESSAGE),
        }
    }

    /// The pages, or an empty collection for an empty account
    pub fn into_collection(self) -> PageCollection {
        match self {
            Self::Pages(pages) => pages,
            Self::NoPages => PageCollection::default(),
        }
    }
}

/// `Pages` serializes as `{"_items": [...]}`, `NoPages` as the message string
impl Serialize for PageListing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Pages(pages) => pages.serialize(serializer),
            Self::NoPages => serializer.serialize_str(NO_PAGES_MESSAGE),
        }
    }
}
