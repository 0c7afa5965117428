//! Cursor walk over the page list endpoint

use super::types::{NextPage, PageListResponse, PageListing, PaginationState};
use crate::pages::{filter_and_sort, Page, PageCollection};
use crate::response::{OperationError, OperationResult};
use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, info, warn};

/// A source of raw list pages
///
/// `fetch` returns the normalized result of one list request; a success
/// carries the response body.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, cursor: Option<&str>) -> OperationResult<String>;
}

/// Follows cursors until the server reports no more results
///
/// Pages are accumulated in server order and filtered and sorted once, after
/// the last page arrives.
pub struct Aggregator<'a, S: PageSource + ?Sized> {
    source: &'a S,
    max_pages: Option<u32>,
}

impl<'a, S: PageSource + ?Sized> Aggregator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            max_pages: None,
        }
    }

    /// Stop with an error instead of making more than `max_pages` requests
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub async fn run(&self) -> OperationResult<PageListing> {
        let start = Instant::now();
        let mut state = PaginationState::new();
        let mut items: Vec<Page> = Vec::new();
        let mut status_code = None;

        loop {
            if let Some(max) = self.max_pages {
                if state.page >= max {
                    warn!(max_pages = max, "Page list did not end within the page limit");
                    return OperationResult::failure(
                        status_code,
                        OperationError::decode(format!(
                            "page list did not end after {max} requests"
                        )),
                    );
                }
            }

            let fetched = self.source.fetch(state.cursor.as_deref()).await;
            state.next_page();
            status_code = fetched.status_code;

            let body = match fetched.outcome {
                Ok(body) => body,
                Err(error) => {
                    debug!(page = state.page, "Page list request failed, stopping");
                    return OperationResult::failure(status_code, error);
                }
            };

            let response: PageListResponse = match serde_json::from_str(&body) {
                Ok(response) => response,
                Err(e) => return OperationResult::failure(status_code, OperationError::decode(e)),
            };

            let record_count = response.items.len();
            if state.page == 1 && record_count == 0 {
                info!("Account has no pages");
                return OperationResult {
                    status_code,
                    outcome: Ok(PageListing::NoPages),
                };
            }

            debug!(
                page = state.page,
                records = record_count,
                has_more = response.meta.has_more,
                "Fetched page list"
            );

            let next_page = match response.next_page(&state) {
                Ok(next_page) => next_page,
                Err(error) => return OperationResult::failure(status_code, error),
            };

            items.extend(response.items);
            state.add_fetched(record_count as u64);

            match next_page {
                NextPage::Continue { cursor } => state.set_cursor(cursor),
                NextPage::Done => break,
            }
        }

        let fetched = items.len();
        let pages = filter_and_sort(items);
        info!(
            requests = state.page,
            fetched,
            kept = pages.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Page list complete"
        );

        OperationResult {
            status_code,
            outcome: Ok(PageListing::Pages(PageCollection::new(pages))),
        }
    }
}
