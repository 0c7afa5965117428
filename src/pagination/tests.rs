//! Tests for pagination module

use super::*;
use crate::pages::Page;
use crate::response::{ErrorKind, OperationError, OperationResult, DECODE_PREFIX};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays canned list responses and records the cursor of each call
struct ScriptedSource {
    responses: Mutex<VecDeque<OperationResult<String>>>,
    cursors: Mutex<Vec<Option<String>>>,
}

impl ScriptedSource {
    fn new(responses: Vec<OperationResult<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            cursors: Mutex::new(Vec::new()),
        }
    }

    fn cursors(&self) -> Vec<Option<String>> {
        self.cursors.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn fetch(&self, cursor: Option<&str>) -> OperationResult<String> {
        self.cursors
            .lock()
            .unwrap()
            .push(cursor.map(str::to_string));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("source called more often than scripted")
    }
}

fn list_page(
    items: serde_json::Value,
    has_more: bool,
    cursor: Option<&str>,
) -> OperationResult<String> {
    let body = json!({
        "_items": items,
        "_meta": { "hasMore": has_more, "nextCursor": cursor },
    });
    OperationResult::success(200, body.to_string())
}

fn names(listing: &PageListing) -> Vec<String> {
    listing
        .pages()
        .unwrap()
        .iter()
        .map(|p| p.name.clone())
        .collect()
}

// ============================================================================
// Response Decoding Tests
// ============================================================================

#[test]
fn test_list_response_decoding() {
    let response: PageListResponse = serde_json::from_value(json!({
        "_items": [{"id": "1", "name": "A"}, {"id": 2, "name": "B"}],
        "_meta": {"hasMore": true, "nextCursor": "abc"},
    }))
    .unwrap();

    assert_eq!(response.items.len(), 2);
    assert_eq!(response.items[1].id, "2");
    assert!(response.meta.has_more);
    assert_eq!(response.meta.next_cursor.as_deref(), Some("abc"));
}

#[test]
fn test_missing_meta_means_last_page() {
    let response: PageListResponse =
        serde_json::from_value(json!({"_items": [{"id": "1", "name": "A"}]})).unwrap();
    assert_eq!(response.next_page(&PaginationState::new()), Ok(NextPage::Done));
}

#[test]
fn test_null_list_fields_decode_as_defaults() {
    let response: PageListResponse = serde_json::from_value(json!({
        "_items": null,
        "_meta": {"hasMore": null, "nextCursor": null},
    }))
    .unwrap();
    assert!(response.items.is_empty());
    assert_eq!(response.next_page(&PaginationState::new()), Ok(NextPage::Done));

    let response: PageListResponse =
        serde_json::from_value(json!({"_items": [{"id": "1", "name": "A"}], "_meta": null}))
            .unwrap();
    assert_eq!(response.items.len(), 1);
    assert!(!response.meta.has_more);
}

#[test]
fn test_next_page_follows_cursor() {
    let response: PageListResponse = serde_json::from_value(json!({
        "_items": [],
        "_meta": {"hasMore": true, "nextCursor": "abc"},
    }))
    .unwrap();

    let next = response.next_page(&PaginationState::new()).unwrap();
    assert_eq!(
        next,
        NextPage::Continue {
            cursor: "abc".to_string()
        }
    );
}

#[test]
fn test_next_page_rejects_repeated_cursor() {
    let response: PageListResponse = serde_json::from_value(json!({
        "_items": [],
        "_meta": {"hasMore": true, "nextCursor": "abc"},
    }))
    .unwrap();

    let mut state = PaginationState::new();
    state.set_cursor("abc".to_string());
    let err = response.next_page(&state).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Decode);
}

#[test]
fn test_pagination_state() {
    let mut state = PaginationState::new();
    assert_eq!(state.page, 0);
    assert!(state.cursor.is_none());

    state.next_page();
    state.add_fetched(100);
    state.set_cursor("c1".to_string());

    assert_eq!(state.page, 1);
    assert_eq!(state.total_fetched, 100);
    assert_eq!(state.cursor.as_deref(), Some("c1"));
    assert!(state.has_seen("c1"));
    assert!(!state.has_seen("c2"));
}

// ============================================================================
// PageListing Tests
// ============================================================================

#[test]
fn test_listing_serialization() {
    let listing = PageListing::Pages(vec![Page::new("1", "Alpha")].into_iter().collect());
    assert_eq!(
        serde_json::to_value(&listing).unwrap(),
        json!({"_items": [{"id": "1", "name": "Alpha", "isBuilderThreePage": false, "isBuilderThreePublished": false, "isSplit": false}]})
    );

    assert_eq!(
        serde_json::to_value(PageListing::NoPages).unwrap(),
        json!(NO_PAGES_MESSAGE)
    );
}

#[test]
fn test_listing_accessors() {
    assert!(PageListing::NoPages.is_no_pages());
    assert_eq!(PageListing::NoPages.message(), Some(NO_PAGES_MESSAGE));
    assert!(PageListing::NoPages.into_collection().is_empty());

    let listing = PageListing::Pages(vec![Page::new("1", "A")].into_iter().collect());
    assert!(listing.message().is_none());
    assert_eq!(listing.into_collection().len(), 1);
}

// ============================================================================
// Aggregator Tests
// ============================================================================

#[tokio::test]
async fn test_two_pages_follow_cursor() {
    let source = ScriptedSource::new(vec![
        list_page(json!([{"id": "1", "name": "Bravo"}]), true, Some("abc")),
        list_page(json!([{"id": "2", "name": "alpha"}]), false, None),
    ]);

    let result = Aggregator::new(&source).run().await;

    assert_eq!(source.cursors(), vec![None, Some("abc".to_string())]);
    assert_eq!(result.status_code, Some(200));
    assert_eq!(names(result.value().unwrap()), vec!["alpha", "Bravo"]);
}

#[tokio::test]
async fn test_aggregates_every_page() {
    let source = ScriptedSource::new(vec![
        list_page(
            json!([{"id": "1", "name": "a1"}, {"id": "2", "name": "a2"}]),
            true,
            Some("c1"),
        ),
        list_page(json!([{"id": "3", "name": "b1"}]), true, Some("c2")),
        list_page(
            json!([{"id": "4", "name": "c1"}, {"id": "5", "name": "c2"}]),
            false,
            None,
        ),
    ]);

    let result = Aggregator::new(&source).run().await;
    let listing = result.value().unwrap();

    assert_eq!(listing.pages().unwrap().len(), 5);
    assert_eq!(names(listing), vec!["a1", "a2", "b1", "c1", "c2"]);
    assert_eq!(source.cursors().len(), 3);
}

#[tokio::test]
async fn test_aggregate_filters_unpublished_builder_pages() {
    let source = ScriptedSource::new(vec![list_page(
        json!([
            {"id": "1", "name": "Draft", "isBuilderThreePage": true, "isBuilderThreePublished": false},
            {"id": "2", "name": "Live", "isBuilderThreePage": true, "isBuilderThreePublished": true},
            {"id": "3", "name": "Classic", "isBuilderThreePage": false},
        ]),
        false,
        None,
    )]);

    let result = Aggregator::new(&source).run().await;
    assert_eq!(names(result.value().unwrap()), vec!["Classic", "Live"]);
}

#[tokio::test]
async fn test_empty_first_page_is_no_pages() {
    let source = ScriptedSource::new(vec![list_page(json!([]), false, None)]);

    let result = Aggregator::new(&source).run().await;

    assert_eq!(result.status_code, Some(200));
    assert_eq!(result.value(), Some(&PageListing::NoPages));
}

#[tokio::test]
async fn test_empty_first_page_ignores_has_more() {
    let source = ScriptedSource::new(vec![list_page(json!([]), true, Some("abc"))]);

    let result = Aggregator::new(&source).run().await;

    assert_eq!(result.value(), Some(&PageListing::NoPages));
    assert_eq!(source.cursors().len(), 1);
}

#[tokio::test]
async fn test_only_drafts_is_an_empty_collection() {
    let source = ScriptedSource::new(vec![list_page(
        json!([{"id": "1", "name": "Draft", "isBuilderThreePage": true}]),
        false,
        None,
    )]);

    let result = Aggregator::new(&source).run().await;
    let listing = result.value().unwrap();
    assert!(!listing.is_no_pages());
    assert!(listing.pages().unwrap().is_empty());
}

#[tokio::test]
async fn test_mid_walk_failure_propagates() {
    let failure = OperationResult::failure(
        Some(500),
        OperationError::new(ErrorKind::Server, "Something went wrong"),
    );
    let source = ScriptedSource::new(vec![
        list_page(json!([{"id": "1", "name": "A"}]), true, Some("abc")),
        failure.clone(),
    ]);

    let result = Aggregator::new(&source).run().await;

    assert_eq!(result.status_code, Some(500));
    assert_eq!(result.error(), failure.error());
}

#[tokio::test]
async fn test_first_request_failure_propagates() {
    let source = ScriptedSource::new(vec![OperationResult::failure(
        None,
        OperationError::new(ErrorKind::Connectivity, "Can not connect"),
    )]);

    let result = Aggregator::new(&source).run().await;

    assert_eq!(result.status_code, None);
    assert_eq!(result.error_kind(), Some(ErrorKind::Connectivity));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let source = ScriptedSource::new(vec![OperationResult::success(
        200,
        "<html>maintenance</html>".to_string(),
    )]);

    let result = Aggregator::new(&source).run().await;

    assert_eq!(result.status_code, Some(200));
    assert_eq!(result.error_kind(), Some(ErrorKind::Decode));
    assert!(result.message().unwrap().starts_with(DECODE_PREFIX));
}

#[tokio::test]
async fn test_has_more_without_cursor_is_decode_error() {
    let source = ScriptedSource::new(vec![list_page(
        json!([{"id": "1", "name": "A"}]),
        true,
        None,
    )]);

    let result = Aggregator::new(&source).run().await;

    assert_eq!(result.error_kind(), Some(ErrorKind::Decode));
    assert_eq!(source.cursors().len(), 1);
}

#[tokio::test]
async fn test_repeated_cursor_stops_walk() {
    let source = ScriptedSource::new(vec![
        list_page(json!([{"id": "1", "name": "A"}]), true, Some("abc")),
        list_page(json!([{"id": "2", "name": "B"}]), true, Some("abc")),
    ]);

    let result = Aggregator::new(&source).run().await;

    assert_eq!(result.error_kind(), Some(ErrorKind::Decode));
    assert_eq!(source.cursors().len(), 2);
}

#[tokio::test]
async fn test_page_limit() {
    let source = ScriptedSource::new(vec![
        list_page(json!([{"id": "1", "name": "A"}]), true, Some("c1")),
        list_page(json!([{"id": "2", "name": "B"}]), true, Some("c2")),
    ]);

    let result = Aggregator::new(&source)
        .with_max_pages(Some(2))
        .run()
        .await;

    assert_eq!(result.error_kind(), Some(ErrorKind::Decode));
    assert_eq!(source.cursors().len(), 2);
}
