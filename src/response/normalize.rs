//! Response normalization
//!
//! Turns a transport outcome into an [`OperationResult`]. A 2xx response is a
//! success; everything else is classified into an [`ErrorKind`] with a
//! message built here, so every operation reports failures the same way.

use super::types::{ErrorKind, OperationError, OperationResult};
use crate::error::{Error, Result};
use crate::http::RawResponse;
use serde_json::Value;
use tracing::warn;

/// Message for client and server errors
pub const SUPPORT_MESSAGE: &str = "Something went wrong, please contact Leadpages support.";

/// Prefix for failures where the server could not be reached
pub const CONNECTIVITY_PREFIX: &str = "Can not connect to Leadpages Server:";

/// Prefix for token provider failures
pub const AUTH_PREFIX: &str = "Could not obtain a Leadpages security token:";

/// Prefix for unexpected response bodies
pub const DECODE_PREFIX: &str = "Unexpected response from Leadpages:";

const MAX_DETAIL_CHARS: usize = 200;

/// What a request was aimed at; decides whether a 404 means "page not found"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestTarget<'a> {
    /// The paginated list endpoint
    PageList,
    /// A single page resource
    Page {
        /// Requested page id
        id: &'a str,
        /// Constructed resource URL
        url: &'a str,
    },
    /// A published page URL outside the API
    PublishedPage,
}

/// Normalize a transport outcome; the success value is the raw response
pub fn normalize(
    outcome: Result<RawResponse>,
    target: RequestTarget<'_>,
) -> OperationResult<RawResponse> {
    match outcome {
        Ok(response) if response.is_success() => {
            OperationResult::success(response.status, response)
        }
        Ok(response) => {
            let error = classify_status(response.status, &response.body, target);
            warn!(
                status = response.status,
                kind = %error.kind,
                "Leadpages request failed"
            );
            OperationResult::failure(Some(response.status), error)
        }
        Err(e) => failure_from_error(&e),
    }
}

/// Failure result for an error raised before any response arrived
pub fn failure_from_error<T>(error: &Error) -> OperationResult<T> {
    let error = classify_error(error);
    warn!(kind = %error.kind, "Leadpages request failed: {}", error.message);
    OperationResult::failure(None, error)
}

/// Failure result for a token provider error
///
/// Providers that log in over the network can fail to connect; those keep the
/// connectivity classification.
pub fn auth_failure<T>(error: &Error) -> OperationResult<T> {
    let error = if error.is_connectivity() {
        classify_error(error)
    } else {
        auth_error(error)
    };
    warn!(kind = %error.kind, "Could not obtain security token: {}", error.message);
    OperationResult::failure(None, error)
}

fn auth_error(error: &Error) -> OperationError {
    OperationError::new(ErrorKind::Authentication, format!("{AUTH_PREFIX} {error}"))
}

/// Classify a non-2xx status
pub fn classify_status(status: u16, body: &str, target: RequestTarget<'_>) -> OperationError {
    match (status, target) {
        (404, RequestTarget::Page { id, url }) => {
            OperationError::new(ErrorKind::NotFound, not_found_message(id, url))
        }
        (400..=499, _) => OperationError::new(
            ErrorKind::Client,
            support_message(status, body),
        ),
        (500..=599, _) => OperationError::new(
            ErrorKind::Server,
            support_message(status, body),
        ),
        _ => OperationError::new(
            ErrorKind::Request,
            format!("Unexpected HTTP status {status}: {}", error_detail(body)),
        ),
    }
}

/// Classify an error raised before any response arrived
pub fn classify_error(error: &Error) -> OperationError {
    if error.is_connectivity() {
        return OperationError::new(
            ErrorKind::Connectivity,
            format!("{CONNECTIVITY_PREFIX} {error}"),
        );
    }

    match error {
        Error::Auth { .. } => auth_error(error),
        Error::JsonParse(_) => OperationError::decode(error),
        Error::Operation { kind, message, .. } => OperationError::new(*kind, message.clone()),
        _ => OperationError::new(ErrorKind::Request, error.to_string()),
    }
}

/// Message for a page that does not exist (deleted or unpublished)
pub fn not_found_message(page_id: &str, page_url: &str) -> String {
    format!(
        "Your Leadpage could not be found! Please make sure it is published in your \
         Leadpages Account. Support Info: Page id: {page_id} Page url: {page_url}"
    )
}

fn support_message(status: u16, body: &str) -> String {
    let detail = error_detail(body);
    if detail.is_empty() {
        format!("{SUPPORT_MESSAGE} (HTTP {status})")
    } else {
        format!("{SUPPORT_MESSAGE} (HTTP {status}: {detail})")
    }
}

/// Extract a human-readable message from an error body
///
/// Understands `{"message": ..}`, `{"error": {"message": ..}}`,
/// `{"errors": [{"message": ..}]}` and `{"detail": ..}`; anything else is
/// returned as trimmed, truncated text.
pub fn error_detail(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let candidates = [
            json.get("message"),
            json.get("error").and_then(|e| e.get("message")),
            json.get("errors")
                .and_then(Value::as_array)
                .and_then(|arr| arr.first())
                .and_then(|e| e.get("message")),
            json.get("detail"),
            json.get("error"),
        ];
        if let Some(message) = candidates
            .into_iter()
            .flatten()
            .find_map(Value::as_str)
        {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.chars().count() > MAX_DETAIL_CHARS {
        let truncated: String = trimmed.chars().take(MAX_DETAIL_CHARS).collect();
        format!("{truncated}...")
    } else {
        trimmed.to_string()
    }
}
