// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! # Leadpages Pages Client
//!
//! An async client for the Leadpages pages API: list every page of an
//! account across cursor-paginated responses, look up and update single
//! pages, and download published HTML with split-test cookie handling.
//!
//! ## Features
//!
//! - **Pagination**: follows `nextCursor` until the server reports no more pages
//! - **Filtering**: unpublished builder pages are dropped, the rest sorted by name
//! - **Uniform results**: every operation returns an [`OperationResult`] with
//!   the HTTP status and either a value or a classified error
//! - **Token caching**: the security token is fetched once, on first use
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use leadpages_pages::auth::StaticTokenProvider;
//! use leadpages_pages::{PagesClient, Result};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = PagesClient::new(Arc::new(StaticTokenProvider::new("lp-token")))?;
//!
//!     let listing = client.fetch_all_pages().await;
//!     if let Some(pages) = listing.value().and_then(|l| l.pages()) {
//!         for page in pages {
//!             println!("{} {}", page.id, page.name);
//!         }
//!     }
//!
//!     let html = client.download_html("5691563690688512").await;
//!     println!("{}", serde_json::to_string(&html)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         PagesClient                          │
//! │  fetch_all_pages  get_page  validate  update  download_html  │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌────────────┬────────────────┴───┬──────────────┬────────────┐
//! │ Pagination │     Response       │     Auth     │    HTTP    │
//! ├────────────┼────────────────────┼──────────────┼────────────┤
//! │ Aggregator │ normalize          │ TokenCache   │ Transport  │
//! │ cursors    │ ErrorKind          │ TokenProvider│ cookies    │
//! │ filter/sort│ OperationResult    │              │ reqwest    │
//! └────────────┴────────────────────┴──────────────┴────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// Security token providers and caching
pub mod auth;

/// HTTP transport and cookie handling
pub mod http;

/// Response normalization and operation results
pub mod response;

/// Cursor pagination over the page list
pub mod pagination;

/// Page model, filtering and the pages client
pub mod pages;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use pages::{DownloadUrl, Page, PageCollection, PageHtml, PagesClient};
pub use pagination::PageListing;
pub use response::{ErrorKind, OperationError, OperationResult};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
