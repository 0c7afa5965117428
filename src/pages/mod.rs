//! Pages module
//!
//! The page model, the visibility filter and ordering applied to listings, and
//! [`PagesClient`], which performs every page operation.

mod client;
mod filter;
mod types;

pub use client::PagesClient;
pub use filter::{filter_and_sort, sort_by_name, strip_unpublished_builder_pages};
pub use types::{DownloadUrl, Page, PageCollection, PageHtml, PageMeta};
