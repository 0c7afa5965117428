//! Pagination module
//!
//! # Overview
//!
//! The page list endpoint is cursor paginated. [`Aggregator`] walks the
//! cursors of any [`PageSource`] and returns one filtered, sorted
//! [`PageListing`], or the first failure it meets.

mod aggregator;
mod types;

pub use aggregator::{Aggregator, PageSource};
pub use types::{
    ListMeta, NextPage, PageListResponse, PageListing, PaginationState, NO_PAGES_MESSAGE,
};

#[cfg(test)]
mod tests;
