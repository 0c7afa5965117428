//! Authentication module
//!
//! The security token is supplied by a caller-provided [`TokenProvider`] and
//! held in a [`TokenCache`] that populates it on first use.

mod cache;
mod types;

pub use cache::TokenCache;
pub use types::{StaticTokenProvider, TokenProvider};
