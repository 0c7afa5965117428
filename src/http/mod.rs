//! HTTP module
//!
//! Transport seam, the reqwest implementation and `Set-Cookie` parsing.
//!
//! # Features
//!
//! - **Transport trait**: operations talk to [`Transport`], so tests and
//!   embedders can substitute their own
//! - **Raw responses**: every HTTP status is returned, never turned into an error
//! - **Cookies**: split-test cookie detection and forwarding

mod client;
pub mod cookies;
mod transport;

pub use client::HttpTransport;
pub use cookies::Cookie;
pub use transport::{RawResponse, RequestConfig, Transport};
