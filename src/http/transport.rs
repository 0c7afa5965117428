//! Transport abstraction
//!
//! A [`Transport`] performs one HTTP exchange. Any response, whatever its
//! status, comes back as a [`RawResponse`]; `Err` means no response was
//! received at all. Classifying statuses is the normalizer's job.

use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, SET_COOKIE};
use serde_json::Value;
use std::collections::HashMap;

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters, sent in insertion order
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<Value>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A received HTTP response
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Body decoded as text
    pub body: String,
}

impl RawResponse {
    /// Create a response without headers
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Append a header; invalid names or values are ignored
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 4xx
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// 5xx
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// All `Set-Cookie` header values that are valid UTF-8
    pub fn set_cookies(&self) -> impl Iterator<Item = &str> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
    }
}

/// Performs HTTP exchanges for the pages client
#[async_trait]
pub trait Transport: Send + Sync {
    /// Make a GET request
    async fn get(&self, url: &str, config: RequestConfig) -> Result<RawResponse>;

    /// Make a PATCH request
    async fn patch(&self, url: &str, config: RequestConfig) -> Result<RawResponse>;
}
