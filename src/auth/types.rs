//! Token provider types
//!
//! Obtaining a security token (logging in, reading it from storage) happens
//! outside this crate. Callers plug that in through [`TokenProvider`].

use crate::error::{Error, Result};
use async_trait::async_trait;

/// Source of Leadpages security tokens
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Produce a token; called only when no token is cached
    async fn fetch_token(&self) -> Result<String>;
}

/// Provider that always hands out the same token
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// Create a provider for a pre-issued token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn fetch_token(&self) -> Result<String> {
        if self.token.is_empty() {
            return Err(Error::auth("no security token configured"));
        }
        Ok(self.token.clone())
    }
}
