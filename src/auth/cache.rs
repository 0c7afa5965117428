//! Lazily populated security token
//!
//! Every operation asks the cache for a token before touching the network.
//! The first caller that finds the cache empty fetches from the provider;
//! concurrent callers wait on the write lock and reuse that result.

use super::types::TokenProvider;
use crate::error::{Error, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Token cache with single-flight population
pub struct TokenCache {
    provider: Arc<dyn TokenProvider>,
    token: RwLock<Option<String>>,
}

impl TokenCache {
    /// Create an empty cache backed by `provider`
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            provider,
            token: RwLock::new(None),
        }
    }

    /// Create a cache that already holds a token
    pub fn with_token(provider: Arc<dyn TokenProvider>, token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            provider,
            token: RwLock::new((!token.is_empty()).then_some(token)),
        }
    }

    /// Return the cached token, fetching one if absent
    pub async fn get(&self) -> Result<String> {
        {
            let cached = self.token.read().await;
            if let Some(token) = cached.as_ref() {
                return Ok(token.clone());
            }
        }

        let mut cached = self.token.write().await;

        // Another task may have populated it while we waited for the lock
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }

        let token = self.fetch().await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    /// Fetch a new token regardless of what is cached
    pub async fn refresh(&self) -> Result<String> {
        let mut cached = self.token.write().await;
        let token = self.fetch().await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    /// Replace the cached token; an empty string clears it
    pub async fn set(&self, token: impl Into<String>) {
        let token = token.into();
        let mut cached = self.token.write().await;
        *cached = (!token.is_empty()).then_some(token);
    }

    /// Drop the cached token so the next operation fetches a new one
    pub async fn clear(&self) {
        let mut cached = self.token.write().await;
        *cached = None;
    }

    /// The cached token, without fetching
    pub async fn current(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    async fn fetch(&self) -> Result<String> {
        debug!("Fetching security token from provider");
        let token = self.provider.fetch_token().await?;
        if token.is_empty() {
            return Err(Error::auth("token provider returned an empty token"));
        }
        Ok(token)
    }
}

impl std::fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCache").finish_non_exhaustive()
    }
}
