//! reqwest-backed transport
//!
//! Sends requests as configured and hands back whatever the server answered.
//! There are no retries: a failure is reported once and left to the caller.

use super::transport::{RawResponse, RequestConfig, Transport};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// HTTP transport built on [`reqwest::Client`]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
    default_headers: HashMap<String, String>,
}

impl HttpTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a transport using the timeout, user agent and default headers of `config`
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            timeout: config.timeout(),
            default_headers: config.default_headers.clone(),
        })
    }

    /// Make a generic request
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<RawResponse> {
        let mut req = self.client.request(method.clone(), url);

        for (key, value) in &self.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        if let Some(ref body) = config.body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|e| self.classify(e))?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        debug!("{} {} -> {}", method, url, status);

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }

    fn classify(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else if e.is_connect() {
            Error::connect(e.to_string())
        } else {
            Error::Http(e)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, config: RequestConfig) -> Result<RawResponse> {
        self.request(Method::GET, url, config).await
    }

    async fn patch(&self, url: &str, config: RequestConfig) -> Result<RawResponse> {
        self.request(Method::PATCH, url, config).await
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("timeout", &self.timeout)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}
