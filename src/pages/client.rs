//! Pages API client
//!
//! Every operation returns an [`OperationResult`]; nothing here panics or
//! returns early with `Err`.

use super::types::{DownloadUrl, PageHtml};
use crate::auth::{TokenCache, TokenProvider};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::cookies::{cookie_header, find_cookie};
use crate::http::{HttpTransport, RequestConfig, Transport};
use crate::pagination::{Aggregator, PageListing, PageSource};
use crate::response::{
    auth_failure, failure_from_error, normalize, OperationError, OperationResult, RequestTarget,
};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Client for the Leadpages pages API
pub struct PagesClient {
    transport: Arc<dyn Transport>,
    tokens: Arc<TokenCache>,
    config: ClientConfig,
}

impl PagesClient {
    /// Create a client with default configuration
    pub fn new(provider: Arc<dyn TokenProvider>) -> Result<Self> {
        Self::with_config(ClientConfig::default(), provider)
    }

    /// Create a client backed by reqwest
    pub fn with_config(config: ClientConfig, provider: Arc<dyn TokenProvider>) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::with_config(&config)?;
        Self::with_transport(config, Arc::new(transport), provider)
    }

    /// Create a client over any transport
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        provider: Arc<dyn TokenProvider>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport,
            tokens: Arc::new(TokenCache::new(provider)),
            config,
        })
    }

    /// Share a token cache with other clients
    #[must_use]
    pub fn with_token_cache(mut self, tokens: Arc<TokenCache>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn tokens(&self) -> &Arc<TokenCache> {
        &self.tokens
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ========================================================================
    // Listing
    // ========================================================================

    /// Fetch one raw page of the list endpoint
    pub async fn fetch_page(&self, cursor: Option<&str>) -> OperationResult<String> {
        let mut request = match self.authorized_request().await {
            Ok(request) => request,
            Err(failure) => return failure,
        };

        request = request.query("pageSize", self.config.effective_page_size().to_string());
        if let Some(cursor) = cursor {
            request = request.query("cursor", cursor);
        }

        debug!(cursor = ?cursor, "Requesting page list");
        let outcome = self.transport.get(&self.config.pages_url, request).await;
        normalize(outcome, RequestTarget::PageList).map(|response| response.body)
    }

    /// Every public page of the account, sorted by name
    pub async fn fetch_all_pages(&self) -> OperationResult<PageListing> {
        Aggregator::new(self)
            .with_max_pages(self.config.max_pages)
            .run()
            .await
    }

    // ========================================================================
    // Single page
    // ========================================================================

    /// The full page record
    pub async fn get_page(&self, page_id: &str) -> OperationResult<Value> {
        self.get_resource(page_id)
            .await
            .and_then(|response| parse_json(response.body))
    }

    /// The page's publish URL
    pub async fn get_download_url(&self, page_id: &str) -> OperationResult<DownloadUrl> {
        self.get_page(page_id).await.and_then(|page| {
            page.pointer("/_meta/publishUrl")
                .and_then(Value::as_str)
                .map(|url| DownloadUrl {
                    url: url.to_string(),
                })
                .ok_or_else(|| OperationError::decode("page has no _meta.publishUrl"))
        })
    }

    /// Whether the page is part of an A/B split test
    pub async fn is_split_tested(&self, page_id: &str) -> OperationResult<bool> {
        self.get_page(page_id).await.and_then(|page| {
            page.get("isSplit")
                .and_then(Value::as_bool)
                .ok_or_else(|| OperationError::decode("page has no isSplit flag"))
        })
    }

    /// Ask the server whether `data` would be accepted as an update
    pub async fn validate(&self, page_id: &str, data: &Value) -> OperationResult<bool> {
        let request = match self.authorized_request().await {
            Ok(request) => request,
            Err(failure) => return failure,
        };

        let url = match self.page_url(page_id) {
            Ok(url) => url,
            Err(failure) => return failure,
        };
        let request = request
            .header("Content-Type", "application/json")
            .query("onlyValidate", "true")
            .json(data.clone());

        debug!(page_id, "Validating page update");
        let outcome = self.transport.patch(&url, request).await;
        normalize(outcome, RequestTarget::Page { id: page_id, url: &url })
            .map(|response| is_true(&response.body))
    }

    /// Apply `data` to the page; returns the server's answer
    pub async fn update(&self, page_id: &str, data: &Value) -> OperationResult<Value> {
        let request = match self.authorized_request().await {
            Ok(request) => request,
            Err(failure) => return failure,
        };

        let url = match self.page_url(page_id) {
            Ok(url) => url,
            Err(failure) => return failure,
        };
        let request = request
            .header("Content-Type", "application/json")
            .json(data.clone());

        info!(page_id, "Updating page");
        let outcome = self.transport.patch(&url, request).await;
        normalize(outcome, RequestTarget::Page { id: page_id, url: &url }).and_then(|response| {
            if response.body.trim().is_empty() {
                Ok(Value::Null)
            } else {
                parse_json(response.body)
            }
        })
    }

    // ========================================================================
    // Published HTML
    // ========================================================================

    /// Download the published page
    pub async fn download_html(&self, page_id: &str) -> OperationResult<PageHtml> {
        self.download_html_with_cookies(page_id, &[]).await
    }

    /// Download the published page, forwarding the visitor's split-test cookies
    ///
    /// Only cookies whose name contains the configured forward marker are sent.
    pub async fn download_html_with_cookies(
        &self,
        page_id: &str,
        cookies: &[(&str, &str)],
    ) -> OperationResult<PageHtml> {
        let url = match self.get_download_url(page_id).await.into_failure() {
            Ok(failure) => return failure,
            Err(download_url) => download_url.url,
        };

        // The published page is public; no security token
        let mut request = RequestConfig::new();
        if let Some(header) =
            cookie_header(cookies.iter().copied(), &self.config.forward_cookie_marker)
        {
            request = request.header("Cookie", header);
        }

        debug!(page_id, url = %url, "Downloading published page");
        let outcome = self.transport.get(&url, request).await;
        let marker = self.config.split_test_marker.as_str();
        normalize(outcome, RequestTarget::PublishedPage).map(|response| {
            let split_test_cookie = find_cookie(response.set_cookies(), marker);
            PageHtml {
                html: response.body,
                split_test_cookie,
            }
        })
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn get_resource(&self, page_id: &str) -> OperationResult<crate::http::RawResponse> {
        let request = match self.authorized_request().await {
            Ok(request) => request,
            Err(failure) => return failure,
        };

        let url = match self.page_url(page_id) {
            Ok(url) => url,
            Err(failure) => return failure,
        };
        debug!(page_id, "Fetching page");
        let outcome = self.transport.get(&url, request).await;
        normalize(outcome, RequestTarget::Page { id: page_id, url: &url })
    }

    /// Resource URL for `page_id`, or the failure to report
    fn page_url<T>(&self, page_id: &str) -> std::result::Result<String, OperationResult<T>> {
        self.config
            .page_url(page_id)
            .map_err(|e| failure_from_error(&e))
    }

    /// A request carrying the security token, or the failure to report
    async fn authorized_request<T>(&self) -> std::result::Result<RequestConfig, OperationResult<T>> {
        match self.tokens.get().await {
            Ok(token) => Ok(RequestConfig::new().header(&self.config.security_header, token)),
            Err(e) => Err(auth_failure(&e)),
        }
    }
}

#[async_trait]
impl PageSource for PagesClient {
    async fn fetch(&self, cursor: Option<&str>) -> OperationResult<String> {
        self.fetch_page(cursor).await
    }
}

impl fmt::Debug for PagesClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagesClient")
            .field("pages_url", &self.config.pages_url)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

fn parse_json(body: String) -> std::result::Result<Value, OperationError> {
    serde_json::from_str(&body).map_err(OperationError::decode)
}

/// The validate endpoint answers with a bare JSON `true` on success
fn is_true(body: &str) -> bool {
    matches!(serde_json::from_str::<Value>(body), Ok(Value::Bool(true)))
        || body.trim().trim_matches('"') == "true"
}
