//! Client configuration
//!
//! [`ClientConfig`] carries everything that shapes requests to the Leadpages
//! pages API. It can be built in code with [`ClientConfig::builder`] or loaded
//! from YAML:
//!
//! ```yaml
//! pages_url: https://my.leadpages.net/page/v1/pages
//! page_size: 100
//! timeout_secs: 30
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default list endpoint
pub const DEFAULT_PAGES_URL: &str = "https://my.leadpages.net/page/v1/pages";

/// Largest page size the list endpoint accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Header carrying the security token
pub const DEFAULT_SECURITY_HEADER: &str = "LP-Security-Token";

/// Configuration for [`crate::PagesClient`] and [`crate::http::HttpTransport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// List endpoint; single pages live at `<pages_url>/<id>`
    pub pages_url: String,

    /// `pageSize` sent with every list request
    pub page_size: u32,

    /// Header name used for the security token
    pub security_header: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User agent string
    pub user_agent: String,

    /// Substring identifying the split-test cookie in page download responses
    pub split_test_marker: String,

    /// Substring identifying visitor cookies forwarded with page downloads
    pub forward_cookie_marker: String,

    /// Upper bound on list requests per aggregation run
    pub max_pages: Option<u32>,

    /// Headers added to every request
    pub default_headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            pages_url: DEFAULT_PAGES_URL.to_string(),
            page_size: MAX_PAGE_SIZE,
            security_header: DEFAULT_SECURITY_HEADER.to_string(),
            timeout_secs: 30,
            user_agent: format!("leadpages-pages/{}", env!("CARGO_PKG_VERSION")),
            split_test_marker: "splitTest".to_string(),
            forward_cookie_marker: "splitTestV2URI".to_string(),
            max_pages: None,
            default_headers: HashMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Parse a YAML document; missing fields take their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(Error::Io)?;
        Self::from_yaml_str(&content)
    }

    /// Check that the config can produce valid requests
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.pages_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "pages_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }

        if self.security_header.trim().is_empty() {
            return Err(Error::invalid_value("security_header", "must not be empty"));
        }

        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be at least 1"));
        }

        if self.max_pages == Some(0) {
            return Err(Error::invalid_value("max_pages", "must be at least 1"));
        }

        Ok(())
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Page size actually sent, never above the API cap
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// URL of a single page resource; the id is percent-encoded as one segment
    pub fn page_url(&self, page_id: &str) -> Result<String> {
        let mut url = Url::parse(&self.pages_url)?;
        url.path_segments_mut()
            .map_err(|()| Error::invalid_value("pages_url", "cannot hold a path"))?
            .pop_if_empty()
            .push(page_id);
        Ok(url.into())
    }
}

/// Builder for [`ClientConfig`]
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the list endpoint
    pub fn pages_url(mut self, url: impl Into<String>) -> Self {
        self.config.pages_url = url.into();
        self
    }

    /// Set the page size
    pub fn page_size(mut self, size: u32) -> Self {
        self.config.page_size = size;
        self
    }

    /// Set the security token header name
    pub fn security_header(mut self, name: impl Into<String>) -> Self {
        self.config.security_header = name.into();
        self
    }

    /// Set the request timeout, rounded up to whole seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the split-test cookie marker
    pub fn split_test_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.split_test_marker = marker.into();
        self
    }

    /// Set the forwarded cookie marker
    pub fn forward_cookie_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.forward_cookie_marker = marker.into();
        self
    }

    /// Bound the number of list requests per aggregation
    pub fn max_pages(mut self, max: u32) -> Self {
        self.config.max_pages = Some(max);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Build the config without validation
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.pages_url, DEFAULT_PAGES_URL);
        assert_eq!(config.page_size, 100);
        assert_eq!(config.security_header, "LP-Security-Token");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.max_pages.is_none());
        assert_ok!(config.validate());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder()
            .pages_url("http://localhost:8080/page/v1/pages")
            .page_size(25)
            .timeout(Duration::from_secs(5))
            .max_pages(10)
            .header("X-Trace", "abc")
            .user_agent("test-agent/1.0")
            .build();

        assert_eq!(config.page_size, 25);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_pages, Some(10));
        assert_eq!(config.default_headers.get("X-Trace"), Some(&"abc".to_string()));
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_ok!(config.validate());
    }

    #[test]
    fn test_page_url() {
        let config = ClientConfig::builder()
            .pages_url("https://my.leadpages.net/page/v1/pages/")
            .build();
        assert_eq!(
            config.page_url("5691563690688512").unwrap(),
            "https://my.leadpages.net/page/v1/pages/5691563690688512"
        );
    }

    #[test]
    fn test_page_url_encodes_id_as_one_segment() {
        let config = ClientConfig::default();
        assert_eq!(
            config.page_url("a/b?c#d").unwrap(),
            "https://my.leadpages.net/page/v1/pages/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn test_sub_second_timeout_rounds_up() {
        let config = ClientConfig::builder()
            .timeout(Duration::from_millis(500))
            .build();
        assert_eq!(config.timeout_secs, 1);
        assert_ok!(config.validate());

        let config = ClientConfig::builder()
            .timeout(Duration::from_millis(2500))
            .build();
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ClientConfig::builder().page_size(0).build();
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfigValue { ref field, .. }) if field == "page_size"
        ));

        let config = ClientConfig::builder().pages_url("not a url").build();
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));

        let config = ClientConfig::builder().pages_url("ftp://example.com/pages").build();
        assert_err!(config.validate());

        let config = ClientConfig::builder().security_header("  ").build();
        assert_err!(config.validate());

        let config = ClientConfig::builder().max_pages(0).build();
        assert_err!(config.validate());

        let config = ClientConfig::builder().timeout(Duration::ZERO).build();
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfigValue { ref field, .. }) if field == "timeout_secs"
        ));
        assert_err!(ClientConfig::from_yaml_str("timeout_secs: 0"));
    }

    #[test]
    fn test_effective_page_size_is_capped() {
        let config = ClientConfig::builder().page_size(500).build();
        assert_ok!(config.validate());
        assert_eq!(config.effective_page_size(), 100);
    }

    #[test]
    fn test_from_yaml_str_uses_defaults() {
        let config = ClientConfig::from_yaml_str("page_size: 50\nmax_pages: 3\n").unwrap();
        assert_eq!(config.page_size, 50);
        assert_eq!(config.max_pages, Some(3));
        assert_eq!(config.pages_url, DEFAULT_PAGES_URL);
        assert_eq!(config.split_test_marker, "splitTest");
    }

    #[test]
    fn test_from_yaml_str_invalid() {
        assert!(matches!(
            ClientConfig::from_yaml_str("page_size: [1, 2]"),
            Err(Error::YamlParse(_))
        ));
        assert_err!(ClientConfig::from_yaml_str("page_size: 0"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "pages_url: http://127.0.0.1:9000/pages").unwrap();
        writeln!(file, "security_header: X-Token").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.pages_url, "http://127.0.0.1:9000/pages");
        assert_eq!(config.security_header, "X-Token");
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ClientConfig::from_file(dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
