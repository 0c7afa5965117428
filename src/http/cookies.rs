//! Minimal `Set-Cookie` parsing
//!
//! Only what split-test detection needs: turn header values into cookies and
//! pick the first one whose name contains a marker. No cookie-jar semantics.

use serde::{Deserialize, Serialize};

/// One cookie parsed from a `Set-Cookie` header
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cookie {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Domain", default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(rename = "Path", default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(rename = "Expires", default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(rename = "Max-Age", default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<i64>,
    #[serde(rename = "Secure", default)]
    pub secure: bool,
    #[serde(rename = "HttpOnly", default)]
    pub http_only: bool,
}

/// Parse a single `Set-Cookie` header value
pub fn parse_set_cookie(header: &str) -> Option<Cookie> {
    let mut parts = header.split(';');
    let (name, value) = parts.next()?.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let mut cookie = Cookie {
        name: name.to_string(),
        value: value.trim().trim_matches('"').to_string(),
        ..Cookie::default()
    };

    for attribute in parts {
        let attribute = attribute.trim();
        let (key, val) = match attribute.split_once('=') {
            Some((k, v)) => (k.trim(), Some(v.trim())),
            None => (attribute, None),
        };

        match key.to_ascii_lowercase().as_str() {
            "domain" => cookie.domain = val.map(String::from),
            "path" => cookie.path = val.map(String::from),
            "expires" => cookie.expires = val.map(String::from),
            "max-age" => cookie.max_age = val.and_then(|v| v.parse().ok()),
            "secure" => cookie.secure = true,
            "httponly" => cookie.http_only = true,
            _ => {}
        }
    }

    Some(cookie)
}

/// First cookie among `headers` whose name contains `marker`
pub fn find_cookie<'a>(headers: impl IntoIterator<Item = &'a str>, marker: &str) -> Option<Cookie> {
    headers
        .into_iter()
        .filter_map(parse_set_cookie)
        .find(|cookie| cookie.name.contains(marker))
}

/// Build a `Cookie` request header from the pairs whose name contains `marker`
pub fn cookie_header<I, K, V>(cookies: I, marker: &str) -> Option<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let pairs: Vec<String> = cookies
        .into_iter()
        .filter(|(name, _)| name.as_ref().contains(marker))
        .map(|(name, value)| format!("{}={}", name.as_ref(), value.as_ref()))
        .collect();

    (!pairs.is_empty()).then(|| pairs.join("; "))
}
