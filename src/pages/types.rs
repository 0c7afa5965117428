//! Page model
//!
//! Only the fields this crate acts on are typed; everything else in a page
//! record is kept in `extra` and written back out unchanged.

use crate::http::Cookie;
use crate::types::{null_as_default, JsonObject, PageId};
use serde::{Deserialize, Deserializer, Serialize};

/// A Leadpages page as returned by the pages API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(deserialize_with = "string_or_number")]
    pub id: PageId,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_builder_three_page: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_builder_three_published: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_split: bool,

    #[serde(
        rename = "_meta",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "PageMeta::is_empty"
    )]
    pub meta: PageMeta,

    /// Remaining fields, untouched
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Page {
    /// Create a classic (non builder-three) page
    pub fn new(id: impl Into<PageId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_builder_three_page: false,
            is_builder_three_published: false,
            is_split: false,
            meta: PageMeta::default(),
            extra: JsonObject::new(),
        }
    }

    /// Mark as a builder-three page with the given publish state
    #[must_use]
    pub fn builder_three(mut self, published: bool) -> Self {
        self.is_builder_three_page = true;
        self.is_builder_three_published = published;
        self
    }

    /// Set the publish URL
    #[must_use]
    pub fn with_publish_url(mut self, url: impl Into<String>) -> Self {
        self.meta.publish_url = Some(url.into());
        self
    }

    /// Builder-three pages that exist but were never published are not public
    pub fn is_unpublished_builder_page(&self) -> bool {
        self.is_builder_three_page && !self.is_builder_three_published
    }

    pub fn publish_url(&self) -> Option<&str> {
        self.meta.publish_url.as_deref()
    }
}

/// The `_meta` block of a page record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_url: Option<String>,

    #[serde(flatten)]
    pub extra: JsonObject,
}

impl PageMeta {
    fn is_empty(&self) -> bool {
        self.publish_url.is_none() && self.extra.is_empty()
    }
}

/// Ordered pages under one container, serialized as `{"_items": [...]}`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageCollection {
    #[serde(rename = "_items", default, deserialize_with = "null_as_default")]
    pub items: Vec<Page>,
}

impl PageCollection {
    pub fn new(items: Vec<Page>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.items.iter()
    }

    /// Find a page by id
    pub fn get(&self, id: &str) -> Option<&Page> {
        self.items.iter().find(|p| p.id == id)
    }

    /// Apply the public-visibility filter and name ordering
    #[must_use]
    pub fn filtered_and_sorted(self) -> Self {
        Self::new(super::filter::filter_and_sort(self.items))
    }

    pub fn into_inner(self) -> Vec<Page> {
        self.items
    }
}

impl IntoIterator for PageCollection {
    type Item = Page;
    type IntoIter = std::vec::IntoIter<Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a PageCollection {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Page> for PageCollection {
    fn from_iter<I: IntoIterator<Item = Page>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Publish URL of a page, serialized as `{"url": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadUrl {
    pub url: String,
}

/// Rendered HTML of a published page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageHtml {
    pub html: String,

    /// Split-test cookie set by the page, if it is part of an A/B test
    #[serde(
        rename = "splitTestCookie",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub split_test_cookie: Option<Cookie>,
}

/// Page ids arrive as strings, but older records carry them as numbers
fn string_or_number<'de, D>(deserializer: D) -> Result<PageId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
