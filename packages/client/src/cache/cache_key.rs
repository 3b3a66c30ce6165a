//! Cache key generation for fetch-style responses
//!
//! A key is the request method and URL (without fragment) plus the request
//! headers a server commonly varies on.

use std::fmt::Write as _;

use http::{HeaderMap, Method};
use url::Url;

/// Request headers that select between cached representations.
const KEYED_HEADERS: &[&str] = &["accept", "accept-language", "authorization"];

/// Cache key for HTTP responses based on method, URL and headers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Request URL without fragment
    pub url: String,
    /// HTTP method (GET or HEAD)
    pub method: String,
    /// Keyed header values, sorted by name
    pub cache_headers: Vec<(String, String)>,
}

impl CacheKey {
    /// Create cache key from request components
    #[must_use]
    pub fn new(method: &Method, url: &Url, headers: &HeaderMap) -> Self {
        let mut url = url.clone();
        url.set_fragment(None);

        let cache_headers = KEYED_HEADERS
            .iter()
            .filter_map(|name| {
                let value = headers.get(*name)?.to_str().ok()?;
                Some(((*name).to_owned(), value.to_owned()))
            })
            .collect();

        Self {
            url: url.into(),
            method: method.as_str().to_owned(),
            cache_headers,
        }
    }

    /// Stable string used as the storage key
    #[must_use]
    pub fn storage_key(&self) -> String {
        let mut key = format!("{} {}", self.method, self.url);
        for (name, value) in &self.cache_headers {
            let _ = write!(key, "\n{name}: {value}");
        }
        key
    }
}
