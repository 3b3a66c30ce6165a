//! Cache entry management with freshness and validation support
//!
//! Provides `CacheEntry` for storing buffered fetch responses with their
//! freshness deadline, validators and hit tracking for LRU eviction.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant, SystemTime},
};

use bytes::Bytes;
use http::header::{CACHE_CONTROL, CONTENT_LENGTH, ETAG, EXPIRES, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED, PRAGMA};
use http::{HeaderMap, HeaderValue, StatusCode};
use url::Url;

use crate::cache::http_date::httpdate;
use crate::http::ResponseBody;
use crate::transport::FetchResponse;

/// Cached response entry with metadata
#[derive(Debug)]
pub struct CacheEntry {
    /// Request URL the response was stored for
    pub url: String,
    pub status: StatusCode,
    pub status_text: String,
    pub headers: HeaderMap,
    pub body: Bytes,
    /// Cache creation timestamp
    pub created_at: Instant,
    /// Nanoseconds from `created_at` to the last access
    accessed_after: AtomicU64,
    /// Instant after which the entry is stale
    pub fresh_until: Instant,
    /// `ETag` validator
    pub etag: Option<String>,
    /// Raw `Last-Modified` validator
    pub last_modified: Option<String>,
    /// Hit count for LRU tracking
    pub hit_count: AtomicU64,
    /// Size in bytes for memory management
    pub size_bytes: u64,
}

impl CacheEntry {
    /// Create a cache entry from a buffered response
    #[must_use]
    pub fn new(
        url: &Url,
        status: StatusCode,
        status_text: String,
        headers: HeaderMap,
        body: Bytes,
        default_ttl: Duration,
    ) -> Self {
        let now = Instant::now();
        let etag = header_string(&headers, &ETAG);
        let last_modified = header_string(&headers, &LAST_MODIFIED);
        let fresh_until = now + Self::freshness_lifetime(&headers, default_ttl);
        let size_bytes = body.len() as u64 + headers.len() as u64 * 64; // Estimate header overhead

        Self {
            url: url.as_str().to_owned(),
            status,
            status_text,
            headers,
            body,
            created_at: now,
            accessed_after: AtomicU64::new(0),
            fresh_until,
            etag,
            last_modified,
            hit_count: AtomicU64::new(0),
            size_bytes,
        }
    }

    /// Freshness lifetime from `Cache-Control`, then `Expires`, then `default_ttl`.
    ///
    /// `no-cache` (or `Pragma: no-cache`) makes the response stale on arrival.
    fn freshness_lifetime(headers: &HeaderMap, default_ttl: Duration) -> Duration {
        if let Some(cache_control) = header_string(headers, &CACHE_CONTROL) {
            if has_directive(&cache_control, "no-cache") {
                return Duration::ZERO;
            }
            if let Some(max_age) = Self::parse_max_age(&cache_control) {
                return Duration::from_secs(max_age);
            }
        } else if header_string(headers, &PRAGMA).is_some_and(|pragma| has_directive(&pragma, "no-cache")) {
            return Duration::ZERO;
        }

        if let Some(expires) = header_string(headers, &EXPIRES) {
            // An unparsable Expires means already expired.
            return httpdate::parse_http_date(&expires)
                .ok()
                .and_then(|at| at.duration_since(SystemTime::now()).ok())
                .unwrap_or(Duration::ZERO);
        }

        default_ttl
    }

    /// Parse max-age value from Cache-Control header
    fn parse_max_age(cache_control: &str) -> Option<u64> {
        cache_control
            .split(',')
            .filter_map(|directive| directive.trim().strip_prefix("max-age="))
            .find_map(|seconds| seconds.trim_matches('"').parse().ok())
    }

    #[must_use]
    pub fn is_fresh(&self) -> bool {
        Instant::now() < self.fresh_until
    }

    /// Check if cache entry is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        !self.is_fresh()
    }

    /// Check if entry can be validated with conditional request
    #[must_use]
    pub fn can_validate(&self) -> bool {
        self.etag.is_some() || self.last_modified.is_some()
    }

    /// Conditional request headers built from the stored validators
    #[must_use]
    pub fn validation_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = self.etag.as_deref().and_then(|v| HeaderValue::from_str(v).ok()) {
            headers.insert(IF_NONE_MATCH, value);
        }
        if let Some(value) = self
            .last_modified
            .as_deref()
            .and_then(|v| HeaderValue::from_str(v).ok())
        {
            headers.insert(IF_MODIFIED_SINCE, value);
        }
        headers
    }

    /// Merge the headers of a `304 Not Modified` and restart freshness.
    pub fn refresh(&mut self, not_modified: &HeaderMap, default_ttl: Duration) {
        for (name, value) in not_modified {
            if name != CONTENT_LENGTH {
                self.headers.insert(name.clone(), value.clone());
            }
        }
        let now = Instant::now();
        self.etag = header_string(&self.headers, &ETAG);
        self.last_modified = header_string(&self.headers, &LAST_MODIFIED);
        self.fresh_until = now + Self::freshness_lifetime(&self.headers, default_ttl);
        self.touch();
    }

    /// Record cache hit and update access time, in place
    pub fn record_hit(&self) {
        self.touch();
        self.hit_count.fetch_add(1, Ordering::Relaxed);
    }

    fn touch(&self) {
        let since_created = u64::try_from(self.created_at.elapsed().as_nanos()).unwrap_or(u64::MAX);
        self.accessed_after.fetch_max(since_created, Ordering::Relaxed);
    }

    /// Last access timestamp, used for LRU eviction
    #[must_use]
    pub fn last_accessed(&self) -> Instant {
        self.created_at + Duration::from_nanos(self.accessed_after.load(Ordering::Relaxed))
    }

    /// Get hit count
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hit_count.load(Ordering::Relaxed)
    }

    /// Calculate age of this cache entry
    #[must_use]
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// A response serving this entry for `url`
    #[must_use]
    pub fn to_response(&self, url: Url) -> FetchResponse {
        FetchResponse {
            status: self.status,
            status_text: self.status_text.clone(),
            headers: self.headers.clone(),
            url,
            redirected: false,
            body: ResponseBody::from_bytes(self.body.clone()),
        }
    }
}

impl Clone for CacheEntry {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            status: self.status,
            status_text: self.status_text.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
            created_at: self.created_at,
            accessed_after: AtomicU64::new(self.accessed_after.load(Ordering::Relaxed)),
            fresh_until: self.fresh_until,
            etag: self.etag.clone(),
            last_modified: self.last_modified.clone(),
            hit_count: AtomicU64::new(self.hit_count.load(Ordering::Relaxed)),
            size_bytes: self.size_bytes,
        }
    }
}

fn header_string(headers: &HeaderMap, name: &http::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Whether a comma-separated directive list contains `directive`.
pub(crate) fn has_directive(list: &str, directive: &str) -> bool {
    list.split(',').any(|item| {
        let item = item.trim();
        let name = item.split_once('=').map_or(item, |(name, _)| name);
        name.trim().eq_ignore_ascii_case(directive)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(headers: &[(&'static str, &'static str)], default_ttl: Duration) -> CacheEntry {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.insert(*name, HeaderValue::from_static(value));
        }
        CacheEntry::new(
            &Url::parse("http://h/p").unwrap(),
            StatusCode::OK,
            "OK".into(),
            map,
            Bytes::from_static(b"body"),
            default_ttl,
        )
    }

    #[test]
    fn max_age_wins_over_expires() {
        let e = entry(
            &[("cache-control", "public, max-age=60"), ("expires", "Sun, 06 Nov 1994 08:49:37 GMT")],
            Duration::ZERO,
        );
        assert!(e.is_fresh());
    }

    #[test]
    fn no_cache_and_max_age_zero_are_stale() {
        assert!(entry(&[("cache-control", "no-cache")], Duration::from_secs(60)).is_expired());
        assert!(entry(&[("cache-control", "max-age=0")], Duration::from_secs(60)).is_expired());
        assert!(entry(&[("pragma", "no-cache")], Duration::from_secs(60)).is_expired());
    }

    #[test]
    fn past_expires_is_stale_and_default_ttl_applies() {
        assert!(entry(&[("expires", "Sun, 06 Nov 1994 08:49:37 GMT")], Duration::from_secs(60)).is_expired());
        assert!(entry(&[], Duration::from_secs(60)).is_fresh());
    }

    #[test]
    fn validators_become_conditional_headers() {
        let e = entry(
            &[("etag", "\"v1\""), ("last-modified", "Sun, 06 Nov 1994 08:49:37 GMT")],
            Duration::ZERO,
        );
        assert!(e.can_validate());
        let headers = e.validation_headers();
        assert_eq!(headers[IF_NONE_MATCH], "\"v1\"");
        assert_eq!(headers[IF_MODIFIED_SINCE], "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn refresh_merges_headers_and_restarts_freshness() {
        let mut e = entry(&[("etag", "\"v1\""), ("cache-control", "no-cache")], Duration::ZERO);
        assert!(e.is_expired());
        let mut not_modified = HeaderMap::new();
        not_modified.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=60"));
        not_modified.insert(ETAG, HeaderValue::from_static("\"v2\""));
        e.refresh(&not_modified, Duration::ZERO);
        assert!(e.is_fresh());
        assert_eq!(e.etag.as_deref(), Some("\"v2\""));
        assert_eq!(e.body, Bytes::from_static(b"body"));
    }

    #[test]
    fn hits_move_the_access_time_forward() {
        let e = entry(&[], Duration::from_secs(60));
        let stored_at = e.last_accessed();
        std::thread::sleep(Duration::from_millis(2));
        e.record_hit();
        assert!(e.last_accessed() > stored_at);
        assert_eq!(e.hits(), 1);
        assert_eq!(e.clone().last_accessed(), e.last_accessed());
    }

    #[test]
    fn directive_matching_is_token_based() {
        assert!(has_directive("private, no-store", "no-store"));
        assert!(has_directive("no-cache=\"set-cookie\"", "no-cache"));
        assert!(!has_directive("no-cache-ish", "no-cache"));
    }
}
