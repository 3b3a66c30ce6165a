//! Fetch-style cache directives over a [`ResponseCache`].
//!
//! [`CachedFetch`] wraps any [`FetchTransport`] and decides per request,
//! from its cache directive, whether to serve from the cache, revalidate,
//! or go to the network. Only `GET` and `HEAD` responses are stored.

use std::sync::Arc;

use futures::future::BoxFuture;
use http::{Method, StatusCode};

use super::cache_entry::CacheEntry;
use super::cache_key::CacheKey;
use super::response_cache::ResponseCache;
use crate::http::{CacheDirective, ResponseBody};
use crate::transport::{FetchFailure, FetchRequest, FetchResponse, FetchTransport};

/// A [`FetchTransport`] that applies the request's cache directive.
pub struct CachedFetch<T> {
    inner: Arc<T>,
    cache: Arc<ResponseCache>,
}

impl<T> CachedFetch<T> {
    pub fn new(inner: T, cache: Arc<ResponseCache>) -> Self {
        Self {
            inner: Arc::new(inner),
            cache,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }
}

impl<T> Clone for CachedFetch<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<T: FetchTransport + 'static> FetchTransport for CachedFetch<T> {
    fn fetch(&self, request: FetchRequest) -> BoxFuture<'static, Result<FetchResponse, FetchFailure>> {
        let this = self.clone();
        Box::pin(async move { this.serve(request).await })
    }
}

impl<T: FetchTransport + 'static> CachedFetch<T> {
    async fn serve(self, request: FetchRequest) -> Result<FetchResponse, FetchFailure> {
        if !matches!(request.method, Method::GET | Method::HEAD) {
            return self.pass_through_unsafe(request).await;
        }

        let key = CacheKey::new(&request.method, &request.url, &request.headers);
        let directive = request.cache;
        let cached = match directive {
            CacheDirective::NoStore | CacheDirective::Reload => None,
            _ => self.cache.lookup(&key),
        };

        tracing::debug!(
            target: "niupee::cache",
            url = %request.url,
            ?directive,
            cached = cached.is_some(),
            "serving fetch through cache"
        );

        match (directive, cached) {
            (CacheDirective::NoStore, _) => self.inner.fetch(request).await,
            (CacheDirective::Reload, _) => self.fetch_and_store(&key, request).await,
            (CacheDirective::Default, Some(entry)) if entry.is_fresh() => Ok(self.hit(&entry, request)),
            (CacheDirective::Default | CacheDirective::NoCache, Some(entry)) => {
                self.revalidate(&key, request, &entry).await
            }
            (CacheDirective::ForceCache | CacheDirective::OnlyIfCached, Some(entry)) => {
                Ok(self.hit(&entry, request))
            }
            (CacheDirective::OnlyIfCached, None) => {
                self.cache.stats().record_miss();
                Ok(FetchResponse::gateway_timeout(request.url))
            }
            (CacheDirective::Default | CacheDirective::NoCache | CacheDirective::ForceCache, None) => {
                self.cache.stats().record_miss();
                self.fetch_and_store(&key, request).await
            }
        }
    }

    /// Successful `POST`/`PUT`/`DELETE`/`PATCH` invalidate the stored entries for their URL.
    async fn pass_through_unsafe(&self, request: FetchRequest) -> Result<FetchResponse, FetchFailure> {
        let url = request.url.clone();
        let invalidates = !matches!(request.method, Method::OPTIONS | Method::TRACE | Method::CONNECT);
        let response = self.inner.fetch(request).await?;
        if invalidates && response.ok() {
            self.cache.invalidate_url(&url);
        }
        Ok(response)
    }

    fn hit(&self, entry: &CacheEntry, request: FetchRequest) -> FetchResponse {
        self.cache.stats().record_hit();
        entry.to_response(request.url)
    }

    async fn revalidate(
        &self,
        key: &CacheKey,
        mut request: FetchRequest,
        entry: &CacheEntry,
    ) -> Result<FetchResponse, FetchFailure> {
        if !entry.can_validate() {
            return self.fetch_and_store(key, request).await;
        }

        self.cache.stats().record_validation();
        for (name, value) in &entry.validation_headers() {
            if !request.headers.contains_key(name) {
                request.headers.insert(name.clone(), value.clone());
            }
        }

        let url = request.url.clone();
        let response = self.inner.fetch(request).await?;
        if response.status != StatusCode::NOT_MODIFIED {
            return self.store_response(key, response).await;
        }

        tracing::debug!(target: "niupee::cache", %url, "revalidated cached response");
        let refreshed = self
            .cache
            .refresh(key, &response.headers)
            .unwrap_or_else(|| entry.clone());
        Ok(refreshed.to_response(url))
    }

    async fn fetch_and_store(&self, key: &CacheKey, request: FetchRequest) -> Result<FetchResponse, FetchFailure> {
        let response = self.inner.fetch(request).await?;
        self.store_response(key, response).await
    }

    /// Buffer and store a storable response; the caller always gets a body
    /// that replays the same bytes or the same read failure.
    async fn store_response(&self, key: &CacheKey, response: FetchResponse) -> Result<FetchResponse, FetchFailure> {
        if !self.cache.should_store(response.status, &response.headers) {
            return Ok(response);
        }

        let FetchResponse {
            status,
            status_text,
            headers,
            url,
            redirected,
            body,
        } = response;

        let body = match body.bytes().await {
            Ok(bytes) => {
                self.cache.store(
                    key,
                    CacheEntry::new(
                        &url,
                        status,
                        status_text.clone(),
                        headers.clone(),
                        bytes.clone(),
                        self.cache.config().default_ttl,
                    ),
                );
                ResponseBody::from_bytes(bytes)
            }
            Err(e) => {
                tracing::debug!(target: "niupee::cache", %url, error = %e, "response body failed, not caching");
                ResponseBody::failed(e)
            }
        };

        Ok(FetchResponse {
            status,
            status_text,
            headers,
            url,
            redirected,
            body,
        })
    }
}
