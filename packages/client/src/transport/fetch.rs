//! Future-based `fetch`-style native transport contract.

use futures::future::BoxFuture;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use thiserror::Error;
use url::Url;

use crate::abort::AbortSignal;
use crate::error::BoxError;
use crate::http::{
    CacheDirective, CredentialsMode, RedirectMode, ReferrerPolicy, RequestBody, RequestMode,
    ResponseBody,
};

/// A request as seen by a [`FetchTransport`].
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestBody,
    pub credentials: CredentialsMode,
    pub cache: CacheDirective,
    pub mode: RequestMode,
    pub redirect: RedirectMode,
    pub referrer_policy: ReferrerPolicy,
    pub signal: AbortSignal,
}

impl FetchRequest {
    /// A `GET` with default options and a signal that never aborts.
    #[must_use]
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            credentials: CredentialsMode::default(),
            cache: CacheDirective::default(),
            mode: RequestMode::default(),
            redirect: RedirectMode::default(),
            referrer_policy: ReferrerPolicy::default(),
            signal: AbortSignal::never(),
        }
    }
}

/// The response of a [`FetchTransport`]; the body is read at most once.
#[derive(Debug)]
pub struct FetchResponse {
    pub status: StatusCode,
    pub status_text: String,
    pub headers: HeaderMap,
    pub url: Url,
    pub redirected: bool,
    pub body: ResponseBody,
}

impl FetchResponse {
    /// Whether the status is in 200-299.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    /// The response served by `only-if-cached` when nothing is cached.
    #[must_use]
    pub fn gateway_timeout(url: Url) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::CONTENT_LENGTH, HeaderValue::from_static("0"));
        Self {
            status: StatusCode::GATEWAY_TIMEOUT,
            status_text: status_text(StatusCode::GATEWAY_TIMEOUT),
            headers,
            url,
            redirected: false,
            body: ResponseBody::empty(),
        }
    }
}

/// Why a [`FetchTransport`] obtained no response.
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("network failure: {0}")]
    Network(#[source] BoxError),
    #[error("the request was aborted")]
    Aborted,
}

impl FetchFailure {
    pub fn network(cause: impl Into<BoxError>) -> Self {
        FetchFailure::Network(cause.into())
    }
}

/// Network side of the fetch-style engine.
///
/// Implementations should stop work once `request.signal` aborts.
pub trait FetchTransport: Send + Sync {
    fn fetch(&self, request: FetchRequest) -> BoxFuture<'static, Result<FetchResponse, FetchFailure>>;
}

impl<T: FetchTransport + ?Sized> FetchTransport for std::sync::Arc<T> {
    fn fetch(&self, request: FetchRequest) -> BoxFuture<'static, Result<FetchResponse, FetchFailure>> {
        (**self).fetch(request)
    }
}

/// The canonical reason phrase for `status`, or an empty string.
#[must_use]
pub fn status_text(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_owned()
}
