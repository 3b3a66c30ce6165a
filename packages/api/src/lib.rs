//! # niupee
//!
//! A staged, cancellable HTTP request builder over two transport models: an
//! event-driven XHR-style engine and a future-based fetch-style engine with
//! an HTTP cache.
//!
//! ```no_run
//! use niupee::{ExpectedType, MimeType, RequestHeaderSetters};
//!
//! # async fn run() -> niupee::Result<()> {
//! let request = niupee::get("https://api.example.com/search?page=1")?
//!     .replace_query([("page", "2")])
//!     .ready_for_headers()
//!     .accept_suggest(MimeType::Json)
//!     .fetch_fire(())
//!     .expect(ExpectedType::Json)
//!     .fire();
//!
//! let cancel = request.cancel_handle();
//! let response = request.await?;
//! cancel.cancel(); // settled already, so this does nothing
//! println!("{} {:?}", response.status, response.data.as_json());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;

use http::Method;
use niupee_client::http::into_url::IntoUrlSealed;

pub use builder::{
    EngineFireStage, FetchFireStage, FetchStageOptions, HeaderStage, PreparedRequest, UrlStage,
    XhrFireStage, XhrOptions,
};

pub use niupee_client::abort::{AbortController, AbortSignal, CancelHandle};
pub use niupee_client::cache::CacheConfig;
pub use niupee_client::config::TransportConfig;
pub use niupee_client::engine::{FetchEngine, TransportEngine, TransportResult, XhrEngine};
pub use niupee_client::error::{EngineKind, Error, ErrorResolver, ErrorTag, Result};
pub use niupee_client::header::{
    self, CacheControlSuggest, ContentDispositionSuggest, ContentEncodingSuggest, HeaderCollection,
    MimeType, RequestHeaderSetters,
};
pub use niupee_client::http::{
    Blob, CacheDirective, CredentialsMode, ExpectedType, IntoUrl, ProgressEvent, RedirectMode,
    ReferrerPolicy, RequestBody, RequestDescriptor, RequestMode, ResolvedResponse, ResponseData,
};
pub use niupee_client::{global_transports, init_transports};

/// Method-keyed entry points
///
/// Each returns the [`UrlStage`] of a new request, or a `builder` error when
/// the URL is not an absolute `http`/`https` URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestManager;

impl RequestManager {
    /// Start a `GET` request
    ///
    /// # Errors
    ///
    /// Returns a `builder` error for an unusable URL.
    pub fn get<U: IntoUrl>(url: U) -> Result<UrlStage> {
        Self::request(Method::GET, url)
    }

    /// Start a `POST` request
    ///
    /// # Errors
    ///
    /// Returns a `builder` error for an unusable URL.
    pub fn post<U: IntoUrl>(url: U) -> Result<UrlStage> {
        Self::request(Method::POST, url)
    }

    /// Start a `PUT` request
    ///
    /// # Errors
    ///
    /// Returns a `builder` error for an unusable URL.
    pub fn put<U: IntoUrl>(url: U) -> Result<UrlStage> {
        Self::request(Method::PUT, url)
    }

    /// Start a `HEAD` request
    ///
    /// # Errors
    ///
    /// Returns a `builder` error for an unusable URL.
    pub fn head<U: IntoUrl>(url: U) -> Result<UrlStage> {
        Self::request(Method::HEAD, url)
    }

    /// Start an `OPTIONS` request
    ///
    /// # Errors
    ///
    /// Returns a `builder` error for an unusable URL.
    pub fn options<U: IntoUrl>(url: U) -> Result<UrlStage> {
        Self::request(Method::OPTIONS, url)
    }

    fn request<U: IntoUrl>(method: Method, url: U) -> Result<UrlStage> {
        let url = url.into_url().inspect_err(|e| {
            log::warn!("niupee: refusing {method} request: {e}");
        })?;
        Ok(UrlStage::new(method, url))
    }
}

/// Start a `GET` request
///
/// Shorthand for [`RequestManager::get`].
///
/// # Errors
///
/// Returns a `builder` error for an unusable URL.
pub fn get<U: IntoUrl>(url: U) -> Result<UrlStage> {
    RequestManager::get(url)
}

/// Start a `POST` request
///
/// # Errors
///
/// Returns a `builder` error for an unusable URL.
pub fn post<U: IntoUrl>(url: U) -> Result<UrlStage> {
    RequestManager::post(url)
}

/// Start a `PUT` request
///
/// # Errors
///
/// Returns a `builder` error for an unusable URL.
pub fn put<U: IntoUrl>(url: U) -> Result<UrlStage> {
    RequestManager::put(url)
}

/// Start a `HEAD` request
///
/// # Errors
///
/// Returns a `builder` error for an unusable URL.
pub fn head<U: IntoUrl>(url: U) -> Result<UrlStage> {
    RequestManager::head(url)
}

/// Start an `OPTIONS` request
///
/// # Errors
///
/// Returns a `builder` error for an unusable URL.
pub fn options<U: IntoUrl>(url: U) -> Result<UrlStage> {
    RequestManager::options(url)
}
