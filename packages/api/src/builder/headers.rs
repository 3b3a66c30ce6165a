//! Header stage: named, suggested and bulk header setters
//!
//! The setters come from [`RequestHeaderSetters`]; each is a single
//! last-write-wins set keyed by the canonical header name.

use std::sync::Arc;

use http::Method;
use niupee_client::engine::TransportEngine;
use niupee_client::header::{HeaderCollection, RequestHeaderSetters};
use niupee_client::http::RequestBody;
use url::Url;

use super::core::PreparedRequest;
use super::custom::EngineFireStage;
use super::fetch::FetchFireStage;
use super::xhr::XhrFireStage;

/// Second stage of a request: collects request headers.
///
/// # Examples
/// ```no_run
/// use niupee::{MimeType, RequestHeaderSetters};
///
/// # fn main() -> niupee::Result<()> {
/// let stage = niupee::get("https://api.example.com/users")?
///     .ready_for_headers()
///     .accept_suggest(MimeType::Json)
///     .authorization("Bearer token")
///     .request_headers([("X-Trace", "1")]);
/// assert_eq!(stage.headers().get("accept"), Some("application/json"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HeaderStage {
    method: Method,
    url: Url,
    headers: HeaderCollection,
    debug_enabled: bool,
}

impl HeaderStage {
    pub(crate) fn new(method: Method, url: Url, debug_enabled: bool) -> Self {
        Self {
            method,
            url,
            headers: HeaderCollection::new(),
            debug_enabled,
        }
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The canonical URL the request will be sent to.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderCollection {
        &self.headers
    }

    /// Bind the request to the XHR-style engine
    #[must_use]
    pub fn xhr_fire(self, body: impl Into<RequestBody>) -> XhrFireStage {
        XhrFireStage::new(self.prepare(body.into()))
    }

    /// Bind the request to the fetch-style engine
    #[must_use]
    pub fn fetch_fire(self, body: impl Into<RequestBody>) -> FetchFireStage {
        FetchFireStage::new(self.prepare(body.into()))
    }

    /// Bind the request to a caller-supplied engine
    ///
    /// Any `Fn(RequestDescriptor) -> TransportResult + Send + Sync` closure
    /// is an engine.
    #[must_use]
    pub fn engine_fire<E>(self, engine: E, body: impl Into<RequestBody>) -> EngineFireStage
    where
        E: TransportEngine + 'static,
    {
        EngineFireStage::new(self.prepare(body.into()), Arc::new(engine))
    }

    fn prepare(self, body: RequestBody) -> PreparedRequest {
        PreparedRequest {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body,
            debug_enabled: self.debug_enabled,
        }
    }
}

impl RequestHeaderSetters for HeaderStage {
    fn header_collection(&mut self) -> &mut HeaderCollection {
        &mut self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use niupee_client::header::{CacheControlSuggest, MimeType};

    fn stage() -> HeaderStage {
        HeaderStage::new(Method::POST, Url::parse("http://api.test/items").unwrap(), false)
    }

    #[test]
    fn last_setter_wins_per_header() {
        let stage = stage()
            .content_type("text/plain")
            .content_type_suggest(MimeType::Json)
            .header("content-type", "application/xml");
        assert_eq!(stage.headers().len(), 1);
        assert_eq!(stage.headers().get("Content-Type"), Some("application/xml"));
    }

    #[test]
    fn snapshot_travels_into_fire_stage() {
        let fire = stage()
            .cache_control_suggest(CacheControlSuggest::NoCache)
            .fetch_fire("payload");
        let request = fire.request();
        assert_eq!(request.headers().get("cache-control"), Some("no-cache"));
        assert_eq!(request.method(), &Method::POST);
        assert!(!request.body().is_empty());
    }
}
