//! Fetch-style transport configuration stage

use std::sync::Arc;

use niupee_client::abort::AbortSignal;
use niupee_client::engine::{FetchEngine, TransportEngine, TransportResult};
use niupee_client::http::{
    CacheDirective, CredentialsMode, ExpectedType, FetchOptions, RedirectMode, ReferrerPolicy,
    RequestDescriptor, RequestMode,
};

use super::core::{PreparedRequest, fire_with};

/// Options collected by [`FetchFireStage`].
#[derive(Debug, Clone, Default)]
pub struct FetchStageOptions {
    pub credentials: CredentialsMode,
    pub fetch: FetchOptions,
    pub signal: Option<AbortSignal>,
    pub expected_type: ExpectedType,
}

/// Final stage for the fetch-style engine.
///
/// Defaults: credentials `omit`, cache `default`, mode `same-origin`,
/// redirect `follow`, `text` response. The engine has no timeout of its
/// own; compose one with [`AbortSignal::timeout`] and
/// [`FetchFireStage::with_signal`].
///
/// # Examples
/// ```no_run
/// use std::time::Duration;
/// use niupee::{AbortSignal, ExpectedType};
///
/// # async fn run() -> niupee::Result<()> {
/// let response = niupee::get("https://api.example.com/feed")?
///     .ready_for_headers()
///     .fetch_fire(())
///     .cors()
///     .force_cache()
///     .with_signal(AbortSignal::timeout(Duration::from_secs(10)))
///     .expect(ExpectedType::Json)
///     .fire()
///     .await?;
/// println!("{}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FetchFireStage {
    request: PreparedRequest,
    options: FetchStageOptions,
    engine: Option<Arc<dyn TransportEngine>>,
}

impl FetchFireStage {
    pub(crate) fn new(request: PreparedRequest) -> Self {
        Self {
            request,
            options: FetchStageOptions::default(),
            engine: None,
        }
    }

    #[must_use]
    pub fn request(&self) -> &PreparedRequest {
        &self.request
    }

    #[must_use]
    pub fn options(&self) -> &FetchStageOptions {
        &self.options
    }

    /// Never send cookies (`omit`)
    #[must_use]
    pub fn without_cookie(mut self) -> Self {
        self.options.credentials = CredentialsMode::Omit;
        self
    }

    /// Send cookies to the same origin only (`same-origin`)
    #[must_use]
    pub fn with_cookie_in_same_origin(mut self) -> Self {
        self.options.credentials = CredentialsMode::SameOrigin;
        self
    }

    /// Always send cookies (`include`)
    #[must_use]
    pub fn with_cookie(mut self) -> Self {
        self.options.credentials = CredentialsMode::Include;
        self
    }

    #[must_use]
    pub fn cache(mut self, directive: CacheDirective) -> Self {
        self.options.fetch.cache = directive;
        self
    }

    /// Use a fresh cached response, revalidate a stale one, else fetch and store
    #[must_use]
    pub fn default_cache(self) -> Self {
        self.cache(CacheDirective::Default)
    }

    /// Always fetch and never touch the cache
    #[must_use]
    pub fn no_store(self) -> Self {
        self.cache(CacheDirective::NoStore)
    }

    /// Always fetch, then update the cache
    #[must_use]
    pub fn reload(self) -> Self {
        self.cache(CacheDirective::Reload)
    }

    /// Always ask the server, conditionally when something is cached
    #[must_use]
    pub fn no_cache(self) -> Self {
        self.cache(CacheDirective::NoCache)
    }

    /// Use any cached response, fresh or stale, else fetch and store
    #[must_use]
    pub fn force_cache(self) -> Self {
        self.cache(CacheDirective::ForceCache)
    }

    /// Use any cached response, else answer `504` without going to the network
    #[must_use]
    pub fn only_if_cached(self) -> Self {
        self.cache(CacheDirective::OnlyIfCached)
    }

    #[must_use]
    pub fn same_origin(mut self) -> Self {
        self.options.fetch.mode = RequestMode::SameOrigin;
        self
    }

    #[must_use]
    pub fn cors(mut self) -> Self {
        self.options.fetch.mode = RequestMode::Cors;
        self
    }

    #[must_use]
    pub fn no_cors(mut self) -> Self {
        self.options.fetch.mode = RequestMode::NoCors;
        self
    }

    #[must_use]
    pub fn follow_redirects(mut self) -> Self {
        self.options.fetch.redirect = RedirectMode::Follow;
        self
    }

    /// Fail with `fetch-network-error` on any redirect
    #[must_use]
    pub fn error_on_redirect(mut self) -> Self {
        self.options.fetch.redirect = RedirectMode::Error;
        self
    }

    /// Hand back the 3xx response unfollowed
    #[must_use]
    pub fn manual_redirect(mut self) -> Self {
        self.options.fetch.redirect = RedirectMode::Manual;
        self
    }

    #[must_use]
    pub fn referrer_policy(mut self, policy: ReferrerPolicy) -> Self {
        self.options.fetch.referrer_policy = policy;
        self
    }

    /// Abort the request when `signal` aborts
    #[must_use]
    pub fn with_signal(mut self, signal: AbortSignal) -> Self {
        self.options.signal = Some(signal);
        self
    }

    /// Declare how the response body is read
    #[must_use]
    pub fn expect(mut self, expected_type: ExpectedType) -> Self {
        self.options.expected_type = expected_type;
        self
    }

    /// Replace the bound engine
    #[must_use]
    pub fn with_engine<E>(mut self, engine: E) -> Self
    where
        E: TransportEngine + 'static,
    {
        self.engine = Some(Arc::new(engine));
        self
    }

    /// Assemble the descriptor without firing it
    #[must_use]
    pub fn descriptor(&self) -> RequestDescriptor {
        self.clone().into_descriptor().0
    }

    /// Fire the request
    ///
    /// A status outside 200-299 settles with `fetch-http-error` without
    /// reading the body.
    #[must_use]
    pub fn fire(self) -> TransportResult {
        let engine = match &self.engine {
            Some(engine) => Arc::clone(engine),
            None => Arc::new(FetchEngine::global()) as Arc<dyn TransportEngine>,
        };
        let (descriptor, debug_enabled) = self.into_descriptor();
        fire_with(&engine, descriptor, debug_enabled, "fetch")
    }

    fn into_descriptor(self) -> (RequestDescriptor, bool) {
        let (descriptor, debug_enabled) = self.request.into_descriptor();
        let descriptor = descriptor
            .with_credentials(self.options.credentials)
            .with_fetch_options(self.options.fetch)
            .with_signal(self.options.signal)
            .with_expected_type(self.options.expected_type);
        (descriptor, debug_enabled)
    }
}

impl std::fmt::Debug for FetchFireStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchFireStage")
            .field("request", &self.request)
            .field("options", &self.options)
            .field("custom_engine", &self.engine.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use niupee_client::header::HeaderCollection;
    use niupee_client::http::RequestBody;
    use url::Url;

    fn stage() -> FetchFireStage {
        FetchFireStage::new(PreparedRequest {
            method: Method::GET,
            url: Url::parse("http://api.test/").unwrap(),
            headers: HeaderCollection::new(),
            body: RequestBody::Empty,
            debug_enabled: false,
        })
    }

    #[test]
    fn defaults_match_browser_fetch() {
        let descriptor = stage().descriptor();
        let options = descriptor.fetch_options();
        assert_eq!(descriptor.credentials(), CredentialsMode::Omit);
        assert_eq!(options.cache, CacheDirective::Default);
        assert_eq!(options.mode, RequestMode::SameOrigin);
        assert_eq!(options.redirect, RedirectMode::Follow);
        assert_eq!(descriptor.timeout(), None);
    }

    #[test]
    fn last_option_wins() {
        let descriptor = stage()
            .with_cookie()
            .with_cookie_in_same_origin()
            .reload()
            .only_if_cached()
            .no_cors()
            .manual_redirect()
            .referrer_policy(ReferrerPolicy::NoReferrer)
            .descriptor();
        let options = descriptor.fetch_options();
        assert_eq!(descriptor.credentials(), CredentialsMode::SameOrigin);
        assert_eq!(options.cache, CacheDirective::OnlyIfCached);
        assert_eq!(options.mode, RequestMode::NoCors);
        assert_eq!(options.redirect, RedirectMode::Manual);
        assert_eq!(options.referrer_policy, ReferrerPolicy::NoReferrer);
    }
}
