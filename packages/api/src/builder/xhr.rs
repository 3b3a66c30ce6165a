//! XHR-style transport configuration stage

use std::sync::Arc;
use std::time::Duration;

use niupee_client::engine::{TransportEngine, TransportResult, XhrEngine};
use niupee_client::http::{
    CredentialsMode, ExpectedType, ProgressEvent, ProgressListeners, RequestDescriptor,
};

use super::core::{PreparedRequest, fire_with};

/// Options collected by [`XhrFireStage`].
#[derive(Debug, Clone, Default)]
pub struct XhrOptions {
    pub with_credentials: bool,
    /// `None` or zero means no timeout.
    pub timeout: Option<Duration>,
    pub progress: ProgressListeners,
    pub expected_type: ExpectedType,
}

/// Final stage for the XHR-style engine.
///
/// Defaults: credentials off, no timeout, `text` response.
///
/// # Examples
/// ```no_run
/// use niupee::{ExpectedType, RequestHeaderSetters};
///
/// # async fn run() -> niupee::Result<()> {
/// let response = niupee::get("http://hello.com:8888/json")?
///     .ready_for_headers()
///     .content_type("application/json")
///     .xhr_fire(())
///     .with_timeout(5_000)
///     .expect(ExpectedType::Json)
///     .fire()
///     .await?;
/// println!("{:?}", response.data.as_json());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct XhrFireStage {
    request: PreparedRequest,
    options: XhrOptions,
    engine: Option<Arc<dyn TransportEngine>>,
}

impl XhrFireStage {
    pub(crate) fn new(request: PreparedRequest) -> Self {
        Self {
            request,
            options: XhrOptions::default(),
            engine: None,
        }
    }

    #[must_use]
    pub fn request(&self) -> &PreparedRequest {
        &self.request
    }

    #[must_use]
    pub fn options(&self) -> &XhrOptions {
        &self.options
    }

    /// Send cookies and authorization with cross-site requests
    #[must_use]
    pub fn with_cookie(mut self) -> Self {
        self.options.with_credentials = true;
        self
    }

    #[must_use]
    pub fn without_cookie(mut self) -> Self {
        self.options.with_credentials = false;
        self
    }

    /// Fail the request with a `timeout` error after `milliseconds`
    ///
    /// Zero disables the timeout.
    #[must_use]
    pub fn with_timeout(mut self, milliseconds: u64) -> Self {
        self.options.timeout = Some(Duration::from_millis(milliseconds)).filter(|t| !t.is_zero());
        self
    }

    /// Track download progress
    #[must_use]
    pub fn on_download<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ProgressEvent) + Send + Sync + 'static,
    {
        self.options.progress.download = Some(Arc::new(callback));
        self
    }

    /// Track upload progress
    #[must_use]
    pub fn on_upload<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ProgressEvent) + Send + Sync + 'static,
    {
        self.options.progress.upload = Some(Arc::new(callback));
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
    /// Header validation happens now; a rejected header yields a result
    /// that has already failed with `not-sent`. The returned value is a
    /// future of the response that also carries the cancel handle.
    #[must_use]
    pub fn fire(self) -> TransportResult {
        let engine = match &self.engine {
            Some(engine) => Arc::clone(engine),
            None => Arc::new(XhrEngine::global()) as Arc<dyn TransportEngine>,
        };
        let (descriptor, debug_enabled) = self.into_descriptor();
        fire_with(&engine, descriptor, debug_enabled, "xhr")
    }

    fn into_descriptor(self) -> (RequestDescriptor, bool) {
        let credentials = if self.options.with_credentials {
            CredentialsMode::Include
        } else {
            CredentialsMode::Omit
        };
        let (descriptor, debug_enabled) = self.request.into_descriptor();
        let descriptor = descriptor
            .with_credentials(credentials)
            .with_timeout(self.options.timeout)
            .with_progress(self.options.progress)
            .with_expected_type(self.options.expected_type);
        (descriptor, debug_enabled)
    }
}

impl std::fmt::Debug for XhrFireStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XhrFireStage")
            .field("request", &self.request)
            .field("options", &self.options)
            .field("custom_engine", &self.engine.is_some())
            .finish()
    }
}
