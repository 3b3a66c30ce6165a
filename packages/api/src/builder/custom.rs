//! Configuration stage for a caller-supplied engine

use std::sync::Arc;
use std::time::Duration;

use niupee_client::abort::AbortSignal;
use niupee_client::engine::{TransportEngine, TransportResult};
use niupee_client::http::{
    CredentialsMode, ExpectedType, FetchOptions, ProgressListeners, RequestDescriptor,
};

use super::core::{PreparedRequest, fire_with};

/// Final stage for an engine passed to
/// [`HeaderStage::engine_fire`](super::HeaderStage::engine_fire).
///
/// The descriptor carries every option, so an engine may honor whichever
/// it understands.
#[derive(Clone)]
pub struct EngineFireStage {
    request: PreparedRequest,
    engine: Arc<dyn TransportEngine>,
    credentials: CredentialsMode,
    timeout: Option<Duration>,
    fetch: FetchOptions,
    progress: ProgressListeners,
    signal: Option<AbortSignal>,
    expected_type: ExpectedType,
}

impl EngineFireStage {
    pub(crate) fn new(request: PreparedRequest, engine: Arc<dyn TransportEngine>) -> Self {
        Self {
            request,
            engine,
            credentials: CredentialsMode::default(),
            timeout: None,
            fetch: FetchOptions::default(),
            progress: ProgressListeners::default(),
            signal: None,
            expected_type: ExpectedType::default(),
        }
    }

    #[must_use]
    pub fn request(&self) -> &PreparedRequest {
        &self.request
    }

    #[must_use]
    pub fn credentials(mut self, credentials: CredentialsMode) -> Self {
        self.credentials = credentials;
        self
    }

    /// Zero disables the timeout.
    #[must_use]
    pub fn with_timeout(mut self, milliseconds: u64) -> Self {
        self.timeout = Some(Duration::from_millis(milliseconds)).filter(|t| !t.is_zero());
        self
    }

    #[must_use]
    pub fn fetch_options(mut self, fetch: FetchOptions) -> Self {
        self.fetch = fetch;
        self
    }

    #[must_use]
    pub fn progress(mut self, progress: ProgressListeners) -> Self {
        self.progress = progress;
        self
    }

    #[must_use]
    pub fn with_signal(mut self, signal: AbortSignal) -> Self {
        self.signal = Some(signal);
        self
    }

    #[must_use]
    pub fn expect(mut self, expected_type: ExpectedType) -> Self {
        self.expected_type = expected_type;
        self
    }

    /// Replace the bound engine
    #[must_use]
    pub fn with_engine<E>(mut self, engine: E) -> Self
    where
        E: TransportEngine + 'static,
    {
        self.engine = Arc::new(engine);
        self
    }

    #[must_use]
    pub fn descriptor(&self) -> RequestDescriptor {
        self.clone().into_descriptor().0
    }

    /// Fire the request through the bound engine
    #[must_use]
    pub fn fire(self) -> TransportResult {
        let engine = Arc::clone(&self.engine);
        let (descriptor, debug_enabled) = self.into_descriptor();
        fire_with(&engine, descriptor, debug_enabled, "custom engine")
    }

    fn into_descriptor(self) -> (RequestDescriptor, bool) {
        let (descriptor, debug_enabled) = self.request.into_descriptor();
        let descriptor = descriptor
            .with_credentials(self.credentials)
            .with_timeout(self.timeout)
            .with_fetch_options(self.fetch)
            .with_progress(self.progress)
            .with_signal(self.signal)
            .with_expected_type(self.expected_type);
        (descriptor, debug_enabled)
    }
}

impl std::fmt::Debug for EngineFireStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineFireStage")
            .field("request", &self.request)
            .field("credentials", &self.credentials)
            .field("timeout", &self.timeout)
            .field("fetch", &self.fetch)
            .field("expected_type", &self.expected_type)
            .finish_non_exhaustive()
    }
}
