//! The request descriptor handed to a transport engine, and its option types.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http::Method;
use url::Url;

use super::body::RequestBody;
use crate::abort::AbortSignal;
use crate::header::HeaderCollection;

/// Body representation requested by the caller before firing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExpectedType {
    #[default]
    Text,
    Json,
    ArrayBuffer,
    Blob,
}

impl ExpectedType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ExpectedType::Text => "text",
            ExpectedType::Json => "json",
            ExpectedType::ArrayBuffer => "arraybuffer",
            ExpectedType::Blob => "blob",
        }
    }
}

/// Whether cookies and credentials accompany the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CredentialsMode {
    #[default]
    Omit,
    SameOrigin,
    Include,
}

/// Fetch-style cache directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CacheDirective {
    /// Fresh hit, else revalidate, else fetch and store.
    #[default]
    Default,
    /// Never read or write the cache.
    NoStore,
    /// Always fetch, then store.
    Reload,
    /// Always revalidate, then store.
    NoCache,
    /// Any cached entry regardless of freshness, else fetch and store.
    ForceCache,
    /// Any cached entry, else a synthesized 504 without touching the network.
    OnlyIfCached,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RequestMode {
    Cors,
    NoCors,
    #[default]
    SameOrigin,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RedirectMode {
    #[default]
    Follow,
    Error,
    Manual,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReferrerPolicy {
    NoReferrer,
    NoReferrerWhenDowngrade,
    Origin,
    OriginWhenCrossOrigin,
    SameOrigin,
    StrictOrigin,
    #[default]
    StrictOriginWhenCrossOrigin,
    UnsafeUrl,
}

/// Options read only by the fetch-style engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    pub cache: CacheDirective,
    pub mode: RequestMode,
    pub redirect: RedirectMode,
    pub referrer_policy: ReferrerPolicy,
}

/// A native progress notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub loaded: u64,
    pub total: Option<u64>,
}

impl ProgressEvent {
    #[must_use]
    pub fn length_computable(&self) -> bool {
        self.total.is_some()
    }
}

pub type ProgressCallback = Arc<dyn Fn(&ProgressEvent) + Send + Sync>;

/// Optional download and upload progress callbacks.
#[derive(Clone, Default)]
pub struct ProgressListeners {
    pub download: Option<ProgressCallback>,
    pub upload: Option<ProgressCallback>,
}

impl ProgressListeners {
    /// Deliver `event` to both callbacks.
    pub fn notify(&self, event: &ProgressEvent) {
        if let Some(download) = &self.download {
            download(event);
        }
        if let Some(upload) = &self.upload {
            upload(event);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.download.is_none() && self.upload.is_none()
    }
}

impl fmt::Debug for ProgressListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressListeners")
            .field("download", &self.download.is_some())
            .field("upload", &self.upload.is_some())
            .finish()
    }
}

/// Everything an engine needs to perform one request.
///
/// Built once at fire time; engines only read it, consuming it through
/// [`RequestDescriptor::into_parts`].
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    parts: DescriptorParts,
}

/// The destructured contents of a [`RequestDescriptor`].
#[derive(Debug, Clone)]
pub struct DescriptorParts {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderCollection,
    pub body: RequestBody,
    pub timeout: Option<Duration>,
    pub credentials: CredentialsMode,
    pub expected_type: ExpectedType,
    pub fetch: FetchOptions,
    pub progress: ProgressListeners,
    pub signal: Option<AbortSignal>,
}

impl RequestDescriptor {
    /// A descriptor with default options for every field not given here.
    #[must_use]
    pub fn new(method: Method, url: Url, headers: HeaderCollection, body: RequestBody) -> Self {
        Self {
            parts: DescriptorParts {
                method,
                url,
                headers,
                body,
                timeout: None,
                credentials: CredentialsMode::default(),
                expected_type: ExpectedType::default(),
                fetch: FetchOptions::default(),
                progress: ProgressListeners::default(),
                signal: None,
            },
        }
    }

    /// Zero means no timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.parts.timeout = timeout.filter(|timeout| !timeout.is_zero());
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: CredentialsMode) -> Self {
        self.parts.credentials = credentials;
        self
    }

    #[must_use]
    pub fn with_expected_type(mut self, expected_type: ExpectedType) -> Self {
        self.parts.expected_type = expected_type;
        self
    }

    #[must_use]
    pub fn with_fetch_options(mut self, fetch: FetchOptions) -> Self {
        self.parts.fetch = fetch;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: ProgressListeners) -> Self {
        self.parts.progress = progress;
        self
    }

    #[must_use]
    pub fn with_signal(mut self, signal: Option<AbortSignal>) -> Self {
        self.parts.signal = signal;
        self
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.parts.url
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderCollection {
        &self.parts.headers
    }

    #[must_use]
    pub fn body(&self) -> &RequestBody {
        &self.parts.body
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.parts.timeout
    }

    #[must_use]
    pub fn credentials(&self) -> CredentialsMode {
        self.parts.credentials
    }

    #[must_use]
    pub fn expected_type(&self) -> ExpectedType {
        self.parts.expected_type
    }

    #[must_use]
    pub fn fetch_options(&self) -> FetchOptions {
        self.parts.fetch
    }

    #[must_use]
    pub fn into_parts(self) -> DescriptorParts {
        self.parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn zero_timeout_means_none() {
        let url = Url::parse("http://example.com").unwrap();
        let descriptor = RequestDescriptor::new(Method::GET, url, HeaderCollection::new(), RequestBody::Empty)
            .with_timeout(Some(Duration::ZERO));
        assert_eq!(descriptor.timeout(), None);
        assert_eq!(descriptor.expected_type(), ExpectedType::Text);
        assert_eq!(descriptor.credentials(), CredentialsMode::Omit);
        assert_eq!(descriptor.fetch_options().mode, RequestMode::SameOrigin);
    }

    #[test]
    fn progress_fans_out_to_both_callbacks() {
        let seen = Arc::new(AtomicU64::new(0));
        let download = Arc::clone(&seen);
        let upload = Arc::clone(&seen);
        let listeners = ProgressListeners {
            download: Some(Arc::new(move |event: &ProgressEvent| {
                download.fetch_add(event.loaded, Ordering::SeqCst);
            })),
            upload: Some(Arc::new(move |event: &ProgressEvent| {
                upload.fetch_add(event.loaded, Ordering::SeqCst);
            })),
        };
        listeners.notify(&ProgressEvent { loaded: 5, total: Some(10) });
        assert_eq!(seen.load(Ordering::SeqCst), 10);
    }
}
