//! An event-driven `XMLHttpRequest`-style native request object.
//!
//! The object is always asynchronous: `send` hands the request to an
//! [`XhrTransport`] and returns immediately with a connection through which
//! progress events and exactly one terminal event arrive.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use thiserror::Error;
use tokio::sync::mpsc;
use url::Url;

use crate::abort::{AbortController, AbortSignal};
use crate::error::BoxError;
use crate::http::{ExpectedType, ProgressEvent, RequestBody, ResponseBody};

/// Readiness of an [`XmlHttpRequest`], ordered by progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ReadyState {
    Unsent = 0,
    Opened = 1,
    HeadersReceived = 2,
    Loading = 3,
    Done = 4,
}

impl ReadyState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => ReadyState::Unsent,
            1 => ReadyState::Opened,
            2 => ReadyState::HeadersReceived,
            3 => ReadyState::Loading,
            _ => ReadyState::Done,
        }
    }
}

/// Shared, lock-free view of a request's ready state.
#[derive(Debug, Clone)]
pub struct ReadyStateCell(Arc<AtomicU8>);

impl ReadyStateCell {
    fn new(state: ReadyState) -> Self {
        Self(Arc::new(AtomicU8::new(state as u8)))
    }

    #[must_use]
    pub fn get(&self) -> ReadyState {
        ReadyState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Move forward to `state`; the state never goes backwards.
    fn advance(&self, state: ReadyState) {
        self.0.fetch_max(state as u8, Ordering::AcqRel);
    }
}

/// A header `set_request_header` refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HeaderRejected {
    #[error("invalid header name {name:?}")]
    InvalidName { name: String },
    #[error("invalid value for header {name:?}")]
    InvalidValue { name: String },
}

/// Everything a transport needs to perform the exchange.
#[derive(Debug, Clone)]
pub struct XhrDispatch {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestBody,
    pub timeout: Option<Duration>,
    pub with_credentials: bool,
    pub response_type: ExpectedType,
}

/// The loaded response handed to the `load` event.
pub struct XhrResponse {
    pub status: u16,
    pub status_text: String,
    /// All response headers as CRLF-separated `name: value` lines.
    pub raw_headers: String,
    pub body: ResponseBody,
}

impl fmt::Debug for XhrResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XhrResponse")
            .field("status", &self.status)
            .field("status_text", &self.status_text)
            .field("raw_headers", &self.raw_headers)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum XhrEvent {
    Progress(ProgressEvent),
    Load(XhrResponse),
    Error(BoxError),
    Timeout,
    Abort,
}

/// How an exchange ended, as seen by a transport.
#[derive(Debug)]
pub enum XhrOutcome {
    Loaded(XhrResponse),
    Failed(BoxError),
    TimedOut,
    Aborted,
}

/// Transport side of one request: updates readiness and emits events.
///
/// The terminal methods consume the sink, so a transport can emit at most
/// one terminal event.
pub struct XhrEventSink {
    events: mpsc::UnboundedSender<XhrEvent>,
    ready_state: ReadyStateCell,
    signal: AbortSignal,
}

impl XhrEventSink {
    /// Signal raised when the caller aborts the request.
    #[must_use]
    pub fn abort_signal(&self) -> &AbortSignal {
        &self.signal
    }

    pub fn headers_received(&self) {
        self.ready_state.advance(ReadyState::HeadersReceived);
    }

    pub fn loading(&self) {
        self.ready_state.advance(ReadyState::Loading);
    }

    pub fn progress(&self, loaded: u64, total: Option<u64>) {
        // A closed receiver means nobody listens any more.
        let _ = self
            .events
            .send(XhrEvent::Progress(ProgressEvent { loaded, total }));
    }

    pub fn load(self, response: XhrResponse) {
        self.finish(XhrEvent::Load(response));
    }

    pub fn error(self, cause: impl Into<BoxError>) {
        self.finish(XhrEvent::Error(cause.into()));
    }

    pub fn timeout(self) {
        self.finish(XhrEvent::Timeout);
    }

    pub fn abort(self) {
        self.finish(XhrEvent::Abort);
    }

    /// Emit the terminal event matching `outcome`.
    pub fn complete(self, outcome: XhrOutcome) {
        match outcome {
            XhrOutcome::Loaded(response) => self.load(response),
            XhrOutcome::Failed(cause) => self.error(cause),
            XhrOutcome::TimedOut => self.timeout(),
            XhrOutcome::Aborted => self.abort(),
        }
    }

    fn finish(self, event: XhrEvent) {
        self.ready_state.advance(ReadyState::Done);
        let _ = self.events.send(event);
    }
}

/// Run `exchange` under the request timeout and the abort signal.
///
/// A zero or absent timeout means none. Transports call this before
/// emitting the terminal event with [`XhrEventSink::complete`].
pub async fn guard<F>(timeout: Option<Duration>, signal: &AbortSignal, exchange: F) -> XhrOutcome
where
    F: Future<Output = Result<XhrResponse, BoxError>>,
{
    let limited = async {
        match timeout.filter(|timeout| !timeout.is_zero()) {
            Some(limit) => match tokio::time::timeout(limit, exchange).await {
                Ok(Ok(response)) => XhrOutcome::Loaded(response),
                Ok(Err(cause)) => XhrOutcome::Failed(cause),
                Err(_) => XhrOutcome::TimedOut,
            },
            None => match exchange.await {
                Ok(response) => XhrOutcome::Loaded(response),
                Err(cause) => XhrOutcome::Failed(cause),
            },
        }
    };
    tokio::select! {
        biased;
        () = signal.aborted() => XhrOutcome::Aborted,
        outcome = limited => outcome,
    }
}

/// Network side of [`XmlHttpRequest`].
///
/// `dispatch` must not block: implementations hand the exchange to a task
/// and report through `sink`.
pub trait XhrTransport: Send + Sync {
    fn dispatch(&self, request: XhrDispatch, sink: XhrEventSink);
}

/// An opened, not yet sent request.
pub struct XmlHttpRequest {
    transport: Arc<dyn XhrTransport>,
    method: Method,
    url: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    with_credentials: bool,
    response_type: ExpectedType,
}

impl XmlHttpRequest {
    /// Open an asynchronous request.
    pub fn open(transport: Arc<dyn XhrTransport>, method: Method, url: Url) -> Self {
        Self {
            transport,
            method,
            url,
            headers: HeaderMap::new(),
            timeout: None,
            with_credentials: false,
            response_type: ExpectedType::default(),
        }
    }

    /// Append a request header. Repeated names are combined with `", "`.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderRejected`] when the name or value is not valid HTTP.
    pub fn set_request_header(&mut self, name: &str, value: &str) -> Result<(), HeaderRejected> {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            HeaderRejected::InvalidName {
                name: name.to_owned(),
            }
        })?;
        let combined = match self.headers.get(&header_name).map(HeaderValue::to_str) {
            Some(Ok(existing)) => format!("{existing}, {value}"),
            _ => value.to_owned(),
        };
        let header_value = HeaderValue::from_str(&combined).map_err(|_| {
            HeaderRejected::InvalidValue {
                name: name.to_owned(),
            }
        })?;
        self.headers.insert(header_name, header_value);
        Ok(())
    }

    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub fn set_with_credentials(&mut self, with_credentials: bool) {
        self.with_credentials = with_credentials;
    }

    pub fn set_response_type(&mut self, response_type: ExpectedType) {
        self.response_type = response_type;
    }

    /// Hand the request to the transport.
    #[must_use]
    pub fn send(self, body: RequestBody) -> XhrConnection {
        let (events, receiver) = mpsc::unbounded_channel();
        let ready_state = ReadyStateCell::new(ReadyState::Opened);
        let controller = AbortController::new();
        let sink = XhrEventSink {
            events,
            ready_state: ready_state.clone(),
            signal: controller.signal(),
        };
        tracing::debug!(target: "niupee::xhr", method = %self.method, url = %self.url, "sending xhr");
        self.transport.dispatch(
            XhrDispatch {
                method: self.method,
                url: self.url,
                headers: self.headers,
                body,
                timeout: self.timeout,
                with_credentials: self.with_credentials,
                response_type: self.response_type,
            },
            sink,
        );
        XhrConnection {
            events: receiver,
            ready_state,
            controller,
        }
    }
}

/// Caller side of a sent request.
pub struct XhrConnection {
    events: mpsc::UnboundedReceiver<XhrEvent>,
    ready_state: ReadyStateCell,
    controller: AbortController,
}

impl XhrConnection {
    #[must_use]
    pub fn ready_state(&self) -> ReadyState {
        self.ready_state.get()
    }

    #[must_use]
    pub fn ready_state_cell(&self) -> ReadyStateCell {
        self.ready_state.clone()
    }

    /// The controller whose abort stops the exchange.
    #[must_use]
    pub fn controller(&self) -> AbortController {
        self.controller.clone()
    }

    pub fn abort(&self) {
        self.controller.abort();
    }

    /// The next event, or `None` once the transport dropped its sink.
    pub async fn next_event(&mut self) -> Option<XhrEvent> {
        self.events.recv().await
    }
}
