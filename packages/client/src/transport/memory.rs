//! Scripted in-memory transports for tests and offline use.
//!
//! [`MemoryTransport`] implements both native transport traits over a route
//! table keyed by method and path-with-query. Each route holds a queue of
//! responses; the last one is repeated once the queue drains. Unrouted
//! requests get an empty `404`.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use bytes::Bytes;
use futures::StreamExt;
use futures::future::BoxFuture;
use hashbrown::HashMap;
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use std::collections::VecDeque;
use url::{Position, Url};

use super::fetch::{FetchFailure, FetchRequest, FetchResponse, FetchTransport, status_text};
use super::hyper_xhr::raw_headers;
use super::xhr::{XhrDispatch, XhrEventSink, XhrResponse, XhrTransport, guard};
use crate::error::BoxError;
use crate::http::{RequestBody, ResponseBody};

/// A canned response.
#[derive(Debug, Clone)]
pub struct MemoryResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    head_delay: Duration,
    body_delay: Duration,
    failure: Option<String>,
}

impl MemoryResponse {
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            head_delay: Duration::ZERO,
            body_delay: Duration::ZERO,
            failure: None,
        }
    }

    /// `200 OK` with a `text/plain` body.
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        Self::new(StatusCode::OK)
            .header("content-type", "text/plain; charset=utf-8")
            .body(body.into())
    }

    /// `200 OK` with an `application/json` body.
    #[must_use]
    pub fn json(value: &serde_json::Value) -> Self {
        Self::new(StatusCode::OK)
            .header("content-type", "application/json")
            .body(value.to_string())
    }

    /// A transport-level failure: no response is ever produced.
    #[must_use]
    pub fn network_failure(message: impl Into<String>) -> Self {
        let mut response = Self::new(StatusCode::BAD_GATEWAY);
        response.failure = Some(message.into());
        response
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Add a header; invalid names or values are skipped with a warning.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                self.headers.append(name, value);
            }
            _ => tracing::warn!(target: "niupee::transport", name, "skipping invalid scripted header"),
        }
        self
    }

    /// Wait before the response head is available.
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.head_delay = delay;
        self
    }

    /// Wait between the response head and the body.
    #[must_use]
    pub fn body_delay(mut self, delay: Duration) -> Self {
        self.body_delay = delay;
        self
    }
}

/// A request observed by a [`MemoryTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

#[derive(Default)]
struct Routes {
    table: HashMap<(Method, String), VecDeque<MemoryResponse>>,
    recorded: Vec<RecordedRequest>,
}

/// In-memory XHR and fetch transport.
#[derive(Clone, Default)]
pub struct MemoryTransport {
    routes: Arc<Mutex<Routes>>,
}

impl MemoryTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `response` for `method` on `path` (including any query).
    #[must_use]
    pub fn route(self, method: Method, path: &str, response: MemoryResponse) -> Self {
        self.lock()
            .table
            .entry((method, path.to_owned()))
            .or_default()
            .push_back(response);
        self
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.lock().recorded.len()
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().recorded.clone()
    }

    fn respond(&self, request: RecordedRequest) -> MemoryResponse {
        let mut routes = self.lock();
        let key = (request.method.clone(), request.url[Position::BeforePath..Position::AfterQuery].to_owned());
        routes.recorded.push(request);
        match routes.table.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_else(not_found),
            Some(queue) => queue.front().cloned().unwrap_or_else(not_found),
            None => not_found(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Routes> {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found() -> MemoryResponse {
    MemoryResponse::new(StatusCode::NOT_FOUND)
}

impl XhrTransport for MemoryTransport {
    fn dispatch(&self, request: XhrDispatch, sink: XhrEventSink) {
        let response = self.respond(RecordedRequest {
            method: request.method.clone(),
            url: request.url.clone(),
            headers: request.headers.clone(),
            body: request.body.clone(),
        });
        tokio::spawn(async move {
            let outcome = guard(request.timeout, sink.abort_signal(), serve_xhr(response, &sink)).await;
            sink.complete(outcome);
        });
    }
}

async fn serve_xhr(response: MemoryResponse, sink: &XhrEventSink) -> Result<XhrResponse, BoxError> {
    tokio::time::sleep(response.head_delay).await;
    if let Some(failure) = response.failure {
        return Err(failure.into());
    }
    sink.headers_received();
    tokio::time::sleep(response.body_delay).await;
    sink.loading();
    let total = response.body.len() as u64;
    sink.progress(total, Some(total));
    Ok(XhrResponse {
        status: response.status.as_u16(),
        status_text: status_text(response.status),
        raw_headers: raw_headers(&response.headers),
        body: ResponseBody::from_bytes(response.body),
    })
}

impl FetchTransport for MemoryTransport {
    fn fetch(&self, request: FetchRequest) -> BoxFuture<'static, Result<FetchResponse, FetchFailure>> {
        let response = self.respond(RecordedRequest {
            method: request.method.clone(),
            url: request.url.clone(),
            headers: request.headers.clone(),
            body: request.body.clone(),
        });
        let signal = request.signal.clone();
        let url = request.url;
        Box::pin(async move {
            let serve = async move {
                tokio::time::sleep(response.head_delay).await;
                if let Some(failure) = response.failure {
                    return Err(FetchFailure::network(failure));
                }
                let body_delay = response.body_delay;
                let bytes = response.body;
                let body = if body_delay.is_zero() {
                    ResponseBody::from_bytes(bytes)
                } else {
                    ResponseBody::from_stream(
                        futures::stream::once(async move {
                            tokio::time::sleep(body_delay).await;
                            Ok::<_, BoxError>(bytes)
                        })
                        .boxed(),
                    )
                };
                Ok(FetchResponse {
                    status: response.status,
                    status_text: status_text(response.status),
                    headers: response.headers,
                    url,
                    redirected: false,
                    body,
                })
            };
            tokio::select! {
                biased;
                () = signal.aborted() => Err(FetchFailure::Aborted),
                result = serve => result,
            }
        })
    }
}
