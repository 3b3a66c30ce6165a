//! The XHR-style engine.

use std::sync::Arc;

use url::Url;

use super::{TransportEngine, TransportResult};
use crate::abort::{AbortSignal, CancelHandle};
use crate::error::{self, EngineKind, Result};
use crate::http::{
    CredentialsMode, ExpectedType, ProgressListeners, RequestDescriptor, ResolvedResponse,
};
use crate::resolver;
use crate::transport::{ReadyState, XhrConnection, XhrEvent, XhrTransport, XmlHttpRequest};

/// Drives an [`XmlHttpRequest`] per fired descriptor.
#[derive(Clone)]
pub struct XhrEngine {
    transport: Arc<dyn XhrTransport>,
}

impl XhrEngine {
    pub fn new(transport: Arc<dyn XhrTransport>) -> Self {
        Self { transport }
    }

    /// An engine over the process-wide built-in transport.
    #[must_use]
    pub fn global() -> Self {
        Self::new(crate::global_transports().xhr.clone())
    }
}

impl std::fmt::Debug for XhrEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XhrEngine").finish_non_exhaustive()
    }
}

impl TransportEngine for XhrEngine {
    fn fire(&self, descriptor: RequestDescriptor) -> TransportResult {
        let parts = descriptor.into_parts();
        let url = parts.url;
        let mut xhr = XmlHttpRequest::open(Arc::clone(&self.transport), parts.method, url.clone());

        for (name, value) in parts.headers.iter() {
            if let Err(rejected) = xhr.set_request_header(name, value) {
                tracing::debug!(target: "niupee::xhr", url = %url, error = %rejected, "header rejected");
                return TransportResult::rejected(
                    error::not_sent(rejected)
                        .with_engine(EngineKind::Xhr)
                        .with_url(url),
                );
            }
        }
        xhr.set_timeout(parts.timeout);
        xhr.set_with_credentials(parts.credentials == CredentialsMode::Include);
        xhr.set_response_type(parts.expected_type);

        let connection = xhr.send(parts.body);
        let ready_state = connection.ready_state_cell();
        let controller = connection.controller();
        let cancel = CancelHandle::new(move || {
            if ready_state.get() < ReadyState::HeadersReceived {
                controller.abort();
            } else {
                tracing::trace!(target: "niupee::xhr", "cancel after headers received ignored");
            }
        });

        let result = drive(
            connection,
            parts.progress,
            parts.expected_type,
            parts.signal,
            cancel.clone(),
            url,
        );
        TransportResult::new(result, cancel)
    }
}

/// Wait for the terminal event, forwarding progress on the way.
async fn drive(
    mut connection: XhrConnection,
    progress: ProgressListeners,
    expected: ExpectedType,
    external: Option<AbortSignal>,
    cancel: CancelHandle,
    url: Url,
) -> Result<ResolvedResponse> {
    let aborted = connection.controller().signal();
    let external = external.unwrap_or_else(AbortSignal::never);
    let mut watching_external = true;

    loop {
        let event = tokio::select! {
            biased;
            () = aborted.aborted() => return Err(error::aborted().with_url(url)),
            () = external.aborted(), if watching_external => {
                watching_external = false;
                cancel.cancel();
                continue;
            }
            event = connection.next_event() => event,
        };

        match event {
            Some(XhrEvent::Progress(event)) => progress.notify(&event),
            Some(XhrEvent::Load(response)) => {
                return resolver::resolve(response, expected)
                    .await
                    .map_err(|e| e.with_url(url));
            }
            Some(XhrEvent::Error(cause)) => return Err(error::network(cause).with_url(url)),
            Some(XhrEvent::Timeout) => return Err(error::timeout().with_url(url)),
            Some(XhrEvent::Abort) => return Err(error::aborted().with_url(url)),
            None => {
                return Err(
                    error::network("transport closed without a terminal event").with_url(url),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorTag;
    use crate::header::HeaderCollection;
    use crate::http::{ProgressEvent, RequestBody};
    use crate::transport::{MemoryResponse, MemoryTransport, XhrDispatch, XhrEventSink, XhrResponse};
    use crate::http::ResponseBody;
    use http::Method;
    use std::sync::Mutex;
    use std::time::Duration;

    fn descriptor(path: &str) -> RequestDescriptor {
        let url = Url::parse("http://api.test").unwrap().join(path).unwrap();
        RequestDescriptor::new(Method::GET, url, HeaderCollection::new(), RequestBody::Empty)
    }

    #[tokio::test]
    async fn rejected_header_sends_nothing() {
        let transport = MemoryTransport::new();
        let engine = XhrEngine::new(Arc::new(transport.clone()));
        let mut headers = HeaderCollection::new();
        headers.set("X-Bad", "line\nbreak");
        let url = Url::parse("http://api.test/a").unwrap();
        let result = engine.fire(RequestDescriptor::new(Method::GET, url, headers, RequestBody::Empty));
        result.cancel();
        let err = result.await.unwrap_err();
        assert_eq!(err.tag(), ErrorTag::NotSent);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn timeout_rejects_with_timeout_tag() {
        let transport = MemoryTransport::new().route(
            Method::GET,
            "/slow",
            MemoryResponse::text("late").delay(Duration::from_millis(200)),
        );
        let engine = XhrEngine::new(Arc::new(transport));
        let err = engine
            .fire(descriptor("/slow").with_timeout(Some(Duration::from_millis(20))))
            .await
            .unwrap_err();
        assert_eq!(err.tag(), ErrorTag::Timeout);
    }

    /// Emits progress then loads, recording nothing else.
    struct Scripted;

    impl XhrTransport for Scripted {
        fn dispatch(&self, _request: XhrDispatch, sink: XhrEventSink) {
            sink.headers_received();
            sink.loading();
            sink.progress(2, Some(4));
            sink.progress(4, Some(4));
            sink.load(XhrResponse {
                status: 200,
                status_text: "OK".to_owned(),
                raw_headers: "content-type: text/plain\r\n".to_owned(),
                body: ResponseBody::from_bytes("done"),
            });
        }
    }

    #[tokio::test]
    async fn progress_reaches_both_listeners() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let download = Arc::clone(&seen);
        let upload = Arc::clone(&seen);
        let progress = ProgressListeners {
            download: Some(Arc::new(move |e: &ProgressEvent| {
                download.lock().unwrap().push(("down", e.loaded));
            })),
            upload: Some(Arc::new(move |e: &ProgressEvent| {
                upload.lock().unwrap().push(("up", e.loaded));
            })),
        };
        let engine = XhrEngine::new(Arc::new(Scripted));
        let response = engine
            .fire(descriptor("/p").with_progress(progress))
            .await
            .unwrap();
        assert_eq!(response.data.as_text(), Some("done"));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("down", 2), ("up", 2), ("down", 4), ("up", 4)]
        );
    }

    #[tokio::test]
    async fn cancel_after_load_is_ignored() {
        let engine = XhrEngine::new(Arc::new(Scripted));
        let result = engine.fire(descriptor("/p"));
        let cancel = result.cancel_handle();
        cancel.cancel();
        let response = result.await.unwrap();
        assert_eq!(response.status, 200);
    }

    /// Reports headers, waits, then loads.
    struct HeadersThenLoad {
        headers_seen: Arc<tokio::sync::Notify>,
    }

    impl XhrTransport for HeadersThenLoad {
        fn dispatch(&self, _request: XhrDispatch, sink: XhrEventSink) {
            let headers_seen = Arc::clone(&self.headers_seen);
            tokio::spawn(async move {
                sink.headers_received();
                headers_seen.notify_one();
                tokio::time::sleep(Duration::from_millis(50)).await;
                sink.load(XhrResponse {
                    status: 200,
                    status_text: "OK".to_owned(),
                    raw_headers: String::new(),
                    body: ResponseBody::from_bytes("kept"),
                });
            });
        }
    }

    #[tokio::test]
    async fn cancel_after_headers_before_load_is_ignored() {
        let headers_seen = Arc::new(tokio::sync::Notify::new());
        let engine = XhrEngine::new(Arc::new(HeadersThenLoad {
            headers_seen: Arc::clone(&headers_seen),
        }));
        let result = engine.fire(descriptor("/h"));
        let cancel = result.cancel_handle();

        headers_seen.notified().await;
        cancel.cancel();

        let response = result.await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.data.as_text(), Some("kept"));
    }

    #[tokio::test]
    async fn cancel_before_headers_aborts() {
        let transport = MemoryTransport::new().route(
            Method::GET,
            "/slow",
            MemoryResponse::text("late").delay(Duration::from_secs(5)),
        );
        let engine = XhrEngine::new(Arc::new(transport));
        let result = engine.fire(descriptor("/slow"));
        result.cancel();
        let err = result.await.unwrap_err();
        assert_eq!(err.tag(), ErrorTag::Aborted);
    }
}
