//! The fetch-style engine.

use std::sync::Arc;

use http::{HeaderMap, HeaderName, HeaderValue};

use super::{TransportEngine, TransportResult};
use crate::abort::{AbortController, AbortSignal, CancelHandle};
use crate::error::{self, EngineKind, Error};
use crate::header::HeaderCollection;
use crate::http::RequestDescriptor;
use crate::resolver::{self, NativeResponse};
use crate::transport::{FetchFailure, FetchRequest, FetchTransport, HeaderRejected};

/// Runs fired descriptors through a [`FetchTransport`].
///
/// Cancellation aborts an [`AbortController`] owned by the request, so it
/// takes effect at any point before the result settles, including while the
/// body is being read. The request is handed to the transport on a spawned
/// task during `fire`, so a Tokio runtime must be current. There is no
/// timeout; pass an [`AbortSignal::timeout`] through the descriptor's signal
/// instead.
#[derive(Clone)]
pub struct FetchEngine {
    transport: Arc<dyn FetchTransport>,
}

impl FetchEngine {
    pub fn new(transport: Arc<dyn FetchTransport>) -> Self {
        Self { transport }
    }

    /// An engine over the process-wide built-in transport.
    #[must_use]
    pub fn global() -> Self {
        Self::new(crate::global_transports().fetch.clone())
    }
}

impl std::fmt::Debug for FetchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchEngine").finish_non_exhaustive()
    }
}

impl TransportEngine for FetchEngine {
    fn fire(&self, descriptor: RequestDescriptor) -> TransportResult {
        let parts = descriptor.into_parts();
        let url = parts.url;

        let headers = match header_map(&parts.headers) {
            Ok(headers) => headers,
            Err(rejected) => {
                tracing::debug!(target: "niupee::fetch", url = %url, error = %rejected, "header rejected");
                return TransportResult::rejected(
                    error::not_sent(rejected)
                        .with_engine(EngineKind::Fetch)
                        .with_url(url),
                );
            }
        };

        let controller = AbortController::new();
        let request = FetchRequest {
            method: parts.method,
            url: url.clone(),
            headers,
            body: parts.body,
            credentials: parts.credentials,
            cache: parts.fetch.cache,
            mode: parts.fetch.mode,
            redirect: parts.fetch.redirect,
            referrer_policy: parts.fetch.referrer_policy,
            signal: controller.signal(),
        };
        tracing::debug!(
            target: "niupee::fetch",
            method = %request.method,
            url = %url,
            cache = ?request.cache,
            "fetch fired"
        );

        let expected = parts.expected_type;
        let transport = Arc::clone(&self.transport);
        let work = async move {
            let response = transport.fetch(request).await.map_err(|failure| match failure {
                FetchFailure::Aborted => error::aborted(),
                FetchFailure::Network(cause) => error::fetch_network(cause),
            })?;
            if !response.ok() {
                // The body of an error response is never read.
                let (head, _body) = response.into_head_and_body();
                return Err(error::fetch_http(head));
            }
            resolver::resolve(response, expected).await
        };

        let internal = controller.signal();
        let external = parts.signal.unwrap_or_else(AbortSignal::never);
        let abort_transport = controller.clone();
        let task_url = url.clone();
        // The request goes out now, whether or not the result is ever awaited.
        let task = tokio::spawn(async move {
            let outcome: Result<_, Error> = tokio::select! {
                biased;
                () = internal.aborted() => Err(error::aborted()),
                () = external.aborted() => {
                    abort_transport.abort();
                    Err(error::aborted())
                }
                outcome = work => outcome,
            };
            outcome.map_err(|e| e.with_url(task_url))
        });
        let result = async move {
            match task.await {
                Ok(outcome) => outcome,
                Err(joined) => Err(error::fetch_network(joined).with_url(url)),
            }
        };

        TransportResult::new(result, CancelHandle::from_controller(controller))
    }
}

fn header_map(headers: &HeaderCollection) -> Result<HeaderMap, HeaderRejected> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers.iter() {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            HeaderRejected::InvalidName {
                name: name.to_owned(),
            }
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|_| HeaderRejected::InvalidValue {
            name: name.to_owned(),
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorTag;
    use crate::http::{CacheDirective, FetchOptions, RequestBody};
    use crate::transport::{MemoryResponse, MemoryTransport};
    use http::{Method, StatusCode};
    use std::time::Duration;
    use url::Url;

    fn descriptor(path: &str) -> RequestDescriptor {
        let url = Url::parse("http://api.test").unwrap().join(path).unwrap();
        RequestDescriptor::new(Method::GET, url, HeaderCollection::new(), RequestBody::Empty)
    }

    #[tokio::test]
    async fn non_success_status_is_http_error() {
        let transport = MemoryTransport::new().route(
            Method::GET,
            "/missing",
            MemoryResponse::new(StatusCode::NOT_FOUND).header("x-reason", "gone"),
        );
        let engine = FetchEngine::new(Arc::new(transport));
        let err = engine.fire(descriptor("/missing")).await.unwrap_err();
        assert_eq!(err.tag(), ErrorTag::FetchHttpError);
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.response_head().unwrap().headers.get("x-reason"), Some("gone"));
    }

    #[tokio::test]
    async fn network_failure_is_fetch_network_error() {
        let transport = MemoryTransport::new().route(
            Method::GET,
            "/down",
            MemoryResponse::network_failure("connection refused"),
        );
        let engine = FetchEngine::new(Arc::new(transport));
        let err = engine.fire(descriptor("/down")).await.unwrap_err();
        assert_eq!(err.tag(), ErrorTag::FetchNetworkError);
    }

    #[tokio::test]
    async fn cancel_during_body_read_aborts() {
        let transport = MemoryTransport::new().route(
            Method::GET,
            "/stream",
            MemoryResponse::text("eventually").body_delay(Duration::from_secs(5)),
        );
        let engine = FetchEngine::new(Arc::new(transport));
        let result = engine.fire(descriptor("/stream"));
        let cancel = result.cancel_handle();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            cancel.cancel();
        });
        let err = result.await.unwrap_err();
        assert_eq!(err.tag(), ErrorTag::Aborted);
    }

    #[tokio::test]
    async fn external_signal_aborts() {
        let transport = MemoryTransport::new().route(
            Method::GET,
            "/slow",
            MemoryResponse::text("late").delay(Duration::from_secs(5)),
        );
        let engine = FetchEngine::new(Arc::new(transport));
        let signal = AbortSignal::timeout(Duration::from_millis(20));
        let err = engine
            .fire(descriptor("/slow").with_signal(Some(signal)))
            .await
            .unwrap_err();
        assert!(err.is_aborted());
    }

    #[tokio::test]
    async fn options_reach_the_transport() {
        struct Capture(std::sync::Mutex<Option<FetchRequest>>);

        impl FetchTransport for Capture {
            fn fetch(
                &self,
                request: FetchRequest,
            ) -> futures::future::BoxFuture<'static, Result<crate::transport::FetchResponse, FetchFailure>> {
                let url = request.url.clone();
                *self.0.lock().unwrap() = Some(request);
                Box::pin(async move {
                    let mut response = crate::transport::FetchResponse::gateway_timeout(url);
                    response.status = StatusCode::NO_CONTENT;
                    Ok(response)
                })
            }
        }

        let capture = Arc::new(Capture(std::sync::Mutex::new(None)));
        let engine = FetchEngine::new(capture.clone());
        let options = FetchOptions {
            cache: CacheDirective::Reload,
            ..FetchOptions::default()
        };
        let response = engine
            .fire(descriptor("/opts").with_fetch_options(options))
            .await
            .unwrap();
        assert_eq!(response.status, 204);
        let seen = capture.0.lock().unwrap().take().unwrap();
        assert_eq!(seen.cache, CacheDirective::Reload);
    }
}
