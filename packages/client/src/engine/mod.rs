//! Transport engines: a request descriptor in, a cancellable result out.
//!
//! Two engines ship with the crate, [`XhrEngine`] and [`FetchEngine`]. Any
//! `Fn(RequestDescriptor) -> TransportResult + Send + Sync` closure is an
//! engine too, which is how callers substitute their own.

use std::fmt;
use std::future::IntoFuture;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::abort::CancelHandle;
use crate::error::{Error, Result};
use crate::http::{RequestDescriptor, ResolvedResponse};

pub mod fetch;
pub mod xhr;

pub use fetch::FetchEngine;
pub use xhr::XhrEngine;

/// The eventual outcome of a fired request.
pub type ResponseFuture = BoxFuture<'static, Result<ResolvedResponse>>;

/// Maps a request descriptor to a cancellable eventual result.
///
/// `fire` must not block. The descriptor is consumed exactly once.
pub trait TransportEngine: Send + Sync {
    fn fire(&self, descriptor: RequestDescriptor) -> TransportResult;
}

impl<F> TransportEngine for F
where
    F: Fn(RequestDescriptor) -> TransportResult + Send + Sync,
{
    fn fire(&self, descriptor: RequestDescriptor) -> TransportResult {
        self(descriptor)
    }
}

/// A result future paired with the handle that cancels it.
///
/// Awaiting a `TransportResult` awaits the response; grab the handle with
/// [`TransportResult::cancel_handle`] first to cancel from elsewhere.
pub struct TransportResult {
    result: ResponseFuture,
    cancel: CancelHandle,
}

impl TransportResult {
    pub fn new<F>(result: F, cancel: CancelHandle) -> Self
    where
        F: std::future::Future<Output = Result<ResolvedResponse>> + Send + 'static,
    {
        Self {
            result: result.boxed(),
            cancel,
        }
    }

    /// A result that has already failed, with a no-op cancel.
    #[must_use]
    pub fn rejected(error: Error) -> Self {
        Self {
            result: futures::future::ready(Err(error)).boxed(),
            cancel: CancelHandle::noop(),
        }
    }

    /// A clone of the cancel handle; cancelling is idempotent.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Replace the result future, keeping the cancel handle.
    #[must_use]
    pub fn map_result<F, Fut>(self, wrap: F) -> Self
    where
        F: FnOnce(ResponseFuture) -> Fut,
        Fut: std::future::Future<Output = Result<ResolvedResponse>> + Send + 'static,
    {
        Self {
            result: wrap(self.result).boxed(),
            cancel: self.cancel,
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (ResponseFuture, CancelHandle) {
        (self.result, self.cancel)
    }
}

impl IntoFuture for TransportResult {
    type Output = Result<ResolvedResponse>;
    type IntoFuture = ResponseFuture;

    fn into_future(self) -> Self::IntoFuture {
        self.result
    }
}

impl fmt::Debug for TransportResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResult")
            .field("cancel", &self.cancel)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{self, ErrorTag};
    use crate::header::HeaderCollection;
    use crate::http::{RequestBody, ResponseData, ResponseHead};
    use http::Method;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use url::Url;

    fn descriptor() -> RequestDescriptor {
        let url = Url::parse("http://example.com/echo").unwrap();
        RequestDescriptor::new(Method::GET, url, HeaderCollection::new(), RequestBody::Empty)
    }

    #[tokio::test]
    async fn closures_are_engines() {
        let engine = |descriptor: RequestDescriptor| {
            let path = descriptor.url().path().to_owned();
            TransportResult::new(
                async move {
                    let head = ResponseHead {
                        status: 200,
                        status_text: "OK".to_owned(),
                        headers: HeaderCollection::new(),
                    };
                    Ok(ResolvedResponse::new(head, ResponseData::Text(path)))
                },
                CancelHandle::noop(),
            )
        };
        let response = engine.fire(descriptor()).await.unwrap();
        assert_eq!(response.data.as_text(), Some("/echo"));
    }

    #[tokio::test]
    async fn rejected_result_has_noop_cancel() {
        let result = TransportResult::rejected(error::not_sent("bad header"));
        result.cancel();
        result.cancel();
        let err = result.await.unwrap_err();
        assert_eq!(err.tag(), ErrorTag::NotSent);
    }

    #[tokio::test]
    async fn map_result_keeps_the_cancel_handle() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cancel = CancelHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let result = TransportResult::new(async { Err(error::timeout()) }, cancel)
            .map_result(|future| async move { future.await });
        let handle = result.cancel_handle();
        handle.cancel();
        result.cancel();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(result.await.unwrap_err().is_timeout());
    }
}
