//! Diagnostic sink for tagged request failures.
//!
//! Reporting never changes the outcome of a request: the error is only
//! observed and logged through `tracing`.

use std::future::Future;

use super::types::{EngineKind, Error, ErrorTag, Result};

/// Emits one diagnostic event per failure tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorResolver;

impl ErrorResolver {
    /// Log `error` under the target of the layer that produced it.
    pub fn report(error: &Error) {
        let url = error.url().map(url::Url::as_str).unwrap_or("<unknown>");
        let cause = std::error::Error::source(error)
            .map(ToString::to_string)
            .unwrap_or_default();

        match error.tag() {
            ErrorTag::NotSent => match error.engine() {
                Some(EngineKind::Fetch) => {
                    tracing::warn!(target: "niupee::fetch", url = %url, cause = %cause, "request rejected before sending");
                }
                Some(EngineKind::Xhr) => {
                    tracing::warn!(target: "niupee::xhr", url = %url, cause = %cause, "request rejected before sending");
                }
                None => {
                    tracing::warn!(target: "niupee::transport", url = %url, cause = %cause, "request rejected before sending");
                }
            },
            ErrorTag::NetworkError => {
                tracing::warn!(target: "niupee::xhr", url = %url, cause = %cause, "xhr network error");
            }
            ErrorTag::Timeout => {
                tracing::warn!(target: "niupee::xhr", url = %url, "xhr timed out");
            }
            ErrorTag::FetchNetworkError => {
                tracing::warn!(target: "niupee::fetch", url = %url, cause = %cause, "fetch obtained no response");
            }
            ErrorTag::FetchHttpError => {
                let status = error.status().unwrap_or_default();
                tracing::warn!(target: "niupee::fetch", url = %url, status, "fetch response outside 200-299");
            }
            ErrorTag::ReadJsonError
            | ErrorTag::ReadBlobError
            | ErrorTag::ReadTextError
            | ErrorTag::ReadArrayBufferError => {
                let status = error.status().unwrap_or_default();
                tracing::warn!(
                    target: "niupee::resolve",
                    url = %url,
                    status,
                    tag = error.tag().as_str(),
                    cause = %cause,
                    "response body could not be resolved"
                );
            }
            ErrorTag::Aborted => {
                tracing::debug!(target: "niupee::resolve", url = %url, "request aborted by caller");
            }
            ErrorTag::Builder => {
                tracing::warn!(target: "niupee::resolve", url = %url, cause = %cause, "request could not be built");
            }
        }
    }
}

/// Await `future` and report its error, if any, returning the result unchanged.
pub async fn report_errors<F, T>(future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let result = future.await;
    if let Err(ref error) = result {
        ErrorResolver::report(error);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::constructors;

    #[tokio::test]
    async fn report_errors_passes_result_through() {
        let ok: Result<u8> = report_errors(async { Ok(7) }).await;
        assert_eq!(ok.ok(), Some(7));

        let err: Result<u8> = report_errors(async { Err(constructors::timeout()) }).await;
        assert!(err.is_err_and(|e| e.is_timeout()));
    }

    #[test]
    fn report_handles_every_tag_without_url() {
        ErrorResolver::report(&constructors::aborted());
        ErrorResolver::report(&constructors::network("down"));
        ErrorResolver::report(&constructors::builder("bad url"));
        ErrorResolver::report(&constructors::not_sent("bad header").with_engine(EngineKind::Fetch));
        ErrorResolver::report(&constructors::not_sent("bad header"));
    }
}
