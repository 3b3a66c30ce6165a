//! Normalization of native responses into a [`ResolvedResponse`].
//!
//! The body of a native response is read exactly once, through the single
//! accessor selected by the caller's [`ExpectedType`]. There is no fallback
//! to another accessor and no content-type sniffing.

use crate::error::{self, Result};
use crate::header::names::common::CONTENT_TYPE;
use crate::http::{ExpectedType, ResolvedResponse, ResponseBody, ResponseData, ResponseHead};

pub mod fetch;
pub mod xhr;

pub use fetch::collect_headers;
pub use xhr::parse_raw_headers;

/// A native response that can be split into its head and its one-shot body.
pub trait NativeResponse {
    fn into_head_and_body(self) -> (ResponseHead, ResponseBody);
}

/// Resolve `native` into a normalized response.
///
/// # Errors
///
/// Returns a `read-*` error matching `expected` when the body cannot be read
/// in that representation. The error carries the status and headers.
pub async fn resolve<R>(native: R, expected: ExpectedType) -> Result<ResolvedResponse>
where
    R: NativeResponse,
{
    let (head, body) = native.into_head_and_body();
    let data = match expected {
        ExpectedType::Json => body.json().await.map(ResponseData::Json),
        ExpectedType::Text => body.text().await.map(ResponseData::Text),
        ExpectedType::ArrayBuffer => body.array_buffer().await.map(ResponseData::ArrayBuffer),
        ExpectedType::Blob => {
            let content_type = head.headers.get(CONTENT_TYPE).unwrap_or_default().to_owned();
            body.blob(content_type).await.map(ResponseData::Blob)
        }
    };

    match data {
        Ok(data) => {
            tracing::trace!(
                target: "niupee::resolve",
                status = head.status,
                expected = expected.as_str(),
                "response resolved"
            );
            Ok(ResolvedResponse::new(head, data))
        }
        Err(cause) => Err(error::read(expected, head, cause)),
    }
}
