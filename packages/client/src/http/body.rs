//! Request payloads and single-read response bodies.

use std::fmt;

use bytes::{Bytes, BytesMut};
use futures::stream::{BoxStream, StreamExt};
use thiserror::Error;

use crate::error::BoxError;

/// Payload handed to `xhr_fire` / `fetch_fire` / `engine_fire`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Text(String),
    Bytes(Bytes),
    Json(serde_json::Value),
    UrlEncoded(Vec<(String, String)>),
}

impl RequestBody {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            RequestBody::Empty => true,
            RequestBody::Text(text) => text.is_empty(),
            RequestBody::Bytes(bytes) => bytes.is_empty(),
            RequestBody::Json(_) => false,
            RequestBody::UrlEncoded(pairs) => pairs.is_empty(),
        }
    }

    /// `Content-Type` applied by the native transports when the caller set none.
    #[must_use]
    pub fn default_content_type(&self) -> Option<&'static str> {
        match self {
            RequestBody::Empty | RequestBody::Bytes(_) => None,
            RequestBody::Text(_) => Some("text/plain;charset=UTF-8"),
            RequestBody::Json(_) => Some("application/json"),
            RequestBody::UrlEncoded(_) => Some("application/x-www-form-urlencoded;charset=UTF-8"),
        }
    }

    /// Encode the payload for the wire.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if a JSON or url-encoded payload cannot be encoded.
    pub fn into_bytes(self) -> Result<Bytes, BoxError> {
        match self {
            RequestBody::Empty => Ok(Bytes::new()),
            RequestBody::Text(text) => Ok(Bytes::from(text)),
            RequestBody::Bytes(bytes) => Ok(bytes),
            RequestBody::Json(value) => Ok(Bytes::from(serde_json::to_vec(&value)?)),
            RequestBody::UrlEncoded(pairs) => Ok(Bytes::from(serde_urlencoded::to_string(pairs)?)),
        }
    }

    /// Encode a serializable value as a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if `value` cannot be represented as JSON.
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(RequestBody::Json)
    }
}

impl From<()> for RequestBody {
    fn from((): ()) -> Self {
        RequestBody::Empty
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_owned())
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        RequestBody::Bytes(bytes)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        RequestBody::Bytes(Bytes::from(bytes))
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        RequestBody::Json(value)
    }
}

impl<T: Into<RequestBody>> From<Option<T>> for RequestBody {
    fn from(body: Option<T>) -> Self {
        body.map_or(RequestBody::Empty, Into::into)
    }
}

/// Failure of a single body read.
#[derive(Debug, Error)]
pub enum BodyReadError {
    #[error("response body stream failed: {0}")]
    Stream(#[source] BoxError),
    #[error("response body is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// A response body that can be read exactly once.
///
/// Every accessor consumes the body, so a second read of the same stream
/// cannot be expressed.
pub struct ResponseBody {
    source: Source,
}

enum Source {
    Buffered(Bytes),
    Streaming(BoxStream<'static, Result<Bytes, BoxError>>),
    Failed(BoxError),
}

impl ResponseBody {
    #[must_use]
    pub fn empty() -> Self {
        Self::from_bytes(Bytes::new())
    }

    #[must_use]
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            source: Source::Buffered(bytes.into()),
        }
    }

    #[must_use]
    pub fn from_stream(stream: BoxStream<'static, Result<Bytes, BoxError>>) -> Self {
        Self {
            source: Source::Streaming(stream),
        }
    }

    /// A body whose read always fails with `cause`.
    #[must_use]
    pub fn failed(cause: impl Into<BoxError>) -> Self {
        Self {
            source: Source::Failed(cause.into()),
        }
    }

    /// Collect the raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BodyReadError::Stream`] if the underlying stream fails.
    pub async fn bytes(self) -> Result<Bytes, BodyReadError> {
        match self.source {
            Source::Buffered(bytes) => Ok(bytes),
            Source::Failed(cause) => Err(BodyReadError::Stream(cause)),
            Source::Streaming(mut stream) => {
                let mut buffer = BytesMut::new();
                while let Some(chunk) = stream.next().await {
                    buffer.extend_from_slice(&chunk.map_err(BodyReadError::Stream)?);
                }
                Ok(buffer.freeze())
            }
        }
    }

    /// Decode the body as UTF-8, replacing invalid sequences.
    ///
    /// # Errors
    ///
    /// Returns [`BodyReadError::Stream`] if the underlying stream fails.
    pub async fn text(self) -> Result<String, BodyReadError> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BodyReadError::Json`] if the body is not valid JSON.
    pub async fn json(self) -> Result<serde_json::Value, BodyReadError> {
        let bytes = self.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Read the body as a blob tagged with `content_type`.
    ///
    /// # Errors
    ///
    /// Returns [`BodyReadError::Stream`] if the underlying stream fails.
    pub async fn blob(self, content_type: impl Into<String>) -> Result<super::response::Blob, BodyReadError> {
        let bytes = self.bytes().await?;
        Ok(super::response::Blob::new(bytes, content_type))
    }

    /// Read the body as a raw byte buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BodyReadError::Stream`] if the underlying stream fails.
    pub async fn array_buffer(self) -> Result<Bytes, BodyReadError> {
        self.bytes().await
    }
}

impl Default for ResponseBody {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Source::Buffered(bytes) => f.debug_tuple("ResponseBody::Buffered").field(&bytes.len()).finish(),
            Source::Streaming(_) => f.write_str("ResponseBody::Streaming"),
            Source::Failed(cause) => f.debug_tuple("ResponseBody::Failed").field(cause).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[tokio::test]
    async fn streaming_body_is_collected() {
        let chunks: Vec<Result<Bytes, BoxError>> =
            vec![Ok(Bytes::from_static(b"{\"a\":")), Ok(Bytes::from_static(b"1}"))];
        let body = ResponseBody::from_stream(stream::iter(chunks).boxed());
        let value = body.json().await.unwrap();
        assert_eq!(value, serde_json::json!({"a": 1}));
    }

    #[tokio::test]
    async fn text_is_decoded_lossily() {
        let body = ResponseBody::from_bytes(vec![b'o', b'k', 0xff]);
        assert_eq!(body.text().await.unwrap(), "ok\u{fffd}");
    }

    #[tokio::test]
    async fn stream_failure_surfaces_on_read() {
        let chunks: Vec<Result<Bytes, BoxError>> =
            vec![Ok(Bytes::from_static(b"partial")), Err("connection reset".into())];
        let body = ResponseBody::from_stream(stream::iter(chunks).boxed());
        assert!(matches!(body.text().await, Err(BodyReadError::Stream(_))));

        let failed = ResponseBody::failed("gone");
        assert!(failed.array_buffer().await.is_err());
    }

    #[test]
    fn default_content_types() {
        assert_eq!(RequestBody::from("hi").default_content_type(), Some("text/plain;charset=UTF-8"));
        assert_eq!(RequestBody::from(serde_json::json!({})).default_content_type(), Some("application/json"));
        assert_eq!(RequestBody::from(vec![1u8]).default_content_type(), None);
        assert!(RequestBody::from(None::<String>).is_empty());
    }

    #[test]
    fn url_encoded_payload_is_encoded() {
        let body = RequestBody::UrlEncoded(vec![("a".into(), "1 2".into()), ("b".into(), "&".into())]);
        assert_eq!(body.into_bytes().unwrap(), Bytes::from_static(b"a=1+2&b=%26"));
    }
}
