//! Normalized, engine-agnostic response shapes.

use bytes::Bytes;
use serde::de::DeserializeOwned;

use super::descriptor::ExpectedType;
use crate::header::HeaderCollection;

/// Status line and headers of a response, known before the body is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u16,
    pub status_text: String,
    pub headers: HeaderCollection,
}

/// Raw bytes plus the content type reported by the response.
///
/// The content type is metadata only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    bytes: Bytes,
    content_type: String,
}

impl Blob {
    #[must_use]
    pub fn new(bytes: Bytes, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }

    #[must_use]
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

/// The single body representation chosen by the caller's expected type.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    Json(serde_json::Value),
    Blob(Blob),
    Text(String),
    ArrayBuffer(Bytes),
}

impl ResponseData {
    /// The expected type that produced this representation.
    #[must_use]
    pub fn expected_type(&self) -> ExpectedType {
        match self {
            ResponseData::Json(_) => ExpectedType::Json,
            ResponseData::Blob(_) => ExpectedType::Blob,
            ResponseData::Text(_) => ExpectedType::Text,
            ResponseData::ArrayBuffer(_) => ExpectedType::ArrayBuffer,
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseData::Json(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseData::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            ResponseData::Blob(blob) => Some(blob),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array_buffer(&self) -> Option<&Bytes> {
        match self {
            ResponseData::ArrayBuffer(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// Outcome of a fulfilled request.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: HeaderCollection,
    pub data: ResponseData,
}

impl ResolvedResponse {
    #[must_use]
    pub fn new(head: ResponseHead, data: ResponseData) -> Self {
        Self {
            status: head.status,
            status_text: head.status_text,
            headers: head.headers,
            data,
        }
    }

    /// Deserialize a JSON payload into `T`.
    ///
    /// Returns `None` when the data is not JSON or does not match `T`.
    #[must_use]
    pub fn deserialize<T: DeserializeOwned>(&self) -> Option<T> {
        self.data
            .as_json()
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Deserialize, Debug, PartialEq)]
    struct Greeting {
        msg: String,
        to: String,
    }

    #[test]
    fn json_payload_deserializes() {
        let head = ResponseHead {
            status: 200,
            status_text: "OK".into(),
            headers: [("content-type", "application/json")].into_iter().collect(),
        };
        let resolved = ResolvedResponse::new(
            head,
            ResponseData::Json(serde_json::json!({"msg": "hello", "to": "friend"})),
        );
        let greeting: Option<Greeting> = resolved.deserialize();
        assert_eq!(
            greeting,
            Some(Greeting { msg: "hello".into(), to: "friend".into() })
        );
        assert_eq!(resolved.header("Content-Type"), Some("application/json"));
        assert!(resolved.data.as_text().is_none());
    }
}
