use super::types::{BoxError, Error, ErrorTag};
use crate::http::descriptor::ExpectedType;
use crate::http::response::ResponseHead;

/// Creates an `Error` for a builder error.
pub fn builder<E: Into<BoxError>>(e: E) -> Error {
    Error::new(ErrorTag::Builder).with(e.into())
}

/// Creates an `Error` for a header rejected before sending.
pub fn not_sent<E: Into<BoxError>>(e: E) -> Error {
    Error::new(ErrorTag::NotSent).with(e.into())
}

/// Creates an `Error` for an XHR-style network failure.
pub fn network<E: Into<BoxError>>(e: E) -> Error {
    Error::new(ErrorTag::NetworkError).with(e.into())
}

/// Creates an `Error` for a fetch-style failure with no response.
pub fn fetch_network<E: Into<BoxError>>(e: E) -> Error {
    Error::new(ErrorTag::FetchNetworkError).with(e.into())
}

pub fn timeout() -> Error {
    Error::new(ErrorTag::Timeout)
}

pub fn aborted() -> Error {
    Error::new(ErrorTag::Aborted)
}

/// Creates an `Error` for a fetch-style response outside 200-299.
pub fn fetch_http(head: ResponseHead) -> Error {
    Error::new(ErrorTag::FetchHttpError).with_response(head)
}

/// Creates the read error matching the accessor that failed.
pub fn read<E: Into<BoxError>>(expected: ExpectedType, head: ResponseHead, e: E) -> Error {
    let tag = match expected {
        ExpectedType::Json => ErrorTag::ReadJsonError,
        ExpectedType::Blob => ErrorTag::ReadBlobError,
        ExpectedType::Text => ErrorTag::ReadTextError,
        ExpectedType::ArrayBuffer => ErrorTag::ReadArrayBufferError,
    };
    Error::new(tag).with(e.into()).with_response(head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HeaderCollection;

    fn head(status: u16) -> ResponseHead {
        ResponseHead {
            status,
            status_text: "Teapot".to_string(),
            headers: HeaderCollection::new(),
        }
    }

    #[test]
    fn read_errors_follow_expected_type() {
        let cases = [
            (ExpectedType::Json, ErrorTag::ReadJsonError),
            (ExpectedType::Blob, ErrorTag::ReadBlobError),
            (ExpectedType::Text, ErrorTag::ReadTextError),
            (ExpectedType::ArrayBuffer, ErrorTag::ReadArrayBufferError),
        ];
        for (expected, tag) in cases {
            let err = read(expected, head(200), "broken");
            assert_eq!(err.tag(), tag);
            assert!(err.is_read());
            assert_eq!(err.status(), Some(200));
        }
    }

    #[test]
    fn http_error_carries_head() {
        let err = fetch_http(head(418));
        assert!(err.is_http());
        assert_eq!(err.status(), Some(418));
        assert_eq!(err.response_head().map(|h| h.status_text.as_str()), Some("Teapot"));
        assert_eq!(err.to_string(), "HTTP status 418 Teapot");
    }
}
