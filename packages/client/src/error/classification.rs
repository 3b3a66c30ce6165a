use super::types::{Error, ErrorTag};
use crate::http::response::ResponseHead;

impl Error {
    /// Returns true if the request could not be built.
    #[must_use]
    pub fn is_builder(&self) -> bool {
        matches!(self.inner.tag, ErrorTag::Builder)
    }

    /// Returns true if a header was rejected and nothing was sent.
    #[must_use]
    pub fn is_not_sent(&self) -> bool {
        matches!(self.inner.tag, ErrorTag::NotSent)
    }

    /// Returns true if the XHR-style timeout elapsed.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self.inner.tag, ErrorTag::Timeout)
    }

    /// Returns true if the request was cancelled.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(self.inner.tag, ErrorTag::Aborted)
    }

    /// Returns true if no response was obtained from either transport.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(
            self.inner.tag,
            ErrorTag::NetworkError | ErrorTag::FetchNetworkError
        )
    }

    /// Returns true if a response arrived with a status outside 200-299.
    #[must_use]
    pub fn is_http(&self) -> bool {
        matches!(self.inner.tag, ErrorTag::FetchHttpError)
    }

    /// Returns true if the response body could not be read as the expected type.
    #[must_use]
    pub fn is_read(&self) -> bool {
        matches!(
            self.inner.tag,
            ErrorTag::ReadJsonError
                | ErrorTag::ReadBlobError
                | ErrorTag::ReadTextError
                | ErrorTag::ReadArrayBufferError
        )
    }

    /// The response status, when the failure happened after the head arrived.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.inner.response.as_ref().map(|head| head.status)
    }

    /// The already-known response head, if any.
    #[must_use]
    pub fn response_head(&self) -> Option<&ResponseHead> {
        self.inner.response.as_ref()
    }
}
