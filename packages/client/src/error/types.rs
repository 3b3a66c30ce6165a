use std::error::Error as StdError;
use std::fmt;

use crate::http::response::ResponseHead;

/// A Result alias where the Err case is `niupee_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// A tagged failure of one fired request.
///
/// Every failure produced by the engines and resolvers carries exactly one
/// [`ErrorTag`]. Failures that happen after the response head arrived also
/// carry that head, so callers can still inspect status and headers.
pub struct Error {
    pub(crate) inner: Box<Inner>,
}

pub(crate) struct Inner {
    pub(crate) tag: ErrorTag,
    pub(crate) source: Option<BoxError>,
    pub(crate) url: Option<url::Url>,
    pub(crate) response: Option<ResponseHead>,
    pub(crate) engine: Option<EngineKind>,
}

/// Which built-in engine produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    Xhr,
    Fetch,
}

/// The failure taxonomy shared by both transport engines and the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorTag {
    /// A header was rejected before anything was sent.
    NotSent,
    /// The XHR-style transport reported a network failure.
    NetworkError,
    /// The fetch-style transport obtained no response.
    FetchNetworkError,
    /// The XHR-style timeout elapsed.
    Timeout,
    /// The fetch-style transport obtained a response outside 200-299.
    FetchHttpError,
    ReadJsonError,
    ReadBlobError,
    ReadTextError,
    ReadArrayBufferError,
    /// The request was cancelled before it settled.
    Aborted,
    /// The request could not be built (for example an unparsable URL).
    Builder,
}

impl ErrorTag {
    /// The stable kebab-case name of this tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorTag::NotSent => "not-sent",
            ErrorTag::NetworkError => "network-error",
            ErrorTag::FetchNetworkError => "fetch-network-error",
            ErrorTag::Timeout => "timeout",
            ErrorTag::FetchHttpError => "fetch-http-error",
            ErrorTag::ReadJsonError => "read-json-error",
            ErrorTag::ReadBlobError => "read-blob-error",
            ErrorTag::ReadTextError => "read-text-error",
            ErrorTag::ReadArrayBufferError => "read-arraybuffer-error",
            ErrorTag::Aborted => "aborted",
            ErrorTag::Builder => "builder",
        }
    }
}

impl fmt::Display for ErrorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    pub(crate) fn new(tag: ErrorTag) -> Error {
        Error {
            inner: Box::new(Inner {
                tag,
                source: None,
                url: None,
                response: None,
                engine: None,
            }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub(crate) fn with<E: Into<BoxError>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    /// Attach the request URL to this error.
    #[must_use]
    pub fn with_url(mut self, url: url::Url) -> Self {
        self.inner.url = Some(url);
        self
    }

    #[must_use]
    pub(crate) fn with_engine(mut self, engine: EngineKind) -> Self {
        self.inner.engine = Some(engine);
        self
    }

    #[must_use]
    pub(crate) fn with_response(mut self, head: ResponseHead) -> Self {
        self.inner.response = Some(head);
        self
    }

    /// The tag classifying this failure.
    #[must_use]
    pub fn tag(&self) -> ErrorTag {
        self.inner.tag
    }

    /// The built-in engine that produced this error, if one did.
    #[must_use]
    pub fn engine(&self) -> Option<EngineKind> {
        self.inner.engine
    }

    /// Get the URL associated with this error, if any
    #[must_use]
    pub fn url(&self) -> Option<&url::Url> {
        self.inner.url.as_ref()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("niupee::Error");

        f.field("tag", &self.inner.tag);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref url) = self.inner.url {
            f.field("url", url);
        }

        if let Some(ref response) = self.inner.response {
            f.field("status", &response.status);
        }

        if let Some(engine) = self.inner.engine {
            f.field("engine", &engine);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.tag {
            ErrorTag::NotSent => f.write_str("request was not sent")?,
            ErrorTag::NetworkError => f.write_str("network error")?,
            ErrorTag::FetchNetworkError => f.write_str("fetch failed before a response was obtained")?,
            ErrorTag::Timeout => f.write_str("request timeout")?,
            ErrorTag::FetchHttpError => match self.inner.response {
                Some(ref head) => write!(f, "HTTP status {} {}", head.status, head.status_text)?,
                None => f.write_str("HTTP status error")?,
            },
            ErrorTag::ReadJsonError => f.write_str("error reading response body as json")?,
            ErrorTag::ReadBlobError => f.write_str("error reading response body as blob")?,
            ErrorTag::ReadTextError => f.write_str("error reading response body as text")?,
            ErrorTag::ReadArrayBufferError => {
                f.write_str("error reading response body as array buffer")?;
            }
            ErrorTag::Aborted => f.write_str("request aborted")?,
            ErrorTag::Builder => f.write_str("builder error")?,
        }

        if let Some(ref url) = self.inner.url {
            write!(f, " for url ({url})")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_render_kebab_case() {
        assert_eq!(ErrorTag::ReadArrayBufferError.as_str(), "read-arraybuffer-error");
        assert_eq!(ErrorTag::FetchNetworkError.to_string(), "fetch-network-error");
        assert_eq!(ErrorTag::NotSent.to_string(), "not-sent");
    }

    #[test]
    fn display_includes_url() {
        let url = url::Url::parse("http://example.com/a").unwrap();
        let err = Error::new(ErrorTag::Timeout).with_url(url);
        assert_eq!(err.to_string(), "request timeout for url (http://example.com/a)");
    }

    #[test]
    fn source_is_exposed() {
        let err = Error::new(ErrorTag::NetworkError).with(std::io::Error::other("reset"));
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("reset"));
    }
}
