use super::collection::HeaderCollection;
use super::names::{common, request};
use super::suggest::{CacheControlSuggest, ContentDispositionSuggest, ContentEncodingSuggest, MimeType};

/// Named setters over an embedded [`HeaderCollection`].
///
/// Every setter is a single map-set keyed by the canonical header name, so
/// the last call for a given header wins. Implementors only provide access
/// to their collection.
///
/// ```
/// use niupee_client::header::{HeaderCollection, MimeType, RequestHeaderSetters};
///
/// let headers = HeaderCollection::new()
///     .accept_suggest(MimeType::Json)
///     .authorization("Bearer token");
/// assert_eq!(headers.get("accept"), Some("application/json"));
/// ```
pub trait RequestHeaderSetters: Sized {
    fn header_collection(&mut self) -> &mut HeaderCollection;

    /// Set an arbitrary header.
    #[must_use]
    fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.header_collection().set(name, value);
        self
    }

    /// Set every `(name, value)` pair, in order.
    #[must_use]
    fn request_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.header_collection().extend(headers);
        self
    }

    #[must_use]
    fn accept(self, value: impl Into<String>) -> Self {
        self.header(request::ACCEPT, value)
    }

    #[must_use]
    fn accept_suggest(self, value: MimeType) -> Self {
        self.accept(value.as_str())
    }

    #[must_use]
    fn accept_language(self, value: impl Into<String>) -> Self {
        self.header(request::ACCEPT_LANGUAGE, value)
    }

    #[must_use]
    fn authorization(self, value: impl Into<String>) -> Self {
        self.header(request::AUTHORIZATION, value)
    }

    #[must_use]
    fn forwarded(self, value: impl Into<String>) -> Self {
        self.header(request::FORWARDED, value)
    }

    #[must_use]
    fn if_match(self, value: impl Into<String>) -> Self {
        self.header(request::IF_MATCH, value)
    }

    #[must_use]
    fn if_modified_since(self, value: impl Into<String>) -> Self {
        self.header(request::IF_MODIFIED_SINCE, value)
    }

    #[must_use]
    fn if_none_match(self, value: impl Into<String>) -> Self {
        self.header(request::IF_NONE_MATCH, value)
    }

    #[must_use]
    fn if_range(self, value: impl Into<String>) -> Self {
        self.header(request::IF_RANGE, value)
    }

    #[must_use]
    fn if_unmodified_since(self, value: impl Into<String>) -> Self {
        self.header(request::IF_UNMODIFIED_SINCE, value)
    }

    #[must_use]
    fn max_forwards(self, value: impl Into<String>) -> Self {
        self.header(request::MAX_FORWARDS, value)
    }

    #[must_use]
    fn range(self, value: impl Into<String>) -> Self {
        self.header(request::RANGE, value)
    }

    #[must_use]
    fn user_agent(self, value: impl Into<String>) -> Self {
        self.header(request::USER_AGENT, value)
    }

    #[must_use]
    fn cache_control(self, value: impl Into<String>) -> Self {
        self.header(common::CACHE_CONTROL, value)
    }

    #[must_use]
    fn cache_control_suggest(self, value: CacheControlSuggest) -> Self {
        self.cache_control(value.as_str())
    }

    #[must_use]
    fn content_disposition(self, value: impl Into<String>) -> Self {
        self.header(common::CONTENT_DISPOSITION, value)
    }

    #[must_use]
    fn content_disposition_suggest(self, value: ContentDispositionSuggest) -> Self {
        self.content_disposition(value.as_str())
    }

    #[must_use]
    fn content_encoding(self, value: impl Into<String>) -> Self {
        self.header(common::CONTENT_ENCODING, value)
    }

    #[must_use]
    fn content_encoding_suggest(self, value: ContentEncodingSuggest) -> Self {
        self.content_encoding(value.as_str())
    }

    #[must_use]
    fn content_language(self, value: impl Into<String>) -> Self {
        self.header(common::CONTENT_LANGUAGE, value)
    }

    #[must_use]
    fn content_location(self, value: impl Into<String>) -> Self {
        self.header(common::CONTENT_LOCATION, value)
    }

    #[must_use]
    fn content_type(self, value: impl Into<String>) -> Self {
        self.header(common::CONTENT_TYPE, value)
    }

    #[must_use]
    fn content_type_suggest(self, value: MimeType) -> Self {
        self.content_type(value.as_str())
    }

    #[must_use]
    fn last_modified(self, value: impl Into<String>) -> Self {
        self.header(common::LAST_MODIFIED, value)
    }
}

impl RequestHeaderSetters for HeaderCollection {
    fn header_collection(&mut self) -> &mut HeaderCollection {
        self
    }
}
