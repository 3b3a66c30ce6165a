//! Request header collection, canonical names and advisory header sets.

pub mod collection;
pub mod cors;
pub mod names;
pub mod setters;
pub mod suggest;

pub use collection::HeaderCollection;
pub use cors::{
    cors_response_headers, cors_safelisted_request_headers, forbidden_headers,
    forbidden_request_headers, forbidden_response_headers, is_cors_response_header,
    is_cors_safelisted_request_header, is_forbidden_request_header,
};
pub use setters::RequestHeaderSetters;
pub use suggest::{CacheControlSuggest, ContentDispositionSuggest, ContentEncodingSuggest, MimeType};
