//! The types most callers need.

pub use crate::abort::{AbortController, AbortSignal, CancelHandle};
pub use crate::config::TransportConfig;
pub use crate::engine::{FetchEngine, ResponseFuture, TransportEngine, TransportResult, XhrEngine};
pub use crate::error::{EngineKind, Error, ErrorResolver, ErrorTag, Result, report_errors};
pub use crate::header::{HeaderCollection, RequestHeaderSetters};
pub use crate::http::{
    Blob, CacheDirective, CredentialsMode, ExpectedType, FetchOptions, IntoUrl, ProgressEvent,
    ProgressListeners, RedirectMode, ReferrerPolicy, RequestBody, RequestDescriptor, RequestMode,
    ResolvedResponse, ResponseData,
};

pub use ::http::{Method, StatusCode};
pub use url::Url;
