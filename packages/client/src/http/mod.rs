//! Request and response data model.

pub mod body;
pub mod descriptor;
pub mod into_url;
pub mod query;
pub mod response;

pub use body::{BodyReadError, RequestBody, ResponseBody};
pub use descriptor::{
    CacheDirective, CredentialsMode, DescriptorParts, ExpectedType, FetchOptions, ProgressCallback,
    ProgressEvent, ProgressListeners, RedirectMode, ReferrerPolicy, RequestDescriptor, RequestMode,
};
pub use into_url::IntoUrl;
pub use query::{QueryParameterList, canonical_url};
pub use response::{Blob, ResolvedResponse, ResponseData, ResponseHead};
