//! State shared by every transport configuration stage

use std::sync::Arc;

use http::Method;
use niupee_client::engine::{TransportEngine, TransportResult};
use niupee_client::error::report_errors;
use niupee_client::header::HeaderCollection;
use niupee_client::http::{RequestBody, RequestDescriptor};
use url::Url;

/// Method, URL, headers and body, fixed once the header stage is left.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) headers: HeaderCollection,
    pub(crate) body: RequestBody,
    pub(crate) debug_enabled: bool,
}

impl PreparedRequest {
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderCollection {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Start a descriptor from the fixed parts; stages add their options.
    pub(crate) fn into_descriptor(self) -> (RequestDescriptor, bool) {
        let debug_enabled = self.debug_enabled;
        let descriptor = RequestDescriptor::new(self.method, self.url, self.headers, self.body);
        (descriptor, debug_enabled)
    }
}

/// Fire `descriptor` through `engine`, reporting any failure on the way out.
pub(crate) fn fire_with(
    engine: &Arc<dyn TransportEngine>,
    descriptor: RequestDescriptor,
    debug_enabled: bool,
    transport: &'static str,
) -> TransportResult {
    if debug_enabled {
        log::debug!(
            "niupee: {} {} via {transport} ({} headers, expect {})",
            descriptor.method(),
            descriptor.url(),
            descriptor.headers().len(),
            descriptor.expected_type().as_str()
        );
    }
    engine.fire(descriptor).map_result(report_errors)
}
