//! # niupee client
//!
//! Cancellable request engines over two native transport models:
//!
//! - an event-driven `XMLHttpRequest`-style object ([`transport::XmlHttpRequest`])
//! - a future-based fetch-style transport ([`transport::FetchTransport`]) with
//!   an HTTP response cache implementing the six fetch cache directives
//!
//! Both are driven through the [`TransportEngine`] contract: a
//! [`RequestDescriptor`] goes in, a [`TransportResult`] (result future plus
//! idempotent [`CancelHandle`]) comes out. Native responses are normalized
//! by the [`resolver`] into a single [`ResolvedResponse`] shape.
//!
//! The built-in transports speak HTTP/1.1 through `hyper` on `tokio`, one
//! connection per request. A Tokio runtime must be running when a request
//! is fired through them.
//!
//! ```no_run
//! use niupee_client::prelude::*;
//!
//! # async fn run() -> niupee_client::Result<()> {
//! let url = Url::parse("https://example.com/api").map_err(niupee_client::error::builder)?;
//! let descriptor = RequestDescriptor::new(Method::GET, url, HeaderCollection::new(), RequestBody::Empty)
//!     .with_expected_type(ExpectedType::Json);
//! let response = FetchEngine::global().fire(descriptor).await?;
//! println!("{} {:?}", response.status, response.data.as_json());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

use std::sync::{Arc, OnceLock};

pub mod abort;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod header;
pub mod http;
pub mod resolver;
pub mod transport;

pub mod prelude;

pub use crate::prelude::*;

use crate::cache::{CachedFetch, ResponseCache};
use crate::config::{ConfigurationError, TransportConfig, Validator};
use crate::transport::{FetchTransport, HyperFetch, HyperXhr, XhrTransport};

/// The process-wide built-in transports.
pub struct Transports {
    pub xhr: Arc<dyn XhrTransport>,
    pub fetch: Arc<dyn FetchTransport>,
    /// The cache behind `fetch`, shared for inspection.
    pub cache: Arc<ResponseCache>,
}

impl Transports {
    fn build(config: &TransportConfig) -> Self {
        let cache = Arc::new(ResponseCache::new(config.cache.clone()));
        let fetch = CachedFetch::new(HyperFetch::new(config), Arc::clone(&cache));
        Self {
            xhr: Arc::new(HyperXhr::new(config)),
            fetch: Arc::new(fetch),
            cache,
        }
    }
}

impl std::fmt::Debug for Transports {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transports")
            .field("cache", &self.cache.size_info())
            .finish_non_exhaustive()
    }
}

static GLOBAL_TRANSPORTS: OnceLock<Transports> = OnceLock::new();

/// The global transports, built with [`TransportConfig::default`] unless
/// [`init_transports`] ran first.
pub fn global_transports() -> &'static Transports {
    GLOBAL_TRANSPORTS.get_or_init(|| Transports::build(&TransportConfig::default()))
}

/// Build the global transports from `config`.
///
/// # Errors
///
/// Returns the validation error if `config` is invalid, or
/// [`ConfigurationError::Conflict`] if the global transports already exist.
pub fn init_transports(config: TransportConfig) -> std::result::Result<(), ConfigurationError> {
    config.validate()?;
    GLOBAL_TRANSPORTS
        .set(Transports::build(&config))
        .map_err(|_| ConfigurationError::Conflict("global transports already initialized".to_string()))?;
    tracing::debug!(target: "niupee::transport", ?config, "global transports initialized");
    Ok(())
}
