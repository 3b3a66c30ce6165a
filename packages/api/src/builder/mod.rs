//! Staged request builder
//!
//! A request moves through three stages, each a distinct type so only the
//! operations legal at that point are available:
//!
//! 1. [`UrlStage`]: edit the query string
//! 2. [`HeaderStage`]: set request headers
//! 3. a transport configuration stage ([`XhrFireStage`], [`FetchFireStage`]
//!    or [`EngineFireStage`]) whose `fire()` hands the request to an engine
//!
//! Every transition consumes the previous stage.

pub mod core;
pub mod custom;
pub mod fetch;
pub mod headers;
pub mod url;
pub mod xhr;

pub use self::core::PreparedRequest;
pub use self::custom::EngineFireStage;
pub use self::fetch::{FetchFireStage, FetchStageOptions};
pub use self::headers::HeaderStage;
pub use self::url::UrlStage;
pub use self::xhr::{XhrFireStage, XhrOptions};
