//! Native transport primitives and their built-in implementations.

pub mod connector;
pub mod fetch;
pub mod hyper_fetch;
pub mod hyper_xhr;
pub mod memory;
pub mod xhr;

pub use connector::Connector;
pub use fetch::{FetchFailure, FetchRequest, FetchResponse, FetchTransport};
pub use hyper_fetch::HyperFetch;
pub use hyper_xhr::HyperXhr;
pub use memory::{MemoryResponse, MemoryTransport, RecordedRequest};
pub use xhr::{
    HeaderRejected, ReadyState, ReadyStateCell, XhrConnection, XhrDispatch, XhrEvent, XhrEventSink,
    XhrOutcome, XhrResponse, XhrTransport, XmlHttpRequest, guard,
};
