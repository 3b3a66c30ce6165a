pub mod classification;
pub mod constructors;
pub mod resolver;
pub mod types;

pub use constructors::*;
pub use resolver::{ErrorResolver, report_errors};
pub use types::{EngineKind, Error, ErrorTag, Result};

pub(crate) use types::BoxError;
