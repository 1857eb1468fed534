pub mod checker;
pub mod error;
pub mod headers;
pub mod result;
pub mod route;

pub use checker::Checker;
pub use error::ScanError;
pub use headers::{HeaderSnapshot, NOT_SET, TRACKED_HEADERS};
pub use result::{RouteResult, RouteStatus};
pub use route::{RouteDescriptor, RouteType};
