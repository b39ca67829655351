//! Core type definitions: HTTP method, ordered header map, request and
//! response representations.
//!
//! Everything here is plain data. No entity outlives a single tool call and
//! nothing is shared between calls, so these types carry no interior
//! mutability and no locking.

pub mod headers;
pub mod method;
pub mod request;
pub mod response;

pub use headers::HeaderMap;
pub use method::Method;
pub use request::RequestSpec;
pub use response::ResponseReport;
