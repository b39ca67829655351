//! Outbound HTTP transport.
//!
//! The core delegates connection handling, TLS, redirects, and timeout
//! enforcement to reqwest behind the [`HttpCapability`] trait, so tests can
//! substitute a canned transport and the tool layer never touches a client
//! directly.

pub mod http;

pub use http::{HttpCapability, ReqwestTransport, TransportError};
