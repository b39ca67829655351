//! # httpkit-mcp
//!
//! An MCP tool server for HTTP request testing. It exposes two tools to a
//! calling agent:
//!
//! - **`http_request`** — send a fully-specified HTTP request (method, URL,
//!   params, headers, body, content type, timeout, redirect/TLS policy) and
//!   get back a formatted textual report.
//! - **`http_raw`** — paste a raw HTTP request captured by an intercepting
//!   proxy (Burp Suite style), have it parsed, resolved against an optional
//!   base URL, executed, and reported the same way.
//!
//! ## Design
//!
//! Every tool invocation is an independent, stateless unit of work: nothing
//! is shared between calls, there is no history, no cookie jar, no retries,
//! and no caching. Inputs are decoded permissively (JSON first, plainer
//! formats as fallback) because the caller is an AI agent that does not
//! always produce strictly well-formed input. Failures are returned in-band
//! as readable text, never as protocol-level faults.
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Method enum, ordered header map, request/response data |
//! | [`decode`] | Permissive decoding of string-encoded tool inputs |
//! | [`raw`] | Raw HTTP request text parsing and URL resolution |
//! | [`transport`] | Outbound HTTP execution behind a capability trait |
//! | [`report`] | Fixed-format textual response reports |
//! | [`tools`] | The two tool operations and their wire declarations |
//! | [`server`] | JSON-RPC 2.0 stdio loop |

pub mod decode;
pub mod raw;
pub mod report;
pub mod server;
pub mod tools;
pub mod transport;
pub mod types;

pub mod error;
pub use error::Error;

// Re-export the working set for convenience
pub use raw::{parse_raw_request, resolve_url, ParsedRawRequest};
pub use report::format_report;
pub use tools::{call_tool, http_raw, http_request, HttpRawArgs, HttpRequestArgs};
pub use transport::{HttpCapability, ReqwestTransport};
pub use types::{HeaderMap, Method, RequestSpec, ResponseReport};

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;
