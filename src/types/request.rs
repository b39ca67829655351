use std::time::Duration;

use bytes::Bytes;

use crate::types::{HeaderMap, Method};

/// A fully assembled outbound request, ready for the transport layer.
///
/// Invariant: `url` is absolute by the time a spec reaches
/// [`crate::transport::HttpCapability::execute`]. The structured tool builds
/// it from a caller-supplied absolute URL; the raw tool builds it through
/// [`crate::raw::resolve_url`], which fails rather than emit a relative URL.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub url: String,
    /// Query pairs appended to the URL, in the order they were decoded.
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    pub timeout: Duration,
    pub follow_redirects: bool,
    pub verify_tls: bool,
}
