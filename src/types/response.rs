use std::time::Duration;

use bytes::Bytes;

/// Everything captured from one HTTP exchange, immutable after construction.
///
/// Produced once per call by the transport and consumed by
/// [`crate::report::format_report`]; nothing is persisted across calls.
#[derive(Debug, Clone)]
pub struct ResponseReport {
    /// Protocol version as reported by the client, e.g. "1.1" or "2".
    pub http_version: String,
    pub status_code: u16,
    /// Canonical reason phrase; empty for unregistered status codes.
    pub status_text: String,
    /// Response headers in received order. Duplicates are kept as-is here
    /// since the report prints them verbatim.
    pub headers: Vec<(String, String)>,
    /// Raw body bytes. Text decoding is deferred to the formatter.
    pub body: Bytes,
    /// Wall-clock time from sending the request to draining the body.
    pub elapsed: Duration,
}

impl ResponseReport {
    pub fn byte_size(&self) -> usize {
        self.body.len()
    }

    /// Best-effort body text. `None` when the body is not valid UTF-8.
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}
