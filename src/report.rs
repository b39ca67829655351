//! Textual rendering of a completed HTTP exchange.
//!
//! The layout is a contract consumed by the calling agent: status line,
//! optional header block, body block, then timing and size. Section markers
//! and field formats must stay byte-stable across releases.

use crate::types::ResponseReport;

/// Render a [`ResponseReport`] into the fixed report format.
///
/// The body is reproduced verbatim. A body that is not valid UTF-8 is
/// replaced by a placeholder naming its byte length rather than corrupting
/// the output with mangled text.
pub fn format_report(report: &ResponseReport, include_headers: bool) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(format!(
        "HTTP/{} {} {}",
        report.http_version, report.status_code, report.status_text
    ));
    parts.push(String::new());

    if include_headers {
        parts.push("=== Response Headers ===".to_string());
        for (name, value) in &report.headers {
            parts.push(format!("{}: {}", name, value));
        }
        parts.push(String::new());
    }

    parts.push("=== Response Body ===".to_string());
    match report.body_text() {
        Some(text) => parts.push(text.to_string()),
        None => parts.push(format!("<binary body: {} bytes>", report.byte_size())),
    }

    parts.push(String::new());
    parts.push("=== Request Info ===".to_string());
    parts.push(format!("Time: {:.3}s", report.elapsed.as_secs_f64()));
    parts.push(format!("Size: {} bytes", report.byte_size()));

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::time::Duration;

    fn sample() -> ResponseReport {
        ResponseReport {
            http_version: "1.1".to_string(),
            status_code: 200,
            status_text: "OK".to_string(),
            headers: vec![
                ("content-type".to_string(), "text/plain".to_string()),
                ("x-served-by".to_string(), "edge-1".to_string()),
            ],
            body: Bytes::from_static(b"hello"),
            elapsed: Duration::from_millis(1234),
        }
    }

    #[test]
    fn full_report_layout() {
        let text = format_report(&sample(), true);
        assert_eq!(
            text,
            "HTTP/1.1 200 OK\n\
             \n\
             === Response Headers ===\n\
             content-type: text/plain\n\
             x-served-by: edge-1\n\
             \n\
             === Response Body ===\n\
             hello\n\
             \n\
             === Request Info ===\n\
             Time: 1.234s\n\
             Size: 5 bytes"
        );
    }

    #[test]
    fn headers_block_is_optional() {
        let text = format_report(&sample(), false);
        assert!(!text.contains("=== Response Headers ==="));
        assert!(text.contains("=== Response Body ==="));
    }

    #[test]
    fn binary_body_gets_a_placeholder() {
        let mut report = sample();
        report.body = Bytes::from_static(&[0xff, 0xfe, 0x00, 0x80]);
        let text = format_report(&report, false);
        assert!(text.contains("<binary body: 4 bytes>"));
        assert!(text.contains("Size: 4 bytes"));
    }

    #[test]
    fn elapsed_has_three_decimals() {
        let mut report = sample();
        report.elapsed = Duration::from_micros(7);
        let text = format_report(&report, false);
        assert!(text.contains("Time: 0.000s"));
    }
}
