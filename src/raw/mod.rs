//! Raw HTTP request parsing.
//!
//! Turns a pasted request blob (the literal request-line + headers + blank
//! line + body text, typically captured by an intercepting proxy) into a
//! well-formed outbound request. The input is whatever a tool or agent
//! produced: CRLF or LF line endings, stray surrounding whitespace, folded
//! header values, a relative target with or without a `Host` header.

use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::types::{HeaderMap, Method};

/// What went wrong while parsing raw request text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("raw request is empty")]
    EmptyInput,

    #[error("malformed request line: {0:?} (expected \"METHOD TARGET HTTP-VERSION\")")]
    MalformedRequestLine(String),

    #[error("malformed header line: {0:?} (expected \"Name: Value\")")]
    MalformedHeaderLine(String),

    #[error("cannot resolve a relative target: missing Host header and no base_url provided")]
    NoHostAvailable,
}

/// The intermediate result of parsing raw request text.
///
/// Constructed once per `http_raw` call, merged into a
/// [`crate::types::RequestSpec`], then discarded. Duplicate header names are
/// last-wins (see [`HeaderMap`]).
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRawRequest {
    pub method: Method,
    /// The request target exactly as written: absolute URI or a path.
    pub target: String,
    /// Version token from the request line, recorded but never validated so
    /// future versions parse cleanly.
    pub http_version: String,
    pub headers: HeaderMap,
    /// Body text verbatim, including embedded blank lines. `None` when the
    /// request has no blank-line separator or nothing follows it.
    pub body: Option<String>,
}

/// Parse raw HTTP request text into its parts.
pub fn parse_raw_request(raw: &str) -> Result<ParsedRawRequest, ParseError> {
    if raw.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let normalized = raw.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    // Skip blank lines before the request line; callers paste with leading
    // newlines often enough that rejecting them helps nobody.
    let mut idx = 0;
    while idx < lines.len() && lines[idx].trim().is_empty() {
        idx += 1;
    }

    let request_line = lines[idx].trim();
    let (method, target, http_version) = parse_request_line(request_line)?;
    idx += 1;

    let mut headers = HeaderMap::new();
    let mut body_start = None;
    while idx < lines.len() {
        let line = lines[idx];
        idx += 1;
        if line.trim().is_empty() {
            body_start = Some(idx);
            break;
        }
        if (line.starts_with(' ') || line.starts_with('\t')) && !headers.is_empty() {
            // Legacy folding: the continuation extends the previous value,
            // joined by a single space.
            headers.append_to_last(line.trim());
            continue;
        }
        match line.split_once(':') {
            Some((name, value)) => headers.insert(name.trim(), value.trim()),
            None => return Err(ParseError::MalformedHeaderLine(line.trim().to_string())),
        }
    }

    // Everything strictly after the first blank line, verbatim.
    let body = body_start.and_then(|start| {
        if start >= lines.len() {
            return None;
        }
        let text = lines[start..].join("\n");
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    });

    Ok(ParsedRawRequest {
        method,
        target,
        http_version,
        headers,
        body,
    })
}

fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(ParseError::MalformedRequestLine(line.to_string()));
    }
    let method = Method::from_str(tokens[0])
        .map_err(|_| ParseError::MalformedRequestLine(line.to_string()))?;
    Ok((method, tokens[1].to_string(), tokens[2].to_string()))
}

/// Resolve the absolute URL for a parsed request.
///
/// Priority order: an absolute target is used directly; otherwise an explicit
/// `base_url` is joined with the target path; otherwise the `Host` header is
/// combined with an inferred scheme. The inferred scheme is `https` unless
/// the host carries an explicit `:80` port. A relative target with neither
/// source fails with [`ParseError::NoHostAvailable`].
pub fn resolve_url(parsed: &ParsedRawRequest, base_url: Option<&str>) -> Result<String, ParseError> {
    if is_absolute(&parsed.target) {
        return Ok(parsed.target.clone());
    }

    let path = ensure_leading_slash(&parsed.target);

    if let Some(base) = base_url.map(str::trim).filter(|b| !b.is_empty()) {
        // Concatenate rather than Url::join so a path prefix in the base
        // ("https://example.com/api") survives.
        return Ok(format!("{}{}", base.trim_end_matches('/'), path));
    }

    match parsed.headers.get("host").map(str::trim).filter(|h| !h.is_empty()) {
        Some(host) => {
            let scheme = if host.ends_with(":80") { "http" } else { "https" };
            Ok(format!("{}://{}{}", scheme, host, path))
        }
        None => Err(ParseError::NoHostAvailable),
    }
}

fn is_absolute(target: &str) -> bool {
    // Only http(s) counts. Url::parse alone would also accept "host:8080",
    // reading the host as a scheme.
    Url::parse(target)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

fn ensure_leading_slash(target: &str) -> String {
    if target.is_empty() {
        "/".to_string()
    } else if target.starts_with('/') {
        target.to_string()
    } else {
        format!("/{}", target)
    }
}
