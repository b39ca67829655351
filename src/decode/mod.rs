//! Permissive decoding of the string-encoded tool inputs.
//!
//! The callers of these tools are AI agents, which do not always produce
//! strictly well-formed input. Every decoder here therefore tries the rich
//! format first (a JSON object) and falls back to a plainer reading instead
//! of erroring. This permissiveness is deliberate; tightening it would
//! regress downstream agent integrations.

use serde_json::Value;
use thiserror::Error;

use crate::types::HeaderMap;

/// Errors from decoding structured tool arguments.
///
/// The decoders themselves never fail; the only reachable conditions are the
/// method enum boundary and a non-positive timeout.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("timeout must be positive, got {0}")]
    InvalidTimeout(f64),
}

/// Decode `params` into ordered query pairs.
///
/// Tries a JSON object first (scalar values are stringified); otherwise reads
/// `key=value&key2=value2` with percent-decoding. Empty input is an empty
/// list, never an error.
pub fn decode_query(input: &str) -> Vec<(String, String)> {
    let input = input.trim();
    if input.is_empty() {
        return Vec::new();
    }

    if let Some(pairs) = try_json_object(input) {
        return pairs;
    }

    // key=value&key2=value2, query-style: values are percent-decoded.
    // Bare tokens without "=" carry no pair and are dropped.
    input
        .split('&')
        .filter(|pair| pair.contains('='))
        .flat_map(|pair| url::form_urlencoded::parse(pair.as_bytes()))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .collect()
}

/// Decode `headers` into a [`HeaderMap`].
///
/// Accepted formats, tried in order: a JSON object, newline-separated
/// `Name: Value` lines (the shape produced by copying headers out of an
/// intercepting proxy), and `&`-joined `key=value` pairs with literal values.
pub fn decode_headers(input: &str) -> HeaderMap {
    let input = input.trim();
    if input.is_empty() {
        return HeaderMap::new();
    }

    if let Some(pairs) = try_json_object(input) {
        return pairs.into_iter().collect();
    }

    let mut map = HeaderMap::new();
    if input.contains(':') {
        for line in input.lines() {
            if let Some((name, value)) = line.split_once(':') {
                let name = name.trim();
                if !name.is_empty() {
                    map.insert(name, value.trim());
                }
            }
        }
    } else {
        // Header-style fallback: values stay literal, no percent-decoding.
        for pair in input.split('&') {
            if let Some((name, value)) = pair.split_once('=') {
                let name = name.trim();
                if !name.is_empty() {
                    map.insert(name, value.trim());
                }
            }
        }
    }
    map
}

/// Decode `body` into the bytes to send.
///
/// When `content_type` indicates JSON and the string parses, the canonical
/// re-serialization is forwarded so insignificant whitespace in the agent's
/// input never reaches the wire. In every other case the literal string is
/// used verbatim. JSON is attempted best-effort, never required.
pub fn decode_body(input: &str, content_type: &str) -> Option<bytes::Bytes> {
    if input.is_empty() {
        return None;
    }

    if content_type.to_ascii_lowercase().contains("json") {
        if let Ok(value) = serde_json::from_str::<Value>(input) {
            if let Ok(canonical) = serde_json::to_string(&value) {
                return Some(bytes::Bytes::from(canonical));
            }
        }
    }
    Some(bytes::Bytes::copy_from_slice(input.as_bytes()))
}

/// Parse the input as a JSON object of scalars, stringifying values the way
/// an agent would expect ("1" for 1, "true" for true, nested values as JSON).
fn try_json_object(input: &str) -> Option<Vec<(String, String)>> {
    let value: Value = serde_json::from_str(input).ok()?;
    let object = value.as_object()?;
    Some(
        object
            .iter()
            .map(|(k, v)| (k.clone(), scalar_to_string(v)))
            .collect(),
    )
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_from_json_object() {
        let pairs = decode_query(r#"{"page":"1","size":10}"#);
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "1".to_string()),
                ("size".to_string(), "10".to_string())
            ]
        );
    }

    #[test]
    fn query_from_pairs_fallback() {
        let pairs = decode_query("a=1&b=hello%20world");
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "hello world".to_string())
            ]
        );
    }

    #[test]
    fn bare_tokens_without_equals_are_dropped() {
        assert!(decode_query("abc").is_empty());
        let pairs = decode_query("a=1&junk&b=2");
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn empty_inputs_never_error() {
        assert!(decode_query("").is_empty());
        assert!(decode_query("   ").is_empty());
        assert!(decode_headers("").is_empty());
        assert!(decode_body("", "application/json").is_none());
    }

    #[test]
    fn headers_from_json_object() {
        let h = decode_headers(r#"{"Authorization":"Bearer xyz"}"#);
        assert_eq!(h.get("authorization"), Some("Bearer xyz"));
    }

    #[test]
    fn headers_from_colon_lines() {
        let h = decode_headers("Authorization: Bearer xyz\nX-Trace: a:b:c");
        assert_eq!(h.get("Authorization"), Some("Bearer xyz"));
        // Only the first colon splits name from value.
        assert_eq!(h.get("X-Trace"), Some("a:b:c"));
    }

    #[test]
    fn headers_from_ampersand_pairs_stay_literal() {
        let h = decode_headers("X-A=1&X-B=a%20b");
        assert_eq!(h.get("X-A"), Some("1"));
        assert_eq!(h.get("X-B"), Some("a%20b"));
    }

    #[test]
    fn json_body_is_canonicalized() {
        let body = decode_body("{ \"a\" : 1 }", "application/json").unwrap();
        assert_eq!(&body[..], br#"{"a":1}"#);
    }

    #[test]
    fn non_json_body_is_verbatim() {
        let body = decode_body("name=test&age=18", "application/x-www-form-urlencoded").unwrap();
        assert_eq!(&body[..], b"name=test&age=18");
        // Declared JSON but unparsable: falls back to verbatim, never errors.
        let body = decode_body("not json", "application/json").unwrap();
        assert_eq!(&body[..], b"not json");
    }
}
