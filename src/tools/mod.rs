//! The two tool operations and their wire declarations.
//!
//! Each operation takes named arguments (delivered as a JSON object by the
//! hosting protocol) and returns a single text string. Failures are reported
//! **in-band** as readable text naming the stage and reason; no error kind
//! escapes to the hosting runtime, because the consuming agent expects a text
//! response either way.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use crate::decode::{decode_body, decode_headers, decode_query, DecodeError};
use crate::raw::{parse_raw_request, resolve_url};
use crate::report::format_report;
use crate::transport::{HttpCapability, ReqwestTransport};
use crate::types::{Method, RequestSpec};

/// A tool as advertised to the hosting protocol: name, description, and a
/// JSON Schema for its input object.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Arguments for the `http_request` operation.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpRequestArgs {
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub params: String,
    #[serde(default)]
    pub headers: String,
    #[serde(default)]
    pub body: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    #[serde(default = "default_timeout")]
    pub timeout: f64,
    #[serde(default = "default_true")]
    pub follow_redirects: bool,
    #[serde(default = "default_true")]
    pub verify_ssl: bool,
    #[serde(default = "default_true")]
    pub include_headers: bool,
}

/// Arguments for the `http_raw` operation.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpRawArgs {
    pub raw_request: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_true")]
    pub verify_ssl: bool,
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_content_type() -> String {
    "application/json".to_string()
}

fn default_timeout() -> f64 {
    30.0
}

fn default_true() -> bool {
    true
}

/// Send a fully-specified HTTP request and return the formatted report.
pub async fn http_request(transport: &dyn HttpCapability, args: HttpRequestArgs) -> String {
    match run_http_request(transport, args).await {
        Ok(report) => report,
        Err(err) => err.to_string(),
    }
}

async fn run_http_request(
    transport: &dyn HttpCapability,
    args: HttpRequestArgs,
) -> crate::Result<String> {
    let method: Method = args.method.parse()?;
    if args.timeout <= 0.0 || !args.timeout.is_finite() {
        return Err(DecodeError::InvalidTimeout(args.timeout).into());
    }

    let query = decode_query(&args.params);
    let mut headers = decode_headers(&args.headers);
    let body = decode_body(&args.body, &args.content_type);

    // Same convenience the agent-facing contract documents: a body without an
    // explicit Content-Type header gets the content_type argument.
    if body.is_some() && !headers.contains("content-type") {
        headers.insert("Content-Type", args.content_type.clone());
    }

    let spec = RequestSpec {
        method,
        url: args.url,
        query,
        headers,
        body,
        timeout: Duration::from_secs_f64(args.timeout),
        follow_redirects: args.follow_redirects,
        verify_tls: args.verify_ssl,
    };

    let report = transport.execute(&spec).await?;
    Ok(format_report(&report, args.include_headers))
}

/// Parse a raw request blob, execute it, and return the formatted report.
pub async fn http_raw(transport: &dyn HttpCapability, args: HttpRawArgs) -> String {
    match run_http_raw(transport, args).await {
        Ok(report) => report,
        Err(err) => err.to_string(),
    }
}

async fn run_http_raw(transport: &dyn HttpCapability, args: HttpRawArgs) -> crate::Result<String> {
    let parsed = parse_raw_request(&args.raw_request)?;
    let url = resolve_url(&parsed, args.base_url.as_deref())?;

    let mut headers = parsed.headers;
    // The client derives Host from the resolved URL and recomputes
    // Content-Length for the actual body; forwarding captured values would
    // send conflicting ones after base_url rewriting.
    headers.remove("host");
    headers.remove("content-length");

    let spec = RequestSpec {
        method: parsed.method,
        url,
        query: Vec::new(),
        headers,
        body: parsed.body.map(Bytes::from),
        timeout: ReqwestTransport::default_timeout(),
        follow_redirects: true,
        verify_tls: args.verify_ssl,
    };

    let report = transport.execute(&spec).await?;
    Ok(format_report(&report, true))
}

/// Dispatch a tool call by name. Unknown tools and malformed arguments are
/// answered in-band, like every other failure.
pub async fn call_tool(transport: &dyn HttpCapability, name: &str, arguments: Value) -> String {
    tracing::info!(tool = name, "tool call");
    match name {
        "http_request" => match serde_json::from_value::<HttpRequestArgs>(arguments) {
            Ok(args) => http_request(transport, args).await,
            Err(err) => format!("Invalid arguments for http_request: {}", err),
        },
        "http_raw" => match serde_json::from_value::<HttpRawArgs>(arguments) {
            Ok(args) => http_raw(transport, args).await,
            Err(err) => format!("Invalid arguments for http_raw: {}", err),
        },
        other => format!("Unknown tool: {}", other),
    }
}

/// The tool declarations advertised through `tools/list`.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "http_request".to_string(),
            description: "Send an HTTP request to the specified URL. Supports all common HTTP methods (GET/POST/PUT/DELETE/PATCH, etc.).

Usage examples:
- GET request: method=\"GET\", url=\"https://api.example.com/users\"
- GET with params: method=\"GET\", url=\"...\", params='{\"page\":\"1\",\"size\":\"10\"}'
- POST JSON: method=\"POST\", url=\"...\", body='{\"key\":\"value\"}'
- Custom headers: headers='{\"Authorization\":\"Bearer xxx\"}'
- Form submit: body=\"name=test&age=18\", content_type=\"application/x-www-form-urlencoded\""
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "Full URL for the request"
                    },
                    "method": {
                        "type": "string",
                        "description": "HTTP method",
                        "enum": ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"],
                        "default": "GET"
                    },
                    "params": {
                        "type": "string",
                        "description": "URL query parameters, JSON object or key=value&key2=value2"
                    },
                    "headers": {
                        "type": "string",
                        "description": "Request headers, JSON object, e.g. {\"Authorization\": \"Bearer xxx\"}"
                    },
                    "body": {
                        "type": "string",
                        "description": "Request body: JSON string, form data, or raw text"
                    },
                    "content_type": {
                        "type": "string",
                        "description": "Content-Type, e.g. application/json, application/x-www-form-urlencoded",
                        "default": "application/json"
                    },
                    "timeout": {
                        "type": "number",
                        "description": "Request timeout in seconds",
                        "default": 30
                    },
                    "follow_redirects": {
                        "type": "boolean",
                        "description": "Whether to follow redirects",
                        "default": true
                    },
                    "verify_ssl": {
                        "type": "boolean",
                        "description": "Whether to verify the TLS certificate",
                        "default": true
                    },
                    "include_headers": {
                        "type": "boolean",
                        "description": "Whether to include response headers in the output",
                        "default": true
                    }
                },
                "required": ["url"]
            }),
        },
        ToolDefinition {
            name: "http_raw".to_string(),
            description: "Send a raw HTTP request. Paste a request captured by Burp Suite or another intercepting proxy directly.

Raw request format example:
POST /api/login HTTP/1.1
Host: example.com
Content-Type: application/json

{\"username\":\"admin\",\"password\":\"123\"}"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "raw_request": {
                        "type": "string",
                        "description": "Raw HTTP request text (request line, headers, blank line, body)"
                    },
                    "base_url": {
                        "type": "string",
                        "description": "Base URL used when the raw request has a relative target, e.g. https://example.com"
                    },
                    "verify_ssl": {
                        "type": "boolean",
                        "description": "Whether to verify the TLS certificate",
                        "default": true
                    }
                },
                "required": ["raw_request"]
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;
    use crate::types::ResponseReport;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Canned transport that records the spec it was handed.
    struct RecordingTransport {
        seen: Mutex<Option<RequestSpec>>,
    }

    impl RecordingTransport {
        fn new() -> Self {
            Self {
                seen: Mutex::new(None),
            }
        }

        fn taken(&self) -> RequestSpec {
            self.seen.lock().unwrap().clone().unwrap()
        }
    }

    #[async_trait]
    impl HttpCapability for RecordingTransport {
        async fn execute(&self, spec: &RequestSpec) -> Result<ResponseReport, TransportError> {
            *self.seen.lock().unwrap() = Some(spec.clone());
            Ok(ResponseReport {
                http_version: "1.1".to_string(),
                status_code: 200,
                status_text: "OK".to_string(),
                headers: vec![],
                body: Bytes::from_static(b"ok"),
                elapsed: Duration::from_millis(5),
            })
        }
    }

    #[tokio::test]
    async fn unsupported_method_is_reported_in_band() {
        let transport = RecordingTransport::new();
        let args: HttpRequestArgs = serde_json::from_value(json!({
            "url": "https://h.test/",
            "method": "BREW"
        }))
        .unwrap();
        let text = http_request(&transport, args).await;
        assert!(text.contains("unsupported HTTP method: BREW"), "{}", text);
        assert!(transport.seen.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn content_type_header_is_set_for_bodies() {
        let transport = RecordingTransport::new();
        let args: HttpRequestArgs = serde_json::from_value(json!({
            "url": "https://h.test/",
            "method": "POST",
            "body": "{\"a\":1}"
        }))
        .unwrap();
        http_request(&transport, args).await;
        let spec = transport.taken();
        assert_eq!(spec.headers.get("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn explicit_content_type_header_wins() {
        let transport = RecordingTransport::new();
        let args: HttpRequestArgs = serde_json::from_value(json!({
            "url": "https://h.test/",
            "method": "POST",
            "headers": "{\"Content-Type\":\"text/plain\"}",
            "body": "raw"
        }))
        .unwrap();
        http_request(&transport, args).await;
        let spec = transport.taken();
        assert_eq!(spec.headers.get("content-type"), Some("text/plain"));
    }

    #[tokio::test]
    async fn raw_call_resolves_and_strips_host() {
        let transport = RecordingTransport::new();
        let args = HttpRawArgs {
            raw_request: "POST /x HTTP/1.1\nHost: h.test\nX-Keep: 1\n\n{\"a\":1}".to_string(),
            base_url: None,
            verify_ssl: true,
        };
        http_raw(&transport, args).await;
        let spec = transport.taken();
        assert_eq!(spec.method, Method::Post);
        assert_eq!(spec.url, "https://h.test/x");
        assert_eq!(spec.headers.get("host"), None);
        assert_eq!(spec.headers.get("X-Keep"), Some("1"));
        assert_eq!(spec.body.as_deref(), Some(&b"{\"a\":1}"[..]));
    }

    #[tokio::test]
    async fn raw_parse_failure_names_stage_and_reason() {
        let transport = RecordingTransport::new();
        let args = HttpRawArgs {
            raw_request: "GET /x HTTP/1.1\nX-No-Host: 1\n".to_string(),
            base_url: None,
            verify_ssl: true,
        };
        let text = http_raw(&transport, args).await;
        assert!(text.starts_with("Failed to parse raw request:"), "{}", text);
        assert!(text.contains("missing Host header and no base_url provided"));
    }

    #[tokio::test]
    async fn unknown_tool_is_answered_in_band() {
        let transport = RecordingTransport::new();
        let text = call_tool(&transport, "http_teleport", json!({})).await;
        assert_eq!(text, "Unknown tool: http_teleport");
    }

    #[test]
    fn definitions_cover_both_tools() {
        let defs = tool_definitions();
        let names: Vec<&str> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["http_request", "http_raw"]);
        for def in &defs {
            assert_eq!(def.input_schema["type"], "object");
        }
        assert_eq!(defs[0].input_schema["required"][0], "url");
        assert_eq!(defs[1].input_schema["required"][0], "raw_request");
    }
}
