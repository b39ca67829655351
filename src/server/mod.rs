//! MCP stdio server loop.
//!
//! Speaks JSON-RPC 2.0, one message per line, over stdin/stdout. Only the
//! methods the tool surface needs are implemented: `initialize`,
//! `tools/list`, `tools/call`, and `ping`; `notifications/*` are consumed
//! without a reply. Tool-level failures never become JSON-RPC errors — they
//! come back as in-band text, so the calling agent always receives readable
//! output.

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::tools;
use crate::transport::HttpCapability;

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "httpkit-mcp";

/// Read requests from stdin and write responses to stdout until EOF.
pub async fn run_stdio(transport: &dyn HttpCapability) -> crate::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "server started");

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<Value>(&line) {
            Ok(message) => handle_message(transport, &message).await,
            Err(err) => Some(error_response(
                Value::Null,
                -32700,
                &format!("Parse error: {}", err),
            )),
        };
        if let Some(response) = response {
            let mut payload = serde_json::to_string(&response)?;
            payload.push('\n');
            stdout.write_all(payload.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}

/// Handle one JSON-RPC message. Returns `None` for notifications.
pub async fn handle_message(transport: &dyn HttpCapability, message: &Value) -> Option<Value> {
    let method = message.get("method").and_then(Value::as_str).unwrap_or("");
    let id = message.get("id").cloned();

    if method.starts_with("notifications/") {
        return None;
    }
    // A request without an id has nowhere to send the reply.
    let id = id?;

    let result = match method {
        "initialize" => json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            }
        }),
        "ping" => json!({}),
        "tools/list" => json!({ "tools": tools::tool_definitions() }),
        "tools/call" => {
            let params = message.get("params").cloned().unwrap_or_else(|| json!({}));
            let name = params.get("name").and_then(Value::as_str).unwrap_or("");
            let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));
            let text = tools::call_tool(transport, name, arguments).await;
            json!({
                "content": [{ "type": "text", "text": text }],
                "isError": false
            })
        }
        other => {
            return Some(error_response(
                id,
                -32601,
                &format!("Method not found: {}", other),
            ));
        }
    };

    Some(json!({ "jsonrpc": "2.0", "id": id, "result": result }))
}

fn error_response(id: Value, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message }
    })
}
