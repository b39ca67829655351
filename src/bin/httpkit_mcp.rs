//! Binary entry point: run the MCP server over stdio.
//!
//! Logs go to stderr so stdout stays protocol-clean. Verbosity is controlled
//! through `RUST_LOG` (e.g. `RUST_LOG=httpkit_mcp=debug`).

use httpkit_mcp::server;
use httpkit_mcp::transport::ReqwestTransport;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> httpkit_mcp::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let transport = ReqwestTransport::new();
    server::run_stdio(&transport).await
}
