use thiserror::Error;

use crate::decode::DecodeError;
use crate::raw::ParseError;
use crate::transport::TransportError;

/// Unified error type for the crate.
///
/// Aggregates the per-stage errors so tool handlers can catch everything at
/// one boundary and turn it into in-band text for the calling agent.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to decode arguments: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to parse raw request: {0}")]
    Parse(#[from] ParseError),

    #[error("Request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
