//! Typed errors for inbound payload parsing.

use thiserror::Error;

/// Errors produced while decoding a payload received from the host.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The payload was empty or whitespace only.
    #[error("empty host payload")]
    Empty,

    /// The payload was not valid JSON, or not a JSON object.
    #[error("malformed host payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The payload parsed but carried no string `sender` field.
    #[error("host payload has no `sender` field")]
    MissingSender,
}
