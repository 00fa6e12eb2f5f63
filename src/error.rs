//! Error types for the router service and replay driver.

use thiserror::Error;

/// Errors surfaced by [`crate::service`] and [`crate::replay`].
///
/// Routing itself never fails; these cover the plumbing around it.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Router service has stopped")]
    ServiceClosed,

    #[error("Router service task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Invalid script line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode replay output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
