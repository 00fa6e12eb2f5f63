// Library exports for the binary, the integration tests and embedding.
//
// Layout:
//
//   - `tab`: tab records and the registry
//   - `handlers`: per-category handler traits and the relay implementations
//   - `router`: routing table, host demux and the readiness gate
//   - `service`: the router as a single-writer tokio task
//   - `host`: outbound channels to the host and the UI
//
// The wire types live in `par-connector-protocol` and configuration in
// `par-connector-config`; both are re-exported here for convenience.

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod error;
pub mod handlers;
pub mod host;
pub mod logging;
pub mod readiness;
pub mod replay;
pub mod router;
pub mod service;
pub mod tab;

pub use par_connector_config as config;
pub use par_connector_protocol as protocol;

pub use error::ConnectorError;
pub use host::{HostOutbox, UiSink, UiUpdate};
pub use readiness::{GateDecision, RetryPolicy};
pub use router::{Router, UiEvent};
pub use service::{FocusEvent, RouterHandle, RouterInput, RouterService, RunningService};
pub use tab::{OpenInteractionType, RegistryError, Tab, TabId, TabRegistry, TabStatus};
