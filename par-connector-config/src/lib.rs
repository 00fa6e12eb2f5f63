//! Configuration system for par-connector.
//!
//! This crate provides configuration loading, saving, validation, and default
//! values for the connector. It includes:
//!
//! - [`ConnectorConfig`], the top-level YAML document
//! - [`ReadinessConfig`], retry policy for requests made before the panel is ready
//! - [`SenderTags`], the `sender` strings that route host payloads to handlers
//! - [`LogLevel`], the configured log verbosity

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::{ConnectorConfig, ReadinessConfig, SenderTags};
pub use error::ConfigError;
pub use types::LogLevel;
