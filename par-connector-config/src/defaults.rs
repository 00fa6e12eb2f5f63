//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes so a config
//! file only needs the keys it wants to override.

use crate::types::LogLevel;

// ── Logging ────────────────────────────────────────────────────────────────

pub fn log_level() -> LogLevel {
    LogLevel::Info
}

// ── Readiness gate ─────────────────────────────────────────────────────────

/// Delay before the first retry of a request made before the panel is ready.
pub fn retry_delay_ms() -> u64 {
    2000
}

pub fn max_retry_delay_ms() -> u64 {
    16_000
}

pub fn max_attempts() -> u32 {
    10
}

// ── Sender tags ────────────────────────────────────────────────────────────

pub fn chat_sender() -> String {
    "CWChat".to_string()
}

pub fn feature_dev_sender() -> String {
    "featureDevChat".to_string()
}

pub fn code_transform_sender() -> String {
    "gumbyChat".to_string()
}

pub fn commons_sender() -> String {
    "amazonqCore".to_string()
}
