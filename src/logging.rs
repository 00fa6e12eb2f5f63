//! Logger setup for the binary.
//!
//! Library code only uses the `log` facade. The binary installs
//! `env_logger` with this precedence: `--log-level` flag, then `RUST_LOG`,
//! then the configured `log_level`.

use env_logger::{Builder, Env};
use par_connector_config::LogLevel;

/// Where the effective log filter came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSource {
    Cli(LogLevel),
    Environment,
    Config(LogLevel),
}

/// Pick the filter source. `rust_log` is the value of `RUST_LOG`, if set.
pub fn resolve(cli: Option<LogLevel>, rust_log: Option<&str>, config: LogLevel) -> LogSource {
    match (cli, rust_log) {
        (Some(level), _) => LogSource::Cli(level),
        (None, Some(filter)) if !filter.trim().is_empty() => LogSource::Environment,
        _ => LogSource::Config(config),
    }
}

/// Install the global logger. Returns the source the filter was taken from.
///
/// Calling this twice leaves the first logger in place.
pub fn init(cli: Option<LogLevel>, config: LogLevel) -> LogSource {
    let rust_log = std::env::var("RUST_LOG").ok();
    let source = resolve(cli, rust_log.as_deref(), config);

    let mut builder = match source {
        LogSource::Environment => Builder::from_env(Env::default()),
        LogSource::Cli(level) | LogSource::Config(level) => {
            let mut builder = Builder::new();
            builder.filter_level(level.to_level_filter());
            builder
        }
    };

    if builder.format_timestamp_millis().try_init().is_err() {
        log::debug!("Logger already initialized");
    }
    source
}
