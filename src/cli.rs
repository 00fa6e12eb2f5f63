//! Command-line interface for par-connector.
//!
//! This module handles CLI argument parsing and the `replay` and
//! `check-config` subcommands.

use anyhow::Context;
use clap::{Parser, Subcommand};
use par_connector_config::{ConnectorConfig, LogLevel};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::replay;

/// par-connector - Tab-scoped event router for a chat panel
#[derive(Parser)]
#[command(name = "par-connector")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/par-connector/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace). Overrides RUST_LOG and the config file
    #[arg(long, global = true, value_name = "LEVEL", value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a JSON-lines script through the router and print what it emits
    Replay {
        /// Script file, one input per line
        file: PathBuf,
    },
    /// Load, validate and print the effective configuration
    CheckConfig,
}

fn parse_log_level(name: &str) -> Result<LogLevel, String> {
    LogLevel::from_name(name).ok_or_else(|| format!("unknown log level '{name}'"))
}

/// Load the config named on the command line, or the default one.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<ConnectorConfig> {
    match path {
        Some(path) => ConnectorConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => ConnectorConfig::load().context("Failed to load config"),
    }
}

/// Run a parsed subcommand.
pub async fn run(command: Commands, config: &ConnectorConfig) -> anyhow::Result<()> {
    match command {
        Commands::Replay { file } => {
            let script = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read script {}", file.display()))?;
            let inputs = replay::parse_script(&script)
                .with_context(|| format!("Failed to parse script {}", file.display()))?;

            let mut out = io::stdout().lock();
            replay::run(inputs, config, &mut out)
                .await
                .context("Replay failed")?;
            Ok(())
        }
        Commands::CheckConfig => {
            let yaml = config.to_yaml().context("Failed to serialize config")?;
            let mut out = io::stdout().lock();
            writeln!(out, "# config is valid")?;
            write!(out, "{yaml}")?;
            Ok(())
        }
    }
}
