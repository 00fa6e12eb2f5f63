//! Scripted replay of panel traffic.
//!
//! A script is JSON lines, one [`ScriptedInput`] per line:
//!
//! ```text
//! {"ui": {"input": "add-tab", "tabId": "t1"}}
//! {"ui": {"input": "mark-ready"}}
//! {"host": "{\"sender\":\"CWChat\",\"type\":\"chatMessage\",\"tabID\":\"t1\"}"}
//! {"focus": true}
//! {"wait_ms": 2500}
//! ```
//!
//! The script runs through a [`RouterService`] wired to the relay handlers.
//! Everything the router produced is written out afterwards as JSON lines:
//! host commands first, then UI updates, each in emission order.

use std::io::Write;
use std::time::Duration;

use par_connector_config::ConnectorConfig;
use par_connector_protocol::HostCommand;
use serde::{Deserialize, Serialize};

use crate::error::ConnectorError;
use crate::host::{HostOutbox, UiSink, UiUpdate};
use crate::router::Router;
use crate::service::{FocusEvent, RouterInput, RouterService};

/// One line of a replay script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptedInput {
    /// An input from the UI side.
    Ui(RouterInput),
    /// A raw payload from the host, passed through unparsed.
    Host(String),
    /// Panel focus (`true`) or blur (`false`).
    Focus(bool),
    /// Let the clock run, so deferred requests get a chance to retry.
    WaitMs(u64),
}

/// One line of replay output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayOutput {
    Host(HostCommand),
    Ui(UiUpdate),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub inputs: usize,
    pub host_commands: usize,
    pub ui_updates: usize,
}

/// Parse a script. Blank lines and lines starting with `//` are skipped.
///
/// # Errors
/// [`ConnectorError::Script`] with the 1-based line number of the first
/// line that does not parse.
pub fn parse_script(script: &str) -> Result<Vec<ScriptedInput>, ConnectorError> {
    script
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with("//")
        })
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| ConnectorError::Script {
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Run `inputs` through a fresh router and write what it produced to `out`.
pub async fn run(
    inputs: Vec<ScriptedInput>,
    config: &ConnectorConfig,
    out: &mut impl Write,
) -> Result<ReplaySummary, ConnectorError> {
    let (outbox, mut host_rx) = HostOutbox::channel();
    let (ui, mut ui_rx) = UiSink::channel();
    let router = Router::from_config(config, outbox, ui.clone());
    let service = RouterService::spawn(router, ui);

    let mut summary = ReplaySummary {
        inputs: inputs.len(),
        ..Default::default()
    };

    for input in inputs {
        match input {
            ScriptedInput::Ui(input) => service.handle.send(input)?,
            ScriptedInput::Host(raw) => service.handle.host_message(raw)?,
            ScriptedInput::Focus(focused) => {
                let event = if focused {
                    FocusEvent::Focus
                } else {
                    FocusEvent::Blur
                };
                service.handle.focus(event)?;
            }
            ScriptedInput::WaitMs(ms) => tokio::time::sleep(Duration::from_millis(ms)).await,
        }
    }

    // Dropping the router closes the relay handlers' senders too.
    drop(service.shutdown().await?);

    while let Ok(command) = host_rx.try_recv() {
        write_line(out, &ReplayOutput::Host(command))?;
        summary.host_commands += 1;
    }
    while let Ok(update) = ui_rx.try_recv() {
        write_line(out, &ReplayOutput::Ui(update))?;
        summary.ui_updates += 1;
    }
    out.flush()?;

    log::info!(
        "Replayed {} inputs: {} host commands, {} UI updates",
        summary.inputs,
        summary.host_commands,
        summary.ui_updates
    );
    Ok(summary)
}

fn write_line(out: &mut impl Write, output: &ReplayOutput) -> Result<(), ConnectorError> {
    let line = serde_json::to_string(output)?;
    writeln!(out, "{line}")?;
    Ok(())
}
