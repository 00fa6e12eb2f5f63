//! Channels out of the router: commands for the host, updates for the UI.
//!
//! Both are thin wrappers over unbounded tokio channels. Sending never blocks
//! and never fails loudly: a closed receiver means the other side has shut
//! down, so the message is logged and dropped.

use par_connector_protocol::{HostCommand, HostMessage, TabCategory};
use serde::Serialize;
use tokio::sync::mpsc;

use crate::tab::TabId;

/// Sender half for commands posted to the host process.
#[derive(Debug, Clone)]
pub struct HostOutbox {
    tx: mpsc::UnboundedSender<HostCommand>,
}

impl HostOutbox {
    pub fn new(tx: mpsc::UnboundedSender<HostCommand>) -> Self {
        Self { tx }
    }

    /// Create an outbox together with the receiver the host transport drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<HostCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Post a command to the host.
    pub fn post(&self, command: HostCommand) {
        let name = command.command_name();
        log::trace!("Posting host command {name}");
        if self.tx.send(command).is_err() {
            log::warn!("Host channel closed, dropping command {name}");
        }
    }
}

/// Something the UI layer should render or react to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UiUpdate {
    /// A host payload addressed to one of the category handlers.
    HostMessage {
        category: TabCategory,
        message: HostMessage,
    },
    /// A generative-answer request was abandoned because the panel never
    /// became ready.
    GenerativeAnswerTimeout { tab_id: TabId, attempts: u32 },
}

/// Sender half for updates delivered to the UI layer.
#[derive(Debug, Clone)]
pub struct UiSink {
    tx: mpsc::UnboundedSender<UiUpdate>,
}

impl UiSink {
    pub fn new(tx: mpsc::UnboundedSender<UiUpdate>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<UiUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    pub fn send(&self, update: UiUpdate) {
        if self.tx.send(update).is_err() {
            log::warn!("UI channel closed, dropping update");
        }
    }
}
