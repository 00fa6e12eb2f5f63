//! Tab bookkeeping for the chat panel
//!
//! This module provides:
//! - `Tab`: One conversation session and the metadata routing depends on
//! - `TabRegistry`: The set of open tabs and the current selection
//! - `TabId`: Opaque identifier assigned by the UI

mod registry;

pub use registry::{RegistryError, TabRegistry};

use par_connector_protocol::TabCategory;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque tab identifier assigned by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TabId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TabId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Whether a tab is waiting on an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TabStatus {
    #[default]
    Free,
    Busy,
}

/// How the user opened a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpenInteractionType {
    Click,
    ContextMenu,
    Hotkeys,
}

/// A single conversation session.
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub id: TabId,
    pub category: TabCategory,
    pub status: TabStatus,
    pub is_selected: bool,
    pub open_interaction_type: Option<OpenInteractionType>,
    /// Quick-action command last typed in this tab (e.g. `/dev`)
    pub last_command: Option<String>,
}

impl Tab {
    /// A freshly opened tab: unknown category, free, selected.
    pub fn new(id: TabId) -> Self {
        Self {
            id,
            category: TabCategory::Unknown,
            status: TabStatus::Free,
            is_selected: true,
            open_interaction_type: None,
            last_command: None,
        }
    }
}
