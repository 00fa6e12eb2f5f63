//! Messages sent from the connector to the host process.
//!
//! Each [`HostCommand`] serializes to a JSON object whose `command` field names
//! the action. The remaining fields vary per command; most carry the `tabID`
//! of the originating tab and the `tabType` of the handler that produced it.

use serde::Serialize;

use crate::category::TabCategory;
use crate::payloads::{CodeReference, FollowUp, FormAction, Vote};

/// Whether the panel gained or lost focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusType {
    WebviewFocus,
    WebviewBlur,
}

impl FocusType {
    /// Map a focused flag to its wire value.
    pub fn from_focused(focused: bool) -> Self {
        if focused {
            FocusType::WebviewFocus
        } else {
            FocusType::WebviewBlur
        }
    }
}

/// A message for the host process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum HostCommand {
    /// The panel finished loading and is listening for host messages.
    UiIsReady,
    /// The panel gained or lost focus.
    UiFocus {
        #[serde(rename = "type")]
        focus_type: FocusType,
        tab_type: TabCategory,
    },
    SourceLinkClick {
        #[serde(rename = "tabID")]
        tab_id: String,
        message_id: String,
        link: String,
        tab_type: TabCategory,
    },
    ResponseBodyLinkClick {
        #[serde(rename = "tabID")]
        tab_id: String,
        message_id: String,
        link: String,
        tab_type: TabCategory,
    },
    InfoLinkClick {
        #[serde(rename = "tabID")]
        tab_id: String,
        link: String,
        tab_type: TabCategory,
    },
    FollowUpWasClicked {
        #[serde(rename = "tabID")]
        tab_id: String,
        message_id: String,
        follow_up: FollowUp,
        tab_type: TabCategory,
    },
    #[serde(rename = "code_was_copied_to_clipboard")]
    CodeWasCopiedToClipboard {
        #[serde(rename = "tabID")]
        tab_id: String,
        message_id: String,
        code: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        insertion_target_type: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        code_reference: Vec<CodeReference>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        event_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code_block_index: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        total_code_blocks: Option<u32>,
        tab_type: TabCategory,
    },
    /// Insert code into the active editor. Feature-dev tabs only send the
    /// code and its references; chat tabs send the full block metadata.
    #[serde(rename = "insert_code_at_cursor_position")]
    InsertCodeAtCursorPosition {
        #[serde(rename = "tabID")]
        tab_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
        code: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        insertion_target_type: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        code_reference: Vec<CodeReference>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        event_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code_block_index: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        total_code_blocks: Option<u32>,
        tab_type: TabCategory,
    },
    OpenDiff {
        #[serde(rename = "tabID")]
        tab_id: String,
        file_path: String,
        deleted: bool,
        message_id: String,
        tab_type: TabCategory,
    },
    FileClick {
        #[serde(rename = "tabID")]
        tab_id: String,
        message_id: String,
        file_path: String,
        action_name: String,
        tab_type: TabCategory,
    },
    ChatItemVoted {
        #[serde(rename = "tabID")]
        tab_id: String,
        message_id: String,
        vote: Vote,
        tab_type: TabCategory,
    },
    ChatItemFeedback {
        #[serde(rename = "tabID")]
        tab_id: String,
        message_id: String,
        selected_option: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        comment: Option<String>,
        tab_type: TabCategory,
    },
    StopResponse {
        #[serde(rename = "tabID")]
        tab_id: String,
        tab_type: TabCategory,
    },
    FormActionClick {
        #[serde(rename = "tabID")]
        tab_id: String,
        action: FormAction,
        tab_type: TabCategory,
    },
    AuthFollowUpWasClicked {
        #[serde(rename = "tabID")]
        tab_id: String,
        auth_type: String,
        tab_type: TabCategory,
    },
    NewTabWasCreated {
        #[serde(rename = "tabID")]
        tab_id: String,
        tab_type: TabCategory,
    },
    TabWasRemoved {
        #[serde(rename = "tabID")]
        tab_id: String,
        tab_type: TabCategory,
    },
    TabWasChanged {
        #[serde(rename = "tabID")]
        tab_id: String,
        #[serde(rename = "prevTabID", default, skip_serializing_if = "Option::is_none")]
        prev_tab_id: Option<String>,
        tab_type: TabCategory,
    },
    Transform {
        #[serde(rename = "tabID")]
        tab_id: String,
        tab_type: TabCategory,
    },
    Clear {
        #[serde(rename = "tabID")]
        tab_id: String,
        tab_type: TabCategory,
    },
    Help {
        #[serde(rename = "tabID")]
        tab_id: String,
        tab_type: TabCategory,
    },
    /// A prompt the host should answer.
    ChatPrompt {
        #[serde(rename = "tabID")]
        tab_id: String,
        chat_message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        chat_command: Option<String>,
        tab_type: TabCategory,
    },
}

impl HostCommand {
    /// The `command` discriminator this value serializes with.
    pub fn command_name(&self) -> &'static str {
        match self {
            HostCommand::UiIsReady => "ui-is-ready",
            HostCommand::UiFocus { .. } => "ui-focus",
            HostCommand::SourceLinkClick { .. } => "source-link-click",
            HostCommand::ResponseBodyLinkClick { .. } => "response-body-link-click",
            HostCommand::InfoLinkClick { .. } => "info-link-click",
            HostCommand::FollowUpWasClicked { .. } => "follow-up-was-clicked",
            HostCommand::CodeWasCopiedToClipboard { .. } => "code_was_copied_to_clipboard",
            HostCommand::InsertCodeAtCursorPosition { .. } => "insert_code_at_cursor_position",
            HostCommand::OpenDiff { .. } => "open-diff",
            HostCommand::FileClick { .. } => "file-click",
            HostCommand::ChatItemVoted { .. } => "chat-item-voted",
            HostCommand::ChatItemFeedback { .. } => "chat-item-feedback",
            HostCommand::StopResponse { .. } => "stop-response",
            HostCommand::FormActionClick { .. } => "form-action-click",
            HostCommand::AuthFollowUpWasClicked { .. } => "auth-follow-up-was-clicked",
            HostCommand::NewTabWasCreated { .. } => "new-tab-was-created",
            HostCommand::TabWasRemoved { .. } => "tab-was-removed",
            HostCommand::TabWasChanged { .. } => "tab-was-changed",
            HostCommand::Transform { .. } => "transform",
            HostCommand::Clear { .. } => "clear",
            HostCommand::Help { .. } => "help",
            HostCommand::ChatPrompt { .. } => "chat-prompt",
        }
    }
}
