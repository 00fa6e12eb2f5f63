//! Payload types carried by UI events and forwarded to the host.
//!
//! Field names serialize in camelCase to match what the host reads.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A follow-up pill shown under an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    pub pill_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Character span inside a code block that a reference applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSpan {
    pub start: u32,
    pub end: u32,
}

/// License attribution attached to generated code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeReference {
    pub license_name: String,
    pub repository: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_content_span: Option<ReferenceSpan>,
}

/// A code block acted on by a copy or insert-at-cursor click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlockPayload {
    pub message_id: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insertion_target_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code_reference: Vec<CodeReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_block_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_code_blocks: Option<u32>,
}

impl CodeBlockPayload {
    /// A payload with only the message id and code set.
    pub fn new(message_id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            code: code.into(),
            insertion_target_type: None,
            code_reference: Vec::new(),
            event_id: None,
            code_block_index: None,
            total_code_blocks: None,
        }
    }
}

/// Thumbs up / down on an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Upvote,
    Downvote,
}

/// Feedback form submitted for an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackPayload {
    pub message_id: String,
    pub selected_option: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A prompt typed into the chat input, optionally with a quick-action command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPrompt {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl ChatPrompt {
    /// A plain prompt with no command.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            command: None,
        }
    }
}

/// A button clicked inside an in-chat form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAction {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub form_item_values: HashMap<String, String>,
}
