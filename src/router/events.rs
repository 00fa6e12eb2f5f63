//! UI events the router knows how to route.

use par_connector_protocol::{CodeBlockPayload, FeedbackPayload, FollowUp, FormAction, Vote};
use serde::{Deserialize, Serialize};

/// A user action in a tab.
///
/// The set is closed: every action the panel exposes has a variant, and the
/// routing table in [`super::Router::dispatch`] matches on all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum UiEvent {
    SourceLinkClick {
        message_id: String,
        link: String,
    },
    ResponseBodyLinkClick {
        message_id: String,
        link: String,
    },
    InfoLinkClick {
        link: String,
    },
    FollowUpClicked {
        message_id: String,
        follow_up: FollowUp,
    },
    CopyCodeToClipboard(CodeBlockPayload),
    CodeInsertToCursor(CodeBlockPayload),
    OpenDiff {
        file_path: String,
        deleted: bool,
        message_id: String,
    },
    FileActionClick {
        message_id: String,
        file_path: String,
        action_name: String,
    },
    ChatItemVoted {
        message_id: String,
        vote: Vote,
    },
    SendFeedback(FeedbackPayload),
    StopChatResponse,
    CustomFormAction(FormAction),
    AuthFollowUpClicked {
        auth_type: String,
    },
    /// A tab whose category was known at open time finished opening.
    KnownTabOpen,
    Transform,
    ClearChat,
    Help,
}

impl UiEvent {
    /// Event name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::SourceLinkClick { .. } => "source-link-click",
            UiEvent::ResponseBodyLinkClick { .. } => "response-body-link-click",
            UiEvent::InfoLinkClick { .. } => "info-link-click",
            UiEvent::FollowUpClicked { .. } => "follow-up-clicked",
            UiEvent::CopyCodeToClipboard(_) => "copy-code-to-clipboard",
            UiEvent::CodeInsertToCursor(_) => "code-insert-to-cursor",
            UiEvent::OpenDiff { .. } => "open-diff",
            UiEvent::FileActionClick { .. } => "file-action-click",
            UiEvent::ChatItemVoted { .. } => "chat-item-voted",
            UiEvent::SendFeedback(_) => "send-feedback",
            UiEvent::StopChatResponse => "stop-chat-response",
            UiEvent::CustomFormAction(_) => "custom-form-action",
            UiEvent::AuthFollowUpClicked { .. } => "auth-follow-up-clicked",
            UiEvent::KnownTabOpen => "known-tab-open",
            UiEvent::Transform => "transform",
            UiEvent::ClearChat => "clear-chat",
            UiEvent::Help => "help",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_struct_variant() {
        let json = r#"{"event":"open-diff","filePath":"src/lib.rs","deleted":false,"messageId":"m1"}"#;
        let event: UiEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            UiEvent::OpenDiff {
                file_path: "src/lib.rs".to_string(),
                deleted: false,
                message_id: "m1".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_newtype_variant() {
        let json = r#"{"event":"code-insert-to-cursor","messageId":"m1","code":"x"}"#;
        match serde_json::from_str::<UiEvent>(json).unwrap() {
            UiEvent::CodeInsertToCursor(block) => {
                assert_eq!(block.code, "x");
                assert!(block.code_reference.is_empty());
            }
            other => panic!("Expected CodeInsertToCursor, got {:?}", other),
        }
    }

    #[test]
    fn test_name_matches_serialized_tag() {
        let events = vec![
            UiEvent::StopChatResponse,
            UiEvent::InfoLinkClick {
                link: "https://example.invalid".to_string(),
            },
            UiEvent::SendFeedback(FeedbackPayload {
                message_id: "m".to_string(),
                selected_option: "inaccurate".to_string(),
                comment: None,
            }),
        ];
        for event in events {
            let value = serde_json::to_value(&event).unwrap();
            assert_eq!(value["event"], event.name());
        }
    }
}
