//! Default handlers that relay UI events to the host process.
//!
//! Every feature area in the panel does the same thing with a UI event: wrap
//! it in a [`HostCommand`] tagged with the area's `tabType` and post it. Host
//! payloads going the other way are handed to the UI unchanged, tagged with
//! the category that owns them.

use par_connector_config::SenderTags;
use par_connector_protocol::{
    ChatPrompt, CodeBlockPayload, CodeReference, FeedbackPayload, FollowUp, FormAction,
    HostCommand, HostMessage, TabCategory, Vote,
};

use super::{
    ChatHandler, CodeTransformHandler, CommonsHandler, FeatureDevHandler, Handlers,
    HostMessageHandler,
};
use crate::host::{HostOutbox, UiSink, UiUpdate};
use crate::tab::TabId;

/// Build one relay per category using the configured sender tags.
pub fn relay_handlers(senders: &SenderTags, outbox: &HostOutbox, ui: &UiSink) -> Handlers {
    Handlers::new()
        .with_chat(ChatRelay::new(&senders.chat, outbox.clone(), ui.clone()))
        .with_feature_dev(FeatureDevRelay::new(
            &senders.feature_dev,
            outbox.clone(),
            ui.clone(),
        ))
        .with_code_transform(CodeTransformRelay::new(
            &senders.code_transform,
            outbox.clone(),
            ui.clone(),
        ))
        .with_commons(CommonsRelay::new(&senders.commons, outbox.clone(), ui.clone()))
}

/// State shared by all relays.
#[derive(Debug, Clone)]
struct RelayCore {
    category: TabCategory,
    sender_tag: String,
    outbox: HostOutbox,
    ui: UiSink,
}

impl RelayCore {
    fn new(category: TabCategory, sender_tag: &str, outbox: HostOutbox, ui: UiSink) -> Self {
        Self {
            category,
            sender_tag: sender_tag.to_string(),
            outbox,
            ui,
        }
    }

    fn post(&self, command: HostCommand) {
        self.outbox.post(command);
    }

    fn forward(&self, message: HostMessage) {
        log::debug!(
            "Relaying host message type={:?} tab={:?} to UI as {}",
            message.message_type(),
            message.tab_id(),
            self.category
        );
        self.ui.send(UiUpdate::HostMessage {
            category: self.category,
            message,
        });
    }

    fn response_body_link_click(&self, tab_id: &TabId, message_id: &str, link: &str) {
        self.post(HostCommand::ResponseBodyLinkClick {
            tab_id: tab_id.to_string(),
            message_id: message_id.to_string(),
            link: link.to_string(),
            tab_type: self.category,
        });
    }

    fn follow_up_clicked(&self, tab_id: &TabId, message_id: &str, follow_up: &FollowUp) {
        self.post(HostCommand::FollowUpWasClicked {
            tab_id: tab_id.to_string(),
            message_id: message_id.to_string(),
            follow_up: follow_up.clone(),
            tab_type: self.category,
        });
    }

    fn chat_item_voted(&self, tab_id: &TabId, message_id: &str, vote: Vote) {
        self.post(HostCommand::ChatItemVoted {
            tab_id: tab_id.to_string(),
            message_id: message_id.to_string(),
            vote,
            tab_type: self.category,
        });
    }

    fn send_feedback(&self, tab_id: &TabId, feedback: &FeedbackPayload) {
        self.post(HostCommand::ChatItemFeedback {
            tab_id: tab_id.to_string(),
            message_id: feedback.message_id.clone(),
            selected_option: feedback.selected_option.clone(),
            comment: feedback.comment.clone(),
            tab_type: self.category,
        });
    }

    fn stop_chat_response(&self, tab_id: &TabId) {
        self.post(HostCommand::StopResponse {
            tab_id: tab_id.to_string(),
            tab_type: self.category,
        });
    }

    fn custom_form_action(&self, tab_id: &TabId, action: &FormAction) {
        self.post(HostCommand::FormActionClick {
            tab_id: tab_id.to_string(),
            action: action.clone(),
            tab_type: self.category,
        });
    }

    fn auth_follow_up_clicked(&self, tab_id: &TabId, auth_type: &str) {
        self.post(HostCommand::AuthFollowUpWasClicked {
            tab_id: tab_id.to_string(),
            auth_type: auth_type.to_string(),
            tab_type: self.category,
        });
    }

    fn tab_opened(&self, tab_id: &TabId) {
        self.post(HostCommand::NewTabWasCreated {
            tab_id: tab_id.to_string(),
            tab_type: self.category,
        });
    }

    fn tab_removed(&self, tab_id: &TabId) {
        self.post(HostCommand::TabWasRemoved {
            tab_id: tab_id.to_string(),
            tab_type: self.category,
        });
    }

    fn prompt(&self, tab_id: &TabId, prompt: &ChatPrompt) {
        self.post(HostCommand::ChatPrompt {
            tab_id: tab_id.to_string(),
            chat_message: prompt.prompt.clone(),
            chat_command: prompt.command.clone(),
            tab_type: self.category,
        });
    }
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// Relay for generic chat tabs.
#[derive(Debug, Clone)]
pub struct ChatRelay {
    core: RelayCore,
}

impl ChatRelay {
    pub fn new(sender_tag: &str, outbox: HostOutbox, ui: UiSink) -> Self {
        Self {
            core: RelayCore::new(TabCategory::Chat, sender_tag, outbox, ui),
        }
    }

    fn code_block(&self, tab_id: &TabId, block: &CodeBlockPayload, insert: bool) {
        let tab_id = tab_id.to_string();
        let block = block.clone();
        let command = if insert {
            HostCommand::InsertCodeAtCursorPosition {
                tab_id,
                message_id: Some(block.message_id),
                code: block.code,
                insertion_target_type: block.insertion_target_type,
                code_reference: block.code_reference,
                event_id: block.event_id,
                code_block_index: block.code_block_index,
                total_code_blocks: block.total_code_blocks,
                tab_type: TabCategory::Chat,
            }
        } else {
            HostCommand::CodeWasCopiedToClipboard {
                tab_id,
                message_id: block.message_id,
                code: block.code,
                insertion_target_type: block.insertion_target_type,
                code_reference: block.code_reference,
                event_id: block.event_id,
                code_block_index: block.code_block_index,
                total_code_blocks: block.total_code_blocks,
                tab_type: TabCategory::Chat,
            }
        };
        self.core.post(command);
    }

    fn tab_only(&self, command: fn(String, TabCategory) -> HostCommand, tab_id: &TabId) {
        self.core.post(command(tab_id.to_string(), TabCategory::Chat));
    }
}

impl HostMessageHandler for ChatRelay {
    fn sender_tag(&self) -> &str {
        &self.core.sender_tag
    }

    fn handle_host_message(&mut self, message: HostMessage) {
        self.core.forward(message);
    }
}

impl ChatHandler for ChatRelay {
    fn source_link_click(&mut self, tab_id: &TabId, message_id: &str, link: &str) {
        self.core.post(HostCommand::SourceLinkClick {
            tab_id: tab_id.to_string(),
            message_id: message_id.to_string(),
            link: link.to_string(),
            tab_type: TabCategory::Chat,
        });
    }

    fn response_body_link_click(&mut self, tab_id: &TabId, message_id: &str, link: &str) {
        self.core.response_body_link_click(tab_id, message_id, link);
    }

    fn info_link_click(&mut self, tab_id: &TabId, link: &str) {
        self.core.post(HostCommand::InfoLinkClick {
            tab_id: tab_id.to_string(),
            link: link.to_string(),
            tab_type: TabCategory::Chat,
        });
    }

    fn follow_up_clicked(&mut self, tab_id: &TabId, message_id: &str, follow_up: &FollowUp) {
        self.core.follow_up_clicked(tab_id, message_id, follow_up);
    }

    fn copy_code_to_clipboard(&mut self, tab_id: &TabId, block: &CodeBlockPayload) {
        self.code_block(tab_id, block, false);
    }

    fn insert_code_at_cursor(&mut self, tab_id: &TabId, block: &CodeBlockPayload) {
        self.code_block(tab_id, block, true);
    }

    fn chat_item_voted(&mut self, tab_id: &TabId, message_id: &str, vote: Vote) {
        self.core.chat_item_voted(tab_id, message_id, vote);
    }

    fn send_feedback(&mut self, tab_id: &TabId, feedback: &FeedbackPayload) {
        self.core.send_feedback(tab_id, feedback);
    }

    fn stop_chat_response(&mut self, tab_id: &TabId) {
        self.core.stop_chat_response(tab_id);
    }

    fn auth_follow_up_clicked(&mut self, tab_id: &TabId, auth_type: &str) {
        self.core.auth_follow_up_clicked(tab_id, auth_type);
    }

    fn clear_chat(&mut self, tab_id: &TabId) {
        self.tab_only(|tab_id, tab_type| HostCommand::Clear { tab_id, tab_type }, tab_id);
    }

    fn help(&mut self, tab_id: &TabId) {
        self.tab_only(|tab_id, tab_type| HostCommand::Help { tab_id, tab_type }, tab_id);
    }

    fn tab_changed(&mut self, tab_id: &TabId, previous: Option<&TabId>) {
        self.core.post(HostCommand::TabWasChanged {
            tab_id: tab_id.to_string(),
            prev_tab_id: previous.map(TabId::to_string),
            tab_type: TabCategory::Chat,
        });
    }

    fn tab_removed(&mut self, tab_id: &TabId) {
        self.core.tab_removed(tab_id);
    }

    fn request_generative_answer(&mut self, tab_id: &TabId, prompt: &ChatPrompt) {
        self.core.prompt(tab_id, prompt);
    }
}

// ---------------------------------------------------------------------------
// Feature dev
// ---------------------------------------------------------------------------

/// Relay for feature development tabs.
#[derive(Debug, Clone)]
pub struct FeatureDevRelay {
    core: RelayCore,
}

impl FeatureDevRelay {
    pub fn new(sender_tag: &str, outbox: HostOutbox, ui: UiSink) -> Self {
        Self {
            core: RelayCore::new(TabCategory::FeatureDev, sender_tag, outbox, ui),
        }
    }
}

impl HostMessageHandler for FeatureDevRelay {
    fn sender_tag(&self) -> &str {
        &self.core.sender_tag
    }

    fn handle_host_message(&mut self, message: HostMessage) {
        self.core.forward(message);
    }
}

impl FeatureDevHandler for FeatureDevRelay {
    fn response_body_link_click(&mut self, tab_id: &TabId, message_id: &str, link: &str) {
        self.core.response_body_link_click(tab_id, message_id, link);
    }

    fn follow_up_clicked(&mut self, tab_id: &TabId, message_id: &str, follow_up: &FollowUp) {
        self.core.follow_up_clicked(tab_id, message_id, follow_up);
    }

    fn insert_code_at_cursor(&mut self, tab_id: &TabId, code: &str, references: &[CodeReference]) {
        self.core.post(HostCommand::InsertCodeAtCursorPosition {
            tab_id: tab_id.to_string(),
            message_id: None,
            code: code.to_string(),
            insertion_target_type: None,
            code_reference: references.to_vec(),
            event_id: None,
            code_block_index: None,
            total_code_blocks: None,
            tab_type: TabCategory::FeatureDev,
        });
    }

    fn open_diff(&mut self, tab_id: &TabId, file_path: &str, deleted: bool, message_id: &str) {
        self.core.post(HostCommand::OpenDiff {
            tab_id: tab_id.to_string(),
            file_path: file_path.to_string(),
            deleted,
            message_id: message_id.to_string(),
            tab_type: TabCategory::FeatureDev,
        });
    }

    fn file_action_click(
        &mut self,
        tab_id: &TabId,
        message_id: &str,
        file_path: &str,
        action_name: &str,
    ) {
        self.core.post(HostCommand::FileClick {
            tab_id: tab_id.to_string(),
            message_id: message_id.to_string(),
            file_path: file_path.to_string(),
            action_name: action_name.to_string(),
            tab_type: TabCategory::FeatureDev,
        });
    }

    fn chat_item_voted(&mut self, tab_id: &TabId, message_id: &str, vote: Vote) {
        self.core.chat_item_voted(tab_id, message_id, vote);
    }

    fn send_feedback(&mut self, tab_id: &TabId, feedback: &FeedbackPayload) {
        self.core.send_feedback(tab_id, feedback);
    }

    fn stop_chat_response(&mut self, tab_id: &TabId) {
        self.core.stop_chat_response(tab_id);
    }

    fn custom_form_action(&mut self, tab_id: &TabId, action: &FormAction) {
        self.core.custom_form_action(tab_id, action);
    }

    fn auth_follow_up_clicked(&mut self, tab_id: &TabId, auth_type: &str) {
        self.core.auth_follow_up_clicked(tab_id, auth_type);
    }

    fn tab_opened(&mut self, tab_id: &TabId) {
        self.core.tab_opened(tab_id);
    }

    fn tab_removed(&mut self, tab_id: &TabId) {
        self.core.tab_removed(tab_id);
    }

    fn request_answer(&mut self, tab_id: &TabId, prompt: &ChatPrompt) {
        self.core.prompt(tab_id, prompt);
    }

    fn request_generative_answer(&mut self, tab_id: &TabId, prompt: &ChatPrompt) {
        self.core.prompt(tab_id, prompt);
    }
}

// ---------------------------------------------------------------------------
// Code transform
// ---------------------------------------------------------------------------

/// Relay for code transformation tabs.
#[derive(Debug, Clone)]
pub struct CodeTransformRelay {
    core: RelayCore,
}

impl CodeTransformRelay {
    pub fn new(sender_tag: &str, outbox: HostOutbox, ui: UiSink) -> Self {
        Self {
            core: RelayCore::new(TabCategory::CodeTransform, sender_tag, outbox, ui),
        }
    }
}

impl HostMessageHandler for CodeTransformRelay {
    fn sender_tag(&self) -> &str {
        &self.core.sender_tag
    }

    fn handle_host_message(&mut self, message: HostMessage) {
        self.core.forward(message);
    }
}

impl CodeTransformHandler for CodeTransformRelay {
    fn response_body_link_click(&mut self, tab_id: &TabId, message_id: &str, link: &str) {
        self.core.response_body_link_click(tab_id, message_id, link);
    }

    fn follow_up_clicked(&mut self, tab_id: &TabId, message_id: &str, follow_up: &FollowUp) {
        self.core.follow_up_clicked(tab_id, message_id, follow_up);
    }

    fn custom_form_action(&mut self, tab_id: &TabId, action: &FormAction) {
        self.core.custom_form_action(tab_id, action);
    }

    fn auth_follow_up_clicked(&mut self, tab_id: &TabId, auth_type: &str) {
        self.core.auth_follow_up_clicked(tab_id, auth_type);
    }

    fn tab_opened(&mut self, tab_id: &TabId) {
        self.core.tab_opened(tab_id);
    }

    fn tab_removed(&mut self, tab_id: &TabId) {
        self.core.tab_removed(tab_id);
    }

    fn transform(&mut self, tab_id: &TabId) {
        self.core.post(HostCommand::Transform {
            tab_id: tab_id.to_string(),
            tab_type: TabCategory::CodeTransform,
        });
    }

    fn request_answer(&mut self, tab_id: &TabId, prompt: &ChatPrompt) {
        self.core.prompt(tab_id, prompt);
    }
}

// ---------------------------------------------------------------------------
// Commons
// ---------------------------------------------------------------------------

/// Relay for tabs whose category is not yet known.
#[derive(Debug, Clone)]
pub struct CommonsRelay {
    core: RelayCore,
}

impl CommonsRelay {
    pub fn new(sender_tag: &str, outbox: HostOutbox, ui: UiSink) -> Self {
        Self {
            core: RelayCore::new(TabCategory::Unknown, sender_tag, outbox, ui),
        }
    }
}

impl HostMessageHandler for CommonsRelay {
    fn sender_tag(&self) -> &str {
        &self.core.sender_tag
    }

    fn handle_host_message(&mut self, message: HostMessage) {
        self.core.forward(message);
    }
}

impl CommonsHandler for CommonsRelay {
    fn follow_up_clicked(&mut self, tab_id: &TabId, message_id: &str, follow_up: &FollowUp) {
        self.core.follow_up_clicked(tab_id, message_id, follow_up);
    }
}
