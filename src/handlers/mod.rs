//! Category handler contracts.
//!
//! Each feature area exposes only the operations the router can route to it.
//! The traits are not uniform: a category that never receives an event has
//! no method for it. The router's routing table decides which events reach
//! which handler.
//!
//! Every handler also receives host payloads addressed to its sender tag via
//! [`HostMessageHandler`].

pub mod relay;

pub use relay::{ChatRelay, CodeTransformRelay, CommonsRelay, FeatureDevRelay, relay_handlers};

use par_connector_protocol::{
    ChatPrompt, CodeBlockPayload, CodeReference, FeedbackPayload, FollowUp, FormAction,
    HostMessage, Vote,
};

use crate::tab::TabId;

/// Receives host payloads whose `sender` matches [`Self::sender_tag`].
pub trait HostMessageHandler: Send {
    /// The `sender` value this handler owns.
    fn sender_tag(&self) -> &str;

    fn handle_host_message(&mut self, message: HostMessage);
}

/// Generic chat tabs. Also the default target for several events and the
/// observer of tab switches across all categories.
pub trait ChatHandler: HostMessageHandler {
    fn source_link_click(&mut self, tab_id: &TabId, message_id: &str, link: &str);
    fn response_body_link_click(&mut self, tab_id: &TabId, message_id: &str, link: &str);
    fn info_link_click(&mut self, tab_id: &TabId, link: &str);
    fn follow_up_clicked(&mut self, tab_id: &TabId, message_id: &str, follow_up: &FollowUp);
    fn copy_code_to_clipboard(&mut self, tab_id: &TabId, block: &CodeBlockPayload);
    fn insert_code_at_cursor(&mut self, tab_id: &TabId, block: &CodeBlockPayload);
    fn chat_item_voted(&mut self, tab_id: &TabId, message_id: &str, vote: Vote);
    fn send_feedback(&mut self, tab_id: &TabId, feedback: &FeedbackPayload);
    fn stop_chat_response(&mut self, tab_id: &TabId);
    fn auth_follow_up_clicked(&mut self, tab_id: &TabId, auth_type: &str);
    fn clear_chat(&mut self, tab_id: &TabId);
    fn help(&mut self, tab_id: &TabId);
    fn tab_changed(&mut self, tab_id: &TabId, previous: Option<&TabId>);
    fn tab_removed(&mut self, tab_id: &TabId);
    fn request_generative_answer(&mut self, tab_id: &TabId, prompt: &ChatPrompt);
}

/// Feature development tabs.
pub trait FeatureDevHandler: HostMessageHandler {
    fn response_body_link_click(&mut self, tab_id: &TabId, message_id: &str, link: &str);
    fn follow_up_clicked(&mut self, tab_id: &TabId, message_id: &str, follow_up: &FollowUp);
    /// Only the code and its license references; the block metadata chat
    /// handlers receive is not meaningful here.
    fn insert_code_at_cursor(&mut self, tab_id: &TabId, code: &str, references: &[CodeReference]);
    fn open_diff(&mut self, tab_id: &TabId, file_path: &str, deleted: bool, message_id: &str);
    fn file_action_click(
        &mut self,
        tab_id: &TabId,
        message_id: &str,
        file_path: &str,
        action_name: &str,
    );
    fn chat_item_voted(&mut self, tab_id: &TabId, message_id: &str, vote: Vote);
    fn send_feedback(&mut self, tab_id: &TabId, feedback: &FeedbackPayload);
    fn stop_chat_response(&mut self, tab_id: &TabId);
    fn custom_form_action(&mut self, tab_id: &TabId, action: &FormAction);
    fn auth_follow_up_clicked(&mut self, tab_id: &TabId, auth_type: &str);
    fn tab_opened(&mut self, tab_id: &TabId);
    fn tab_removed(&mut self, tab_id: &TabId);
    fn request_answer(&mut self, tab_id: &TabId, prompt: &ChatPrompt);
    fn request_generative_answer(&mut self, tab_id: &TabId, prompt: &ChatPrompt);
}

/// Code transformation tabs.
pub trait CodeTransformHandler: HostMessageHandler {
    fn response_body_link_click(&mut self, tab_id: &TabId, message_id: &str, link: &str);
    fn follow_up_clicked(&mut self, tab_id: &TabId, message_id: &str, follow_up: &FollowUp);
    fn custom_form_action(&mut self, tab_id: &TabId, action: &FormAction);
    fn auth_follow_up_clicked(&mut self, tab_id: &TabId, auth_type: &str);
    fn tab_opened(&mut self, tab_id: &TabId);
    fn tab_removed(&mut self, tab_id: &TabId);
    fn transform(&mut self, tab_id: &TabId);
    fn request_answer(&mut self, tab_id: &TabId, prompt: &ChatPrompt);
}

/// Tabs whose category is still unknown (welcome page, quick-action picker).
pub trait CommonsHandler: HostMessageHandler {
    fn follow_up_clicked(&mut self, tab_id: &TabId, message_id: &str, follow_up: &FollowUp);
}

/// The handler registered for each category. `None` drops that category's
/// events.
#[derive(Default)]
pub struct Handlers {
    pub chat: Option<Box<dyn ChatHandler>>,
    pub feature_dev: Option<Box<dyn FeatureDevHandler>>,
    pub code_transform: Option<Box<dyn CodeTransformHandler>>,
    pub commons: Option<Box<dyn CommonsHandler>>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chat(mut self, handler: impl ChatHandler + 'static) -> Self {
        self.chat = Some(Box::new(handler));
        self
    }

    pub fn with_feature_dev(mut self, handler: impl FeatureDevHandler + 'static) -> Self {
        self.feature_dev = Some(Box::new(handler));
        self
    }

    pub fn with_code_transform(mut self, handler: impl CodeTransformHandler + 'static) -> Self {
        self.code_transform = Some(Box::new(handler));
        self
    }

    pub fn with_commons(mut self, handler: impl CommonsHandler + 'static) -> Self {
        self.commons = Some(Box::new(handler));
        self
    }
}

impl std::fmt::Debug for Handlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handlers")
            .field("chat", &self.chat.as_ref().map(|h| h.sender_tag().to_string()))
            .field(
                "feature_dev",
                &self.feature_dev.as_ref().map(|h| h.sender_tag().to_string()),
            )
            .field(
                "code_transform",
                &self.code_transform.as_ref().map(|h| h.sender_tag().to_string()),
            )
            .field(
                "commons",
                &self.commons.as_ref().map(|h| h.sender_tag().to_string()),
            )
            .finish()
    }
}
