//! Shared integration test helpers for par-connector.
//!
//! This module provides a recording handler that implements every category
//! trait, and factories for routers wired to it.
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::{recording_router, Call};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a subset
//! of helpers are used per file.

#![allow(dead_code)]

use std::sync::Arc;

use par_connector::handlers::{
    ChatHandler, CodeTransformHandler, CommonsHandler, FeatureDevHandler, Handlers,
    HostMessageHandler,
};
use par_connector::protocol::{
    ChatPrompt, CodeBlockPayload, CodeReference, FeedbackPayload, FollowUp, FormAction,
    HostCommand, HostMessage, Vote,
};
use par_connector::{HostOutbox, RetryPolicy, Router, TabId};
use parking_lot::Mutex;
use tokio::sync::mpsc;

pub const CHAT: &str = "chat";
pub const FEATURE_DEV: &str = "feature-dev";
pub const CODE_TRANSFORM: &str = "code-transform";
pub const COMMONS: &str = "commons";

/// One handler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Which handler was called (`CHAT`, `FEATURE_DEV`, ...)
    pub handler: &'static str,
    pub method: &'static str,
    pub tab_id: Option<String>,
    /// Method-specific argument summary
    pub detail: String,
}

/// Shared, cloneable record of handler calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().clone()
    }

    /// `(handler, method)` pairs in call order.
    pub fn methods(&self) -> Vec<(&'static str, &'static str)> {
        self.0
            .lock()
            .iter()
            .map(|c| (c.handler, c.method))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }

    fn push(&self, call: Call) {
        self.0.lock().push(call);
    }
}

/// A handler that records every call into a [`CallLog`].
pub struct Recorder {
    name: &'static str,
    sender: String,
    log: CallLog,
}

impl Recorder {
    pub fn new(name: &'static str, sender: &str, log: &CallLog) -> Self {
        Self {
            name,
            sender: sender.to_string(),
            log: log.clone(),
        }
    }

    fn record(&self, method: &'static str, tab_id: Option<&TabId>, detail: impl Into<String>) {
        self.log.push(Call {
            handler: self.name,
            method,
            tab_id: tab_id.map(TabId::to_string),
            detail: detail.into(),
        });
    }
}

impl HostMessageHandler for Recorder {
    fn sender_tag(&self) -> &str {
        &self.sender
    }

    fn handle_host_message(&mut self, message: HostMessage) {
        let detail = message.message_type().unwrap_or_default().to_string();
        self.record("handle_host_message", None, detail);
    }
}

impl ChatHandler for Recorder {
    fn source_link_click(&mut self, tab_id: &TabId, _message_id: &str, link: &str) {
        self.record("source_link_click", Some(tab_id), link);
    }
    fn response_body_link_click(&mut self, tab_id: &TabId, _message_id: &str, link: &str) {
        self.record("response_body_link_click", Some(tab_id), link);
    }
    fn info_link_click(&mut self, tab_id: &TabId, link: &str) {
        self.record("info_link_click", Some(tab_id), link);
    }
    fn follow_up_clicked(&mut self, tab_id: &TabId, _message_id: &str, follow_up: &FollowUp) {
        self.record("follow_up_clicked", Some(tab_id), follow_up.pill_text.clone());
    }
    fn copy_code_to_clipboard(&mut self, tab_id: &TabId, block: &CodeBlockPayload) {
        self.record("copy_code_to_clipboard", Some(tab_id), block.code.clone());
    }
    fn insert_code_at_cursor(&mut self, tab_id: &TabId, block: &CodeBlockPayload) {
        let detail = format!("{} block={:?}", block.code, block.code_block_index);
        self.record("insert_code_at_cursor", Some(tab_id), detail);
    }
    fn chat_item_voted(&mut self, tab_id: &TabId, _message_id: &str, vote: Vote) {
        self.record("chat_item_voted", Some(tab_id), format!("{vote:?}"));
    }
    fn send_feedback(&mut self, tab_id: &TabId, feedback: &FeedbackPayload) {
        self.record("send_feedback", Some(tab_id), feedback.selected_option.clone());
    }
    fn stop_chat_response(&mut self, tab_id: &TabId) {
        self.record("stop_chat_response", Some(tab_id), "");
    }
    fn auth_follow_up_clicked(&mut self, tab_id: &TabId, auth_type: &str) {
        self.record("auth_follow_up_clicked", Some(tab_id), auth_type);
    }
    fn clear_chat(&mut self, tab_id: &TabId) {
        self.record("clear_chat", Some(tab_id), "");
    }
    fn help(&mut self, tab_id: &TabId) {
        self.record("help", Some(tab_id), "");
    }
    fn tab_changed(&mut self, tab_id: &TabId, previous: Option<&TabId>) {
        let detail = previous.map(TabId::to_string).unwrap_or_default();
        self.record("tab_changed", Some(tab_id), detail);
    }
    fn tab_removed(&mut self, tab_id: &TabId) {
        self.record("tab_removed", Some(tab_id), "");
    }
    fn request_generative_answer(&mut self, tab_id: &TabId, prompt: &ChatPrompt) {
        self.record("request_generative_answer", Some(tab_id), prompt.prompt.clone());
    }
}

impl FeatureDevHandler for Recorder {
    fn response_body_link_click(&mut self, tab_id: &TabId, _message_id: &str, link: &str) {
        self.record("response_body_link_click", Some(tab_id), link);
    }
    fn follow_up_clicked(&mut self, tab_id: &TabId, _message_id: &str, follow_up: &FollowUp) {
        self.record("follow_up_clicked", Some(tab_id), follow_up.pill_text.clone());
    }
    fn insert_code_at_cursor(&mut self, tab_id: &TabId, code: &str, references: &[CodeReference]) {
        let detail = format!("{code} refs={}", references.len());
        self.record("insert_code_at_cursor", Some(tab_id), detail);
    }
    fn open_diff(&mut self, tab_id: &TabId, file_path: &str, deleted: bool, _message_id: &str) {
        self.record("open_diff", Some(tab_id), format!("{file_path} deleted={deleted}"));
    }
    fn file_action_click(
        &mut self,
        tab_id: &TabId,
        _message_id: &str,
        file_path: &str,
        action_name: &str,
    ) {
        self.record("file_action_click", Some(tab_id), format!("{action_name} {file_path}"));
    }
    fn chat_item_voted(&mut self, tab_id: &TabId, _message_id: &str, vote: Vote) {
        self.record("chat_item_voted", Some(tab_id), format!("{vote:?}"));
    }
    fn send_feedback(&mut self, tab_id: &TabId, feedback: &FeedbackPayload) {
        self.record("send_feedback", Some(tab_id), feedback.selected_option.clone());
    }
    fn stop_chat_response(&mut self, tab_id: &TabId) {
        self.record("stop_chat_response", Some(tab_id), "");
    }
    fn custom_form_action(&mut self, tab_id: &TabId, action: &FormAction) {
        self.record("custom_form_action", Some(tab_id), action.id.clone());
    }
    fn auth_follow_up_clicked(&mut self, tab_id: &TabId, auth_type: &str) {
        self.record("auth_follow_up_clicked", Some(tab_id), auth_type);
    }
    fn tab_opened(&mut self, tab_id: &TabId) {
        self.record("tab_opened", Some(tab_id), "");
    }
    fn tab_removed(&mut self, tab_id: &TabId) {
        self.record("tab_removed", Some(tab_id), "");
    }
    fn request_answer(&mut self, tab_id: &TabId, prompt: &ChatPrompt) {
        self.record("request_answer", Some(tab_id), prompt.prompt.clone());
    }
    fn request_generative_answer(&mut self, tab_id: &TabId, prompt: &ChatPrompt) {
        self.record("request_generative_answer", Some(tab_id), prompt.prompt.clone());
    }
}

impl CodeTransformHandler for Recorder {
    fn response_body_link_click(&mut self, tab_id: &TabId, _message_id: &str, link: &str) {
        self.record("response_body_link_click", Some(tab_id), link);
    }
    fn follow_up_clicked(&mut self, tab_id: &TabId, _message_id: &str, follow_up: &FollowUp) {
        self.record("follow_up_clicked", Some(tab_id), follow_up.pill_text.clone());
    }
    fn custom_form_action(&mut self, tab_id: &TabId, action: &FormAction) {
        self.record("custom_form_action", Some(tab_id), action.id.clone());
    }
    fn auth_follow_up_clicked(&mut self, tab_id: &TabId, auth_type: &str) {
        self.record("auth_follow_up_clicked", Some(tab_id), auth_type);
    }
    fn tab_opened(&mut self, tab_id: &TabId) {
        self.record("tab_opened", Some(tab_id), "");
    }
    fn tab_removed(&mut self, tab_id: &TabId) {
        self.record("tab_removed", Some(tab_id), "");
    }
    fn transform(&mut self, tab_id: &TabId) {
        self.record("transform", Some(tab_id), "");
    }
    fn request_answer(&mut self, tab_id: &TabId, prompt: &ChatPrompt) {
        self.record("request_answer", Some(tab_id), prompt.prompt.clone());
    }
}

impl CommonsHandler for Recorder {
    fn follow_up_clicked(&mut self, tab_id: &TabId, _message_id: &str, follow_up: &FollowUp) {
        self.record("follow_up_clicked", Some(tab_id), follow_up.pill_text.clone());
    }
}

/// Handlers for all four categories, recording into `log`, using the
/// default sender tags.
pub fn recording_handlers(log: &CallLog) -> Handlers {
    Handlers::new()
        .with_chat(Recorder::new(CHAT, "CWChat", log))
        .with_feature_dev(Recorder::new(FEATURE_DEV, "featureDevChat", log))
        .with_code_transform(Recorder::new(CODE_TRANSFORM, "gumbyChat", log))
        .with_commons(Recorder::new(COMMONS, "amazonqCore", log))
}

/// A router whose handlers all record into the returned log.
pub fn recording_router() -> (Router, CallLog, mpsc::UnboundedReceiver<HostCommand>) {
    recording_router_with_policy(RetryPolicy::default())
}

pub fn recording_router_with_policy(
    policy: RetryPolicy,
) -> (Router, CallLog, mpsc::UnboundedReceiver<HostCommand>) {
    let log = CallLog::default();
    let (outbox, rx) = HostOutbox::channel();
    let router = Router::new(recording_handlers(&log), outbox, policy);
    (router, log, rx)
}

/// Register `id` and give it `category`.
pub fn open_tab(router: &mut Router, id: &str, category: par_connector::protocol::TabCategory) {
    router.add_tab(id.into()).expect("tab id should be new");
    if !category.is_unknown() {
        assert!(router.set_category(&id.into(), category));
    }
}

pub fn follow_up(text: &str) -> FollowUp {
    FollowUp {
        pill_text: text.to_string(),
        prompt: None,
        kind: None,
    }
}

pub fn prompt(text: &str) -> ChatPrompt {
    ChatPrompt::text(text)
}
