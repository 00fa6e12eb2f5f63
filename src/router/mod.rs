//! The tab-scoped event router.
//!
//! [`Router`] owns the tab registry and one handler per category. UI actions
//! come in keyed by tab id; the router looks up the tab's category and hands
//! the action to that category's handler, or drops it when the category does
//! not support the action. Host payloads come in as raw text and are routed by
//! their `sender` field instead.
//!
//! The router never returns errors from routing paths. Unknown tabs,
//! unsupported event/category pairs and malformed host payloads are logged
//! and ignored.

mod dispatch;
pub mod events;

pub use events::UiEvent;

use par_connector_config::ConnectorConfig;
use par_connector_protocol::{
    ChatPrompt, FocusType, HostCommand, TabCategory, parse_host_message,
};

use crate::handlers::{
    ChatHandler, CodeTransformHandler, CommonsHandler, FeatureDevHandler, Handlers,
    relay_handlers,
};
use crate::host::{HostOutbox, UiSink};
use crate::readiness::{GateDecision, RetryPolicy};
use crate::tab::{OpenInteractionType, RegistryError, TabId, TabRegistry, TabStatus};

/// Routes UI events and host payloads to per-category handlers.
#[derive(Debug)]
pub struct Router {
    registry: TabRegistry,
    handlers: Handlers,
    outbox: HostOutbox,
    retry: RetryPolicy,
    ready: bool,
}

impl Router {
    pub fn new(handlers: Handlers, outbox: HostOutbox, retry: RetryPolicy) -> Self {
        Self {
            registry: TabRegistry::new(),
            handlers,
            outbox,
            retry,
            ready: false,
        }
    }

    /// A router wired to the default relay handlers.
    pub fn from_config(config: &ConnectorConfig, outbox: HostOutbox, ui: UiSink) -> Self {
        let handlers = relay_handlers(&config.senders, &outbox, &ui);
        Self::new(handlers, outbox, RetryPolicy::from_config(&config.readiness))
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    // ------------------------------------------------------------------
    // Tab lifecycle
    // ------------------------------------------------------------------

    /// Register a newly opened tab with category `unknown`.
    ///
    /// # Errors
    /// [`RegistryError::AlreadyExists`] for a duplicate id. The existing tab
    /// keeps its state.
    pub fn add_tab(&mut self, id: TabId) -> Result<(), RegistryError> {
        self.registry.add_tab(id).inspect_err(|e| {
            log::warn!("Ignoring tab add: {e}");
        })
    }

    /// Forget a tab and tell its category handler it is gone.
    pub fn remove_tab(&mut self, id: &TabId) {
        let Some(tab) = self.registry.delete_tab(id) else {
            log::trace!("Remove for unregistered tab {id} ignored");
            return;
        };

        match tab.category {
            TabCategory::Chat => {
                self.with_chat(|h| h.tab_removed(id));
            }
            TabCategory::FeatureDev => {
                self.with_feature_dev(|h| h.tab_removed(id));
            }
            TabCategory::CodeTransform => {
                self.with_code_transform(|h| h.tab_removed(id));
            }
            TabCategory::Unknown => {}
        }
    }

    /// Select a tab and return the previously selected id.
    ///
    /// The chat handler observes every selection change, whatever the tab's
    /// category.
    pub fn set_selected(&mut self, id: &TabId) -> Option<TabId> {
        if !self.registry.contains(id) {
            log::trace!("Select for unregistered tab {id} ignored");
            return None;
        }

        let previous = self.registry.set_selected(id);
        if previous.as_ref() != Some(id) {
            self.with_chat(|h| h.tab_changed(id, previous.as_ref()));
        }
        previous
    }

    /// Give an `unknown` tab its concrete category. Returns whether it changed.
    pub fn set_category(&mut self, id: &TabId, category: TabCategory) -> bool {
        match self.registry.update_category_from_unknown(id, category) {
            Ok(changed) => changed,
            Err(e) => {
                log::warn!("Ignoring category change: {e}");
                false
            }
        }
    }

    pub fn set_status(&mut self, id: &TabId, status: TabStatus) {
        self.registry.update_status(id, status);
    }

    pub fn set_open_interaction_type(&mut self, id: &TabId, kind: OpenInteractionType) {
        self.registry.set_open_interaction_type(id, kind);
    }

    // ------------------------------------------------------------------
    // Answers
    // ------------------------------------------------------------------

    /// Forward a prompt to the feature-dev or code-transform handler.
    pub fn request_answer(&mut self, id: &TabId, prompt: &ChatPrompt) {
        let routed = match self.registry.category_of(id) {
            Some(TabCategory::FeatureDev) => {
                self.with_feature_dev(|h| h.request_answer(id, prompt))
            }
            Some(TabCategory::CodeTransform) => {
                self.with_code_transform(|h| h.request_answer(id, prompt))
            }
            _ => false,
        };

        if routed {
            self.record_command(id, prompt);
        } else {
            log::trace!("Answer request for tab {id} dropped");
        }
    }

    /// Forward a prompt that needs a generated answer, if the panel is ready.
    ///
    /// `attempt` counts how many times this request has already been deferred
    /// (0 on first submission). Before the panel is ready the request is not
    /// delivered; the caller gets [`GateDecision::Deferred`] with the delay
    /// before resubmitting, or [`GateDecision::TimedOut`] once the retry budget
    /// is spent.
    pub fn request_generative_answer(
        &mut self,
        id: &TabId,
        prompt: &ChatPrompt,
        attempt: u32,
    ) -> GateDecision {
        if !self.ready {
            let next = attempt.saturating_add(1);
            return match self.retry.delay_for(next) {
                Some(retry_in) => {
                    log::debug!(
                        "Panel not ready, deferring answer for tab {id} by {retry_in:?} (attempt {next})"
                    );
                    GateDecision::Deferred {
                        retry_in,
                        attempt: next,
                    }
                }
                None => {
                    log::error!(
                        "Panel never became ready, abandoning answer for tab {id} after {attempt} retries"
                    );
                    GateDecision::TimedOut { attempts: attempt }
                }
            };
        }

        let routed = match self.registry.category_of(id) {
            Some(TabCategory::FeatureDev) => {
                self.with_feature_dev(|h| h.request_generative_answer(id, prompt))
            }
            Some(_) => self.with_chat(|h| h.request_generative_answer(id, prompt)),
            None => false,
        };

        if routed {
            self.registry.update_status(id, TabStatus::Busy);
            self.record_command(id, prompt);
            GateDecision::Dispatched
        } else {
            log::trace!("Generative answer for tab {id} dropped");
            GateDecision::Dropped
        }
    }

    fn record_command(&mut self, id: &TabId, prompt: &ChatPrompt) {
        if prompt.command.is_some() {
            self.registry.update_last_command(id, prompt.command.clone());
        }
    }

    // ------------------------------------------------------------------
    // Host side
    // ------------------------------------------------------------------

    /// Parse a raw host payload and hand it to the handler owning its sender.
    ///
    /// Malformed payloads are logged and discarded; unmatched senders are
    /// dropped.
    pub fn receive_host_message(&mut self, raw: &str) {
        let message = match parse_host_message(raw) {
            Ok(message) => message,
            Err(e) => {
                log::error!("Discarding host payload: {e}");
                return;
            }
        };

        let Some(category) = self.category_for_sender(message.sender()) else {
            log::trace!("No handler for sender {:?}", message.sender());
            return;
        };

        match category {
            TabCategory::Chat => {
                self.with_chat(|h| h.handle_host_message(message));
            }
            TabCategory::FeatureDev => {
                self.with_feature_dev(|h| h.handle_host_message(message));
            }
            TabCategory::CodeTransform => {
                self.with_code_transform(|h| h.handle_host_message(message));
            }
            TabCategory::Unknown => {
                self.with_commons(|h| h.handle_host_message(message));
            }
        }
    }

    /// The category whose handler declares `sender` as its tag.
    fn category_for_sender(&self, sender: &str) -> Option<TabCategory> {
        let handlers = &self.handlers;
        if handlers.chat.as_ref().is_some_and(|h| h.sender_tag() == sender) {
            Some(TabCategory::Chat)
        } else if handlers
            .feature_dev
            .as_ref()
            .is_some_and(|h| h.sender_tag() == sender)
        {
            Some(TabCategory::FeatureDev)
        } else if handlers
            .code_transform
            .as_ref()
            .is_some_and(|h| h.sender_tag() == sender)
        {
            Some(TabCategory::CodeTransform)
        } else if handlers
            .commons
            .as_ref()
            .is_some_and(|h| h.sender_tag() == sender)
        {
            Some(TabCategory::Unknown)
        } else {
            None
        }
    }

    /// Mark the panel ready and announce it to the host.
    ///
    /// Returns `true` on the first call only. The owner subscribes to host and
    /// focus events when this returns `true`; later calls change nothing.
    pub fn mark_ready(&mut self) -> bool {
        if self.ready {
            log::debug!("mark_ready called again, ignoring");
            return false;
        }
        self.ready = true;
        self.outbox.post(HostCommand::UiIsReady);
        log::info!("Panel ready");
        true
    }

    /// Tell the host the panel gained or lost focus.
    pub fn focus_changed(&mut self, focused: bool) {
        self.outbox.post(HostCommand::UiFocus {
            focus_type: FocusType::from_focused(focused),
            tab_type: TabCategory::Chat,
        });
    }

    // ------------------------------------------------------------------
    // Handler access
    // ------------------------------------------------------------------

    fn with_chat(&mut self, f: impl FnOnce(&mut dyn ChatHandler)) -> bool {
        match self.handlers.chat.as_deref_mut() {
            Some(handler) => {
                f(handler);
                true
            }
            None => false,
        }
    }

    fn with_feature_dev(&mut self, f: impl FnOnce(&mut dyn FeatureDevHandler)) -> bool {
        match self.handlers.feature_dev.as_deref_mut() {
            Some(handler) => {
                f(handler);
                true
            }
            None => false,
        }
    }

    fn with_code_transform(&mut self, f: impl FnOnce(&mut dyn CodeTransformHandler)) -> bool {
        match self.handlers.code_transform.as_deref_mut() {
            Some(handler) => {
                f(handler);
                true
            }
            None => false,
        }
    }

    fn with_commons(&mut self, f: impl FnOnce(&mut dyn CommonsHandler)) -> bool {
        match self.handlers.commons.as_deref_mut() {
            Some(handler) => {
                f(handler);
                true
            }
            None => false,
        }
    }
}
