//! The router as a tokio task.
//!
//! [`RouterService`] owns a [`Router`] and is its only writer. UI inputs,
//! raw host payloads and focus changes all arrive through one
//! [`RouterHandle`] channel and are applied in the order they were sent.
//! Host payloads and focus changes sent before the panel is marked ready are
//! held back and applied, still in order, right after `ui-is-ready` goes out.
//!
//! Deferred generative-answer requests are rescheduled with
//! `tokio::time::sleep` and fed back into the loop, so a retry is processed
//! by the same task as every other input.

use std::collections::VecDeque;

use par_connector_protocol::{ChatPrompt, TabCategory};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::ConnectorError;
use crate::host::{UiSink, UiUpdate};
use crate::readiness::GateDecision;
use crate::router::{Router, UiEvent};
use crate::tab::{OpenInteractionType, TabId, TabStatus};

/// An input from the UI side of the panel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "input", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum RouterInput {
    AddTab {
        tab_id: TabId,
    },
    RemoveTab {
        tab_id: TabId,
    },
    SelectTab {
        tab_id: TabId,
    },
    SetCategory {
        tab_id: TabId,
        category: TabCategory,
    },
    SetStatus {
        tab_id: TabId,
        status: TabStatus,
    },
    SetOpenInteractionType {
        tab_id: TabId,
        kind: OpenInteractionType,
    },
    Event {
        tab_id: TabId,
        event: UiEvent,
    },
    RequestAnswer {
        tab_id: TabId,
        prompt: ChatPrompt,
    },
    RequestGenerativeAnswer {
        tab_id: TabId,
        prompt: ChatPrompt,
    },
    MarkReady,
}

/// Panel focus change reported by the host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEvent {
    Focus,
    Blur,
}

#[derive(Debug)]
enum Request {
    Input(RouterInput),
    Host(String),
    Focus(FocusEvent),
    Shutdown,
}

/// Traffic that only flows once the panel is subscribed.
#[derive(Debug)]
enum Subscribed {
    Host(String),
    Focus(FocusEvent),
}

/// A generative-answer request waiting for its next attempt.
#[derive(Debug)]
struct PendingAnswer {
    tab_id: TabId,
    prompt: ChatPrompt,
    attempt: u32,
}

/// Cloneable sender for everything the service consumes.
#[derive(Debug, Clone)]
pub struct RouterHandle {
    tx: mpsc::UnboundedSender<Request>,
}

impl RouterHandle {
    fn request(&self, request: Request) -> Result<(), ConnectorError> {
        self.tx
            .send(request)
            .map_err(|_| ConnectorError::ServiceClosed)
    }

    /// Queue an input for the service.
    ///
    /// # Errors
    /// [`ConnectorError::ServiceClosed`] once the service has stopped.
    pub fn send(&self, input: RouterInput) -> Result<(), ConnectorError> {
        self.request(Request::Input(input))
    }

    /// Queue a raw host payload. Held until the panel is ready.
    pub fn host_message(&self, raw: impl Into<String>) -> Result<(), ConnectorError> {
        self.request(Request::Host(raw.into()))
    }

    /// Queue a focus change. Held until the panel is ready.
    pub fn focus(&self, event: FocusEvent) -> Result<(), ConnectorError> {
        self.request(Request::Focus(event))
    }

    pub fn dispatch(&self, tab_id: impl Into<TabId>, event: UiEvent) -> Result<(), ConnectorError> {
        self.send(RouterInput::Event {
            tab_id: tab_id.into(),
            event,
        })
    }

    pub fn mark_ready(&self) -> Result<(), ConnectorError> {
        self.send(RouterInput::MarkReady)
    }

    /// Ask the service to stop after the inputs already queued.
    pub fn shutdown(&self) -> Result<(), ConnectorError> {
        self.request(Request::Shutdown)
    }
}

/// A spawned [`RouterService`] and the handle that feeds it.
#[derive(Debug)]
pub struct RunningService {
    pub handle: RouterHandle,
    task: JoinHandle<Router>,
}

impl RunningService {
    /// Stop the service and hand back the router.
    pub async fn shutdown(self) -> Result<Router, ConnectorError> {
        // Already stopped is fine; the join below still yields the router.
        let _ = self.handle.shutdown();
        self.task.await.map_err(ConnectorError::from)
    }
}

pub struct RouterService {
    router: Router,
    ui: UiSink,
    requests: mpsc::UnboundedReceiver<Request>,
    held: VecDeque<Subscribed>,
    retry_tx: mpsc::UnboundedSender<PendingAnswer>,
    retry_rx: mpsc::UnboundedReceiver<PendingAnswer>,
}

impl RouterService {
    /// Spawn the service on the current tokio runtime.
    pub fn spawn(router: Router, ui: UiSink) -> RunningService {
        let (tx, requests) = mpsc::unbounded_channel();
        let (retry_tx, retry_rx) = mpsc::unbounded_channel();

        let service = Self {
            router,
            ui,
            requests,
            held: VecDeque::new(),
            retry_tx,
            retry_rx,
        };

        RunningService {
            handle: RouterHandle { tx },
            task: tokio::spawn(service.run()),
        }
    }

    async fn run(mut self) -> Router {
        log::info!("Router service started");

        loop {
            // Requests first: a shutdown must not overtake inputs queued before it.
            tokio::select! {
                biased;
                request = self.requests.recv() => match request {
                    Some(Request::Input(input)) => self.apply(input),
                    Some(Request::Host(raw)) => self.subscribed(Subscribed::Host(raw)),
                    Some(Request::Focus(event)) => self.subscribed(Subscribed::Focus(event)),
                    Some(Request::Shutdown) | None => break,
                },
                Some(pending) = self.retry_rx.recv() => {
                    self.request_generative_answer(pending.tab_id, pending.prompt, pending.attempt);
                }
            }
        }

        if !self.held.is_empty() {
            log::debug!(
                "Discarding {} host/focus inputs, panel never became ready",
                self.held.len()
            );
        }

        log::info!("Router service stopped");
        self.router
    }

    fn apply(&mut self, input: RouterInput) {
        match input {
            RouterInput::AddTab { tab_id } => {
                // Duplicate adds are already logged by the router.
                let _ = self.router.add_tab(tab_id);
            }
            RouterInput::RemoveTab { tab_id } => self.router.remove_tab(&tab_id),
            RouterInput::SelectTab { tab_id } => {
                self.router.set_selected(&tab_id);
            }
            RouterInput::SetCategory { tab_id, category } => {
                self.router.set_category(&tab_id, category);
            }
            RouterInput::SetStatus { tab_id, status } => self.router.set_status(&tab_id, status),
            RouterInput::SetOpenInteractionType { tab_id, kind } => {
                self.router.set_open_interaction_type(&tab_id, kind);
            }
            RouterInput::Event { tab_id, event } => self.router.dispatch(&tab_id, &event),
            RouterInput::RequestAnswer { tab_id, prompt } => {
                self.router.request_answer(&tab_id, &prompt);
            }
            RouterInput::RequestGenerativeAnswer { tab_id, prompt } => {
                self.request_generative_answer(tab_id, prompt, 0);
            }
            RouterInput::MarkReady => {
                if self.router.mark_ready() {
                    log::debug!(
                        "Subscribed to host and focus events, {} held back",
                        self.held.len()
                    );
                    while let Some(item) = self.held.pop_front() {
                        self.deliver(item);
                    }
                }
            }
        }
    }

    fn subscribed(&mut self, item: Subscribed) {
        if self.router.is_ready() {
            self.deliver(item);
        } else {
            self.held.push_back(item);
        }
    }

    fn deliver(&mut self, item: Subscribed) {
        match item {
            Subscribed::Host(raw) => self.router.receive_host_message(&raw),
            Subscribed::Focus(event) => self.router.focus_changed(event == FocusEvent::Focus),
        }
    }

    fn request_generative_answer(&mut self, tab_id: TabId, prompt: ChatPrompt, attempt: u32) {
        match self
            .router
            .request_generative_answer(&tab_id, &prompt, attempt)
        {
            GateDecision::Dispatched | GateDecision::Dropped => {}
            GateDecision::Deferred { retry_in, attempt } => {
                let retry_tx = self.retry_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(retry_in).await;
                    if retry_tx
                        .send(PendingAnswer {
                            tab_id,
                            prompt,
                            attempt,
                        })
                        .is_err()
                    {
                        log::debug!("Router service gone, retry discarded");
                    }
                });
            }
            GateDecision::TimedOut { attempts } => {
                self.ui
                    .send(UiUpdate::GenerativeAnswerTimeout { tab_id, attempts });
            }
        }
    }
}
