use shared::domain::{FormField, NavSection};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    controller::{CompletedSubmission, PageController},
    error::SessionClosed,
    state::UiState,
    transport::SubmissionOutcome,
};

const EVENT_QUEUE_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    ToggleTheme,
    ToggleMenu,
    SelectNav(NavSection),
    SetField { field: FormField, value: String },
    Submit,
}

impl PageEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::ToggleTheme => "toggle_theme",
            Self::ToggleMenu => "toggle_menu",
            Self::SelectNav(_) => "select_nav",
            Self::SetField { .. } => "set_field",
            Self::Submit => "submit",
        }
    }
}

pub struct PageSession {
    events: mpsc::Sender<PageEvent>,
    state: watch::Receiver<UiState>,
    worker: JoinHandle<()>,
}

impl PageSession {
    pub fn spawn(controller: PageController) -> Self {
        let (events, event_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        let (state_tx, state) = watch::channel(controller.state().clone());
        let worker = tokio::spawn(run_session(controller, event_rx, state_tx));
        Self {
            events,
            state,
            worker,
        }
    }

    pub async fn send(&self, event: PageEvent) -> Result<(), SessionClosed> {
        self.events.send(event).await.map_err(|_| SessionClosed)
    }

    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.clone()
    }

    /// Stops accepting events. A submission already on the wire still runs
    /// to completion before the loop exits.
    pub async fn shutdown(self) -> UiState {
        let Self {
            events,
            state,
            worker,
        } = self;
        drop(events);
        if let Err(err) = worker.await {
            warn!(error = %err, "page session worker failed");
        }
        let last = state.borrow().clone();
        last
    }
}

async fn run_session(
    mut controller: PageController,
    mut event_rx: mpsc::Receiver<PageEvent>,
    state_tx: watch::Sender<UiState>,
) {
    let (done_tx, mut done_rx) = mpsc::channel::<CompletedSubmission>(EVENT_QUEUE_DEPTH);
    let mut accepting = true;

    loop {
        tokio::select! {
            event = event_rx.recv(), if accepting => {
                let Some(event) = event else {
                    accepting = false;
                    if controller.in_flight().is_none() {
                        break;
                    }
                    continue;
                };
                debug!(event = event.name(), "page event");
                handle_event(&mut controller, event, &done_tx);
            }
            Some(completed) = done_rx.recv() => {
                controller.complete_submit(completed);
                if !accepting && controller.in_flight().is_none() {
                    publish(&state_tx, &controller);
                    break;
                }
            }
        }
        publish(&state_tx, &controller);
    }

    info!("page session stopped");
}

fn handle_event(
    controller: &mut PageController,
    event: PageEvent,
    done_tx: &mpsc::Sender<CompletedSubmission>,
) {
    match event {
        PageEvent::ToggleTheme => controller.toggle_theme(),
        PageEvent::ToggleMenu => controller.toggle_menu(),
        PageEvent::SelectNav(section) => controller.select_nav(section),
        PageEvent::SetField { field, value } => controller.set_field(field, value),
        PageEvent::Submit => {
            if let Some(pending) = controller.begin_submit() {
                let id = pending.id();
                let dispatch = tokio::spawn(pending.dispatch());
                let done_tx = done_tx.clone();
                tokio::spawn(async move {
                    // A dispatch that dies still has to resolve, or the session
                    // stays in `Sending` and never shuts down.
                    let completed = dispatch.await.unwrap_or_else(|err| {
                        warn!(submission_id = %id, error = %err, "dispatch task failed");
                        CompletedSubmission {
                            id,
                            outcome: SubmissionOutcome::Unreachable(format!(
                                "dispatch task failed: {err}"
                            )),
                        }
                    });
                    let _ = done_tx.send(completed).await;
                });
            }
        }
    }
}

fn publish(state_tx: &watch::Sender<UiState>, controller: &PageController) {
    state_tx.send_if_modified(|current| {
        if current == controller.state() {
            return false;
        }
        *current = controller.state().clone();
        true
    });
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
