use std::sync::Arc;

use shared::{
    domain::{FormField, NavSection, SubmissionId},
    protocol::ContactSubmission,
};
use tracing::{debug, info, warn};

use crate::{
    config::Settings,
    error::TransportError,
    state::{SubmitGate, UiState, ValidationPolicy},
    transport::{HttpIntakeTransport, IntakeTransport, SubmissionOutcome},
};

pub struct PageController {
    state: UiState,
    transport: Arc<dyn IntakeTransport>,
    validation: ValidationPolicy,
    last_submission: SubmissionId,
    in_flight: Option<SubmissionId>,
}

/// A submission that has passed the gate and is ready to hit the network.
pub struct PendingSubmission {
    id: SubmissionId,
    payload: ContactSubmission,
    transport: Arc<dyn IntakeTransport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSubmission {
    pub id: SubmissionId,
    pub outcome: SubmissionOutcome,
}

impl PendingSubmission {
    pub fn id(&self) -> SubmissionId {
        self.id
    }

    pub fn payload(&self) -> &ContactSubmission {
        &self.payload
    }

    pub async fn dispatch(self) -> CompletedSubmission {
        let outcome = self.transport.post_submission(&self.payload).await.into();
        CompletedSubmission {
            id: self.id,
            outcome,
        }
    }
}

impl PageController {
    pub fn new(transport: Arc<dyn IntakeTransport>) -> Self {
        Self {
            state: UiState::default(),
            transport,
            validation: ValidationPolicy::default(),
            last_submission: SubmissionId::default(),
            in_flight: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, TransportError> {
        let transport = HttpIntakeTransport::from_settings(settings)?;
        Ok(Self::new(Arc::new(transport)).with_validation(settings.validation))
    }

    pub fn with_validation(mut self, policy: ValidationPolicy) -> Self {
        self.validation = policy;
        self
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn in_flight(&self) -> Option<SubmissionId> {
        self.in_flight
    }

    fn transition(&mut self, step: impl FnOnce(UiState) -> UiState) {
        let current = std::mem::take(&mut self.state);
        self.state = step(current);
    }

    pub fn toggle_theme(&mut self) {
        self.transition(UiState::toggled_theme);
        debug!(theme = ?self.state.theme, "theme toggled");
    }

    pub fn toggle_menu(&mut self) {
        self.transition(UiState::toggled_menu);
        debug!(menu_open = self.state.menu_open, "menu toggled");
    }

    pub fn select_nav(&mut self, section: NavSection) {
        self.transition(|state| state.navigated(section));
        debug!(anchor = section.anchor(), "nav link selected");
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        debug!(field = field.as_str(), len = value.len(), "form field edited");
        self.transition(|state| state.with_field(field, value));
    }

    /// Synchronous half of a submit: applies the gate and, when allowed, marks
    /// the state `Sending` before anything goes on the wire.
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        let current = std::mem::take(&mut self.state);
        let (next, gate) = current.begin_submit(self.validation);
        self.state = next;

        match gate {
            SubmitGate::AlreadySending => {
                debug!(in_flight = ?self.in_flight, "submit ignored; already sending");
                None
            }
            SubmitGate::Invalid(missing) => {
                let missing: Vec<&str> = missing.iter().map(|f| f.as_str()).collect();
                info!(?missing, "submit refused locally; blank fields");
                None
            }
            SubmitGate::Dispatch(payload) => {
                self.last_submission = self.last_submission.next();
                let id = self.last_submission;
                self.in_flight = Some(id);
                info!(submission_id = %id, "contact form submission started");
                Some(PendingSubmission {
                    id,
                    payload,
                    transport: Arc::clone(&self.transport),
                })
            }
        }
    }

    /// Applies a finished dispatch. Returns `false` when the result does not
    /// belong to the submission currently in flight.
    pub fn complete_submit(&mut self, completed: CompletedSubmission) -> bool {
        if self.in_flight != Some(completed.id) {
            warn!(
                submission_id = %completed.id,
                in_flight = ?self.in_flight,
                "ignoring stale submission result"
            );
            return false;
        }
        self.in_flight = None;

        match &completed.outcome {
            SubmissionOutcome::Delivered => {
                info!(submission_id = %completed.id, "contact form delivered");
            }
            SubmissionOutcome::Rejected { status, detail } => {
                warn!(
                    submission_id = %completed.id,
                    status,
                    detail = detail.as_deref().unwrap_or("-"),
                    "intake rejected contact form"
                );
            }
            SubmissionOutcome::Unreachable(error) => {
                warn!(submission_id = %completed.id, %error, "intake unreachable");
            }
        }

        self.transition(|state| state.resolved(&completed.outcome));
        true
    }

    /// Whole submit in one call. Holds `&mut self` across the request, so an
    /// event loop that must stay responsive should use
    /// [`begin_submit`](Self::begin_submit) and
    /// [`complete_submit`](Self::complete_submit) instead.
    pub async fn submit(&mut self) {
        if let Some(pending) = self.begin_submit() {
            let completed = pending.dispatch().await;
            self.complete_submit(completed);
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
