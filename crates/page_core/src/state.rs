use std::str::FromStr;

use shared::{
    domain::{ContactForm, FailureKind, FormField, NavSection, SubmissionStatus, ThemeMode},
    protocol::ContactSubmission,
};

use crate::{error::SettingsError, transport::SubmissionOutcome};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub theme: ThemeMode,
    pub menu_open: bool,
    pub form: ContactForm,
    pub status: SubmissionStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationPolicy {
    #[default]
    Passthrough,
    RequireNonEmpty,
}

impl FromStr for ValidationPolicy {
    type Err = SettingsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "passthrough" | "off" | "none" => Ok(Self::Passthrough),
            "require_non_empty" | "strict" | "required" => Ok(Self::RequireNonEmpty),
            _ => Err(SettingsError::UnknownValidationPolicy(raw.to_string())),
        }
    }
}

/// What a submit trigger is allowed to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitGate {
    AlreadySending,
    Invalid(Vec<FormField>),
    Dispatch(ContactSubmission),
}

impl UiState {
    pub fn toggled_theme(mut self) -> Self {
        self.theme = self.theme.toggled();
        self
    }

    pub fn toggled_menu(mut self) -> Self {
        self.menu_open = !self.menu_open;
        self
    }

    pub fn navigated(mut self, _section: NavSection) -> Self {
        self.menu_open = false;
        self
    }

    /// Sets one field. An edit acknowledges a finished submission, so terminal
    /// statuses drop back to `Idle`; an in-flight `Sending` is left alone.
    pub fn with_field(mut self, field: FormField, value: impl Into<String>) -> Self {
        self.form.set(field, value);
        if self.status.is_terminal() {
            self.status = SubmissionStatus::Idle;
        }
        self
    }

    pub fn begin_submit(mut self, policy: ValidationPolicy) -> (Self, SubmitGate) {
        if self.status.is_sending() {
            return (self, SubmitGate::AlreadySending);
        }

        if policy == ValidationPolicy::RequireNonEmpty {
            let blank = self.form.blank_fields();
            if !blank.is_empty() {
                self.status = SubmissionStatus::Invalid(blank.clone());
                return (self, SubmitGate::Invalid(blank));
            }
        }

        self.status = SubmissionStatus::Sending;
        let payload = ContactSubmission::from(&self.form);
        (self, SubmitGate::Dispatch(payload))
    }

    pub fn resolved(mut self, outcome: &SubmissionOutcome) -> Self {
        self.status = match outcome {
            SubmissionOutcome::Delivered => {
                self.form = ContactForm::default();
                SubmissionStatus::Success
            }
            SubmissionOutcome::Rejected { .. } => {
                SubmissionStatus::Failure(FailureKind::ServerRejected)
            }
            SubmissionOutcome::Unreachable(_) => {
                SubmissionStatus::Failure(FailureKind::NetworkError)
            }
        };
        self
    }
}
