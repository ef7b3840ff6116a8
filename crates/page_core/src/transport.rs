use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client,
};
use shared::{error::IntakeErrorBody, protocol::ContactSubmission};
use tracing::debug;
use url::Url;

use crate::{config::Settings, error::TransportError};

/// What the intake answered, when it answered at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeResponse {
    Accepted { status: u16 },
    Rejected { status: u16, detail: Option<String> },
}

#[async_trait]
pub trait IntakeTransport: Send + Sync {
    /// Posts one submission. Issues exactly one request, with no retry.
    async fn post_submission(
        &self,
        submission: &ContactSubmission,
    ) -> Result<IntakeResponse, TransportError>;
}

/// Result of one submission attempt, collapsed from the transport result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Delivered,
    Rejected { status: u16, detail: Option<String> },
    Unreachable(String),
}

impl From<Result<IntakeResponse, TransportError>> for SubmissionOutcome {
    fn from(result: Result<IntakeResponse, TransportError>) -> Self {
        match result {
            Ok(IntakeResponse::Accepted { .. }) => Self::Delivered,
            Ok(IntakeResponse::Rejected { status, detail }) => Self::Rejected { status, detail },
            Err(err) => Self::Unreachable(err.to_string()),
        }
    }
}

pub struct HttpIntakeTransport {
    http: Client,
    intake_url: Url,
}

impl HttpIntakeTransport {
    pub fn new(intake_url: Url) -> Self {
        Self {
            http: Client::new(),
            intake_url,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(user_agent) = &settings.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let http = builder
            .build()
            .map_err(|err| TransportError::Client(err.to_string()))?;
        Ok(Self {
            http,
            intake_url: settings.intake_url.clone(),
        })
    }

    pub fn intake_url(&self) -> &Url {
        &self.intake_url
    }
}

#[async_trait]
impl IntakeTransport for HttpIntakeTransport {
    async fn post_submission(
        &self,
        submission: &ContactSubmission,
    ) -> Result<IntakeResponse, TransportError> {
        let res = self
            .http
            .post(self.intake_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(submission)
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;

        let status = res.status();
        if status.is_success() {
            return Ok(IntakeResponse::Accepted {
                status: status.as_u16(),
            });
        }

        // The body only feeds logs; an unreadable one is not a transport failure.
        let detail = match res.json::<IntakeErrorBody>().await {
            Ok(body) => body.summary(),
            Err(err) => {
                debug!(error = %err, "intake rejection body was not json");
                None
            }
        };
        Ok(IntakeResponse::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
