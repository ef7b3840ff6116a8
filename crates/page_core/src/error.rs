use thiserror::Error;

/// Failure to obtain any response from the intake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("failed to build intake http client: {0}")]
    Client(String),
    #[error("intake request failed: {0}")]
    Request(String),
}

impl TransportError {
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        // Strip the URL; it is already in the log span and may carry a form id.
        Self::Request(err.without_url().to_string())
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid intake url '{url}': {source}")]
    InvalidIntakeUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("intake url '{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("unknown validation policy '{0}' (expected passthrough or require_non_empty)")]
    UnknownValidationPolicy(String),
    #[error("failed to parse settings: {0}")]
    Parse(String),
    #[error("failed to read settings file '{path}': {message}")]
    Read { path: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("page session is no longer running")]
pub struct SessionClosed;
