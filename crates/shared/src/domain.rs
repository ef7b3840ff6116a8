use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub u64);
    };
}

id_newtype!(SubmissionId);

impl SubmissionId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// In-page sections reachable from the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavSection {
    Home,
    Services,
    About,
    Contact,
}

impl NavSection {
    pub const ALL: [NavSection; 4] = [
        NavSection::Home,
        NavSection::Services,
        NavSection::About,
        NavSection::Contact,
    ];

    pub fn anchor(self) -> &'static str {
        match self {
            Self::Home => "#home",
            Self::Services => "#services",
            Self::About => "#about",
            Self::Contact => "#contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Services => "Services",
            Self::About => "About",
            Self::Contact => "Contact",
        }
    }
}

impl FromStr for NavSection {
    type Err = NavParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let needle = raw.trim().trim_start_matches('#');
        Self::ALL
            .into_iter()
            .find(|section| section.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| NavParseError(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown page section '{0}'")]
pub struct NavParseError(pub String);

/// Contact form inputs, named after their HTML `name` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Email, FormField::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Your Name",
            Self::Email => "Your Email",
            Self::Message => "Your Message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = FieldParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "message" => Ok(Self::Message),
            _ => Err(FieldParseError(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown contact form field '{0}'")]
pub struct FieldParseError(pub String);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Fields that are empty or whitespace-only, in form order.
    pub fn blank_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The intake was reached but answered with a non-2xx status.
    ServerRejected,
    /// No response was obtained at all.
    NetworkError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Success,
    Failure(FailureKind),
    /// Rejected locally before dispatch; only produced under strict validation.
    Invalid(Vec<FormField>),
}

impl SubmissionStatus {
    pub fn is_sending(&self) -> bool {
        matches!(self, Self::Sending)
    }

    /// Terminal statuses fall back to `Idle` on the next field edit.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failure(_) | Self::Invalid(_))
    }
}
