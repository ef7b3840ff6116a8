use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Validation,
}

/// Per-field complaint in an intake rejection body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeFieldError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
}

/// Body returned by a form intake alongside a non-2xx status.
///
/// Formspree-style intakes send `{"error": "..."}`, `{"errors": [...]}` or both;
/// every part is optional so a partial body still decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<IntakeFieldError>,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation => "validation",
        }
    }
}

impl IntakeErrorBody {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            errors: vec![IntakeFieldError {
                field: None,
                code: Some(code.as_str().to_string()),
                message: message.clone(),
            }],
            error: Some(message),
        }
    }

    pub fn field(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.push(IntakeFieldError {
            field: Some(field.into()),
            code: Some(ErrorCode::Validation.as_str().to_string()),
            message: message.into(),
        });
        self
    }

    /// One line suitable for logs; `None` when the body carried nothing readable.
    pub fn summary(&self) -> Option<String> {
        let details: Vec<String> = self
            .errors
            .iter()
            .filter_map(|e| {
                e.field
                    .as_ref()
                    .map(|field| format!("{field}: {}", e.message))
            })
            .collect();

        match (&self.error, details.is_empty()) {
            (Some(error), true) => Some(error.clone()),
            (Some(error), false) => Some(format!("{error} ({})", details.join("; "))),
            (None, false) => Some(details.join("; ")),
            (None, true) => self.errors.first().map(|e| e.message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_joins_field_errors() {
        let body: IntakeErrorBody = serde_json::from_value(serde_json::json!({
            "error": "Validation errors",
            "errors": [
                { "field": "email", "code": "TYPE_EMAIL", "message": "should be an email" },
                { "field": "message", "message": "is required" }
            ]
        }))
        .expect("decode");
        assert_eq!(
            body.summary().as_deref(),
            Some("Validation errors (email: should be an email; message: is required)")
        );
    }

    #[test]
    fn summary_of_bare_error_is_the_error() {
        let body: IntakeErrorBody =
            serde_json::from_str(r#"{"error":"Form not found"}"#).expect("decode");
        assert_eq!(body.summary().as_deref(), Some("Form not found"));
        assert_eq!(IntakeErrorBody::default().summary(), None);
    }

    #[test]
    fn coded_body_keeps_message_out_of_field_details() {
        let body = IntakeErrorBody::new(ErrorCode::NotFound, "no such form");
        assert_eq!(body.error.as_deref(), Some("no such form"));
        assert_eq!(body.errors[0].code.as_deref(), Some("not_found"));
        assert_eq!(body.summary().as_deref(), Some("no such form"));

        let json = serde_json::to_value(ErrorCode::Validation).expect("json");
        assert_eq!(json, serde_json::json!(ErrorCode::Validation.as_str()));
    }
}
