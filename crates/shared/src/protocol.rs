use serde::{Deserialize, Serialize};

use crate::domain::ContactForm;

/// JSON body posted to the form intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl From<&ContactForm> for ContactSubmission {
    fn from(form: &ContactForm) -> Self {
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            message: form.message.clone(),
        }
    }
}

/// Body of a successful intake response. Real intakes may send more; only
/// these keys are read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeAccepted {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_body_has_exactly_the_three_form_keys() {
        let form = ContactForm {
            name: "Sarah".into(),
            email: "s@x.com".into(),
            message: "Hi".into(),
        };
        let json = serde_json::to_value(ContactSubmission::from(&form)).expect("json");
        assert_eq!(
            json,
            serde_json::json!({ "name": "Sarah", "email": "s@x.com", "message": "Hi" })
        );
    }
}
