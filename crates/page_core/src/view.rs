use shared::domain::{
    ContactForm, FailureKind, FormField, NavSection, SubmissionStatus, ThemeMode,
};

use crate::state::UiState;

pub const BRAND: &str = "Hoori Media";
pub const SUBMIT_LABEL: &str = "Send Message";
pub const SENDING_LABEL: &str = "Sending...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub anchor: &'static str,
}

impl From<NavSection> for NavLink {
    fn from(section: NavSection) -> Self {
        Self {
            label: section.label(),
            anchor: section.anchor(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub brand: &'static str,
    pub theme: ThemeMode,
    pub theme_icon: &'static str,
    pub nav: Vec<NavLink>,
    /// Collapsed-width menu entries; empty while the menu is closed.
    pub mobile_menu: Vec<NavLink>,
    pub form: ContactForm,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub status_line: Option<String>,
    pub footer: String,
}

impl PageView {
    pub fn project(state: &UiState, year: i32) -> Self {
        let nav: Vec<NavLink> = NavSection::ALL.into_iter().map(NavLink::from).collect();
        let sending = state.status.is_sending();
        Self {
            brand: BRAND,
            theme: state.theme,
            theme_icon: theme_icon(state.theme),
            mobile_menu: if state.menu_open { nav.clone() } else { vec![] },
            nav,
            form: state.form.clone(),
            submit_label: if sending { SENDING_LABEL } else { SUBMIT_LABEL },
            submit_enabled: !sending,
            status_line: status_line(&state.status),
            footer: format!("© {year} {BRAND}. All rights reserved."),
        }
    }
}

pub fn theme_icon(theme: ThemeMode) -> &'static str {
    match theme {
        ThemeMode::Light => "🌙",
        ThemeMode::Dark => "☀️",
    }
}

pub fn status_line(status: &SubmissionStatus) -> Option<String> {
    let line = match status {
        SubmissionStatus::Idle => return None,
        SubmissionStatus::Sending => SENDING_LABEL.to_string(),
        SubmissionStatus::Success => "✅ Message sent successfully!".to_string(),
        SubmissionStatus::Failure(FailureKind::ServerRejected) => {
            "❌ Failed to send. Try again.".to_string()
        }
        SubmissionStatus::Failure(FailureKind::NetworkError) => {
            "⚠️ Network error. Try later.".to_string()
        }
        SubmissionStatus::Invalid(missing) => {
            let names: Vec<&str> = missing.iter().map(|f: &FormField| f.as_str()).collect();
            format!("Please fill in: {}.", names.join(", "))
        }
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_light_page_has_no_status_and_enabled_submit() {
        let view = PageView::project(&UiState::default(), 2025);
        assert_eq!(view.theme_icon, "🌙");
        assert_eq!(view.status_line, None);
        assert!(view.submit_enabled);
        assert_eq!(view.submit_label, "Send Message");
        assert!(view.mobile_menu.is_empty());
        assert_eq!(view.nav.len(), 4);
        assert_eq!(view.footer, "© 2025 Hoori Media. All rights reserved.");
    }

    #[test]
    fn sending_disables_submit() {
        let state = UiState {
            status: SubmissionStatus::Sending,
            ..UiState::default()
        };
        let view = PageView::project(&state, 2025);
        assert!(!view.submit_enabled);
        assert_eq!(view.submit_label, "Sending...");
        assert_eq!(view.status_line.as_deref(), Some("Sending..."));
    }

    #[test]
    fn open_menu_lists_every_section() {
        let state = UiState {
            menu_open: true,
            theme: ThemeMode::Dark,
            ..UiState::default()
        };
        let view = PageView::project(&state, 2025);
        assert_eq!(view.theme_icon, "☀️");
        let anchors: Vec<&str> = view.mobile_menu.iter().map(|l| l.anchor).collect();
        assert_eq!(anchors, vec!["#home", "#services", "#about", "#contact"]);
    }

    #[test]
    fn failure_kinds_have_distinct_lines() {
        assert_eq!(
            status_line(&SubmissionStatus::Failure(FailureKind::ServerRejected)).as_deref(),
            Some("❌ Failed to send. Try again.")
        );
        assert_eq!(
            status_line(&SubmissionStatus::Failure(FailureKind::NetworkError)).as_deref(),
            Some("⚠️ Network error. Try later.")
        );
        assert_eq!(
            status_line(&SubmissionStatus::Invalid(vec![
                FormField::Email,
                FormField::Message
            ]))
            .as_deref(),
            Some("Please fill in: email, message.")
        );
    }
}
