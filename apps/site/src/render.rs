//! Plain-text rendering of the page view.

use std::fmt::Write as _;

use page_core::PageView;
use shared::domain::{FormField, ThemeMode};

pub fn render(view: &PageView) -> String {
    let mut out = String::new();
    let mode = match view.theme {
        ThemeMode::Light => "light",
        ThemeMode::Dark => "dark",
    };
    let nav: Vec<&str> = view.nav.iter().map(|link| link.label).collect();

    let _ = writeln!(out, "== {} ==  [{}] ({mode})", view.brand, view.theme_icon);
    let _ = writeln!(out, "   {}", nav.join(" | "));
    if !view.mobile_menu.is_empty() {
        for link in &view.mobile_menu {
            let _ = writeln!(out, "   > {} ({})", link.label, link.anchor);
        }
    }

    let _ = writeln!(out, "-- Get in Touch --");
    for field in FormField::ALL {
        let value = view.form.get(field);
        let shown = if value.is_empty() {
            format!("<{}>", field.placeholder())
        } else {
            value.to_string()
        };
        let _ = writeln!(out, "   {:<8} {shown}", field.as_str());
    }

    let button = if view.submit_enabled {
        format!("[ {} ]", view.submit_label)
    } else {
        format!("( {} )", view.submit_label)
    };
    let _ = writeln!(out, "   {button}");
    if let Some(status) = &view.status_line {
        let _ = writeln!(out, "   {status}");
    }
    let _ = write!(out, "-- {} --", view.footer);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_core::UiState;
    use shared::domain::SubmissionStatus;

    #[test]
    fn sending_state_shows_disabled_button_and_status() {
        let mut state = UiState::default();
        state.form.name = "Sarah".to_string();
        state.status = SubmissionStatus::Sending;
        let text = render(&PageView::project(&state, 2025));

        assert!(text.contains("( Sending... )"));
        assert!(text.contains("name     Sarah"));
        assert!(text.contains("<Your Email>"));
        assert!(text.ends_with("-- © 2025 Hoori Media. All rights reserved. --"));
    }

    #[test]
    fn open_menu_is_listed() {
        let state = UiState {
            menu_open: true,
            ..UiState::default()
        };
        let text = render(&PageView::project(&state, 2025));
        assert!(text.contains("> Contact (#contact)"));
    }
}
