//! Line commands typed at the interactive prompt, mapped to page events.

use page_core::PageEvent;
use shared::domain::{FormField, NavSection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Event(PageEvent),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  theme                   toggle light/dark
  menu                    open/close the mobile menu
  nav <section>           follow a nav link (home, services, about, contact)
  set <field> <value...>  edit name, email or message
  submit                  send the contact form
  show                    redraw the page
  help                    this text
  quit                    leave";

pub fn parse_line(line: &str) -> Result<Option<Input>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim_start()),
        None => (line, ""),
    };

    let input = match verb.to_ascii_lowercase().as_str() {
        "theme" => Input::Event(PageEvent::ToggleTheme),
        "menu" => Input::Event(PageEvent::ToggleMenu),
        "nav" => {
            let section = rest
                .parse::<NavSection>()
                .map_err(|err| err.to_string())?;
            Input::Event(PageEvent::SelectNav(section))
        }
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value),
                None => (rest, ""),
            };
            if field.is_empty() {
                return Err("usage: set <field> <value...>".to_string());
            }
            let field = field.parse::<FormField>().map_err(|err| err.to_string())?;
            Input::Event(PageEvent::SetField {
                field,
                value: value.to_string(),
            })
        }
        "submit" | "send" => Input::Event(PageEvent::Submit),
        "show" => Input::Show,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => return Err(format!("unknown command '{other}'; try 'help'")),
    };
    Ok(Some(input))
}
