use std::{collections::HashMap, fs, path::Path};

use url::Url;

use crate::{error::SettingsError, state::ValidationPolicy};

pub const DEFAULT_INTAKE_URL: &str = "https://formspree.io/f/xzzbbgyr";
pub const SETTINGS_FILE: &str = "site.toml";

#[derive(Debug, Clone)]
pub struct Settings {
    pub intake_url: Url,
    pub validation: ValidationPolicy,
    pub user_agent: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            intake_url: Url::parse(DEFAULT_INTAKE_URL).expect("default intake url parses"),
            validation: ValidationPolicy::Passthrough,
            user_agent: None,
        }
    }
}

/// Defaults, then `site.toml` in the working directory, then environment.
pub fn load_settings() -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();
    if Path::new(SETTINGS_FILE).exists() {
        settings.apply_file(SETTINGS_FILE)?;
    }
    settings.apply_env(|key| std::env::var(key).ok())?;
    Ok(settings)
}

impl Settings {
    pub fn apply_file(&mut self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| SettingsError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        self.apply_toml(&raw)
    }

    pub fn apply_toml(&mut self, raw: &str) -> Result<(), SettingsError> {
        let file_cfg = toml::from_str::<HashMap<String, String>>(raw)
            .map_err(|err| SettingsError::Parse(err.to_string()))?;

        if let Some(v) = file_cfg.get("intake_url") {
            self.intake_url = parse_intake_url(v)?;
        }
        if let Some(v) = file_cfg.get("validation") {
            self.validation = v.parse()?;
        }
        if let Some(v) = file_cfg.get("user_agent") {
            self.user_agent = Some(v.clone());
        }
        Ok(())
    }

    /// Later keys win, so `APP__*` overrides the short names.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), SettingsError> {
        for key in ["INTAKE_URL", "APP__INTAKE_URL"] {
            if let Some(v) = lookup(key) {
                self.intake_url = parse_intake_url(&v)?;
            }
        }
        for key in ["SITE_VALIDATION", "APP__VALIDATION"] {
            if let Some(v) = lookup(key) {
                self.validation = v.parse()?;
            }
        }
        if let Some(v) = lookup("APP__USER_AGENT") {
            self.user_agent = Some(v);
        }
        Ok(())
    }
}

pub fn parse_intake_url(raw: &str) -> Result<Url, SettingsError> {
    let url = Url::parse(raw.trim()).map_err(|source| SettingsError::InvalidIntakeUrl {
        url: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(SettingsError::UnsupportedScheme(raw.to_string())),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
