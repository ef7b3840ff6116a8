use std::{collections::HashMap, fs};

#[derive(Debug)]
pub struct Settings {
    pub bind_addr: String,
    pub form_id: String,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8787".into(),
            form_id: "xzzbbgyr".into(),
            max_body_bytes: 64 * 1024,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("intake.toml") {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        tracing::warn!("intake.toml is not a flat string table; ignoring it");
        return;
    };
    if let Some(v) = file_cfg.get("bind_addr") {
        settings.bind_addr = v.clone();
    }
    if let Some(v) = file_cfg.get("form_id") {
        settings.form_id = v.clone();
    }
    if let Some(v) = file_cfg.get("max_body_bytes") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_body_bytes = parsed;
        }
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("INTAKE_BIND") {
        settings.bind_addr = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.bind_addr = v;
    }

    if let Some(v) = lookup("INTAKE_FORM_ID") {
        settings.form_id = v;
    }
    if let Some(v) = lookup("APP__FORM_ID") {
        settings.form_id = v;
    }

    if let Some(v) = lookup("APP__MAX_BODY_BYTES") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_body_bytes = parsed;
        }
    }
}
