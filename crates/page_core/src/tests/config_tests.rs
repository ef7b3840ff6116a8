use super::*;

use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let owned: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| owned.get(key).cloned()
}

#[test]
fn defaults_point_at_hosted_intake() {
    let settings = Settings::default();
    assert_eq!(settings.intake_url.as_str(), DEFAULT_INTAKE_URL);
    assert_eq!(settings.validation, ValidationPolicy::Passthrough);
    assert!(settings.user_agent.is_none());
}

#[test]
fn toml_overrides_defaults() {
    let mut settings = Settings::default();
    settings
        .apply_toml(
            r#"
intake_url = "http://127.0.0.1:8787/f/local"
validation = "require_non_empty"
user_agent = "hoori-site/dev"
"#,
        )
        .expect("apply");
    assert_eq!(settings.intake_url.as_str(), "http://127.0.0.1:8787/f/local");
    assert_eq!(settings.validation, ValidationPolicy::RequireNonEmpty);
    assert_eq!(settings.user_agent.as_deref(), Some("hoori-site/dev"));
}

#[test]
fn app_prefixed_env_wins_over_short_name() {
    let mut settings = Settings::default();
    settings
        .apply_env(env_from(&[
            ("INTAKE_URL", "https://intake.example/f/a"),
            ("APP__INTAKE_URL", "https://intake.example/f/b"),
            ("SITE_VALIDATION", "strict"),
        ]))
        .expect("apply");
    assert_eq!(settings.intake_url.as_str(), "https://intake.example/f/b");
    assert_eq!(settings.validation, ValidationPolicy::RequireNonEmpty);
}

#[test]
fn rejects_non_http_intake_url() {
    assert!(matches!(
        parse_intake_url("ftp://intake.example/f/a"),
        Err(SettingsError::UnsupportedScheme(_))
    ));
    assert!(matches!(
        parse_intake_url("not a url"),
        Err(SettingsError::InvalidIntakeUrl { .. })
    ));
}

#[test]
fn bad_validation_value_is_an_error() {
    let mut settings = Settings::default();
    let err = settings
        .apply_env(env_from(&[("APP__VALIDATION", "sometimes")]))
        .expect_err("must fail");
    assert!(matches!(err, SettingsError::UnknownValidationPolicy(_)));
}

#[test]
fn reads_settings_file_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("hoori_site_settings_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("site.toml");
    fs::write(&path, "intake_url = \"https://intake.example/f/disk\"\n").expect("write");

    let mut settings = Settings::default();
    settings.apply_file(&path).expect("apply file");
    assert_eq!(settings.intake_url.as_str(), "https://intake.example/f/disk");

    let missing = temp_root.join("absent.toml");
    assert!(matches!(
        settings.apply_file(&missing),
        Err(SettingsError::Read { .. })
    ));

    fs::remove_dir_all(temp_root).expect("cleanup");
}
