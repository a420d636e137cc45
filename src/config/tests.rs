//! Configuration tests
//!
//! Round-trip of the generated config file and precedence of the layers.

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// The generated template must parse back through the file layer.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let resolved = Config::resolve(parsed.unwrap(), no_env);
    assert_eq!(resolved.api_url, DEFAULT_API_URL);
    assert_eq!(resolved.theme, "dark");
    assert_eq!(resolved.logging.file_rotation, LogRotation::Daily);
}

/// Non-default values, including ones needing escapes, survive the round trip.
#[test]
fn test_config_roundtrip_custom_values() {
    let mut config = Config::default();
    config.api_url = "http://short.example:8080/api".to_string();
    config.theme = "light".to_string();
    config.show_logs = true;
    config.logging.level = "debug".to_string();
    config.logging.file_enabled = true;
    config.logging.file_dir = PathBuf::from(r#"C:\logs\"quoted""#);
    config.logging.file_rotation = LogRotation::Hourly;

    let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    let resolved = Config::resolve(parsed, no_env);

    assert_eq!(resolved.api_url, "http://short.example:8080/api");
    assert_eq!(resolved.theme, "light");
    assert!(resolved.show_logs);
    assert_eq!(resolved.logging.level, "debug");
    assert!(resolved.logging.file_enabled);
    assert_eq!(
        resolved.logging.file_dir,
        PathBuf::from(r#"C:\logs\"quoted""#)
    );
    assert_eq!(resolved.logging.file_rotation, LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_uses_defaults() {
    let config = Config::resolve(FileConfig::default(), no_env);

    assert_eq!(config.api_url, "http://127.0.0.1:5000");
    assert!(config.enable_tui);
    assert!(!config.show_logs);
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.file_enabled);
}

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
api_url = "http://from-file:5000"
theme = "light"
"#,
    )
    .unwrap();

    let config = Config::resolve(
        file,
        env_from(&[
            ("SHORTURL_API_URL", "http://from-env:9000"),
            ("SHORTURL_THEME", "dark"),
        ]),
    );

    assert_eq!(config.api_url, "http://from-env:9000");
    assert_eq!(config.theme, "dark");
}

#[test]
fn test_file_overrides_defaults() {
    let file: FileConfig = toml::from_str(
        r#"
api_url = "http://from-file:5000"

[logging]
level = "warn"
file_rotation = "never"
"#,
    )
    .unwrap();

    let config = Config::resolve(file, no_env);

    assert_eq!(config.api_url, "http://from-file:5000");
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.file_rotation, LogRotation::Never);
    assert_eq!(config.logging.file_prefix, "shorturl");
}

#[test]
fn test_no_tui_flag_values() {
    for (value, enabled) in [("1", false), ("true", false), ("TRUE", false), ("0", true)] {
        let config = Config::resolve(
            FileConfig::default(),
            env_from(&[("SHORTURL_NO_TUI", value)]),
        );
        assert_eq!(config.enable_tui, enabled, "SHORTURL_NO_TUI={}", value);
    }
}

#[test]
fn test_unknown_rotation_falls_back_to_daily() {
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
}

#[test]
fn test_logging_section_keeps_defaults_for_missing_keys() {
    let file: FileConfig = toml::from_str("[logging]\nfile_rotation = \"weekly\"\n").unwrap();

    let config = Config::resolve(file, no_env);

    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file_dir, PathBuf::from("./logs"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Reading the file
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_file_reads_as_empty() {
    let path = std::env::temp_dir().join(format!("shorturl-absent-{}.toml", std::process::id()));

    let file = Config::read_file_config(&path).unwrap();

    assert_eq!(Config::from_file(file).api_url, DEFAULT_API_URL);
}

#[test]
fn test_broken_file_is_reported_not_fatal() {
    let path = std::env::temp_dir().join(format!("shorturl-broken-{}.toml", std::process::id()));
    std::fs::write(&path, "theme = dark\n").unwrap();

    let result = Config::read_file_config(&path);

    assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    let _ = std::fs::remove_file(&path);
}
