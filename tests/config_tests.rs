//! Integration tests for configuration management

use nu_records::config::{Config, ConfigOverrides, DEFAULT_TIME_FORMAT};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(!config.logging.level.is_empty(), "Default log level should not be empty");
    assert!(!config.paths.reports_dir.is_empty(), "Default reports_dir should not be empty");
    assert!(!config.paths.seeds_dir.is_empty(), "Default seeds_dir should not be empty");
    assert_eq!(config.time_format(), DEFAULT_TIME_FORMAT);
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
reports_dir = "./reports"
seeds_dir = "./seeds"

[display]
time_format = "%H:%M"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.reports_dir, "./reports");
    assert_eq!(config.paths.seeds_dir, "./seeds");
    assert_eq!(config.time_format(), "%H:%M");
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.paths.seeds_dir, "");
    // Blank format falls back to the built-in layout
    assert_eq!(config.time_format(), DEFAULT_TIME_FORMAT);
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$NU_RECORDS/test.log"

[paths]
seeds_dir = "$NU_RECORDS/seeds"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("nurecords"));
    assert!(!config.logging.file.contains("$NU_RECORDS"));
    assert!(config.paths.seeds_dir.ends_with("seeds"));
    assert!(!config.paths.seeds_dir.contains("$NU_RECORDS"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "DEBUG").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config.set("verbose", "true").expect("Failed to set verbose");
    assert!(config.logging.verbose);

    config.set("seeds-dir", "/data/seeds").expect("Failed to set seeds dir");
    assert_eq!(config.get("seeds_dir").unwrap(), "/data/seeds");

    config.set("time_format", "%Y").expect("Failed to set time format");
    assert_eq!(config.time_format(), "%Y");

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_bad_values() {
    let mut config = Config::from_defaults();
    let before = config.logging.level.clone();

    assert!(config.set("level", "loud").is_err());
    assert!(config.set("verbose", "maybe").is_err());
    assert_eq!(config.logging.level, before);
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("reports_dir", "/elsewhere").expect("Failed to set reports_dir");
    config.unset("reports_dir", &defaults).expect("Failed to unset reports_dir");
    assert_eq!(config.paths.reports_dir, defaults.paths.reports_dir);

    assert!(config.unset("bogus", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.paths.seeds_dir, config.paths.seeds_dir);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        reports_dir: Some("./custom_reports".to_string()),
        seeds_dir: Some("./custom_seeds".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.reports_dir, "./custom_reports");
    assert_eq!(config.paths.seeds_dir, "./custom_seeds");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.paths.reports_dir.clone();

    config.apply_overrides(&ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    });

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.reports_dir, before);
}

#[test]
fn test_config_display_format() {
    let display_str = Config::from_defaults().to_string();

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[display]"));
    assert!(display_str.contains("seeds_dir"));
    assert!(display_str.contains("time_format"));
}

#[test]
fn test_merge_defaults_fills_blanks_and_preserves_values() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"
verbose = false

[paths]
reports_dir = ""
seeds_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.paths.seeds_dir, defaults.paths.seeds_dir);

    assert!(!config.merge_defaults(&defaults), "second merge is a no-op");
}

#[test]
fn test_get_nurecords_dir() {
    let dir = Config::get_nurecords_dir();
    assert!(dir.to_string_lossy().contains("nurecords"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();
    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}

#[test]
fn test_time_format_is_validated() {
    let mut config = Config::from_defaults();

    let err = config.set("time_format", "%Q").unwrap_err();
    assert!(err.contains("time_format"));
    assert_eq!(config.time_format(), DEFAULT_TIME_FORMAT);

    // A hand-edited file with a bad layout still renders with the default
    let edited = Config::from_toml(
        r#"
[logging]
level = "warn"

[display]
time_format = "%Q %H"
"#,
    )
    .expect("Failed to parse config");
    assert_eq!(edited.time_format(), DEFAULT_TIME_FORMAT);
}
