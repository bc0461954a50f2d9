//! Integration tests for configuration management

use matric_pulse::config::{Config, ConfigOverrides};
use matric_pulse::core::models::SubjectEntry;
use matric_pulse::core::scoring::ScoringRules;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.paths.reports_dir.is_empty(),
        "Default reports_dir should not be empty"
    );

    // Shipped scoring settings are the standard rules
    assert_eq!(config.scoring.to_rules(), ScoringRules::default());
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

[scoring]
top_subjects = 7
capped_subject = "life orientation"
capped_max = 2
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.reports_dir, "./reports");

    let rules = config.scoring.to_rules();
    assert_eq!(rules.top_subjects, 7);
    assert_eq!(rules.capped_max, 2);
}

#[test]
fn test_config_from_toml_partial() {
    // Missing sections and fields use defaults
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.scoring.top_subjects, 0);
    assert_eq!(config.scoring.capped_max, None);
    assert_eq!(config.scoring.to_rules(), ScoringRules::default());
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$MATRIC_PULSE/test.log"

[paths]
reports_dir = "$MATRIC_PULSE/reports"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("matricpulse"));
    assert!(!config.logging.file.contains("$MATRIC_PULSE"));
    assert!(config.paths.reports_dir.contains("matricpulse"));
    assert!(!config.paths.reports_dir.contains("$MATRIC_PULSE"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config.set("verbose", "true").expect("Failed to set verbose");
    assert_eq!(config.get("verbose").unwrap(), "true");
    assert!(config.logging.verbose);

    config.set("top-subjects", "5").expect("Failed to set top_subjects");
    assert_eq!(config.get("top_subjects").unwrap(), "5");

    config.set("capped_max", "2").expect("Failed to set capped_max");
    assert_eq!(config.scoring.capped_max, Some(2));

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_bad_values() {
    let mut config = Config::from_defaults();

    assert!(config.set("level", "loud").is_err());
    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.set("top_subjects", "-1").is_err());
    assert!(config.set("capped_max", "8").is_err());
    assert!(config.set("capped_max", "-1").is_err());

    // Failed sets leave the previous value in place
    assert_eq!(config.scoring.capped_max, Some(3));
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "debug").expect("Failed to set level");
    config.set("capped_max", "1").expect("Failed to set capped_max");

    config
        .unset("level", &defaults)
        .expect("Failed to unset level");
    config
        .unset("capped_max", &defaults)
        .expect("Failed to unset capped_max");
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.scoring.capped_max, defaults.scoring.capped_max);

    assert!(config.unset("unknown_key", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config
        .set("capped_subject", "Life Orientation")
        .expect("Failed to set capped_subject");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded_config = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded_config.logging.level, "info");
    assert_eq!(loaded_config.scoring.to_rules().capped_subject, "life orientation");
}

#[test]
fn test_zero_cap_survives_round_trip() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("capped_max", "0").expect("0 is a valid cap");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");
    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let mut loaded = Config::from_toml(&content).expect("Failed to parse loaded config");

    // Merging defaults must not turn the explicit 0 back into 3
    loaded.merge_defaults(&Config::from_defaults());
    assert_eq!(loaded.scoring.capped_max, Some(0));

    let rules = loaded.scoring.to_rules();
    let result = rules.compute(&[
        SubjectEntry::new("Mathematics".to_string(), 91),
        SubjectEntry::new("Life Orientation".to_string(), 95),
    ]);
    assert_eq!(result.total_score, 7);
    assert_eq!(result.points_for("Life Orientation"), Some(0));
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        reports_dir: Some("./custom_reports".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.reports_dir, "./custom_reports");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.reports_dir, defaults.paths.reports_dir);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[scoring]"));
    assert!(display_str.contains("capped_max = 3"));
    assert!(!display_str.contains("[assistant]"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[paths]
reports_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    let changed = config.merge_defaults(&defaults);

    assert!(
        changed,
        "merge_defaults should return true when fields are added"
    );
    assert_eq!(config.paths.reports_dir, defaults.paths.reports_dir);
    assert_eq!(config.scoring.top_subjects, defaults.scoring.top_subjects);
    assert_eq!(config.scoring.capped_max, defaults.scoring.capped_max);
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[scoring]
top_subjects = 4
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    config.merge_defaults(&defaults);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.scoring.top_subjects, 4);
}

#[test]
fn test_merge_defaults_is_noop_on_defaults() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_get_matricpulse_dir() {
    let dir = Config::get_matricpulse_dir();

    assert!(dir.to_string_lossy().contains("matricpulse"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
