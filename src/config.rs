//! Configuration module for `MatricPulse`

use crate::core::scoring::{ScoringRules, DEFAULT_CAPPED_MAX, DEFAULT_TOP_SUBJECTS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Highest value `capped_max` may take: a full top-band subject
const MAX_CAPPED_POINTS: u8 = 7;

/// Placeholder expanded to the configuration directory
const DIR_VARIABLE: &str = "$MATRIC_PULSE";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for saved score reports
    #[serde(default)]
    pub reports_dir: String,
}

/// Scoring rule settings
///
/// A zero `top_subjects`, an empty `capped_subject` or a missing `capped_max`
/// means "use the standard rule". `capped_max = 0` is a real cap: the capped
/// subject then adds nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Number of general subjects counted
    #[serde(default)]
    pub top_subjects: usize,
    /// Marker for the capped subject
    #[serde(default)]
    pub capped_subject: String,
    /// Ceiling on the capped subject's contribution (0-7)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capped_max: Option<u8>,
}

impl ScoringConfig {
    /// Build scoring rules, filling unset fields with the standard values
    #[must_use]
    pub fn to_rules(&self) -> ScoringRules {
        let standard = ScoringRules::default();
        ScoringRules {
            top_subjects: if self.top_subjects == 0 {
                DEFAULT_TOP_SUBJECTS
            } else {
                self.top_subjects
            },
            capped_subject: if self.capped_subject.trim().is_empty() {
                standard.capped_subject
            } else {
                self.capped_subject.trim().to_lowercase()
            },
            capped_max: self.capped_max.unwrap_or(DEFAULT_CAPPED_MAX),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Scoring settings
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
}

impl Config {
    /// Get the `$MATRIC_PULSE` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/matricpulse`
    /// - macOS: `~/Library/Application Support/matricpulse`
    /// - Windows: `%APPDATA%\matricpulse`
    #[must_use]
    pub fn get_matricpulse_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("matricpulse")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Used when loading so that fields added in newer versions get their
    /// default values while user settings are kept.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        for (value, default) in [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.paths.reports_dir, &defaults.paths.reports_dir),
            (&mut self.scoring.capped_subject, &defaults.scoring.capped_subject),
        ] {
            if value.is_empty() && !default.is_empty() {
                value.clone_from(default);
                changed = true;
            }
        }

        if self.scoring.top_subjects == 0 && defaults.scoring.top_subjects != 0 {
            self.scoring.top_subjects = defaults.scoring.top_subjects;
            changed = true;
        }
        if self.scoring.capped_max.is_none() && defaults.scoring.capped_max.is_some() {
            self.scoring.capped_max = defaults.scoring.capped_max;
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for this run only; the config file is not modified.
    /// Only `Some` values replace config values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds.
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_matricpulse_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$MATRIC_PULSE` to the configuration directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_matricpulse_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults; `$MATRIC_PULSE` is expanded
    /// in path-like values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration cannot be parsed.
    /// The defaults are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - File exists: load it, merge missing fields from defaults, save if anything was added
    /// - First run: create the config directory and write the defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized, the directory
    /// cannot be created, or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `reports_dir`, `top_subjects`, `capped_subject`, `capped_max`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            "top_subjects" | "top-subjects" => Some(self.scoring.top_subjects.to_string()),
            "capped_subject" | "capped-subject" => Some(self.scoring.capped_subject.clone()),
            "capped_max" | "capped-max" => Some(
                self.scoring
                    .capped_max
                    .map_or_else(String::new, |max| max.to_string()),
            ),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// (e.g. "maybe" for `verbose`, "-1" for `top_subjects`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                value
                    .parse::<crate::logger::Level>()
                    .map_err(|_| format!("Invalid log level for 'level': '{value}'"))?;
                self.logging.level = value.to_lowercase();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            "top_subjects" | "top-subjects" => {
                self.scoring.top_subjects = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid count for 'top_subjects': '{value}'"))?;
            }
            "capped_subject" | "capped-subject" => self.scoring.capped_subject = value.to_string(),
            "capped_max" | "capped-max" => {
                let max = value
                    .parse::<u8>()
                    .ok()
                    .filter(|max| *max <= MAX_CAPPED_POINTS)
                    .ok_or_else(|| format!("Invalid points for 'capped_max': '{value}' (0-7)"))?;
                self.scoring.capped_max = Some(max);
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Updates the in-memory config only; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "top_subjects" | "top-subjects" => {
                self.scoring.top_subjects = defaults.scoring.top_subjects;
            }
            "capped_subject" | "capped-subject" => self
                .scoring
                .capped_subject
                .clone_from(&defaults.scoring.capped_subject),
            "capped_max" | "capped-max" => self.scoring.capped_max = defaults.scoring.capped_max,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if there is no file.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;


        writeln!(f, "\n[paths]")?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[scoring]")?;
        writeln!(f, "  top_subjects = {}", self.scoring.top_subjects)?;
        writeln!(f, "  capped_subject = \"{}\"", self.scoring.capped_subject)?;
        match self.scoring.capped_max {
            Some(max) => writeln!(f, "  capped_max = {max}")?,
            None => writeln!(f, "  capped_max = (default {DEFAULT_CAPPED_MAX})")?,
        }

        Ok(())
    }
}
