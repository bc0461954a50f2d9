//! Config command handler
//!
//! `set`, `unset` and `reset` edit the stored file. They start from a fresh
//! [`Config::load`] so that run-only CLI overrides are never persisted.

use crate::args::ConfigSubcommand;
use matric_pulse::config::Config;
use matric_pulse::info;
use std::io::{self, Write};

/// Dispatch config subcommands. Exits with status 1 on failure.
pub fn run(subcommand: Option<ConfigSubcommand>, effective: &Config, defaults: &Config) {
    let outcome = match subcommand {
        None => {
            show_all(effective);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: None }) => {
            show_all(effective);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => show_key(effective, &key),
        Some(ConfigSubcommand::Set { key, value }) => edit_stored(|stored| {
            stored.set(&key, &value)?;
            Ok(format!("✓ Set {key} = {value}"))
        }),
        Some(ConfigSubcommand::Unset { key }) => edit_stored(|stored| {
            stored.unset(&key, defaults)?;
            Ok(format!("✓ Reset {key} to default"))
        }),
        Some(ConfigSubcommand::Reset) => reset_with_confirmation(),
    };

    if let Err(e) = outcome {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

fn show_all(config: &Config) {
    println!("\n=== Configuration ===\n");
    print!("{config}");
}

fn show_key(config: &Config, key: &str) -> Result<(), String> {
    let value = config
        .get(key)
        .ok_or_else(|| format!("Unknown config key: '{key}'"))?;
    println!("{value}");
    Ok(())
}

/// Apply `edit` to the stored configuration and save it
fn edit_stored<F>(edit: F) -> Result<(), String>
where
    F: FnOnce(&mut Config) -> Result<String, String>,
{
    let mut stored = Config::load();
    let message = edit(&mut stored)?;
    stored
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    info!(
        "Saved configuration to {}",
        Config::get_config_file_path().display()
    );
    println!("{message}");
    Ok(())
}

fn reset_with_confirmation() -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if matches!(response.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}
