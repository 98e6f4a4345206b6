//! Config command handler
//!
//! Handlers build the text to show and leave printing to [`run`], so a bad key
//! or value ends the process with a non-zero status instead of exiting mid-way.

use crate::args::ConfigSubcommand;
use nu_records::config::Config;
use nu_records::error;
use std::io::{self, BufRead, Write};

/// Keys accepted by `config get`, `set` and `unset`
pub const CONFIG_KEYS: &[&str] = &[
    "level",
    "file",
    "verbose",
    "reports_dir",
    "seeds_dir",
    "time_format",
];

/// Dispatch config subcommands. Returns `false` on failure.
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) -> bool {
    let outcome = match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => Ok(format!("\n=== Configuration ===\n\n{config}")),
        Some(ConfigSubcommand::Get { key: Some(key) }) => get_value(config, &key),
        Some(ConfigSubcommand::Set { key, value }) => {
            set_value(config, &key, &value).and_then(|msg| persist(config).map(|()| msg))
        }
        Some(ConfigSubcommand::Unset { key }) => {
            unset_value(config, defaults, &key).and_then(|msg| persist(config).map(|()| msg))
        }
        Some(ConfigSubcommand::Reset) => reset_with_prompt(&mut io::stdin().lock()),
    };

    match outcome {
        Ok(text) => {
            println!("{text}");
            true
        }
        Err(e) => {
            error!("config command failed: {e}");
            eprintln!("✗ {e}");
            false
        }
    }
}

/// Reject unknown keys up front, listing the accepted ones
fn check_key(key: &str) -> Result<(), String> {
    let normalized = key.replace('-', "_");
    if CONFIG_KEYS.contains(&normalized.as_str()) {
        Ok(())
    } else {
        Err(format!(
            "Unknown config key: '{key}' (expected one of: {})",
            CONFIG_KEYS.join(", ")
        ))
    }
}

/// Value of one key
pub fn get_value(config: &Config, key: &str) -> Result<String, String> {
    check_key(key)?;
    config
        .get(key)
        .ok_or_else(|| format!("Unknown config key: '{key}'"))
}

/// Validate and apply a value in memory
pub fn set_value(config: &mut Config, key: &str, value: &str) -> Result<String, String> {
    check_key(key)?;
    config.set(key, value)?;
    Ok(format!("✓ Set {key} = {value}"))
}

/// Restore one key to its default in memory
pub fn unset_value(config: &mut Config, defaults: &Config, key: &str) -> Result<String, String> {
    check_key(key)?;
    config.unset(key, defaults)?;
    let restored = config.get(key).unwrap_or_default();
    Ok(format!("✓ Reset {key} to default ({restored})"))
}

fn persist(config: &Config) -> Result<(), String> {
    config
        .save()
        .map_err(|e| format!("Failed to save config to {}: {e}", Config::get_config_file_path().display()))
}

/// Whether a prompt answer means yes
pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Delete the config file after asking on `input`
fn reset_with_prompt(input: &mut impl BufRead) -> Result<String, String> {
    let path = Config::get_config_file_path();
    if !path.exists() {
        return Ok("✓ Config is already at defaults".to_string());
    }

    print!("Reset {} to defaults? (y/n): ", path.display());
    io::stdout().flush().ok();

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|e| format!("Failed to read answer: {e}"))?;

    if !is_confirmation(&answer) {
        return Ok("✗ Reset cancelled".to_string());
    }
    Config::reset().map_err(|e| format!("Failed to remove {}: {e}", path.display()))?;
    Ok("✓ Config reset to defaults".to_string())
}
