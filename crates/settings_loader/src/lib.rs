//! # Settings Loader
//!
//! This crate provides centralized settings loading for the rates API.
//! It reads the `settings.json` file that carries the application version, the
//! source repository link, the tax percentage and the CORS header policy, then
//! applies environment variable overrides on top of it.
//!
//! ## Features
//!
//! - Load settings from specified file paths
//! - Fall back to the default location (`settings.json`) when no path is given
//! - Fall back to built-in defaults when no settings file exists
//! - Override individual values with `HOST`, `PORT`, `TAX_PERCENT` and `GIT_REPO`
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! // Load settings from a specific path
//! let settings = settings_loader::load_settings("config/settings.json")?;
//!
//! // Load from the given path or the default location, then apply environment overrides
//! let path = Some(PathBuf::from("settings.json"));
//! let settings = settings_loader::load_runtime_settings(path.as_ref())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use models::{Settings, parse_tax_percent};

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Loads settings from a JSON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;
    Ok(settings)
}

/// Loads settings from the provided path, or the default location when no path is given.
/// A missing file yields the built-in defaults; a malformed file is an error.
pub fn load_settings_with_fallback(path: Option<&PathBuf>) -> Result<Settings> {
    let candidate = path
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));

    if !settings_file_exists(&candidate) {
        tracing::warn!(
            "Settings file not found at {}, using defaults",
            candidate.display()
        );
        return Ok(Settings::default());
    }

    load_settings(&candidate)
}

/// Applies overrides taken from `lookup` (normally the process environment).
pub fn apply_overrides<F>(mut settings: Settings, lookup: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("HOST") {
        settings.host = host;
    }
    if let Some(port) = lookup("PORT") {
        settings.port = port
            .trim()
            .parse()
            .with_context(|| format!("Invalid PORT value: {}", port))?;
    }
    if let Some(tax) = lookup("TAX_PERCENT") {
        settings.tax_percent = parse_tax_percent(&tax).map_err(anyhow::Error::msg)?;
    }
    if let Some(repo) = lookup("GIT_REPO") {
        settings.git_repo = repo;
    }
    Ok(settings)
}

/// Loads settings for the running process: file (or defaults) plus environment overrides.
pub fn load_runtime_settings(path: Option<&PathBuf>) -> Result<Settings> {
    let settings = load_settings_with_fallback(path)?;
    apply_overrides(settings, |key| env::var(key).ok())
}

/// Checks if a settings file exists at the given path
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists() && path.as_ref().is_file()
}
