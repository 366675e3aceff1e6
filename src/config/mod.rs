//! Configuration module for goear-rs
//!
//! Handles loading settings from YAML files and environment variables.
//! Settings are immutable once loaded and handed to constructors by value.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Load settings from an explicit path, `GOEAR_SETTINGS_PATH`, or the default
/// locations, falling back to built-in defaults. Environment overrides are
/// applied last.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let mut settings = match resolve_path(explicit) {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };
    settings.merge_env();
    settings.validate()?;
    Ok(settings)
}

fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var("GOEAR_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut candidates = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/goear-rs/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("goear-rs/settings.yml"));
    }

    candidates.into_iter().find(|p| p.exists())
}
