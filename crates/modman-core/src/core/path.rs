use crate::core::error::{ModmanError, ModmanResult};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "MODMAN_CONFIG";

/// Get the Modman home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\modman
/// - Linux: ~/.config/modman
/// - macOS: ~/Library/Application Support/modman
pub fn modman_home() -> ModmanResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ModmanError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("modman"))
}

/// Get the config file path, honoring `MODMAN_CONFIG` when set and non-empty.
pub fn config_file() -> ModmanResult<PathBuf> {
    match std::env::var_os(CONFIG_ENV) {
        Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => Ok(modman_home()?.join("config.yaml")),
    }
}

/// Default registry location: `installed.yaml` beside the config file.
pub fn default_registry_file(config_file: &Path) -> PathBuf {
    match config_file.parent() {
        Some(parent) => parent.join("installed.yaml"),
        None => PathBuf::from("installed.yaml"),
    }
}

/// Ensure a directory exists, creating it (and parents) if needed
pub fn ensure_dir(path: &Path) -> ModmanResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
