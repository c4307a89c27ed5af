use crate::core::error::{FolioError, FolioResult};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location
pub const CONFIG_ENV_VAR: &str = "FOLIO_CONFIG";

/// Get the Folio home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\folio
/// - Linux: ~/.config/folio
/// - macOS: ~/Library/Application Support/folio
pub fn folio_home() -> FolioResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| FolioError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("folio"))
}

/// Get the config file path
///
/// `FOLIO_CONFIG` wins over the platform location
/// (`<config dir>/folio/config.yaml`).
pub fn config_file() -> FolioResult<PathBuf> {
    if let Ok(custom) = std::env::var(CONFIG_ENV_VAR) {
        if !custom.trim().is_empty() {
            return Ok(PathBuf::from(custom));
        }
    }
    Ok(folio_home()?.join("config.yaml"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> FolioResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Join a remote folder and file name into a repository path
///
/// Remote paths always use `/`, never the platform separator.
pub fn remote_path(folder: &str, name: &str) -> String {
    let folder = folder.trim_matches('/');
    let name = name.trim_start_matches('/');
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder, name)
    }
}
