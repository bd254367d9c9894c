//! Path resolution for the gateway's data directory and config file.
//!
//! Resolution order for the data root:
//! 1. `TRANSGATE_DATA_DIR` when set and non-empty
//! 2. the current working directory
//!
//! The config file lives at `<data root>/config.json` unless the caller
//! passes an explicit path.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "TRANSGATE_DATA_DIR";

/// File name of the persisted provider configuration.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Errors that can occur during path resolution and directory operations.
#[derive(Debug, Error)]
pub enum PathError {
    /// Failed to get the current working directory.
    #[error("Cannot determine current directory: {0}")]
    CurrentDirError(String),

    /// A path was expected to be a directory but was not.
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    /// Failed to create a directory.
    #[error("Failed to create directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },
}

/// Pure resolver: pick the data root from an optional override and a fallback.
pub fn resolve_data_root(override_value: Option<&str>, fallback: &Path) -> PathBuf {
    match override_value.map(str::trim) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => fallback.to_path_buf(),
    }
}

/// Root directory for gateway data.
pub fn data_root() -> Result<PathBuf, PathError> {
    let cwd = env::current_dir().map_err(|e| PathError::CurrentDirError(e.to_string()))?;
    let override_value = env::var(DATA_DIR_ENV).ok();
    Ok(resolve_data_root(override_value.as_deref(), &cwd))
}

/// Default location of the config file.
pub fn default_config_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(CONFIG_FILE_NAME))
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> Result<(), PathError> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };

    if parent.exists() {
        if !parent.is_dir() {
            return Err(PathError::NotADirectory(parent.to_path_buf()));
        }
        return Ok(());
    }

    fs::create_dir_all(parent).map_err(|e| PathError::CreateFailed {
        path: parent.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_override_wins_when_set() {
        let fallback = Path::new("/srv/fallback");
        assert_eq!(
            resolve_data_root(Some("/etc/transgate"), fallback),
            PathBuf::from("/etc/transgate")
        );
    }

    #[test]
    fn test_blank_override_uses_fallback() {
        let fallback = Path::new("/srv/fallback");
        assert_eq!(resolve_data_root(Some("  "), fallback), fallback);
        assert_eq!(resolve_data_root(None, fallback), fallback);
    }

    #[test]
    fn test_ensure_parent_dir_creates_nested() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("a").join("b").join(CONFIG_FILE_NAME);
        ensure_parent_dir(&file).unwrap();
        assert!(temp.path().join("a").join("b").is_dir());
    }

    #[test]
    fn test_ensure_parent_dir_rejects_file_parent() {
        let temp = tempdir().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let result = ensure_parent_dir(&blocker.join(CONFIG_FILE_NAME));
        assert!(matches!(result, Err(PathError::NotADirectory(_))));
    }

    #[test]
    fn test_bare_file_name_needs_no_parent() {
        assert!(ensure_parent_dir(Path::new(CONFIG_FILE_NAME)).is_ok());
    }
}
