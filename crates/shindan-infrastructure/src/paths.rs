//! Unified path management for shindan configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/shindan/           # Config directory
//! ├── diagnosis_data.json      # The diagnosis tree document
//! └── notify.toml              # Notification channel configuration
//! ```

use std::path::PathBuf;

use shindan_core::{Result, ShindanError};

/// Filename of the persisted tree document.
pub const TREE_DOCUMENT_FILENAME: &str = "diagnosis_data.json";

/// Filename of the notification channel configuration.
pub const NOTIFY_CONFIG_FILENAME: &str = "notify.toml";

/// Unified path management for shindan.
pub struct ShindanPaths;

impl ShindanPaths {
    /// Returns the shindan configuration directory
    /// (e.g. `~/.config/shindan/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("shindan"))
            .ok_or_else(|| ShindanError::config("cannot determine the user config directory"))
    }

    /// Returns the default path of the tree document.
    pub fn tree_document_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(TREE_DOCUMENT_FILENAME))
    }

    /// Returns the default path of the notification configuration.
    pub fn notify_config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(NOTIFY_CONFIG_FILENAME))
    }
}
