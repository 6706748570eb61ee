//! Notification channel configuration.
//!
//! Loaded from `~/.config/shindan/notify.toml`:
//!
//! ```toml
//! endpoint = "https://hooks.example.com/bookings"
//! recipient = "support@example.com"
//! timeout_secs = 30
//! ```
//!
//! A missing file or a placeholder endpoint means the channel is not
//! configured. That is a warning, not a failure: bookings must still go
//! through (the original deployment shipped with placeholder mail settings
//! and the same soft-success behavior).

use std::path::Path;

use serde::{Deserialize, Serialize};

use shindan_core::{Result, ShindanError};

use crate::paths::ShindanPaths;

/// Placeholder endpoint shipped in config templates.
pub const PLACEHOLDER_ENDPOINT: &str = "https://example.com/notify";

fn default_timeout_secs() -> u64 {
    30
}

/// Settings for the booking notification channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Webhook endpoint bookings are delivered to.
    #[serde(default)]
    pub endpoint: String,
    /// Operator address shown in the delivered payload.
    #[serde(default)]
    pub recipient: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            recipient: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl NotifyConfig {
    /// Loads the configuration from the default location. A missing file
    /// yields the unconfigured default.
    pub fn load() -> Result<Self> {
        Self::load_from(&ShindanPaths::notify_config_file()?)
    }

    /// Loads the configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no notify config, channel unconfigured");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ShindanError::io(format!("failed to read notify config: {e}")))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        toml::from_str(&content)
            .map_err(|e| ShindanError::serialization("TOML", format!("notify config: {e}")))
    }

    /// True when the channel points at a real endpoint.
    pub fn is_configured(&self) -> bool {
        let endpoint = self.endpoint.trim();
        !endpoint.is_empty() && endpoint != PLACEHOLDER_ENDPOINT
    }
}
