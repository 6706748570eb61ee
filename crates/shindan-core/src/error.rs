//! Error types for the Shindan engine.
//!
//! This provides typed, structured error variants with automatic conversion
//! from common error types via the `From` trait. All user-facing errors are
//! recoverable within the interaction they occurred in; nothing here is
//! treated as fatal by the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ShindanError>;

/// A shared error type for the entire Shindan engine.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ShindanError {
    /// Malformed authoring input (empty id, too many options, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Required booking fields were left empty.
    #[error("Required fields missing: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// A named step id was requested but does not exist in the tree.
    #[error("Step not found: '{id}'")]
    StepNotFound { id: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "TOML", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Notification delivery failed (hard failure; the booking draft is kept).
    #[error("Notification error: {0}")]
    Notification(String),

    /// Address lookup service failed; callers swallow this one.
    #[error("Address lookup error: {0}")]
    Lookup(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShindanError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a MissingFields error
    pub fn missing_fields(fields: Vec<String>) -> Self {
        Self::MissingFields { fields }
    }

    /// Creates a StepNotFound error
    pub fn step_not_found(id: impl Into<String>) -> Self {
        Self::StepNotFound { id: id.into() }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Serialization error
    pub fn serialization(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Notification error
    pub fn notification(message: impl Into<String>) -> Self {
        Self::Notification(message.into())
    }

    /// Creates a Lookup error
    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a validation error (either variant).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::MissingFields { .. })
    }

    /// Check if this is a StepNotFound error
    pub fn is_step_not_found(&self) -> bool {
        matches!(self, Self::StepNotFound { .. })
    }

    /// Check if this is a notification error
    pub fn is_notification(&self) -> bool {
        matches!(self, Self::Notification(_))
    }

    /// Check if this is an address lookup error
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup(_))
    }
}

impl From<std::io::Error> for ShindanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ShindanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}
