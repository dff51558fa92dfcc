//! Core error types for pawpal-core.
//!
//! Scheduling views are total functions and never fail; errors only come
//! from id-addressed mutations and from the I/O edges (config files and
//! household documents).

use std::path::PathBuf;
use thiserror::Error;

use crate::task::TaskId;

/// Core error type for pawpal-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// No task with this id is held by the scheduler
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Home/config directory could not be resolved or created
    #[error("Configuration directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Recurrence label is not one of none/daily/weekly
    #[error("Unknown recurrence '{0}' (expected none, daily or weekly)")]
    UnknownRecurrence(String),

    /// Time ordering label is not one of lexical/chronological
    #[error("Unknown time ordering '{0}' (expected lexical or chronological)")]
    UnknownTimeOrdering(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
