//! Core error types for dayloop-core.
//!
//! This module defines the error hierarchy using thiserror. Persistence
//! failures during user-visible completion actions are deliberately not
//! part of any public signature: the snapshot store logs and swallows
//! write failures so a failed save can never abort the action that
//! triggered it (see [`crate::streak::StreakTracker`]).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dayloop-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Snapshot-store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Unknown feature key at an API boundary
    #[error("Unknown feature key '{0}' (expected one of: notes, todos, habits, pomodoro)")]
    UnknownFeatureKey(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Snapshot-store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Data directory could not be created or resolved
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a snapshot failed
    #[error("Failed to read snapshot '{key}': {source}")]
    ReadFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing a snapshot failed
    #[error("Failed to write snapshot '{key}': {source}")]
    WriteFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Encoding a snapshot to JSON failed
    #[error("Failed to encode snapshot '{key}': {source}")]
    EncodeFailed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
