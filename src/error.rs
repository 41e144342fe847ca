//! Error types for the ldman library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ldman operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the ldman library
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{}': {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{}': {source}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read directory '{}': {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Invalid JSON in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to decode config payload: {0}")]
    Parse(String),

    // -------------------------------------------------------------------------
    // Installation Errors
    // -------------------------------------------------------------------------
    #[error("Invalid LDPlayer installation directory: {}", .0.display())]
    InvalidInstall(PathBuf),

    #[error("No LDPlayer installation configured at index {0}")]
    InstallNotConfigured(usize),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if this error wraps a filesystem "not found" condition
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::FileRead { source, .. } | Error::DirectoryRead { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}
