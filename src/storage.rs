//! JSON file I/O for config writers
//!
//! All writes in this crate go through [`JsonStorage`]. Reads on the hot path
//! go through the cache instead; this module is for the write side and for
//! one-off reads that deliberately bypass caching.

use crate::error::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;

/// JSON storage for configuration files.
///
/// Writes are atomic: content goes to a `.tmp` sibling first and is renamed
/// over the target, so the emulator never observes a half-written config.
#[derive(Clone, Copy, Default)]
pub struct JsonStorage;

impl JsonStorage {
    pub fn new() -> Self {
        Self
    }

    /// Read and deserialize a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `FileRead` if the file cannot be read and `Json` if its
    /// contents are not valid JSON for `T`.
    pub fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| Error::Json {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Serialize and write a JSON file.
    ///
    /// Creates missing parent directories. The write is atomic (temp file +
    /// rename).
    ///
    /// # Errors
    ///
    /// Returns `Serialize`, `DirectoryCreate`, or `FileWrite` on failure.
    pub fn write<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(data)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        // Append .tmp rather than replacing the extension, so the original
        // filename survives intact in the temp name.
        let file_name = path.file_name().ok_or_else(|| {
            Error::Config(format!(
                "Invalid path '{}': must have a filename",
                path.display()
            ))
        })?;
        let mut temp_filename = file_name.to_os_string();
        temp_filename.push(".tmp");
        let temp_path = path.with_file_name(temp_filename);

        std::fs::write(&temp_path, &content).map_err(|e| Error::FileWrite {
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, path).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Read a JSON file, creating it with `default` first if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can neither be read nor created.
    pub fn read_or_create<T: Serialize + DeserializeOwned>(
        &self,
        path: &Path,
        default: &T,
    ) -> Result<T> {
        if !path.exists() {
            self.write(path, default)?;
        }
        self.read(path)
    }
}

// =============================================================================
// Tests
// =============================================================================
