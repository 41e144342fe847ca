//! Manager for settings-metadata profiles (`.smp` files)

use crate::cache::FileCache;
use crate::client::CacheClient;
use crate::error::{Error, Result};
use crate::install::InstallDirs;
use crate::model::SmpProfile;
use crate::storage::JsonStorage;
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const SMP_EXTENSION: &str = ".smp";

/// Typed access to the `.smp` settings profiles of one installation.
///
/// Profiles live in two folders: `customizeConfigs/` holds the user's own
/// profiles (writable), `recommendConfigs/` the ones bundled with the
/// emulator (read-only as far as this crate is concerned).
pub struct ProfileManager {
    dirs: InstallDirs,
    cache: Arc<FileCache>,
    storage: JsonStorage,
}

impl CacheClient for ProfileManager {
    fn cache(&self) -> &Arc<FileCache> {
        &self.cache
    }
}

impl ProfileManager {
    /// Create a manager for `dirs`, sharing the process-wide `cache`.
    pub fn new(dirs: InstallDirs, cache: Arc<FileCache>) -> Self {
        Self {
            dirs,
            cache,
            storage: JsonStorage::new(),
        }
    }

    fn with_extension(name: &str) -> String {
        if name.ends_with(SMP_EXTENSION) {
            name.to_string()
        } else {
            format!("{name}{SMP_EXTENSION}")
        }
    }

    /// Path of a user profile; `.smp` is appended when missing.
    pub fn customize_path(&self, name: &str) -> PathBuf {
        self.dirs.customize_configs().join(Self::with_extension(name))
    }

    /// Path of a bundled profile; `.smp` is appended when missing.
    pub fn recommended_path(&self, name: &str) -> PathBuf {
        self.dirs.recommend_configs().join(Self::with_extension(name))
    }

    /// List the file names of all user profiles, sorted.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryRead` if the profiles folder cannot be listed.
    pub fn list_customize(&self) -> Result<Vec<String>> {
        let dir = self.dirs.customize_configs();
        let mut names = Vec::new();

        let entries = std::fs::read_dir(&dir).map_err(|e| Error::DirectoryRead {
            path: dir.clone(),
            source: e,
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::DirectoryRead {
                path: dir.clone(),
                source: e,
            })?;
            if !entry.path().is_file() {
                continue;
            }
            let name = entry.file_name();
            if let Some(name) = name.to_str() {
                if name.ends_with(SMP_EXTENSION) {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Load a user profile by name.
    ///
    /// Returns `None` when the profile has not been customized yet.
    ///
    /// # Errors
    ///
    /// Propagates cache read/parse failures and `Parse` if the payload does
    /// not match the profile shape.
    pub fn get_customize(&self, name: &str) -> Result<Option<SmpProfile>> {
        self.get_at(&self.customize_path(name))
    }

    /// Load a bundled recommended profile by name.
    ///
    /// # Errors
    ///
    /// See [`ProfileManager::get_customize`].
    pub fn get_recommended(&self, name: &str) -> Result<Option<SmpProfile>> {
        self.get_at(&self.recommended_path(name))
    }

    fn get_at(&self, path: &Path) -> Result<Option<SmpProfile>> {
        match self.load_json(path)? {
            Some(raw) => {
                let profile = serde_json::from_value((*raw).clone())
                    .map_err(|e| Error::Parse(e.to_string()))?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    /// Save a profile.
    ///
    /// Relative `target` paths resolve against the `customizeConfigs/`
    /// folder; absolute paths are used as-is. Writes directly to disk and
    /// invalidates the cached entry.
    ///
    /// # Errors
    ///
    /// Returns serialization or write failures.
    pub fn dump(&self, target: impl AsRef<Path>, profile: &SmpProfile) -> Result<()> {
        let target = target.as_ref();
        let path = if target.is_absolute() {
            target.to_path_buf()
        } else {
            self.dirs.customize_configs().join(target)
        };

        self.storage.write(&path, profile)?;
        self.cache.invalidate(&path);
        info!("Saved settings profile to {}", path.display());
        Ok(())
    }

    /// Load a profile from an arbitrary path, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns read or parse failures.
    pub fn load_from(path: &Path) -> Result<SmpProfile> {
        JsonStorage::new().read(path)
    }
}
