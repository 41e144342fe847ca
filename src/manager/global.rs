//! Manager for the master config file (`leidians.config`)

use crate::cache::FileCache;
use crate::client::CacheClient;
use crate::error::Result;
use crate::install::InstallDirs;
use crate::model::GlobalConfig;
use crate::storage::JsonStorage;
use log::info;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Typed access to the global `leidians.config` file of one installation.
pub struct GlobalManager {
    dirs: InstallDirs,
    cache: Arc<FileCache>,
    storage: JsonStorage,
}

impl CacheClient for GlobalManager {
    fn cache(&self) -> &Arc<FileCache> {
        &self.cache
    }
}

impl GlobalManager {
    /// Create a manager for `dirs`, sharing the process-wide `cache`.
    pub fn new(dirs: InstallDirs, cache: Arc<FileCache>) -> Self {
        Self {
            dirs,
            cache,
            storage: JsonStorage::new(),
        }
    }

    /// Path of the master config file.
    pub fn config_path(&self) -> PathBuf {
        self.dirs.config_dir().join("leidians.config")
    }

    /// Load the global config.
    ///
    /// Returns `None` when the file does not exist (a fresh installation
    /// that has never been configured).
    ///
    /// # Errors
    ///
    /// Propagates cache read/parse failures and `Parse` if the payload does
    /// not match the global config shape.
    pub fn get(&self) -> Result<Option<GlobalConfig>> {
        let path = self.config_path();
        match self.load_json(&path)? {
            Some(raw) => Ok(Some(GlobalConfig::from_wire(&raw)?)),
            None => Ok(None),
        }
    }

    /// Save the global config.
    ///
    /// Writes the wire shape directly to disk and invalidates the cached
    /// entry; the next read picks up the new contents.
    ///
    /// # Errors
    ///
    /// Returns serialization or write failures.
    pub fn dump(&self, config: &GlobalConfig) -> Result<()> {
        let path = self.config_path();
        self.storage.write(&path, &config.to_wire()?)?;
        self.cache.invalidate(&path);
        info!("Saved global config to {}", path.display());
        Ok(())
    }

    /// Load a global config from an arbitrary path, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns read or parse failures.
    pub fn load_from(path: &Path) -> Result<GlobalConfig> {
        let raw: Value = JsonStorage::new().read(path)?;
        GlobalConfig::from_wire(&raw)
    }
}
