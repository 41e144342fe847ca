//! Manager for per-instance config files (`leidian<N>.config`)

use crate::cache::FileCache;
use crate::client::CacheClient;
use crate::error::{Error, Result};
use crate::install::InstallDirs;
use crate::model::InstanceConfig;
use crate::storage::JsonStorage;
use log::{debug, info};
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

fn instance_file_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^leidian(\d+)\.config$").expect("hardcoded regex"))
}

/// Typed access to the per-instance config files of one installation.
pub struct InstanceManager {
    dirs: InstallDirs,
    cache: Arc<FileCache>,
    storage: JsonStorage,
}

impl CacheClient for InstanceManager {
    fn cache(&self) -> &Arc<FileCache> {
        &self.cache
    }
}

impl InstanceManager {
    /// Create a manager for `dirs`, sharing the process-wide `cache`.
    pub fn new(dirs: InstallDirs, cache: Arc<FileCache>) -> Self {
        Self {
            dirs,
            cache,
            storage: JsonStorage::new(),
        }
    }

    /// Path of the config file for instance `id`.
    pub fn config_path(&self, id: u32) -> PathBuf {
        self.dirs.config_dir().join(format!("leidian{id}.config"))
    }

    /// Parse an instance reference: a bare index (`"3"`) or a config file
    /// stem (`"leidian3"`).
    pub fn parse_ref(reference: &str) -> Option<u32> {
        if let Ok(id) = reference.parse::<u32>() {
            return Some(id);
        }
        reference
            .strip_prefix("leidian")
            .and_then(|rest| rest.parse().ok())
    }

    /// List the ids of all instances that have a config file.
    ///
    /// The master `leidians.config` file is not an instance and is skipped,
    /// as is anything else not matching the `leidian<N>.config` pattern.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryRead` if the config folder cannot be listed.
    pub fn list_ids(&self) -> Result<Vec<u32>> {
        let config_dir = self.dirs.config_dir();
        let mut ids = Vec::new();

        let entries = std::fs::read_dir(&config_dir).map_err(|e| Error::DirectoryRead {
            path: config_dir.clone(),
            source: e,
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::DirectoryRead {
                path: config_dir.clone(),
                source: e,
            })?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(caps) = instance_file_regex().captures(name) {
                if let Ok(id) = caps[1].parse() {
                    ids.push(id);
                }
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }

    /// Load the config of instance `id`.
    ///
    /// Returns `None` when the instance has no config file.
    ///
    /// # Errors
    ///
    /// Propagates cache read/parse failures and `Parse` if the payload does
    /// not match the instance config shape.
    pub fn get(&self, id: u32) -> Result<Option<InstanceConfig>> {
        let path = self.config_path(id);
        match self.load_json(&path)? {
            Some(raw) => Ok(Some(InstanceConfig::from_wire(&raw)?)),
            None => Ok(None),
        }
    }

    /// Load the configs of several instances at once.
    ///
    /// Instances without a config file are skipped.
    ///
    /// # Errors
    ///
    /// Propagates the first read or parse failure.
    pub fn get_many(&self, ids: &[u32]) -> Result<BTreeMap<u32, InstanceConfig>> {
        let mut configs = BTreeMap::new();
        for &id in ids {
            match self.get(id)? {
                Some(config) => {
                    configs.insert(id, config);
                }
                None => debug!("Instance {id} has no config file, skipping"),
            }
        }
        Ok(configs)
    }

    /// Save the config of instance `id`.
    ///
    /// Writes the wire shape directly to disk and invalidates the cached
    /// entry; the next read picks up the new contents.
    ///
    /// # Errors
    ///
    /// Returns serialization or write failures.
    pub fn dump(&self, id: u32, config: &InstanceConfig) -> Result<()> {
        let path = self.config_path(id);
        self.storage.write(&path, &config.to_wire()?)?;
        self.cache.invalidate(&path);
        info!("Saved instance {id} config to {}", path.display());
        Ok(())
    }

    /// Load an instance config from an arbitrary path, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns read or parse failures.
    pub fn load_from(path: &Path) -> Result<InstanceConfig> {
        let raw: Value = JsonStorage::new().read(path)?;
        InstanceConfig::from_wire(&raw)
    }
}
