//! Installation directory layout and user configuration
//!
//! An LDPlayer installation is a directory containing the console
//! executables and a `vms/` tree holding all configuration files. This
//! module models that layout and resolves installation roots from the user
//! configuration file at `~/.ldpx/ld/config.json`.
//!
//! Discovering an installation by scanning running processes is the job of
//! an outer tool; this crate only validates a root it is handed.

use crate::error::{Error, Result};
use crate::storage::JsonStorage;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Paths of a single LDPlayer installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallDirs {
    root: PathBuf,
}

impl InstallDirs {
    /// Wrap an installation root, validating its layout.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInstall` if required files or folders are missing.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let dirs = Self::new_unchecked(root);
        if !dirs.is_valid() {
            return Err(Error::InvalidInstall(dirs.root));
        }
        Ok(dirs)
    }

    /// Wrap an installation root without validating it.
    ///
    /// Useful for tests and for tools that create the layout themselves.
    pub fn new_unchecked(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve an installation from the user configuration file.
    ///
    /// The file lists installation roots; `index` selects one (0 is the
    /// default installation).
    ///
    /// # Errors
    ///
    /// Returns `InstallNotConfigured` if no root is configured at `index`,
    /// or `InvalidInstall` if the configured root fails validation.
    pub fn from_user_config(index: usize) -> Result<Self> {
        let config = UserConfig::load_or_init()?;
        let root = config
            .path
            .get(index)
            .ok_or(Error::InstallNotConfigured(index))?;
        Self::new(root.clone())
    }

    /// The installation root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the `dnconsole.exe` executable.
    pub fn dn_console(&self) -> PathBuf {
        self.root.join("dnconsole.exe")
    }

    /// Path to the `ldconsole` executable.
    pub fn ld_console(&self) -> PathBuf {
        self.root.join("ldconsole")
    }

    /// Path to the virtual machines folder.
    pub fn vm_folder(&self) -> PathBuf {
        self.root.join("vms")
    }

    /// Path to the main configuration folder (instance and global configs).
    pub fn config_dir(&self) -> PathBuf {
        self.vm_folder().join("config")
    }

    /// Path to the user-customized settings profiles folder.
    pub fn customize_configs(&self) -> PathBuf {
        self.vm_folder().join("customizeConfigs")
    }

    /// Path to the bundled recommended settings profiles folder.
    pub fn recommend_configs(&self) -> PathBuf {
        self.vm_folder().join("recommendConfigs")
    }

    /// Path to the recorded macros folder.
    pub fn operation_records(&self) -> PathBuf {
        self.vm_folder().join("operationRecords")
    }

    /// Check that the required files and folders exist.
    ///
    /// Only the layout is checked; whether the console executable actually
    /// runs is left to the caller.
    pub fn is_valid(&self) -> bool {
        self.dn_console().exists()
            && self.vm_folder().exists()
            && self.config_dir().exists()
            && self.customize_configs().exists()
            && self.recommend_configs().exists()
            && self.operation_records().exists()
    }
}

// =============================================================================
// User Configuration
// =============================================================================

/// Contents of `~/.ldpx/ld/config.json`: the list of known installation
/// roots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub path: Vec<PathBuf>,
}

impl UserConfig {
    /// Location of the user configuration file under the home directory.
    ///
    /// # Errors
    ///
    /// Returns `Config` if no home directory can be determined.
    pub fn config_file() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".into()))?;
        Ok(home.join(".ldpx").join("ld").join("config.json"))
    }

    /// Load the user configuration, creating it with defaults if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can neither be read nor created.
    pub fn load_or_init() -> Result<Self> {
        Self::load_or_init_at(&Self::config_file()?)
    }

    /// Like [`UserConfig::load_or_init`], with an explicit file location.
    pub fn load_or_init_at(path: &Path) -> Result<Self> {
        let storage = JsonStorage::new();
        let config: Self = storage.read_or_create(path, &Self::default())?;
        Ok(config)
    }

    /// Save the configuration back to its default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        self.save_at(&Self::config_file()?)
    }

    /// Like [`UserConfig::save`], with an explicit file location.
    pub fn save_at(&self, path: &Path) -> Result<()> {
        JsonStorage::new().write(path, self)?;
        info!("Saved user configuration to {}", path.display());
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
