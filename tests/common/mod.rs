//! Common test utilities for ldman integration tests
//!
//! Provides a synthetic installation tree plus helpers for writing config
//! files and pinning modification times.

#![allow(dead_code)]

use ldman::{FileCache, GlobalManager, InstallDirs, InstanceManager, ProfileManager};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// Test fixture that provides a temporary installation layout, a shared
/// cache, and managers bound to both.
pub struct InstallFixture {
    pub temp: TempDir,
    pub dirs: InstallDirs,
    pub cache: Arc<FileCache>,
}

impl InstallFixture {
    /// Create a fixture with the default cache capacity.
    pub fn new() -> Self {
        Self::with_cache(FileCache::new())
    }

    /// Create a fixture with a small cache, for eviction tests.
    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self::with_cache(FileCache::with_capacity(capacity).expect("non-zero capacity"))
    }

    fn with_cache(cache: FileCache) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let temp = TempDir::new().expect("Failed to create temp dir");
        let root = temp.path();
        for sub in [
            "vms/config",
            "vms/customizeConfigs",
            "vms/recommendConfigs",
            "vms/operationRecords",
        ] {
            std::fs::create_dir_all(root.join(sub)).expect("Failed to create layout");
        }
        std::fs::write(root.join("dnconsole.exe"), b"").unwrap();
        std::fs::write(root.join("ldconsole"), b"").unwrap();

        let dirs = InstallDirs::new(root).expect("fixture layout is valid");
        Self {
            temp,
            dirs,
            cache: Arc::new(cache),
        }
    }

    pub fn instance_manager(&self) -> InstanceManager {
        InstanceManager::new(self.dirs.clone(), Arc::clone(&self.cache))
    }

    pub fn global_manager(&self) -> GlobalManager {
        GlobalManager::new(self.dirs.clone(), Arc::clone(&self.cache))
    }

    pub fn profile_manager(&self) -> ProfileManager {
        ProfileManager::new(self.dirs.clone(), Arc::clone(&self.cache))
    }

    /// Write a raw wire-shaped instance config and return its path.
    pub fn write_instance_wire(&self, id: u32, value: &Value) -> PathBuf {
        let path = self
            .dirs
            .config_dir()
            .join(format!("leidian{id}.config"));
        write_json(&path, value);
        path
    }

    /// Write the raw wire-shaped master config and return its path.
    pub fn write_global_wire(&self, value: &Value) -> PathBuf {
        let path = self.dirs.config_dir().join("leidians.config");
        write_json(&path, value);
        path
    }
}

impl Default for InstallFixture {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write a JSON value to a file, creating parent directories.
pub fn write_json(path: &Path, value: &Value) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Pin a file's modification time to an exact value.
pub fn set_mtime(path: &Path, mtime: SystemTime) {
    let file = std::fs::File::options().write(true).open(path).unwrap();
    file.set_modified(mtime).unwrap();
}

/// Current modification time of a file.
pub fn mtime_of(path: &Path) -> SystemTime {
    std::fs::metadata(path).unwrap().modified().unwrap()
}

/// Move a file's modification time forward by a couple of seconds, so even
/// coarse-granularity filesystems observe a change.
pub fn bump_mtime(path: &Path) {
    let bumped = mtime_of(path) + Duration::from_secs(2);
    set_mtime(path, bumped);
}

/// A realistic wire-shaped instance config (flat dotted keys).
pub fn sample_instance_wire() -> Value {
    json!({
        "propertySettings.phoneIMEI": "865166023949731",
        "propertySettings.phoneIMSI": "460000000000000",
        "propertySettings.phoneSimSerial": "89860000000000000000",
        "propertySettings.phoneAndroidId": "9774d56d682e549c",
        "propertySettings.phoneModel": "ASUS_Z01QD",
        "propertySettings.phoneManufacturer": "asus",
        "propertySettings.macAddress": "00FF82E6E286",
        "statusSettings.sharedApplications": "./Applications",
        "statusSettings.sharedPictures": "./Pictures",
        "statusSettings.sharedMisc": "./Misc",
        "statusSettings.closeOption": 0,
        "statusSettings.playerName": "leidian0",
        "basicSettings.left": 100,
        "basicSettings.top": 50,
        "basicSettings.width": 540,
        "basicSettings.height": 960,
        "basicSettings.realHeigh": 960,
        "basicSettings.realWidth": 540,
        "basicSettings.isForstStart": false,
        "basicSettings.verticalSync": false,
        "basicSettings.fps": 60,
        "basicSettings.astc": true,
        "basicSettings.rootMode": false,
        "basicSettings.adbDebug": 0,
        "networkSettings.networkEnable": true,
        "networkSettings.networkStatic": false,
        "networkSettings.networkAddress": "0.0.0.0",
        "networkSettings.networkDNS1": "8.8.8.8",
        "networkSettings.networkDNS2": "8.8.4.4",
        "advancedSettings.resolution": { "width": 540, "height": 960 },
        "advancedSettings.resolutionDpi": 240,
        "advancedSettings.cpuCount": 2,
        "advancedSettings.memorySize": 2048,
        "hotkeySettings.backKey": { "modifiers": 0, "key": 27 },
        "hotkeySettings.homeKey": { "modifiers": 0, "key": 36 }
    })
}

/// A realistic `.smp` settings profile payload.
pub fn sample_smp() -> Value {
    json!({
        "reduceInertia": false,
        "keyboardShowGreet": true,
        "joystickShowGreet": true,
        "keyboardFirstGreet": false,
        "joystickFirstGreet": true,
        "keyboardShowHints": true,
        "joystickShowHints": false,
        "keyboardIgnoreVersion": 0,
        "joystickIgnoreVersion": 3,
        "noticeTimes": 2,
        "noticeHash": -1204979084,
        "resolutionRelatives": {
            "540x960": { "scale": 1.0 }
        }
    })
}
