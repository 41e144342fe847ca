//! # ldman - LDPlayer Config Manager
//!
//! A Rust library for reading and writing the JSON configuration files of an
//! LDPlayer emulator installation: per-instance configs, the global config
//! and `.smp` settings profiles.
//!
//! The emulator's own console rewrites these files at any time, so all reads
//! go through a shared, bounded [`FileCache`] that detects external changes
//! via file modification times and evicts least-frequently-used entries under
//! memory pressure. Writes bypass the cache entirely; the next read notices
//! the new modification time and refreshes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ldman::{FileCache, InstallDirs, InstanceManager};
//! use std::sync::Arc;
//!
//! # fn example() -> ldman::Result<()> {
//! let dirs = InstallDirs::new("C:/LDPlayer/LDPlayer9")?;
//! let cache = Arc::new(FileCache::new());
//!
//! let instances = InstanceManager::new(dirs, Arc::clone(&cache));
//! for id in instances.list_ids()? {
//!     if let Some(config) = instances.get(id)? {
//!         println!("{id}: {}", config.status_settings.player_name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Sharing the cache
//!
//! Construct one [`FileCache`] at startup and hand the same `Arc` to every
//! manager. Each manager composes the [`CacheClient`] capability; the cache
//! itself stays agnostic to file shapes and only ever sees absolute paths
//! and raw JSON values.
//!
//! ```rust,no_run
//! use ldman::{FileCache, GlobalManager, InstallDirs, InstanceManager, ProfileManager};
//! use std::sync::Arc;
//!
//! # fn example() -> ldman::Result<()> {
//! let dirs = InstallDirs::from_user_config(0)?;
//! let cache = Arc::new(FileCache::new());
//!
//! let instances = InstanceManager::new(dirs.clone(), Arc::clone(&cache));
//! let global = GlobalManager::new(dirs.clone(), Arc::clone(&cache));
//! let profiles = ProfileManager::new(dirs, cache);
//! # let _ = (instances, global, profiles);
//! # Ok(())
//! # }
//! ```
//!
//! ## Writing configs
//!
//! ```rust,no_run
//! use ldman::{FileCache, GlobalManager, InstallDirs};
//! use std::sync::Arc;
//!
//! # fn example() -> ldman::Result<()> {
//! # let dirs = InstallDirs::from_user_config(0)?;
//! # let global = GlobalManager::new(dirs, Arc::new(FileCache::new()));
//! let mut config = global.get()?.unwrap_or_default();
//! config.frames_per_second = 120;
//! global.dump(&config)?;
//! # Ok(())
//! # }
//! ```

// Core modules
mod cache;
mod client;
mod error;
mod keys;
mod sync;

pub mod install;
pub mod manager;
pub mod model;
pub mod storage;

pub use cache::{DEFAULT_CAPACITY, FileCache};
pub use client::CacheClient;
pub use error::{Error, Result};
pub use install::{InstallDirs, UserConfig};
pub use manager::{GlobalManager, InstanceManager, ProfileManager};
pub use model::{GlobalConfig, InstanceConfig, SmpProfile};
pub use storage::JsonStorage;
