//! Process-wide cache for parsed JSON configuration files
//!
//! The emulator console rewrites config files at any time, so every read
//! re-checks the file's modification time before serving a cached payload.
//! Memory is bounded by a least-frequently-used eviction policy: each entry
//! tracks how often it has been served, and when the store is full the least
//! accessed entries make room for the incoming one.
//!
//! One [`FileCache`] is constructed at startup and shared (via `Arc`) by every
//! config manager in the process; see [`CacheClient`](crate::CacheClient).

use crate::error::{Error, Result};
use crate::sync::MutexExt;
use log::debug;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

/// Default maximum number of cached files
pub const DEFAULT_CAPACITY: usize = 1000;

/// One cached file: the parsed payload plus the metadata driving staleness
/// detection and eviction.
struct CacheEntry {
    payload: Arc<Value>,
    /// On-disk modification time observed when the payload was loaded
    mtime: SystemTime,
    /// Times this entry has been served, starting at 1 on (re)load
    access_count: u64,
    /// Insertion sequence; breaks eviction ties (earliest inserted first)
    inserted: u64,
}

struct CacheState {
    entries: HashMap<PathBuf, CacheEntry>,
    next_seq: u64,
}

/// Bounded, staleness-checked store of parsed JSON config payloads, keyed by
/// absolute file path.
///
/// Paths are not canonicalized: two different path strings to the same inode
/// are independent entries. Payloads are shared read-only; callers must not
/// assume an entry outlives the call that returned it, since any later load
/// may evict or replace it.
///
/// A single mutex guards the whole load sequence, including the file I/O.
/// Two concurrent misses could otherwise both size up the store and evict
/// based on a length the other is about to change.
pub struct FileCache {
    capacity: usize,
    state: Mutex<CacheState>,
}

impl FileCache {
    /// Create a cache with the default capacity of [`DEFAULT_CAPACITY`] files.
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                next_seq: 0,
            }),
        }
    }

    /// Create a cache holding at most `capacity` files.
    ///
    /// # Errors
    ///
    /// Returns `Config` if `capacity` is 0.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::Config(
                "Cache capacity must be greater than 0".into(),
            ));
        }
        Ok(Self {
            capacity,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                next_seq: 0,
            }),
        })
    }

    /// Maximum number of entries this cache will hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of cached entries.
    pub fn len(&self) -> usize {
        self.state.lock_recovered().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Times the entry for `path` has been served, if cached.
    ///
    /// Diagnostic accessor; does not count as an access itself.
    pub fn access_count(&self, path: &Path) -> Option<u64> {
        self.state
            .lock_recovered()
            .entries
            .get(path)
            .map(|e| e.access_count)
    }

    /// Whether `path` currently has a cached entry.
    pub fn contains(&self, path: &Path) -> bool {
        self.state.lock_recovered().entries.contains_key(path)
    }

    /// Drop the entry for `path`, if any.
    ///
    /// Writers call this after saving a file they control: modification-time
    /// granularity can be too coarse for an immediate re-read to notice the
    /// change on its own.
    pub fn invalidate(&self, path: &Path) {
        let mut state = self.state.lock_recovered();
        if state.entries.remove(path).is_some() {
            debug!("Invalidated cache entry for {}", path.display());
        }
    }

    /// Load the parsed JSON payload of the file at `path`.
    ///
    /// Serves the cached payload when the file's modification time is
    /// unchanged since the last load; otherwise re-reads and re-parses the
    /// file, evicting the least frequently used entries first if the store is
    /// full. Returns `Ok(None)` when the file does not exist (any cached
    /// entry for it is dropped).
    ///
    /// # Errors
    ///
    /// Returns `FileRead` if the file exists but cannot be read, and `Json`
    /// if its contents are not valid JSON. Neither failure modifies the
    /// store: a failed reload never replaces a previously cached payload.
    pub fn load(&self, path: &Path) -> Result<Option<Arc<Value>>> {
        let mut state = self.state.lock_recovered();

        // A vanished file must drop its entry immediately: it can no longer
        // be trusted and must not occupy a slot or show up as an eviction
        // candidate.
        let mtime = match std::fs::metadata(path) {
            Ok(meta) => meta.modified().map_err(|e| Error::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if state.entries.remove(path).is_some() {
                    debug!("Dropped cache entry for deleted file {}", path.display());
                }
                return Ok(None);
            }
            Err(e) => {
                return Err(Error::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        // Staleness keys on mtime equality, not ordering, so any change to
        // the file forces a reload even if a clock moved backwards.
        if let Some(entry) = state.entries.get_mut(path) {
            if entry.mtime == mtime {
                entry.access_count += 1;
                debug!(
                    "Cache hit for {} (access count {})",
                    path.display(),
                    entry.access_count
                );
                return Ok(Some(Arc::clone(&entry.payload)));
            }
            debug!("Stale cache entry for {}, reloading", path.display());
        }

        // Read and parse before touching the map, so a failed reload leaves
        // the store exactly as it was.
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Vanished between the stat and the read
                state.entries.remove(path);
                return Ok(None);
            }
            Err(e) => {
                return Err(Error::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };
        let payload = Arc::new(serde_json::from_str::<Value>(&raw).map_err(|e| Error::Json {
            path: path.to_path_buf(),
            source: e,
        })?);

        if state.entries.len() >= self.capacity {
            Self::evict_for_insert(&mut state, self.capacity);
        }

        // A reloaded entry keeps its original insertion rank; only an entry
        // that was actually removed re-enters at the end of the order.
        let existing_rank = state.entries.get(path).map(|e| e.inserted);
        let inserted = existing_rank.unwrap_or_else(|| {
            let seq = state.next_seq;
            state.next_seq += 1;
            seq
        });

        state.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                payload: Arc::clone(&payload),
                mtime,
                access_count: 1,
                inserted,
            },
        );
        debug!(
            "Cached {} ({}/{} slots used)",
            path.display(),
            state.entries.len(),
            self.capacity
        );

        Ok(Some(payload))
    }

    /// Remove exactly enough of the least frequently used entries to leave
    /// room for one insertion. Ties on access count fall to the earliest
    /// inserted entry, keeping eviction reproducible for identical call
    /// sequences.
    fn evict_for_insert(state: &mut CacheState, capacity: usize) {
        let to_evict = state.entries.len() - capacity + 1;

        let mut ranked: Vec<(u64, u64, PathBuf)> = state
            .entries
            .iter()
            .map(|(path, entry)| (entry.access_count, entry.inserted, path.clone()))
            .collect();
        ranked.sort_unstable();

        for (count, _, path) in ranked.into_iter().take(to_evict) {
            state.entries.remove(&path);
            debug!("Evicted {} (access count {})", path.display(), count);
        }
    }
}

impl Default for FileCache {
    fn default() -> Self {
        Self::new()
    }
}
