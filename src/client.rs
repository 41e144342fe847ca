//! Cached-read capability composed by the config file managers

use crate::cache::FileCache;
use crate::error::Result;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Capability for cached, staleness-checked JSON reads.
///
/// Every config-file manager composes this trait instead of touching the
/// cache directly. The manager owns the mapping from logical identifiers
/// (instance index, profile name) to concrete paths, and the codec between
/// raw payloads and typed records; all raw reads funnel through the one
/// shared [`FileCache`].
///
/// Writers never update a cache entry in place: a save serializes the typed
/// record straight to disk and invalidates the written path, and the next
/// read observes the new modification time and refreshes transparently. An
/// in-place update could never desynchronize payload from mtime this way.
pub trait CacheClient {
    /// The process-wide cache handle this manager was constructed with.
    fn cache(&self) -> &Arc<FileCache>;

    /// Load the raw JSON payload at `path`, served from cache when fresh.
    ///
    /// Returns `None` when the file does not exist, which callers treat as
    /// an expected outcome (e.g. a profile that was never customized).
    ///
    /// # Errors
    ///
    /// Propagates read and parse failures from [`FileCache::load`].
    fn load_json(&self, path: &Path) -> Result<Option<Arc<Value>>> {
        self.cache().load(path)
    }
}
