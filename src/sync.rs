//! Poison recovery for the cache mutex
//!
//! A panic while holding the lock poisons it; the cached payloads themselves
//! stay structurally valid (entries are only ever inserted or removed whole),
//! so recovery is safe.

use std::sync::{Mutex, MutexGuard};

/// Extension trait for Mutex with poison recovery
pub trait MutexExt<T> {
    /// Lock the mutex, recovering from poison errors
    fn lock_recovered(&self) -> MutexGuard<'_, T>;
}

impl<T> MutexExt<T> for Mutex<T> {
    fn lock_recovered(&self) -> MutexGuard<'_, T> {
        match self.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Cache mutex was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}
