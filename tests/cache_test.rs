//! FileCache behavior tests
//!
//! Covers the capacity bound, hit/staleness semantics, deletion cleanup,
//! eviction ordering and failure-path atomicity.

mod common;

use common::{bump_mtime, mtime_of, set_mtime, write_json};
use ldman::{Error, FileCache};
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;

fn file(dir: &TempDir, name: &str, value: &serde_json::Value) -> PathBuf {
    let path = dir.path().join(name);
    write_json(&path, value);
    path
}

// =============================================================================
// Hits and Staleness
// =============================================================================

#[test]
fn test_second_load_is_a_hit() {
    let dir = TempDir::new().unwrap();
    let cache = FileCache::new();
    let path = file(&dir, "a.json", &json!({"v": 1}));

    let first = cache.load(&path).unwrap().unwrap();
    let second = cache.load(&path).unwrap().unwrap();

    assert_eq!(*first, *second);
    assert_eq!(cache.access_count(&path), Some(2));
}

#[test]
fn test_hit_does_not_reread_file_contents() {
    let dir = TempDir::new().unwrap();
    let cache = FileCache::new();
    let path = file(&dir, "a.json", &json!({"v": 1}));

    cache.load(&path).unwrap();
    let original_mtime = mtime_of(&path);

    // Rewrite the contents but pin the mtime back: an unchanged mtime means
    // the cached payload is served without opening the file.
    write_json(&path, &json!({"v": 2}));
    set_mtime(&path, original_mtime);

    let payload = cache.load(&path).unwrap().unwrap();
    assert_eq!(*payload, json!({"v": 1}));
}

#[test]
fn test_repeated_hits_only_bump_access_count() {
    let dir = TempDir::new().unwrap();
    let cache = FileCache::new();
    let path = file(&dir, "a.json", &json!({"v": 1}));

    for expected in 1..=5 {
        let payload = cache.load(&path).unwrap().unwrap();
        assert_eq!(*payload, json!({"v": 1}));
        assert_eq!(cache.access_count(&path), Some(expected));
    }
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_changed_mtime_forces_reload_and_resets_count() {
    let dir = TempDir::new().unwrap();
    let cache = FileCache::new();
    let path = file(&dir, "a.json", &json!({"v": 1}));

    cache.load(&path).unwrap();
    cache.load(&path).unwrap();
    cache.load(&path).unwrap();
    assert_eq!(cache.access_count(&path), Some(3));

    write_json(&path, &json!({"v": 2}));
    bump_mtime(&path);

    let payload = cache.load(&path).unwrap().unwrap();
    assert_eq!(*payload, json!({"v": 2}));
    assert_eq!(cache.access_count(&path), Some(1));
}

#[test]
fn test_mtime_moved_backwards_still_reloads() {
    let dir = TempDir::new().unwrap();
    let cache = FileCache::new();
    let path = file(&dir, "a.json", &json!({"v": 1}));

    cache.load(&path).unwrap();

    // Staleness keys on inequality, not ordering; a clock stepped backwards
    // must still force a reload.
    write_json(&path, &json!({"v": 2}));
    set_mtime(&path, mtime_of(&path) - std::time::Duration::from_secs(60));

    let payload = cache.load(&path).unwrap().unwrap();
    assert_eq!(*payload, json!({"v": 2}));
}

// =============================================================================
// Deletion
// =============================================================================

#[test]
fn test_missing_file_returns_none() {
    let dir = TempDir::new().unwrap();
    let cache = FileCache::new();

    let result = cache.load(&dir.path().join("missing.json")).unwrap();
    assert!(result.is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_deleted_file_drops_entry() {
    let dir = TempDir::new().unwrap();
    let cache = FileCache::new();
    let path = file(&dir, "a.json", &json!({"v": 1}));

    cache.load(&path).unwrap();
    assert!(cache.contains(&path));

    std::fs::remove_file(&path).unwrap();

    assert!(cache.load(&path).unwrap().is_none());
    assert!(!cache.contains(&path));
    assert!(cache.is_empty());
}

#[test]
fn test_deleted_entry_never_counts_toward_capacity() {
    let dir = TempDir::new().unwrap();
    let cache = FileCache::with_capacity(2).unwrap();

    let a = file(&dir, "a.json", &json!({"n": "a"}));
    cache.load(&a).unwrap();
    std::fs::remove_file(&a).unwrap();
    cache.load(&a).unwrap();

    // The dropped entry must not occupy a slot, so two more loads fit
    // without evicting each other.
    let b = file(&dir, "b.json", &json!({"n": "b"}));
    let c = file(&dir, "c.json", &json!({"n": "c"}));
    cache.load(&b).unwrap();
    cache.load(&c).unwrap();

    assert!(cache.contains(&b));
    assert!(cache.contains(&c));
    assert_eq!(cache.len(), 2);
}

// =============================================================================
// Capacity and Eviction
// =============================================================================

#[test]
fn test_len_never_exceeds_capacity() {
    let dir = TempDir::new().unwrap();
    let cache = FileCache::with_capacity(3).unwrap();

    for i in 0..8 {
        let path = file(&dir, &format!("f{i}.json"), &json!({"i": i}));
        cache.load(&path).unwrap();
        assert!(cache.len() <= 3);
    }
}

#[test]
fn test_eviction_prefers_lowest_access_count() {
    let dir = TempDir::new().unwrap();
    let cache = FileCache::with_capacity(2).unwrap();

    let a = file(&dir, "a.json", &json!({"n": "a"}));
    let b = file(&dir, "b.json", &json!({"n": "b"}));
    let c = file(&dir, "c.json", &json!({"n": "c"}));

    cache.load(&a).unwrap();
    cache.load(&a).unwrap();
    cache.load(&b).unwrap();

    cache.load(&c).unwrap();

    assert!(cache.contains(&a));
    assert!(!cache.contains(&b));
    assert!(cache.contains(&c));
}

#[test]
fn test_eviction_tie_broken_by_insertion_order() {
    let dir = TempDir::new().unwrap();
    let cache = FileCache::with_capacity(3).unwrap();

    let a = file(&dir, "a.json", &json!({"n": "a"}));
    let b = file(&dir, "b.json", &json!({"n": "b"}));
    let c = file(&dir, "c.json", &json!({"n": "c"}));
    let d = file(&dir, "d.json", &json!({"n": "d"}));

    cache.load(&a).unwrap();
    cache.load(&b).unwrap();
    cache.load(&c).unwrap();

    // All counts equal: the earliest-inserted entry goes first.
    cache.load(&d).unwrap();

    assert!(!cache.contains(&a));
    assert!(cache.contains(&b));
    assert!(cache.contains(&c));
    assert!(cache.contains(&d));
}

#[test]
fn test_full_cache_cycle_with_refill() {
    let dir = TempDir::new().unwrap();
    let cache = FileCache::with_capacity(2).unwrap();

    let a = file(&dir, "a.json", &json!({"n": "a"}));
    let b = file(&dir, "b.json", &json!({"n": "b"}));
    let c = file(&dir, "c.json", &json!({"n": "c"}));

    // a is read twice, b once; c displaces b as the least used.
    cache.load(&a).unwrap();
    cache.load(&a).unwrap();
    cache.load(&b).unwrap();
    cache.load(&c).unwrap();
    assert!(cache.contains(&a));
    assert!(!cache.contains(&b));

    // Reloading b displaces c, the sole entry with the lowest count.
    cache.load(&b).unwrap();
    assert!(cache.contains(&a));
    assert!(cache.contains(&b));
    assert!(!cache.contains(&c));
    assert_eq!(cache.access_count(&a), Some(2));
    assert_eq!(cache.access_count(&b), Some(1));
}

#[test]
fn test_stale_reload_keeps_insertion_rank() {
    let dir = TempDir::new().unwrap();
    let cache = FileCache::with_capacity(2).unwrap();

    let a = file(&dir, "a.json", &json!({"n": "a"}));
    let b = file(&dir, "b.json", &json!({"n": "b"}));
    cache.load(&a).unwrap();
    cache.load(&b).unwrap();

    // A stale reload refreshes the payload but does not make the entry
    // "newer" for tie-breaking purposes.
    write_json(&a, &json!({"n": "a2"}));
    bump_mtime(&a);
    cache.load(&a).unwrap();

    let c = file(&dir, "c.json", &json!({"n": "c"}));
    cache.load(&c).unwrap();

    assert!(!cache.contains(&a));
    assert!(cache.contains(&b));
    assert!(cache.contains(&c));
}

// =============================================================================
// Failure Paths
// =============================================================================

#[test]
fn test_invalid_json_surfaces_error_without_inserting() {
    let dir = TempDir::new().unwrap();
    let cache = FileCache::new();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = cache.load(&path);
    assert!(matches!(result, Err(Error::Json { .. })));
    assert!(cache.is_empty());
}

#[test]
fn test_failed_reload_keeps_previous_entry() {
    let dir = TempDir::new().unwrap();
    let cache = FileCache::new();
    let path = file(&dir, "a.json", &json!({"v": 1}));

    cache.load(&path).unwrap();
    cache.load(&path).unwrap();

    std::fs::write(&path, "{ not json").unwrap();
    bump_mtime(&path);

    let result = cache.load(&path);
    assert!(matches!(result, Err(Error::Json { .. })));

    // The store is untouched: the old payload and its metadata survive.
    assert!(cache.contains(&path));
    assert_eq!(cache.access_count(&path), Some(2));
    assert_eq!(cache.len(), 1);

    // Once the file is repaired, the next load succeeds normally.
    write_json(&path, &json!({"v": 3}));
    bump_mtime(&path);
    let payload = cache.load(&path).unwrap().unwrap();
    assert_eq!(*payload, json!({"v": 3}));
    assert_eq!(cache.access_count(&path), Some(1));
}

#[test]
fn test_zero_capacity_rejected() {
    let result = FileCache::with_capacity(0);
    assert!(matches!(result, Err(Error::Config(_))));
}

// =============================================================================
// Invalidation
// =============================================================================

#[test]
fn test_invalidate_forces_reread_despite_equal_mtime() {
    let dir = TempDir::new().unwrap();
    let cache = FileCache::new();
    let path = file(&dir, "a.json", &json!({"v": 1}));

    cache.load(&path).unwrap();
    let original_mtime = mtime_of(&path);

    // Simulate a write that lands inside the mtime granularity window.
    write_json(&path, &json!({"v": 2}));
    set_mtime(&path, original_mtime);

    cache.invalidate(&path);
    assert!(!cache.contains(&path));

    let payload = cache.load(&path).unwrap().unwrap();
    assert_eq!(*payload, json!({"v": 2}));
}
