//! Tests for the marker cache.

mod common;

use std::sync::Arc;
use std::thread;

use common::marker;
use waypost_core::{MarkerCache, MarkerStore};

#[test]
fn test_cache_round_trip() {
    let cache = MarkerCache::new();
    let m = marker("h1", 12.97, 77.59).with_description("Block A");

    cache.set("h1", m.clone());

    assert!(cache.has("h1"));
    assert_eq!(cache.get("h1"), Some(m));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_clear_forgets_everything() {
    let cache = MarkerCache::new();
    let ids: Vec<String> = (0..50).map(|i| format!("m{i}")).collect();
    for (i, id) in ids.iter().enumerate() {
        cache.set(id, marker(id, i as f64, 0.0));
    }
    assert_eq!(cache.len(), 50);

    cache.clear();

    assert!(cache.is_empty());
    for id in &ids {
        assert!(!cache.has(id));
        assert!(cache.get(id).is_none());
    }
}

#[test]
fn test_cache_one_entry_per_id() {
    let cache = MarkerCache::new();
    cache.set("x", marker("x", 1.0, 1.0));
    cache.set("x", marker("x", 2.0, 2.0));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("x").unwrap().coordinates.lat, 2.0);
}

#[test]
fn test_cache_shared_across_threads() {
    let cache = Arc::new(MarkerCache::new());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..100 {
                    let id = format!("t{t}-{i}");
                    cache.set(&id, marker(&id, t as f64, i as f64));
                    assert!(cache.has(&id));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(cache.len(), 800);
}

#[test]
fn test_cache_usable_as_trait_object() {
    let store: Arc<dyn MarkerStore> = Arc::new(MarkerCache::new());
    store.set("a", marker("a", 0.0, 0.0));
    assert!(store.has("a"));
    store.clear();
    assert!(!store.has("a"));
}
