/*!
 * Tests for translation cache functionality
 */

use transrc::translation::cache::TranslationCache;

#[test]
fn test_cache_new_shouldStartEmpty() {
    let cache = TranslationCache::new();
    assert!(cache.is_empty());
    assert_eq!(cache.len(), 0);
}

#[test]
fn test_cache_store_shouldReturnStoredTranslation() {
    let cache = TranslationCache::new();
    cache.store("héllo", "Hello");

    assert_eq!(cache.get("héllo"), Some("Hello".to_string()));
}

#[test]
fn test_cache_get_withMissingKey_shouldReturnNone() {
    let cache = TranslationCache::new();
    assert!(cache.get("nonexistent").is_none());
}

#[test]
fn test_cache_get_withDifferentText_shouldReturnNone() {
    let cache = TranslationCache::new();
    cache.store("héllo", "Hello");

    // Keys are exact strings; near-misses stay misses
    assert!(cache.get("héllo ").is_none());
    assert!(cache.get("Héllo").is_none());
}

#[test]
fn test_cache_store_withMultipleEntries_shouldStoreAll() {
    let cache = TranslationCache::new();

    cache.store("héllo", "Hello");
    cache.store("wörld", "World");

    assert_eq!(cache.get("héllo"), Some("Hello".to_string()));
    assert_eq!(cache.get("wörld"), Some("World".to_string()));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_cache_store_withSameKey_shouldOverwrite() {
    let cache = TranslationCache::new();

    cache.store("héllo", "Hello");
    cache.store("héllo", "Howdy");

    assert_eq!(cache.get("héllo"), Some("Howdy".to_string()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_stats_shouldTrackHitsAndMisses() {
    let cache = TranslationCache::new();
    cache.store("héllo", "Hello");

    let _ = cache.get("héllo");
    let _ = cache.get("héllo");
    let _ = cache.get("missing");

    let (hits, misses, hit_rate) = cache.stats();
    assert_eq!(hits, 2);
    assert_eq!(misses, 1);
    assert!((hit_rate - 2.0 / 3.0).abs() < f64::EPSILON);
}

#[test]
fn test_cache_clone_shouldShareStorage() {
    let cache = TranslationCache::new();
    let cloned = cache.clone();

    cache.store("héllo", "Hello");

    assert_eq!(cloned.get("héllo"), Some("Hello".to_string()));
}
