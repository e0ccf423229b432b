/*!
 * Translation caching functionality.
 *
 * This module provides the run-scoped memoization of translated text. Source
 * trees repeat identical boilerplate (license headers, TODO markers), so each
 * distinct string goes to the backend once per run; every later occurrence of
 * the identical string gets the memoized value. Entries are never evicted and
 * never expire within a run.
 */

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

/// Run-scoped translation cache keyed by exact source content
pub struct TranslationCache {
    /// Internal cache storage
    cache: Arc<RwLock<HashMap<String, String>>>,

    /// Cache hit counter
    hits: Arc<RwLock<usize>>,

    /// Cache miss counter
    misses: Arc<RwLock<usize>>,
}

impl TranslationCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
        }
    }

    /// Get a memoized translation for exactly this source text
    pub fn get(&self, source_text: &str) -> Option<String> {
        let cache = self.cache.read();

        match cache.get(source_text) {
            Some(translation) => {
                let mut hits = self.hits.write();
                *hits += 1;

                debug!("Cache hit for '{}'", truncate_text(source_text, 30));

                Some(translation.clone())
            }
            None => {
                let mut misses = self.misses.write();
                *misses += 1;

                debug!("Cache miss for '{}'", truncate_text(source_text, 30));

                None
            }
        }
    }

    /// Store a translation for exactly this source text
    pub fn store(&self, source_text: &str, translation: &str) {
        let mut cache = self.cache.write();
        cache.insert(source_text.to_string(), translation.to_string());
    }

    /// Get cache statistics as (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TranslationCache {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
        }
    }
}

/// Truncate text to a maximum length with ellipsis
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_length).collect::<String>())
    }
}
