/*!
 * Run-scoped statistics counters.
 *
 * One `RunStatistics` instance is created per run, shared via `Arc` between
 * the controller, the rewrite engine, and the translation cache. Counters only
 * ever increase and are read once when the run finishes.
 */

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Monotonic counters for a single translation run
#[derive(Debug, Default)]
pub struct RunStatistics {
    /// Files read and scanned, whether or not anything changed
    files_processed: AtomicUsize,

    /// Files whose content actually changed and was written back
    files_translated: AtomicUsize,

    /// Files skipped because of a parse, backend, or IO error
    files_failed: AtomicUsize,

    /// Characters sent to the backend (cache misses only)
    characters_submitted: AtomicU64,

    /// Regions resolved by the engine (translated or skipped as untouched)
    regions_resolved: AtomicUsize,
}

/// Plain snapshot of the counters, taken at the end of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsSnapshot {
    pub files_processed: usize,
    pub files_translated: usize,
    pub files_failed: usize,
    pub characters_submitted: u64,
    pub regions_resolved: usize,
}

impl RunStatistics {
    /// Create a new zeroed statistics instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_file_processed(&self) {
        self.files_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_file_translated(&self) {
        self.files_translated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_file_failed(&self) {
        self.files_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Add the character count of one backend submission
    pub fn record_characters_submitted(&self, count: u64) {
        self.characters_submitted.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_region_resolved(&self) {
        self.regions_resolved.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a consistent-enough snapshot for end-of-run reporting
    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            files_processed: self.files_processed.load(Ordering::Relaxed),
            files_translated: self.files_translated.load(Ordering::Relaxed),
            files_failed: self.files_failed.load(Ordering::Relaxed),
            characters_submitted: self.characters_submitted.load(Ordering::Relaxed),
            regions_resolved: self.regions_resolved.load(Ordering::Relaxed),
        }
    }
}

impl StatisticsSnapshot {
    /// Summary line printed when a run completes
    pub fn summary(&self) -> String {
        format!(
            "Translation completed with {} processed, {} translated, and {} failed source files.",
            self.files_processed, self.files_translated, self.files_failed
        )
    }
}
