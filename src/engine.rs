/*!
 * Rewrite engine: the scan, translate, splice loop.
 *
 * One engine invocation owns one file's text buffer. Each pass scans the
 * buffer for annotation regions, picks the first one whose text still needs
 * translation, decomposes it into lines, translates the lines that match the
 * inclusion filter, recomposes, and splices the result back over the
 * region's exact span. Because a translation rarely has the same byte length
 * as its source, every splice invalidates all other spans from that scan —
 * so the engine discards the whole classification and re-scans the mutated
 * buffer from scratch instead of patching offsets. The loop ends when a full
 * pass finds nothing left to do.
 *
 * A region whose translation comes back identical to its source can never
 * make progress; its text is remembered as a fixed point and skipped on
 * later passes so the loop always terminates.
 */

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, trace};

use crate::errors::AppError;
use crate::inclusion::InclusionFilter;
use crate::scanner::{scan_source, Region, ScanOptions};
use crate::segments::{decompose, recompose};
use crate::stats::RunStatistics;
use crate::translation::TranslationService;

/// Optional progress reporting collaborator.
///
/// The engine calls `tick` once per resolved region; the controller reports
/// per-file outcomes through the write methods. Engine correctness never
/// depends on a sink being present.
pub trait ProgressSink: Send + Sync {
    fn tick(&self);
    fn write_line(&self, text: &str);
    fn write_error_line(&self, text: &str);
}

/// The segment rewrite engine
pub struct RewriteEngine {
    /// Backend access with run-scoped cache and normalization
    service: TranslationService,

    /// Predicate selecting text that needs translation
    filter: InclusionFilter,

    /// Scanner options: active symbols and enabled region kinds
    scan_options: ScanOptions,

    /// Run-scoped counters
    stats: Arc<RunStatistics>,

    /// Optional progress reporting
    progress: Option<Arc<dyn ProgressSink>>,
}

impl RewriteEngine {
    /// Create an engine for one run
    pub fn new(
        service: TranslationService,
        filter: InclusionFilter,
        scan_options: ScanOptions,
        stats: Arc<RunStatistics>,
    ) -> Self {
        Self {
            service,
            filter,
            scan_options,
            stats,
            progress: None,
        }
    }

    /// Attach a progress sink
    pub fn with_progress(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.progress = Some(sink);
        self
    }

    /// Access to the underlying translation service
    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    /// Rewrite one file's content, returning the new buffer.
    ///
    /// The returned buffer equals the input byte-for-byte outside translated
    /// line contents. Any scan or backend error aborts this file; the caller
    /// decides what to do with the rest of the run.
    pub async fn rewrite(&self, source: &str) -> Result<String, AppError> {
        let mut buffer = source.to_string();

        // Region texts whose translation round-tripped unchanged. The buffer
        // did not change for them, so re-attempting on a later pass could
        // never make progress.
        let mut fixed_points: HashSet<String> = HashSet::new();

        'rescan: loop {
            let regions = scan_source(&buffer, &self.scan_options)?;
            trace!("Scan found {} candidate regions", regions.len());

            for region in &regions {
                // Region-level check is a cheap pre-filter; the per-line
                // check below is what actually gates each submission.
                if !self.filter.should_translate(&region.raw_text) {
                    continue;
                }
                if fixed_points.contains(&region.raw_text) {
                    continue;
                }

                let rewritten = self.translate_region(region).await?;
                self.stats.record_region_resolved();
                self.tick();

                if rewritten == region.raw_text {
                    fixed_points.insert(region.raw_text.clone());
                } else {
                    debug!(
                        "Splicing {:?} region at {}..{}",
                        region.kind,
                        region.span.start,
                        region.span.start + region.span.len
                    );
                    // The span is still valid: nothing was spliced since this
                    // scan. Every other span from it is dead after this edit.
                    buffer.replace_range(region.span.range(), &rewritten);
                    continue 'rescan;
                }
            }

            break;
        }

        Ok(buffer)
    }

    /// Decompose a region, translate each line that needs it, recompose
    async fn translate_region(&self, region: &Region) -> Result<String, AppError> {
        let (wrapper, lines) = decompose(&region.raw_text, region.kind);

        let mut translated_lines = Vec::with_capacity(lines.len());
        for line in &lines {
            if self.filter.should_translate(&line.content) {
                let translated = self.service.translate(&line.content).await?;
                translated_lines.push(line.with_content(translated));
            } else {
                translated_lines.push(line.clone());
            }
        }

        Ok(recompose(&wrapper, &translated_lines))
    }

    fn tick(&self) {
        if let Some(progress) = &self.progress {
            progress.tick();
        }
    }
}
