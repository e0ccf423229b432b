use anyhow::{Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::engine::{ProgressSink, RewriteEngine};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::inclusion::InclusionFilter;
use crate::providers::Translator;
use crate::stats::{RunStatistics, StatisticsSnapshot};
use crate::translation::TranslationService;

/// Application controller: runs the rewrite engine over a source tree.

/// Main application controller for source annotation translation
pub struct Controller {
    /// App configuration
    config: Config,
}

/// Bridges engine progress ticks onto an indicatif spinner
struct ProgressBarSink {
    bar: ProgressBar,
}

impl ProgressSink for ProgressBarSink {
    fn tick(&self) {
        self.bar.inc(1);
    }

    fn write_line(&self, text: &str) {
        self.bar.println(text.to_string());
    }

    fn write_error_line(&self, text: &str) {
        self.bar.println(format!("ERROR: {}", text));
    }
}

impl Controller {
    /// Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))
            .context("Configuration validation failed")?;

        Ok(Self { config })
    }

    /// Run the main workflow over a directory tree
    pub async fn run(&self, root: PathBuf) -> Result<StatisticsSnapshot> {
        let stats = Arc::new(RunStatistics::new());
        let service = TranslationService::from_config(&self.config, Arc::clone(&stats))?;
        self.run_with_service(root, service, stats).await
    }

    /// Run the workflow with an injected backend, used by tests and dry runs
    pub async fn run_with_translator(
        &self,
        root: PathBuf,
        translator: Box<dyn Translator>,
    ) -> Result<StatisticsSnapshot> {
        let stats = Arc::new(RunStatistics::new());
        let service = TranslationService::with_translator(
            translator,
            self.config.capitalize,
            Arc::clone(&stats),
        );
        self.run_with_service(root, service, stats).await
    }

    async fn run_with_service(
        &self,
        root: PathBuf,
        service: TranslationService,
        stats: Arc<RunStatistics>,
    ) -> Result<StatisticsSnapshot> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&root) {
            return Err(anyhow::anyhow!("Directory does not exist: {:?}", root));
        }

        let filter = InclusionFilter::new(&self.config.pattern)?;

        let files = FileManager::collect_files(&root, &self.config.includes, &self.config.excludes)?;
        if files.is_empty() {
            warn!("No files matched the include patterns under {:?}", root);
            return Ok(stats.snapshot());
        }

        info!(
            "Translating annotations in {} file(s) with {}",
            files.len(),
            service.backend_name()
        );

        let multi_progress = MultiProgress::new();

        let folder_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("=>-"));
        folder_pb.set_message("Processing files");

        let region_pb = multi_progress.add(ProgressBar::new_spinner());
        let sink: Arc<dyn ProgressSink> = Arc::new(ProgressBarSink {
            bar: region_pb.clone(),
        });

        let engine = RewriteEngine::new(
            service,
            filter,
            self.config.scan_options(),
            Arc::clone(&stats),
        )
        .with_progress(Arc::clone(&sink));

        for file in &files {
            let display_path = file
                .strip_prefix(&root)
                .unwrap_or(file.as_path())
                .to_string_lossy()
                .to_string();
            region_pb.set_message(display_path.clone());

            stats.record_file_processed();

            match self.process_file(&engine, file).await {
                Ok(changed) => {
                    if changed {
                        stats.record_file_translated();
                        debug!("Translated: {}", display_path);
                    } else {
                        debug!("Unchanged: {}", display_path);
                    }
                }
                Err(e) => {
                    stats.record_file_failed();
                    sink.write_error_line(&format!("{}: {}", display_path, e));
                    error!("{}: {}", display_path, e);
                }
            }

            folder_pb.inc(1);
        }

        let snapshot = stats.snapshot();
        sink.write_line(&snapshot.summary());

        region_pb.finish_and_clear();
        folder_pb.finish_and_clear();

        info!("{}", snapshot.summary());
        info!(
            "Submitted {} characters across {} regions in {}",
            snapshot.characters_submitted,
            snapshot.regions_resolved,
            Self::format_duration(start_time.elapsed())
        );

        Ok(snapshot)
    }

    /// Process a single file; returns whether its content changed.
    ///
    /// A file counted as failed is never partially written: the buffer is
    /// only persisted after the whole rewrite succeeded.
    async fn process_file(&self, engine: &RewriteEngine, file: &Path) -> Result<bool, AppError> {
        let source = std::fs::read_to_string(file)
            .map_err(|e| AppError::File(format!("{}: {}", file.display(), e)))?;

        let rewritten = engine.rewrite(&source).await?;

        if rewritten == source {
            return Ok(false);
        }

        std::fs::write(file, &rewritten)
            .map_err(|e| AppError::File(format!("{}: {}", file.display(), e)))?;

        Ok(true)
    }

    /// Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
