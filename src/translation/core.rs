/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct, which owns the
 * backend client, the run-scoped cache, and the capitalization setting. The
 * rewrite engine only ever calls `translate`, which memoizes by exact source
 * text: the backend sees each distinct string once per run, and identical
 * input always yields identical output within a run.
 */

use std::sync::Arc;

use anyhow::Result;

use crate::app_config::{Config, TranslationProvider};
use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::deepl::DeepL;
use crate::providers::google::GoogleTranslate;
use crate::providers::Translator;
use crate::stats::RunStatistics;

use super::cache::TranslationCache;
use super::normalize::capitalize_first_letter;

/// Translation service wrapping a backend with caching and normalization
pub struct TranslationService {
    /// Backend client
    translator: Box<dyn Translator>,

    /// Run-scoped memoization of translated text
    cache: TranslationCache,

    /// Run-scoped statistics, shared with the controller
    stats: Arc<RunStatistics>,

    /// Whether to capitalize the first letter of translations
    capitalize: bool,
}

impl TranslationService {
    /// Create a translation service from the application configuration
    pub fn from_config(config: &Config, stats: Arc<RunStatistics>) -> Result<Self> {
        let translation = &config.translation;
        let retry_count = translation.common.retry_count;
        let retry_backoff_ms = translation.common.retry_backoff_ms;

        let translator: Box<dyn Translator> = match translation.provider {
            TranslationProvider::Google => {
                // Google expects bare two-letter codes; strip any region subtag
                let target = language_utils::normalize_to_part1(&config.target_language)
                    .unwrap_or_else(|_| config.target_language.clone());
                let source = config
                    .source_language
                    .as_ref()
                    .map(|s| language_utils::normalize_to_part1(s).unwrap_or_else(|_| s.clone()));

                Box::new(GoogleTranslate::new(
                    translation.get_api_key(),
                    translation.get_endpoint(),
                    target,
                    source,
                    translation.get_timeout_secs(),
                    retry_count,
                    retry_backoff_ms,
                ))
            }
            TranslationProvider::DeepL => Box::new(DeepL::new(
                translation.get_api_key(),
                translation.get_endpoint(),
                config.target_language.clone(),
                config.source_language.clone(),
                translation.get_timeout_secs(),
                retry_count,
                retry_backoff_ms,
            )),
        };

        Ok(Self::with_translator(translator, config.capitalize, stats))
    }

    /// Create a translation service around an arbitrary backend
    pub fn with_translator(
        translator: Box<dyn Translator>,
        capitalize: bool,
        stats: Arc<RunStatistics>,
    ) -> Self {
        Self {
            translator,
            cache: TranslationCache::new(),
            stats,
            capitalize,
        }
    }

    /// Display name of the active backend
    pub fn backend_name(&self) -> &str {
        self.translator.name()
    }

    /// Access to the run-scoped cache
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Translate one piece of text, memoized for the rest of the run.
    ///
    /// On a cache miss the character count is recorded, the backend is
    /// called, and the capitalization normalizer is applied before the result
    /// is stored — so repeated occurrences observe the normalized value.
    pub async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        if let Some(hit) = self.cache.get(text) {
            return Ok(hit);
        }

        self.stats.record_characters_submitted(text.chars().count() as u64);

        let raw = self.translator.translate(text).await?;
        let normalized = capitalize_first_letter(text, &raw, self.capitalize);
        self.cache.store(text, &normalized);

        Ok(normalized)
    }
}
