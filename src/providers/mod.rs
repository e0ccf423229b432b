/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the supported translation
 * backends:
 * - Google Translate (Cloud Translation v2, plus the keyless demo endpoint)
 * - DeepL
 * - A mock translator for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation backends
///
/// This is the entire contract the engine relies on: a display name and a
/// single text-in, text-out call that may fail with a `ProviderError`. A
/// backend failure is fatal for the file being processed, never for the run.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Human-readable backend name, used in logs and the startup banner
    fn name(&self) -> &str;

    /// Translate one piece of text
    ///
    /// # Arguments
    /// * `text` - The exact source text to translate
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(&self, text: &str) -> Result<String, ProviderError>;
}

pub mod deepl;
pub mod google;
pub mod mock;
