/*!
 * Translation service for source annotation translation.
 *
 * This module contains the text-level translation functionality sitting
 * between the rewrite engine and the backend providers. It is split into
 * several submodules:
 *
 * - `core`: Core translation service definition
 * - `cache`: Run-scoped memoization of translations
 * - `normalize`: Capitalization normalization of translated text
 */

// Re-export main types for easier usage
pub use self::cache::TranslationCache;
pub use self::core::TranslationService;
pub use self::normalize::capitalize_first_letter;

// Submodules
pub mod cache;
pub mod core;
pub mod normalize;
