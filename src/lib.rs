/*!
 * # transrc - Source Annotation Translator
 *
 * A Rust library for localizing the human-readable text embedded in source
 * code: line comments, block comments, doc comments, and string literals.
 *
 * ## Features
 *
 * - Scan a source tree with include/exclude glob patterns
 * - Classify comment and string-literal regions, honoring active
 *   conditional-compilation symbols
 * - Translate annotation text using pluggable backends:
 *   - Google Translate (Cloud Translation v2 or the keyless demo endpoint)
 *   - DeepL
 * - Splice translations back byte-exactly, preserving all decoration,
 *   indentation, and delimiters
 * - Run-scoped caching so identical text is translated once per run
 * - Optional capitalization repair of translated text
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `scanner`: Region classification over raw source text
 * - `segments`: Region decomposition into decorated, translatable lines
 * - `inclusion`: The predicate selecting text that needs translation
 * - `engine`: The scan, translate, splice rewrite loop
 * - `translation`: Caching and normalizing translation services:
 *   - `translation::core`: Core translation service
 *   - `translation::cache`: Run-scoped memoization
 *   - `translation::normalize`: Capitalization normalization
 * - `providers`: Client implementations for translation backends:
 *   - `providers::google`: Google Translate client
 *   - `providers::deepl`: DeepL client
 *   - `providers::mock`: Mock backend for tests
 * - `file_utils`: Glob matching and source-tree enumeration
 * - `app_controller`: Main application controller
 * - `stats`: Run-scoped statistics counters
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod engine;
pub mod errors;
pub mod file_utils;
pub mod inclusion;
pub mod language_utils;
pub mod providers;
pub mod scanner;
pub mod segments;
pub mod stats;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use engine::{ProgressSink, RewriteEngine};
pub use errors::{AppError, ProviderError, ScanError};
pub use inclusion::InclusionFilter;
pub use scanner::{scan_source, Region, RegionKind, ScanOptions, Span};
pub use segments::{decompose, recompose, SegmentLine, Wrapper};
pub use stats::{RunStatistics, StatisticsSnapshot};
pub use translation::TranslationService;
