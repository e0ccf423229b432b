/*!
 * Inclusion filter: decides which text is actually sent for translation.
 *
 * The predicate is a configurable regex. The default pattern targets any
 * character outside the printable-ASCII range, so only text written in a
 * non-default language is submitted. Empty and whitespace-only text never
 * qualifies.
 */

use anyhow::{Context, Result};
use regex::Regex;

/// Default inclusion pattern: at least one non-ASCII character
pub const DEFAULT_PATTERN: &str = "[^\\x00-\\x7F]";

/// Predicate over raw region or line text
#[derive(Debug, Clone)]
pub struct InclusionFilter {
    pattern: Regex,
}

impl InclusionFilter {
    /// Compile a filter from a pattern; an invalid pattern is a configuration
    /// error and must be surfaced before any file is processed
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .with_context(|| format!("Invalid inclusion pattern: {}", pattern))?;
        Ok(Self { pattern })
    }

    /// True when the text needs translation
    pub fn should_translate(&self, text: &str) -> bool {
        !text.trim().is_empty() && self.pattern.is_match(text)
    }
}

impl Default for InclusionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN).expect("default pattern must compile")
    }
}
