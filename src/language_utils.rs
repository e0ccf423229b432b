/*!
 * Language code utilities built on ISO 639 tables.
 *
 * Target and source languages are configured as ISO 639-1 codes, optionally
 * with a region subtag (`en`, `en-US`, `pt-BR`). Validation strips the region
 * and resolves the primary subtag against the isolang tables.
 */

use anyhow::{anyhow, Result};
use isolang::Language;

/// The primary language subtag of a code like `en-US`
fn primary_subtag(code: &str) -> &str {
    code.split(['-', '_']).next().unwrap_or(code)
}

/// Resolve a language code to an isolang entry
fn lookup(code: &str) -> Result<Language> {
    let tag = primary_subtag(code).to_lowercase();

    match tag.len() {
        2 => Language::from_639_1(&tag)
            .ok_or_else(|| anyhow!("Unknown ISO 639-1 language code: {}", code)),
        3 => Language::from_639_3(&tag)
            .ok_or_else(|| anyhow!("Unknown ISO 639-3 language code: {}", code)),
        _ => Err(anyhow!("Invalid language code format: {}", code)),
    }
}

/// English display name for a language code
pub fn get_language_name(code: &str) -> Result<String> {
    Ok(lookup(code)?.to_name().to_string())
}

/// Normalize a language code to its two-letter ISO 639-1 form where one
/// exists, preserving nothing but the primary subtag
pub fn normalize_to_part1(code: &str) -> Result<String> {
    let language = lookup(code)?;
    language
        .to_639_1()
        .map(|part1| part1.to_string())
        .ok_or_else(|| anyhow!("Language {} has no ISO 639-1 code", language.to_name()))
}

/// Whether two language codes refer to the same language
pub fn language_codes_match(a: &str, b: &str) -> bool {
    match (lookup(a), lookup(b)) {
        (Ok(lang_a), Ok(lang_b)) => lang_a == lang_b,
        _ => a.eq_ignore_ascii_case(b),
    }
}
