/*!
 * Tests for the inclusion predicate
 */

use transrc::InclusionFilter;

#[test]
fn test_defaultFilter_withNonAsciiText_shouldTranslate() {
    let filter = InclusionFilter::default();
    assert!(filter.should_translate("// café"));
    assert!(filter.should_translate("日本語のコメント"));
}

#[test]
fn test_defaultFilter_withAsciiOnlyText_shouldSkip() {
    let filter = InclusionFilter::default();
    assert!(!filter.should_translate("// plain ascii comment"));
}

#[test]
fn test_filter_withEmptyText_shouldSkip() {
    let filter = InclusionFilter::default();
    assert!(!filter.should_translate(""));
}

#[test]
fn test_filter_withWhitespaceOnlyText_shouldSkip() {
    let filter = InclusionFilter::default();
    assert!(!filter.should_translate("   \t  "));
}

#[test]
fn test_filter_withCustomPattern_shouldMatchIt() {
    let filter = InclusionFilter::new("TODO").unwrap();
    assert!(filter.should_translate("// TODO: fix this"));
    assert!(!filter.should_translate("// done already"));
}

#[test]
fn test_filter_withWhitespaceOnly_shouldSkipEvenWhenPatternMatches() {
    // The emptiness check runs before the pattern
    let filter = InclusionFilter::new("\\s").unwrap();
    assert!(!filter.should_translate("   "));
}

#[test]
fn test_filter_withInvalidPattern_shouldError() {
    assert!(InclusionFilter::new("[unclosed").is_err());
}
