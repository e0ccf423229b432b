/*!
 * Tests for segment decomposition and the round-trip invariant
 */

use transrc::scanner::RegionKind;
use transrc::segments::{decompose, recompose};

/// recompose(decompose(x)) == x must hold for every valid region text
fn assert_round_trip(raw: &str, kind: RegionKind) {
    let (wrapper, lines) = decompose(raw, kind);
    assert_eq!(recompose(&wrapper, &lines), raw, "round trip failed for {:?}", kind);
}

#[test]
fn test_roundTrip_lineComments_shouldReproduceInput() {
    for raw in ["//", "// x", "//x", "//   spaced out   ", "//// divider", "//\t tabbed"] {
        assert_round_trip(raw, RegionKind::LineComment);
    }
}

#[test]
fn test_roundTrip_docComments_shouldReproduceInput() {
    for raw in [
        "/// summary\n",
        "/// summary",
        "///\n",
        "/// first\n    /// second\n",
        "///  padded  \n\t/// tabbed\n",
    ] {
        assert_round_trip(raw, RegionKind::DocComment);
    }
}

#[test]
fn test_roundTrip_blockComments_shouldReproduceInput() {
    for raw in [
        "/**/",
        "/* one line */",
        "/* héllo\n * wörld */",
        "/*\n * aligned\n * stars\n */",
        "/*no spaces*/",
        "/* trailing ws   \n   */",
    ] {
        assert_round_trip(raw, RegionKind::BlockComment);
    }
}

#[test]
fn test_roundTrip_docBlockComments_shouldReproduceInput() {
    for raw in ["/** summary */", "/**\n * body\n */", "/***/"] {
        assert_round_trip(raw, RegionKind::DocComment);
    }
}

#[test]
fn test_roundTrip_stringLiterals_shouldReproduceInput() {
    for raw in [
        "\"\"",
        "\"text\"",
        "\"  padded  \"",
        "$\"héllo {name}\"",
        "@\"multi\nline\"",
        "@\"doubled \"\" quote\"",
        "$@\"both\"",
        "\"\"\"raw text\"\"\"",
        "\"\"\"line one\nline two\"\"\"",
    ] {
        assert_round_trip(raw, RegionKind::StringLiteral);
    }
}

#[test]
fn test_decompose_lineComment_shouldSplitDecorationAndContent() {
    let (wrapper, lines) = decompose("//  héllo there  ", RegionKind::LineComment);
    assert_eq!(wrapper.prefix, "");
    assert_eq!(wrapper.suffix, "");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].prefix, "//  ");
    assert_eq!(lines[0].content, "héllo there");
    assert_eq!(lines[0].suffix, "  ");
}

#[test]
fn test_decompose_docComment_shouldYieldOneLinePerPhysicalLine() {
    let (wrapper, lines) = decompose("/// first\n  /// second\n", RegionKind::DocComment);
    assert_eq!(wrapper.prefix, "");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].prefix, "/// ");
    assert_eq!(lines[0].content, "first");
    assert_eq!(lines[0].suffix, "\n");
    assert_eq!(lines[1].prefix, "  /// ");
    assert_eq!(lines[1].content, "second");
    assert_eq!(lines[1].suffix, "\n");
}

#[test]
fn test_decompose_blockComment_shouldCaptureAlignedStars() {
    let (wrapper, lines) = decompose("/* héllo\n * wörld */", RegionKind::BlockComment);
    assert_eq!(wrapper.prefix, "/*");
    assert_eq!(wrapper.suffix, "*/");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].prefix, " ");
    assert_eq!(lines[0].content, "héllo");
    assert_eq!(lines[0].suffix, "\n");
    assert_eq!(lines[1].prefix, " * ");
    assert_eq!(lines[1].content, "wörld");
    assert_eq!(lines[1].suffix, " ");
}

#[test]
fn test_decompose_docBlock_shouldTakeThreeCharOpener() {
    let (wrapper, lines) = decompose("/** summary */", RegionKind::DocComment);
    assert_eq!(wrapper.prefix, "/**");
    assert_eq!(wrapper.suffix, "*/");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].content, "summary");
}

#[test]
fn test_decompose_interpolatedString_shouldKeepPrefixInWrapper() {
    let (wrapper, lines) = decompose("$\"héllo {name}\"", RegionKind::StringLiteral);
    assert_eq!(wrapper.prefix, "$\"");
    assert_eq!(wrapper.suffix, "\"");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].content, "héllo {name}");
}

#[test]
fn test_decompose_rawString_shouldUseQuoteRunDelimiters() {
    let (wrapper, lines) = decompose("\"\"\"raw\"\"\"", RegionKind::StringLiteral);
    assert_eq!(wrapper.prefix, "\"\"\"");
    assert_eq!(wrapper.suffix, "\"\"\"");
    assert_eq!(lines[0].content, "raw");
}

#[test]
fn test_decompose_emptyString_shouldHaveNoLines() {
    let (wrapper, lines) = decompose("\"\"", RegionKind::StringLiteral);
    assert_eq!(wrapper.prefix, "\"");
    assert_eq!(wrapper.suffix, "\"");
    assert!(lines.is_empty());
}

#[test]
fn test_recompose_withReplacedContent_shouldKeepDecoration() {
    let (wrapper, lines) = decompose("/* héllo\n * wörld */", RegionKind::BlockComment);
    let replaced: Vec<_> = lines
        .iter()
        .map(|line| match line.content.as_str() {
            "héllo" => line.with_content("Hello".to_string()),
            "wörld" => line.with_content("World".to_string()),
            _ => line.clone(),
        })
        .collect();
    assert_eq!(recompose(&wrapper, &replaced), "/* Hello\n * World */");
}
