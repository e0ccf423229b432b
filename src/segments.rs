/*!
 * Segment decomposition: splitting a region into translatable lines.
 *
 * Every region decomposes into a wrapper (outer decoration such as comment
 * markers or quote delimiters) and an ordered sequence of lines, each carrying
 * its own prefix decoration, translatable content, and trailing suffix.
 * Decomposition is a pure partition of the raw text: recomposing the pieces
 * with untouched content reproduces the original region byte for byte.
 */

use crate::scanner::RegionKind;

/// One decomposed line of a region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentLine {
    /// Indentation and decoration (`"// "`, `" * "`, leading whitespace)
    pub prefix: String,
    /// The translatable text
    pub content: String,
    /// Trailing whitespace and line terminator
    pub suffix: String,
}

impl SegmentLine {
    fn new(prefix: &str, content: &str, suffix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            content: content.to_string(),
            suffix: suffix.to_string(),
        }
    }

    /// The same line with replaced content
    pub fn with_content(&self, content: String) -> Self {
        Self {
            prefix: self.prefix.clone(),
            content,
            suffix: self.suffix.clone(),
        }
    }
}

/// Outer decoration around all lines of a region
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wrapper {
    pub prefix: String,
    pub suffix: String,
}

impl Wrapper {
    fn new(prefix: &str, suffix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
    }
}

/// Decompose a region's raw text into wrapper and lines.
///
/// `recompose(&decompose(raw, kind)) == raw` holds for every region produced
/// by the scanner.
pub fn decompose(raw: &str, kind: RegionKind) -> (Wrapper, Vec<SegmentLine>) {
    match kind {
        RegionKind::LineComment => decompose_line_comment(raw),
        RegionKind::DocComment => {
            if raw.starts_with("/*") {
                decompose_block(raw)
            } else {
                decompose_doc_lines(raw)
            }
        }
        RegionKind::BlockComment => decompose_block(raw),
        RegionKind::StringLiteral => decompose_string_literal(raw),
    }
}

/// Reassemble a region from its wrapper and lines
pub fn recompose(wrapper: &Wrapper, lines: &[SegmentLine]) -> String {
    let mut out = String::with_capacity(
        wrapper.prefix.len()
            + wrapper.suffix.len()
            + lines
                .iter()
                .map(|l| l.prefix.len() + l.content.len() + l.suffix.len())
                .sum::<usize>(),
    );
    out.push_str(&wrapper.prefix);
    for line in lines {
        out.push_str(&line.prefix);
        out.push_str(&line.content);
        out.push_str(&line.suffix);
    }
    out.push_str(&wrapper.suffix);
    out
}

/// `// ...` — a single line; the marker is the run of slashes
fn decompose_line_comment(raw: &str) -> (Wrapper, Vec<SegmentLine>) {
    let marker_end = raw.len() - raw.trim_start_matches('/').len();
    let after_marker = &raw[marker_end..];
    let ws_end = marker_end + leading_whitespace_len(after_marker);
    let (content, trailing) = split_trailing_whitespace(&raw[ws_end..]);
    let line = SegmentLine::new(&raw[..ws_end], content, trailing);
    (Wrapper::default(), vec![line])
}

/// A run of `///` lines — one segment line per physical line
fn decompose_doc_lines(raw: &str) -> (Wrapper, Vec<SegmentLine>) {
    let mut lines = Vec::new();
    for physical in split_physical_lines(raw) {
        let (body, terminator) = split_terminator(physical);
        let lead = leading_whitespace_len(body);
        let after_lead = &body[lead..];
        let marker = after_lead.len() - after_lead.trim_start_matches('/').len();
        let after_marker = &body[lead + marker..];
        let ws = leading_whitespace_len(after_marker);
        let prefix_end = lead + marker + ws;
        let (content, trailing) = split_trailing_whitespace(&body[prefix_end..]);
        let suffix = format!("{}{}", trailing, terminator);
        lines.push(SegmentLine::new(&body[..prefix_end], content, &suffix));
    }
    (Wrapper::default(), lines)
}

/// `/* ... */` — wrapper holds the delimiters, one segment line per interior
/// physical line, aligned `*` decoration captured in the line prefix
fn decompose_block(raw: &str) -> (Wrapper, Vec<SegmentLine>) {
    // `/**` opens a doc block, but `/**/` is just an empty plain block
    let open_len = if raw.len() > 4 && raw.as_bytes()[2] == b'*' { 3 } else { 2 };
    let interior = &raw[open_len..raw.len() - 2];
    let wrapper = Wrapper::new(&raw[..open_len], "*/");

    let mut lines = Vec::new();
    for physical in split_physical_lines(interior) {
        let (body, terminator) = split_terminator(physical);
        let lead = leading_whitespace_len(body);
        let mut prefix_end = lead;
        if body[prefix_end..].starts_with('*') {
            prefix_end += 1;
            prefix_end += leading_whitespace_len(&body[prefix_end..]);
        }
        let (content, trailing) = split_trailing_whitespace(&body[prefix_end..]);
        let suffix = format!("{}{}", trailing, terminator);
        lines.push(SegmentLine::new(&body[..prefix_end], content, &suffix));
    }
    (wrapper, lines)
}

/// String literal — wrapper holds prefixes and quote runs, one segment line
/// per physical line of the literal's content
fn decompose_string_literal(raw: &str) -> (Wrapper, Vec<SegmentLine>) {
    let prefix_len = raw.len() - raw.trim_start_matches(['$', '@']).len();
    let verbatim = raw[..prefix_len].contains('@');
    let after_prefix = &raw[prefix_len..];
    let quote_run = after_prefix.len() - after_prefix.trim_start_matches('"').len();

    // Three or more quotes open a raw literal closed by an equal run;
    // otherwise a single quote delimits each end
    let delim = if quote_run >= 3 && !verbatim { quote_run } else { 1 };
    let open_end = prefix_len + delim;
    let interior = &raw[open_end..raw.len() - delim];
    let wrapper = Wrapper::new(&raw[..open_end], &raw[raw.len() - delim..]);

    let mut lines = Vec::new();
    for physical in split_physical_lines(interior) {
        let (body, terminator) = split_terminator(physical);
        let lead = leading_whitespace_len(body);
        let (content, trailing) = split_trailing_whitespace(&body[lead..]);
        let suffix = format!("{}{}", trailing, terminator);
        lines.push(SegmentLine::new(&body[..lead], content, &suffix));
    }
    (wrapper, lines)
}

/// Split into physical lines, each keeping its `\n`; an empty input yields no
/// lines at all
fn split_physical_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive('\n')
}

/// Split a physical line into body and line terminator
fn split_terminator(line: &str) -> (&str, &str) {
    match line.strip_suffix('\n') {
        Some(body) => (body, "\n"),
        None => (line, ""),
    }
}

fn leading_whitespace_len(text: &str) -> usize {
    text.len() - text.trim_start_matches([' ', '\t', '\r']).len()
}

/// Split off trailing whitespace (spaces, tabs, carriage returns)
fn split_trailing_whitespace(text: &str) -> (&str, &str) {
    let content = text.trim_end_matches([' ', '\t', '\r']);
    (content, &text[content.len()..])
}
