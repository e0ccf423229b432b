/*!
 * Source scanner: classifies comment and string-literal regions.
 *
 * A single forward pass over the raw bytes of a source file yields every
 * annotation region the rewrite engine can act on: line comments, block
 * comments, doc comments, and string literals. The scanner understands just
 * enough structure to never misclassify — escape sequences, verbatim and raw
 * string forms, char literals, and `#if`/`#elif`/`#else`/`#endif` branches
 * gated by the configured conditional-compilation symbols. Regions inside an
 * inactive branch are not live and are never emitted.
 *
 * Comment and doc-comment regions are returned first in document order,
 * followed by string-literal regions in document order, so the engine always
 * resolves comments before strings.
 */

use std::ops::Range;

use crate::errors::ScanError;

/// Classification of an annotation region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// `// ...` to end of line
    LineComment,
    /// `/* ... */`
    BlockComment,
    /// A run of `///` lines, or a `/** ... */` block
    DocComment,
    /// `"..."`, `$"..."`, `@"..."`, or `"""..."""` (with optional prefixes)
    StringLiteral,
}

/// Byte span into the buffer the region was scanned from.
/// Valid only until that buffer is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

/// One annotation occurrence: kind, exact span, and the raw text snapshot
#[derive(Debug, Clone)]
pub struct Region {
    pub kind: RegionKind,
    pub span: Span,
    pub raw_text: String,
}

/// Options controlling which regions a scan emits
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Active conditional-compilation symbols
    pub symbols: Vec<String>,
    /// Emit line and block comments
    pub comments: bool,
    /// Emit doc comments
    pub doc_comments: bool,
    /// Emit string literals
    pub strings: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            symbols: Vec::new(),
            comments: true,
            doc_comments: true,
            strings: true,
        }
    }
}

/// One open `#if` on the conditional stack
struct CondFrame {
    /// Whether the surrounding context is active
    parent_effective: bool,
    /// Whether any branch of this `#if` chain has already matched
    taken: bool,
    /// Whether the current branch is active
    effective: bool,
    /// Line the `#if` appeared on, for unbalanced-conditional reporting
    line: usize,
}

/// Scan source text for annotation regions.
///
/// Returns comment/doc regions in document order followed by string regions in
/// document order. Fails with a `ScanError` when the file cannot be classified
/// as a whole (unterminated comment or literal, malformed conditionals).
pub fn scan_source(text: &str, options: &ScanOptions) -> Result<Vec<Region>, ScanError> {
    let bytes = text.as_bytes();
    let len = bytes.len();

    let mut comment_regions: Vec<Region> = Vec::new();
    let mut string_regions: Vec<Region> = Vec::new();
    let mut stack: Vec<CondFrame> = Vec::new();

    let mut i = 0;
    let mut line = 1usize;
    let mut line_has_code = false;

    while i < len {
        let b = bytes[i];

        if b == b'\n' {
            line += 1;
            line_has_code = false;
            i += 1;
            continue;
        }

        // Conditional-compilation directives are recognized even inside an
        // inactive branch so that nesting stays balanced.
        if b == b'#' && !line_has_code {
            let eol = line_end(bytes, i);
            handle_directive(&text[i..eol], line, &options.symbols, &mut stack)?;
            line_has_code = true;
            i = eol;
            continue;
        }

        let active = stack.last().map_or(true, |frame| frame.effective);
        if !active {
            if !b.is_ascii_whitespace() {
                line_has_code = true;
            }
            i += 1;
            continue;
        }

        // Line or doc comment
        if b == b'/' && i + 1 < len && bytes[i + 1] == b'/' {
            let is_doc = i + 2 < len
                && bytes[i + 2] == b'/'
                && (i + 3 >= len || bytes[i + 3] != b'/');
            if is_doc {
                let (end, lines_consumed) = consume_doc_comment_run(bytes, i);
                if options.doc_comments {
                    push_region(&mut comment_regions, RegionKind::DocComment, text, i, end);
                }
                line += lines_consumed;
                line_has_code = false;
                i = end;
            } else {
                let end = line_end(bytes, i);
                if options.comments {
                    push_region(&mut comment_regions, RegionKind::LineComment, text, i, end);
                }
                i = end;
            }
            continue;
        }

        // Block comment (or block-style doc comment)
        if b == b'/' && i + 1 < len && bytes[i + 1] == b'*' {
            let start = i;
            let is_doc = i + 2 < len && bytes[i + 2] == b'*' && (i + 3 >= len || bytes[i + 3] != b'/');
            let mut j = i + 2;
            loop {
                if j + 1 >= len {
                    return Err(ScanError::UnterminatedBlockComment(start));
                }
                if bytes[j] == b'*' && bytes[j + 1] == b'/' {
                    break;
                }
                if bytes[j] == b'\n' {
                    line += 1;
                }
                j += 1;
            }
            let end = j + 2;
            let kind = if is_doc { RegionKind::DocComment } else { RegionKind::BlockComment };
            let wanted = if is_doc { options.doc_comments } else { options.comments };
            if wanted {
                push_region(&mut comment_regions, kind, text, start, end);
            }
            line_has_code = true;
            i = end;
            continue;
        }

        // String literal, with optional $/@ prefix run
        if b == b'"' || ((b == b'$' || b == b'@') && starts_string_prefix(bytes, i)) {
            let start = i;
            let mut j = i;
            let mut verbatim = false;
            while j < len && (bytes[j] == b'$' || bytes[j] == b'@') {
                verbatim |= bytes[j] == b'@';
                j += 1;
            }
            let quote_run = count_quotes(bytes, j);
            let end = if quote_run >= 3 && !verbatim {
                scan_raw_string(bytes, j, quote_run, start)?
            } else {
                scan_quoted_string(bytes, j, verbatim, start)?
            };
            line += text[start..end].matches('\n').count();
            if options.strings {
                push_region(&mut string_regions, RegionKind::StringLiteral, text, start, end);
            }
            line_has_code = true;
            i = end;
            continue;
        }

        // Char literal: skipped so apostrophes cannot open a bogus string scan
        if b == b'\'' {
            i = skip_char_literal(bytes, i);
            line_has_code = true;
            continue;
        }

        if !b.is_ascii_whitespace() {
            line_has_code = true;
        }
        i += 1;
    }

    if let Some(frame) = stack.last() {
        return Err(ScanError::UnbalancedConditional(frame.line));
    }

    comment_regions.append(&mut string_regions);
    Ok(comment_regions)
}

fn push_region(out: &mut Vec<Region>, kind: RegionKind, text: &str, start: usize, end: usize) {
    out.push(Region {
        kind,
        span: Span { start, len: end - start },
        raw_text: text[start..end].to_string(),
    });
}

/// Byte offset of the next `\n` (exclusive), or end of input
fn line_end(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    while i < bytes.len() && bytes[i] != b'\n' {
        i += 1;
    }
    i
}

/// Consume a run of consecutive `///` lines starting at the first `/`.
///
/// Interior lines keep their leading whitespace and every line keeps its
/// trailing newline, so the region round-trips verbatim. Returns the end
/// offset and the number of newlines consumed.
fn consume_doc_comment_run(bytes: &[u8], start: usize) -> (usize, usize) {
    let len = bytes.len();
    let mut end = line_end(bytes, start);
    let mut newlines = 0;

    loop {
        if end >= len {
            break;
        }
        // Include this line's terminator in the region
        let after_newline = end + 1;
        newlines += 1;

        // Peek the next line: whitespace, then `///` but not `////`
        let mut k = after_newline;
        while k < len && (bytes[k] == b' ' || bytes[k] == b'\t') {
            k += 1;
        }
        let continues = k + 2 < len
            && bytes[k] == b'/'
            && bytes[k + 1] == b'/'
            && bytes[k + 2] == b'/'
            && (k + 3 >= len || bytes[k + 3] != b'/');
        if continues {
            end = line_end(bytes, k);
        } else {
            end = after_newline;
            break;
        }
    }

    (end.min(len), newlines)
}

/// True when a `$`/`@` run at `i` is immediately followed by a quote
fn starts_string_prefix(bytes: &[u8], i: usize) -> bool {
    let mut j = i;
    while j < bytes.len() && (bytes[j] == b'$' || bytes[j] == b'@') {
        j += 1;
    }
    j > i && j < bytes.len() && bytes[j] == b'"'
}

fn count_quotes(bytes: &[u8], i: usize) -> usize {
    let mut j = i;
    while j < bytes.len() && bytes[j] == b'"' {
        j += 1;
    }
    j - i
}

/// Scan a raw string opened by a run of `quote_run` quotes; closes on the
/// first equal-length run.
fn scan_raw_string(bytes: &[u8], quotes_at: usize, quote_run: usize, start: usize) -> Result<usize, ScanError> {
    let len = bytes.len();
    let mut i = quotes_at + quote_run;
    while i < len {
        if bytes[i] == b'"' {
            let run = count_quotes(bytes, i);
            if run >= quote_run {
                return Ok(i + quote_run);
            }
            i += run;
        } else {
            i += 1;
        }
    }
    Err(ScanError::UnterminatedRawString(start))
}

/// Scan a single-quote-delimited string. Verbatim strings escape quotes by
/// doubling and may span lines; plain strings use backslash escapes and must
/// close before the line ends.
fn scan_quoted_string(bytes: &[u8], quote_at: usize, verbatim: bool, start: usize) -> Result<usize, ScanError> {
    let len = bytes.len();
    let mut i = quote_at + 1;
    while i < len {
        let b = bytes[i];
        if b == b'"' {
            if verbatim && i + 1 < len && bytes[i + 1] == b'"' {
                i += 2;
                continue;
            }
            return Ok(i + 1);
        }
        if !verbatim {
            if b == b'\\' && i + 1 < len {
                i += 2;
                continue;
            }
            if b == b'\n' {
                return Err(ScanError::UnterminatedString(start));
            }
        }
        i += 1;
    }
    Err(ScanError::UnterminatedString(start))
}

/// Skip a char literal. Recovers at end of line when no closing quote shows
/// up, so a stray apostrophe cannot desynchronize the rest of the scan.
fn skip_char_literal(bytes: &[u8], start: usize) -> usize {
    let len = bytes.len();
    let mut i = start + 1;
    while i < len {
        match bytes[i] {
            b'\'' => return i + 1,
            b'\n' => return i,
            b'\\' if i + 1 < len => i += 2,
            _ => i += 1,
        }
    }
    len
}

/// Apply one preprocessor directive line to the conditional stack
fn handle_directive(
    directive: &str,
    line: usize,
    symbols: &[String],
    stack: &mut Vec<CondFrame>,
) -> Result<(), ScanError> {
    // Strip an optional trailing comment: `#if DEBUG // why`
    let body = match directive.find("//") {
        Some(pos) => &directive[..pos],
        None => directive,
    };
    let body = body.trim();
    debug_assert!(body.starts_with('#'));
    let rest = body[1..].trim_start();

    let (keyword, expr) = match rest.find(|c: char| c.is_whitespace() || c == '(' || c == '!') {
        Some(pos) if rest[..pos].chars().all(|c| c.is_ascii_alphabetic()) => {
            (&rest[..pos], rest[pos..].trim())
        }
        _ => (rest, ""),
    };

    match keyword {
        "if" => {
            let parent = stack.last().map_or(true, |frame| frame.effective);
            let cond = eval_condition(expr, symbols).ok_or_else(|| ScanError::MalformedDirective {
                line,
                directive: directive.trim().to_string(),
            })?;
            stack.push(CondFrame {
                parent_effective: parent,
                taken: cond,
                effective: parent && cond,
                line,
            });
        }
        "elif" => {
            let cond = eval_condition(expr, symbols).ok_or_else(|| ScanError::MalformedDirective {
                line,
                directive: directive.trim().to_string(),
            })?;
            let frame = stack.last_mut().ok_or(ScanError::UnbalancedConditional(line))?;
            frame.effective = frame.parent_effective && !frame.taken && cond;
            frame.taken |= cond;
        }
        "else" => {
            let frame = stack.last_mut().ok_or(ScanError::UnbalancedConditional(line))?;
            frame.effective = frame.parent_effective && !frame.taken;
            frame.taken = true;
        }
        "endif" => {
            if stack.pop().is_none() {
                return Err(ScanError::UnbalancedConditional(line));
            }
        }
        // #define, #region, #pragma, #nullable, ... carry no branch structure
        _ => {}
    }

    Ok(())
}

/// Evaluate a directive condition over the active symbols.
///
/// Grammar: or-expressions of and-expressions of `!`-prefixed primaries,
/// where a primary is an identifier, `true`, `false`, or a parenthesized
/// expression. Returns `None` on any syntax error.
fn eval_condition(expr: &str, symbols: &[String]) -> Option<bool> {
    let tokens = tokenize_condition(expr)?;
    let mut parser = CondParser { tokens: &tokens, pos: 0, symbols };
    let value = parser.or_expr()?;
    if parser.pos == parser.tokens.len() {
        Some(value)
    } else {
        None
    }
}

#[derive(Debug, PartialEq)]
enum CondToken {
    Ident(String),
    Not,
    And,
    Or,
    Open,
    Close,
}

fn tokenize_condition(expr: &str) -> Option<Vec<CondToken>> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = expr.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => i += 1,
            '!' => {
                tokens.push(CondToken::Not);
                i += 1;
            }
            '(' => {
                tokens.push(CondToken::Open);
                i += 1;
            }
            ')' => {
                tokens.push(CondToken::Close);
                i += 1;
            }
            '&' => {
                if chars.get(i + 1) != Some(&'&') {
                    return None;
                }
                tokens.push(CondToken::And);
                i += 2;
            }
            '|' => {
                if chars.get(i + 1) != Some(&'|') {
                    return None;
                }
                tokens.push(CondToken::Or);
                i += 2;
            }
            c if c.is_alphanumeric() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push(CondToken::Ident(chars[start..i].iter().collect()));
            }
            _ => return None,
        }
    }
    Some(tokens)
}

struct CondParser<'a> {
    tokens: &'a [CondToken],
    pos: usize,
    symbols: &'a [String],
}

impl CondParser<'_> {
    fn or_expr(&mut self) -> Option<bool> {
        let mut value = self.and_expr()?;
        while self.tokens.get(self.pos) == Some(&CondToken::Or) {
            self.pos += 1;
            value |= self.and_expr()?;
        }
        Some(value)
    }

    fn and_expr(&mut self) -> Option<bool> {
        let mut value = self.unary()?;
        while self.tokens.get(self.pos) == Some(&CondToken::And) {
            self.pos += 1;
            value &= self.unary()?;
        }
        Some(value)
    }

    fn unary(&mut self) -> Option<bool> {
        if self.tokens.get(self.pos) == Some(&CondToken::Not) {
            self.pos += 1;
            return Some(!self.unary()?);
        }
        self.primary()
    }

    fn primary(&mut self) -> Option<bool> {
        match self.tokens.get(self.pos)? {
            CondToken::Open => {
                self.pos += 1;
                let value = self.or_expr()?;
                if self.tokens.get(self.pos) != Some(&CondToken::Close) {
                    return None;
                }
                self.pos += 1;
                Some(value)
            }
            CondToken::Ident(name) => {
                self.pos += 1;
                match name.as_str() {
                    "true" => Some(true),
                    "false" => Some(false),
                    _ => Some(self.symbols.iter().any(|s| s == name)),
                }
            }
            _ => None,
        }
    }
}
