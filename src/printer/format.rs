//! # Text Formatter
//!
//! Greedy word wrapping to the printer's column width.
//!
//! - Words are never broken at hyphens or anywhere else, unless a single
//!   word is wider than the whole line; only then is it cut into
//!   width-sized pieces.
//! - Tabs expand to 8-column stops, other whitespace becomes a plain space.
//! - Runs of spaces inside a line are kept; whitespace at a wrap point is
//!   dropped.
//!
//! Widths are counted in `char`s, which matches one printer column per
//! character for the single-byte code page the printer runs in.

const TAB_WIDTH: usize = 8;

/// Wrap one paragraph (no newlines) into lines of at most `width` chars.
///
/// ```
/// use thermal_typer::printer::format::wrap;
///
/// let lines = wrap("the quick brown fox jumps", 10);
/// assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
///
/// // hyphens are not break points
/// assert_eq!(wrap("well-known fact", 11), vec!["well-known", "fact"]);
/// ```
pub fn wrap(paragraph: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let normalized = normalize_whitespace(paragraph);

    let mut lines = Vec::new();
    let mut line = LineBuf::default();

    for chunk in chunks(&normalized) {
        let chunk_len = chunk.chars().count();

        if chunk.starts_with(' ') {
            // Leading whitespace only survives on the first line
            if line.is_empty() && !lines.is_empty() {
                continue;
            }
            if line.len + chunk_len <= width {
                line.push(chunk, chunk_len);
            } else {
                line.finish_into(&mut lines);
            }
            continue;
        }

        if line.len + chunk_len > width {
            line.finish_into(&mut lines);
        }

        if chunk_len > width {
            let chars: Vec<char> = chunk.chars().collect();
            let mut pieces = chars.chunks(width).peekable();
            while let Some(piece) = pieces.next() {
                let piece: String = piece.iter().collect();
                if pieces.peek().is_some() {
                    lines.push(piece);
                } else {
                    let len = piece.chars().count();
                    line.push(&piece, len);
                }
            }
        } else {
            line.push(chunk, chunk_len);
        }
    }

    line.finish_into(&mut lines);
    lines
}

/// Turn a print request into the exact text the printer should receive.
///
/// - `raw`: sent verbatim, with a trailing newline added if missing
/// - blank input: a single newline
/// - otherwise each source line is wrapped on its own, blank source lines
///   are kept as blank paper lines, and every output line ends in `\n`
pub fn format_text(text: &str, width: usize, raw: bool) -> String {
    if raw {
        let mut out = text.to_string();
        if !out.ends_with('\n') {
            out.push('\n');
        }
        return out;
    }

    if text.trim().is_empty() {
        return "\n".to_string();
    }

    let mut out = String::with_capacity(text.len() + 8);
    for segment in text.lines() {
        if segment.trim().is_empty() {
            out.push('\n');
            continue;
        }
        for line in wrap(segment, width) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

#[derive(Default)]
struct LineBuf {
    text: String,
    len: usize,
}

impl LineBuf {
    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn push(&mut self, s: &str, len: usize) {
        self.text.push_str(s);
        self.len += len;
    }

    fn finish_into(&mut self, lines: &mut Vec<String>) {
        let trimmed = self.text.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
        self.text.clear();
        self.len = 0;
    }
}

fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for ch in text.chars() {
        if ch == '\t' {
            let pad = TAB_WIDTH - column % TAB_WIDTH;
            out.extend(std::iter::repeat_n(' ', pad));
            column += pad;
        } else {
            out.push(if ch.is_whitespace() { ' ' } else { ch });
            column += 1;
        }
    }
    out
}

/// Split into alternating runs of spaces and non-spaces.
fn chunks(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_space = None;

    for (i, ch) in text.char_indices() {
        let is_space = ch == ' ';
        match in_space {
            Some(prev) if prev != is_space => {
                out.push(&text[start..i]);
                start = i;
            }
            _ => {}
        }
        in_space = Some(is_space);
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
