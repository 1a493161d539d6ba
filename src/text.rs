//! Text measurement and fitting in whole character cells.
//!
//! Block content is sanitized before it is measured: tabs expand to spaces and
//! other control characters are dropped, so the measured width is the width the
//! text occupies on the grid. Widths are display widths (East Asian wide
//! characters count as two cells) and ignore ANSI styling.
//!
//! # Quick Start
//!
//! ```rust
//! use monogrid::text::{fit, new_sanitizer, replace_tabs, wrap};
//!
//! let sanitizer = new_sanitizer(vec![replace_tabs("  ")]);
//! assert_eq!(sanitizer.sanitize_str("a\tb\x07"), "a  b");
//!
//! assert_eq!(fit("grid", 6), "grid  ");
//! assert_eq!(fit("monospace", 4), "mono");
//! assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
//! ```

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Cleans text before it is placed on the grid.
///
/// - **Newlines** (`\n`, `\r`): replaced with `"\n"` by default
/// - **Tabs**: replaced with four spaces by default
/// - **Other control characters**: removed
#[derive(Debug, Clone)]
pub struct Sanitizer {
    replace_newline: String,
    replace_tab: String,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self {
            replace_newline: "\n".to_string(),
            replace_tab: "    ".to_string(),
        }
    }
}

/// A configuration step applied by [`new_sanitizer`].
pub type SanitizerOpt = Box<dyn FnOnce(&mut Sanitizer)>;

/// Builds a sanitizer from defaults plus the given options.
pub fn new_sanitizer(opts: Vec<SanitizerOpt>) -> Sanitizer {
    let mut s = Sanitizer::default();
    for opt in opts {
        opt(&mut s);
    }
    s
}

/// Replaces tabs with `tab_repl` instead of four spaces.
pub fn replace_tabs(tab_repl: &str) -> SanitizerOpt {
    let repl = tab_repl.to_string();
    Box::new(move |s: &mut Sanitizer| s.replace_tab = repl)
}

/// Replaces line breaks with `nl_repl`.
pub fn replace_newlines(nl_repl: &str) -> SanitizerOpt {
    let repl = nl_repl.to_string();
    Box::new(move |s: &mut Sanitizer| s.replace_newline = repl)
}

impl Sanitizer {
    /// Returns `input` with tabs and line breaks replaced and control
    /// characters removed. A `\r\n` pair counts as a single line break.
    pub fn sanitize_str(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    out.push_str(&self.replace_newline);
                }
                '\n' => out.push_str(&self.replace_newline),
                '\t' => out.push_str(&self.replace_tab),
                c if c.is_control() => {}
                c => out.push(c),
            }
        }
        out
    }
}

/// Display width of `s` in cells, ignoring ANSI escape sequences.
pub fn display_width(s: &str) -> usize {
    if s.contains('\x1b') {
        UnicodeWidthStr::width(strip_ansi_escapes::strip_str(s).as_str())
    } else {
        UnicodeWidthStr::width(s)
    }
}

/// Widest line of `s`.
pub fn max_line_width(s: &str) -> usize {
    s.lines().map(display_width).max().unwrap_or(0)
}

/// Cuts `s` to at most `columns` cells without splitting a grapheme.
///
/// A wide grapheme that would straddle the limit is dropped entirely.
pub fn truncate(s: &str, columns: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for g in s.graphemes(true) {
        let w = UnicodeWidthStr::width(g);
        if used + w > columns {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out
}

/// Pads `s` with trailing spaces to exactly `columns` cells, truncating first
/// if it is wider.
pub fn fit(s: &str, columns: usize) -> String {
    let mut out = truncate(s, columns);
    let w = UnicodeWidthStr::width(out.as_str());
    out.extend(std::iter::repeat(' ').take(columns - w));
    out
}

/// Right-aligns `s` in exactly `columns` cells.
pub fn fit_right(s: &str, columns: usize) -> String {
    let body = truncate(s, columns);
    let w = UnicodeWidthStr::width(body.as_str());
    let mut out: String = std::iter::repeat(' ').take(columns - w).collect();
    out.push_str(&body);
    out
}

/// Word-wraps `s` to lines of at most `columns` cells.
///
/// Words longer than a line are broken at grapheme boundaries. Explicit line
/// breaks are kept. With zero columns nothing can be placed and the result is
/// empty.
pub fn wrap(s: &str, columns: usize) -> Vec<String> {
    if columns == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    for paragraph in s.split('\n') {
        let mut line = String::new();
        let mut line_width = 0;
        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();
            let mut word_width = display_width(&word);
            let needed = if line.is_empty() { word_width } else { line_width + 1 + word_width };
            if needed <= columns {
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(&word);
                line_width = needed;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            while word_width > columns {
                let head = truncate(&word, columns);
                if head.is_empty() {
                    // A single grapheme wider than the line; drop it.
                    word = word.graphemes(true).skip(1).collect();
                } else {
                    word = word[head.len()..].to_string();
                    lines.push(head);
                }
                word_width = display_width(&word);
            }
            line = word;
            line_width = word_width;
        }
        lines.push(line);
    }
    lines
}
