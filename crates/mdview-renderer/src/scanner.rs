//! Source-level extension scan.
//!
//! Walks the markdown source ahead of the base parse, giving registered
//! extensions a chance to claim spans of custom syntax. Matched spans
//! are replaced by numbered placeholders (substituted back after the
//! base parse) so the base grammar never sees them. Fenced code,
//! indented code, and inline code spans are copied verbatim — custom
//! syntax inside code is literal text.

use std::sync::LazyLock;

use regex::Regex;

use crate::extension::{ExtensionLevel, GrammarExtension};
use crate::state::escape_html;

static LITERAL_PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{\{MDVIEW_EXT_\d+\}\}").expect("valid regex"));

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<p>\{\{MDVIEW_EXT_(\d+)\}\}</p>|\{\{MDVIEW_EXT_(\d+)\}\}").expect("valid regex")
});

static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^( *)([-+*]|\d{1,9}[.)])( +)").expect("valid regex"));

/// A rendered fragment waiting to be substituted for its placeholder.
struct Fragment {
    html: String,
    block: bool,
}

/// Result of a scan: rewritten source plus the rendered fragment for
/// each placeholder, indexed by placeholder number.
pub(crate) struct ScanOutput {
    pub(crate) text: String,
    fragments: Vec<Fragment>,
}

impl ScanOutput {
    /// Substitute rendered fragments back into the parsed HTML.
    ///
    /// Single left-to-right pass: substituted text is never rescanned,
    /// and code regions are skipped outright — placeholder-shaped text
    /// inside them is the author's own. A block fragment that ended up
    /// as its own paragraph replaces the `<p>` wrapper too.
    pub(crate) fn substitute(&self, html: &str) -> String {
        let mut out = String::with_capacity(html.len());
        let mut rest = html;
        while let Some(start) = rest.find("<code") {
            self.replace_into(&rest[..start], &mut out);
            let tail = &rest[start..];
            let end = tail.find("</code>").map_or(tail.len(), |i| i + "</code>".len());
            out.push_str(&tail[..end]);
            rest = &tail[end..];
        }
        self.replace_into(rest, &mut out);
        out
    }

    fn replace_into(&self, html: &str, out: &mut String) {
        let mut last = 0;
        for caps in PLACEHOLDER_RE.captures_iter(html) {
            let whole = caps.get(0).expect("group 0 always present");
            let (number, wrapped) = match caps.get(1) {
                Some(m) => (m.as_str(), true),
                None => (&caps[2], false),
            };
            let fragment = number
                .parse::<usize>()
                .ok()
                .and_then(|index| self.fragments.get(index));
            out.push_str(&html[last..whole.start()]);
            match fragment {
                Some(f) if wrapped && !f.block => {
                    out.push_str("<p>");
                    out.push_str(&f.html);
                    out.push_str("</p>");
                }
                Some(f) => out.push_str(&f.html),
                None => out.push_str(whole.as_str()),
            }
            last = whole.end();
        }
        out.push_str(&html[last..]);
    }
}

pub(crate) fn placeholder(index: usize) -> String {
    format!("{{{{MDVIEW_EXT_{index}}}}}")
}

/// Replace a literal placeholder-shaped span with a real placeholder
/// that substitutes back to the literal text, so the author's text can
/// never capture another fragment's substitution.
fn claim_literal(literal: &str, out: &mut String, fragments: &mut Vec<Fragment>) {
    out.push_str(&placeholder(fragments.len()));
    fragments.push(Fragment {
        html: escape_html(literal),
        block: false,
    });
}

pub(crate) struct Scanner<'a> {
    block: Vec<&'a dyn GrammarExtension>,
    inline: Vec<&'a dyn GrammarExtension>,
}

impl<'a> Scanner<'a> {
    /// Partition extensions by level, preserving registration order
    /// within each level.
    pub(crate) fn new(extensions: &'a [Box<dyn GrammarExtension>]) -> Self {
        let mut block = Vec::new();
        let mut inline = Vec::new();
        for ext in extensions {
            match ext.level() {
                ExtensionLevel::Block => block.push(ext.as_ref()),
                ExtensionLevel::Inline => inline.push(ext.as_ref()),
            }
        }
        Self { block, inline }
    }

    pub(crate) fn apply(&self, src: &str) -> ScanOutput {
        let mut out = String::with_capacity(src.len());
        let mut fragments = Vec::new();
        let mut fence: Option<(u8, usize)> = None;
        let mut list_indent: Option<usize> = None;
        let mut prev_blank = false;
        let mut pos = 0;

        while pos < src.len() {
            let rest = &src[pos..];
            let line_end = rest.find('\n').map_or(rest.len(), |i| i + 1);
            let line = &rest[..line_end];

            // Inside a fenced code block: copy lines until the closer.
            if let Some((ch, len)) = fence {
                out.push_str(line);
                if is_fence_close(line, ch, len) {
                    fence = None;
                }
                prev_blank = false;
                pos += line_end;
                continue;
            }

            if let Some(open) = fence_open(line) {
                fence = Some(open);
                out.push_str(line);
                prev_blank = false;
                pos += line_end;
                continue;
            }

            let blank = line.trim().is_empty();
            let indent = line.len() - line.trim_start_matches(' ').len();

            // A blank line followed by an outdented line closes the
            // open list item.
            if let Some(content) = list_indent
                && prev_blank
                && !blank
                && indent < content
            {
                list_indent = None;
            }
            prev_blank = blank;

            // Indented code line: verbatim. Inside a list item the
            // threshold sits past the item's content indent; up to the
            // content indent the same four spaces are paragraph
            // continuation, not code.
            let indented_code = match list_indent {
                Some(content) => !blank && indent >= content + 4,
                None => line.starts_with("    ") || line.starts_with('\t'),
            };
            if indented_code {
                out.push_str(line);
                pos += line_end;
                continue;
            }

            if let Some(caps) = LIST_MARKER_RE.captures(line) {
                list_indent = Some(caps[1].len() + caps[2].len() + caps[3].len());
            }

            // Block extensions are tried first, only at line starts,
            // against the full remaining source (they may span lines).
            let mut block_consumed = 0;
            for ext in &self.block {
                if let Some(m) = ext.attempt_match(rest) {
                    out.push_str(&placeholder(fragments.len()));
                    fragments.push(Fragment {
                        html: ext.render(&m.text),
                        block: true,
                    });
                    block_consumed = m.consumed;
                    break;
                }
            }
            if block_consumed > 0 {
                pos += block_consumed;
                // Anything left on the closing line is scanned inline.
                let tail = &src[pos..];
                let tail_end = tail.find('\n').map_or(tail.len(), |i| i + 1);
                self.scan_inline(&tail[..tail_end], &mut out, &mut fragments);
                pos += tail_end;
                continue;
            }

            self.scan_inline(line, &mut out, &mut fragments);
            pos += line_end;
        }

        ScanOutput {
            text: out,
            fragments,
        }
    }

    /// Scan one line, trying inline extensions at each position.
    fn scan_inline(&self, line: &str, out: &mut String, fragments: &mut Vec<Fragment>) {
        let mut i = 0;
        while i < line.len() {
            let rest = &line[i..];

            // Inline code span: copy through the matching closer. The
            // substitution pass skips rendered code regions, so
            // placeholder-shaped text in here needs no claiming.
            if rest.starts_with('`') {
                let run = rest.bytes().take_while(|&b| b == b'`').count();
                if let Some(off) = find_backtick_close(&rest[run..], run) {
                    let span = run + off + run;
                    out.push_str(&rest[..span]);
                    i += span;
                } else {
                    out.push_str(&rest[..run]);
                    i += run;
                }
                continue;
            }

            // Backslash escape keeps the next marker literal. The base
            // grammar strips the backslash from punctuation, so an
            // escaped placeholder-shaped span is claimed like an
            // unescaped one.
            if rest.starts_with('\\') && rest.len() > 1 {
                if let Some(m) = LITERAL_PLACEHOLDER_RE.find(&rest[1..]) {
                    claim_literal(m.as_str(), out, fragments);
                    i += 1 + m.end();
                    continue;
                }
                let next = rest[1..].chars().next().map_or(0, char::len_utf8);
                out.push_str(&rest[..1 + next]);
                i += 1 + next;
                continue;
            }

            // Author text shaped like one of our placeholders.
            if let Some(m) = LITERAL_PLACEHOLDER_RE.find(rest) {
                claim_literal(m.as_str(), out, fragments);
                i += m.end();
                continue;
            }

            let mut matched = false;
            for ext in &self.inline {
                if let Some(m) = ext.attempt_match(rest) {
                    out.push_str(&placeholder(fragments.len()));
                    fragments.push(Fragment {
                        html: ext.render(&m.text),
                        block: false,
                    });
                    i += m.consumed;
                    matched = true;
                    break;
                }
            }
            if matched {
                continue;
            }

            let ch = rest.chars().next().map_or(1, char::len_utf8);
            out.push_str(&rest[..ch]);
            i += ch;
        }
    }
}

/// Detect a fence opener: up to three leading spaces, then three or
/// more backticks or tildes.
fn fence_open(line: &str) -> Option<(u8, usize)> {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return None;
    }
    let first = *trimmed.as_bytes().first()?;
    if first != b'`' && first != b'~' {
        return None;
    }
    let run = trimmed.bytes().take_while(|&b| b == first).count();
    if run >= 3 { Some((first, run)) } else { None }
}

/// A closing fence line: the opener's character repeated at least as
/// many times, nothing else but whitespace.
fn is_fence_close(line: &str, ch: u8, len: usize) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= len && trimmed.bytes().all(|b| b == ch)
}

/// Find a run of exactly `n` backticks; returns its offset.
fn find_backtick_close(s: &str, n: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let start = i;
            while i < bytes.len() && bytes[i] == b'`' {
                i += 1;
            }
            if i - start == n {
                return Some(start);
            }
        } else {
            i += 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::{MathBlock, MathInline, Subscript, Superscript};
    use pretty_assertions::assert_eq;

    fn scan(src: &str) -> ScanOutput {
        let exts: Vec<Box<dyn GrammarExtension>> = vec![
            Box::new(MathBlock),
            Box::new(Subscript),
            Box::new(Superscript),
            Box::new(MathInline),
        ];
        Scanner::new(&exts).apply(src)
    }

    #[test]
    fn test_plain_text_unchanged() {
        let out = scan("# Title\n\nplain *emphasis* text\n");
        assert_eq!(out.text, "# Title\n\nplain *emphasis* text\n");
        assert!(out.fragments.is_empty());
    }

    #[test]
    fn test_inline_match_becomes_placeholder() {
        let out = scan("H~2~O");
        assert_eq!(out.text, "H{{MDVIEW_EXT_0}}O");
        assert_eq!(out.fragments.len(), 1);
        assert_eq!(out.fragments[0].html, "<sub>2</sub>");
    }

    #[test]
    fn test_fenced_code_is_verbatim() {
        let src = "```\n~x~ and $y$\n```\n";
        let out = scan(src);
        assert_eq!(out.text, src);
        assert!(out.fragments.is_empty());
    }

    #[test]
    fn test_inline_code_span_is_verbatim() {
        let out = scan("use `~x~` here");
        assert_eq!(out.text, "use `~x~` here");
        assert!(out.fragments.is_empty());
    }

    #[test]
    fn test_indented_code_is_verbatim() {
        let out = scan("    ~x~\n");
        assert_eq!(out.text, "    ~x~\n");
        assert!(out.fragments.is_empty());
    }

    #[test]
    fn test_backslash_escape_suppresses_match() {
        let out = scan(r"\~x~ stays");
        assert_eq!(out.text, r"\~x~ stays");
        assert!(out.fragments.is_empty());
    }

    #[test]
    fn test_block_before_inline_at_line_start() {
        let out = scan("$$\na+b\n$$\n");
        assert_eq!(out.text, "{{MDVIEW_EXT_0}}\n");
        assert_eq!(out.fragments.len(), 1);
        assert!(out.fragments[0].html.contains("<math"));
    }

    #[test]
    fn test_multiple_fragments_numbered_in_order() {
        let out = scan("a~1~ b^2^ c$x$");
        assert_eq!(
            out.text,
            "a{{MDVIEW_EXT_0}} b{{MDVIEW_EXT_1}} c{{MDVIEW_EXT_2}}"
        );
        assert_eq!(out.fragments.len(), 3);
    }

    #[test]
    fn test_substitute_unwraps_own_paragraph_for_block_fragment() {
        let out = scan("$$\na\n$$\n");
        let html = out.substitute("<p>{{MDVIEW_EXT_0}}</p>");
        assert!(html.starts_with("<math"));
        assert!(!html.contains("<p>"));
    }

    #[test]
    fn test_inline_fragment_keeps_own_paragraph() {
        let out = scan("~x~");
        let html = out.substitute("<p>{{MDVIEW_EXT_0}}</p>");
        assert_eq!(html, "<p><sub>x</sub></p>");
    }

    #[test]
    fn test_literal_placeholder_text_is_claimed() {
        let out = scan("{{MDVIEW_EXT_0}} and H~2~O");
        assert_eq!(out.text, "{{MDVIEW_EXT_0}} and H{{MDVIEW_EXT_1}}O");
        assert_eq!(out.fragments[0].html, "{{MDVIEW_EXT_0}}");
        assert_eq!(out.fragments[1].html, "<sub>2</sub>");
    }

    #[test]
    fn test_escaped_literal_placeholder_is_claimed() {
        let out = scan(r"\{{MDVIEW_EXT_3}}");
        assert_eq!(out.text, "{{MDVIEW_EXT_0}}");
        assert_eq!(out.fragments[0].html, "{{MDVIEW_EXT_3}}");
    }

    #[test]
    fn test_substitute_skips_code_regions() {
        let out = scan("~x~");
        let html =
            out.substitute("<code>{{MDVIEW_EXT_0}}</code> then <p>{{MDVIEW_EXT_0}}</p>");
        assert_eq!(
            html,
            "<code>{{MDVIEW_EXT_0}}</code> then <p><sub>x</sub></p>"
        );
    }

    #[test]
    fn test_substituted_fragment_is_not_rescanned() {
        // The restored literal names a later index; a rescan would
        // swap that fragment into the author's text.
        let out = scan("{{MDVIEW_EXT_1}} and ~x~");
        let html = out.substitute("<p>{{MDVIEW_EXT_0}} and {{MDVIEW_EXT_1}}</p>");
        assert_eq!(html, "<p>{{MDVIEW_EXT_1}} and <sub>x</sub></p>");
    }

    #[test]
    fn test_tilde_fence_not_subscript() {
        let src = "~~~\ncode\n~~~\n";
        let out = scan(src);
        assert_eq!(out.text, src);
    }

    #[test]
    fn test_list_continuation_line_is_scanned() {
        let out = scan("- item\n\n    formula H~2~O\n");
        assert_eq!(out.text, "- item\n\n    formula H{{MDVIEW_EXT_0}}O\n");
        assert_eq!(out.fragments.len(), 1);
    }

    #[test]
    fn test_code_inside_list_item_needs_deeper_indent() {
        let src = "- item\n\n      ~x~\n";
        let out = scan(src);
        assert_eq!(out.text, src);
        assert!(out.fragments.is_empty());
    }

    #[test]
    fn test_indented_code_after_list_end_is_verbatim() {
        let src = "- item\n\nclosing paragraph\n\n    ~x~\n";
        let out = scan(src);
        assert_eq!(out.text, src);
        assert!(out.fragments.is_empty());
    }
}
