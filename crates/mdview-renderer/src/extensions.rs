//! Built-in grammar extensions: subscript, superscript, inline math,
//! and display math.

use std::sync::LazyLock;

use regex::Regex;

use crate::extension::{ExtensionLevel, ExtensionMatch, GrammarExtension};
use crate::math::{self, MathMode};
use crate::state::escape_html;

static SUBSCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^~([^~\s]+)~").expect("valid regex"));

static SUPERSCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\^([^\^\s]+)\^").expect("valid regex"));

static MATH_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\$\$\n?(.+?)\n?\$\$").expect("valid regex"));

fn regex_match(re: &Regex, src: &str) -> Option<ExtensionMatch> {
    let caps = re.captures(src)?;
    let whole = caps.get(0).expect("group 0 always present");
    let text = caps.get(1).map_or("", |m| m.as_str());
    Some(ExtensionMatch {
        consumed: whole.end(),
        text: text.to_owned(),
    })
}

/// `~X~` where X contains no whitespace and no `~`.
pub struct Subscript;

impl GrammarExtension for Subscript {
    fn name(&self) -> &'static str {
        "subscript"
    }

    fn level(&self) -> ExtensionLevel {
        ExtensionLevel::Inline
    }

    fn attempt_match(&self, src: &str) -> Option<ExtensionMatch> {
        regex_match(&SUBSCRIPT_RE, src)
    }

    fn render(&self, text: &str) -> String {
        format!("<sub>{}</sub>", escape_html(text))
    }
}

/// `^X^` where X contains no whitespace and no `^`.
pub struct Superscript;

impl GrammarExtension for Superscript {
    fn name(&self) -> &'static str {
        "superscript"
    }

    fn level(&self) -> ExtensionLevel {
        ExtensionLevel::Inline
    }

    fn attempt_match(&self, src: &str) -> Option<ExtensionMatch> {
        regex_match(&SUPERSCRIPT_RE, src)
    }

    fn render(&self, text: &str) -> String {
        format!("<sup>{}</sup>", escape_html(text))
    }
}

/// `$X$` on a single line.
///
/// The opening `$` must not be immediately followed by a second `$`, so
/// this rule never misfires on the display-math opener.
pub struct MathInline;

impl GrammarExtension for MathInline {
    fn name(&self) -> &'static str {
        "math-inline"
    }

    fn level(&self) -> ExtensionLevel {
        ExtensionLevel::Inline
    }

    fn attempt_match(&self, src: &str) -> Option<ExtensionMatch> {
        let rest = src.strip_prefix('$')?;
        if rest.starts_with('$') {
            return None;
        }
        // The expression runs to the next `$` with no newline allowed
        // in between, and must be non-empty.
        let end = rest.find(['$', '\n'])?;
        if end == 0 || rest.as_bytes()[end] != b'$' {
            return None;
        }
        Some(ExtensionMatch {
            consumed: end + 2,
            text: rest[..end].to_owned(),
        })
    }

    fn render(&self, text: &str) -> String {
        match math::typeset(text, MathMode::Inline) {
            Ok(mathml) => mathml,
            Err(err) => format!(
                r#"<span class="math-error">Error: {}</span>"#,
                escape_html(&err.to_string())
            ),
        }
    }
}

/// `$$ … $$` spanning one or more lines; the expression is trimmed.
pub struct MathBlock;

impl GrammarExtension for MathBlock {
    fn name(&self) -> &'static str {
        "math-block"
    }

    fn level(&self) -> ExtensionLevel {
        ExtensionLevel::Block
    }

    fn attempt_match(&self, src: &str) -> Option<ExtensionMatch> {
        let caps = MATH_BLOCK_RE.captures(src)?;
        let whole = caps.get(0).expect("group 0 always present");
        Some(ExtensionMatch {
            consumed: whole.end(),
            text: caps[1].trim().to_owned(),
        })
    }

    fn render(&self, text: &str) -> String {
        match math::typeset(text, MathMode::Display) {
            Ok(mathml) => mathml,
            Err(err) => format!(
                r#"<div class="math-error">Error rendering math: {}</div>"#,
                escape_html(&err.to_string())
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_subscript_match() {
        let m = Subscript.attempt_match("~abc~ rest").unwrap();
        assert_eq!(m.consumed, 5);
        assert_eq!(m.text, "abc");
    }

    #[test]
    fn test_subscript_rejects_whitespace_and_marker() {
        assert_eq!(Subscript.attempt_match("~a b~"), None);
        assert_eq!(Subscript.attempt_match("~a~b~").map(|m| m.text), Some("a".to_owned()));
        assert_eq!(Subscript.attempt_match("~~"), None);
        assert_eq!(Subscript.attempt_match("plain"), None);
    }

    #[test]
    fn test_subscript_render_escapes() {
        assert_eq!(Subscript.render("<b>"), "<sub>&lt;b&gt;</sub>");
    }

    #[test]
    fn test_superscript_match() {
        let m = Superscript.attempt_match("^2^").unwrap();
        assert_eq!(m.consumed, 3);
        assert_eq!(m.text, "2");
        assert_eq!(Superscript.attempt_match("^a b^"), None);
    }

    #[test]
    fn test_math_inline_match() {
        let m = MathInline.attempt_match("$a+b$ tail").unwrap();
        assert_eq!(m.consumed, 5);
        assert_eq!(m.text, "a+b");
    }

    #[test]
    fn test_math_inline_rejects_display_opener() {
        assert_eq!(MathInline.attempt_match("$$a$$"), None);
    }

    #[test]
    fn test_math_inline_rejects_newline_and_empty() {
        assert_eq!(MathInline.attempt_match("$a\nb$"), None);
        assert_eq!(MathInline.attempt_match("$$"), None);
        assert_eq!(MathInline.attempt_match("$a"), None);
    }

    #[test]
    fn test_math_block_match_trims() {
        let src = "$$\na + b\n$$ tail";
        let m = MathBlock.attempt_match(src).unwrap();
        assert_eq!(m.text, "a + b");
        assert_eq!(&src[m.consumed..], " tail");
    }

    #[test]
    fn test_math_block_single_line() {
        let m = MathBlock.attempt_match("$$x^2$$").unwrap();
        assert_eq!(m.text, "x^2");
    }

    #[test]
    fn test_math_block_requires_closer() {
        assert_eq!(MathBlock.attempt_match("$$\nunclosed\n"), None);
    }

    #[test]
    fn test_math_renders_mathml() {
        let html = MathInline.render("a+b");
        assert!(html.contains("<math"), "expected MathML, got: {html}");

        let html = MathBlock.render("a+b");
        assert!(html.contains("<math"));
        assert!(html.contains("block"));
    }

    #[test]
    fn test_invalid_math_renders_local_error_fragment() {
        let html = MathInline.render(r"\frac{");
        assert!(html.contains(r#"class="math-error""#));

        let html = MathBlock.render(r"\frac{");
        assert!(html.contains("Error rendering math"));
    }
}
