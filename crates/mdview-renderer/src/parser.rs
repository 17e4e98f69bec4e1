//! The grammar engine: extension registry plus base markdown parse.

use pulldown_cmark::{Options, Parser};

use crate::extension::GrammarExtension;
use crate::extensions::{MathBlock, MathInline, Subscript, Superscript};
use crate::highlight::Highlighter;
use crate::renderer::HtmlRenderer;
use crate::scanner::Scanner;

/// Markdown-to-HTML parser with an ordered extension registry.
///
/// [`DocumentParser::new`] registers the built-in extensions; further
/// extensions appended with [`with_extension`](Self::with_extension)
/// are tried after them. The output is raw, unsanitized HTML.
pub struct DocumentParser {
    extensions: Vec<Box<dyn GrammarExtension>>,
    highlighter: Highlighter,
}

impl DocumentParser {
    /// Parser with the built-in extensions registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extensions: vec![
                Box::new(MathBlock),
                Box::new(Subscript),
                Box::new(Superscript),
                Box::new(MathInline),
            ],
            highlighter: Highlighter::new(),
        }
    }

    /// Parser with no extensions, base grammar only.
    #[must_use]
    pub fn bare() -> Self {
        Self {
            extensions: Vec::new(),
            highlighter: Highlighter::new(),
        }
    }

    /// Append an extension to the registry.
    #[must_use]
    pub fn with_extension(mut self, extension: Box<dyn GrammarExtension>) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Names of the registered extensions, in precedence order.
    pub fn extension_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.extensions.iter().map(|ext| ext.name())
    }

    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES
    }

    /// Parse a markdown body to raw HTML.
    ///
    /// Extension syntax is claimed by a source-level scan first, so an
    /// extension match can never be reinterpreted by the base grammar
    /// (`~x~` is subscript, not strikethrough).
    #[must_use]
    pub fn parse(&self, body: &str) -> String {
        let scan = Scanner::new(&self.extensions).apply(body);
        let events = Parser::new_ext(&scan.text, Self::options());
        let html = HtmlRenderer::new(&self.highlighter).run(events);
        scan.substitute(&html)
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::{ExtensionLevel, ExtensionMatch};
    use pretty_assertions::assert_eq;

    fn parse(src: &str) -> String {
        DocumentParser::new().parse(src)
    }

    #[test]
    fn test_paragraph_and_emphasis() {
        assert_eq!(parse("plain *water*"), "<p>plain <em>water</em></p>");
    }

    #[test]
    fn test_heading() {
        assert_eq!(parse("## Usage"), "<h2>Usage</h2>");
    }

    #[test]
    fn test_subscript() {
        assert_eq!(parse("H~2~O"), "<p>H<sub>2</sub>O</p>");
    }

    #[test]
    fn test_superscript() {
        assert_eq!(parse("x^2^"), "<p>x<sup>2</sup></p>");
    }

    #[test]
    fn test_subscript_wins_over_strikethrough() {
        // Single tildes must reach the subscript rule, not the base
        // grammar's strikethrough.
        let html = parse("a ~x~ b");
        assert_eq!(html, "<p>a <sub>x</sub> b</p>");
    }

    #[test]
    fn test_double_tilde_is_strikethrough() {
        assert_eq!(parse("~~gone~~"), "<p><s>gone</s></p>");
    }

    #[test]
    fn test_inline_math_renders_mathml() {
        let html = parse("energy: $E=mc^2$");
        assert!(html.starts_with("<p>energy: <math"));
        assert!(html.ends_with("</math></p>"));
    }

    #[test]
    fn test_display_math_is_block_level() {
        let html = parse("$$\na + b\n$$");
        assert!(html.starts_with("<math"), "got: {html}");
        assert!(!html.contains("<p>"));
        assert!(html.contains("block"));
    }

    #[test]
    fn test_invalid_math_yields_local_error_fragment() {
        let html = parse(r"before $\frac{$ after");
        assert!(html.contains(r#"<span class="math-error">Error:"#));
        assert!(html.contains("before"));
        assert!(html.contains("after"));
    }

    #[test]
    fn test_fenced_code_language_class() {
        let html = parse("```rust\nfn main() {}\n```");
        assert!(html.starts_with(r#"<pre><code class="language-rust">"#));
        assert!(html.contains("<span"));
    }

    #[test]
    fn test_fenced_code_unknown_language_plain() {
        let html = parse("```mermaid\ngraph TD; A --> B\n```");
        assert_eq!(
            html,
            "<pre><code class=\"language-mermaid\">graph TD; A --&gt; B\n</code></pre>"
        );
    }

    #[test]
    fn test_extension_syntax_inert_inside_code() {
        let html = parse("```\n~x~ $y$\n```");
        assert!(html.contains("~x~ $y$"));
        assert!(!html.contains("<sub>"));
    }

    #[test]
    fn test_inline_code_span_keeps_markers() {
        let html = parse("use `~x~` here");
        assert_eq!(html, "<p>use <code>~x~</code> here</p>");
    }

    #[test]
    fn test_literal_placeholder_text_is_inert() {
        let html = parse("{{MDVIEW_EXT_0}} and H~2~O");
        assert_eq!(html, "<p>{{MDVIEW_EXT_0}} and H<sub>2</sub>O</p>");
    }

    #[test]
    fn test_placeholder_text_in_code_span_untouched() {
        let html = parse("`{{MDVIEW_EXT_0}}` then ~x~");
        assert_eq!(
            html,
            "<p><code>{{MDVIEW_EXT_0}}</code> then <sub>x</sub></p>"
        );
    }

    #[test]
    fn test_placeholder_text_in_fence_untouched() {
        let html = parse("```text\n{{MDVIEW_EXT_0}}\n```\n\n~x~");
        assert!(html.contains("{{MDVIEW_EXT_0}}\n</code></pre>"));
        assert!(html.contains("<p><sub>x</sub></p>"));
    }

    #[test]
    fn test_image_alt_flattens_inline_markup() {
        let html = parse(r#"![the *alt* text](img.png "T")"#);
        assert_eq!(
            html,
            r#"<p><img src="img.png" title="T" alt="the alt text"></p>"#
        );
    }

    #[test]
    fn test_nested_image_contributes_alt_text_only() {
        let html = parse("![a ![b](i.png) c](o.png)");
        assert_eq!(html, r#"<p><img src="o.png" alt="a b c"></p>"#);
    }

    #[test]
    fn test_extension_in_list_item_continuation() {
        let html = parse("- water\n\n    formula H~2~O");
        assert!(html.contains("<sub>2</sub>"));
        assert!(!html.contains("<pre>"));
    }

    #[test]
    fn test_footnotes_numbered_in_reference_order() {
        let html = parse("a[^x] b[^y]\n\n[^x]: one\n\n[^y]: two");
        assert!(html.contains(r##"<sup class="footnote-reference"><a href="#fn-x">1</a></sup>"##));
        assert!(html.contains(r##"<sup class="footnote-reference"><a href="#fn-y">2</a></sup>"##));
        assert!(html.contains(r#"<div class="footnote-definition" id="fn-x">"#));
    }

    #[test]
    fn test_task_list() {
        let html = parse("- [x] done\n- [ ] open");
        assert!(html.contains(r#"<input type="checkbox" checked disabled>"#));
        assert!(html.contains(r#"<input type="checkbox" disabled>"#));
    }

    #[test]
    fn test_table_with_alignment() {
        let html = parse("| a | b |\n|:--|--:|\n| 1 | 2 |");
        assert!(html.contains(r#"<th style="text-align:left">a</th>"#));
        assert!(html.contains(r#"<td style="text-align:right">2</td>"#));
    }

    #[test]
    fn test_mixed_document() {
        let html = parse("# T\n\nHello $E=mc^2$ and H~2~O");
        assert!(html.starts_with("<h1>T</h1>"));
        assert!(html.contains("<math"));
        assert!(html.contains("<sub>2</sub>"));
    }

    #[test]
    fn test_bare_parser_has_no_extensions() {
        let html = DocumentParser::bare().parse("H~2~O and $x$");
        assert!(!html.contains("<sub>"));
        assert!(!html.contains("<math"));
    }

    struct Shout;

    impl GrammarExtension for Shout {
        fn name(&self) -> &'static str {
            "shout"
        }

        fn level(&self) -> ExtensionLevel {
            ExtensionLevel::Inline
        }

        fn attempt_match(&self, src: &str) -> Option<ExtensionMatch> {
            let rest = src.strip_prefix('!')?;
            let end = rest.find('!')?;
            (end > 0).then(|| ExtensionMatch {
                consumed: end + 2,
                text: rest[..end].to_owned(),
            })
        }

        fn render(&self, text: &str) -> String {
            format!("<mark>{}</mark>", crate::state::escape_html(text))
        }
    }

    #[test]
    fn test_custom_extension_appended_after_builtins() {
        let parser = DocumentParser::new().with_extension(Box::new(Shout));
        assert_eq!(
            parser.extension_names().collect::<Vec<_>>(),
            vec!["math-block", "subscript", "superscript", "math-inline", "shout"]
        );
        let html = parser.parse("say !hi! and H~2~O");
        assert!(html.contains("<mark>hi</mark>"));
        assert!(html.contains("<sub>2</sub>"));
    }
}
