//! Finding diagram code blocks in sanitized HTML.

use std::ops::Range;
use std::sync::LazyLock;

use mdview_renderer::unescape_html;
use regex::Regex;

use crate::fragment::placeholder_fragment;
use crate::language::DiagramLanguage;

static CODE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<pre><code class="language-([A-Za-z0-9_-]+)">(.*?)</code></pre>"#)
        .expect("valid regex")
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// A diagram code block lifted out of the rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramBlock {
    /// Document-order position, also the placeholder id suffix.
    pub index: usize,
    pub language: DiagramLanguage,
    /// Recovered source text, entities resolved.
    pub source: String,
    /// Byte range of this block's placeholder in the rewritten
    /// document. Splicing by range keeps replacements anchored even
    /// when the document contains author text identical to a
    /// placeholder.
    pub span: Range<usize>,
}

/// Replace every diagram-language code block with a positional
/// placeholder and return the blocks in document order.
///
/// All blocks are lifted in one pass before any rendering starts, so a
/// block whose source is later re-inserted as fallback code can never
/// be discovered a second time. Code blocks in other languages are
/// left untouched.
#[must_use]
pub fn extract_blocks(html: &str) -> (String, Vec<DiagramBlock>) {
    let mut blocks: Vec<DiagramBlock> = Vec::new();
    let mut out = String::with_capacity(html.len());
    let mut last = 0;

    for caps in CODE_BLOCK_RE.captures_iter(html) {
        let whole = caps.get(0).expect("group 0 always present");
        let Some(language) = DiagramLanguage::parse(&caps[1]) else {
            continue;
        };
        let index = blocks.len();
        out.push_str(&html[last..whole.start()]);
        let span_start = out.len();
        out.push_str(&placeholder_fragment(index));
        blocks.push(DiagramBlock {
            index,
            language,
            source: recover_source(&caps[2]),
            span: span_start..out.len(),
        });
        last = whole.end();
    }

    out.push_str(&html[last..]);
    (out, blocks)
}

/// Recover diagram source from highlighted code HTML: drop the span
/// markup, then resolve entities back to the characters the author
/// wrote.
fn recover_source(code_html: &str) -> String {
    unescape_html(&TAG_RE.replace_all(code_html, ""))
}
