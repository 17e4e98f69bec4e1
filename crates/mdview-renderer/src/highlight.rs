//! Class-based syntax highlighting for fenced code blocks.
//!
//! Wraps syntect with the fallback policy the renderer needs: a
//! language tag is validated against the loaded syntax set, and
//! unknown tags degrade to plain escaped text so highlighting never
//! fails on an unrecognized tag.

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::state::escape_html;

/// Syntax highlighter with plain-text fallback.
pub struct Highlighter {
    syntaxes: SyntaxSet,
}

impl Highlighter {
    /// Create a highlighter with the bundled default syntax set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Whether a language tag resolves to a known syntax.
    #[must_use]
    pub fn is_known(&self, language: &str) -> bool {
        self.syntaxes.find_syntax_by_token(language).is_some()
    }

    /// Highlight code for the given language tag.
    ///
    /// Returns the inner HTML for a `<code>` element: span-wrapped
    /// tokens with syntect's class names for known languages, plain
    /// escaped text otherwise.
    #[must_use]
    pub fn highlight(&self, code: &str, language: Option<&str>) -> String {
        let Some(syntax) = language.and_then(|lang| self.syntaxes.find_syntax_by_token(lang))
        else {
            return escape_html(code);
        };

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, ClassStyle::Spaced);
        for line in LinesWithEndings::from(code) {
            if generator
                .parse_html_for_line_which_includes_newline(line)
                .is_err()
            {
                return escape_html(code);
            }
        }
        generator.finalize()
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}
