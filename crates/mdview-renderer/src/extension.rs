//! The grammar extension capability interface.
//!
//! An extension recognizes one piece of custom syntax and renders it to
//! an HTML fragment. Extensions are held in an ordered registry on
//! [`DocumentParser`](crate::DocumentParser); registration order is the
//! precedence contract: block-level extensions are tried before
//! inline-level extensions at each scan position, and within a level
//! earlier registrations win.

/// Whether an extension matches at line starts or anywhere in inline
/// text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtensionLevel {
    /// Tried only at the start of a line; may consume across line
    /// breaks.
    Block,
    /// Tried at any position in inline text; must not consume across a
    /// line break.
    Inline,
}

/// A successful prefix match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionMatch {
    /// Length in bytes of the raw span consumed from the source.
    pub consumed: usize,
    /// Captured text handed to [`GrammarExtension::render`].
    pub text: String,
}

/// A pluggable rule recognizing and rendering custom syntax.
///
/// `attempt_match` must be a pure prefix match against the remaining
/// source at the scan cursor: it returns `None` when the pattern does
/// not match (never panics or errors), so control falls through to the
/// next extension and finally to the base grammar.
pub trait GrammarExtension: Send + Sync {
    /// Stable name, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Scan level of this extension.
    fn level(&self) -> ExtensionLevel;

    /// Attempt a prefix match at the current scan cursor.
    fn attempt_match(&self, src: &str) -> Option<ExtensionMatch>;

    /// Render the captured text to an HTML fragment.
    ///
    /// Failures internal to rendering (e.g. an invalid math
    /// expression) must be contained and returned as a visible error
    /// fragment, not propagated.
    fn render(&self, text: &str) -> String;
}
