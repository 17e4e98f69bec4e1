//! Extensible markdown grammar and HTML renderer.
//!
//! This crate layers custom inline and block syntax (subscript,
//! superscript, inline and display math) onto a pulldown-cmark base
//! grammar via the [`GrammarExtension`] trait, and renders the result
//! to HTML with class-based syntax highlighting for fenced code.
//!
//! # Architecture
//!
//! Custom syntax is recognized by a source-level scan before the base
//! parse: at each position outside code, registered extensions attempt
//! a prefix match in registration order (block-level before
//! inline-level). Matched spans are swapped for numbered placeholders
//! whose rendered fragments are substituted back after the base parse.
//!
//! # Example
//!
//! ```
//! use mdview_renderer::DocumentParser;
//!
//! let parser = DocumentParser::new();
//! let html = parser.parse("H~2~O is *water*");
//! assert!(html.contains("<sub>2</sub>"));
//! ```

mod extension;
mod extensions;
mod highlight;
pub mod math;
mod parser;
mod renderer;
mod scanner;
mod state;

pub use extension::{ExtensionLevel, ExtensionMatch, GrammarExtension};
pub use extensions::{MathBlock, MathInline, Subscript, Superscript};
pub use highlight::Highlighter;
pub use parser::DocumentParser;
pub use state::{escape_html, unescape_html};
