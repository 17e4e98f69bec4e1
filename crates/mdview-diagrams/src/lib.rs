//! Diagram discovery and rendering.
//!
//! Diagram-language code blocks are found in sanitized HTML, swapped
//! for positionally-identified placeholders, and rendered one by one
//! through a [`DiagramEngine`]. A failed block degrades to an error
//! banner plus its highlighted source; siblings are unaffected.

mod discover;
mod engine;
mod fragment;
mod language;

pub use discover::{DiagramBlock, extract_blocks};
pub use engine::{DiagramEngine, DiagramError, KrokiEngine};
pub use fragment::{fallback_fragment, figure_fragment, placeholder_fragment};
pub use language::DiagramLanguage;
