//! The document render pipeline.
//!
//! Orchestrates the fixed sequence: front matter extraction, grammar
//! parse, sanitization, metadata table prepend, mount assignment, then
//! the post-mount diagram pass. Public entry points always settle —
//! failures surface as markup inside the mount target, never as
//! errors to the caller.

mod mount;
mod pipeline;
mod source;

pub use mount::MountRegistry;
pub use pipeline::RenderPipeline;
pub use source::{DocumentSource, HttpDocumentSource, SourceError};
