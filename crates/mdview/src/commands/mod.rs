//! CLI command implementations.

mod render;
mod serve;

pub use render::RenderArgs;
pub use serve::ServeArgs;
