//! YAML front matter: extraction from a document and formatting of the
//! decoded value as an HTML metadata table.
//!
//! Extraction is a pure split of the leading `---` delimited block from
//! the markdown body. A block that fails to decode is not an error:
//! the whole document, delimiters included, is handed on as the body.

mod extract;
mod format;

pub use extract::{Document, extract};
pub use format::front_matter_table;
