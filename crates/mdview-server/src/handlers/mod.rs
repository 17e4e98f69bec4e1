//! HTTP request handlers.

pub(crate) mod index;
pub(crate) mod markdown;
pub(crate) mod preview;

use std::path::{Component, Path, PathBuf};

use crate::error::ServerError;

/// Resolve a document name to a path under the docs directory.
///
/// The name must be a plain relative file name: any parent-directory
/// or absolute component is rejected before the filesystem is touched.
/// A missing `.md` extension is appended.
pub(crate) fn document_path(docs_dir: &Path, name: &str) -> Result<PathBuf, ServerError> {
    if name.is_empty() {
        return Err(ServerError::InvalidName(name.to_owned()));
    }

    let relative = Path::new(name);
    let safe = relative
        .components()
        .all(|part| matches!(part, Component::Normal(_)));
    if !safe {
        return Err(ServerError::InvalidName(name.to_owned()));
    }

    let mut path = docs_dir.join(relative);
    if path.extension().is_none() {
        path.set_extension("md");
    }
    Ok(path)
}
