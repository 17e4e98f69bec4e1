//! Application state.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use mdview_pipeline::RenderPipeline;

/// Shared state for all request handlers.
pub(crate) struct AppState {
    /// Directory holding the markdown documents.
    pub(crate) docs_dir: PathBuf,
    /// Render pipeline shared across preview requests.
    pub(crate) pipeline: RenderPipeline,
    /// Counter for per-request mount target ids.
    next_mount: AtomicU64,
}

impl AppState {
    pub(crate) fn new(docs_dir: PathBuf, pipeline: RenderPipeline) -> Self {
        Self {
            docs_dir,
            pipeline,
            next_mount: AtomicU64::new(0),
        }
    }

    /// Fresh mount target id, unique within this process.
    pub(crate) fn next_mount_id(&self) -> String {
        let n = self.next_mount.fetch_add(1, Ordering::Relaxed);
        format!("preview-{n}")
    }
}
