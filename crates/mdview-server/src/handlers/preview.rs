//! Server-rendered preview page: `GET /preview/{name}`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Html;
use mdview_renderer::escape_html;

use crate::error::ServerError;
use crate::handlers::document_path;
use crate::state::AppState;

/// Render a document through the full pipeline and serve the result
/// as a standalone page.
pub(crate) async fn get_preview(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Html<String>, ServerError> {
    let path = document_path(&state.docs_dir, &name)?;
    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|_| ServerError::DocumentNotFound(name.clone()))?;

    // The pipeline does blocking HTTP for diagrams.
    let shared = Arc::clone(&state);
    let body = tokio::task::spawn_blocking(move || {
        let mount_id = shared.next_mount_id();
        let mounts = shared.pipeline.mounts();
        mounts.create(&mount_id);
        shared.pipeline.render(&text, &mount_id);
        let html = mounts.html(&mount_id).unwrap_or_default();
        mounts.remove(&mount_id);
        html
    })
    .await
    .map_err(|e| ServerError::Io(std::io::Error::other(e)))?;

    Ok(Html(preview_page(&name, &body)))
}

/// Wrap rendered document markup in minimal page chrome.
fn preview_page(name: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>main {{ max-width: 52rem; margin: 2rem auto; font-family: sans-serif; }}</style>\n\
         </head>\n<body>\n<main class=\"markdown-body\">\n{body}\n</main>\n</body>\n</html>\n",
        title = escape_html(name),
    )
}
