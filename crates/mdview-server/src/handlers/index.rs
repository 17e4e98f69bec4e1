//! Document index page: `GET /`.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use mdview_renderer::escape_html;

use crate::error::ServerError;
use crate::state::AppState;

/// List the markdown documents in the docs directory as preview links.
pub(crate) async fn list_documents(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(&state.docs_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "md")
            && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
        {
            names.push(stem.to_owned());
        }
    }
    names.sort();

    let mut items = String::new();
    for name in &names {
        let escaped = escape_html(name);
        items.push_str(&format!(
            "<li><a href=\"/preview/{escaped}\">{escaped}</a></li>\n"
        ));
    }

    Ok(Html(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Documents</title>\n</head>\n<body>\n\
         <h1>Documents</h1>\n<ul>\n{items}</ul>\n</body>\n</html>\n"
    )))
}
