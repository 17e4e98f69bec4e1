//! The document endpoint: `GET /api/markdown/{name}`.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use crate::error::ServerError;
use crate::handlers::document_path;
use crate::state::AppState;

/// Response for GET /api/markdown/{name}.
#[derive(Serialize)]
pub(crate) struct MarkdownResponse {
    /// Raw document text.
    pub(crate) content: String,
}

/// Return a document's raw markdown as `{"content": "..."}`.
pub(crate) async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<MarkdownResponse>, ServerError> {
    let path = document_path(&state.docs_dir, &name)?;
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|_| ServerError::DocumentNotFound(name))?;
    Ok(Json(MarkdownResponse { content }))
}
