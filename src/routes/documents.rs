//! Document listing routes

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::document::DocumentMetadata;
use crate::state::AppState;

/// Create the documents router
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_documents))
}

/// Document listing response
#[derive(Serialize)]
struct DocumentsResponse {
    documents: Vec<DocumentMetadata>,
    total: usize,
}

/// List all indexed documents
///
/// GET /api/documents
async fn list_documents(State(state): State<AppState>) -> Json<DocumentsResponse> {
    let documents: Vec<DocumentMetadata> =
        state.search().documents().into_iter().cloned().collect();
    Json(DocumentsResponse {
        total: documents.len(),
        documents,
    })
}
