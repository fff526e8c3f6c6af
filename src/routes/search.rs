//! Search API routes
//!
//! Accepts the legacy POST body shape so existing frontends keep
//! working unchanged.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::error::Result;
use crate::search::SearchOutcome;
use crate::state::AppState;

/// Create the search router
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(run_search))
}

/// Search request body
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Raw query; quoted segments are exact phrases.
    #[serde(default)]
    pub query: String,
    /// Filenames to restrict the search to; empty means all documents.
    #[serde(default)]
    pub documents: Vec<String>,
    /// Query language, "fr" enables translation expansion.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

/// Run a search across the selected documents
///
/// POST /api/search
async fn run_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchOutcome>> {
    let outcome = state
        .search()
        .search(&request.query, &request.documents, &request.language)
        .await?;
    Ok(Json(outcome))
}
