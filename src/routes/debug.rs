//! Search diagnostics routes
//!
//! Expose the matcher's intermediate state for one document so a
//! missing hit can be traced to a section, a pass, or a strategy.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::search::{SectionDump, SectionTrace};
use crate::state::AppState;

/// Create the debug router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sections/:filename", get(dump_sections))
        .route("/trace/:filename", get(trace_matches))
}

#[derive(Debug, Deserialize)]
pub struct DebugQuery {
    pub query: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

/// Per-section term containment for one document
///
/// GET /api/debug/sections/:filename?query=head+clearance
async fn dump_sections(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    Query(params): Query<DebugQuery>,
) -> Result<Json<Vec<SectionDump>>> {
    let dumps = state
        .search()
        .debug_sections(&filename, &params.query, &params.language)
        .await?;
    Ok(Json(dumps))
}

/// Per-section matcher output across both passes
///
/// GET /api/debug/trace/:filename?query=%22head+clearance%22
async fn trace_matches(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    Query(params): Query<DebugQuery>,
) -> Result<Json<Vec<SectionTrace>>> {
    let traces = state
        .search()
        .debug_trace(&filename, &params.query, &params.language)
        .await?;
    Ok(Json(traces))
}
