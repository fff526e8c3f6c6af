//! Standards Search Server
//!
//! A search service over a directory of PDF standards documents:
//! quoted-phrase query parsing, layered phrase matching tolerant of
//! PDF extraction artifacts, French-to-English query expansion, and a
//! small LRU cache of extracted documents.

pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod query;
pub mod routes;
pub mod search;
pub mod state;
pub mod text;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/health", routes::health::router())
        .nest("/api/health", routes::health::router())
        .nest("/api/documents", routes::documents::router())
        .nest("/api/search", routes::search::router())
        .nest("/api/debug", routes::debug::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
