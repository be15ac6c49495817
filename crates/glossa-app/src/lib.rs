//! glossa-app - HTTP service for the word-lookup resolution pipeline
//!
//! Thin axum layer over glossa-core: one lookup route plus the explicit
//! write operations (notebook, user edits, admin corpus import) and the
//! caller-initiated media routes.

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod rate_limit;
pub mod state;

pub use state::AppState;

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/lookup", post(api::lookup))
        .route("/api/image", post(api::generate_image))
        .route("/api/audio", post(api::generate_audio))
        .route(
            "/api/notebook",
            post(api::save_notebook_entry).get(api::list_notebook),
        )
        .route("/api/notebook/:id", delete(api::delete_notebook_entry))
        .route("/api/definitions/:id/edit", put(api::upsert_edit))
        .route("/api/admin/import", post(api::import_corpus))
        .route("/health", get(api::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
