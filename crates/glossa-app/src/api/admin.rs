use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use glossa_store::CorpusLoader;
use serde_json::{Value, json};

use crate::AppState;
use crate::api::ApiError;

/// POST /api/admin/import
///
/// Bulk-import curated entries into the shared dictionary. This is the only
/// path by which the shared corpus grows; lookups never write to it.
pub async fn import_corpus(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<Value>, ApiError> {
    authorize_admin(&state, &headers)?;

    let entries = CorpusLoader::parse(&body)
        .map_err(|e| ApiError::Validation(format!("invalid corpus: {e}")))?;

    let imported = state.gateway.import_definitions(entries).await?;
    tracing::info!("Imported {imported} shared-dictionary entries via admin API");

    Ok(Json(json!({ "imported": imported })))
}

fn authorize_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    // empty token disables the check (local development, tests)
    if state.admin_token.is_empty() {
        return Ok(());
    }

    let provided = headers
        .get("x-admin-token")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if provided == state.admin_token {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}
