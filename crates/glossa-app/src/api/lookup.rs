use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use glossa_types::{LookupRequest, LookupResult};

use crate::AppState;
use crate::api::{ApiError, rate_key, user_id_from};

/// POST /api/lookup
///
/// Resolve a word through notebook → shared dictionary → encyclopedia/LLM.
/// Anonymous callers are allowed; they just skip the personalized tiers.
pub async fn lookup(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<LookupRequest>,
) -> Result<Json<LookupResult>, ApiError> {
    let user_id = user_id_from(&headers);
    let key = rate_key(&headers, user_id.as_deref());

    state
        .limiter
        .check(&key)
        .map_err(|reset_at| ApiError::RateLimited { reset_at })?;

    let result = state.resolver.resolve(request, user_id).await?;
    Ok(Json(result))
}
