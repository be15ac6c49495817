use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use glossa_store::UserEdit;
use glossa_types::ExamplePair;
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::api::{ApiError, user_id_from};

/// Blank fields keep the base entry's values at lookup time.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    #[serde(default)]
    pub definition_target: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub phonetic: String,
    #[serde(default)]
    pub usage_note: String,
    #[serde(default)]
    pub examples: Vec<ExamplePair>,
}

/// PUT /api/definitions/:id/edit
///
/// Upsert the caller's override of a shared-dictionary entry. One row per
/// (user, entry); saving again replaces it.
pub async fn upsert_edit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(definition_id): Path<Uuid>,
    Json(request): Json<EditRequest>,
) -> Result<Json<UserEdit>, ApiError> {
    let user_id = user_id_from(&headers).ok_or(ApiError::Unauthorized)?;

    let edit = UserEdit {
        id: Uuid::new_v4(),
        user_id,
        definition_id,
        definition_target: request.definition_target,
        definition: request.definition,
        phonetic: request.phonetic,
        usage_note: request.usage_note,
        examples: request.examples,
    };

    let saved = state.gateway.upsert_user_edit(edit).await?;
    Ok(Json(saved))
}
