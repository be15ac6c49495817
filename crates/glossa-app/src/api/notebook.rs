use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use glossa_store::NotebookEntry;
use glossa_types::ExamplePair;
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::api::{ApiError, user_id_from};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveNotebookRequest {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub target_language: String,
    #[serde(default)]
    pub native_language: String,
    #[serde(default)]
    pub definition_target: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub examples: Vec<ExamplePair>,
    #[serde(default)]
    pub usage_note: Option<String>,
    /// Set when saving one sense of a multi-meaning word.
    #[serde(default)]
    pub meaning_index: Option<u32>,
}

/// POST /api/notebook
pub async fn save_notebook_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SaveNotebookRequest>,
) -> Result<Json<NotebookEntry>, ApiError> {
    let user_id = user_id_from(&headers).ok_or(ApiError::Unauthorized)?;

    if request.word.trim().is_empty() {
        return Err(ApiError::Validation("word must not be empty".to_string()));
    }
    if request.target_language.trim().is_empty() || request.native_language.trim().is_empty() {
        return Err(ApiError::Validation(
            "targetLanguage and nativeLanguage are required".to_string(),
        ));
    }

    let entry = NotebookEntry {
        id: Uuid::new_v4(),
        user_id,
        word: request.word.trim().to_string(),
        target_language: request.target_language.trim().to_string(),
        native_language: request.native_language.trim().to_string(),
        definition_target: request.definition_target,
        definition: request.definition,
        phonetic: request.phonetic,
        examples: request.examples,
        usage_note: request.usage_note,
        meaning_index: request.meaning_index,
    };

    let saved = state.gateway.save_notebook_entry(entry).await?;
    Ok(Json(saved))
}

/// GET /api/notebook
pub async fn list_notebook(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<NotebookEntry>>, ApiError> {
    let user_id = user_id_from(&headers).ok_or(ApiError::Unauthorized)?;
    let entries = state.gateway.list_notebook(&user_id).await?;
    Ok(Json(entries))
}

/// DELETE /api/notebook/:id
pub async fn delete_notebook_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let user_id = user_id_from(&headers).ok_or(ApiError::Unauthorized)?;
    state.gateway.delete_notebook_entry(&user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
