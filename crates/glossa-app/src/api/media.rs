use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::api::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    #[serde(default)]
    pub word: String,
    /// Sense the image should illustrate; echoed back to the client's cache
    /// key, the actual scoping happens through `context`.
    #[serde(default)]
    pub meaning_index: Option<u32>,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    /// Empty when no image was found.
    pub image_url: String,
}

/// POST /api/image
///
/// Caller-initiated image generation, keyed by word + optional meaning
/// index. Lookup itself never triggers this.
pub async fn generate_image(
    State(state): State<AppState>,
    Json(request): Json<ImageRequest>,
) -> Result<Json<ImageResponse>, ApiError> {
    if request.word.trim().is_empty() {
        return Err(ApiError::Validation("word must not be empty".to_string()));
    }

    let image_url = state
        .provider
        .generate_image(request.word.trim(), request.context.as_deref())
        .await
        .unwrap_or_default();

    if image_url.is_empty() {
        tracing::debug!(
            word = %request.word,
            meaning_index = ?request.meaning_index,
            "no image found"
        );
    }

    Ok(Json(ImageResponse { image_url }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub language: String,
}

/// POST /api/audio
///
/// Returns synthesized speech, or 204 when synthesis is unavailable and the
/// client should fall back to local speech synthesis.
pub async fn generate_audio(
    State(state): State<AppState>,
    Json(request): Json<AudioRequest>,
) -> Result<Response, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::Validation("text must not be empty".to_string()));
    }

    let audio = state
        .provider
        .generate_audio(&request.text, &request.language)
        .await;

    if audio.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response())
}
