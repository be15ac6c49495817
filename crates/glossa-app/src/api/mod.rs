mod admin;
mod edits;
mod error;
mod health;
mod lookup;
mod media;
mod notebook;

pub use admin::import_corpus;
pub use edits::upsert_edit;
pub use error::ApiError;
pub use health::health;
pub use lookup::lookup;
pub use media::{generate_audio, generate_image};
pub use notebook::{delete_notebook_entry, list_notebook, save_notebook_entry};

use axum::http::HeaderMap;

/// Authenticated user id as asserted by the upstream auth proxy.
pub(crate) fn user_id_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Rate-limit identity: authenticated user id, else the forwarded caller
/// address, else one shared anonymous bucket.
pub(crate) fn rate_key(headers: &HeaderMap, user_id: Option<&str>) -> String {
    if let Some(user_id) = user_id {
        return format!("user:{user_id}");
    }

    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|address| format!("ip:{address}"))
        .unwrap_or_else(|| "anonymous".to_string())
}
