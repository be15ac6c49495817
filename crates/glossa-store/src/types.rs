use glossa_types::ExamplePair;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the curated shared dictionary.
///
/// Stored flattened: a polysemous word keeps its senses encoded in the
/// definition strings ("1. ... 2. ...") and is split at lookup time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDefinition {
    pub id: Uuid,
    pub word: String,
    pub target_language: String,
    pub native_language: String,
    pub definition_target: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub examples: Vec<ExamplePair>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_note: Option<String>,
    /// Only approved entries are visible to lookups.
    #[serde(default)]
    pub approved: bool,
}

/// One saved word in a user's personal notebook.
///
/// A word saved with several senses becomes one row per meaning index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotebookEntry {
    pub id: Uuid,
    pub user_id: String,
    pub word: String,
    pub target_language: String,
    pub native_language: String,
    pub definition_target: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub examples: Vec<ExamplePair>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning_index: Option<u32>,
}

/// A per-user override of a shared-dictionary entry.
///
/// String fields left blank fall back to the base entry's value; an empty
/// example list keeps the base examples.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEdit {
    pub id: Uuid,
    pub user_id: String,
    pub definition_id: Uuid,
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
