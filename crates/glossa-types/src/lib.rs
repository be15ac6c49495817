use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which tier of the resolution pipeline produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Database,
    UserEdit,
    Llm,
    Wikipedia,
    Notebook,
}

/// An example sentence with its translation, optionally tied to one sense.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamplePair {
    pub sentence: String,
    #[serde(default)]
    pub translation: String,
    /// 1-based sense this example belongs to, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning_index: Option<u32>,
}

/// One sense of a polysemous word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordMeaning {
    /// 1-based position, unique within a result.
    pub meaning_index: u32,
    pub definition_target: String,
    pub definition: String,
    #[serde(default)]
    pub examples: Vec<ExamplePair>,
    /// Generated lazily and independently per meaning, never during lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// The outcome of resolving one search term.
///
/// Constructed fresh on every request and never mutated afterwards. When
/// `meanings` holds more than one sense, the top-level definition and example
/// fields are the concatenation/superset of the per-meaning fields, not a
/// separate sense of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    /// Exact trimmed user input, never auto-corrected.
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    pub definition_target: String,
    pub definition: String,
    /// Populated only when more than one sense was detected.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meanings: Vec<WordMeaning>,
    #[serde(default)]
    pub examples: Vec<ExamplePair>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_note: Option<String>,
    pub is_valid_word: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_word: Option<String>,
    pub source: Source,
    /// Back-reference to a shared-dictionary row; present only for
    /// `database` and `user_edit` results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_definition_id: Option<Uuid>,
}

/// Body of a lookup request.
///
/// The field-level defaults route missing fields into validation (400)
/// instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub target_language: String,
    #[serde(default)]
    pub native_language: String,
    /// Bypass the notebook and shared-dictionary tiers.
    #[serde(default, rename = "forceAI")]
    pub force_ai: bool,
    /// Accepted for wire compatibility; lookup never generates images.
    #[serde(default)]
    pub skip_image: bool,
}
