pub mod image;
pub mod openai;
pub mod prompt;
pub mod wikipedia;

pub use image::ImageSearch;
pub use openai::OpenAiProvider;
pub use wikipedia::WikipediaClient;

use glossa_types::ExamplePair;
use serde::Deserialize;

/// Inputs for one definition generation.
#[derive(Debug, Clone)]
pub struct DefinitionRequest {
    pub word: String,
    pub target_language: String,
    pub native_language: String,
    /// Authoritative context (e.g. an encyclopedia summary) the generation
    /// must stay consistent with.
    pub seed_text: Option<String>,
}

fn default_valid() -> bool {
    true
}

/// Structured output of a definition generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDefinition {
    pub definition_target: String,
    pub definition: String,
    #[serde(default)]
    pub examples: Vec<ExamplePair>,
    #[serde(default)]
    pub usage_note: Option<String>,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default = "default_valid")]
    pub is_valid_word: bool,
    #[serde(default)]
    pub suggested_word: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("authentication rejected")]
    Authentication,

    #[error("provider rate limit exceeded")]
    RateLimited,

    #[error("malformed completion: {0}")]
    Malformed(String),
}

/// Generation provider interface.
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Generate a structured definition for the exact input word.
    ///
    /// The word is never substituted: an unrecognized word comes back with
    /// `is_valid_word = false` (and possibly a `suggested_word`), but the
    /// definition text still describes the word as typed.
    async fn generate_definition(
        &self,
        request: &DefinitionRequest,
    ) -> Result<GeneratedDefinition, ProviderError>;

    /// Find an illustrative image. `None` is the defined not-found signal;
    /// this never fails.
    async fn generate_image(&self, prompt: &str, meaning_context: Option<&str>) -> Option<String>;

    /// Synthesize speech. An empty buffer means "unavailable, let the client
    /// fall back to local synthesis"; this never fails.
    async fn generate_audio(&self, text: &str, language: &str) -> Vec<u8>;
}

/// Encyclopedia summary source used as the pre-LLM fallback tier.
#[async_trait::async_trait]
pub trait Encyclopedia: Send + Sync {
    /// Fetch a short summary for a word, if one exists. The caller bounds
    /// this with its own timeout and treats failure as "no summary".
    async fn fetch_summary(
        &self,
        word: &str,
        language: &str,
    ) -> Result<Option<String>, ProviderError>;
}
