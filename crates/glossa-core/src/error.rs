use glossa_provider::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("invalid input: {0}")]
    Validation(String),

    /// The provider is the last fallback tier; when it fails, the lookup
    /// fails as a whole.
    #[error("generation failed: {0}")]
    Generation(#[from] ProviderError),
}
