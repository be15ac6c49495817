pub mod loader;
pub mod memory;
pub mod types;

pub use loader::CorpusLoader;
pub use memory::MemoryStore;
pub use types::{NotebookEntry, StoredDefinition, UserEdit};

use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid corpus format: {0}")]
    InvalidFormat(#[from] serde_json::Error),
}

/// Persistence operations the resolver and the HTTP layer depend on.
///
/// Reads back the three lookup tiers; writes are explicit operations, each
/// scoped to a uniquely-keyed row. Lookup never writes: the shared dictionary
/// grows only through `import_definitions` (admin bulk import).
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    /// Personal saved entries for an exact (word, target, native) triple.
    async fn find_notebook_entries(
        &self,
        user_id: &str,
        word: &str,
        target_language: &str,
        native_language: &str,
    ) -> Result<Vec<NotebookEntry>, StoreError>;

    /// Approved shared-dictionary entry for an exact triple.
    async fn find_approved_definition(
        &self,
        word: &str,
        target_language: &str,
        native_language: &str,
    ) -> Result<Option<StoredDefinition>, StoreError>;

    /// Per-user override tied to a shared-dictionary entry.
    async fn find_user_edit(
        &self,
        user_id: &str,
        definition_id: Uuid,
    ) -> Result<Option<UserEdit>, StoreError>;

    async fn save_notebook_entry(&self, entry: NotebookEntry) -> Result<NotebookEntry, StoreError>;

    async fn list_notebook(&self, user_id: &str) -> Result<Vec<NotebookEntry>, StoreError>;

    async fn delete_notebook_entry(&self, user_id: &str, id: Uuid) -> Result<(), StoreError>;

    async fn upsert_user_edit(&self, edit: UserEdit) -> Result<UserEdit, StoreError>;

    /// Bulk-import shared-dictionary entries; later entries override earlier
    /// ones with the same (word, target, native) key. Returns the number of
    /// entries written.
    async fn import_definitions(
        &self,
        entries: Vec<StoredDefinition>,
    ) -> Result<usize, StoreError>;
}
