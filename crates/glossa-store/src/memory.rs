use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::types::{NotebookEntry, StoredDefinition, UserEdit};
use crate::{Gateway, StoreError};

fn definition_key(word: &str, target: &str, native: &str) -> (String, String, String) {
    (
        word.to_lowercase(),
        target.to_lowercase(),
        native.to_lowercase(),
    )
}

/// In-memory persistence gateway.
///
/// Entries live in per-concern maps behind `RwLock`s; every write targets a
/// uniquely-keyed row, so no cross-map transactions are needed.
#[derive(Default)]
pub struct MemoryStore {
    definitions: RwLock<HashMap<(String, String, String), StoredDefinition>>,
    notebook: RwLock<HashMap<String, Vec<NotebookEntry>>>,
    edits: RwLock<HashMap<(String, Uuid), UserEdit>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn definition_count(&self) -> usize {
        self.definitions.read().await.len()
    }
}

#[async_trait::async_trait]
impl Gateway for MemoryStore {
    async fn find_notebook_entries(
        &self,
        user_id: &str,
        word: &str,
        target_language: &str,
        native_language: &str,
    ) -> Result<Vec<NotebookEntry>, StoreError> {
        let notebook = self.notebook.read().await;
        let Some(entries) = notebook.get(user_id) else {
            return Ok(Vec::new());
        };

        let word = word.to_lowercase();
        let mut found: Vec<NotebookEntry> = entries
            .iter()
            .filter(|e| {
                e.word.to_lowercase() == word
                    && e.target_language.eq_ignore_ascii_case(target_language)
                    && e.native_language.eq_ignore_ascii_case(native_language)
            })
            .cloned()
            .collect();

        found.sort_by_key(|e| e.meaning_index.unwrap_or(u32::MAX));
        Ok(found)
    }

    async fn find_approved_definition(
        &self,
        word: &str,
        target_language: &str,
        native_language: &str,
    ) -> Result<Option<StoredDefinition>, StoreError> {
        let definitions = self.definitions.read().await;
        let key = definition_key(word, target_language, native_language);
        Ok(definitions.get(&key).filter(|d| d.approved).cloned())
    }

    async fn find_user_edit(
        &self,
        user_id: &str,
        definition_id: Uuid,
    ) -> Result<Option<UserEdit>, StoreError> {
        let edits = self.edits.read().await;
        Ok(edits.get(&(user_id.to_string(), definition_id)).cloned())
    }

    async fn save_notebook_entry(&self, entry: NotebookEntry) -> Result<NotebookEntry, StoreError> {
        let mut notebook = self.notebook.write().await;
        let entries = notebook.entry(entry.user_id.clone()).or_default();

        // One row per (word, languages, meaning index); saving again replaces it.
        entries.retain(|e| {
            !(e.word.to_lowercase() == entry.word.to_lowercase()
                && e.target_language.eq_ignore_ascii_case(&entry.target_language)
                && e.native_language.eq_ignore_ascii_case(&entry.native_language)
                && e.meaning_index == entry.meaning_index)
        });
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn list_notebook(&self, user_id: &str) -> Result<Vec<NotebookEntry>, StoreError> {
        let notebook = self.notebook.read().await;
        Ok(notebook.get(user_id).cloned().unwrap_or_default())
    }

    async fn delete_notebook_entry(&self, user_id: &str, id: Uuid) -> Result<(), StoreError> {
        let mut notebook = self.notebook.write().await;
        let Some(entries) = notebook.get_mut(user_id) else {
            return Err(StoreError::NotFound(format!("notebook entry {id}")));
        };

        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(StoreError::NotFound(format!("notebook entry {id}")));
        }
        Ok(())
    }

    async fn upsert_user_edit(&self, edit: UserEdit) -> Result<UserEdit, StoreError> {
        let mut edits = self.edits.write().await;
        edits.insert((edit.user_id.clone(), edit.definition_id), edit.clone());
        Ok(edit)
    }

    async fn import_definitions(
        &self,
        entries: Vec<StoredDefinition>,
    ) -> Result<usize, StoreError> {
        let mut definitions = self.definitions.write().await;
        let count = entries.len();
        for entry in entries {
            let key = definition_key(&entry.word, &entry.target_language, &entry.native_language);
            definitions.insert(key, entry);
        }
        Ok(count)
    }
}
