use std::path::Path;

use glossa_types::ExamplePair;
use serde::Deserialize;
use uuid::Uuid;

use crate::types::StoredDefinition;
use crate::StoreError;

// JSON structure of a corpus file prepared for bulk import
#[derive(Debug, Deserialize)]
struct CorpusJson {
    entries: Vec<CorpusJsonEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CorpusJsonEntry {
    word: String,
    target_language: String,
    native_language: String,
    definition_target: String,
    definition: String,
    #[serde(default)]
    phonetic: Option<String>,
    #[serde(default)]
    examples: Vec<ExamplePair>,
    #[serde(default)]
    usage_note: Option<String>,
}

pub struct CorpusLoader;

impl CorpusLoader {
    /// Load a corpus file into importable shared-dictionary entries.
    ///
    /// Everything that comes through bulk import is admin-curated, so the
    /// entries are marked approved.
    pub fn load_from_file(path: &Path) -> Result<Vec<StoredDefinition>, StoreError> {
        tracing::info!("Loading dictionary corpus from file: {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let entries = Self::parse(&json)?;
        tracing::info!("Loaded {} corpus entries from file", entries.len());
        Ok(entries)
    }

    pub fn parse(json: &str) -> Result<Vec<StoredDefinition>, StoreError> {
        let corpus: CorpusJson = serde_json::from_str(json)?;
        Ok(corpus
            .entries
            .into_iter()
            .map(|entry| StoredDefinition {
                id: Uuid::new_v4(),
                word: entry.word,
                target_language: entry.target_language,
                native_language: entry.native_language,
                definition_target: entry.definition_target,
                definition: entry.definition,
                phonetic: entry.phonetic,
                examples: entry.examples,
                usage_note: entry.usage_note,
                approved: true,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_corpus_entries() {
        let json = r#"{
            "entries": [
                {
                    "word": "bank",
                    "targetLanguage": "en",
                    "nativeLanguage": "de",
                    "definitionTarget": "1. a financial institution 2. the edge of a river",
                    "definition": "1. die Bank 2. das Ufer",
                    "examples": [
                        {"sentence": "I went to the bank.", "translation": "Ich ging zur Bank.", "meaningIndex": 1}
                    ]
                }
            ]
        }"#;

        let entries = CorpusLoader::parse(json).expect("corpus should parse");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].approved);
        assert_eq!(entries[0].word, "bank");
        assert_eq!(entries[0].examples[0].meaning_index, Some(1));
    }

    #[test]
    fn rejects_malformed_corpus() {
        assert!(CorpusLoader::parse("{\"entries\": 3}").is_err());
    }
}
