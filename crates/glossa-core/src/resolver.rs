use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use glossa_provider::{DefinitionRequest, Encyclopedia, Provider};
use glossa_store::{Gateway, NotebookEntry, StoreError, UserEdit};
use glossa_types::{ExamplePair, LookupRequest, LookupResult, Source, WordMeaning};
use uuid::Uuid;

use crate::distribute::distribute_examples;
use crate::error::LookupError;
use crate::meanings::parse_meanings;
use crate::preprocess::normalize_word;

/// Resolver tuning, sourced from configuration.
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    pub word_max_chars: usize,
    /// Hard cap on the encyclopedia fallback fetch; a slow summary must not
    /// hold up the whole lookup.
    pub encyclopedia_timeout: Duration,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            word_max_chars: 100,
            encyclopedia_timeout: Duration::from_secs(2),
        }
    }
}

/// One lookup request after validation and preprocessing.
#[derive(Debug, Clone)]
struct LookupInput {
    word: String,
    target_language: String,
    native_language: String,
    force_ai: bool,
    user_id: Option<String>,
}

/// Stored-data tiers, tried strictly in this order before the external
/// fallback. New tiers slot into `CACHED_TIERS` without touching control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Notebook,
    Dictionary,
}

const CACHED_TIERS: [Tier; 2] = [Tier::Notebook, Tier::Dictionary];

/// Resolved content before sense parsing and example distribution.
struct Resolved {
    definition_target: String,
    definition: String,
    phonetic: Option<String>,
    examples: Vec<ExamplePair>,
    usage_note: Option<String>,
    is_valid_word: bool,
    suggested_word: Option<String>,
    source: Source,
    word_definition_id: Option<Uuid>,
}

/// Orchestrates a single word lookup across the resolution tiers.
///
/// Each request's working state is exclusively owned by that request; the
/// resolver itself holds only shared handles to its collaborators.
pub struct Resolver {
    gateway: Arc<dyn Gateway>,
    provider: Arc<dyn Provider>,
    encyclopedia: Arc<dyn Encyclopedia>,
    options: ResolverOptions,
}

impl Resolver {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        provider: Arc<dyn Provider>,
        encyclopedia: Arc<dyn Encyclopedia>,
        options: ResolverOptions,
    ) -> Self {
        Self {
            gateway,
            provider,
            encyclopedia,
            options,
        }
    }

    /// Resolve one search term to a fresh [`LookupResult`].
    ///
    /// The returned `word` is always the trimmed input, regardless of which
    /// tier produced the content.
    pub async fn resolve(
        &self,
        request: LookupRequest,
        user_id: Option<String>,
    ) -> Result<LookupResult, LookupError> {
        let word = normalize_word(&request.word);
        if word.is_empty() {
            return Err(LookupError::Validation("word must not be empty".to_string()));
        }
        if word.chars().count() > self.options.word_max_chars {
            return Err(LookupError::Validation(format!(
                "word exceeds {} characters",
                self.options.word_max_chars
            )));
        }

        let target_language = request.target_language.trim().to_string();
        let native_language = request.native_language.trim().to_string();
        if target_language.is_empty() || native_language.is_empty() {
            return Err(LookupError::Validation(
                "targetLanguage and nativeLanguage are required".to_string(),
            ));
        }

        let input = LookupInput {
            word,
            target_language,
            native_language,
            force_ai: request.force_ai,
            user_id,
        };

        let mut resolved = None;
        if !input.force_ai {
            for tier in CACHED_TIERS {
                match self.try_cached_tier(tier, &input).await {
                    Ok(Some(hit)) => {
                        resolved = Some(hit);
                        break;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        // missing stored data degrades gracefully; only the
                        // generation tier is allowed to fail the lookup
                        tracing::warn!("{tier:?} tier degraded, continuing: {e}");
                    }
                }
            }
        }

        let resolved = match resolved {
            Some(resolved) => resolved,
            None => self.from_external(&input).await?,
        };

        Ok(assemble(&input, resolved))
    }

    async fn try_cached_tier(
        &self,
        tier: Tier,
        input: &LookupInput,
    ) -> Result<Option<Resolved>, StoreError> {
        match tier {
            Tier::Notebook => self.from_notebook(input).await,
            Tier::Dictionary => self.from_dictionary(input).await,
        }
    }

    /// Tier 1: the user's own saved entries.
    async fn from_notebook(&self, input: &LookupInput) -> Result<Option<Resolved>, StoreError> {
        let Some(user_id) = input.user_id.as_deref() else {
            return Ok(None);
        };

        let entries = self
            .gateway
            .find_notebook_entries(
                user_id,
                &input.word,
                &input.target_language,
                &input.native_language,
            )
            .await?;

        if entries.is_empty() {
            return Ok(None);
        }

        let distinct_indices: BTreeSet<u32> =
            entries.iter().filter_map(|e| e.meaning_index).collect();

        let resolved = if entries.len() > 1 && distinct_indices.len() == entries.len() {
            merge_notebook_entries(&entries)
        } else {
            resolved_from_notebook(&entries[0])
        };

        Ok(Some(resolved))
    }

    /// Tier 2: the curated shared dictionary, with a per-user edit overlay.
    async fn from_dictionary(&self, input: &LookupInput) -> Result<Option<Resolved>, StoreError> {
        let Some(entry) = self
            .gateway
            .find_approved_definition(&input.word, &input.target_language, &input.native_language)
            .await?
        else {
            return Ok(None);
        };

        let mut resolved = Resolved {
            definition_target: entry.definition_target,
            definition: entry.definition,
            phonetic: entry.phonetic,
            examples: entry.examples,
            usage_note: entry.usage_note,
            is_valid_word: true,
            suggested_word: None,
            source: Source::Database,
            word_definition_id: Some(entry.id),
        };

        if let Some(user_id) = input.user_id.as_deref() {
            match self.gateway.find_user_edit(user_id, entry.id).await {
                Ok(Some(edit)) => {
                    apply_user_edit(&mut resolved, &edit);
                    resolved.source = Source::UserEdit;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("user edit lookup degraded, using base entry: {e}");
                }
            }
        }

        Ok(Some(resolved))
    }

    /// Tier 3: encyclopedia summary, then LLM generation.
    ///
    /// Results from this tier are returned to the caller but never written
    /// into the shared dictionary; the corpus grows only by explicit admin
    /// import.
    async fn from_external(&self, input: &LookupInput) -> Result<Resolved, LookupError> {
        let summary = match tokio::time::timeout(
            self.options.encyclopedia_timeout,
            self.encyclopedia
                .fetch_summary(&input.word, &input.target_language),
        )
        .await
        {
            Ok(Ok(summary)) => summary,
            Ok(Err(e)) => {
                tracing::warn!("encyclopedia fetch failed, continuing without summary: {e}");
                None
            }
            Err(_) => {
                tracing::debug!(
                    "encyclopedia fetch timed out after {:?}",
                    self.options.encyclopedia_timeout
                );
                None
            }
        };

        let request = DefinitionRequest {
            word: input.word.clone(),
            target_language: input.target_language.clone(),
            native_language: input.native_language.clone(),
            seed_text: summary.clone(),
        };

        let generated = self.provider.generate_definition(&request).await?;

        let source = if summary.is_some() {
            Source::Wikipedia
        } else {
            Source::Llm
        };

        // the summary, when present, is the authoritative definition text;
        // the provider only backfills around it
        let definition_target = match summary {
            Some(summary) => summary,
            None => generated.definition_target,
        };

        Ok(Resolved {
            definition_target,
            definition: generated.definition,
            phonetic: generated.phonetic,
            examples: generated
                .examples
                .into_iter()
                .filter(|example| !example.sentence.trim().is_empty())
                .collect(),
            usage_note: generated.usage_note,
            is_valid_word: generated.is_valid_word,
            suggested_word: generated.suggested_word,
            source,
            word_definition_id: None,
        })
    }
}

/// Merge per-meaning notebook rows into one multi-sense result.
fn merge_notebook_entries(entries: &[NotebookEntry]) -> Resolved {
    let mut target_parts = Vec::with_capacity(entries.len());
    let mut native_parts = Vec::with_capacity(entries.len());
    let mut examples = Vec::new();

    for (position, entry) in entries.iter().enumerate() {
        let index = (position + 1) as u32;
        target_parts.push(format!("{index}. {}", entry.definition_target.trim()));
        native_parts.push(format!("{index}. {}", entry.definition.trim()));
        examples.extend(
            entry
                .examples
                .iter()
                .filter(|example| !example.sentence.trim().is_empty())
                .map(|example| ExamplePair {
                    meaning_index: Some(index),
                    ..example.clone()
                }),
        );
    }

    Resolved {
        definition_target: target_parts.join(" "),
        definition: native_parts.join(" "),
        phonetic: entries
            .iter()
            .find_map(|e| e.phonetic.clone().filter(|p| !p.is_empty())),
        examples,
        usage_note: entries
            .iter()
            .find_map(|e| e.usage_note.clone().filter(|n| !n.is_empty())),
        is_valid_word: true,
        suggested_word: None,
        source: Source::Notebook,
        word_definition_id: None,
    }
}

fn resolved_from_notebook(entry: &NotebookEntry) -> Resolved {
    Resolved {
        definition_target: entry.definition_target.clone(),
        definition: entry.definition.clone(),
        phonetic: entry.phonetic.clone(),
        examples: entry
            .examples
            .iter()
            .filter(|example| !example.sentence.trim().is_empty())
            .cloned()
            .collect(),
        usage_note: entry.usage_note.clone(),
        is_valid_word: true,
        suggested_word: None,
        source: Source::Notebook,
        word_definition_id: None,
    }
}

/// Overlay an edit onto the base entry: the edit wins field by field, with
/// blank fields falling back to the base value.
fn apply_user_edit(resolved: &mut Resolved, edit: &UserEdit) {
    if !edit.definition_target.trim().is_empty() {
        resolved.definition_target = edit.definition_target.clone();
    }
    if !edit.definition.trim().is_empty() {
        resolved.definition = edit.definition.clone();
    }
    if !edit.phonetic.trim().is_empty() {
        resolved.phonetic = Some(edit.phonetic.clone());
    }
    if !edit.usage_note.trim().is_empty() {
        resolved.usage_note = Some(edit.usage_note.clone());
    }
    if !edit.examples.is_empty() {
        resolved.examples = edit.examples.clone();
    }
}

/// Parse senses, distribute examples, and build the final result.
fn assemble(input: &LookupInput, resolved: Resolved) -> LookupResult {
    let pairs = parse_meanings(&resolved.definition_target, &resolved.definition);

    let meanings = if pairs.len() > 1 {
        let buckets = distribute_examples(&resolved.examples, pairs.len());
        pairs
            .into_iter()
            .zip(buckets)
            .enumerate()
            .map(|(position, (pair, examples))| WordMeaning {
                meaning_index: (position + 1) as u32,
                definition_target: pair.definition_target,
                definition: pair.definition,
                examples,
                image_url: None,
            })
            .collect()
    } else {
        Vec::new()
    };

    LookupResult {
        word: input.word.clone(),
        phonetic: resolved.phonetic.filter(|p| !p.trim().is_empty()),
        definition_target: resolved.definition_target,
        definition: resolved.definition,
        meanings,
        examples: resolved.examples,
        usage_note: resolved.usage_note.filter(|n| !n.trim().is_empty()),
        is_valid_word: resolved.is_valid_word,
        suggested_word: resolved.suggested_word.filter(|s| !s.trim().is_empty()),
        source: resolved.source,
        word_definition_id: resolved.word_definition_id,
    }
}
