use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use crate::image::ImageSearch;
use crate::prompt;
use crate::{DefinitionRequest, GeneratedDefinition, Provider, ProviderError};

/// Connection settings for an OpenAI-compatible API.
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub tts_model: String,
    pub tts_voice: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

/// Provider adapter backed by an OpenAI-compatible chat-completion and speech
/// API, plus keyless image search.
pub struct OpenAiProvider {
    client: reqwest::Client,
    settings: OpenAiSettings,
    images: ImageSearch,
}

impl OpenAiProvider {
    pub fn new(settings: OpenAiSettings) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .connect_timeout(settings.connect_timeout)
            .build()?;

        let images = ImageSearch::new(settings.request_timeout)?;

        Ok(Self {
            client,
            settings,
            images,
        })
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        if self.settings.api_key.is_empty() {
            return Err(ProviderError::Authentication);
        }

        let body = json!({
            "model": self.settings.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "temperature": 0.3,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.settings.api_url))
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await?;

        match response.status().as_u16() {
            429 => return Err(ProviderError::RateLimited),
            401 | 403 => return Err(ProviderError::Authentication),
            status if !response.status().is_success() => {
                return Err(ProviderError::Api(format!("HTTP {status}")));
            }
            _ => {}
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| ProviderError::Api(format!("failed to parse response: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::Api("no choices in response".to_string()))
    }
}

#[async_trait::async_trait]
impl Provider for OpenAiProvider {
    async fn generate_definition(
        &self,
        request: &DefinitionRequest,
    ) -> Result<GeneratedDefinition, ProviderError> {
        let system = prompt::definition_system_prompt();
        let user = prompt::definition_user_prompt(request);

        let content = self.complete(&system, &user).await?;
        parse_definition(&content)
    }

    async fn generate_image(&self, prompt_text: &str, meaning_context: Option<&str>) -> Option<String> {
        let query = prompt::image_query(prompt_text, meaning_context);
        self.images.find(&query).await
    }

    async fn generate_audio(&self, text: &str, language: &str) -> Vec<u8> {
        if self.settings.api_key.is_empty() {
            tracing::debug!("speech synthesis skipped: no API key");
            return Vec::new();
        }

        let body = json!({
            "model": self.settings.tts_model,
            "voice": self.settings.tts_voice,
            "input": text,
        });

        let response = self
            .client
            .post(format!("{}/audio/speech", self.settings.api_url))
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => match response.bytes().await {
                Ok(bytes) => bytes.to_vec(),
                Err(e) => {
                    tracing::warn!("failed to read speech bytes: {e}");
                    Vec::new()
                }
            },
            Ok(response) => {
                tracing::warn!(
                    "speech synthesis for language '{}' returned HTTP {}",
                    language,
                    response.status()
                );
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("speech synthesis request failed: {e}");
                Vec::new()
            }
        }
    }
}

/// Parse the model's structured completion, tolerating a code fence around
/// the JSON object.
pub fn parse_definition(content: &str) -> Result<GeneratedDefinition, ProviderError> {
    let stripped = strip_code_fence(content);

    let generated: GeneratedDefinition = serde_json::from_str(stripped)
        .map_err(|e| ProviderError::Malformed(format!("{e}: {stripped}")))?;

    if generated.definition_target.trim().is_empty() && generated.definition.trim().is_empty() {
        return Err(ProviderError::Malformed("empty definition".to_string()));
    }

    Ok(generated)
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // drop the info string ("json") up to the first newline
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}
