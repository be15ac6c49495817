use std::env;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_tts_model() -> String {
    "tts-1".to_string()
}

fn default_tts_voice() -> String {
    "alloy".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    5
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ProviderConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_tts_model")]
    pub tts_model: String,
    #[serde(default = "default_tts_voice")]
    pub tts_voice: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl ProviderConfig {
    pub fn new() -> Self {
        let api_url = env::var("GLOSSA_API_URL").unwrap_or_else(|_| default_api_url());
        let api_key = env::var("GLOSSA_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .unwrap_or_default();
        let model = env::var("GLOSSA_MODEL").unwrap_or_else(|_| default_model());
        let tts_model = env::var("GLOSSA_TTS_MODEL").unwrap_or_else(|_| default_tts_model());
        let tts_voice = env::var("GLOSSA_TTS_VOICE").unwrap_or_else(|_| default_tts_voice());

        let request_timeout_secs = env::var("GLOSSA_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_request_timeout_secs);

        let connect_timeout_secs = env::var("GLOSSA_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_connect_timeout_secs);

        Self {
            api_url,
            api_key,
            model,
            tts_model,
            tts_voice,
            request_timeout_secs,
            connect_timeout_secs,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
            model: default_model(),
            tts_model: default_tts_model(),
            tts_voice: default_tts_voice(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}
