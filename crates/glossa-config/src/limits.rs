use std::env;

use serde::{Deserialize, Serialize};

fn default_rate_limit_requests() -> u32 {
    30
}

fn default_rate_limit_window_secs() -> u64 {
    60
}

fn default_sweep_interval_secs() -> u64 {
    120
}

fn default_encyclopedia_timeout_ms() -> u64 {
    2000
}

fn default_word_max_chars() -> usize {
    100
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LimitsConfig {
    /// Lookup budget per identity within one window
    #[serde(default = "default_rate_limit_requests")]
    pub rate_limit_requests: u32,
    #[serde(default = "default_rate_limit_window_secs")]
    pub rate_limit_window_secs: u64,
    /// How often stale rate-limit keys are evicted
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    /// Hard cap on the encyclopedia fallback fetch
    #[serde(default = "default_encyclopedia_timeout_ms")]
    pub encyclopedia_timeout_ms: u64,
    #[serde(default = "default_word_max_chars")]
    pub word_max_chars: usize,
}

impl LimitsConfig {
    pub fn new() -> Self {
        let rate_limit_requests = env::var("GLOSSA_RATE_LIMIT_REQUESTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_rate_limit_requests);

        let rate_limit_window_secs = env::var("GLOSSA_RATE_LIMIT_WINDOW_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_rate_limit_window_secs);

        let sweep_interval_secs = env::var("GLOSSA_SWEEP_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_sweep_interval_secs);

        let encyclopedia_timeout_ms = env::var("GLOSSA_ENCYCLOPEDIA_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_encyclopedia_timeout_ms);

        let word_max_chars = env::var("GLOSSA_WORD_MAX_CHARS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_word_max_chars);

        Self {
            rate_limit_requests,
            rate_limit_window_secs,
            sweep_interval_secs,
            encyclopedia_timeout_ms,
            word_max_chars,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            rate_limit_requests: default_rate_limit_requests(),
            rate_limit_window_secs: default_rate_limit_window_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            encyclopedia_timeout_ms: default_encyclopedia_timeout_ms(),
            word_max_chars: default_word_max_chars(),
        }
    }
}
