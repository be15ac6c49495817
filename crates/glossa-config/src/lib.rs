use std::env;

use serde::{Deserialize, Serialize};

use self::limits::LimitsConfig;
use self::provider::ProviderConfig;
use self::server::ServerConfig;

pub mod limits;
pub mod provider;
pub mod server;

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub limits: LimitsConfig,
    /// Path to a shared-dictionary corpus file imported at startup
    pub corpus_path: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        let corpus_path = env::var("GLOSSA_CORPUS_PATH").ok().filter(|p| !p.is_empty());

        Config {
            server: ServerConfig::new(),
            provider: ProviderConfig::new(),
            limits: LimitsConfig::new(),
            corpus_path,
        }
    }
}
