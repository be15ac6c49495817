use std::env;

use serde::{Deserialize, Serialize};

fn default_bind_addr() -> String {
    "127.0.0.1:8900".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Shared secret for admin routes; empty disables the check
    #[serde(default)]
    pub admin_token: String,
}

impl ServerConfig {
    pub fn new() -> Self {
        let bind_addr = env::var("GLOSSA_BIND_ADDR").unwrap_or_else(|_| default_bind_addr());
        let admin_token = env::var("GLOSSA_ADMIN_TOKEN").unwrap_or_default();

        Self {
            bind_addr,
            admin_token,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            admin_token: String::new(),
        }
    }
}
