//! llama.cpp client configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default base URL of the llama.cpp server
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration for the llama.cpp generation client
///
/// Probes are cheap liveness checks and use a short timeout; generation is
/// slow and gets a longer one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlamaConfig {
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub probe_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl LlamaConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_tokens: 500,
            temperature: 0.7,
            top_p: 0.95,
            probe_timeout_secs: 5,
            request_timeout_secs: 30,
        }
    }

    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let base_url =
            env::var("LLAMA_SERVER_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for LlamaConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
