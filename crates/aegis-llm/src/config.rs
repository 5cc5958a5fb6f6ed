//! Runtime configuration for capability backends

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Backend configuration, one instance shared across all capability roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL (env: AEGIS_OLLAMA_URL)
    pub ollama_url: String,
    /// Model name (env: AEGIS_MODEL)
    pub model: String,
    /// Default backend ("ollama" or "mock"; env: AEGIS_PROVIDER)
    pub provider: String,
    /// Per-call deadline in seconds (env: AEGIS_CALL_TIMEOUT_SECS)
    pub call_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            ollama_url: "http://localhost:11434".to_string(),
            model: "llama3".to_string(),
            provider: "ollama".to_string(),
            call_timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ollama_url: env::var("AEGIS_OLLAMA_URL").unwrap_or(defaults.ollama_url),
            model: env::var("AEGIS_MODEL").unwrap_or(defaults.model),
            provider: env::var("AEGIS_PROVIDER").unwrap_or(defaults.provider),
            call_timeout_secs: env::var("AEGIS_CALL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.call_timeout_secs),
        }
    }

    /// The per-call deadline as a `Duration`
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    /// Available backends under this configuration
    pub fn available_providers(&self) -> Vec<&str> {
        vec!["mock", "ollama"]
    }
}
