//! Chat model configuration from TOML (`[model]` section)

use serde::{Deserialize, Serialize};

/// Anthropic Messages API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Base URL for the Anthropic API.
    pub base_url: String,
    /// Model used for chat turns.
    pub model: String,
    /// Environment variable name for the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Anthropic API version header.
    pub api_version: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Per-call timeout; `None` waits indefinitely.
    pub timeout_seconds: Option<u64>,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com".to_string(),
            model: "claude-opus-4-20250514".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_key: None,
            api_version: "2023-06-01".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
            timeout_seconds: Some(120),
        }
    }
}

impl FileModelConfig {
    /// The configured key, falling back to the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }
}
