//! Generation provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat-completions endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable name for the API key (default: "ARK_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended; prefer the env var).
    pub api_key: Option<String>,
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    /// Model or endpoint id sent with every request.
    pub model: String,
    /// Sampling temperature for discussion turns.
    pub temperature: f32,
    /// Sampling temperature for the closing summary.
    pub summary_temperature: f32,
    /// Max tokens per response; provider default when unset.
    pub max_tokens: Option<u32>,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ARK_API_KEY".to_string(),
            api_key: None,
            base_url: "https://ark.cn-beijing.volces.com/api/v3".to_string(),
            model: String::new(),
            temperature: 0.7,
            summary_temperature: 0.4,
            max_tokens: None,
            timeout_seconds: 120,
        }
    }
}

impl FileProviderConfig {
    /// Explicit `api_key` wins over the environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}
