//! Global configuration types for Hydrowatt.
//!
//! `GlobalConfig` represents the top-level `config.toml`. All fields have
//! sensible defaults so an empty or missing file is valid.

use serde::{Deserialize, Serialize};

use crate::llm::ProviderType;

/// Top-level configuration.
///
/// Loaded from `~/.hydrowatt/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Assistant provider and request settings.
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Override for the usage database URL (defaults to `{data_dir}/hydrowatt.db`).
    #[serde(default)]
    pub database_url: Option<String>,
}

/// Settings for the assistant's completion provider.
///
/// The API key itself never lives in this file; `api_key_env` names the
/// environment variable it is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_provider")]
    pub provider: ProviderType,

    /// Override the preset's base URL (required for `custom`).
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// How many prior messages are sent with each request.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_provider() -> ProviderType {
    ProviderType::OpenAi
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_history_limit() -> usize {
    8
}

fn default_api_key_env() -> String {
    "HYDROWATT_API_KEY".to_string()
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: None,
            model: default_model(),
            temperature: default_temperature(),
            history_limit: default_history_limit(),
            api_key_env: default_api_key_env(),
        }
    }
}
