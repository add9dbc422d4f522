//! Configuration and per-provider presets for OpenAI-compatible providers.
//!
//! Each backend that speaks the OpenAI chat completions protocol gets a
//! factory function returning an [`OpenAiCompatConfig`] with its base URL.

use secrecy::SecretString;

use hydrowatt_types::llm::ProviderType;

/// Configuration for an [`super::OpenAiCompatibleProvider`].
///
/// Does NOT derive Debug: it carries the API key.
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai", "gemini").
    pub provider_name: String,
    /// Base URL the `/chat/completions` path is appended to.
    pub base_url: String,
    pub api_key: SecretString,
}

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const MISTRAL_BASE_URL: &str = "https://api.mistral.ai/v1";

/// OpenAI: `https://api.openai.com/v1`
pub fn openai_defaults(api_key: SecretString) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: OPENAI_BASE_URL.into(),
        api_key,
    }
}

/// Google Gemini (OpenAI-compatible beta endpoint).
pub fn gemini_defaults(api_key: SecretString) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "gemini".into(),
        base_url: GEMINI_BASE_URL.into(),
        api_key,
    }
}

/// Mistral AI: `https://api.mistral.ai/v1`
pub fn mistral_defaults(api_key: SecretString) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "mistral".into(),
        base_url: MISTRAL_BASE_URL.into(),
        api_key,
    }
}

/// Preset base URL for a provider type. `Custom` has none.
pub fn preset_base_url(provider: ProviderType) -> Option<&'static str> {
    match provider {
        ProviderType::OpenAi => Some(OPENAI_BASE_URL),
        ProviderType::Gemini => Some(GEMINI_BASE_URL),
        ProviderType::Mistral => Some(MISTRAL_BASE_URL),
        ProviderType::Custom => None,
    }
}

/// Join a base URL and the completions path without doubling slashes.
pub fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let key = || SecretString::from("k".to_string());
        assert_eq!(openai_defaults(key()).base_url, "https://api.openai.com/v1");
        assert_eq!(gemini_defaults(key()).provider_name, "gemini");
        assert_eq!(mistral_defaults(key()).base_url, "https://api.mistral.ai/v1");
        assert_eq!(preset_base_url(ProviderType::Custom), None);
    }

    #[test]
    fn test_completions_url() {
        assert_eq!(
            completions_url("https://api.openai.com/v1"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            completions_url("http://localhost:11434/v1/"),
            "http://localhost:11434/v1/chat/completions"
        );
    }
}
