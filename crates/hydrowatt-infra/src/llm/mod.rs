//! LLM provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`]
//! trait defined in `hydrowatt-core`, plus [`build_provider`], which turns
//! the `[assistant]` config section and an optional API key into the
//! provider the reply engine is constructed with.
//!
//! [`LlmProvider`]: hydrowatt_core::llm::provider::LlmProvider

pub mod openai_compat;

use secrecy::SecretString;
use tracing::info;

use hydrowatt_core::llm::box_provider::BoxLlmProvider;
use hydrowatt_types::config::AssistantConfig;
use hydrowatt_types::llm::{LlmError, ProviderType};

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{OpenAiCompatConfig, preset_base_url};

/// Build the assistant's provider.
///
/// Returns `Ok(None)` without an API key: the engine then answers from its
/// keyword fallback. A configured `base_url` overrides the preset;
/// `custom` requires one.
pub fn build_provider(
    config: &AssistantConfig,
    api_key: Option<SecretString>,
) -> Result<Option<BoxLlmProvider>, LlmError> {
    let Some(api_key) = api_key else {
        info!("No API key configured, assistant will use offline replies");
        return Ok(None);
    };

    let base_url = match (config.base_url.as_deref(), preset_base_url(config.provider)) {
        (Some(url), _) if !url.trim().is_empty() => url.trim().to_string(),
        (_, Some(preset)) => preset.to_string(),
        _ => {
            return Err(LlmError::InvalidRequest(format!(
                "provider '{}' requires assistant.base_url",
                config.provider
            )));
        }
    };

    let provider = OpenAiCompatibleProvider::new(OpenAiCompatConfig {
        provider_name: config.provider.to_string(),
        base_url,
        api_key,
    })?;

    info!(
        provider = %config.provider,
        url = provider.completions_url(),
        model = %config.model,
        "Assistant provider configured"
    );
    Ok(Some(BoxLlmProvider::new(provider)))
}

/// Whether `provider` needs an explicit base URL to be usable.
pub fn requires_base_url(provider: ProviderType) -> bool {
    preset_base_url(provider).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> Option<SecretString> {
        Some(SecretString::from("sk-test".to_string()))
    }

    #[test]
    fn test_no_key_selects_fallback() {
        let provider = build_provider(&AssistantConfig::default(), None).unwrap();
        assert!(provider.is_none());
    }

    #[test]
    fn test_preset_provider() {
        let config = AssistantConfig {
            provider: ProviderType::Gemini,
            ..Default::default()
        };
        let provider = build_provider(&config, key()).unwrap().unwrap();
        assert_eq!(provider.name(), "gemini");
    }

    #[test]
    fn test_custom_requires_base_url() {
        let config = AssistantConfig {
            provider: ProviderType::Custom,
            ..Default::default()
        };
        assert!(requires_base_url(ProviderType::Custom));
        assert!(matches!(
            build_provider(&config, key()),
            Err(LlmError::InvalidRequest(_))
        ));

        let config = AssistantConfig {
            provider: ProviderType::Custom,
            base_url: Some("http://localhost:11434/v1".to_string()),
            ..Default::default()
        };
        let provider = build_provider(&config, key()).unwrap().unwrap();
        assert_eq!(provider.name(), "custom");
    }
}
