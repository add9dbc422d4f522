//! Environment variable API key lookup.
//!
//! Resolution order:
//! 1. The variable named by `assistant.api_key_env` (default `HYDROWATT_API_KEY`)
//! 2. `OPENAI_API_KEY`
//!
//! Empty or whitespace-only values, and values that are not valid Unicode,
//! count as absent.

use secrecy::SecretString;
use tracing::debug;

/// Conventional variable checked after the configured one.
pub const FALLBACK_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Resolve the provider API key from the process environment.
pub fn resolve_api_key(api_key_env: &str) -> Option<SecretString> {
    resolve_api_key_with(api_key_env, |name| std::env::var(name).ok())
}

/// Resolve the API key using `lookup` in place of the process environment.
pub fn resolve_api_key_with(
    api_key_env: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<SecretString> {
    let mut candidates = vec![api_key_env];
    if api_key_env != FALLBACK_API_KEY_ENV {
        candidates.push(FALLBACK_API_KEY_ENV);
    }

    for name in candidates {
        match lookup(name) {
            Some(value) if !value.trim().is_empty() => {
                debug!(env = name, "API key found");
                return Some(SecretString::from(value.trim().to_string()));
            }
            _ => {}
        }
    }
    debug!(env = api_key_env, "No API key configured");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_configured_variable_wins() {
        let key = resolve_api_key_with(
            "HYDROWATT_API_KEY",
            lookup_in(&[("HYDROWATT_API_KEY", "hw-key"), ("OPENAI_API_KEY", "oa-key")]),
        )
        .unwrap();
        assert_eq!(key.expose_secret(), "hw-key");
    }

    #[test]
    fn test_falls_back_to_openai_key() {
        let key =
            resolve_api_key_with("HYDROWATT_API_KEY", lookup_in(&[("OPENAI_API_KEY", "oa-key")]))
                .unwrap();
        assert_eq!(key.expose_secret(), "oa-key");
    }

    #[test]
    fn test_empty_value_counts_as_absent() {
        let key = resolve_api_key_with(
            "HYDROWATT_API_KEY",
            lookup_in(&[("HYDROWATT_API_KEY", "   "), ("OPENAI_API_KEY", "")]),
        );
        assert!(key.is_none());
    }

    #[test]
    fn test_missing_everywhere() {
        assert!(resolve_api_key_with("MY_KEY", lookup_in(&[])).is_none());
    }

    #[test]
    fn test_process_environment_lookup() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("HYDROWATT_TEST_KEY_7731", "from-env") };
        let key = resolve_api_key("HYDROWATT_TEST_KEY_7731").unwrap();
        assert_eq!(key.expose_secret(), "from-env");
        // SAFETY: set above in this test.
        unsafe { std::env::remove_var("HYDROWATT_TEST_KEY_7731") };
    }
}
