//! Global configuration loader for Hydrowatt.
//!
//! Reads `config.toml` from the data directory (`~/.hydrowatt/` in production)
//! and deserializes it into [`GlobalConfig`]. Falls back to sensible defaults
//! when the file is missing or malformed.

use std::path::{Path, PathBuf};

use hydrowatt_types::config::GlobalConfig;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "HYDROWATT_DATA_DIR";

/// Resolve the data directory: `HYDROWATT_DATA_DIR` if set and non-empty,
/// otherwise `~/.hydrowatt` (or `./.hydrowatt` when no home is known).
pub fn resolve_data_dir() -> PathBuf {
    match std::env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".hydrowatt"),
    }
}

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// The usage database URL: the configured override, or
/// `sqlite://{data_dir}/hydrowatt.db`.
pub fn database_url(config: &GlobalConfig, data_dir: &Path) -> String {
    match config.database_url.as_deref() {
        Some(url) if !url.trim().is_empty() => url.to_string(),
        _ => format!("sqlite://{}?mode=rwc", data_dir.join("hydrowatt.db").display()),
    }
}
