//! Application state wiring the reply engine to its data source and provider.
//!
//! AppState holds the concrete instances used by both the CLI and the HTTP
//! server. The engine is generic over its usage source; AppState pins it to
//! the SQLite implementation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::warn;

use hydrowatt_core::assistant::engine::{ReplySettings, StreamingReplyEngine};
use hydrowatt_core::llm::box_provider::BoxLlmProvider;
use hydrowatt_infra::config::{database_url, load_global_config, resolve_data_dir};
use hydrowatt_infra::llm::build_provider;
use hydrowatt_infra::secret::env::resolve_api_key;
use hydrowatt_infra::sqlite::pool::DatabasePool;
use hydrowatt_infra::sqlite::usage::SqliteUsageSource;
use hydrowatt_types::config::GlobalConfig;

/// The reply engine pinned to the SQLite usage source.
pub type ConcreteReplyEngine = StreamingReplyEngine<SqliteUsageSource>;

/// Shared application state.
///
/// Used by both CLI commands and HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ConcreteReplyEngine>,
    pub config: Arc<GlobalConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: load config, open the database,
    /// resolve the API key and build the provider.
    ///
    /// A misconfigured provider is not fatal: the assistant falls back to
    /// offline replies and the problem is logged.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let config = load_global_config(&data_dir).await;

        let url = database_url(&config, &data_dir);
        let pool = DatabasePool::new(&url)
            .await
            .context("failed to open the usage database")?;

        let api_key = resolve_api_key(&config.assistant.api_key_env);
        let provider = match build_provider(&config.assistant, api_key) {
            Ok(provider) => provider,
            Err(e) => {
                warn!(error = %e, "Assistant provider misconfigured, using offline replies");
                None
            }
        };

        Ok(Self::from_parts(
            config,
            data_dir,
            SqliteUsageSource::new(pool),
            provider,
        ))
    }

    /// Assemble state from already-built parts.
    pub fn from_parts(
        config: GlobalConfig,
        data_dir: PathBuf,
        source: SqliteUsageSource,
        provider: Option<BoxLlmProvider>,
    ) -> Self {
        let settings = ReplySettings::from(&config.assistant);
        Self {
            engine: Arc::new(StreamingReplyEngine::new(source, provider, settings)),
            config: Arc::new(config),
            data_dir,
        }
    }

    /// The SQLite source behind the engine, for direct writes.
    pub fn usage_source(&self) -> &SqliteUsageSource {
        self.engine.aggregator().source()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// State over a fresh database in `dir`, without a provider.
    pub async fn offline_state(dir: &std::path::Path) -> AppState {
        let url = format!("sqlite://{}?mode=rwc", dir.join("test.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        AppState::from_parts(
            GlobalConfig::default(),
            dir.to_path_buf(),
            SqliteUsageSource::new(pool),
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::offline_state;

    #[tokio::test]
    async fn test_from_parts_without_provider() {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(dir.path()).await;
        assert!(state.engine.provider_name().is_none());
        assert_eq!(state.engine.settings().history_limit, 8);
    }
}
