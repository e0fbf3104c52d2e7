use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use dinr_config::DinrConfig;
use dinr_db::DinrDb;
use dinr_engine::VotingEngine;

/// The voting engine with every store slot backed by the same database.
pub type Engine = VotingEngine<Arc<DinrDb>, Arc<DinrDb>, Arc<DinrDb>>;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub db: Arc<DinrDb>,
    pub engine: Engine,
}

impl AppContext {
    /// Open the configured database and wire the engine over it.
    pub async fn init(config: DinrConfig) -> anyhow::Result<Self> {
        let path = &config.database.path;
        if !config.database.is_in_memory() {
            if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create database directory {}", parent.display())
                })?;
            }
        }

        let db = Arc::new(
            DinrDb::open_local(path)
                .await
                .with_context(|| format!("failed to open database at {path}"))?,
        );

        if config.general.seed_on_open && db.seed_sample_data().await? {
            tracing::info!("seeded sample data on open");
        }

        let engine = VotingEngine::new(Arc::clone(&db), Arc::clone(&db), Arc::clone(&db))
            .with_retry(config.voting.retry_config());

        Ok(Self { db, engine })
    }
}
