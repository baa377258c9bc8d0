//! Key-value persistence for global settings
//!
//! Callers stage values with [`SettingsStore::set`] and make them durable with
//! [`SettingsStore::save`]. Reads see staged values immediately.

mod file;
mod memory;
mod postgres;

pub use file::FileSettingsStore;
pub use memory::MemorySettingsStore;
pub use postgres::PgSettingsStore;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{SettingsBackend, SettingsConfig};
use crate::db::Database;
use crate::error::Result;

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: String) -> Result<()>;

    async fn save(&self) -> Result<()>;
}

/// Open the store selected by `settings.backend`
pub async fn open_store(config: &SettingsConfig) -> anyhow::Result<Arc<dyn SettingsStore>> {
    let store: Arc<dyn SettingsStore> = match config.backend {
        SettingsBackend::Memory => {
            tracing::warn!("Using in-memory settings store, changes are lost on restart");
            Arc::new(MemorySettingsStore::new())
        }
        SettingsBackend::File => {
            let store = FileSettingsStore::open(&config.path).await?;
            tracing::info!(path = %config.path.display(), "File settings store opened");
            Arc::new(store)
        }
        SettingsBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("settings.database_url is not set"))?;
            let db = Database::connect(url, config.max_connections).await?;
            db.run_migrations().await?;
            Arc::new(PgSettingsStore::new(db.pg))
        }
    };

    Ok(store)
}
