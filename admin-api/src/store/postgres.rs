use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::SettingsStore;
use crate::error::Result;

/// Settings rows in the `global_settings` table.
///
/// `set` only stages a value; `save` upserts everything staged in one transaction.
pub struct PgSettingsStore {
    pool: PgPool,
    staged: Mutex<HashMap<String, String>>,
}

impl PgSettingsStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            staged: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if let Some(value) = self.staged.lock().await.get(key) {
            return Ok(Some(value.clone()));
        }

        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM global_settings WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.staged.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn save(&self) -> Result<()> {
        let mut staged = self.staged.lock().await;
        if staged.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for (key, value) in staged.iter() {
            sqlx::query(
                r#"
                INSERT INTO global_settings (key, value, updated_at)
                VALUES ($1, $2, NOW())
                ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
                "#,
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::debug!(entries = staged.len(), "Settings saved to database");
        staged.clear();
        Ok(())
    }
}
