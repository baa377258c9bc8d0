use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::SettingsStore;
use crate::error::Result;

/// Process-local store; `save` has nothing to flush
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn save(&self) -> Result<()> {
        Ok(())
    }
}
