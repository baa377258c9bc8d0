use redis_utils::DEFAULT_SERVER_URL;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::SettingsStore;

/// Settings-store key holding the server address
pub const SERVER_URL_KEY: &str = "redis.server_url";

/// The single Redis server address configured for the deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisServerSettings {
    pub server_url: String,
}

impl Default for RedisServerSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

impl RedisServerSettings {
    pub async fn load(store: &dyn SettingsStore) -> Result<Self> {
        Ok(match store.get(SERVER_URL_KEY).await? {
            Some(server_url) => Self { server_url },
            None => Self::default(),
        })
    }

    /// Store `server_url` verbatim and persist it right away
    pub async fn update(store: &dyn SettingsStore, server_url: String) -> Result<Self> {
        store.set(SERVER_URL_KEY, server_url.clone()).await?;
        store.save().await?;
        Ok(Self { server_url })
    }
}
