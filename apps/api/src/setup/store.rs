//! Persisted merchant config. Redis when configured, process memory otherwise.

use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use crate::setup::models::MerchantConfig;

/// Fixed key the serialized config lives under.
pub const CONFIG_KEY: &str = "reply-assistant:merchant-config";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Stored config is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Read on startup, written on setup submission, deleted on a confirmed clear.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn load(&self) -> Result<Option<MerchantConfig>, StoreError>;
    async fn save(&self, config: &MerchantConfig) -> Result<(), StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

pub struct RedisConfigStore {
    client: redis::Client,
}

impl RedisConfigStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ConfigStore for RedisConfigStore {
    async fn load(&self) -> Result<Option<MerchantConfig>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(CONFIG_KEY).await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, config: &MerchantConfig) -> Result<(), StoreError> {
        let json = serde_json::to_string(config)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(CONFIG_KEY, json).await?;
        info!("Saved merchant config for '{}'", config.app_name);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(CONFIG_KEY).await?;
        info!("Deleted saved merchant config");
        Ok(())
    }
}

/// Keeps the config for the lifetime of the process only.
#[derive(Default)]
pub struct MemoryConfigStore {
    config: Mutex<Option<MerchantConfig>>,
}

#[cfg(test)]
impl MemoryConfigStore {
    pub fn with_config(config: MerchantConfig) -> Self {
        Self {
            config: Mutex::new(Some(config)),
        }
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn load(&self) -> Result<Option<MerchantConfig>, StoreError> {
        Ok(self.config.lock().await.clone())
    }

    async fn save(&self, config: &MerchantConfig) -> Result<(), StoreError> {
        *self.config.lock().await = Some(config.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.config.lock().await = None;
        Ok(())
    }
}
