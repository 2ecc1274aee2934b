use crate::error::{CacheError, Result as CacheResult};

use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Namespaced JSON value cache on Redis.
///
/// Keys take the form `<namespace>:<id>`; values are serde_json documents.
/// The connection manager reconnects on its own after a broken link.
#[derive(Clone)]
pub struct RedisCache {
    manager: ConnectionManager,
    namespace: String,
    ttl_secs: u64,
}

impl RedisCache {
    /// Connect and hold a managed connection.
    ///
    /// # Arguments
    /// * `url` - Redis URL (e.g., "redis://127.0.0.1:6379")
    /// * `namespace` - Key prefix for every entry
    /// * `ttl_secs` - Expiry for cached entries (0 = no expiry)
    pub async fn connect(url: &str, namespace: &str, ttl_secs: u64) -> CacheResult<Self> {
        let client = redis::Client::open(url)?;
        let manager = ConnectionManager::new(client).await?;

        Ok(Self {
            manager,
            namespace: namespace.to_string(),
            ttl_secs,
        })
    }

    fn key(&self, id: i64) -> String {
        format!("{}:{}", self.namespace, id)
    }

    /// Fetch and decode a cached entry
    pub async fn fetch<T: DeserializeOwned>(&self, id: i64) -> CacheResult<Option<T>> {
        let mut conn = self.manager.clone();
        let payload: Option<String> = conn.get(self.key(id)).await?;

        payload
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(CacheError::from_json)
    }

    /// Store an entry, applying the configured TTL
    pub async fn put<T: Serialize>(&self, id: i64, value: &T) -> CacheResult<()> {
        let json = serde_json::to_string(value)?;
        let mut conn = self.manager.clone();

        if self.ttl_secs > 0 {
            conn.set_ex::<_, _, ()>(self.key(id), json, self.ttl_secs)
                .await?;
        } else {
            conn.set::<_, _, ()>(self.key(id), json).await?;
        }

        Ok(())
    }

    /// Drop an entry. Returns true when something was removed.
    pub async fn evict(&self, id: i64) -> CacheResult<bool> {
        let mut conn = self.manager.clone();
        let removed: i64 = conn.del(self.key(id)).await?;
        Ok(removed > 0)
    }
}
