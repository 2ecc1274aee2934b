use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_CACHE_NAMESPACE, DEFAULT_CACHE_TTL_SECS,
    DEFAULT_CACHE_URL, MAX_CACHE_TTL_SECS,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,
    /// Key prefix; entries are stored as "<namespace>:<id>"
    pub namespace: String,
    /// Entry TTL in seconds (0 = no expiry)
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_CACHE_URL),
            namespace: String::from(DEFAULT_CACHE_NAMESPACE),
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !self.url.starts_with("redis://") && !self.url.starts_with("rediss://") {
            return Err(ConfigError::cache(format!(
                "cache.url must start with redis:// or rediss://, got {}",
                self.url
            )));
        }

        if self.namespace.trim().is_empty() {
            return Err(ConfigError::cache("cache.namespace must not be empty"));
        }

        if self.ttl_secs > MAX_CACHE_TTL_SECS {
            return Err(ConfigError::cache(format!(
                "cache.ttl_secs must be at most {}, got {}",
                MAX_CACHE_TTL_SECS, self.ttl_secs
            )));
        }

        Ok(())
    }
}
