use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HBASE_COLUMN_FAMILY, DEFAULT_HBASE_HOST,
    DEFAULT_HBASE_PORT, DEFAULT_HBASE_TABLE, DEFAULT_HBASE_TTL_SECS, MAX_HBASE_TTL_SECS,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HBaseConfig {
    /// Thrift gateway host
    pub host: String,
    /// Thrift gateway port
    pub port: u16,
    /// Table provisioned once at connection time
    pub default_table: String,
    /// Column family of the provisioned table (short names keep cells small)
    pub column_family: String,
    /// TTL applied to the provisioned column family
    pub ttl_secs: u32,
}

impl Default for HBaseConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HBASE_HOST),
            port: DEFAULT_HBASE_PORT,
            default_table: String::from(DEFAULT_HBASE_TABLE),
            column_family: String::from(DEFAULT_HBASE_COLUMN_FAMILY),
            ttl_secs: DEFAULT_HBASE_TTL_SECS,
        }
    }
}

impl HBaseConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::hbase("hbase.host must not be empty"));
        }

        if self.port == 0 {
            return Err(ConfigError::hbase("hbase.port must be non-zero"));
        }

        if self.default_table.trim().is_empty() {
            return Err(ConfigError::hbase("hbase.default_table must not be empty"));
        }

        if self.column_family.trim().is_empty() || self.column_family.contains(':') {
            return Err(ConfigError::hbase(format!(
                "hbase.column_family must be non-empty and must not contain ':', got {:?}",
                self.column_family
            )));
        }

        if self.ttl_secs == 0 || self.ttl_secs > MAX_HBASE_TTL_SECS {
            return Err(ConfigError::hbase(format!(
                "hbase.ttl_secs must be 1-{}, got {}",
                MAX_HBASE_TTL_SECS, self.ttl_secs
            )));
        }

        Ok(())
    }

    /// Gateway address as host:port
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
