mod cache_config;
mod config;
mod error;
mod hbase_config;
mod hdfs_config;
mod log_level;
mod logging_config;

#[cfg(test)]
mod tests;

pub use cache_config::CacheConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use hbase_config::HBaseConfig;
pub use hdfs_config::HdfsConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;

const DEFAULT_NAME_NODE_URL: &str = "http://127.0.0.1:9870";
const DEFAULT_HBASE_HOST: &str = "127.0.0.1";
const DEFAULT_HBASE_PORT: u16 = 9090;
const DEFAULT_HBASE_TABLE: &str = "t_target";
const DEFAULT_HBASE_COLUMN_FAMILY: &str = "t";
const DEFAULT_HBASE_TTL_SECS: u32 = 60 * 60 * 24 * 2;
const DEFAULT_CACHE_URL: &str = "redis://127.0.0.1:6379";
const DEFAULT_CACHE_NAMESPACE: &str = "user";
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

const MAX_HBASE_TTL_SECS: u32 = 60 * 60 * 24 * 365;
const MAX_CACHE_TTL_SECS: u64 = 60 * 60 * 24 * 365;
