use crate::{CacheConfig, ConfigError, ConfigErrorResult, HBaseConfig, HdfsConfig, LoggingConfig};

use std::path::PathBuf;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub hdfs: HdfsConfig,
    pub hbase: HBaseConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for DL_CONFIG_DIR env var, else use ./.datalake/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply DL_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        // Auto-create config directory
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: DL_CONFIG_DIR env var > ./.datalake/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("DL_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".datalake"))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.hdfs.validate()?;
        self.hbase.validate()?;
        self.cache.validate()?;

        Ok(())
    }

    /// Log configuration summary (NEVER logs credentials embedded in URLs).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  hdfs: {} (user: {})",
            self.hdfs.name_node_url,
            self.hdfs.user.as_deref().unwrap_or("-")
        );
        info!(
            "  hbase: {} (table: {}, family: {}, ttl: {}s)",
            self.hbase.addr(),
            self.hbase.default_table,
            self.hbase.column_family,
            self.hbase.ttl_secs
        );
        info!(
            "  cache: namespace={}, ttl={}s",
            self.cache.namespace, self.cache.ttl_secs
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Hdfs
        Self::apply_env_string("DL_HDFS_NAME_NODE_URL", &mut self.hdfs.name_node_url);
        Self::apply_env_option_string("DL_HDFS_USER", &mut self.hdfs.user);

        // HBase
        Self::apply_env_string("DL_HBASE_HOST", &mut self.hbase.host);
        Self::apply_env_parse("DL_HBASE_PORT", &mut self.hbase.port);
        Self::apply_env_string("DL_HBASE_DEFAULT_TABLE", &mut self.hbase.default_table);
        Self::apply_env_string("DL_HBASE_COLUMN_FAMILY", &mut self.hbase.column_family);
        Self::apply_env_parse("DL_HBASE_TTL_SECS", &mut self.hbase.ttl_secs);

        // Cache
        Self::apply_env_string("DL_CACHE_URL", &mut self.cache.url);
        Self::apply_env_string("DL_CACHE_NAMESPACE", &mut self.cache.namespace);
        Self::apply_env_parse("DL_CACHE_TTL_SECS", &mut self.cache.ttl_secs);

        // Logging
        Self::apply_env_parse("DL_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("DL_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("DL_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
