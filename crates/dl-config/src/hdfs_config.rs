use crate::{ConfigError, ConfigErrorResult, DEFAULT_NAME_NODE_URL};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HdfsConfig {
    /// WebHDFS endpoint of the namenode, e.g. "http://192.168.197.130:9870"
    pub name_node_url: String,
    /// Value for the `user.name` query parameter; None = cluster default
    pub user: Option<String>,
}

impl Default for HdfsConfig {
    fn default() -> Self {
        Self {
            name_node_url: String::from(DEFAULT_NAME_NODE_URL),
            user: None,
        }
    }
}

impl HdfsConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !self.name_node_url.starts_with("http://") && !self.name_node_url.starts_with("https://")
        {
            return Err(ConfigError::hdfs(format!(
                "hdfs.name_node_url must start with http:// or https://, got {}",
                self.name_node_url
            )));
        }

        if let Some(ref user) = self.user
            && user.trim().is_empty()
        {
            return Err(ConfigError::hdfs("hdfs.user must not be blank when set"));
        }

        Ok(())
    }
}
