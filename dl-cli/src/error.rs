use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] dl_config::ConfigError),

    #[error("{0}")]
    Hdfs(#[from] dl_hdfs::HdfsError),

    #[error("{0}")]
    HBase(#[from] dl_hbase::HBaseError),

    #[error("{0}")]
    Cache(#[from] dl_cache::CacheError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Logging error: {message}")]
    Logging { message: String },

    #[error("operation failed (see log output)")]
    Failed,

    #[error("not found")]
    NotFound,
}

pub type Result<T> = std::result::Result<T, CliError>;
