use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Redis error: {message} {location}")]
    Redis {
        message: String,
        location: ErrorLocation,
        #[source]
        source: redis::RedisError,
    },

    #[error("JSON error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },
}

impl CacheError {
    /// Convert redis error with context
    #[track_caller]
    pub fn from_redis(err: redis::RedisError) -> Self {
        CacheError::Redis {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        CacheError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }
}

impl From<redis::RedisError> for CacheError {
    #[track_caller]
    fn from(err: redis::RedisError) -> Self {
        CacheError::from_redis(err)
    }
}

impl From<serde_json::Error> for CacheError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        CacheError::from_json(err)
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
