use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors that can occur against the WebHDFS endpoint
#[derive(Error, Debug)]
pub enum HdfsError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Remote error: {exception}: {message} {location}")]
    Remote {
        exception: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Protocol error: {message} {location}")]
    Protocol {
        message: String,
        location: ErrorLocation,
    },
}

impl HdfsError {
    /// Convert reqwest error with context
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        HdfsError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        HdfsError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// IO error with the local path it concerns
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        HdfsError::Io {
            path: path.into(),
            source: err,
        }
    }

    /// Create a protocol error with location
    #[track_caller]
    pub fn protocol<S: Into<String>>(message: S) -> Self {
        HdfsError::Protocol {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// True when the remote side reported the path as absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, HdfsError::Remote { exception, .. } if exception == "FileNotFoundException")
    }
}

impl From<reqwest::Error> for HdfsError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        HdfsError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for HdfsError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        HdfsError::from_json(err)
    }
}

pub type Result<T> = std::result::Result<T, HdfsError>;
