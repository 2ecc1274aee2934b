use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HBaseError {
    #[error("Thrift error: {message} {location}")]
    Thrift {
        message: String,
        location: ErrorLocation,
        #[source]
        source: thrift::Error,
    },

    #[error("Failed to connect to HBase gateway {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: thrift::Error,
    },
}

impl HBaseError {
    /// Convert thrift error with context
    #[track_caller]
    pub fn from_thrift(err: thrift::Error) -> Self {
        HBaseError::Thrift {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Connection failure against the given gateway address
    pub fn connect(addr: impl Into<String>, err: thrift::Error) -> Self {
        HBaseError::Connect {
            addr: addr.into(),
            source: err,
        }
    }
}

impl From<thrift::Error> for HBaseError {
    #[track_caller]
    fn from(err: thrift::Error) -> Self {
        HBaseError::from_thrift(err)
    }
}

pub type Result<T> = std::result::Result<T, HBaseError>;
