//! HDFS facade over the namenode's WebHDFS REST interface.
//!
//! Every operation is a single WebHDFS call. Failures are logged and
//! collapsed to a sentinel (`false`, `None`, empty) - callers that need to
//! distinguish failure causes should not sit on top of this facade.

pub mod error;
pub mod service;
pub mod types;

pub use error::{HdfsError, Result};
pub use service::HdfsService;
pub use types::{BlockLocation, FileEntry};
