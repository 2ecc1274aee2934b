//! HBase facade over the cluster's Thrift gateway.
//!
//! One shared connection sits behind a mutex; construction provisions the
//! configured default table once. Operations log failures and return a
//! sentinel (`false`, `None`, empty), mirroring the rest of the workspace.

pub mod error;
pub mod ops;
pub mod service;
pub mod types;

pub use error::{HBaseError, Result};
pub use ops::TableOps;
pub use service::{HBaseService, TableSpec};
pub use types::{Cell, ColumnFamily, Row};
