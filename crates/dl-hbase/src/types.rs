//! Row-level types decoded from the Thrift wire structs.

use std::collections::BTreeMap;

use hbase_thrift::hbase::{TCell, TRowResult};
use serde::Serialize;

/// One versioned cell value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub value: Vec<u8>,
    pub timestamp: i64,
}

impl Cell {
    /// Cell value as text (invalid sequences are replaced)
    pub fn value_utf8(&self) -> String {
        String::from_utf8_lossy(&self.value).into_owned()
    }

    pub(crate) fn from_thrift(cell: TCell) -> Self {
        Self {
            value: cell.value.unwrap_or_default(),
            timestamp: cell.timestamp.unwrap_or_default(),
        }
    }
}

/// One row: key plus latest cell per "family:qualifier" column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub key: String,
    pub cells: BTreeMap<String, Cell>,
}

impl Row {
    pub(crate) fn from_thrift(result: TRowResult) -> Self {
        let key = result
            .row
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default();

        let cells = result
            .columns
            .unwrap_or_default()
            .into_iter()
            .map(|(column, cell)| {
                (
                    String::from_utf8_lossy(&column).into_owned(),
                    Cell::from_thrift(cell),
                )
            })
            .collect();

        Self { key, cells }
    }
}

/// Column family schema as reported by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnFamily {
    pub name: String,
    pub max_versions: i32,
    pub ttl_secs: i32,
}

/// Format a "family:qualifier" column spec
pub fn column_spec(family: &str, qualifier: &str) -> String {
    format!("{}:{}", family, qualifier)
}
