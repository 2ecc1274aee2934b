//! The table/row operation surface of the HBase facade.

use crate::types::{Cell, ColumnFamily, Row};

/// CRUD-style operations against HBase tables and rows.
///
/// Implementations log failures and return a sentinel; a `false`, `None` or
/// empty result does not distinguish "absent" from "operation failed".
pub trait TableOps {
    /// Names of every table known to the cluster
    fn table_names(&self) -> Vec<String>;

    /// Create a table with the given column families
    fn create_table(&self, name: &str, families: &[&str]) -> bool;

    /// Column family schemas of a table
    fn describe_table(&self, name: &str) -> Vec<ColumnFamily>;

    fn table_exists(&self, name: &str) -> bool;

    fn enable_table(&self, name: &str) -> bool;

    fn disable_table(&self, name: &str) -> bool;

    /// Disable (when needed) and delete a table
    fn drop_table(&self, name: &str) -> bool;

    /// Write one cell
    fn put(&self, table: &str, row: &str, family: &str, qualifier: &str, value: &[u8]) -> bool;

    /// Write one cell at an explicit timestamp
    fn put_at(
        &self,
        table: &str,
        row: &str,
        family: &str,
        qualifier: &str,
        value: &[u8],
        timestamp: i64,
    ) -> bool;

    /// Latest cells of one row
    fn get_row(&self, table: &str, row: &str) -> Option<Row>;

    /// Latest version of one cell
    fn get_cell(&self, table: &str, row: &str, family: &str, qualifier: &str) -> Option<Cell>;

    /// Up to `versions` versions of one cell, newest first
    fn get_cell_versions(
        &self,
        table: &str,
        row: &str,
        family: &str,
        qualifier: &str,
        versions: i32,
    ) -> Vec<Cell>;

    /// Every row of a table
    fn scan(&self, table: &str) -> Vec<Row>;

    /// Rows in `[start, stop)`, restricted to the given columns when non-empty
    fn scan_range(&self, table: &str, start: &str, stop: Option<&str>, columns: &[&str])
    -> Vec<Row>;

    /// Delete a whole row
    fn delete_row(&self, table: &str, row: &str) -> bool;

    /// Delete a column ("family" or "family:qualifier") from a row
    fn delete_column(&self, table: &str, row: &str, column: &str) -> bool;
}
