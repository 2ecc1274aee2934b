use crate::error::{CliError, Result as CliResult};
use crate::print_json;

use dl_hbase::{HBaseService, TableOps, TableSpec};

use clap::Subcommand;

#[derive(Subcommand)]
pub enum HBaseCommands {
    /// List every table on the cluster
    Tables,

    /// Create a table
    Create {
        table: String,

        /// Column families (at least one)
        #[arg(required = true)]
        families: Vec<String>,
    },

    /// Show the column family schemas of a table
    Describe { table: String },

    /// Check whether a table exists
    Exists { table: String },

    /// Enable a table
    Enable { table: String },

    /// Disable a table
    Disable { table: String },

    /// Disable (if needed) and delete a table
    Drop { table: String },

    /// Write one cell
    Put {
        table: String,
        row: String,
        family: String,
        qualifier: String,
        value: String,

        /// Explicit cell timestamp
        #[arg(long)]
        timestamp: Option<i64>,
    },

    /// Read one row
    Get { table: String, row: String },

    /// Read one cell (optionally several versions)
    GetCell {
        table: String,
        row: String,
        family: String,
        qualifier: String,

        /// Number of versions to fetch, newest first
        #[arg(long)]
        versions: Option<i32>,
    },

    /// Scan rows
    Scan {
        table: String,

        /// Start row key (inclusive)
        #[arg(long, default_value = "")]
        start: String,

        /// Stop row key (exclusive)
        #[arg(long)]
        stop: Option<String>,

        /// Restrict to these "family:qualifier" columns
        #[arg(long)]
        columns: Vec<String>,
    },

    /// Delete a whole row
    DeleteRow { table: String, row: String },

    /// Delete a column ("family" or "family:qualifier") from a row
    DeleteColumn {
        table: String,
        row: String,
        column: String,
    },
}

pub async fn run(action: HBaseCommands, config: &dl_config::Config, pretty: bool) -> CliResult<()> {
    let addr = config.hbase.addr();
    let spec = TableSpec {
        name: config.hbase.default_table.clone(),
        column_family: config.hbase.column_family.clone(),
        ttl_secs: config.hbase.ttl_secs,
    };

    // The Thrift client is blocking; keep it off the async runtime
    tokio::task::spawn_blocking(move || run_blocking(action, &addr, &spec, pretty)).await?
}

fn run_blocking(
    action: HBaseCommands,
    addr: &str,
    spec: &TableSpec,
    pretty: bool,
) -> CliResult<()> {
    let hbase = HBaseService::connect(addr, spec)?;

    match action {
        HBaseCommands::Tables => print_json(&hbase.table_names(), pretty),

        HBaseCommands::Create { table, families } => {
            let families: Vec<&str> = families.iter().map(String::as_str).collect();
            ok_or_failed(hbase.create_table(&table, &families))
        }

        HBaseCommands::Describe { table } => print_json(&hbase.describe_table(&table), pretty),

        HBaseCommands::Exists { table } => {
            println!("{}", hbase.table_exists(&table));
            Ok(())
        }

        HBaseCommands::Enable { table } => ok_or_failed(hbase.enable_table(&table)),

        HBaseCommands::Disable { table } => ok_or_failed(hbase.disable_table(&table)),

        HBaseCommands::Drop { table } => ok_or_failed(hbase.drop_table(&table)),

        HBaseCommands::Put {
            table,
            row,
            family,
            qualifier,
            value,
            timestamp,
        } => {
            let written = match timestamp {
                Some(ts) => hbase.put_at(&table, &row, &family, &qualifier, value.as_bytes(), ts),
                None => hbase.put(&table, &row, &family, &qualifier, value.as_bytes()),
            };
            ok_or_failed(written)
        }

        HBaseCommands::Get { table, row } => match hbase.get_row(&table, &row) {
            Some(row) => print_json(&row, pretty),
            None => Err(CliError::NotFound),
        },

        HBaseCommands::GetCell {
            table,
            row,
            family,
            qualifier,
            versions,
        } => match versions {
            Some(versions) => print_json(
                &hbase.get_cell_versions(&table, &row, &family, &qualifier, versions),
                pretty,
            ),
            None => match hbase.get_cell(&table, &row, &family, &qualifier) {
                Some(cell) => print_json(&cell, pretty),
                None => Err(CliError::NotFound),
            },
        },

        HBaseCommands::Scan {
            table,
            start,
            stop,
            columns,
        } => {
            let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
            let rows = if stop.is_none() && start.is_empty() && columns.is_empty() {
                hbase.scan(&table)
            } else {
                hbase.scan_range(&table, &start, stop.as_deref(), &columns)
            };
            print_json(&rows, pretty)
        }

        HBaseCommands::DeleteRow { table, row } => ok_or_failed(hbase.delete_row(&table, &row)),

        HBaseCommands::DeleteColumn { table, row, column } => {
            ok_or_failed(hbase.delete_column(&table, &row, &column))
        }
    }
}

fn ok_or_failed(succeeded: bool) -> CliResult<()> {
    if succeeded { Ok(()) } else { Err(CliError::Failed) }
}
