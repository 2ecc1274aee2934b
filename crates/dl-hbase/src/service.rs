use crate::error::{HBaseError, Result as HBaseResult};
use crate::ops::TableOps;
use crate::types::{Cell, ColumnFamily, Row, column_spec};

use std::collections::BTreeMap;
use std::sync::Mutex;

use hbase_thrift::hbase::{ColumnDescriptor, HbaseSyncClient, Mutation, THbaseSyncClient};
use log::{error, info, warn};
use thrift::protocol::{TBinaryInputProtocol, TBinaryOutputProtocol};
use thrift::transport::{
    ReadHalf, TBufferedReadTransport, TBufferedWriteTransport, TIoChannel, TTcpChannel, WriteHalf,
};

/// Rows fetched per scanner round-trip
const SCAN_BATCH: i32 = 64;

type GatewayClient = HbaseSyncClient<
    TBinaryInputProtocol<TBufferedReadTransport<ReadHalf<TTcpChannel>>>,
    TBinaryOutputProtocol<TBufferedWriteTransport<WriteHalf<TTcpChannel>>>,
>;

/// Table provisioned once when the connection comes up
#[derive(Debug, Clone)]
pub struct TableSpec {
    pub name: String,
    pub column_family: String,
    pub ttl_secs: u32,
}

/// HBase facade over one shared Thrift gateway connection.
///
/// The Thrift client is not safe for concurrent use, so every operation
/// holds the mutex for the duration of its round-trip.
pub struct HBaseService {
    client: Mutex<GatewayClient>,
}

impl HBaseService {
    /// Connect to the gateway and provision the default table if it is
    /// missing.
    pub fn connect(addr: &str, spec: &TableSpec) -> HBaseResult<Self> {
        let mut channel = TTcpChannel::new();
        channel
            .open(addr)
            .map_err(|e| HBaseError::connect(addr, e))?;
        let (input_chan, output_chan) = channel.split()?;

        let mut client = HbaseSyncClient::new(
            TBinaryInputProtocol::new(TBufferedReadTransport::new(input_chan), true),
            TBinaryOutputProtocol::new(TBufferedWriteTransport::new(output_chan), true),
        );

        provision(&mut client, spec)?;

        Ok(Self {
            client: Mutex::new(client),
        })
    }

    /// Run one gateway round-trip under the connection mutex
    fn with_client<T>(
        &self,
        run: impl FnOnce(&mut GatewayClient) -> HBaseResult<T>,
    ) -> HBaseResult<T> {
        let mut client = self
            .client
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        run(&mut client)
    }

    fn try_scan(
        &self,
        table: &str,
        start: &str,
        stop: Option<&str>,
        columns: &[&str],
    ) -> HBaseResult<Vec<Row>> {
        let column_specs: Vec<Vec<u8>> = columns.iter().map(|column| text(column)).collect();

        self.with_client(|client| {
            let scanner = match stop {
                Some(stop) => client.scanner_open_with_stop(
                    text(table),
                    text(start),
                    text(stop),
                    column_specs,
                    attributes(),
                )?,
                None => client.scanner_open(text(table), text(start), column_specs, attributes())?,
            };

            let mut rows = Vec::new();
            let outcome = loop {
                match client.scanner_get_list(scanner, SCAN_BATCH) {
                    Ok(batch) if batch.is_empty() => break Ok(()),
                    Ok(batch) => rows.extend(batch.into_iter().map(Row::from_thrift)),
                    Err(e) => break Err(HBaseError::from(e)),
                }
            };

            // Close even after a failed fetch; the server holds the lease otherwise
            if let Err(e) = client.scanner_close(scanner) {
                warn!("Failed to close HBase scanner {}: {}", scanner, e);
            }

            outcome.map(|_| rows)
        })
    }
}

impl TableOps for HBaseService {
    fn table_names(&self) -> Vec<String> {
        match self.with_client(|client| Ok(client.get_table_names()?)) {
            Ok(names) => names
                .into_iter()
                .map(|name| String::from_utf8_lossy(&name).into_owned())
                .collect(),
            Err(e) => {
                error!("Failed to list HBase tables: {}", e);
                Vec::new()
            }
        }
    }

    fn create_table(&self, name: &str, families: &[&str]) -> bool {
        let descriptors = families
            .iter()
            .map(|family| family_descriptor(family, 3, i32::MAX))
            .collect();

        match self.with_client(|client| Ok(client.create_table(text(name), descriptors)?)) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to create HBase table, table: {}: {}", name, e);
                false
            }
        }
    }

    fn describe_table(&self, name: &str) -> Vec<ColumnFamily> {
        match self.with_client(|client| Ok(client.get_column_descriptors(text(name))?)) {
            Ok(descriptors) => descriptors
                .into_values()
                .map(|descriptor| ColumnFamily {
                    name: descriptor
                        .name
                        .map(|bytes| {
                            String::from_utf8_lossy(&bytes)
                                .trim_end_matches(':')
                                .to_string()
                        })
                        .unwrap_or_default(),
                    max_versions: descriptor.max_versions.unwrap_or(3),
                    ttl_secs: descriptor.time_to_live.unwrap_or(i32::MAX),
                })
                .collect(),
            Err(e) => {
                error!("Failed to describe HBase table, table: {}: {}", name, e);
                Vec::new()
            }
        }
    }

    fn table_exists(&self, name: &str) -> bool {
        match self.with_client(|client| Ok(client.get_table_names()?)) {
            Ok(names) => names.iter().any(|table| table.as_slice() == name.as_bytes()),
            Err(e) => {
                error!("Failed to check HBase table existence, table: {}: {}", name, e);
                false
            }
        }
    }

    fn enable_table(&self, name: &str) -> bool {
        match self.with_client(|client| Ok(client.enable_table(text(name))?)) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to enable HBase table, table: {}: {}", name, e);
                false
            }
        }
    }

    fn disable_table(&self, name: &str) -> bool {
        match self.with_client(|client| Ok(client.disable_table(text(name))?)) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to disable HBase table, table: {}: {}", name, e);
                false
            }
        }
    }

    fn drop_table(&self, name: &str) -> bool {
        let result = self.with_client(|client| {
            if client.is_table_enabled(text(name))? {
                client.disable_table(text(name))?;
            }
            Ok(client.delete_table(text(name))?)
        });

        match result {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to drop HBase table, table: {}: {}", name, e);
                false
            }
        }
    }

    fn put(&self, table: &str, row: &str, family: &str, qualifier: &str, value: &[u8]) -> bool {
        let mutations = vec![cell_mutation(family, qualifier, value)];

        let result = self.with_client(|client| {
            Ok(client.mutate_row(text(table), text(row), mutations, attributes())?)
        });

        match result {
            Ok(()) => true,
            Err(e) => {
                error!(
                    "Failed to put HBase cell, table: {}, row: {}, column: {}: {}",
                    table,
                    row,
                    column_spec(family, qualifier),
                    e
                );
                false
            }
        }
    }

    fn put_at(
        &self,
        table: &str,
        row: &str,
        family: &str,
        qualifier: &str,
        value: &[u8],
        timestamp: i64,
    ) -> bool {
        let mutations = vec![cell_mutation(family, qualifier, value)];

        let result = self.with_client(|client| {
            Ok(client.mutate_row_ts(text(table), text(row), mutations, timestamp, attributes())?)
        });

        match result {
            Ok(()) => true,
            Err(e) => {
                error!(
                    "Failed to put HBase cell, table: {}, row: {}, column: {}, ts: {}: {}",
                    table,
                    row,
                    column_spec(family, qualifier),
                    timestamp,
                    e
                );
                false
            }
        }
    }

    fn get_row(&self, table: &str, row: &str) -> Option<Row> {
        let result = self
            .with_client(|client| Ok(client.get_row(text(table), text(row), attributes())?));

        match result {
            Ok(results) => results.into_iter().next().map(Row::from_thrift),
            Err(e) => {
                error!("Failed to get HBase row, table: {}, row: {}: {}", table, row, e);
                None
            }
        }
    }

    fn get_cell(&self, table: &str, row: &str, family: &str, qualifier: &str) -> Option<Cell> {
        let column = column_spec(family, qualifier);
        let result = self.with_client(|client| {
            Ok(client.get(text(table), text(row), text(&column), attributes())?)
        });

        match result {
            Ok(cells) => cells.into_iter().next().map(Cell::from_thrift),
            Err(e) => {
                error!(
                    "Failed to get HBase cell, table: {}, row: {}, column: {}: {}",
                    table, row, column, e
                );
                None
            }
        }
    }

    fn get_cell_versions(
        &self,
        table: &str,
        row: &str,
        family: &str,
        qualifier: &str,
        versions: i32,
    ) -> Vec<Cell> {
        let column = column_spec(family, qualifier);
        let result = self.with_client(|client| {
            Ok(client.get_ver(text(table), text(row), text(&column), versions, attributes())?)
        });

        match result {
            Ok(cells) => cells.into_iter().map(Cell::from_thrift).collect(),
            Err(e) => {
                error!(
                    "Failed to get HBase cell versions, table: {}, row: {}, column: {}: {}",
                    table, row, column, e
                );
                Vec::new()
            }
        }
    }

    fn scan(&self, table: &str) -> Vec<Row> {
        match self.try_scan(table, "", None, &[]) {
            Ok(rows) => rows,
            Err(e) => {
                error!("Failed to scan HBase table, table: {}: {}", table, e);
                Vec::new()
            }
        }
    }

    fn scan_range(
        &self,
        table: &str,
        start: &str,
        stop: Option<&str>,
        columns: &[&str],
    ) -> Vec<Row> {
        match self.try_scan(table, start, stop, columns) {
            Ok(rows) => rows,
            Err(e) => {
                error!(
                    "Failed to scan HBase table, table: {}, start: {}: {}",
                    table, start, e
                );
                Vec::new()
            }
        }
    }

    fn delete_row(&self, table: &str, row: &str) -> bool {
        let result = self.with_client(|client| {
            Ok(client.delete_all_row(text(table), text(row), attributes())?)
        });

        match result {
            Ok(()) => true,
            Err(e) => {
                error!(
                    "Failed to delete HBase row, table: {}, row: {}: {}",
                    table, row, e
                );
                false
            }
        }
    }

    fn delete_column(&self, table: &str, row: &str, column: &str) -> bool {
        let result = self.with_client(|client| {
            Ok(client.delete_all(text(table), text(row), text(column), attributes())?)
        });

        match result {
            Ok(()) => true,
            Err(e) => {
                error!(
                    "Failed to delete HBase column, table: {}, row: {}, column: {}: {}",
                    table, row, column, e
                );
                false
            }
        }
    }
}

/// One-time table provisioning, run while the connection is still exclusive
fn provision(client: &mut GatewayClient, spec: &TableSpec) -> HBaseResult<()> {
    let names = client.get_table_names()?;
    if names
        .iter()
        .any(|name| name.as_slice() == spec.name.as_bytes())
    {
        info!("HBase table {} already present", spec.name);
        return Ok(());
    }

    let family = family_descriptor(&spec.column_family, 3, spec.ttl_secs as i32);
    client.create_table(text(&spec.name), vec![family])?;
    info!(
        "Created HBase table {} (family: {}, ttl: {}s)",
        spec.name, spec.column_family, spec.ttl_secs
    );

    Ok(())
}

fn family_descriptor(family: &str, max_versions: i32, ttl_secs: i32) -> ColumnDescriptor {
    ColumnDescriptor {
        name: Some(text(family)),
        max_versions: Some(max_versions),
        compression: Some("NONE".to_string()),
        in_memory: Some(false),
        bloom_filter_type: Some("ROW".to_string()),
        bloom_filter_vector_size: Some(0),
        bloom_filter_nb_hashes: Some(0),
        block_cache_enabled: Some(false),
        time_to_live: Some(ttl_secs),
    }
}

fn cell_mutation(family: &str, qualifier: &str, value: &[u8]) -> Mutation {
    Mutation {
        is_delete: Some(false),
        column: Some(text(&column_spec(family, qualifier))),
        value: Some(value.to_vec()),
        write_to_w_a_l: Some(true),
    }
}

fn text(s: &str) -> Vec<u8> {
    s.as_bytes().to_vec()
}

fn attributes() -> BTreeMap<Vec<u8>, Vec<u8>> {
    BTreeMap::new()
}
