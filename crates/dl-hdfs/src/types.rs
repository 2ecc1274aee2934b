//! WebHDFS wire payloads and the public row types derived from them.

use serde::{Deserialize, Serialize};

/// One entry from a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub path: String,
    pub is_dir: bool,
}

/// Placement of one block of a file across the cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockLocation {
    /// Datanode hostnames holding a replica
    pub hosts: Vec<String>,
    /// Datanode host:port pairs
    pub names: Vec<String>,
    pub offset: u64,
    pub length: u64,
    pub corrupt: bool,
}

// ------------------------------------------------------------------------ //
// Wire shapes. Field names follow the WebHDFS JSON schema.
// ------------------------------------------------------------------------ //

#[derive(Debug, Deserialize)]
pub(crate) struct BooleanResponse {
    pub boolean: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LocationResponse {
    #[serde(rename = "Location")]
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoteExceptionResponse {
    #[serde(rename = "RemoteException")]
    pub remote_exception: RemoteException,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoteException {
    pub exception: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileStatusResponse {
    #[serde(rename = "FileStatus")]
    pub file_status: FileStatusPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileStatusesResponse {
    #[serde(rename = "FileStatuses")]
    pub file_statuses: FileStatusesPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileStatusesPayload {
    #[serde(rename = "FileStatus")]
    pub file_status: Vec<FileStatusPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileStatusPayload {
    #[serde(default)]
    pub path_suffix: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub length: u64,
}

impl FileStatusPayload {
    pub(crate) fn is_dir(&self) -> bool {
        self.kind == "DIRECTORY"
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BlockLocationsResponse {
    #[serde(rename = "BlockLocations")]
    pub block_locations: BlockLocationsPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BlockLocationsPayload {
    #[serde(rename = "BlockLocation")]
    pub block_location: Vec<BlockLocationPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BlockLocationPayload {
    #[serde(default)]
    pub hosts: Vec<String>,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub length: u64,
    #[serde(default)]
    pub corrupt: bool,
}

impl From<BlockLocationPayload> for BlockLocation {
    fn from(payload: BlockLocationPayload) -> Self {
        Self {
            hosts: payload.hosts,
            names: payload.names,
            offset: payload.offset,
            length: payload.length,
            corrupt: payload.corrupt,
        }
    }
}
