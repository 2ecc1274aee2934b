use crate::error::{HdfsError, Result as HdfsResult};
use crate::types::{
    BlockLocation, BlockLocationsResponse, BooleanResponse, FileEntry, FileStatusPayload,
    FileStatusResponse, FileStatusesResponse, LocationResponse, RemoteExceptionResponse,
};

use std::panic::Location;
use std::path::Path;

use error_location::ErrorLocation;
use log::error;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::{Client as ReqwestClient, Method, Response, redirect};
use serde::de::DeserializeOwned;

/// Characters escaped when an HDFS path is embedded in a URL
const PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'%')
    .add(b'+');

/// Client facade for one HDFS namenode.
///
/// Operations log failures and return a sentinel instead of an error, so a
/// `false` / `None` / empty result does not distinguish "absent" from
/// "operation failed".
pub struct HdfsService {
    base_url: String,
    user: Option<String>,
    http: ReqwestClient,
}

impl HdfsService {
    /// Create a facade for the given WebHDFS endpoint.
    ///
    /// # Arguments
    /// * `base_url` - Namenode HTTP endpoint (e.g., "http://127.0.0.1:9870")
    /// * `user` - Optional value for the `user.name` query parameter
    pub fn new(base_url: &str, user: Option<&str>) -> HdfsResult<Self> {
        // Transfer operations resolve the datanode location themselves, so
        // redirects must not be followed behind our back.
        let http = ReqwestClient::builder()
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user: user.map(String::from),
            http,
        })
    }

    // =========================================================================
    // Directory and file operations
    // =========================================================================

    /// Create a directory (with parents). Returns true if it already exists.
    pub async fn mkdir(&self, path: &str) -> bool {
        if self.exists(path).await {
            return true;
        }

        match self.try_mkdir(path).await {
            Ok(created) => created,
            Err(e) => {
                error!("Failed to create HDFS directory, path: {}: {}", path, e);
                false
            }
        }
    }

    /// Whether a file or directory exists at the path
    pub async fn exists(&self, path: &str) -> bool {
        match self.try_status(path).await {
            Ok(_) => true,
            Err(e) if e.is_not_found() => false,
            Err(e) => {
                error!("Failed to check HDFS path existence, path: {}: {}", path, e);
                false
            }
        }
    }

    /// Upload a local file, overwriting any existing target
    pub async fn upload_file(&self, src: impl AsRef<Path>, dst: &str) -> bool {
        self.upload_file_with(false, true, src, dst).await
    }

    /// Upload a local file.
    ///
    /// # Arguments
    /// * `del_src` - Remove the local file after a successful upload
    /// * `overwrite` - Overwrite an existing target file
    /// * `src` - Local file path
    /// * `dst` - Target path; an existing directory receives the file under
    ///   its local name
    pub async fn upload_file_with(
        &self,
        del_src: bool,
        overwrite: bool,
        src: impl AsRef<Path>,
        dst: &str,
    ) -> bool {
        let src = src.as_ref();

        match self.try_upload(del_src, overwrite, src, dst).await {
            Ok(()) => true,
            Err(e) => {
                error!(
                    "Failed to upload file to HDFS, src: {}, dst: {}: {}",
                    src.display(),
                    dst,
                    e
                );
                false
            }
        }
    }

    /// Download a file to a local path, creating parent directories
    pub async fn download_file(&self, src: &str, dst: impl AsRef<Path>) -> bool {
        let dst = dst.as_ref();

        match self.try_download(src, dst).await {
            Ok(()) => true,
            Err(e) => {
                error!(
                    "Failed to download file from HDFS, src: {}, dst: {}: {}",
                    src,
                    dst.display(),
                    e
                );
                false
            }
        }
    }

    /// List the direct children of a path (empty when the path is absent)
    pub async fn list_files(&self, path: &str) -> Vec<FileEntry> {
        self.list_files_matching(path, |_| true).await
    }

    /// List the direct children whose full path satisfies the predicate
    pub async fn list_files_matching(
        &self,
        path: &str,
        predicate: impl Fn(&str) -> bool,
    ) -> Vec<FileEntry> {
        // Only an existing directory is worth listing
        if !self.exists(path).await {
            return Vec::new();
        }

        match self.try_list(path).await {
            Ok(entries) => entries
                .into_iter()
                .filter(|entry| predicate(&entry.path))
                .collect(),
            Err(e) => {
                error!("Failed to list HDFS path, path: {}: {}", path, e);
                Vec::new()
            }
        }
    }

    /// Read a file fully into memory
    pub async fn read_bytes(&self, path: &str) -> Option<Vec<u8>> {
        match self.try_read_bytes(path).await {
            Ok(bytes) => Some(bytes),
            Err(e) if e.is_not_found() => None,
            Err(e) => {
                error!("Failed to open HDFS file, path: {}: {}", path, e);
                None
            }
        }
    }

    /// Read a file as UTF-8 text (invalid sequences are replaced)
    pub async fn read_string(&self, path: &str) -> Option<String> {
        self.read_bytes(path)
            .await
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read a JSON file and deserialize it
    pub async fn read_json<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        let bytes = self.read_bytes(path).await?;

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                error!("Failed to decode HDFS JSON file, path: {}: {}", path, e);
                None
            }
        }
    }

    /// Rename a file or directory
    pub async fn rename(&self, src: &str, dst: &str) -> bool {
        match self.try_rename(src, dst).await {
            Ok(renamed) => renamed,
            Err(e) => {
                error!("Failed to rename HDFS path, src: {}, dst: {}: {}", src, dst, e);
                false
            }
        }
    }

    /// Delete a file or directory tree
    pub async fn delete(&self, path: &str) -> bool {
        match self.try_delete(path).await {
            Ok(deleted) => deleted,
            Err(e) => {
                error!("Failed to delete HDFS path, path: {}: {}", path, e);
                false
            }
        }
    }

    /// Report where the blocks of a file live in the cluster
    pub async fn file_block_locations(&self, path: &str) -> Vec<BlockLocation> {
        match self.try_block_locations(path).await {
            Ok(locations) => locations,
            Err(e) => {
                error!(
                    "Failed to fetch HDFS block locations, path: {}: {}",
                    path, e
                );
                Vec::new()
            }
        }
    }

    // =========================================================================
    // One WebHDFS call each
    // =========================================================================

    async fn try_mkdir(&self, path: &str) -> HdfsResult<bool> {
        let response = self.request(Method::PUT, path, &[("op", "MKDIRS")]).send().await?;
        let body: BooleanResponse = Self::check(response).await?.json().await?;
        Ok(body.boolean)
    }

    async fn try_status(&self, path: &str) -> HdfsResult<FileStatusPayload> {
        let response = self
            .request(Method::GET, path, &[("op", "GETFILESTATUS")])
            .send()
            .await?;
        let body: FileStatusResponse = Self::check(response).await?.json().await?;
        Ok(body.file_status)
    }

    async fn try_upload(
        &self,
        del_src: bool,
        overwrite: bool,
        src: &Path,
        dst: &str,
    ) -> HdfsResult<()> {
        let data = tokio::fs::read(src)
            .await
            .map_err(|e| HdfsError::from_io(src, e))?;

        let target = self.resolve_upload_target(src, dst).await?;
        let overwrite_flag = if overwrite { "true" } else { "false" };
        let location = self
            .try_transfer_location(
                Method::PUT,
                &target,
                &[("op", "CREATE"), ("overwrite", overwrite_flag)],
            )
            .await?;

        let response = self.http.put(location.as_str()).body(data).send().await?;
        Self::check(response).await?;

        if del_src {
            tokio::fs::remove_file(src)
                .await
                .map_err(|e| HdfsError::from_io(src, e))?;
        }

        Ok(())
    }

    async fn try_download(&self, src: &str, dst: &Path) -> HdfsResult<()> {
        let bytes = self.try_read_bytes(src).await?;

        if let Some(parent) = dst.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| HdfsError::from_io(parent, e))?;
        }

        tokio::fs::write(dst, bytes)
            .await
            .map_err(|e| HdfsError::from_io(dst, e))
    }

    async fn try_list(&self, path: &str) -> HdfsResult<Vec<FileEntry>> {
        let response = self
            .request(Method::GET, path, &[("op", "LISTSTATUS")])
            .send()
            .await?;
        let body: FileStatusesResponse = Self::check(response).await?.json().await?;

        let base = normalize(path);
        let entries = body
            .file_statuses
            .file_status
            .into_iter()
            .map(|status| {
                let path = if status.path_suffix.is_empty() {
                    // Listing a plain file yields one suffix-less entry
                    base.clone()
                } else {
                    join(&base, &status.path_suffix)
                };
                FileEntry {
                    path,
                    is_dir: status.is_dir(),
                }
            })
            .collect();

        Ok(entries)
    }

    async fn try_read_bytes(&self, path: &str) -> HdfsResult<Vec<u8>> {
        let location = self
            .try_transfer_location(Method::GET, path, &[("op", "OPEN")])
            .await?;

        let response = self.http.get(location.as_str()).send().await?;
        let bytes = Self::check(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn try_rename(&self, src: &str, dst: &str) -> HdfsResult<bool> {
        let destination = normalize(dst);
        let response = self
            .request(
                Method::PUT,
                src,
                &[("op", "RENAME"), ("destination", destination.as_str())],
            )
            .send()
            .await?;
        let body: BooleanResponse = Self::check(response).await?.json().await?;
        Ok(body.boolean)
    }

    async fn try_delete(&self, path: &str) -> HdfsResult<bool> {
        let response = self
            .request(Method::DELETE, path, &[("op", "DELETE"), ("recursive", "true")])
            .send()
            .await?;
        let body: BooleanResponse = Self::check(response).await?.json().await?;
        Ok(body.boolean)
    }

    async fn try_block_locations(&self, path: &str) -> HdfsResult<Vec<BlockLocation>> {
        let response = self
            .request(Method::GET, path, &[("op", "GETFILEBLOCKLOCATIONS")])
            .send()
            .await?;
        let body: BlockLocationsResponse = Self::check(response).await?.json().await?;

        Ok(body
            .block_locations
            .block_location
            .into_iter()
            .map(BlockLocation::from)
            .collect())
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    /// Build a namenode request for an operation on a path
    fn request(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
    ) -> reqwest::RequestBuilder {
        let url = format!(
            "{}/webhdfs/v1{}",
            self.base_url,
            utf8_percent_encode(&normalize(path), PATH_ESCAPE)
        );
        let mut req = self.http.request(method, url).query(params);

        if let Some(ref user) = self.user {
            req = req.query(&[("user.name", user.as_str())]);
        }

        req
    }

    /// Resolve the datanode location for a CREATE or OPEN transfer.
    ///
    /// Newer namenodes honour `noredirect=true` and answer with a JSON
    /// `Location`; older ones answer 307 with a Location header. Both are
    /// accepted.
    async fn try_transfer_location(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
    ) -> HdfsResult<String> {
        let response = self
            .request(method, path, params)
            .query(&[("noredirect", "true")])
            .send()
            .await?;

        if response.status().is_redirection() {
            return response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|value| value.to_str().ok())
                .map(String::from)
                .ok_or_else(|| HdfsError::protocol("redirect response without a Location header"));
        }

        let body: LocationResponse = Self::check(response).await?.json().await?;
        Ok(body.location)
    }

    /// Upload targets that are existing directories receive the file under
    /// its local name, as `fs -put` does
    async fn resolve_upload_target(&self, src: &Path, dst: &str) -> HdfsResult<String> {
        match self.try_status(dst).await {
            Ok(status) if status.is_dir() => {
                let name = src
                    .file_name()
                    .and_then(|name| name.to_str())
                    .ok_or_else(|| {
                        HdfsError::protocol(format!(
                            "source file has no usable name: {}",
                            src.display()
                        ))
                    })?;
                Ok(join(&normalize(dst), name))
            }
            Ok(_) => Ok(normalize(dst)),
            Err(e) if e.is_not_found() => Ok(normalize(dst)),
            Err(e) => Err(e),
        }
    }

    /// Turn a non-2xx response into the RemoteException it carries
    async fn check(response: Response) -> HdfsResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<RemoteExceptionResponse>(&body) {
            Ok(envelope) => Err(HdfsError::Remote {
                exception: envelope.remote_exception.exception,
                message: envelope.remote_exception.message,
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(_) => Err(HdfsError::protocol(format!(
                "unexpected status {} from WebHDFS: {}",
                status, body
            ))),
        }
    }
}

/// Ensure a path is absolute
pub(crate) fn normalize(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Join a child name onto an absolute base path
pub(crate) fn join(base: &str, name: &str) -> String {
    if base == "/" {
        format!("/{}", name)
    } else {
        format!("{}/{}", base, name)
    }
}
