use crate::error::{CliError, Result as CliResult};
use crate::print_json;

use dl_hdfs::HdfsService;

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum HdfsCommands {
    /// Create a directory (with parents)
    Mkdir { path: String },

    /// Check whether a path exists
    Exists { path: String },

    /// Upload a local file
    Upload {
        src: PathBuf,
        dst: String,

        /// Remove the local file after a successful upload
        #[arg(long)]
        delete_src: bool,

        /// Fail instead of overwriting an existing target
        #[arg(long)]
        no_overwrite: bool,
    },

    /// Download a file to a local path
    Download { src: String, dst: PathBuf },

    /// List the direct children of a path
    Ls {
        path: String,

        /// Only entries whose path ends with this suffix
        #[arg(long)]
        suffix: Option<String>,
    },

    /// Print a file as UTF-8 text
    Cat { path: String },

    /// Rename a file or directory
    Rename { src: String, dst: String },

    /// Delete a file or directory tree
    Rm { path: String },

    /// Show where the blocks of a file live
    Locations { path: String },
}

pub async fn run(action: HdfsCommands, config: &dl_config::Config, pretty: bool) -> CliResult<()> {
    let hdfs = HdfsService::new(&config.hdfs.name_node_url, config.hdfs.user.as_deref())?;

    match action {
        HdfsCommands::Mkdir { path } => ok_or_failed(hdfs.mkdir(&path).await),

        HdfsCommands::Exists { path } => {
            println!("{}", hdfs.exists(&path).await);
            Ok(())
        }

        HdfsCommands::Upload {
            src,
            dst,
            delete_src,
            no_overwrite,
        } => ok_or_failed(
            hdfs.upload_file_with(delete_src, !no_overwrite, &src, &dst)
                .await,
        ),

        HdfsCommands::Download { src, dst } => ok_or_failed(hdfs.download_file(&src, &dst).await),

        HdfsCommands::Ls { path, suffix } => {
            let entries = match suffix {
                Some(suffix) => {
                    hdfs.list_files_matching(&path, |p| p.ends_with(suffix.as_str()))
                        .await
                }
                None => hdfs.list_files(&path).await,
            };
            print_json(&entries, pretty)
        }

        HdfsCommands::Cat { path } => match hdfs.read_string(&path).await {
            Some(text) => {
                print!("{}", text);
                Ok(())
            }
            None => Err(CliError::NotFound),
        },

        HdfsCommands::Rename { src, dst } => ok_or_failed(hdfs.rename(&src, &dst).await),

        HdfsCommands::Rm { path } => ok_or_failed(hdfs.delete(&path).await),

        HdfsCommands::Locations { path } => {
            print_json(&hdfs.file_block_locations(&path).await, pretty)
        }
    }
}

fn ok_or_failed(succeeded: bool) -> CliResult<()> {
    if succeeded { Ok(()) } else { Err(CliError::Failed) }
}
