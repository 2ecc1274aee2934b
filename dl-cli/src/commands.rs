use crate::hbase_commands::HBaseCommands;
use crate::hdfs_commands::HdfsCommands;
use crate::user_commands::UserCommands;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Distributed filesystem operations
    Hdfs {
        #[command(subcommand)]
        action: HdfsCommands,
    },

    /// HBase table and row operations
    Hbase {
        #[command(subcommand)]
        action: HBaseCommands,
    },

    /// Cached user store operations
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
}
