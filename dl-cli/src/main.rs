//! dl - Datalake toolbox CLI
//!
//! One binary exercising the three facades: HDFS files, HBase tables, and
//! the Redis-cached user store.
//!
//! # Examples
//!
//! ```bash
//! # Create a directory and upload into it
//! dl hdfs mkdir /input
//! dl hdfs upload ./hadoop1.txt /input
//!
//! # Write and read a cell
//! dl hbase put t_target 1000000001 t name u1
//! dl hbase get t_target 1000000001 --pretty
//!
//! # Cached user lookups
//! dl user get 1
//! ```

mod cli;
mod commands;
mod error;
mod hbase_commands;
mod hdfs_commands;
mod logger;
mod user_commands;

use crate::cli::Cli;
use crate::commands::Commands;
use crate::error::{CliError, Result as CliResult};

use std::process::ExitCode;

use clap::Parser;
use log::error;
use serde::Serialize;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = initialize_logger(&config) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    config.log_summary();

    let outcome = match cli.command {
        Commands::Hdfs { action } => hdfs_commands::run(action, &config, cli.pretty).await,
        Commands::Hbase { action } => hbase_commands::run(action, &config, cli.pretty).await,
        Commands::User { action } => user_commands::run(action, &config, cli.pretty).await,
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> CliResult<dl_config::Config> {
    let config = dl_config::Config::load()?;
    config.validate()?;
    Ok(config)
}

fn initialize_logger(config: &dl_config::Config) -> CliResult<()> {
    // Construct log file path if configured
    let log_file_path = if let Some(ref filename) = config.logging.file {
        let config_dir = dl_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir).map_err(|e| CliError::Logging {
            message: format!("Failed to create log directory {}: {}", log_dir.display(), e),
        })?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    logger::initialize(config.logging.level, log_file_path, config.logging.colored)
}

/// Print a serializable value as JSON on stdout
pub(crate) fn print_json<T: Serialize>(value: &T, pretty: bool) -> CliResult<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    println!("{}", rendered);
    Ok(())
}
