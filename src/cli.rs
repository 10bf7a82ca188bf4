//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "subrefine")]
#[command(author, version, about = "Proxy subscription feed refiner")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml", global = true)]
    pub config: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "export", global = true)]
    pub out: PathBuf,

    /// HTTP client timeout in seconds
    #[arg(long, default_value_t = 20, global = true)]
    pub timeout: u64,

    /// Quiet mode (errors only, for cron)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch all subscriptions and regenerate the exported lists
    Refresh {
        /// Fetch and normalize but do not write any output files
        #[arg(long)]
        dry_run: bool,
    },

    /// Show version
    Version,
}
