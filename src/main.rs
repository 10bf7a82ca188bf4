//! Subrefine - Proxy Subscription Feed Refiner
//!
//! Fetches remote proxy-subscription feeds and re-exports them as
//! normalized, base64-encoded lists.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use subrefine::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    // Progress and errors go to stderr; stdout stays clean
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Refresh { dry_run } => {
            subrefine::commands::refresh::run(&cli.config, &cli.out, cli.timeout, dry_run).await
        }
        Commands::Version => {
            println!("subrefine {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
