//! Master-data migration CLI for DocuWare
//!
//! Three workflows: `insert` pushes selection-list entries from a Microsoft
//! Access database into a DocuWare file cabinet (deduplicated against a local
//! SQLite cache), `delete` purges the cabinet and clears the cache, and
//! `view` prints the cache contents.

mod api;
mod cache;
mod cli;
mod config;
mod error;
mod source;
mod sync;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "docuware-cli", version, about = "Migrate master data from Microsoft Access into a DocuWare file cabinet")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import source records into the file cabinet, skipping already-synced entries
    Insert,
    /// Delete every selection-list entry in the file cabinet and clear the local cache
    Delete,
    /// Print the local sync cache
    View,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment itself may be populated.
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Insert => cli::commands::insert::run(&config).await,
        Commands::Delete => cli::commands::delete::run(&config).await,
        Commands::View => cli::commands::view::run(&config).await,
    }
}
