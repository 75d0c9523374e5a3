//! `view` workflow: print the sync cache

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cache::{SqliteCache, SyncCache};
use crate::config::Config;

pub async fn run(config: &Config) -> Result<()> {
    let cache = SqliteCache::open(&config.cache_database, &config.cache_table)
        .await
        .context("Failed to open the sync cache")?;
    let entries = cache.list_all().await?;

    if entries.is_empty() {
        println!("No records found.");
        return Ok(());
    }

    println!("Records in '{}':", config.cache_table);
    println!();
    println!(
        "{}",
        format!("{:<32} {:<48} {}", "KEY", "SUMMARY", "CREATED").cyan()
    );
    println!("{}", "-".repeat(100));
    for entry in entries {
        println!(
            "{:<32} {:<48} {}",
            entry.entry_key,
            entry.summary,
            entry.created_at.format("%Y-%m-%d %H:%M:%S")
        );
    }

    Ok(())
}
