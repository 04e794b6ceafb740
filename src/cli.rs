//! Command-line interface for tablediff

use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(name = "tablediff")]
#[command(about = "Compare two versions of a relational table and generate a SQL reconciliation script")]
#[command(version)]
pub struct Cli {
    /// Left (base) connection name from the config file
    #[arg(long)]
    pub left: String,

    /// Right (target) connection name from the config file
    #[arg(long)]
    pub right: String,

    /// Table to compare
    #[arg(long)]
    pub table: String,

    /// Primary key columns (comma-separated)
    #[arg(long)]
    pub keys: String,

    /// Compare strategy: "keys" or "all"
    #[arg(long, default_value = "keys")]
    pub strategy: String,

    /// Patch statements to generate: any of (i)nsert, (u)pdate, (d)elete.
    /// When given, the script is written to <left>.<right>.patch.sql
    #[arg(long)]
    pub patch: Option<String>,

    /// Configuration file with connection definitions
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The primary-key tuple as a column list, fetch order preserved.
    pub fn primary_keys(&self) -> Vec<String> {
        self.keys
            .split(',')
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect()
    }
}
