//! Command-line surface for the catalog pipeline.

pub mod commands;

use clap::{Parser, Subcommand};

/// anicat - AniList catalog pipeline
/// Fetches the anime catalog, loads it into SQLite, and reports on it.
#[derive(Parser)]
#[command(name = "anicat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the catalog from AniList into a JSON snapshot
    #[command(alias = "f")]
    Fetch {
        /// GraphQL endpoint to fetch from
        #[arg(long)]
        api_url: Option<String>,

        /// Entries per page (max 50)
        #[arg(long)]
        page_size: Option<u32>,

        /// Snapshot file to write
        #[arg(long)]
        output: Option<String>,

        /// Request ceiling in requests per minute
        #[arg(long)]
        rate: Option<u32>,
    },

    /// Load a snapshot into the catalog database
    #[command(alias = "l")]
    Load {
        /// Snapshot file to read
        #[arg(long)]
        snapshot: Option<String>,

        /// Database to load into
        #[arg(long)]
        database: Option<String>,
    },

    /// Run the aggregate reports against the catalog database
    #[command(alias = "r")]
    Report {
        /// Database to report on
        #[arg(long)]
        database: Option<String>,

        /// Rows in the top-rated report
        #[arg(long)]
        top: Option<u64>,
    },

    /// Create a default config file
    #[command(alias = "--init")]
    Init,
}
