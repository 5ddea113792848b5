pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;

pub use config::Config;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    config.validate()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Fetch {
            api_url,
            page_size,
            output,
            rate,
        } => {
            if let Some(url) = api_url {
                config.api.url = url;
            }
            if let Some(size) = page_size {
                config.api.page_size = size;
            }
            if let Some(path) = output {
                config.snapshot.path = path;
            }
            if let Some(rpm) = rate {
                config.api.max_requests_per_minute = rpm;
            }
            config.validate()?;
            cli::commands::cmd_fetch(&config).await
        }

        Commands::Load { snapshot, database } => {
            if let Some(path) = snapshot {
                config.snapshot.path = path;
            }
            if let Some(db) = database {
                config.general.database_path = db;
            }
            cli::commands::cmd_load(&config).await
        }

        Commands::Report { database, top } => {
            if let Some(db) = database {
                config.general.database_path = db;
            }
            if let Some(limit) = top {
                config.reports.top_limit = limit;
            }
            config.validate()?;
            cli::commands::cmd_report(&config).await
        }

        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("Created default config file: config.toml");
            } else {
                println!("config.toml already exists, leaving it untouched.");
            }
            Ok(())
        }
    }
}
