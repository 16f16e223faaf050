mod db;
mod registry;
mod search;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::search::SearchArgs;

#[derive(Debug, Parser)]
#[command(name = "ecostay-cli")]
#[command(about = "Eco-certified hotel search command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a hotel search and print NDJSON frames to stdout
    Search(SearchArgs),
    /// Database management commands
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Certified-hotel registry file commands
    Registry {
        #[command(subcommand)]
        command: RegistryCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Apply pending migrations
    Migrate,
    /// Upsert certified hotels from a registry YAML file
    Seed {
        /// Registry file (defaults to ECOSTAY_REGISTRY_PATH)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
enum RegistryCommands {
    /// Validate a registry YAML file and print a summary
    Check {
        /// Registry file (defaults to ECOSTAY_REGISTRY_PATH)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ecostay_core::load_app_config()?;

    // stdout carries search output; logs go to stderr.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search(args) => search::run_search(&config, args).await,
        Commands::Db {
            command: DbCommands::Migrate,
        } => db::run_migrate(&config).await,
        Commands::Db {
            command: DbCommands::Seed { path },
        } => {
            let path = path.unwrap_or_else(|| config.registry_path.clone());
            db::run_seed(&config, &path).await
        }
        Commands::Registry {
            command: RegistryCommands::Check { path },
        } => {
            let path = path.unwrap_or_else(|| config.registry_path.clone());
            registry::run_check(&path)
        }
    }
}
