// src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cookbook::server::{ApiConfig, ServerConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "cookbook")]
#[command(author, version, about = "Read-only HTTP API for listing and searching recipes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the recipe database
    Init {
        /// Database path
        #[arg(short, long, default_value = cookbook::db::DEFAULT_DB_PATH)]
        db_path: String,
    },
    /// Replace the database contents with a JSON dataset
    Load {
        /// Path to the dataset (JSON array or object of recipes)
        json_path: PathBuf,
        /// Database path
        #[arg(short, long, default_value = cookbook::db::DEFAULT_DB_PATH)]
        db_path: String,
    },
    /// Run the HTTP API
    Serve {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Database path (overrides the config file)
        #[arg(short, long)]
        db_path: Option<PathBuf>,
        /// Address to bind (overrides the config file)
        #[arg(short, long)]
        bind: Option<String>,
    },
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { db_path } => {
            info!("Initializing recipe database at: {}", db_path);
            cookbook::db::init(&db_path)?;
            println!("Database initialized successfully at: {}", db_path);
            Ok(())
        }
        Commands::Load { json_path, db_path } => {
            let loaded = cookbook::loader::load_file(&db_path, &json_path)
                .with_context(|| format!("Failed to load {}", json_path.display()))?;
            println!("Database seeded with {} recipes.", loaded);
            Ok(())
        }
        Commands::Serve {
            config,
            db_path,
            bind,
        } => {
            let mut server_config = match config {
                Some(path) => ApiConfig::load(&path)?.to_server_config()?,
                None => ServerConfig::default(),
            };

            if let Some(db_path) = db_path {
                server_config.db_path = db_path;
            }
            if let Some(bind) = bind {
                server_config.bind_addr = bind
                    .parse()
                    .with_context(|| format!("Invalid bind address: {bind}"))?;
            }

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(cookbook::server::run_server(server_config))
        }
    }
}
