//! # Metricboard API Main Entry Point
//!
//! This is the main entry point for the Metricboard API service.

use clap::{Parser, Subcommand};
use metricboard::{config::ConfigLoader, db, server::run_server, telemetry};
use migration::{Migrator, MigratorTrait};

#[derive(Parser)]
#[command(name = "metricboard", about = "Metricboard API service", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API server (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration from layered env files and variables
    let config = ConfigLoader::new().load()?;
    telemetry::init_tracing(&config)?;

    tracing::info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!("Configuration: {}", redacted_json);
    }

    let db = db::init_pool(&config).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => {
            Migrator::up(&db, None).await?;
            tracing::info!("Migrations applied");
            Ok(())
        }
        Command::Serve => run_server(config, db).await,
    }
}
