use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod db;
mod models;
mod remote;
mod sync;
mod view;
mod worker;

use commands::{ConfigCommand, PlaceCommand, ReservationCommand, SyncCommand, WorkerCommand};
use config::Config;
use db::{init_db, PlaceStore, ReservationStore};
use remote::RemoteClient;
use sync::{PlaceRepository, ReservationRepository};
use worker::{ConsoleNotifier, ReminderWorker};

#[derive(Parser)]
#[command(name = "aqp-explorer")]
#[command(version)]
#[command(about = "Arequipa tourist guide: cached places, reservations and reminders", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Synchronize the local cache with the remote store
    Sync(SyncCommand),

    /// Browse cached tourist places
    Place(PlaceCommand),

    /// Manage reservations
    Reservation(ReservationCommand),

    /// Run the reservation reminder worker
    Worker(WorkerCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aqp_explorer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Sync(cmd)) => {
            let (places, reservations) = build_repositories(&config).await?;
            cmd.run(&places, &reservations, &config).await?;
        }
        Some(Commands::Place(cmd)) => {
            let (places, _) = build_repositories(&config).await?;
            cmd.run(&places).await?;
        }
        Some(Commands::Reservation(cmd)) => {
            let (places, reservations) = build_repositories(&config).await?;
            cmd.run(&places, &reservations, &config).await?;
        }
        Some(Commands::Worker(cmd)) => {
            let (_, reservations) = build_repositories(&config).await?;
            let remote = RemoteClient::from_config(&config.remote)?;
            let worker = ReminderWorker::new(
                reservations,
                remote,
                config.user_id.clone(),
                Arc::new(ConsoleNotifier),
            );
            cmd.run(worker).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

/// Composition root: one pool, one remote client, one repository per entity.
/// The repositories are the only writers to the local stores.
async fn build_repositories(
    config: &Config,
) -> Result<(PlaceRepository, ReservationRepository), Box<dyn std::error::Error>> {
    let pool = init_db(Some(config.database_path.clone())).await?;
    let remote = RemoteClient::from_config(&config.remote)?;

    let place_store = PlaceStore::new(pool.clone()).await?;
    let reservation_store = ReservationStore::new(pool).await?;

    Ok((
        PlaceRepository::new(place_store, remote.clone()),
        ReservationRepository::new(reservation_store, remote),
    ))
}
