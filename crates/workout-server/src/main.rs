//! Workout Tracker Server
//!
//! Serves the Telegram mini app page and the JSON API it calls to log
//! workouts and read back the latest history.
//!
//! Uses SQLite (embedded) so entries survive restarts.

mod error;
mod handlers;
mod routes;
mod storage;

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use workout_core::{AuthorizedUser, Settings, WorkoutLog, WorkoutStore};

use storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub workouts: WorkoutLog<dyn WorkoutStore>,
}

#[derive(Parser)]
#[command(name = "workout-server")]
#[command(author, version, about = "Workout Tracker - mini app and HTTP API", long_about = None)]
struct Cli {
    /// Settings file (TOML); defaults to ./workout.toml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides the settings file
    #[arg(short, long)]
    bind: Option<String>,

    /// SQLite database path, overrides the settings file
    #[arg(short, long)]
    database: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    let cli = Cli::parse();

    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[workout-server] .env not loaded: {} (using system environment)", e);
    }

    let default_level = if cli.verbose { "debug" } else { "info" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Workout Tracker Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server(cli).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(cli: Cli) -> Result<()> {
    let mut settings =
        Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(bind) = cli.bind {
        settings.bind_address = bind;
    }
    if let Some(database) = cli.database {
        settings.database_path = database;
    }
    info!(
        "Config loaded: bind={}, db={}",
        settings.bind_address, settings.database_path
    );
    info!("Authorized User ID: {}", settings.authorized_user_id);

    let db = Database::new(&settings.database_path)
        .await
        .context("Failed to initialize database")?;

    let store: Arc<dyn WorkoutStore> = Arc::new(db);
    let state = AppState {
        workouts: WorkoutLog::new(store, AuthorizedUser::new(settings.authorized_user_id)),
    };

    let app = routes::router(state);

    let addr: SocketAddr = settings
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
