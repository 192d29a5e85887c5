//! Workout Tracker Bot
//!
//! Private Telegram bot that logs workouts for a single user. History is
//! kept in memory and is lost whenever the process restarts.
//!
//! # Environment Variables
//!
//! - `TELEGRAM_BOT_TOKEN`: Bot API token (required)
//! - `WORKOUT_AUTHORIZED_USER_ID`: the only user allowed to talk to the bot
//! - `WORKOUT_TELEGRAM_API_URL`: Bot API base URL
//! - `WORKOUT_POLL_TIMEOUT_SECS`: long-poll timeout
//! - `RUST_LOG`: log filter (default: info)

mod bot;
mod commands;
mod telegram;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use workout_core::{AuthorizedUser, Settings};

use bot::WorkoutBot;
use telegram::TelegramClient;

#[derive(Parser)]
#[command(name = "workout-bot")]
#[command(author, version, about = "Workout Tracker - private Telegram bot", long_about = None)]
struct Cli {
    /// Settings file (TOML); defaults to ./workout.toml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[workout-bot] .env not loaded: {} (using system environment)", e);
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

    info!("Starting Workout Tracker Bot v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_bot(cli).await {
        error!("ERROR: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_bot(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let token = settings.require_bot_token()?;
    info!("Authorized User ID: {}", settings.authorized_user_id);

    let poll_timeout = Duration::from_secs(settings.poll_timeout_secs);
    let client = TelegramClient::new(&settings.telegram_api_url, token, poll_timeout)?;

    let username = match client.get_me().await {
        Ok(me) => {
            info!("Connected as @{}", me.username.as_deref().unwrap_or(&me.first_name));
            me.username
        }
        Err(e) => {
            warn!("getMe failed, mentions will not be filtered: {:#}", e);
            None
        }
    };

    let bot = WorkoutBot::new(AuthorizedUser::new(settings.authorized_user_id))
        .with_username(username);

    tokio::select! {
        _ = bot::run(&client, &bot, poll_timeout) => {}
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for shutdown signal")?;
            info!("Shutdown signal received, stopping bot");
        }
    }

    Ok(())
}
