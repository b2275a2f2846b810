use std::sync::Arc;

use clap::{Parser, Subcommand};

mod app;
mod auth;
mod clock;
mod config;
mod db;
mod listings;
mod routes;
mod seed;
mod state;
mod store;

use crate::{
    app::{build_app, serve},
    clock::SystemClock,
    config::AppConfig,
    seed::SeedOptions,
    state::AppState,
};

#[derive(Debug, Parser)]
#[command(name = "staybook", about = "Property rental booking backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API.
    Serve,
    /// Populate the database with sample users, listings, bookings and reviews.
    Seed {
        /// Clear existing listings, bookings and reviews before seeding.
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let state = AppState::init(config).await?;

    match cli.command {
        Command::Serve => {
            let config = Arc::clone(&state.config);
            serve(build_app(state), &config).await?;
        }
        Command::Seed { clear } => {
            let opts = SeedOptions {
                clear,
                default_password: state.config.seed_default_password.clone(),
            };
            seed::run(state.store.as_ref(), &SystemClock, &opts).await?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "staybook=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}
