//! HashShield - Local SHA-256 file hashing and integrity verification
//!
//! Entry point for CLI and GUI modes.

mod cli;
mod config;
mod core;
mod gui;
mod util;

use clap::Parser;
use cli::{Args, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if let Some(command) = args.command {
        return handle_command(command).await;
    }

    // GUI mode: no subcommand given
    tracing::info!("Starting HashShield GUI");
    gui::run()
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Hash { file } => cli::run_hash(&file).await,
        Commands::Verify { file, expected } => cli::run_verify(&file, &expected).await,
        Commands::History { clear } => cli::run_history(clear),
    }
}
