//! Eco Friendly CLI - database migrations and demo data.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! eco-cli migrate
//!
//! # Insert demo users and products (safe to re-run)
//! eco-cli seed
//! ```
//!
//! Both commands read `ECO_DATABASE_URL` (or `DATABASE_URL`), loading `.env`
//! first if present.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "eco-cli")]
#[command(author, version, about = "Eco Friendly shop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with demo users and products
    Seed,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed => commands::seed::run().await,
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
