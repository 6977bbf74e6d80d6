//! CornerPro
//!
//! Scrapes upcoming MMA event schedules and fight cards into SQLite and
//! derives Elo-based win probabilities and fair American odds.

mod cli;
mod config;
mod fetch;
mod ident;
mod ingest;
mod rating;
mod retry;
mod score;
mod scraper;
mod storage;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cornerpro=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest {
            days_ahead,
            max_events,
        } => cli::run_ingest(days_ahead, max_events).await,
        Commands::Score => cli::run_score(),
    }
}
