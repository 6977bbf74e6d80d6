//! CLI commands for cornerpro.

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::{ingest, score};

#[derive(Parser)]
#[command(name = "cornerpro")]
#[command(version, about = "MMA event ingestion, Elo ratings and fair-odds scoring", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape upcoming events and fight cards into the database
    Ingest {
        /// Horizon in days ahead of today
        #[arg(long)]
        days_ahead: Option<i64>,

        /// Maximum number of events to ingest
        #[arg(long)]
        max_events: Option<usize>,
    },

    /// Regenerate predictions from current database contents
    Score,
}

/// Run the ingestion pipeline with optional CLI overrides.
pub async fn run_ingest(days_ahead: Option<i64>, max_events: Option<usize>) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let days_ahead = days_ahead.unwrap_or(config.ingest.days_ahead);
    let max_events = max_events.unwrap_or(config.ingest.max_events);

    let summary = ingest::run(&config, days_ahead, max_events).await?;
    println!(
        "Ingested {} events, {} bouts ({} skipped)",
        summary.events, summary.bouts, summary.skipped_events
    );
    Ok(())
}

/// Score future bouts and write the output artifacts.
pub fn run_score() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let written = score::run(&config)?;
    println!("Wrote {} predictions to {}", written, config.output.predictions_csv);
    Ok(())
}
