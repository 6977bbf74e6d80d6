//! Scoring: derive win probabilities and fair odds for future bouts.
//!
//! Reads persisted events and bouts, coalesces missing ratings to the
//! default, and writes the predictions CSV plus a per-event JSON index for
//! the downstream renderer.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::config::AppConfig;
use crate::rating::{expected_score, fair_american};
use crate::storage::FightRepository;

/// One scored future bout, one CSV row
#[derive(Debug, Clone)]
pub struct PredictionRow {
    pub event_id: String,
    pub event_name: String,
    pub event_date: String,
    pub org: String,
    pub bout_id: String,
    pub fighter_a_id: String,
    pub fighter_b_id: String,
    pub fighter_a_name: String,
    pub fighter_b_name: String,
    pub weight_class: String,
    pub rating_a: f64,
    pub rating_b: f64,
    pub p_a: f64,
    pub p_b: f64,
    pub odds_a: i64,
    pub odds_b: i64,
}

const CSV_HEADER: &str = "event_id,event_name,event_date,org,bout_id,fighter_a_id,fighter_b_id,\
fighter_a_name,fighter_b_name,weight_class,rating_a,rating_b,p_a,p_b,odds_a,odds_b";

impl PredictionRow {
    fn csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            csv_field(&self.event_id),
            csv_field(&self.event_name),
            csv_field(&self.event_date),
            csv_field(&self.org),
            csv_field(&self.bout_id),
            csv_field(&self.fighter_a_id),
            csv_field(&self.fighter_b_id),
            csv_field(&self.fighter_a_name),
            csv_field(&self.fighter_b_name),
            csv_field(&self.weight_class),
            self.rating_a,
            self.rating_b,
            self.p_a,
            self.p_b,
            self.odds_a,
            self.odds_b,
        )
    }
}

/// Commas inside free-text fields would break the row shape
fn csv_field(value: &str) -> String {
    value.replace(',', " ")
}

/// Per-event card in the JSON index
#[derive(Debug, Serialize)]
struct CardExport {
    event_id: String,
    name: String,
    date: String,
    org: String,
    fights: Vec<FightExport>,
}

#[derive(Debug, Serialize)]
struct FightExport {
    bout_id: String,
    a: String,
    b: String,
    p_a: f64,
    p_b: f64,
    odds_a: i64,
    odds_b: i64,
    weight: String,
}

/// Score all future bouts and write both output artifacts
pub fn run(config: &AppConfig) -> Result<usize> {
    let repo = FightRepository::new(Path::new(&config.database.path))?;
    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();

    let rows = prediction_rows(&repo, &today)?;
    write_csv(Path::new(&config.output.predictions_csv), &rows)?;
    write_cards_json(Path::new(&config.output.cards_json), &rows)?;

    info!(
        "Wrote {} predictions to {}",
        rows.len(),
        config.output.predictions_csv
    );
    Ok(rows.len())
}

/// Build prediction rows for every bout on a future event
pub fn prediction_rows(repo: &FightRepository, today: &str) -> Result<Vec<PredictionRow>> {
    let mut rows = Vec::new();

    for event in repo.future_events(today)? {
        for bout in repo.bouts_for_event(&event.event_id)? {
            let p_a = expected_score(bout.rating_a, bout.rating_b);
            let p_b = 1.0 - p_a;
            rows.push(PredictionRow {
                event_id: event.event_id.clone(),
                event_name: event.name.clone(),
                event_date: event.event_date.clone(),
                org: event.org.clone(),
                bout_id: bout.bout_id,
                fighter_a_id: bout.fighter_a_id,
                fighter_b_id: bout.fighter_b_id,
                fighter_a_name: bout.fighter_a_name,
                fighter_b_name: bout.fighter_b_name,
                weight_class: bout.weight_class.unwrap_or_default(),
                rating_a: bout.rating_a,
                rating_b: bout.rating_b,
                p_a,
                p_b,
                odds_a: fair_american(p_a),
                odds_b: fair_american(p_b),
            });
        }
    }

    Ok(rows)
}

fn write_csv(path: &Path, rows: &[PredictionRow]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create output directory")?;
    }

    let mut out = String::with_capacity(rows.len() * 128 + CSV_HEADER.len());
    out.push_str(CSV_HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&row.csv_line());
        out.push('\n');
    }

    std::fs::write(path, out).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn write_cards_json(path: &Path, rows: &[PredictionRow]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create output directory")?;
    }

    // Rows arrive grouped by event already (ordered by date, then bout id)
    let mut cards: Vec<CardExport> = Vec::new();
    for row in rows {
        if cards.last().map(|c| c.event_id.as_str()) != Some(row.event_id.as_str()) {
            cards.push(CardExport {
                event_id: row.event_id.clone(),
                name: row.event_name.clone(),
                date: row.event_date.clone(),
                org: row.org.clone(),
                fights: Vec::new(),
            });
        }
        if let Some(card) = cards.last_mut() {
            card.fights.push(FightExport {
                bout_id: row.bout_id.clone(),
                a: row.fighter_a_name.clone(),
                b: row.fighter_b_name.clone(),
                p_a: row.p_a,
                p_b: row.p_b,
                odds_a: row.odds_a,
                odds_b: row.odds_b,
                weight: row.weight_class.clone(),
            });
        }
    }

    let json = serde_json::to_string_pretty(&cards)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
