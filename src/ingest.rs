//! Ingestion pipeline: events listing → per-event fight cards → upserts.
//!
//! Failures degrade per event: a dead detail page or an unrecognizable card
//! table skips that event and the batch continues. Only a failure to fetch or
//! locate the top-level events listing aborts the run.

use anyhow::{anyhow, Context, Result};
use chrono::{Duration, Utc};
use scraper::Html;
use std::path::Path;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::fetch::Fetcher;
use crate::ident;
use crate::scraper::locate::{find_table, TableKind};
use crate::scraper::parsers::card::BoutRow;
use crate::scraper::parsers::events::EventRow;
use crate::scraper::parsers::{EventListParser, FightCardParser};
use crate::scraper::event_detail_url;
use crate::storage::repository::{Bout, Event, Fighter};
use crate::storage::FightRepository;

/// Counters reported after a run
#[derive(Debug, Default)]
pub struct IngestSummary {
    pub events: usize,
    pub bouts: usize,
    pub skipped_events: usize,
}

/// Run the full ingestion pipeline.
///
/// `days_ahead` bounds the horizon from today; `max_events` caps how many
/// upcoming events get their card scraped.
pub async fn run(config: &AppConfig, days_ahead: i64, max_events: usize) -> Result<IngestSummary> {
    let fetcher = Fetcher::new(&config.source.user_agent)?;
    let repo = FightRepository::new(Path::new(&config.database.path))?;

    let listing = fetcher
        .fetch(&config.source.events_page)
        .await
        .context("Failed to fetch events listing")?;

    let rows = parse_events_listing(&listing)?;

    let today = Utc::now().date_naive();
    let horizon = (today + Duration::days(days_ahead)).format("%Y-%m-%d").to_string();
    let today = today.format("%Y-%m-%d").to_string();

    let upcoming = select_upcoming(rows, &today, &horizon, max_events);
    info!("{} upcoming events within horizon {}", upcoming.len(), horizon);

    let mut summary = IngestSummary::default();

    for event_row in upcoming {
        let event_id = ident::event_id(&config.source.org, &event_row.date, &event_row.name);
        let event = Event {
            event_id: event_id.clone(),
            org: config.source.org.clone(),
            event_date: event_row.date.clone(),
            name: event_row.name.clone(),
            location: Some(event_row.location.clone()).filter(|l| !l.is_empty()),
        };

        if let Err(e) = repo.upsert_event(&event) {
            warn!("Skipping event {}: {:#}", event_id, e);
            summary.skipped_events += 1;
            continue;
        }
        summary.events += 1;

        let Some(href) = event_row.link.as_deref() else {
            warn!("Event {} has no detail link, card skipped", event_id);
            summary.skipped_events += 1;
            continue;
        };

        let url = event_detail_url(&config.source.base_url, href);
        let markup = match fetcher.fetch(&url).await {
            Ok(markup) => markup,
            Err(e) => {
                warn!("Fetch failed for {} ({}), card skipped: {:#}", event_id, url, e);
                summary.skipped_events += 1;
                continue;
            }
        };

        let bouts = {
            let document = Html::parse_document(&markup);
            match find_table(&document, TableKind::Card) {
                Some(table) => FightCardParser::parse(&table),
                None => {
                    warn!("No fight card table on {}, card skipped", url);
                    summary.skipped_events += 1;
                    continue;
                }
            }
        };

        summary.bouts += ingest_card(&repo, &event_id, &bouts);
    }

    let backfilled = repo.ensure_ratings()?;
    info!(
        "Ingest complete: {} events, {} bouts, {} skipped, {} ratings backfilled",
        summary.events, summary.bouts, summary.skipped_events, backfilled
    );
    info!(
        "Database now holds {} events / {} bouts",
        repo.event_count()?,
        repo.bout_count()?
    );

    Ok(summary)
}

/// Parse the events listing markup into event rows.
///
/// A listing page without a recognizable events table is a hard error:
/// without it there is nothing to ingest, and silently reporting zero
/// events would look like success.
fn parse_events_listing(markup: &str) -> Result<Vec<EventRow>> {
    let document = Html::parse_document(markup);
    let table = find_table(&document, TableKind::Events)
        .ok_or_else(|| anyhow!("No events table found on listing page"))?;
    Ok(EventListParser::parse(&table))
}

/// Keep events inside [today, horizon], capped at `max_events`.
///
/// Comparison is on strings; non-ISO fallback dates sort unpredictably but
/// never break the filter.
fn select_upcoming(
    rows: Vec<EventRow>,
    today: &str,
    horizon: &str,
    max_events: usize,
) -> Vec<EventRow> {
    rows.into_iter()
        .filter(|row| row.date.as_str() >= today && row.date.as_str() <= horizon)
        .take(max_events)
        .collect()
}

/// Upsert both fighters and the bout for every card row.
///
/// A failed record is logged with its identity and the rest of the card
/// still lands.
fn ingest_card(repo: &FightRepository, event_id: &str, bouts: &[BoutRow]) -> usize {
    let mut stored = 0;

    for row in bouts {
        let fighter_a_id = ident::slug(&row.fighter_a);
        let fighter_b_id = ident::slug(&row.fighter_b);
        let bout_id = ident::bout_id(event_id, &row.fighter_a, &row.fighter_b);

        let fighters = [
            Fighter {
                fighter_id: fighter_a_id.clone(),
                name: row.fighter_a.clone(),
                ..Default::default()
            },
            Fighter {
                fighter_id: fighter_b_id.clone(),
                name: row.fighter_b.clone(),
                ..Default::default()
            },
        ];

        let mut ok = true;
        for fighter in &fighters {
            if let Err(e) = repo.upsert_fighter(fighter) {
                warn!("Skipping fighter {}: {:#}", fighter.fighter_id, e);
                ok = false;
            }
        }
        if !ok {
            continue;
        }

        let bout = Bout {
            bout_id: bout_id.clone(),
            event_id: event_id.to_string(),
            fighter_a_id,
            fighter_b_id,
            weight_class: row.weight_class.clone(),
            scheduled_rounds: None,
            result: None,
            winner_id: None,
        };

        match repo.upsert_bout(&bout) {
            Ok(()) => stored += 1,
            Err(e) => warn!("Skipping bout {}: {:#}", bout_id, e),
        }
    }

    stored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_row(date: &str, name: &str) -> EventRow {
        EventRow {
            date: date.to_string(),
            name: name.to_string(),
            link: None,
            location: "Las Vegas".to_string(),
        }
    }

    fn bout_row(a: &str, b: &str, weight: &str) -> BoutRow {
        BoutRow {
            fighter_a: a.to_string(),
            fighter_b: b.to_string(),
            weight_class: Some(weight.to_string()),
        }
    }

    #[test]
    fn test_listing_without_events_table_is_fatal() {
        let markup = "<html><body><p>maintenance page</p></body></html>";
        let result = parse_events_listing(markup);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("events table"));
    }

    #[test]
    fn test_listing_parses_rows() {
        let markup = r#"<html><body>
            <h2>Scheduled events</h2>
            <table>
              <tr><th>Date</th><th>Event</th><th>Location</th></tr>
              <tr><td>January 17, 2026</td><td><a href="/wiki/UFC_325">UFC 325</a></td><td>Las Vegas</td></tr>
            </table>
        </body></html>"#;
        let rows = parse_events_listing(markup).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "2026-01-17");
        assert_eq!(rows[0].link.as_deref(), Some("/wiki/UFC_325"));
    }

    #[test]
    fn test_select_upcoming_window_and_cap() {
        let rows = vec![
            event_row("2026-01-01", "past"),
            event_row("2026-06-10", "in window 1"),
            event_row("2026-06-20", "in window 2"),
            event_row("2026-06-25", "in window 3"),
            event_row("2027-01-01", "beyond horizon"),
        ];

        let picked = select_upcoming(rows, "2026-06-01", "2026-06-30", 2);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked[0].name, "in window 1");
        assert_eq!(picked[1].name, "in window 2");
    }

    #[test]
    fn test_select_upcoming_tolerates_non_iso_dates() {
        let rows = vec![event_row("TBA", "unknown date"), event_row("2026-06-10", "ok")];
        let picked = select_upcoming(rows, "2026-06-01", "2026-06-30", 10);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].name, "ok");
    }

    #[test]
    fn test_ingest_card_creates_fighters_and_bouts() {
        let repo = FightRepository::in_memory().unwrap();
        let event_id = "UFC_2099-01-01_ufc-sample";
        repo.upsert_event(&Event {
            event_id: event_id.to_string(),
            org: "UFC".to_string(),
            event_date: "2099-01-01".to_string(),
            name: "UFC Sample".to_string(),
            location: None,
        })
        .unwrap();

        let bouts = vec![
            bout_row("Jon Jones", "Tom Aspinall", "Heavyweight"),
            bout_row("Ilia Topuria", "Max Holloway", "Featherweight"),
        ];
        let stored = ingest_card(&repo, event_id, &bouts);
        assert_eq!(stored, 2);
        assert!(repo.get_fighter("jon-jones").unwrap().is_some());
        assert!(repo.get_fighter("tom-aspinall").unwrap().is_some());

        let rated = repo.bouts_for_event(event_id).unwrap();
        assert_eq!(rated.len(), 2);
    }

    #[test]
    fn test_ingest_card_twice_is_idempotent() {
        let repo = FightRepository::in_memory().unwrap();
        let event_id = "UFC_2099-01-01_ufc-sample";
        repo.upsert_event(&Event {
            event_id: event_id.to_string(),
            org: "UFC".to_string(),
            event_date: "2099-01-01".to_string(),
            name: "UFC Sample".to_string(),
            location: None,
        })
        .unwrap();

        let bouts = vec![bout_row("Jon Jones", "Tom Aspinall", "Heavyweight")];
        ingest_card(&repo, event_id, &bouts);
        ingest_card(&repo, event_id, &bouts);

        assert_eq!(repo.bout_count().unwrap(), 1);
        let rated = repo.bouts_for_event(event_id).unwrap();
        assert_eq!(
            rated[0].bout_id,
            "UFC_2099-01-01_ufc-sample_jon-jones_tom-aspinall"
        );
    }
}
