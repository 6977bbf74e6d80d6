//! SQLite repository for events, fighters, bouts and ratings.
//!
//! Upserts follow a per-entity merge policy: events and bouts overwrite on
//! conflict (scrape content is authoritative), fighters only fill NULL
//! optional attributes so enrichment is never erased by a thinner record.

use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;

use super::schema::create_tables;

use crate::rating::DEFAULT_RATING;

/// A persisted event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_id: String,
    pub org: String,
    pub event_date: String,
    pub name: String,
    pub location: Option<String>,
}

/// A persisted fighter; optional attributes may remain unset indefinitely
#[derive(Debug, Clone, Default)]
pub struct Fighter {
    pub fighter_id: String,
    pub name: String,
    pub dob: Option<String>,
    pub stance: Option<String>,
    pub height_cm: Option<f64>,
    pub reach_cm: Option<f64>,
}

/// A persisted bout; result fields stay NULL until post-fight updates
#[derive(Debug, Clone)]
pub struct Bout {
    pub bout_id: String,
    pub event_id: String,
    pub fighter_a_id: String,
    pub fighter_b_id: String,
    pub weight_class: Option<String>,
    pub scheduled_rounds: Option<u32>,
    pub result: Option<String>,
    pub winner_id: Option<String>,
}

/// A bout joined with fighter names and ratings, ready for scoring
#[derive(Debug, Clone)]
pub struct RatedBout {
    pub bout_id: String,
    pub fighter_a_id: String,
    pub fighter_b_id: String,
    pub fighter_a_name: String,
    pub fighter_b_name: String,
    pub weight_class: Option<String>,
    pub rating_a: f64,
    pub rating_b: f64,
}

/// Repository owning one connection per pipeline run
pub struct FightRepository {
    conn: Connection,
}

impl FightRepository {
    /// Open the database, initializing the schema if needed
    pub fn new(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create database directory")?;
        }

        let conn = Connection::open(db_path).context("Failed to open database")?;

        conn.execute("PRAGMA foreign_keys = ON", [])?;
        create_tables(&conn)?;

        Ok(Self { conn })
    }

    /// Create an in-memory repository (for testing)
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        create_tables(&conn)?;
        Ok(Self { conn })
    }

    // ==================== Upsert Operations ====================

    /// Upsert an event, overwriting all non-key columns on conflict
    pub fn upsert_event(&self, event: &Event) -> Result<()> {
        require_key("event_id", &event.event_id)?;
        self.conn
            .execute(
                r#"
                INSERT INTO events (event_id, org, event_date, name, location)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(event_id) DO UPDATE SET
                    org = excluded.org,
                    event_date = excluded.event_date,
                    name = excluded.name,
                    location = excluded.location
                "#,
                params![
                    event.event_id,
                    event.org,
                    event.event_date,
                    event.name,
                    event.location,
                ],
            )
            .with_context(|| format!("Failed to upsert event {}", event.event_id))?;
        Ok(())
    }

    /// Upsert a fighter, filling NULL optional attributes only.
    ///
    /// An incoming NULL never erases a stored value; callers with genuine
    /// corrections must read-modify-merge before upserting.
    pub fn upsert_fighter(&self, fighter: &Fighter) -> Result<()> {
        require_key("fighter_id", &fighter.fighter_id)?;
        self.conn
            .execute(
                r#"
                INSERT INTO fighters (fighter_id, name, dob, stance, height_cm, reach_cm)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ON CONFLICT(fighter_id) DO UPDATE SET
                    name = excluded.name,
                    dob = COALESCE(fighters.dob, excluded.dob),
                    stance = COALESCE(fighters.stance, excluded.stance),
                    height_cm = COALESCE(fighters.height_cm, excluded.height_cm),
                    reach_cm = COALESCE(fighters.reach_cm, excluded.reach_cm)
                "#,
                params![
                    fighter.fighter_id,
                    fighter.name,
                    fighter.dob,
                    fighter.stance,
                    fighter.height_cm,
                    fighter.reach_cm,
                ],
            )
            .with_context(|| format!("Failed to upsert fighter {}", fighter.fighter_id))?;
        Ok(())
    }

    /// Upsert a bout, overwriting all non-key columns on conflict
    pub fn upsert_bout(&self, bout: &Bout) -> Result<()> {
        require_key("bout_id", &bout.bout_id)?;
        self.conn
            .execute(
                r#"
                INSERT INTO bouts (bout_id, event_id, fighter_a_id, fighter_b_id,
                                   weight_class, scheduled_rounds, result, winner_id)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ON CONFLICT(bout_id) DO UPDATE SET
                    event_id = excluded.event_id,
                    fighter_a_id = excluded.fighter_a_id,
                    fighter_b_id = excluded.fighter_b_id,
                    weight_class = excluded.weight_class,
                    scheduled_rounds = excluded.scheduled_rounds,
                    result = excluded.result,
                    winner_id = excluded.winner_id
                "#,
                params![
                    bout.bout_id,
                    bout.event_id,
                    bout.fighter_a_id,
                    bout.fighter_b_id,
                    bout.weight_class,
                    bout.scheduled_rounds,
                    bout.result,
                    bout.winner_id,
                ],
            )
            .with_context(|| format!("Failed to upsert bout {}", bout.bout_id))?;
        Ok(())
    }

    /// Insert a default rating row for every fighter lacking one
    pub fn ensure_ratings(&self) -> Result<usize> {
        let inserted = self
            .conn
            .execute(
                r#"
                INSERT INTO ratings (fighter_id, rating, last_fight)
                SELECT f.fighter_id, ?1, NULL
                FROM fighters f
                LEFT JOIN ratings r ON r.fighter_id = f.fighter_id
                WHERE r.fighter_id IS NULL
                "#,
                params![DEFAULT_RATING],
            )
            .context("Failed to backfill ratings")?;
        Ok(inserted)
    }

    // ==================== Query Operations ====================

    /// Events on or after the given ISO date, soonest first
    pub fn future_events(&self, today: &str) -> Result<Vec<Event>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT event_id, org, event_date, name, location
            FROM events
            WHERE event_date >= ?1
            ORDER BY event_date, event_id
            "#,
        )?;

        let events = stmt
            .query_map([today], |row| {
                Ok(Event {
                    event_id: row.get(0)?,
                    org: row.get(1)?,
                    event_date: row.get(2)?,
                    name: row.get(3)?,
                    location: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(events)
    }

    /// Bouts for an event with fighter names and ratings.
    ///
    /// Fighters without a stored rating read as the 1500.0 default; no
    /// initialization pass is required before scoring.
    pub fn bouts_for_event(&self, event_id: &str) -> Result<Vec<RatedBout>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT b.bout_id, b.fighter_a_id, b.fighter_b_id,
                   fa.name, fb.name, b.weight_class,
                   COALESCE(ra.rating, ?2), COALESCE(rb.rating, ?2)
            FROM bouts b
            JOIN fighters fa ON fa.fighter_id = b.fighter_a_id
            JOIN fighters fb ON fb.fighter_id = b.fighter_b_id
            LEFT JOIN ratings ra ON ra.fighter_id = b.fighter_a_id
            LEFT JOIN ratings rb ON rb.fighter_id = b.fighter_b_id
            WHERE b.event_id = ?1
            ORDER BY b.bout_id
            "#,
        )?;

        let bouts = stmt
            .query_map(params![event_id, DEFAULT_RATING], |row| {
                Ok(RatedBout {
                    bout_id: row.get(0)?,
                    fighter_a_id: row.get(1)?,
                    fighter_b_id: row.get(2)?,
                    fighter_a_name: row.get(3)?,
                    fighter_b_name: row.get(4)?,
                    weight_class: row.get(5)?,
                    rating_a: row.get(6)?,
                    rating_b: row.get(7)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(bouts)
    }

    /// Look up a fighter by id
    pub fn get_fighter(&self, fighter_id: &str) -> Result<Option<Fighter>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT fighter_id, name, dob, stance, height_cm, reach_cm
            FROM fighters
            WHERE fighter_id = ?1
            "#,
        )?;

        let mut rows = stmt.query_map([fighter_id], |row| {
            Ok(Fighter {
                fighter_id: row.get(0)?,
                name: row.get(1)?,
                dob: row.get(2)?,
                stance: row.get(3)?,
                height_cm: row.get(4)?,
                reach_cm: row.get(5)?,
            })
        })?;

        Ok(rows.next().transpose()?)
    }

    /// Total event count
    pub fn event_count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Total bout count
    pub fn bout_count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM bouts", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Total rating count
    pub fn rating_count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM ratings", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn require_key(column: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        bail!("Rejecting upsert with empty {}", column);
    }
    Ok(())
}
