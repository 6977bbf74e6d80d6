//! SQLite schema definitions.
//!
//! Tables:
//! - events: one row per real-world event
//! - fighters: created on first sighting, optional attributes nullable
//! - bouts: scheduled matchups, results stay NULL until post-fight updates
//! - ratings: one Elo rating row per fighter

use rusqlite::{Connection, Result};

/// Create all tables in the database
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            event_id TEXT PRIMARY KEY,
            org TEXT NOT NULL,
            event_date TEXT NOT NULL,
            name TEXT NOT NULL,
            location TEXT
        )
        "#,
        [],
    )?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS fighters (
            fighter_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            dob TEXT,
            stance TEXT,
            height_cm REAL,
            reach_cm REAL
        )
        "#,
        [],
    )?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS bouts (
            bout_id TEXT PRIMARY KEY,
            event_id TEXT NOT NULL REFERENCES events(event_id),
            fighter_a_id TEXT NOT NULL REFERENCES fighters(fighter_id),
            fighter_b_id TEXT NOT NULL REFERENCES fighters(fighter_id),
            weight_class TEXT,
            scheduled_rounds INTEGER,
            result TEXT,
            winner_id TEXT
        )
        "#,
        [],
    )?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS ratings (
            fighter_id TEXT PRIMARY KEY REFERENCES fighters(fighter_id),
            rating REAL NOT NULL DEFAULT 1500.0,
            last_fight TEXT
        )
        "#,
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_date ON events(event_date)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_bouts_event ON bouts(event_id)",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_create_tables() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        let count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN
                 ('events', 'fighters', 'bouts', 'ratings')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn test_create_tables_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        // Should not fail on second call
        create_tables(&conn).unwrap();
    }
}
