//! Events-listing row parser.

use chrono::NaiveDate;

use crate::scraper::locate::{Cell, Table};

/// One parsed row from the events listing
#[derive(Debug, Clone)]
pub struct EventRow {
    /// ISO date when the source date parsed, raw trimmed text otherwise
    pub date: String,
    pub name: String,
    /// Detail-page href from the name cell, if present
    pub link: Option<String>,
    pub location: String,
}

/// Parser for the upcoming-events table
pub struct EventListParser;

impl EventListParser {
    /// Extract event rows; malformed rows are dropped, never fail the table.
    pub fn parse(table: &Table) -> Vec<EventRow> {
        table
            .rows
            .iter()
            .filter_map(|cells| Self::parse_row(cells))
            .collect()
    }

    fn parse_row(cells: &[Cell]) -> Option<EventRow> {
        if cells.len() < 3 {
            return None;
        }

        let name = cells[1].text.trim().to_string();
        if name.is_empty() {
            return None;
        }

        Some(EventRow {
            date: normalize_date(&cells[0].text),
            name,
            link: cells[1].link.clone(),
            location: cells[2].text.trim().to_string(),
        })
    }
}

/// Normalize a long-form date ("Month DD, YYYY") to ISO `YYYY-MM-DD`.
///
/// Unparseable dates pass through as the trimmed raw string; downstream
/// comparisons against an ISO "today" stay well-defined on strings.
pub fn normalize_date(text: &str) -> String {
    let trimmed = text.trim();
    match NaiveDate::parse_from_str(trimmed, "%B %d, %Y") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => trimmed.to_string(),
    }
}
