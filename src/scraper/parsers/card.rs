//! Fight-card row parser.
//!
//! Card tables come in several shapes. Column detection runs an ordered list
//! of named mapping strategies; the first structural match wins.

use tracing::debug;

use crate::scraper::locate::{Cell, Table};

/// One parsed bout row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoutRow {
    pub fighter_a: String,
    pub fighter_b: String,
    pub weight_class: Option<String>,
}

/// How fighter names map onto the table's columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnMapping {
    /// Two dedicated fighter columns
    Pair { a: usize, b: usize },
    /// One combined column split on a " vs " separator
    Split { col: usize },
}

type Matcher = fn(&[String], &[Vec<Cell>]) -> Option<ColumnMapping>;

/// Tried in order; first match wins
const STRATEGIES: &[(&str, Matcher)] = &[
    ("fighter 1/fighter 2", |h, _| header_pair(h, "fighter 1", "fighter 2")),
    ("fighter1/fighter2", |h, _| header_pair(h, "fighter1", "fighter2")),
    ("red corner/blue corner", |h, _| {
        header_pair(h, "red corner", "blue corner")
    }),
    ("bout column", |h, _| {
        find_header(h, "bout").map(|col| ColumnMapping::Split { col })
    }),
    ("first two text columns", first_text_columns),
];

/// Weight-class header candidates, most specific first
const WEIGHT_HEADERS: &[&str] = &["weight class", "division", "weight", "wt"];

/// Parser for fight-card tables
pub struct FightCardParser;

impl FightCardParser {
    /// Extract bout rows; rows with a missing fighter are dropped.
    pub fn parse(table: &Table) -> Vec<BoutRow> {
        let Some((strategy, mapping)) = detect_columns(&table.headers, &table.rows) else {
            return Vec::new();
        };
        debug!("card columns detected via {} strategy", strategy);

        let weight_col = WEIGHT_HEADERS
            .iter()
            .find_map(|name| find_header(&table.headers, name));

        table
            .rows
            .iter()
            .filter_map(|cells| Self::parse_row(cells, mapping, weight_col))
            .collect()
    }

    fn parse_row(
        cells: &[Cell],
        mapping: ColumnMapping,
        weight_col: Option<usize>,
    ) -> Option<BoutRow> {
        let (fighter_a, fighter_b) = match mapping {
            ColumnMapping::Pair { a, b } => (
                cells.get(a)?.text.trim().to_string(),
                cells.get(b)?.text.trim().to_string(),
            ),
            ColumnMapping::Split { col } => split_vs(&cells.get(col)?.text)?,
        };

        if is_blank(&fighter_a) || is_blank(&fighter_b) {
            return None;
        }

        let weight_class = weight_col
            .and_then(|col| cells.get(col))
            .map(|c| c.text.trim().to_string())
            .filter(|w| !is_blank(w));

        Some(BoutRow {
            fighter_a,
            fighter_b,
            weight_class,
        })
    }
}

/// Run the strategy ladder over headers and rows
fn detect_columns(
    headers: &[String],
    rows: &[Vec<Cell>],
) -> Option<(&'static str, ColumnMapping)> {
    STRATEGIES
        .iter()
        .find_map(|(name, matcher)| matcher(headers, rows).map(|m| (*name, m)))
}

fn header_pair(headers: &[String], first: &str, second: &str) -> Option<ColumnMapping> {
    Some(ColumnMapping::Pair {
        a: find_header(headers, first)?,
        b: find_header(headers, second)?,
    })
}

fn find_header(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().to_lowercase() == name)
}

/// Fallback: the first two columns that carry text in any row
fn first_text_columns(_headers: &[String], rows: &[Vec<Cell>]) -> Option<ColumnMapping> {
    let width = rows.iter().map(|r| r.len()).max()?;
    let mut text_cols = (0..width).filter(|&col| {
        rows.iter()
            .any(|row| row.get(col).is_some_and(|c| !is_blank(&c.text)))
    });

    let a = text_cols.next()?;
    let b = text_cols.next()?;
    Some(ColumnMapping::Pair { a, b })
}

/// Split a combined "A vs B" cell into both names
fn split_vs(text: &str) -> Option<(String, String)> {
    for sep in [" vs. ", " vs ", " Vs. ", " Vs ", " VS. ", " VS "] {
        if let Some(pos) = text.find(sep) {
            let a = text[..pos].trim().to_string();
            let b = text[pos + sep.len()..].trim().to_string();
            return Some((a, b));
        }
    }
    None
}

/// Empty cells and placeholder dashes mean "no fighter listed"
fn is_blank(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed.chars().all(|c| matches!(c, '-' | '–' | '—'))
}
