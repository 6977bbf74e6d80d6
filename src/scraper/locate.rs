//! Table locator for heterogeneous wiki markup.
//!
//! Pages carry many tables; this picks the one most likely to be the events
//! listing or a fight card. A miss is an expected outcome, not an error.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Which table we are looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Events,
    Card,
}

impl TableKind {
    /// Section-heading keywords that mark the right table
    fn heading_keywords(&self) -> &'static [&'static str] {
        match self {
            TableKind::Events => &["upcoming events", "scheduled events"],
            TableKind::Card => &["fight card"],
        }
    }

    /// Score a header row by expected column keywords
    fn header_score(&self, headers: &[String]) -> usize {
        let has = |needle: &str| {
            headers
                .iter()
                .any(|h| h.to_lowercase().contains(needle))
        };
        match self {
            TableKind::Events => {
                usize::from(has("date")) + usize::from(has("event"))
            }
            TableKind::Card => {
                let partner = has("vs") || has("fighter") || has("bout");
                usize::from(has("weight")) + usize::from(partner)
            }
        }
    }
}

/// A single table cell: normalized text plus the first link href, if any
#[derive(Debug, Clone)]
pub struct Cell {
    pub text: String,
    pub link: Option<String>,
}

/// A located table, detached from the DOM
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Find the best-matching table for `kind`, or `None` if the page has none.
///
/// Headings are scanned first: the first table following a matching section
/// heading wins. Failing that, every table carrying the `wikitable` marker is
/// scored by expected header keywords and the first scoring 2+ wins.
pub fn find_table(document: &Html, kind: TableKind) -> Option<Table> {
    let walk = Selector::parse("h1, h2, h3, h4, table").unwrap();

    let mut after_matching_heading = false;
    for element in document.select(&walk) {
        if element.value().name() == "table" {
            if after_matching_heading {
                return Some(extract_table(&element));
            }
        } else {
            let text = clean_text(&element.text().collect::<String>()).to_lowercase();
            after_matching_heading = kind
                .heading_keywords()
                .iter()
                .any(|keyword| text.contains(keyword));
        }
    }

    let marked = Selector::parse("table.wikitable").unwrap();
    for table in document.select(&marked) {
        let extracted = extract_table(&table);
        if kind.header_score(&extracted.headers) >= 2 {
            return Some(extracted);
        }
    }

    None
}

/// Pull headers and row cells out of a table element
fn extract_table(table: &ElementRef) -> Table {
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();
    let header_cell_selector = Selector::parse("th").unwrap();
    let link_selector = Selector::parse("a[href]").unwrap();
    // Footnote markers like [1] or [a] ride along in wiki cells
    let footnote_re = Regex::new(r"\[[^\]]*\]").unwrap();

    let mut headers = Vec::new();
    let mut rows = Vec::new();

    for (i, tr) in table.select(&row_selector).enumerate() {
        let cells: Vec<Cell> = tr
            .select(&cell_selector)
            .map(|cell| Cell {
                text: clean_text(
                    &footnote_re.replace_all(&cell.text().collect::<String>(), ""),
                ),
                link: cell
                    .select(&link_selector)
                    .next()
                    .and_then(|a| a.value().attr("href"))
                    .map(|href| href.to_string()),
            })
            .collect();

        // Only a leading row that actually uses th cells is a header row;
        // a headerless table keeps its first row as data
        if i == 0 && tr.select(&header_cell_selector).next().is_some() {
            headers = cells.into_iter().map(|c| c.text).collect();
        } else {
            rows.push(cells);
        }
    }

    Table { headers, rows }
}

/// Collapse all whitespace runs to single spaces and trim
pub fn clean_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENTS_BY_HEADING: &str = r#"<!DOCTYPE html>
<html><body>
<h2>Past events</h2>
<table><tr><th>Date</th></tr><tr><td>old</td></tr></table>
<h2>Scheduled events</h2>
<table>
  <tr><th>Date</th><th>Event</th><th>Location</th></tr>
  <tr><td>January 17, 2026</td><td><a href="/wiki/UFC_325">UFC 325</a></td><td>Las Vegas</td></tr>
</table>
</body></html>"#;

    const EVENTS_BY_SCORE: &str = r#"<!DOCTYPE html>
<html><body>
<table class="wikitable"><tr><th>Rank</th><th>Country</th></tr></table>
<table class="wikitable">
  <tr><th>Date</th><th>Event</th><th>Venue</th></tr>
  <tr><td>March 7, 2026</td><td>UFC Fight Night</td><td>London</td></tr>
</table>
</body></html>"#;

    const CARD_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<h3>Fight card</h3>
<table>
  <tr><th>Weight class</th><th>Fighter 1</th><th>Fighter 2</th></tr>
  <tr><td>Heavyweight</td><td>Jon Jones</td><td>Tom Aspinall</td></tr>
</table>
</body></html>"#;

    #[test]
    fn test_events_table_by_heading() {
        let document = Html::parse_document(EVENTS_BY_HEADING);
        let table = find_table(&document, TableKind::Events).unwrap();
        assert_eq!(table.headers, vec!["Date", "Event", "Location"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][1].text, "UFC 325");
        assert_eq!(table.rows[0][1].link.as_deref(), Some("/wiki/UFC_325"));
    }

    #[test]
    fn test_events_table_by_header_score() {
        let document = Html::parse_document(EVENTS_BY_SCORE);
        let table = find_table(&document, TableKind::Events).unwrap();
        // First wikitable scores only 0; second has date + event
        assert_eq!(table.rows[0][1].text, "UFC Fight Night");
    }

    #[test]
    fn test_card_table_by_heading() {
        let document = Html::parse_document(CARD_PAGE);
        let table = find_table(&document, TableKind::Card).unwrap();
        assert_eq!(table.rows[0][0].text, "Heavyweight");
    }

    #[test]
    fn test_miss_is_none() {
        let document = Html::parse_document("<html><body><p>nothing here</p></body></html>");
        assert!(find_table(&document, TableKind::Events).is_none());
        assert!(find_table(&document, TableKind::Card).is_none());
    }

    #[test]
    fn test_heading_match_is_case_insensitive() {
        let html = EVENTS_BY_HEADING.replace("Scheduled events", "SCHEDULED EVENTS");
        let document = Html::parse_document(&html);
        assert!(find_table(&document, TableKind::Events).is_some());
    }

    #[test]
    fn test_wrong_heading_does_not_leak() {
        // A table after a non-matching heading must not win the heading pass
        let html = r#"<html><body>
            <h2>Results</h2>
            <table><tr><th>foo</th></tr></table>
        </body></html>"#;
        let document = Html::parse_document(html);
        assert!(find_table(&document, TableKind::Events).is_none());
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  Jon \n  Jones \t"), "Jon Jones");
    }

    #[test]
    fn test_headerless_table_keeps_first_row() {
        let html = r#"<html><body>
            <h3>Fight card</h3>
            <table>
              <tr><td>Jon Jones</td><td>Tom Aspinall</td><td>Heavyweight</td></tr>
              <tr><td>Ilia Topuria</td><td>Max Holloway</td><td>Featherweight</td></tr>
            </table>
        </body></html>"#;
        let document = Html::parse_document(html);
        let table = find_table(&document, TableKind::Card).unwrap();
        assert!(table.headers.is_empty());
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0].text, "Jon Jones");
    }

    #[test]
    fn test_footnote_markers_stripped() {
        let html = r#"<html><body>
            <h2>Scheduled events</h2>
            <table>
              <tr><th>Date</th><th>Event</th><th>Location</th></tr>
              <tr><td>January 17, 2026[2]</td><td>UFC 325[a]</td><td>Las Vegas</td></tr>
            </table>
        </body></html>"#;
        let document = Html::parse_document(html);
        let table = find_table(&document, TableKind::Events).unwrap();
        assert_eq!(table.rows[0][0].text, "January 17, 2026");
        assert_eq!(table.rows[0][1].text, "UFC 325");
    }
}
