//! Deterministic identifiers for fighters, events and bouts.
//!
//! All functions here are pure: the same raw text always yields the same
//! identifier, which is what makes re-running the ingest pipeline safe.

/// Slugify free text into an identifier-safe token.
///
/// Lowercases, collapses every maximal run of non-alphanumeric characters
/// into a single hyphen and strips hyphens from both ends.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            // Lowercasing can expand to a sequence carrying combining marks
            // (Turkish 'İ' becomes "i" + U+0307); keep only alphanumeric
            // output so the result is a fixed point of slugging.
            for lc in c.to_lowercase() {
                if lc.is_alphanumeric() {
                    out.push(lc);
                }
            }
        } else {
            pending_hyphen = true;
        }
    }

    out
}

/// Build an event identifier from organization code, ISO date and event name.
pub fn event_id(org: &str, iso_date: &str, name: &str) -> String {
    format!("{}_{}_{}", org, iso_date, slug(name))
}

/// Build a bout identifier from the event id and both fighter names.
///
/// Fighter order follows the source row and is not canonicalized: a rematch
/// listed with the corners swapped produces a different bout id.
pub fn bout_id(event_id: &str, fighter_a: &str, fighter_b: &str) -> String {
    format!("{}_{}_{}", event_id, slug(fighter_a), slug(fighter_b))
}
