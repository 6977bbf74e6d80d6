//! Elo rating math: matchup win probability and fair American odds.

/// Default rating for a fighter with no stored history.
pub const DEFAULT_RATING: f64 = 1500.0;

/// Expected score (win probability) for the first fighter.
///
/// Classic Elo expectation with base 10 and a 400-point scale.
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / 400.0))
}

/// Convert a win probability to fair American odds (no margin).
///
/// Probability is clamped to [0.001, 0.999] so neither side of the
/// conversion divides by zero. Favorites (p >= 0.5) come out negative,
/// underdogs positive.
pub fn fair_american(p: f64) -> i64 {
    let p = p.clamp(0.001, 0.999);
    if p >= 0.5 {
        (-100.0 * p / (1.0 - p)).round() as i64
    } else {
        (100.0 * (1.0 - p) / p).round() as i64
    }
}
