//! Score derivation and leaderboard ordering.
//!
//! Pure functions over profiles; no backend coupling, no state between
//! calls. A ranking can be recomputed at any time from a store snapshot.

use std::collections::HashMap;

use crate::core::GearProfile;

/// Gearscore formula: `(ap + aap) / 2 + dp`, rounded to two decimals.
///
/// Ties round to even (banker's rounding). With integer inputs the raw
/// value only ever lands on `.0` or `.5`, so the mode is fixed here to
/// keep ranking order stable should the formula ever grow fractional
/// terms.
pub fn score(ap: i64, aap: i64, dp: i64) -> f64 {
    round2((ap + aap) as f64 / 2.0 + dp as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Order records by gearscore descending. Equal scores fall back to
/// user id ascending, so the order is deterministic across runs.
pub fn rank(records: HashMap<u64, GearProfile>) -> Vec<(u64, GearProfile)> {
    let mut entries: Vec<(u64, GearProfile)> = records.into_iter().collect();
    entries.sort_by(|(a_id, a), (b_id, b)| {
        b.gearscore()
            .total_cmp(&a.gearscore())
            .then_with(|| a_id.cmp(b_id))
    });
    entries
}

/// Presentational label for a 1-based leaderboard position: "1st", "2nd",
/// "3rd", "4th", ... Carries no ordering semantics of its own.
pub fn placement(position: usize) -> String {
    let suffix = match position % 100 {
        11..=13 => "th",
        _ => match position % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{position}{suffix}")
}
