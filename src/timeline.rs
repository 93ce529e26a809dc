use std::collections::HashMap;

use chrono::{FixedOffset, NaiveDate};

use crate::state::GameRow;

/// The seven possible finishing positions in a four-player game; ties are
/// recorded as the half-integer average of the tied seats.
pub const RANK_LABELS: [&str; 7] = ["1", "1.5", "2", "2.5", "3", "3.5", "4"];

/// Sort a day's games oldest-first. The feed's own order is not trusted.
pub fn sort_games_chronologically(games: &mut [GameRow], date: &str, utc_offset_hours: i32) {
    let midnight = day_start_epoch(date, utc_offset_hours);
    games.sort_by_key(|g| midnight + time_offset_secs(&g.time));
}

/// Epoch seconds of the query date's midnight in the configured offset.
/// An unparseable date degrades to the epoch; ordering within the day is
/// then still driven by the time-of-day offsets alone.
fn day_start_epoch(date: &str, utc_offset_hours: i32) -> i64 {
    let Some(offset) = FixedOffset::east_opt(utc_offset_hours * 3600) else {
        return 0;
    };
    let Ok(day) = NaiveDate::parse_from_str(date.trim(), "%Y/%m/%d") else {
        return 0;
    };
    day.and_hms_opt(0, 0, 0)
        .and_then(|dt| dt.and_local_timezone(offset).single())
        .map(|dt| dt.timestamp())
        .unwrap_or(0)
}

/// Seconds past midnight for an "HH:MM:SS" string. Hours may exceed 23:
/// late-night sessions are logged as e.g. "25:10:00" and land on the next
/// calendar day. Empty and unparseable times count as midnight.
fn time_offset_secs(time: &str) -> i64 {
    let trimmed = time.trim();
    if trimmed.is_empty() {
        return 0;
    }
    let mut parts = trimmed.split(':');
    let hours = parse_part(parts.next());
    let minutes = parse_part(parts.next());
    let seconds = parse_part(parts.next());
    hours * 3600 + minutes * 60 + seconds
}

fn parse_part(part: Option<&str>) -> i64 {
    part.and_then(|p| p.trim().parse::<i64>().ok()).unwrap_or(0)
}

/// Count finishing positions over the fixed half-integer domain. Every
/// label is present in the output, zero or not; ranks outside the domain
/// contribute to no bucket.
pub fn count_ranks(games: &[GameRow]) -> HashMap<&'static str, u32> {
    let mut counts: HashMap<&'static str, u32> =
        RANK_LABELS.iter().map(|label| (*label, 0)).collect();
    for game in games {
        let Some(rank) = game.rank else { continue };
        if let Some(label) = rank_label(rank) {
            if let Some(count) = counts.get_mut(label) {
                *count += 1;
            }
        }
    }
    counts
}

/// Map a numeric rank onto its display label without going through float
/// formatting (1.5 must stay "1.5", never "1.4999...").
pub fn rank_label(rank: f64) -> Option<&'static str> {
    let doubled = rank * 2.0;
    if !doubled.is_finite() || (doubled - doubled.round()).abs() > 1e-9 {
        return None;
    }
    match doubled.round() as i64 {
        2 => Some("1"),
        3 => Some("1.5"),
        4 => Some("2"),
        5 => Some("2.5"),
        6 => Some("3"),
        7 => Some("3.5"),
        8 => Some("4"),
        _ => None,
    }
}
