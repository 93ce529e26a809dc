use serde_json::Value;

use crate::normalize;

pub const NO_DATA: &str = "データなし";
pub const SCORE_MISSING: &str = "データ不足";
pub const NO_GAME_RANK: &str = "着順なし";
pub const STATUS_PLACEHOLDER: &str = "ー";

/// Round half-away-from-zero at one decimal. Plain `{:.1}` rounds half to
/// even, which disagrees with the sheet's own rendering of e.g. 10.25.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Per-game score cell: integral scores drop the fraction, everything else
/// keeps one decimal. A missing score is a sentinel, never "0pt".
pub fn format_game_score(score: Option<f64>) -> String {
    let Some(score) = score.filter(|s| s.is_finite()) else {
        return SCORE_MISSING.to_string();
    };
    if (score - score.round()).abs() < 1e-6 {
        format!("{score:.0}pt")
    } else {
        format!("{:.1}pt", round1(score))
    }
}

/// Per-game finishing position; half-integers keep their fraction.
pub fn format_game_rank(rank: Option<f64>) -> String {
    let Some(rank) = rank.filter(|r| r.is_finite()) else {
        return NO_GAME_RANK.to_string();
    };
    if (rank - rank.round()).abs() < 1e-6 {
        format!("{rank:.0}着")
    } else {
        format!("{rank}着")
    }
}

/// Leaderboard rank cell.
pub fn format_rank_value(rank: Option<u32>) -> String {
    match rank {
        Some(rank) => format!("{rank}位"),
        None => NO_DATA.to_string(),
    }
}

/// "HH:MM" for the game card; "-" when the feed sent no time.
pub fn format_time_hhmm(time: &str) -> String {
    let trimmed = time.trim();
    if trimmed.is_empty() {
        return "-".to_string();
    }
    let mut parts = trimmed.split(':');
    let h = parts.next().unwrap_or("0");
    let m = parts.next().unwrap_or("0");
    format!("{h:0>2}:{m:0>2}")
}

/// The five summary cells for the queried member's day. Summary averages
/// are finer-grained statistics than per-game scores, hence three decimals.
pub fn summary_row(summary: Option<&Value>) -> [String; 5] {
    let Some(summary) = summary else {
        return [NO_DATA, NO_DATA, NO_DATA, NO_DATA, NO_DATA].map(str::to_string);
    };
    [
        summary_cell(summary, normalize::HALF_KEYS, |v| format!("{v:.0}半荘")),
        summary_cell(summary, normalize::TOTAL_KEYS, |v| {
            format!("{:.1}pt", round1(v))
        }),
        summary_cell(summary, normalize::HIGH_KEYS, |v| {
            format!("{:.1}pt", round1(v))
        }),
        summary_cell(summary, normalize::AVG_KEYS, |v| {
            format!("{:.3}pt", round3(v))
        }),
        summary_cell(summary, normalize::AVG_RANK_KEYS, |v| {
            format!("{:.3}位", round3(v))
        }),
    ]
}

fn summary_cell(summary: &Value, keys: &[&str], render: impl Fn(f64) -> String) -> String {
    match normalize::resolve_optional(summary, keys) {
        Some(value) => render(value),
        None => NO_DATA.to_string(),
    }
}
