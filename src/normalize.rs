use serde_json::Value;

use crate::state::PlayerStats;

/// Candidate keys per semantic field, in resolution order. The aggregation
/// sheet emits Japanese column headers; older exports use the short English
/// names. Adding a third schema is one more entry per list.
pub const NAME_KEYS: &[&str] = &["name"];
pub const HALF_KEYS: &[&str] = &["半荘数", "half"];
pub const TOTAL_KEYS: &[&str] = &["総スコア", "total"];
pub const HIGH_KEYS: &[&str] = &["最高スコア", "high"];
pub const AVG_KEYS: &[&str] = &["平均スコア", "avg"];
pub const AVG_RANK_KEYS: &[&str] = &["平均着順", "avgRank"];

/// Canonicalize every raw member record. Same order and count as the input;
/// records with zero games are kept here and excluded later by the ranker.
pub fn normalize_players(records: &[Value]) -> Vec<PlayerStats> {
    records.iter().map(normalize_player).collect()
}

fn normalize_player(record: &Value) -> PlayerStats {
    let name = pick_string(record, NAME_KEYS).unwrap_or_default();
    let half = resolve_number(record, HALF_KEYS, 0.0).max(0.0);
    let total = resolve_number(record, TOTAL_KEYS, 0.0);
    let high = resolve_number(record, HIGH_KEYS, 0.0);

    // An explicit average wins even when it disagrees with total/half.
    let avg = match first_present(record, AVG_KEYS) {
        Some(value) => as_finite_number(value).unwrap_or(0.0),
        None if half > 0.0 => total / half,
        None => 0.0,
    };

    // None means "no usable value", which must sort as worst, not as zero.
    let avg_rank = resolve_optional(record, AVG_RANK_KEYS);

    PlayerStats {
        name,
        half,
        total,
        high,
        avg,
        avg_rank,
    }
}

/// First candidate key that is present with a non-null value. Presence wins
/// the resolution even when the value later fails numeric coercion.
fn first_present<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    for key in keys {
        match record.get(*key) {
            None | Some(Value::Null) => continue,
            Some(value) => return Some(value),
        }
    }
    None
}

pub fn resolve_number(record: &Value, keys: &[&str], default: f64) -> f64 {
    first_present(record, keys)
        .and_then(as_finite_number)
        .unwrap_or(default)
}

pub fn resolve_optional(record: &Value, keys: &[&str]) -> Option<f64> {
    first_present(record, keys).and_then(as_finite_number)
}

/// Numbers and numeric strings count; empty strings and anything
/// non-finite do not.
pub fn as_finite_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}

pub fn pick_string(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            match v {
                Value::String(s) => {
                    let trimmed = s.trim();
                    if !trimmed.is_empty() {
                        return Some(trimmed.to_string());
                    }
                }
                Value::Number(n) => return Some(n.to_string()),
                _ => {}
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn native_key_wins_over_english() {
        let record = json!({ "name": "A", "半荘数": 4, "half": 9, "総スコア": 10 });
        let players = normalize_players(std::slice::from_ref(&record));
        assert_eq!(players[0].half, 4.0);
    }

    #[test]
    fn present_but_unparseable_coerces_to_default() {
        // The garbage native value must not fall through to the English key.
        let record = json!({ "name": "A", "半荘数": "garbage", "half": 9 });
        let players = normalize_players(std::slice::from_ref(&record));
        assert_eq!(players[0].half, 0.0);
    }

    #[test]
    fn null_counts_as_absent() {
        let record = json!({ "name": "A", "半荘数": null, "half": 9 });
        let players = normalize_players(std::slice::from_ref(&record));
        assert_eq!(players[0].half, 9.0);
    }

    #[test]
    fn avg_falls_back_to_total_over_half() {
        let record = json!({ "name": "A", "half": 4, "total": 100 });
        let players = normalize_players(std::slice::from_ref(&record));
        assert_eq!(players[0].avg, 25.0);

        let zero = json!({ "name": "B", "half": 0, "total": 100 });
        let players = normalize_players(std::slice::from_ref(&zero));
        assert_eq!(players[0].avg, 0.0);
    }

    #[test]
    fn explicit_avg_wins_even_when_it_disagrees() {
        // total/half would be 20; the sheet said 99, and the sheet is
        // trusted. If this ever trips in real data the sheet is at fault.
        let record = json!({ "name": "A", "half": 5, "total": 100, "平均スコア": 99 });
        let players = normalize_players(std::slice::from_ref(&record));
        assert_eq!(players[0].avg, 99.0);
    }

    #[test]
    fn avg_rank_empty_string_is_none_not_zero() {
        let record = json!({ "name": "A", "平均着順": "" });
        let players = normalize_players(std::slice::from_ref(&record));
        assert_eq!(players[0].avg_rank, None);

        let zero = json!({ "name": "B", "平均着順": 0 });
        let players = normalize_players(std::slice::from_ref(&zero));
        assert_eq!(players[0].avg_rank, Some(0.0));
    }

    #[test]
    fn numeric_strings_parse() {
        let record = json!({ "name": "A", "総スコア": "52.3" });
        let players = normalize_players(std::slice::from_ref(&record));
        assert_eq!(players[0].total, 52.3);
    }
}
