use anyhow::{Context, Result};
use serde_json::Value;

use crate::http_cache::fetch_json_cached;
use crate::http_client::http_client;
use crate::normalize::{as_finite_number, pick_string};
use crate::state::GameRow;

/// One day's payload from the aggregation endpoint. `all`, `summary` and
/// `games` are optional on the wire and default to empty here.
#[derive(Debug, Clone, Default)]
pub struct ScoreResponse {
    /// Non-empty when the endpoint flagged the query itself as bad; the
    /// string is surfaced verbatim and nothing is computed from the rest.
    pub error: Option<String>,
    pub update_status: Option<String>,
    pub member_no: Option<String>,
    pub member_name: Option<String>,
    /// Query date, "yyyy/MM/dd".
    pub date: String,
    /// Raw per-member records, one per registered member.
    pub all: Vec<Value>,
    /// The queried member's day summary, raw.
    pub summary: Option<Value>,
    pub games: Vec<GameRow>,
}

pub fn fetch_day(api_url: &str, name: &str, date: &str, cache_ttl_secs: u64) -> Result<ScoreResponse> {
    let client = http_client()?;
    let url = reqwest::Url::parse_with_params(api_url, &[("name", name), ("date", date)])
        .context("invalid api url")?;
    let body = fetch_json_cached(client, url.as_str(), cache_ttl_secs).context("request failed")?;
    parse_score_response_json(&body)
}

pub fn parse_score_response_json(raw: &str) -> Result<ScoreResponse> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(ScoreResponse::default());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid score json")?;

    let all = root
        .get("all")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let games = root
        .get("games")
        .and_then(Value::as_array)
        .map(|list| list.iter().map(parse_game).collect())
        .unwrap_or_default();

    Ok(ScoreResponse {
        error: pick_string(&root, &["error"]),
        update_status: pick_string(&root, &["updateStatus"]),
        member_no: pick_string(&root, &["no"]),
        member_name: pick_string(&root, &["name"]),
        date: pick_string(&root, &["date"]).unwrap_or_default(),
        all,
        summary: root.get("summary").filter(|s| s.is_object()).cloned(),
        games,
    })
}

fn parse_game(value: &Value) -> GameRow {
    GameRow {
        time: pick_string(value, &["time"]).unwrap_or_default(),
        score: value.get("score").and_then(as_finite_number),
        rank: value.get("rank").and_then(as_finite_number),
    }
}
