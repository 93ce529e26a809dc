use std::fs;
use std::path::PathBuf;

use serde_json::json;

use janlog_terminal::normalize::normalize_players;
use janlog_terminal::rankings::build_all_rank_maps;
use janlog_terminal::score_fetch::parse_score_response_json;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn both_key_schemas_normalize_identically() {
    let jp = parse_score_response_json(&read_fixture("score_day.json")).expect("jp fixture");
    let en =
        parse_score_response_json(&read_fixture("score_day_english.json")).expect("en fixture");

    let jp_players = normalize_players(&jp.all);
    let en_players = normalize_players(&en.all);
    assert_eq!(jp_players, en_players);

    // あきら has no explicit average in either schema; both sides must take
    // the same total/half fallback.
    let akira = jp_players.iter().find(|p| p.name == "あきら").unwrap();
    assert!((akira.avg - 100.0 / 3.0).abs() < 1e-12);
}

#[test]
fn fixture_rank_maps() {
    let response = parse_score_response_json(&read_fixture("score_day.json")).expect("fixture");
    let players = normalize_players(&response.all);
    let maps = build_all_rank_maps(&players);

    // Tied totals share first place and the next rank skips the gap.
    assert_eq!(maps.total.get("さくら"), Some(&1));
    assert_eq!(maps.total.get("あきら"), Some(&1));
    assert_eq!(maps.total.get("けんじ"), Some(&3));

    assert_eq!(maps.half.get("さくら"), Some(&1));
    assert_eq!(maps.high.get("さくら"), Some(&2));
    assert_eq!(maps.avg.get("さくら"), Some(&3));

    // Ascending metric: the lowest average finish wins.
    assert_eq!(maps.avg_rank.get("さくら"), Some(&1));
    assert_eq!(maps.avg_rank.get("あきら"), Some(&2));
    assert_eq!(maps.avg_rank.get("けんじ"), Some(&2));

    // Zero recorded games keeps みほ off every leaderboard.
    assert_eq!(maps.total.get("みほ"), None);
    assert_eq!(maps.avg_rank.get("みほ"), None);
}

#[test]
fn three_member_scenario() {
    let all = vec![
        json!({ "name": "A", "total": 100, "half": 5 }),
        json!({ "name": "B", "total": 100, "half": 3 }),
        json!({ "name": "C", "total": 50, "half": 2 }),
    ];
    let players = normalize_players(&all);
    assert_eq!(players.iter().filter(|p| p.half > 0.0).count(), 3);

    let maps = build_all_rank_maps(&players);
    assert_eq!(maps.total.get("A"), Some(&1));
    assert_eq!(maps.total.get("B"), Some(&1));
    assert_eq!(maps.total.get("C"), Some(&3));
}

#[test]
fn absent_name_is_simply_unranked() {
    let all = vec![json!({ "name": "A", "total": 10, "half": 1 })];
    let maps = build_all_rank_maps(&normalize_players(&all));
    assert_eq!(maps.total.get("does-not-play-here"), None);
}
