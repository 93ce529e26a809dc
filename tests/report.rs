use std::fs;
use std::path::PathBuf;

use janlog_terminal::report::build_day_report;
use janlog_terminal::score_fetch::parse_score_response_json;

const JST: i32 = 9;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn full_day_report_from_fixture() {
    let response = parse_score_response_json(&read_fixture("score_day.json")).expect("fixture");
    let report = build_day_report(&response, "さくら", JST);

    assert_eq!(report.update_status, "1/15 22:10 更新");
    assert_eq!(report.member_no, "12");
    assert_eq!(report.member_name, "さくら");
    assert_eq!(report.visitor_count, 3);

    // half, total, high, avg, avg_rank for さくら.
    assert_eq!(
        report.ranks_row,
        ["1位", "1位", "2位", "3位", "1位"].map(str::to_string)
    );
    assert_eq!(
        report.summary_row,
        ["5半荘", "100.0pt", "52.3pt", "20.000pt", "1.800位"].map(str::to_string)
    );

    let times: Vec<&str> = report.games.iter().map(|g| g.time.as_str()).collect();
    assert_eq!(times, ["", "18:05:00", "19:45:00", "21:30:00", "25:10:00"]);

    assert_eq!(report.rank_counts.get("1"), Some(&1));
    assert_eq!(report.rank_counts.get("1.5"), Some(&1));
    assert_eq!(report.rank_counts.get("2"), Some(&1));
    assert_eq!(report.rank_counts.get("3"), Some(&1));
    // The malformed rank 5 is ignored, not an error.
    assert_eq!(report.rank_counts.values().sum::<u32>(), 4);
}

#[test]
fn english_schema_builds_the_same_report() {
    let jp = parse_score_response_json(&read_fixture("score_day.json")).expect("jp fixture");
    let en =
        parse_score_response_json(&read_fixture("score_day_english.json")).expect("en fixture");

    let jp_report = build_day_report(&jp, "さくら", JST);
    let en_report = build_day_report(&en, "さくら", JST);

    assert_eq!(jp_report.ranks_row, en_report.ranks_row);
    assert_eq!(jp_report.summary_row, en_report.summary_row);
    assert_eq!(jp_report.visitor_count, en_report.visitor_count);
    assert_eq!(jp_report.games, en_report.games);
}

#[test]
fn unknown_member_gets_no_data_cells() {
    let mut response =
        parse_score_response_json(&read_fixture("score_day.json")).expect("fixture");
    response.member_name = None;
    response.summary = None;

    let report = build_day_report(&response, "よそもの", JST);
    assert_eq!(report.member_name, "よそもの");
    assert_eq!(report.ranks_row, ["データなし"; 5].map(str::to_string));
    assert_eq!(report.summary_row, ["データなし"; 5].map(str::to_string));
    // The rest of the room is still counted.
    assert_eq!(report.visitor_count, 3);
}

#[test]
fn empty_payload_builds_an_empty_report() {
    let response = parse_score_response_json("null").expect("null payload");
    let report = build_day_report(&response, "さくら", JST);

    assert_eq!(report.update_status, "ー");
    assert_eq!(report.member_no, "不明");
    assert_eq!(report.visitor_count, 0);
    assert_eq!(report.ranks_row, ["データなし"; 5].map(str::to_string));
    assert!(report.games.is_empty());
    assert_eq!(report.rank_counts.values().sum::<u32>(), 0);
}

#[test]
fn payload_spelling_of_the_name_wins() {
    let raw = r#"{
        "name": "さくら",
        "date": "2026/01/15",
        "all": [{ "name": "さくら", "half": 1, "total": 10, "high": 10 }]
    }"#;
    let response = parse_score_response_json(raw).expect("payload");
    // The user typed a different casing/alias; ranks resolve via the
    // canonical name returned by the endpoint.
    let report = build_day_report(&response, "sakura", JST);
    assert_eq!(report.member_name, "さくら");
    assert_eq!(report.ranks_row[0], "1位");
}
