use std::fmt::Write as _;

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use janlog_terminal::report::build_day_report;
use janlog_terminal::score_fetch::parse_score_response_json;

const DAY_JSON: &str = include_str!("../tests/fixtures/score_day.json");

fn bench_parse_day(c: &mut Criterion) {
    c.bench_function("parse_day", |b| {
        b.iter(|| {
            let response = parse_score_response_json(black_box(DAY_JSON)).unwrap();
            black_box(response.games.len());
        })
    });
}

fn bench_build_report(c: &mut Criterion) {
    let response = parse_score_response_json(DAY_JSON).unwrap();
    c.bench_function("build_report", |b| {
        b.iter(|| {
            let report = build_day_report(black_box(&response), "さくら", 9);
            black_box(report.visitor_count);
        })
    });
}

fn bench_build_report_big_room(c: &mut Criterion) {
    let response = parse_score_response_json(&big_room_json(300)).unwrap();
    c.bench_function("build_report_300_members", |b| {
        b.iter(|| {
            let report = build_day_report(black_box(&response), "member043", 9);
            black_box(report.visitor_count);
        })
    });
}

fn big_room_json(members: usize) -> String {
    let mut all = String::new();
    for i in 0..members {
        if i > 0 {
            all.push(',');
        }
        // Alternate the two key schemas; sprinkle ties and missing fields.
        if i % 2 == 0 {
            let _ = write!(
                all,
                r#"{{"name":"member{i:03}","半荘数":{},"総スコア":{},"最高スコア":{},"平均着順":{}}}"#,
                i % 7,
                (i % 25) * 10,
                40 + (i % 30),
                1.0 + (i % 12) as f64 / 4.0
            );
        } else {
            let _ = write!(
                all,
                r#"{{"name":"member{i:03}","half":{},"total":{},"high":{}}}"#,
                i % 7,
                (i % 25) * 10,
                40 + (i % 30)
            );
        }
    }
    format!(
        r#"{{"name":"member043","date":"2026/01/15","all":[{all}],"games":[{{"time":"18:05:00","score":32.5,"rank":1.5}},{{"time":"","score":-12,"rank":3}}]}}"#
    )
}

criterion_group!(
    benches,
    bench_parse_day,
    bench_build_report,
    bench_build_report_big_room
);
criterion_main!(benches);
