use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::Duration;

use rand::Rng;
use rand::rngs::ThreadRng;
use serde_json::{Value, json};

use crate::config::AppConfig;
use crate::report::build_day_report;
use crate::score_fetch::parse_score_response_json;
use crate::state::{Delta, ProviderCommand};

const FAKE_MEMBERS: [&str; 7] = ["あきら", "ゆうた", "けんじ", "みほ", "たかし", "りん", "しょう"];

/// Offline provider: synthesizes a plausible day payload and pushes it
/// through the real parse + report pipeline, so demo runs exercise the
/// same code paths as live ones.
pub fn spawn_fake_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>, config: AppConfig) {
    thread::spawn(move || {
        let mut rng = rand::thread_rng();
        while let Ok(cmd) = cmd_rx.recv() {
            let ProviderCommand::FetchDay { name, date } = cmd;
            thread::sleep(Duration::from_millis(400));

            let raw = fake_day_json(&mut rng, &name, &date);
            match parse_score_response_json(&raw) {
                Ok(response) => {
                    let report = build_day_report(&response, &name, config.utc_offset_hours);
                    let _ = tx.send(Delta::SetReport(report));
                }
                Err(err) => {
                    let _ = tx.send(Delta::Log(format!("[WARN] Fake feed parse error: {err:#}")));
                }
            }
        }
    });
}

fn fake_day_json(rng: &mut ThreadRng, name: &str, date: &str) -> String {
    let games = fake_games(rng);
    let half = games.len() as f64;
    let total: f64 = games.iter().filter_map(|g| g.1).sum();
    let high = games
        .iter()
        .filter_map(|g| g.1)
        .fold(f64::NEG_INFINITY, f64::max);
    let avg_rank = games.iter().filter_map(|g| g.2).sum::<f64>() / half.max(1.0);

    let game_values: Vec<Value> = games
        .iter()
        .map(|(time, score, rank)| json!({ "time": time, "score": score, "rank": rank }))
        .collect();

    let mut all: Vec<Value> = vec![json!({
        "name": name,
        "半荘数": half,
        "総スコア": total,
        "最高スコア": high,
        "平均スコア": total / half.max(1.0),
        "平均着順": avg_rank,
    })];
    for (i, member) in FAKE_MEMBERS.iter().enumerate() {
        all.push(fake_member(rng, member, i % 2 == 0));
    }

    json!({
        "updateStatus": format!("{date} 更新"),
        "no": format!("{}", rng.gen_range(1..=60)),
        "name": name,
        "date": date,
        "all": all,
        "summary": {
            "半荘数": half,
            "総スコア": total,
            "最高スコア": high,
            "平均スコア": total / half.max(1.0),
            "平均着順": avg_rank,
        },
        "games": game_values,
    })
    .to_string()
}

/// (time, score, rank) triples, deliberately out of feed order.
fn fake_games(rng: &mut ThreadRng) -> Vec<(String, Option<f64>, Option<f64>)> {
    let count = rng.gen_range(2..=6);
    let mut games = Vec::with_capacity(count);
    let mut minute = 18 * 60 + rng.gen_range(0..30);
    for i in 0..count {
        let time = if i == 0 && rng.gen_bool(0.2) {
            String::new()
        } else {
            // Sessions past midnight keep counting hours upward (24:40).
            format!("{:02}:{:02}:00", minute / 60, minute % 60)
        };
        minute += rng.gen_range(35..70);

        let score = if rng.gen_bool(0.05) {
            None
        } else {
            Some(rng.gen_range(-600..800) as f64 / 10.0)
        };
        let rank = if rng.gen_bool(0.15) {
            Some(rng.gen_range(2..=7) as f64 / 2.0)
        } else {
            Some(rng.gen_range(1..=4) as f64)
        };
        games.push((time, score, rank));
    }
    if games.len() > 1 {
        let pivot = rng.gen_range(1..games.len());
        games.rotate_left(pivot);
    }
    games
}

fn fake_member(rng: &mut ThreadRng, name: &str, japanese_keys: bool) -> Value {
    let half = rng.gen_range(0..=6);
    let total = rng.gen_range(-900..1200) as f64 / 10.0;
    let high = total.abs() / 2.0 + rng.gen_range(0..300) as f64 / 10.0;
    let avg_rank = rng.gen_range(10..=35) as f64 / 10.0;

    // Half the synthetic members use the English schema so demo data keeps
    // both resolver paths warm; some omit the optional fields entirely.
    if japanese_keys {
        let mut record = json!({
            "name": name,
            "半荘数": half,
            "総スコア": total,
            "最高スコア": high,
        });
        if rng.gen_bool(0.8) {
            record["平均着順"] = json!(avg_rank);
        }
        record
    } else {
        let mut record = json!({
            "name": name,
            "half": half,
            "total": total,
            "high": high,
        });
        if rng.gen_bool(0.8) {
            record["avgRank"] = json!(avg_rank);
        }
        record
    }
}
