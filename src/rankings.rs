use std::collections::HashMap;

use crate::state::PlayerStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    HigherBetter,
    LowerBetter,
}

/// Competition-style rank maps keyed by member name, one per metric.
/// A name absent from a map simply has no rank for that leaderboard.
#[derive(Debug, Clone, Default)]
pub struct RankMaps {
    pub half: HashMap<String, u32>,
    pub total: HashMap<String, u32>,
    pub high: HashMap<String, u32>,
    pub avg: HashMap<String, u32>,
    pub avg_rank: HashMap<String, u32>,
}

/// Build the five leaderboards over members with at least one recorded game.
pub fn build_all_rank_maps(players: &[PlayerStats]) -> RankMaps {
    let ranked: Vec<&PlayerStats> = players.iter().filter(|p| p.half > 0.0).collect();
    RankMaps {
        half: rank_map(&ranked, |p| Some(p.half), Direction::HigherBetter),
        total: rank_map(&ranked, |p| Some(p.total), Direction::HigherBetter),
        high: rank_map(&ranked, |p| Some(p.high), Direction::HigherBetter),
        avg: rank_map(&ranked, |p| Some(p.avg), Direction::HigherBetter),
        // A lower average finishing position is the better result.
        avg_rank: rank_map(&ranked, |p| p.avg_rank, Direction::LowerBetter),
    }
}

/// Equal values share a rank; the next distinct value's rank is one plus the
/// count of entries strictly ahead of it ([10, 10, 8] ranks as [1, 1, 3]).
fn rank_map(
    players: &[&PlayerStats],
    metric: impl Fn(&PlayerStats) -> Option<f64>,
    dir: Direction,
) -> HashMap<String, u32> {
    let mut pairs: Vec<(&str, f64)> = players
        .iter()
        .map(|p| {
            // Missing values sort last in either direction, tied together.
            let value = metric(p).unwrap_or(match dir {
                Direction::HigherBetter => f64::NEG_INFINITY,
                Direction::LowerBetter => f64::INFINITY,
            });
            (p.name.as_str(), value)
        })
        .collect();

    pairs.sort_by(|a, b| match dir {
        Direction::HigherBetter => b.1.total_cmp(&a.1),
        Direction::LowerBetter => a.1.total_cmp(&b.1),
    });

    let mut map = HashMap::with_capacity(pairs.len());
    let mut prev: Option<f64> = None;
    let mut last_rank = 0u32;
    for (i, (name, value)) in pairs.iter().enumerate() {
        if prev != Some(*value) {
            last_rank = i as u32 + 1;
            prev = Some(*value);
        }
        map.insert((*name).to_string(), last_rank);
    }
    map
}
