use std::collections::{HashMap, VecDeque};

use crate::config::AppConfig;
use crate::format::STATUS_PLACEHOLDER;

/// Canonical per-member statistics for one day, derived from one raw
/// record. Immutable once built; rebuilt on every fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStats {
    pub name: String,
    pub half: f64,
    pub total: f64,
    pub high: f64,
    pub avg: f64,
    /// None when the feed supplied no usable average finishing position.
    pub avg_rank: Option<f64>,
}

/// One game played by the queried member on the queried date.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRow {
    /// "HH:MM:SS" from the feed, possibly empty. Hours past 23 mean a
    /// late-night session spilling over the calendar day.
    pub time: String,
    pub score: Option<f64>,
    pub rank: Option<f64>,
}

/// Everything the UI renders for one (member, date) query.
#[derive(Debug, Clone)]
pub struct DayReport {
    pub update_status: String,
    pub member_no: String,
    pub member_name: String,
    /// Members with at least one recorded game.
    pub visitor_count: usize,
    /// Formatted ranks for half, total, high, avg, avg_rank.
    pub ranks_row: [String; 5],
    pub summary_row: [String; 5],
    /// Chronologically ordered, oldest first.
    pub games: Vec<GameRow>,
    pub rank_counts: HashMap<&'static str, u32>,
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetReport(DayReport),
    SetStatus(String),
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchDay { name: String, date: String },
}

pub struct AppState {
    pub name_input: String,
    pub day: u32,
    pub loading: bool,
    pub status: String,
    pub report: Option<DayReport>,
    pub games_scroll: u16,
    pub logs: VecDeque<String>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            name_input: config.prefill_name.clone(),
            day: config.initial_day(),
            loading: false,
            status: STATUS_PLACEHOLDER.to_string(),
            report: None,
            games_scroll: 0,
            logs: VecDeque::with_capacity(64),
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        if self.logs.len() >= 200 {
            self.logs.pop_front();
        }
        self.logs.push_back(msg.into());
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetReport(report) => {
            state.loading = false;
            state.status = report.update_status.clone();
            state.games_scroll = 0;
            state.report = Some(report);
        }
        Delta::SetStatus(status) => {
            // Upstream error or transport failure; the last report stays
            // visible underneath the status line.
            state.loading = false;
            state.status = status;
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
