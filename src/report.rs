use crate::format::{self, STATUS_PLACEHOLDER, format_rank_value};
use crate::normalize::normalize_players;
use crate::rankings::build_all_rank_maps;
use crate::score_fetch::ScoreResponse;
use crate::state::DayReport;
use crate::timeline::{count_ranks, sort_games_chronologically};

/// Assemble the full day view from one parsed payload. Pure; callers
/// surface `response.error` themselves instead of calling this.
pub fn build_day_report(
    response: &ScoreResponse,
    queried_name: &str,
    utc_offset_hours: i32,
) -> DayReport {
    let players = normalize_players(&response.all);
    let visitor_count = players.iter().filter(|p| p.half > 0.0).count();
    let maps = build_all_rank_maps(&players);

    // The payload's canonical spelling of the member name wins over the
    // typed query.
    let member_name = response
        .member_name
        .clone()
        .unwrap_or_else(|| queried_name.to_string());

    let ranks_row = [
        format_rank_value(maps.half.get(&member_name).copied()),
        format_rank_value(maps.total.get(&member_name).copied()),
        format_rank_value(maps.high.get(&member_name).copied()),
        format_rank_value(maps.avg.get(&member_name).copied()),
        format_rank_value(maps.avg_rank.get(&member_name).copied()),
    ];

    let summary_row = format::summary_row(response.summary.as_ref());

    let mut games = response.games.clone();
    sort_games_chronologically(&mut games, &response.date, utc_offset_hours);
    let rank_counts = count_ranks(&games);

    DayReport {
        update_status: response
            .update_status
            .clone()
            .unwrap_or_else(|| STATUS_PLACEHOLDER.to_string()),
        member_no: response
            .member_no
            .clone()
            .unwrap_or_else(|| "不明".to_string()),
        member_name,
        visitor_count,
        ranks_row,
        summary_row,
        games,
        rank_counts,
    }
}
