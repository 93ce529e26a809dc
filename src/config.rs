use std::env;

use chrono::{Datelike, FixedOffset, NaiveDate, Timelike, Utc};

/// Weekday suffixes for the day picker, Sunday first.
const WEEKDAYS_JA: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// Runtime configuration, read once at startup. The tracked month is fixed
/// per deployment (one sheet per month), so the day picker only spans it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Apps Script exec URL of the aggregation endpoint. Empty means the
    /// fake feed runs instead.
    pub api_url: String,
    pub year: i32,
    pub month: u32,
    pub day_min: u32,
    pub day_max: u32,
    /// Fixed UTC offset of the venue clock, explicit so the timeline math
    /// never reads the ambient system timezone.
    pub utc_offset_hours: i32,
    pub cache_ttl_secs: u64,
    pub prefill_name: String,
    pub fake_feed: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_url = env::var("JANLOG_API_URL").unwrap_or_default();
        let year = env::var("JANLOG_YEAR")
            .ok()
            .and_then(|val| val.parse::<i32>().ok())
            .unwrap_or(2026);
        let month = env::var("JANLOG_MONTH")
            .ok()
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(1)
            .clamp(1, 12);
        let day_min = env::var("JANLOG_DAY_MIN")
            .ok()
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(1)
            .clamp(1, 31);
        let day_max = env::var("JANLOG_DAY_MAX")
            .ok()
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(31)
            .clamp(day_min, 31);
        let utc_offset_hours = env::var("JANLOG_UTC_OFFSET_HOURS")
            .ok()
            .and_then(|val| val.parse::<i32>().ok())
            .unwrap_or(9)
            .clamp(-12, 14);
        let cache_ttl_secs = env::var("JANLOG_CACHE_TTL_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(120);
        let prefill_name = env::var("JANLOG_NAME").unwrap_or_default();
        let fake_requested = env::var("JANLOG_FAKE")
            .map(|val| val == "1" || val.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            fake_feed: fake_requested || api_url.trim().is_empty(),
            api_url,
            year,
            month,
            day_min,
            day_max,
            utc_offset_hours,
            cache_ttl_secs,
            prefill_name,
        }
    }

    /// Last selectable day: the month's end capped by the configured window.
    pub fn last_day(&self) -> u32 {
        self.days_in_month().min(self.day_max)
    }

    fn days_in_month(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1);
        let next = NaiveDate::from_ymd_opt(next_year, next_month, 1);
        match (first, next) {
            (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
            _ => 31,
        }
    }

    pub fn clamp_day(&self, day: u32) -> u32 {
        day.clamp(self.day_min, self.last_day())
    }

    /// "yyyy/MM/dd" as the aggregation endpoint expects.
    pub fn date_param(&self, day: u32) -> String {
        format!("{}/{:02}/{:02}", self.year, self.month, day)
    }

    /// "M/d (曜)" for the header.
    pub fn day_label(&self, day: u32) -> String {
        let weekday = NaiveDate::from_ymd_opt(self.year, self.month, day)
            .map(|d| WEEKDAYS_JA[d.weekday().num_days_from_sunday() as usize])
            .unwrap_or("?");
        format!("{}/{} ({})", self.month, day, weekday)
    }

    /// Day results land on the sheet in the evening; before 20:00 venue
    /// time the previous day is the one people want to see.
    pub fn initial_day(&self) -> u32 {
        let Some(offset) = FixedOffset::east_opt(self.utc_offset_hours * 3600) else {
            return self.day_min;
        };
        let now = Utc::now().with_timezone(&offset);
        let mut base = now.date_naive();
        if now.hour() < 20 {
            base = base.pred_opt().unwrap_or(base);
        }
        if base.year() != self.year || base.month() != self.month {
            return self.day_min;
        }
        self.clamp_day(base.day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            api_url: String::new(),
            year: 2026,
            month: 1,
            day_min: 1,
            day_max: 31,
            utc_offset_hours: 9,
            cache_ttl_secs: 0,
            prefill_name: String::new(),
            fake_feed: true,
        }
    }

    #[test]
    fn date_param_is_zero_padded() {
        assert_eq!(config().date_param(5), "2026/01/05");
    }

    #[test]
    fn last_day_respects_short_months() {
        let mut cfg = config();
        cfg.month = 2;
        assert_eq!(cfg.last_day(), 28);
        cfg.month = 4;
        cfg.day_max = 20;
        assert_eq!(cfg.last_day(), 20);
    }

    #[test]
    fn day_label_has_weekday() {
        // 2026-01-15 is a Thursday.
        assert_eq!(config().day_label(15), "1/15 (木)");
    }
}
