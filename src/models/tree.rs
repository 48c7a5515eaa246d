// Year -> month -> day -> hour -> 5-minute tree assembled per request for display.
// Keys are the calendar strings vnstat prints ("2024", "03", "15", "14"), so the
// JSON shape allows direct lookup without re-parsing dates.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::TrafficRecord;

/// Months of one year, keyed by two-digit month.
pub type YearStats = BTreeMap<String, MonthStats>;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct StatsTree {
    pub years: BTreeMap<String, YearStats>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MonthStats {
    /// The month's own totals row, serialized as "_month" beside the day keys.
    #[serde(rename = "_month", skip_serializing_if = "Option::is_none")]
    pub month: Option<TrafficRecord>,
    #[serde(flatten)]
    pub days: BTreeMap<String, DayStats>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DayStats {
    #[serde(rename = "_day", skip_serializing_if = "Option::is_none")]
    pub day: Option<TrafficRecord>,
    #[serde(flatten)]
    pub hours: BTreeMap<String, HourStats>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HourStats {
    #[serde(rename = "_hour", skip_serializing_if = "Option::is_none")]
    pub hour: Option<TrafficRecord>,
    /// 5-minute rows keyed by their "HH:MM" marker, beside the "_hour" slot.
    #[serde(flatten)]
    pub minutes: BTreeMap<String, TrafficRecord>,
}

/// Tree trimmed to the newest requested years, plus what was cut.
#[derive(Debug, Clone)]
pub struct YearSelection {
    pub tree: StatsTree,
    pub years_shown: usize,
    pub has_more: bool,
}

impl StatsTree {
    /// Places every record at its calendar coordinate. Records with an empty or
    /// malformed date are skipped; a coordinate collision keeps the later record.
    /// No aggregation happens here, vnstat already emits totals per bucket.
    pub fn build(
        monthly: &[TrafficRecord],
        daily: &[TrafficRecord],
        hourly: &[TrafficRecord],
        five_minute: &[TrafficRecord],
    ) -> Self {
        let mut tree = StatsTree::default();

        for row in monthly {
            let Some((y, m)) = split_month(&row.date) else {
                continue;
            };
            tree.month_entry(y, m).month = Some(row.clone());
        }

        for row in daily {
            let Some((y, m, d)) = split_day(&row.date) else {
                continue;
            };
            tree.day_entry(y, m, d).day = Some(row.clone());
        }

        for row in hourly {
            let Some((y, m, d)) = split_day(&row.date) else {
                continue;
            };
            let Some(h) = row.hour.as_deref() else {
                continue;
            };
            tree.hour_entry(y, m, d, h).hour = Some(row.clone());
        }

        for row in five_minute {
            let Some((y, m, d)) = split_day(&row.date) else {
                continue;
            };
            let (Some(h), Some(minute)) = (row.hour.as_deref(), row.minute.as_deref()) else {
                continue;
            };
            tree.hour_entry(y, m, d, h)
                .minutes
                .insert(minute.to_string(), row.clone());
        }

        tree
    }

    /// Keeps the newest `requested` years. Zero or negative requests clamp to
    /// one year; requests past the available history clamp to what exists.
    pub fn select_years(mut self, requested: i64) -> YearSelection {
        let available = self.years.len();
        let keep = usize::try_from(requested.max(1)).unwrap_or(1).min(available);
        while self.years.len() > keep {
            self.years.pop_first();
        }
        YearSelection {
            tree: self,
            years_shown: keep,
            has_more: keep < available,
        }
    }

    fn month_entry(&mut self, year: &str, month: &str) -> &mut MonthStats {
        self.years
            .entry(year.to_string())
            .or_default()
            .entry(month.to_string())
            .or_default()
    }

    fn day_entry(&mut self, year: &str, month: &str, day: &str) -> &mut DayStats {
        self.month_entry(year, month)
            .days
            .entry(day.to_string())
            .or_default()
    }

    fn hour_entry(&mut self, year: &str, month: &str, day: &str, hour: &str) -> &mut HourStats {
        self.day_entry(year, month, day)
            .hours
            .entry(hour.to_string())
            .or_default()
    }
}

fn split_month(date: &str) -> Option<(&str, &str)> {
    let mut parts = date.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), None) if !y.is_empty() && !m.is_empty() => Some((y, m)),
        _ => None,
    }
}

fn split_day(date: &str) -> Option<(&str, &str, &str)> {
    let mut parts = date.split('-');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d), None) if !y.is_empty() && !m.is_empty() && !d.is_empty() => {
            Some((y, m, d))
        }
        _ => None,
    }
}
