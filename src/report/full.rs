// Verbose-layout parsers: every row carries its own date (and time), columns
// whitespace-separated with no pipes, no section headers to track. Used for
// the complete-history API; nothing here truncates.

use regex::{Captures, Regex};

use crate::models::{Granularity, TrafficRecord};
use crate::report::{log_parse_outcome, pad_hour, traffic_columns, warn_malformed_row};

/// rx tx total avg columns of the verbose layout.
const PLAIN_COLUMNS: &str =
    r"([\d,.]+)\s+([\w/]+)\s+([\d,.]+)\s+([\w/]+)\s+([\d,.]+)\s+([\w/]+)\s+([\d,.]+)\s+([\w/]+)";

/// `YYYY-MM-DD HH:MM rx tx total avg`; the hour is taken from the row marker.
pub fn parse_five_minute_full(text: &str) -> Vec<TrafficRecord> {
    let row_re = Regex::new(&format!(
        r"^\s*(\d{{4}}-\d{{2}}-\d{{2}})\s+(\d{{1,2}}):(\d{{2}})\s+{PLAIN_COLUMNS}"
    ))
    .expect("regex is valid");

    parse_rows(text, Granularity::FiveMinute, &row_re, |caps| {
        let date = caps.get(1)?.as_str().to_string();
        let hour = pad_hour(caps.get(2)?.as_str());
        let minute = format!("{}:{}", hour, caps.get(3)?.as_str());
        let cols = traffic_columns(caps, 4)?;
        Some(TrafficRecord {
            date,
            hour: Some(hour),
            minute: Some(minute),
            rx: cols.rx,
            tx: cols.tx,
            total: cols.total,
            avg: cols.avg,
        })
    })
}

/// `YYYY-MM-DD HH:00 rx tx total avg`.
pub fn parse_hourly_full(text: &str) -> Vec<TrafficRecord> {
    let row_re = Regex::new(&format!(
        r"^\s*(\d{{4}}-\d{{2}}-\d{{2}})\s+(\d{{1,2}}):00\s+{PLAIN_COLUMNS}"
    ))
    .expect("regex is valid");

    parse_rows(text, Granularity::Hourly, &row_re, |caps| {
        let date = caps.get(1)?.as_str().to_string();
        let hour = pad_hour(caps.get(2)?.as_str());
        let cols = traffic_columns(caps, 3)?;
        Some(TrafficRecord {
            date,
            hour: Some(hour),
            minute: None,
            rx: cols.rx,
            tx: cols.tx,
            total: cols.total,
            avg: cols.avg,
        })
    })
}

/// `YYYY-MM-DD rx tx total avg`.
pub fn parse_daily_full(text: &str) -> Vec<TrafficRecord> {
    let row_re = Regex::new(&format!(r"^\s*(\d{{4}}-\d{{2}}-\d{{2}})\s+{PLAIN_COLUMNS}"))
        .expect("regex is valid");
    parse_rows(text, Granularity::Daily, &row_re, dated_record)
}

/// `YYYY-MM rx tx total avg`.
pub fn parse_monthly_full(text: &str) -> Vec<TrafficRecord> {
    let row_re =
        Regex::new(&format!(r"^\s*(\d{{4}}-\d{{2}})\s+{PLAIN_COLUMNS}")).expect("regex is valid");
    parse_rows(text, Granularity::Monthly, &row_re, dated_record)
}

fn dated_record(caps: &Captures<'_>) -> Option<TrafficRecord> {
    let date = caps.get(1)?.as_str().to_string();
    let cols = traffic_columns(caps, 2)?;
    Some(TrafficRecord {
        date,
        hour: None,
        minute: None,
        rx: cols.rx,
        tx: cols.tx,
        total: cols.total,
        avg: cols.avg,
    })
}

fn parse_rows(
    text: &str,
    granularity: Granularity,
    row_re: &Regex,
    extract: impl Fn(&Captures<'_>) -> Option<TrafficRecord>,
) -> Vec<TrafficRecord> {
    let mut data = Vec::new();
    for line in text.lines() {
        let Some(caps) = row_re.captures(line) else {
            continue;
        };
        let Some(record) = extract(&caps) else {
            warn_malformed_row(granularity, line);
            continue;
        };
        data.push(record);
    }
    log_parse_outcome(granularity, text, data.len());
    data
}
