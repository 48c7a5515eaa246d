// vnstat report text -> TrafficRecord sequences.
//
// vnstat prints two textual layouts per resolution: the default interactive
// view (pipe-separated columns under date/hour section headers) and the
// verbose view (every row self-contained, whitespace-separated columns).
// The windowed parsers here consume the former; `full` consumes the latter.
// Parsing never fails: unusable input yields an empty sequence and a log line.

pub mod full;

use regex::{Captures, Regex};

use crate::models::{Granularity, TrafficRecord};

/// rx | tx | total | avg columns of the default layout.
const PIPED_COLUMNS: &str = r"([\d,.]+)\s+([\w/]+)\s*\|\s*([\d,.]+)\s+([\w/]+)\s*\|\s*([\d,.]+)\s+([\w/]+)\s*\|\s*([\d,.]+)\s+([\w/]+)";

/// Parses `vnstat -5` default output. Data rows carry only an `HH:MM` marker,
/// so a row counts only once both a date header and an hour sub-header have
/// been seen; rows before that context are dropped rather than guessed at.
/// Returns at most the `window` most recent rows.
pub fn parse_five_minute(text: &str, window: usize) -> Vec<TrafficRecord> {
    let row_re = Regex::new(&format!(r"^\s*(\d{{1,2}}:\d{{2}})\s+{PIPED_COLUMNS}"))
        .expect("regex is valid");
    let date_re = Regex::new(r"^\s*(\d{4}-\d{2}-\d{2})").expect("regex is valid");
    let hour_re = Regex::new(r"^\s*(\d{1,2}):00").expect("regex is valid");

    let mut data = Vec::new();
    let mut current_date = String::new();
    let mut current_hour = String::new();

    for line in text.lines() {
        // Rows before headers: an ":00" row would otherwise prefix-match the
        // hour sub-header pattern and its reading would be lost.
        if let Some(caps) = row_re.captures(line) {
            if current_date.is_empty() || current_hour.is_empty() {
                continue;
            }
            let Some(record) = five_minute_record(&caps, &current_date, &current_hour) else {
                warn_malformed_row(Granularity::FiveMinute, line);
                continue;
            };
            data.push(record);
            continue;
        }
        if let Some(caps) = date_re.captures(line) {
            current_date = caps[1].to_string();
            continue;
        }
        if let Some(caps) = hour_re.captures(line) {
            current_hour = pad_hour(&caps[1]);
        }
    }

    log_parse_outcome(Granularity::FiveMinute, text, data.len());
    truncate_to_window(data, window)
}

/// Parses `vnstat -h` default output: date section headers with `H:00` rows.
/// Returns at most the `window` most recent rows.
pub fn parse_hourly(text: &str, window: usize) -> Vec<TrafficRecord> {
    let row_re = Regex::new(&format!(r"^\s*(\d{{1,2}}):00\s+{PIPED_COLUMNS}"))
        .expect("regex is valid");
    let date_re = Regex::new(r"^\s*(\d{4}-\d{2}-\d{2})").expect("regex is valid");

    let mut data = Vec::new();
    let mut current_date = String::new();

    for line in text.lines() {
        if let Some(caps) = row_re.captures(line) {
            if current_date.is_empty() {
                continue;
            }
            let Some(record) = hourly_record(&caps, &current_date) else {
                warn_malformed_row(Granularity::Hourly, line);
                continue;
            };
            data.push(record);
            continue;
        }
        if let Some(caps) = date_re.captures(line) {
            current_date = caps[1].to_string();
        }
    }

    log_parse_outcome(Granularity::Hourly, text, data.len());
    truncate_to_window(data, window)
}

/// Parses `vnstat -d` default output. Rows are self-contained, no context.
pub fn parse_daily(text: &str) -> Vec<TrafficRecord> {
    parse_dated_rows(text, Granularity::Daily, r"^\s*(\d{4}-\d{2}-\d{2})\s+")
}

/// Parses `vnstat -m` default output. Dates are `YYYY-MM`.
pub fn parse_monthly(text: &str) -> Vec<TrafficRecord> {
    parse_dated_rows(text, Granularity::Monthly, r"^\s*(\d{4}-\d{2})\s+")
}

fn parse_dated_rows(text: &str, granularity: Granularity, date_prefix: &str) -> Vec<TrafficRecord> {
    let row_re =
        Regex::new(&format!("{date_prefix}{PIPED_COLUMNS}")).expect("regex is valid");

    let mut data = Vec::new();
    for line in text.lines() {
        let Some(caps) = row_re.captures(line) else {
            continue;
        };
        let Some(record) = dated_record(&caps) else {
            warn_malformed_row(granularity, line);
            continue;
        };
        data.push(record);
    }

    log_parse_outcome(granularity, text, data.len());
    data
}

fn five_minute_record(caps: &Captures<'_>, date: &str, hour: &str) -> Option<TrafficRecord> {
    let minute = caps.get(1)?.as_str().to_string();
    let cols = traffic_columns(caps, 2)?;
    Some(TrafficRecord {
        date: date.to_string(),
        hour: Some(hour.to_string()),
        minute: Some(minute),
        rx: cols.rx,
        tx: cols.tx,
        total: cols.total,
        avg: cols.avg,
    })
}

fn hourly_record(caps: &Captures<'_>, date: &str) -> Option<TrafficRecord> {
    let hour = pad_hour(caps.get(1)?.as_str());
    let cols = traffic_columns(caps, 2)?;
    Some(TrafficRecord {
        date: date.to_string(),
        hour: Some(hour),
        minute: None,
        rx: cols.rx,
        tx: cols.tx,
        total: cols.total,
        avg: cols.avg,
    })
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

pub(crate) struct TrafficColumns {
    pub rx: String,
    pub tx: String,
    pub total: String,
    pub avg: String,
}

/// Extracts the four magnitude+unit pairs starting at capture group `first`.
pub(crate) fn traffic_columns(caps: &Captures<'_>, first: usize) -> Option<TrafficColumns> {
    Some(TrafficColumns {
        rx: magnitude(caps, first)?,
        tx: magnitude(caps, first + 2)?,
        total: magnitude(caps, first + 4)?,
        avg: magnitude(caps, first + 6)?,
    })
}

/// "1,25" + "GiB" -> "1.25 GiB". vnstat localizes the decimal separator;
/// the stored form always uses a dot. Units pass through verbatim.
fn magnitude(caps: &Captures<'_>, idx: usize) -> Option<String> {
    let num = caps.get(idx)?.as_str();
    let unit = caps.get(idx + 1)?.as_str();
    Some(format!("{} {}", num.replace(',', "."), unit))
}

/// "9" -> "09". Hours are tree keys, so both layouts must agree on the form.
pub(crate) fn pad_hour(hour: &str) -> String {
    format!("{hour:0>2}")
}

pub(crate) fn truncate_to_window(
    mut data: Vec<TrafficRecord>,
    window: usize,
) -> Vec<TrafficRecord> {
    if data.len() > window {
        data.split_off(data.len() - window)
    } else {
        data
    }
}

/// A row whose outer shape matched but whose groups failed to extract is
/// dropped on its own; one bad row never aborts the parse.
pub(crate) fn warn_malformed_row(granularity: Granularity, line: &str) {
    tracing::warn!(
        granularity = granularity.label(),
        line,
        "skipping malformed report row"
    );
}

/// Zero rows from non-empty text means the report format drifted, which is a
/// different signal than vnstat returning nothing at all.
pub(crate) fn log_parse_outcome(granularity: Granularity, text: &str, rows: usize) {
    if rows > 0 {
        tracing::debug!(granularity = granularity.label(), rows, "parsed report");
    } else if text.trim().is_empty() {
        tracing::debug!(granularity = granularity.label(), "empty report text");
    } else {
        tracing::warn!(
            granularity = granularity.label(),
            "report text present but no rows matched"
        );
    }
}
