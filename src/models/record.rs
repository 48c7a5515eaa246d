// Traffic report models

use serde::Serialize;

/// One of vnstat's four report resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    FiveMinute,
    Hourly,
    Daily,
    Monthly,
}

impl Granularity {
    /// vnstat CLI flag selecting this resolution.
    pub fn flag(self) -> &'static str {
        match self {
            Granularity::FiveMinute => "-5",
            Granularity::Hourly => "-h",
            Granularity::Daily => "-d",
            Granularity::Monthly => "-m",
        }
    }

    /// Lowercase label for log lines.
    pub fn label(self) -> &'static str {
        match self {
            Granularity::FiveMinute => "5min",
            Granularity::Hourly => "hourly",
            Granularity::Daily => "daily",
            Granularity::Monthly => "monthly",
        }
    }
}

/// One parsed report row. Traffic magnitudes keep vnstat's display formatting
/// (dot decimal separator, unit verbatim, e.g. "1.25 GiB").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrafficRecord {
    /// `YYYY-MM-DD`, or `YYYY-MM` for monthly rows.
    pub date: String,
    /// Two-digit hour, present on hourly and 5-minute rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<String>,
    /// `HH:MM` row marker, present on 5-minute rows only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute: Option<String>,
    pub rx: String,
    pub tx: String,
    pub total: String,
    pub avg: String,
}
