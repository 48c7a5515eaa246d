// Domain models

mod record;
mod tree;

pub use record::{Granularity, TrafficRecord};
pub use tree::{DayStats, HourStats, MonthStats, StatsTree, YearSelection, YearStats};
