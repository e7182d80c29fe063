use chrono::Weekday;
use chrono_tz::Tz;

/// Number of hourly buckets in a day column.
pub const HOURS_IN_DAY: usize = 24;

/// Height of one hour slot, in pixels.
pub const DEFAULT_HOUR_HEIGHT: f64 = 50.0;

/// Horizontal gap between side-by-side events, in percent of the lane width.
pub const DEFAULT_GAP_PERCENT: f64 = 1.0;

pub const DEFAULT_TOTAL_WIDTH_PERCENT: f64 = 100.0;

pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::Asia::Seoul;

pub const DEFAULT_WEEK_START: Weekday = Weekday::Sun;
