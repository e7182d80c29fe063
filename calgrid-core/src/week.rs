//! Day and week views: which calendar days the grid shows.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};

pub const DAYS_IN_WEEK: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Day,
    Week,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Day => f.write_str("day"),
            ViewMode::Week => f.write_str("week"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ViewMode::Day),
            "week" => Ok(ViewMode::Week),
            other => Err(LayoutError::InvalidInput(format!(
                "Unknown view mode '{other}'. Expected 'day' or 'week'"
            ))),
        }
    }
}

/// The seven days of the week containing `reference`.
pub fn week_days(reference: NaiveDate, week_start: Weekday) -> LayoutResult<Vec<NaiveDate>> {
    let offset = (DAYS_IN_WEEK as u32 + reference.weekday().num_days_from_monday()
        - week_start.num_days_from_monday())
        % DAYS_IN_WEEK as u32;
    let start = reference
        .checked_sub_days(Days::new(u64::from(offset)))
        .ok_or_else(|| out_of_range(reference))?;

    (0..DAYS_IN_WEEK)
        .map(|n| {
            start
                .checked_add_days(Days::new(n))
                .ok_or_else(|| out_of_range(reference))
        })
        .collect()
}

/// Days shown for `current` in the given mode.
pub fn display_dates(
    current: NaiveDate,
    mode: ViewMode,
    week_start: Weekday,
) -> LayoutResult<Vec<NaiveDate>> {
    match mode {
        ViewMode::Day => Ok(vec![current]),
        ViewMode::Week => week_days(current, week_start),
    }
}

fn out_of_range(reference: NaiveDate) -> LayoutError {
    LayoutError::InvalidInput(format!("Week of {reference} is outside the supported date range"))
}
