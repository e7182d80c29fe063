//! Layout configuration passed explicitly into every engine entry point.

use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GAP_PERCENT, DEFAULT_HOUR_HEIGHT, DEFAULT_TIME_ZONE, DEFAULT_TOTAL_WIDTH_PERCENT,
    DEFAULT_WEEK_START,
};
use crate::error::{LayoutError, LayoutResult};

/// Display settings shared by all users of the grid.
///
/// Stored as the `[layout]` table of the application config, e.g.
///
/// ```toml
/// [layout]
/// timezone = "Asia/Seoul"
/// hour_height = 50.0
/// week_start = "Mon"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Display timezone used for hour-of-day and calendar-day bucketing
    pub timezone: Tz,
    /// Height of one hour slot (H), in pixels
    pub hour_height: f64,
    /// Gap between side-by-side events, in percent of the lane width
    pub gap_percent: f64,
    /// Lane width available to events, in percent
    pub total_width_percent: f64,
    /// First day of the week in week view
    pub week_start: Weekday,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            timezone: DEFAULT_TIME_ZONE,
            hour_height: DEFAULT_HOUR_HEIGHT,
            gap_percent: DEFAULT_GAP_PERCENT,
            total_width_percent: DEFAULT_TOTAL_WIDTH_PERCENT,
            week_start: DEFAULT_WEEK_START,
        }
    }
}

impl LayoutConfig {
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn validate(&self) -> LayoutResult<()> {
        if !(self.hour_height.is_finite() && self.hour_height > 0.0) {
            return Err(LayoutError::InvalidInput(format!(
                "hour_height must be positive, got {}",
                self.hour_height
            )));
        }
        if !(self.total_width_percent.is_finite() && self.total_width_percent > 0.0) {
            return Err(LayoutError::InvalidInput(format!(
                "total_width_percent must be positive, got {}",
                self.total_width_percent
            )));
        }
        if !(self.gap_percent.is_finite() && self.gap_percent >= 0.0) {
            return Err(LayoutError::InvalidInput(format!(
                "gap_percent must not be negative, got {}",
                self.gap_percent
            )));
        }
        if self.gap_percent >= self.total_width_percent {
            return Err(LayoutError::InvalidInput(format!(
                "gap_percent ({}) must be smaller than total_width_percent ({})",
                self.gap_percent, self.total_width_percent
            )));
        }
        Ok(())
    }
}
