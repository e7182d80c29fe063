//! Vertical placement: start hour to `top`, duration to `height`.

use chrono::Timelike;
use serde::Serialize;

use crate::config::LayoutConfig;
use crate::error::{LayoutError, LayoutResult};
use crate::event::Event;
use crate::time::{to_display, whole_hours_between};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VerticalPosition {
    pub top: f64,
    pub height: f64,
}

/// Compute an event's offset and height in the day column.
///
/// `top` is the display-zone start hour times `hour_height`; `height` is the
/// whole wall-clock hours between start and end times `hour_height`.
///
/// # Errors
/// - `Parse` when either time is missing or unparsable.
/// - `InvalidDuration` when the event does not last at least one whole hour.
pub fn calculate_event_position(
    event: &Event,
    config: &LayoutConfig,
) -> LayoutResult<VerticalPosition> {
    let start = to_display(event.start_utc()?, config.timezone);
    let end = to_display(event.end_utc()?, config.timezone);

    let duration_hours = whole_hours_between(&start, &end);
    if duration_hours <= 0 {
        return Err(LayoutError::InvalidDuration(format!(
            "start={}, end={}. Duration must be at least 1 hour.",
            event.start_time, event.end_time
        )));
    }

    Ok(VerticalPosition {
        top: f64::from(start.hour()) * config.hour_height,
        height: duration_hours as f64 * config.hour_height,
    })
}
