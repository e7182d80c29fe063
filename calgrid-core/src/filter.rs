//! Bucketing events into display-zone calendar days.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde_json::Value;
use tracing::warn;

use crate::event::{Event, decode_events};
use crate::time::display_date;

/// Events whose start falls on `date` in the display zone.
///
/// Events with an unparsable start are skipped with a warning.
pub fn events_for_date(events: &[Event], date: NaiveDate, tz: Tz) -> Vec<&Event> {
    events
        .iter()
        .filter(|event| match event.start_utc() {
            Ok(start) => display_date(start, tz) == date,
            Err(e) => {
                warn!(event_id = %event.id, error = %e, "Skipping event with invalid start_time");
                false
            }
        })
        .collect()
}

/// Same as [`events_for_date`] over raw wire data.
///
/// A value that is not an event array yields no events.
pub fn events_for_date_value(value: &Value, date: NaiveDate, tz: Tz) -> Vec<Event> {
    let events = match decode_events(value) {
        Ok(events) => events,
        Err(e) => {
            warn!(error = %e, "Invalid event collection received");
            return Vec::new();
        }
    };

    events_for_date(&events, date, tz)
        .into_iter()
        .cloned()
        .collect()
}
