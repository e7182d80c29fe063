//! Time parsing and display-timezone conversion.
//!
//! Stored instants are always UTC. Everything the grid shows (hour of day,
//! calendar day, durations) is computed on wall-clock time in the single
//! configured display zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{LayoutError, LayoutResult};

/// Offset-less formats accepted for stored instants (read as UTC).
const NAIVE_UTC_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Formats accepted for local date-time input strings.
const LOCAL_INPUT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:00";

/// Parse a stored ISO-8601 instant.
///
/// `field` names the value in error messages.
pub fn parse_utc(field: &str, value: &str) -> LayoutResult<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LayoutError::Parse(format!(
            "Invalid or missing {field} string."
        )));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_UTC_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| LayoutError::Parse(format!("Failed to parse {field}: {value}")))
}

pub fn to_display(instant: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    instant.with_timezone(&tz)
}

/// Calendar day an instant falls on in the display zone.
pub fn display_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    to_display(instant, tz).date_naive()
}

/// Whole hours between two wall-clock times, truncated toward zero.
///
/// Uses local wall-clock difference rather than elapsed time so a
/// daylight-saving shift never adds or removes an hour of grid height.
pub fn whole_hours_between<T: TimeZone>(start: &DateTime<T>, end: &DateTime<T>) -> i64 {
    (end.naive_local() - start.naive_local()).num_hours()
}

/// Truncate a local `YYYY-MM-DDTHH:MM` string to the hour.
///
/// Strings without a time part come back unchanged.
pub fn adjust_time_to_hour(value: &str) -> String {
    let Some((date, time)) = value.split_once('T') else {
        return value.to_string();
    };

    match time.split(':').next() {
        Some(hour) if !hour.is_empty() => format!("{date}T{hour:0>2}:00"),
        _ => value.to_string(),
    }
}

/// Parse a local `YYYY-MM-DDTHH:MM` input string, snapped to the hour.
pub fn parse_local_input(value: &str) -> LayoutResult<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LayoutError::Parse("Empty date-time input".into()));
    }

    let adjusted = adjust_time_to_hour(value);
    LOCAL_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&adjusted, fmt).ok())
        .ok_or_else(|| LayoutError::Parse(format!("Failed to parse local time: {value}")))
}

/// Parse a local input string in the display zone, snapped to the hour.
///
/// Ambiguous local times (DST fall-back) resolve to the earlier instant.
pub fn parse_and_adjust_to_hour(value: &str, tz: Tz) -> LayoutResult<DateTime<Utc>> {
    let naive = parse_local_input(value)?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| LayoutError::Parse(format!("Local time {naive} does not exist in {tz}")))
}

/// `YYYY-MM-DDTHH:MM:SS.sssZ`
pub fn to_utc_iso_string(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format an instant as a local hour-aligned input string (`YYYY-MM-DDTHH:00`).
pub fn format_local_input(instant: DateTime<Utc>, tz: Tz) -> String {
    format_naive_input(to_display(instant, tz).naive_local())
}

pub fn format_naive_input(local: NaiveDateTime) -> String {
    local.format(LOCAL_INPUT_FORMAT).to_string()
}
