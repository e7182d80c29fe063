//! Event form input: validation and paired start/end time inputs.
//!
//! Form values are local `YYYY-MM-DDTHH:MM` strings in the display zone.
//! Events are always hour-aligned, on a single day, and at least one hour
//! long; the helpers here keep user input inside those rules before it is
//! converted to UTC for the backend.

use calgrid_core::time::{
    display_date, format_local_input, format_naive_input, parse_and_adjust_to_hour,
    parse_local_input, to_display, to_utc_iso_string, whole_hours_between,
};
use calgrid_core::Event;
use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::backend::{EventPatch, NewEvent};

/// Reasons a form submission is rejected, worded for display.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter an event title.")]
    MissingTitle,

    #[error("Please enter a valid start time.")]
    InvalidStart,

    #[error("Please enter a valid end time.")]
    InvalidEnd,

    #[error("Start and end must be on the same day.")]
    DifferentDays,

    #[error("End time must be at least 1 hour after the start time.")]
    TooShort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedTimes {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Validate form values and convert both times to UTC.
pub fn validate_event_data(
    title: &str,
    start_local: &str,
    end_local: &str,
    tz: Tz,
) -> Result<ValidatedTimes, FormError> {
    if title.trim().is_empty() {
        return Err(FormError::MissingTitle);
    }

    let start = parse_and_adjust_to_hour(start_local, tz).map_err(|_| FormError::InvalidStart)?;
    let end = parse_and_adjust_to_hour(end_local, tz).map_err(|_| FormError::InvalidEnd)?;

    if display_date(start, tz) != display_date(end, tz) {
        return Err(FormError::DifferentDays);
    }
    if whole_hours_between(&to_display(start, tz), &to_display(end, tz)) < 1 {
        return Err(FormError::TooShort);
    }

    Ok(ValidatedTimes { start, end })
}

/// Values of the create/edit event form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
}

impl EventForm {
    /// Prefill the form from a stored event. Unreadable times are left blank.
    pub fn from_event(event: &Event, tz: Tz) -> Self {
        EventForm {
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            start_time: event
                .start_utc()
                .map(|t| format_local_input(t, tz))
                .unwrap_or_default(),
            end_time: event
                .end_utc()
                .map(|t| format_local_input(t, tz))
                .unwrap_or_default(),
        }
    }

    fn description(&self) -> Option<String> {
        let trimmed = self.description.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub fn into_new_event(self, tz: Tz) -> Result<NewEvent, FormError> {
        let times = validate_event_data(&self.title, &self.start_time, &self.end_time, tz)?;
        Ok(NewEvent {
            description: self.description(),
            title: self.title.trim().to_string(),
            start_time: to_utc_iso_string(times.start),
            end_time: to_utc_iso_string(times.end),
        })
    }

    /// Full update of every editable field.
    pub fn into_patch(self, tz: Tz) -> Result<EventPatch, FormError> {
        let times = validate_event_data(&self.title, &self.start_time, &self.end_time, tz)?;
        Ok(EventPatch {
            description: Some(self.description().unwrap_or_default()),
            title: Some(self.title.trim().to_string()),
            start_time: Some(to_utc_iso_string(times.start)),
            end_time: Some(to_utc_iso_string(times.end)),
        })
    }
}

/// Allowed range for a local time input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeConstraints {
    pub min: NaiveDateTime,
    pub max: NaiveDateTime,
}

impl TimeConstraints {
    pub fn min_input(&self) -> String {
        format_naive_input(self.min)
    }

    pub fn max_input(&self) -> String {
        format_naive_input(self.max)
    }

    pub fn contains(&self, value: NaiveDateTime) -> bool {
        self.min <= value && value <= self.max
    }

    /// Allowed end times for a given start: one hour later up to 23:00 the
    /// same day. At 23:00 both bounds collapse to 23:00.
    fn after(start: NaiveDateTime) -> Self {
        let max = start.date().and_time(last_start_hour());
        match start.checked_add_signed(Duration::hours(1)) {
            Some(min) if min <= max => TimeConstraints { min, max },
            _ => TimeConstraints { min: max, max },
        }
    }

    /// Allowed start times for a given end: 00:00 the same day up to one
    /// hour earlier. At 00:00 both bounds collapse to 00:00.
    fn before(end: NaiveDateTime) -> Self {
        let min = end.date().and_time(NaiveTime::MIN);
        match end.checked_sub_signed(Duration::hours(1)) {
            Some(max) if max >= min => TimeConstraints { min, max },
            _ => TimeConstraints { min, max: min },
        }
    }
}

fn last_start_hour() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 0, 0).unwrap_or(NaiveTime::MIN)
}

pub fn end_time_constraints(start_local: &str) -> Option<TimeConstraints> {
    parse_local_input(start_local).ok().map(TimeConstraints::after)
}

pub fn start_time_constraints(end_local: &str) -> Option<TimeConstraints> {
    parse_local_input(end_local).ok().map(TimeConstraints::before)
}

/// Paired start/end inputs.
///
/// Setting one side snaps it to the hour, recomputes the other side's
/// allowed range, and clears the other value if it falls outside that range
/// or on a different day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeInput {
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    start_constraints: Option<TimeConstraints>,
    end_constraints: Option<TimeConstraints>,
}

impl TimeInput {
    pub fn new(initial_start: &str, initial_end: &str) -> Self {
        TimeInput {
            start: parse_local_input(initial_start).ok(),
            end: parse_local_input(initial_end).ok(),
            ..TimeInput::default()
        }
    }

    pub fn start(&self) -> String {
        self.start.map(format_naive_input).unwrap_or_default()
    }

    pub fn end(&self) -> String {
        self.end.map(format_naive_input).unwrap_or_default()
    }

    pub fn start_constraints(&self) -> Option<TimeConstraints> {
        self.start_constraints
    }

    pub fn end_constraints(&self) -> Option<TimeConstraints> {
        self.end_constraints
    }

    pub fn set_start(&mut self, value: &str) {
        self.start = parse_local_input(value).ok();

        let Some(start) = self.start else {
            self.end_constraints = None;
            self.start_constraints = self.end.map(TimeConstraints::before);
            return;
        };

        let constraints = TimeConstraints::after(start);
        self.end_constraints = Some(constraints);

        if self
            .end
            .is_some_and(|end| end < constraints.min || end.date() != start.date())
        {
            self.end = None;
        }
    }

    pub fn set_end(&mut self, value: &str) {
        self.end = parse_local_input(value).ok();

        let Some(end) = self.end else {
            self.start_constraints = None;
            self.end_constraints = self.start.map(TimeConstraints::after);
            return;
        };

        let constraints = TimeConstraints::before(end);
        self.start_constraints = Some(constraints);

        if self
            .start
            .is_some_and(|start| start > constraints.max || start.date() != end.date())
        {
            self.start = None;
        }
    }
}
