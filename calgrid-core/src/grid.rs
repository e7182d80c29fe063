//! Full grid layout: display days, per-day lanes, and event boxes.
//!
//! This is the step the view calls on every render. A bad event is dropped
//! from its lane; a lane whose horizontal layout cannot be computed is
//! replaced by an error message; failing to enumerate the display days fails
//! the whole grid.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, error};

use crate::config::LayoutConfig;
use crate::error::LayoutResult;
use crate::event::Event;
use crate::filter::events_for_date;
use crate::layout::{calculate_event_position, calculate_horizontal_layout, sort_for_layout};
use crate::week::{ViewMode, display_dates};

/// Position of an event box: `top`/`height` in pixels, `left`/`width` in
/// percent of the lane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderBox {
    pub top: f64,
    pub height: f64,
    pub left: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedEvent<'a> {
    pub event: &'a Event,
    pub column_index: usize,
    pub max_overlap: usize,
    #[serde(flatten)]
    pub render: RenderBox,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum LaneContent<'a> {
    Events(Vec<RenderedEvent<'a>>),
    /// Inline message shown instead of the lane's events
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLane<'a> {
    pub date: NaiveDate,
    pub content: LaneContent<'a>,
}

impl<'a> DayLane<'a> {
    /// Rendered events, or nothing if the lane failed.
    pub fn events(&self) -> &[RenderedEvent<'a>] {
        match &self.content {
            LaneContent::Events(events) => events,
            LaneContent::Error(_) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridLayout<'a> {
    pub view_mode: ViewMode,
    pub lanes: Vec<DayLane<'a>>,
}

/// Lay out the events of one day.
///
/// # Errors
/// Fails when the horizontal layout fails for the batch. Events whose
/// vertical position cannot be computed are logged and left out.
pub fn lay_out_day<'a>(
    events: Vec<&'a Event>,
    config: &LayoutConfig,
) -> LayoutResult<Vec<RenderedEvent<'a>>> {
    let mut sorted = events;
    sort_for_layout(&mut sorted);

    let placed = calculate_horizontal_layout(&sorted, config)?;

    Ok(placed
        .into_iter()
        .filter_map(|placed| match calculate_event_position(placed.event, config) {
            Ok(position) => Some(RenderedEvent {
                event: placed.event,
                column_index: placed.layout.column_index,
                max_overlap: placed.layout.max_overlap,
                render: RenderBox {
                    top: position.top,
                    height: position.height,
                    left: placed.layout.left,
                    width: placed.layout.width,
                },
            }),
            Err(e) => {
                error!(event_id = %placed.event.id, error = %e, "Failed to position event");
                None
            }
        })
        .collect())
}

/// Lay out every day shown for `current` in `mode`.
///
/// # Errors
/// Fails only when the display days cannot be computed or the config is
/// invalid.
pub fn lay_out_grid<'a>(
    events: &'a [Event],
    current: NaiveDate,
    mode: ViewMode,
    config: &LayoutConfig,
) -> LayoutResult<GridLayout<'a>> {
    config.validate()?;
    let dates = display_dates(current, mode, config.week_start)?;
    debug!(view_mode = %mode, event_count = events.len(), %current, "Laying out grid");

    let lanes = dates
        .into_iter()
        .map(|date| {
            let day_events = events_for_date(events, date, config.timezone);
            let content = match lay_out_day(day_events, config) {
                Ok(rendered) => LaneContent::Events(rendered),
                Err(e) => {
                    error!(%date, error = %e, "Failed to calculate horizontal layout");
                    LaneContent::Error(format!("Could not lay out events for {date}: {e}"))
                }
            };
            DayLane { date, content }
        })
        .collect();

    Ok(GridLayout {
        view_mode: mode,
        lanes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use crate::event::EventId;
    use std::collections::HashSet;

    fn make_test_event(id: &str, start: &str, end: &str) -> Event {
        Event {
            id: EventId::new(id),
            title: format!("Event {id}"),
            description: None,
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    fn utc_config() -> LayoutConfig {
        LayoutConfig::default().with_timezone(chrono_tz::UTC)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_day_view_boxes() {
        let events = vec![
            make_test_event("a", "2024-06-10T09:00:00Z", "2024-06-10T11:00:00Z"),
            make_test_event("b", "2024-06-10T10:00:00Z", "2024-06-10T12:00:00Z"),
            make_test_event("other-day", "2024-06-11T10:00:00Z", "2024-06-11T12:00:00Z"),
        ];
        let grid = lay_out_grid(&events, date(10), ViewMode::Day, &utc_config()).unwrap();

        assert_eq!(grid.lanes.len(), 1);
        let rendered = grid.lanes[0].events();
        assert_eq!(rendered.len(), 2);
        assert_eq!(
            rendered[0].render,
            RenderBox { top: 450.0, height: 100.0, left: 0.0, width: 49.5 }
        );
        assert_eq!(
            rendered[1].render,
            RenderBox { top: 500.0, height: 100.0, left: 50.5, width: 49.5 }
        );
    }

    #[test]
    fn test_bad_duration_is_dropped_from_lane() {
        let events = vec![
            make_test_event("zero", "2024-06-10T09:00:00Z", "2024-06-10T09:00:00Z"),
            make_test_event("ok", "2024-06-10T13:00:00Z", "2024-06-10T14:00:00Z"),
        ];
        let grid = lay_out_grid(&events, date(10), ViewMode::Day, &utc_config()).unwrap();

        let ids: Vec<&str> = grid.lanes[0].events().iter().map(|r| r.event.id.as_str()).collect();
        assert_eq!(ids, vec!["ok"]);
    }

    #[test]
    fn test_unparsable_event_is_excluded_and_others_render() {
        let events = vec![
            make_test_event("broken", "not-a-date", "2024-06-10T11:00:00Z"),
            make_test_event("ok", "2024-06-10T09:00:00Z", "2024-06-10T10:00:00Z"),
        ];
        let grid = lay_out_grid(&events, date(10), ViewMode::Day, &utc_config()).unwrap();

        let rendered = grid.lanes[0].events();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].event.id.as_str(), "ok");
    }

    #[test]
    fn test_failed_lane_carries_error() {
        // Starts on the day but has an unreadable end: the filter keeps it and
        // the horizontal pass rejects the whole lane.
        let events = vec![
            make_test_event("a", "2024-06-10T09:00:00Z", "garbage"),
            make_test_event("b", "2024-06-10T10:00:00Z", "2024-06-10T11:00:00Z"),
        ];
        let grid = lay_out_grid(&events, date(10), ViewMode::Day, &utc_config()).unwrap();

        assert!(matches!(grid.lanes[0].content, LaneContent::Error(_)));
        assert!(grid.lanes[0].events().is_empty());
    }

    #[test]
    fn test_lay_out_day_reports_batch_failure() {
        let bad = make_test_event("a", "2024-06-10T09:00:00Z", "garbage");
        let err = lay_out_day(vec![&bad], &utc_config()).unwrap_err();
        assert!(matches!(err.root_cause(), LayoutError::Parse(_)));
    }

    #[test]
    fn test_week_lanes_partition_events() {
        let events = vec![
            make_test_event("sun", "2024-06-09T08:00:00Z", "2024-06-09T09:00:00Z"),
            make_test_event("wed-1", "2024-06-12T08:00:00Z", "2024-06-12T10:00:00Z"),
            make_test_event("wed-2", "2024-06-12T09:00:00Z", "2024-06-12T10:00:00Z"),
            make_test_event("sat", "2024-06-15T22:00:00Z", "2024-06-15T23:00:00Z"),
            make_test_event("next-week", "2024-06-16T08:00:00Z", "2024-06-16T09:00:00Z"),
            make_test_event("broken", "nope", "2024-06-12T09:00:00Z"),
        ];
        let grid = lay_out_grid(&events, date(12), ViewMode::Week, &utc_config()).unwrap();

        assert_eq!(grid.lanes.len(), 7);
        assert_eq!(grid.lanes[0].date, date(9));

        let all: Vec<&str> = grid
            .lanes
            .iter()
            .flat_map(|lane| lane.events().iter().map(|r| r.event.id.as_str()))
            .collect();
        let unique: HashSet<&str> = all.iter().copied().collect();

        assert_eq!(all.len(), unique.len());
        assert_eq!(unique, HashSet::from(["sun", "wed-1", "wed-2", "sat"]));
    }

    #[test]
    fn test_week_layout_in_display_zone() {
        // 2024-06-15 16:00Z is Sunday 01:00 in Seoul.
        let events = vec![make_test_event(
            "early-sunday",
            "2024-06-15T16:00:00Z",
            "2024-06-15T17:00:00Z",
        )];
        let config = LayoutConfig::default();
        let grid = lay_out_grid(&events, date(16), ViewMode::Week, &config).unwrap();

        let lane = grid.lanes.iter().find(|l| l.date == date(16)).unwrap();
        assert_eq!(lane.events().len(), 1);
        assert_eq!(lane.events()[0].render.top, 50.0);
    }

    #[test]
    fn test_invalid_config_fails_grid() {
        let config = LayoutConfig {
            hour_height: -5.0,
            ..utc_config()
        };
        assert!(lay_out_grid(&[], date(10), ViewMode::Day, &config).is_err());
    }
}
