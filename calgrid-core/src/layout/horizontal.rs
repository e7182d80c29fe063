//! Horizontal placement: side-by-side columns for overlapping events.
//!
//! Works at hour granularity. Every event is dropped into the hourly buckets
//! it covers; the fullest bucket an event touches decides how many columns
//! its width is divided into (`max_overlap`). Column indices come from a
//! separate first-fit pass over the sorted events, which keeps events that
//! really overlap in different columns.
//!
//! `max_overlap` is a per-hour maximum, not a true interval colouring: when
//! overlaps are staggered an event can be sized narrower than strictly
//! needed. This matches how the grid has always rendered.

use std::collections::HashSet;
use std::ops::Range;

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::config::LayoutConfig;
use crate::constants::HOURS_IN_DAY;
use crate::error::{LayoutError, LayoutResult};
use crate::event::Event;
use crate::time::to_display;

/// Column placement and percentage geometry of one event within its lane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HorizontalLayout {
    pub column_index: usize,
    pub max_overlap: usize,
    /// Offset from the lane's left edge, in percent
    pub left: f64,
    /// Width, in percent
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEvent<'a> {
    pub event: &'a Event,
    pub layout: HorizontalLayout,
}

struct Parsed<'a> {
    event: &'a Event,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    hours: Range<usize>,
}

/// Sort events by start time, then end time.
///
/// Events whose times do not parse sort first; the layout pass will reject
/// them anyway.
pub fn sort_for_layout(events: &mut [&Event]) {
    events.sort_by_cached_key(|event| (event.start_utc().ok(), event.end_utc().ok()));
}

/// Lay out one day's events side by side.
///
/// `sorted` must already be ordered with [`sort_for_layout`]. Output keeps
/// input order.
///
/// # Errors
/// Any event with a missing or unparsable time fails the whole batch with a
/// `Calculation` error wrapping the cause, since every later placement
/// depends on it.
pub fn calculate_horizontal_layout<'a>(
    sorted: &[&'a Event],
    config: &LayoutConfig,
) -> LayoutResult<Vec<PlacedEvent<'a>>> {
    if sorted.is_empty() {
        return Ok(Vec::new());
    }

    let parsed = sorted
        .iter()
        .enumerate()
        .map(|(index, event)| {
            parse_for_layout(event, config.timezone).map_err(|e| {
                LayoutError::calculation(
                    format!("Invalid event {} at index {index}", event.id),
                    e,
                )
            })
        })
        .collect::<LayoutResult<Vec<_>>>()?;

    let mut slots: Vec<HashSet<&str>> = vec![HashSet::new(); HOURS_IN_DAY];
    for item in &parsed {
        for hour in item.hours.clone() {
            slots[hour].insert(item.event.id.as_str());
        }
    }

    let columns = assign_columns(&parsed);

    Ok(parsed
        .iter()
        .zip(columns)
        .map(|(item, column_index)| {
            let max_overlap = item
                .hours
                .clone()
                .map(|hour| slots[hour].len())
                .max()
                .unwrap_or(1)
                .max(1);

            PlacedEvent {
                event: item.event,
                layout: geometry(column_index, max_overlap, config),
            }
        })
        .collect())
}

fn parse_for_layout(event: &Event, tz: Tz) -> LayoutResult<Parsed<'_>> {
    let start = event.start_utc()?;
    let end = event.end_utc()?;

    let local_start = to_display(start, tz);
    let local_end = to_display(end, tz);

    let start_hour = local_start.hour() as usize;
    // An event ending exactly at midnight covers the rest of its start day.
    let end_hour = if local_end.date_naive() > local_start.date_naive() {
        HOURS_IN_DAY
    } else {
        local_end.hour() as usize
    };

    Ok(Parsed {
        event,
        start,
        end,
        hours: start_hour..end_hour.max(start_hour),
    })
}

/// First-fit column assignment over events sorted by start.
fn assign_columns(parsed: &[Parsed<'_>]) -> Vec<usize> {
    let mut columns_end: Vec<DateTime<Utc>> = Vec::new();

    parsed
        .iter()
        .map(|item| {
            match columns_end.iter().position(|end| item.start >= *end) {
                Some(index) => {
                    if item.end > columns_end[index] {
                        columns_end[index] = item.end;
                    }
                    index
                }
                None => {
                    columns_end.push(item.end);
                    columns_end.len() - 1
                }
            }
        })
        .collect()
}

/// Gaps together never take more than half the lane; a wider configured
/// gap is clamped so every column keeps a positive width.
fn geometry(column_index: usize, max_overlap: usize, config: &LayoutConfig) -> HorizontalLayout {
    let overlap = max_overlap as f64;
    let gap = if max_overlap > 1 {
        config
            .gap_percent
            .min(config.total_width_percent / (2.0 * (overlap - 1.0)))
    } else {
        config.gap_percent
    };
    let width = (config.total_width_percent - (overlap - 1.0) * gap) / overlap;
    let left = column_index as f64 * (width + gap);

    HorizontalLayout {
        column_index,
        max_overlap,
        left,
        width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventId;
    use std::collections::HashMap;

    fn make_test_event(id: &str, start: &str, end: &str) -> Event {
        Event {
            id: EventId::new(id),
            title: format!("Event {id}"),
            description: None,
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    fn at(hour: u32) -> String {
        format!("2024-06-10T{hour:02}:00:00Z")
    }

    fn utc_config() -> LayoutConfig {
        LayoutConfig::default().with_timezone(chrono_tz::UTC)
    }

    fn layouts(events: &[Event]) -> Vec<HorizontalLayout> {
        let mut refs: Vec<&Event> = events.iter().collect();
        sort_for_layout(&mut refs);
        calculate_horizontal_layout(&refs, &utc_config())
            .unwrap()
            .into_iter()
            .map(|placed| placed.layout)
            .collect()
    }

    fn layouts_by_id(events: &[Event]) -> HashMap<String, HorizontalLayout> {
        let mut refs: Vec<&Event> = events.iter().collect();
        sort_for_layout(&mut refs);
        calculate_horizontal_layout(&refs, &utc_config())
            .unwrap()
            .into_iter()
            .map(|placed| (placed.event.id.to_string(), placed.layout))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let result = calculate_horizontal_layout(&[], &utc_config()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_two_overlapping_events_split_width() {
        let events = vec![
            make_test_event("a", &at(9), &at(11)),
            make_test_event("b", &at(10), &at(12)),
        ];
        let result = layouts(&events);

        assert_eq!(
            result,
            vec![
                HorizontalLayout { column_index: 0, max_overlap: 2, left: 0.0, width: 49.5 },
                HorizontalLayout { column_index: 1, max_overlap: 2, left: 50.5, width: 49.5 },
            ]
        );
    }

    #[test]
    fn test_non_overlapping_events_use_full_width() {
        let events = vec![
            make_test_event("a", &at(9), &at(10)),
            make_test_event("b", &at(10), &at(11)),
            make_test_event("c", &at(13), &at(15)),
        ];

        for layout in layouts(&events) {
            assert_eq!(layout.column_index, 0);
            assert_eq!(layout.max_overlap, 1);
            assert_eq!(layout.left, 0.0);
            assert_eq!(layout.width, 100.0);
        }
    }

    #[test]
    fn test_mutually_overlapping_events_get_distinct_columns() {
        let events: Vec<Event> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| make_test_event(id, &at(14), &at(15)))
            .collect();
        let result = layouts(&events);

        let columns: Vec<usize> = result.iter().map(|l| l.column_index).collect();
        assert_eq!(columns, vec![0, 1, 2, 3]);
        assert!(result.iter().all(|l| l.max_overlap == 4));
    }

    #[test]
    fn test_freed_column_is_reused() {
        let events = vec![
            make_test_event("a", &at(9), &at(12)),
            make_test_event("b", &at(9), &at(10)),
            make_test_event("c", &at(10), &at(11)),
        ];
        let result = layouts_by_id(&events);

        // Sorted order is b, a, c: c starts when b's column frees up.
        assert_eq!(result["b"].column_index, 0);
        assert_eq!(result["a"].column_index, 1);
        assert_eq!(result["c"].column_index, 0);
    }

    #[test]
    fn test_overlap_is_per_hour_maximum() {
        // a shares hour 9 with b and c, d only shares hour 11 with a.
        let events = vec![
            make_test_event("a", &at(9), &at(12)),
            make_test_event("b", &at(9), &at(10)),
            make_test_event("c", &at(9), &at(10)),
            make_test_event("d", &at(11), &at(12)),
        ];
        let result = layouts_by_id(&events);

        assert_eq!(result["a"].max_overlap, 3);
        assert_eq!(result["b"].max_overlap, 3);
        assert_eq!(result["a"].column_index, 2);
        assert_eq!(result["d"].max_overlap, 2);
        assert_eq!(result["d"].column_index, 0);
    }

    #[test]
    fn test_custom_gap() {
        let config = LayoutConfig {
            gap_percent: 0.0,
            ..utc_config()
        };
        let events = vec![
            make_test_event("a", &at(9), &at(10)),
            make_test_event("b", &at(9), &at(10)),
        ];
        let refs: Vec<&Event> = events.iter().collect();
        let result = calculate_horizontal_layout(&refs, &config).unwrap();

        assert_eq!(result[1].layout.left, 50.0);
        assert_eq!(result[1].layout.width, 50.0);
    }

    #[test]
    fn test_wide_gap_is_clamped() {
        let config = LayoutConfig {
            gap_percent: 60.0,
            ..utc_config()
        };
        let events: Vec<Event> = ["a", "b", "c"]
            .iter()
            .map(|id| make_test_event(id, &at(9), &at(10)))
            .collect();
        let refs: Vec<&Event> = events.iter().collect();
        let result = calculate_horizontal_layout(&refs, &config).unwrap();

        for placed in &result {
            assert!(placed.layout.width > 0.0, "{:?}", placed.layout);
        }
        let last = &result[2].layout;
        assert!((last.width - 50.0 / 3.0).abs() < 1e-9);
        assert!((last.left + last.width - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_event_ending_at_midnight_counts_late_hours() {
        let events = vec![
            make_test_event("a", &at(22), "2024-06-11T00:00:00Z"),
            make_test_event("b", &at(23), "2024-06-11T00:00:00Z"),
        ];
        let result = layouts(&events);
        assert!(result.iter().all(|l| l.max_overlap == 2));
    }

    #[test]
    fn test_one_bad_event_fails_the_batch() {
        let events = vec![
            make_test_event("a", &at(9), &at(10)),
            make_test_event("b", "not-a-date", &at(11)),
        ];
        let refs: Vec<&Event> = events.iter().collect();
        let err = calculate_horizontal_layout(&refs, &utc_config()).unwrap_err();

        assert!(matches!(err, LayoutError::Calculation { .. }));
        assert!(matches!(err.root_cause(), LayoutError::Parse(_)));
    }

    #[test]
    fn test_sort_breaks_ties_on_end_time() {
        let long = make_test_event("long", &at(9), &at(12));
        let short = make_test_event("short", &at(9), &at(10));
        let early = make_test_event("early", &at(8), &at(9));
        let mut refs = vec![&long, &short, &early];
        sort_for_layout(&mut refs);

        let ids: Vec<&str> = refs.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "short", "long"]);
    }
}
