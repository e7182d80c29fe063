//! What the calendar screen shows for the current state.

use calgrid_core::{GridLayout, LayoutConfig, lay_out_grid};
use serde::Serialize;
use tracing::error;

use crate::events::{EventsState, LoadStatus};
use crate::navigation::CalendarNavigation;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CalendarScreen<'a> {
    Loading,
    /// The last backend request failed.
    Failed(String),
    /// The grid could not be built for the current date and config.
    Unavailable(String),
    Grid(GridLayout<'a>),
}

/// Pick the screen for the current state.
///
/// The loading screen only replaces the grid while nothing is loaded yet;
/// a request running over loaded events keeps showing them.
pub fn render_calendar<'a>(
    state: &'a EventsState,
    navigation: &CalendarNavigation,
    config: &LayoutConfig,
) -> CalendarScreen<'a> {
    match state.status {
        LoadStatus::Loading if state.is_empty() => return CalendarScreen::Loading,
        LoadStatus::Failed => {
            let message = state
                .error
                .clone()
                .unwrap_or_else(|| "Failed to load events".to_string());
            return CalendarScreen::Failed(message);
        }
        LoadStatus::Idle | LoadStatus::Loading | LoadStatus::Succeeded => {}
    }

    match lay_out_grid(
        state.events(),
        navigation.current_date,
        navigation.view_mode,
        config,
    ) {
        Ok(grid) => CalendarScreen::Grid(grid),
        Err(e) => {
            error!(date = %navigation.current_date, error = %e, "Failed to build calendar grid");
            CalendarScreen::Unavailable(format!("Calendar unavailable: {e}"))
        }
    }
}
