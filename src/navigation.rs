//! Current date and view mode of the calendar grid.

use calgrid_core::ViewMode;
use chrono::{Days, NaiveDate};
use tracing::warn;

const WEEK: Days = Days::new(7);
const DAY: Days = Days::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarNavigation {
    pub current_date: NaiveDate,
    pub view_mode: ViewMode,
}

impl CalendarNavigation {
    /// Start on `today` in day view.
    pub fn new(today: NaiveDate) -> Self {
        CalendarNavigation {
            current_date: today,
            view_mode: ViewMode::Day,
        }
    }

    fn step(&self) -> Days {
        match self.view_mode {
            ViewMode::Day => DAY,
            ViewMode::Week => WEEK,
        }
    }

    /// Advance one day or one week. Stays put at the end of the date range.
    pub fn go_to_next(&mut self) {
        match self.current_date.checked_add_days(self.step()) {
            Some(next) => self.current_date = next,
            None => warn!(date = %self.current_date, "Cannot navigate past the last supported date"),
        }
    }

    pub fn go_to_prev(&mut self) {
        match self.current_date.checked_sub_days(self.step()) {
            Some(prev) => self.current_date = prev,
            None => warn!(date = %self.current_date, "Cannot navigate before the first supported date"),
        }
    }

    /// Jump to `today` and switch back to day view.
    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.current_date = today;
        self.view_mode = ViewMode::Day;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_steps() {
        let mut nav = CalendarNavigation::new(date(2024, 2, 28));
        nav.go_to_next();
        assert_eq!(nav.current_date, date(2024, 2, 29));
        nav.go_to_next();
        assert_eq!(nav.current_date, date(2024, 3, 1));
        nav.go_to_prev();
        assert_eq!(nav.current_date, date(2024, 2, 29));
    }

    #[test]
    fn test_week_steps() {
        let mut nav = CalendarNavigation::new(date(2024, 12, 30));
        nav.set_view_mode(ViewMode::Week);
        nav.go_to_next();
        assert_eq!(nav.current_date, date(2025, 1, 6));
        nav.go_to_prev();
        nav.go_to_prev();
        assert_eq!(nav.current_date, date(2024, 12, 23));
    }

    #[test]
    fn test_go_to_today_resets_view_mode() {
        let mut nav = CalendarNavigation::new(date(2024, 6, 10));
        nav.set_view_mode(ViewMode::Week);
        nav.go_to_next();

        nav.go_to_today(date(2024, 6, 12));
        assert_eq!(nav, CalendarNavigation::new(date(2024, 6, 12)));
    }

    #[test]
    fn test_range_ends_do_not_move() {
        let mut nav = CalendarNavigation::new(NaiveDate::MAX);
        nav.go_to_next();
        assert_eq!(nav.current_date, NaiveDate::MAX);

        let mut nav = CalendarNavigation::new(NaiveDate::MIN);
        nav.go_to_prev();
        assert_eq!(nav.current_date, NaiveDate::MIN);
    }
}
