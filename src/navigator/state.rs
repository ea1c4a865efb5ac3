use chrono::{Datelike, Days, NaiveDate};
use std::fmt;
use thiserror::Error;

use super::range::{shift_months, DateRange};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Month,
    Week,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Month => "month",
            ViewMode::Week => "week",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

#[derive(Debug, Error, PartialEq)]
#[error("Navigation offset must be -1 or +1, got {0}")]
pub struct InvalidDirection(pub i32);

impl Direction {
    pub fn offset(self) -> i32 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

impl TryFrom<i32> for Direction {
    type Error = InvalidDirection;

    fn try_from(offset: i32) -> Result<Self, Self::Error> {
        match offset {
            -1 => Ok(Direction::Previous),
            1 => Ok(Direction::Next),
            other => Err(InvalidDirection(other)),
        }
    }
}

/// Reference date, view mode and drill-down selection of the calendar screen.
///
/// `selected_date` is only ever set while in week mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    reference_date: NaiveDate,
    view_mode: ViewMode,
    selected_date: Option<NaiveDate>,
    // Day-of-month month navigation aims for; survives clamping in short months.
    anchor_day: u32,
}

impl CalendarState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            reference_date: today,
            view_mode: ViewMode::Month,
            selected_date: None,
            anchor_day: today.day(),
        }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn range(&self) -> DateRange {
        compute_range(self)
    }

    pub fn navigate(&mut self, direction: Direction) {
        match self.view_mode {
            ViewMode::Month => {
                self.reference_date =
                    shift_months(self.reference_date, direction.offset(), self.anchor_day);
            }
            ViewMode::Week => {
                let week = Days::new(7);
                let shifted = match direction {
                    Direction::Next => self.reference_date.checked_add_days(week),
                    Direction::Previous => self.reference_date.checked_sub_days(week),
                };
                if let Some(date) = shifted {
                    self.set_reference(date);
                }
            }
        }
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        if mode == ViewMode::Month {
            self.selected_date = None;
        }
    }

    /// Drill down from any view into the week around `day`.
    pub fn select_date(&mut self, day: NaiveDate) {
        self.selected_date = Some(day);
        self.set_reference(day);
        self.view_mode = ViewMode::Week;
    }

    pub fn jump_to(&mut self, date: NaiveDate) {
        self.set_reference(date);
    }

    fn set_reference(&mut self, date: NaiveDate) {
        self.reference_date = date;
        self.anchor_day = date.day();
    }
}

pub fn compute_range(state: &CalendarState) -> DateRange {
    match state.view_mode {
        ViewMode::Month => DateRange::month_of(state.reference_date),
        ViewMode::Week => DateRange::week_of(state.reference_date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use proptest::prelude::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn new_state_is_month_view_without_selection() {
        let state = CalendarState::new(date(2024, 3, 12));

        assert_eq!(state.view_mode(), ViewMode::Month);
        assert_eq!(state.selected_date(), None);
        assert_eq!(state.reference_date(), date(2024, 3, 12));
    }

    #[test]
    fn clicking_a_day_in_month_view_drills_down_to_week() {
        let mut state = CalendarState::new(date(2024, 3, 1));

        state.select_date(date(2024, 3, 10));

        assert_eq!(state.reference_date(), date(2024, 3, 10));
        assert_eq!(state.view_mode(), ViewMode::Week);
        assert_eq!(state.selected_date(), Some(date(2024, 3, 10)));
        assert_eq!(state.range().start.weekday(), Weekday::Sun);
    }

    #[test]
    fn switching_to_month_clears_selection() {
        let mut state = CalendarState::new(date(2024, 3, 1));
        state.select_date(date(2024, 3, 10));

        state.set_view_mode(ViewMode::Month);

        assert_eq!(state.selected_date(), None);
        assert_eq!(state.range(), DateRange::month_of(date(2024, 3, 10)));
    }

    #[test]
    fn switching_to_week_keeps_selection() {
        let mut state = CalendarState::new(date(2024, 3, 1));
        state.select_date(date(2024, 3, 10));

        state.set_view_mode(ViewMode::Week);

        assert_eq!(state.selected_date(), Some(date(2024, 3, 10)));
    }

    #[test]
    fn switching_to_week_from_selector_leaves_no_selection() {
        let mut state = CalendarState::new(date(2024, 3, 1));

        state.set_view_mode(ViewMode::Week);

        assert_eq!(state.view_mode(), ViewMode::Week);
        assert_eq!(state.selected_date(), None);
        assert_eq!(state.range(), DateRange::new(date(2024, 2, 25), date(2024, 3, 2)));
    }

    #[test]
    fn week_navigation_moves_seven_days_and_keeps_selection() {
        let mut state = CalendarState::new(date(2024, 3, 1));
        state.select_date(date(2024, 3, 10));

        state.navigate(Direction::Next);

        assert_eq!(state.reference_date(), date(2024, 3, 17));
        assert_eq!(state.selected_date(), Some(date(2024, 3, 10)));
        assert_eq!(state.view_mode(), ViewMode::Week);
    }

    #[test]
    fn month_navigation_clamps_then_recovers_day() {
        let mut state = CalendarState::new(date(2024, 1, 31));

        state.navigate(Direction::Next);
        assert_eq!(state.reference_date(), date(2024, 2, 29));

        state.navigate(Direction::Next);
        assert_eq!(state.reference_date(), date(2024, 3, 31));

        state.navigate(Direction::Previous);
        state.navigate(Direction::Previous);
        assert_eq!(state.reference_date(), date(2024, 1, 31));
    }

    #[test]
    fn week_navigation_resets_anchor_day() {
        let mut state = CalendarState::new(date(2024, 1, 31));
        state.set_view_mode(ViewMode::Week);
        state.navigate(Direction::Next);
        state.set_view_mode(ViewMode::Month);

        state.navigate(Direction::Next);

        assert_eq!(state.reference_date(), date(2024, 3, 7));
    }

    #[test]
    fn direction_from_offset() {
        assert_eq!(Direction::try_from(1), Ok(Direction::Next));
        assert_eq!(Direction::try_from(-1), Ok(Direction::Previous));
        assert_eq!(Direction::try_from(2), Err(InvalidDirection(2)));
        assert_eq!(Direction::try_from(0), Err(InvalidDirection(0)));
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (1900i32..2200, 0u32..366).prop_map(|(year, offset)| {
            date(year, 1, 1) + chrono::Duration::days(offset as i64 % 365)
        })
    }

    fn any_mode() -> impl Strategy<Value = ViewMode> {
        prop_oneof![Just(ViewMode::Month), Just(ViewMode::Week)]
    }

    proptest! {
        #[test]
        fn next_then_previous_restores_reference(reference in any_date(), mode in any_mode()) {
            let mut state = CalendarState::new(reference);
            state.set_view_mode(mode);

            state.navigate(Direction::Next);
            state.navigate(Direction::Previous);

            prop_assert_eq!(state.reference_date(), reference);
        }

        #[test]
        fn select_date_always_lands_in_week(reference in any_date(), day in any_date(), mode in any_mode()) {
            let mut state = CalendarState::new(reference);
            state.set_view_mode(mode);

            state.select_date(day);

            prop_assert_eq!(state.view_mode(), ViewMode::Week);
            prop_assert_eq!(state.selected_date(), Some(day));
            prop_assert_eq!(state.reference_date(), day);
        }

        #[test]
        fn month_mode_never_has_selection(reference in any_date(), day in any_date()) {
            let mut state = CalendarState::new(reference);
            state.select_date(day);

            state.set_view_mode(ViewMode::Month);

            prop_assert_eq!(state.selected_date(), None);
        }
    }
}
