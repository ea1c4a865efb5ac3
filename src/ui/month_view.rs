use chrono::{Datelike, Days, NaiveDate};

use crate::navigator::range::start_of_week;
use crate::navigator::CalendarNavigator;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_cursor: bool,
    pub is_today: bool,
    pub entry_count: usize,
    pub is_current_month: bool,
}

impl DayCell {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            is_cursor: false,
            is_today: false,
            entry_count: 0,
            is_current_month: true,
        }
    }

    pub fn with_cursor(mut self, cursor: bool) -> Self {
        self.is_cursor = cursor;
        self
    }

    pub fn with_today(mut self, today: bool) -> Self {
        self.is_today = today;
        self
    }

    pub fn with_entries(mut self, count: usize) -> Self {
        self.entry_count = count;
        self
    }

    pub fn with_current_month(mut self, current_month: bool) -> Self {
        self.is_current_month = current_month;
        self
    }

    pub fn has_entries(&self) -> bool {
        self.entry_count > 0
    }
}

/// Sunday-first grid of the navigator's month, padded with neighbouring days
/// so that every week row has seven cells. Padding cells never carry entries.
pub fn calculate_layout(navigator: &CalendarNavigator, cursor: NaiveDate, today: NaiveDate) -> MonthLayout {
    let range = navigator.range();
    let entries = navigator.entries();

    let grid_start = start_of_week(range.start);
    let grid_end = start_of_week(range.end)
        .checked_add_days(Days::new(6))
        .unwrap_or(range.end);

    let mut weeks = Vec::new();
    let mut current_week = Week { days: Vec::new() };

    for date in grid_start.iter_days().take_while(|d| *d <= grid_end) {
        let in_month = range.contains(date);
        let count = if in_month { entries.count_on(date) } else { 0 };

        current_week.days.push(
            DayCell::new(date)
                .with_cursor(date == cursor)
                .with_today(date == today)
                .with_entries(count)
                .with_current_month(in_month),
        );

        if current_week.days.len() == 7 {
            weeks.push(current_week);
            current_week = Week { days: Vec::new() };
        }
    }

    MonthLayout {
        year: range.start.year(),
        month: range.start.month(),
        weeks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::{Entry, EntriesByDate};
    use crate::navigator::FetchOutcome;
    use crate::store::MockEntryStore;
    use chrono::{TimeZone, Utc, Weekday};
    use std::sync::Arc;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn navigator_with_entries(reference: NaiveDate, days: &[NaiveDate]) -> CalendarNavigator {
        let mut navigator = CalendarNavigator::new(Arc::new(MockEntryStore::new()), reference);
        let entries = days.iter().enumerate().map(|(i, d)| Entry {
            id: i as i64,
            title: String::new(),
            content: "note".to_string(),
            mood: None,
            created_at: Utc.with_ymd_and_hms(d.year(), d.month(), d.day(), 8, 0, 0).unwrap(),
        });
        let request = navigator.reload();
        navigator.apply(FetchOutcome {
            request,
            result: Ok(EntriesByDate::from_entries(entries)),
        });
        navigator
    }

    #[test]
    fn month_layout_has_correct_year_and_month() {
        let navigator = navigator_with_entries(date(2024, 2, 15), &[]);

        let layout = calculate_layout(&navigator, date(2024, 2, 15), date(2024, 2, 15));

        assert_eq!(layout.year, 2024);
        assert_eq!(layout.month, 2);
    }

    #[test]
    fn each_week_has_seven_days_starting_sunday() {
        let navigator = navigator_with_entries(date(2024, 3, 1), &[]);

        let layout = calculate_layout(&navigator, date(2024, 3, 1), date(2024, 3, 1));

        assert_eq!(layout.weeks.len(), 6);
        for week in &layout.weeks {
            assert_eq!(week.days.len(), 7);
            assert_eq!(week.days[0].date.weekday(), Weekday::Sun);
        }
    }

    #[test]
    fn padding_days_are_marked_outside_month() {
        let navigator = navigator_with_entries(date(2024, 3, 1), &[]);

        let layout = calculate_layout(&navigator, date(2024, 3, 1), date(2024, 3, 1));

        let first_week = &layout.weeks[0];
        assert_eq!(first_week.days[0].date, date(2024, 2, 25));
        assert!(!first_week.days[0].is_current_month);
        assert!(first_week.days[5].is_current_month);
    }

    #[test]
    fn entry_counts_come_from_fetched_entries() {
        let jan_10 = date(2024, 1, 10);
        let navigator = navigator_with_entries(jan_10, &[jan_10, jan_10, date(2024, 1, 20)]);

        let layout = calculate_layout(&navigator, jan_10, jan_10);

        let cell = layout.weeks.iter()
            .flat_map(|w| &w.days)
            .find(|c| c.date == jan_10)
            .unwrap();
        assert_eq!(cell.entry_count, 2);
        assert!(cell.has_entries());
    }

    #[test]
    fn cursor_and_today_are_marked_once() {
        let navigator = navigator_with_entries(date(2024, 3, 1), &[]);

        let layout = calculate_layout(&navigator, date(2024, 3, 12), date(2024, 3, 4));

        let cells: Vec<_> = layout.weeks.iter().flat_map(|w| &w.days).collect();
        let cursor: Vec<_> = cells.iter().filter(|c| c.is_cursor).collect();
        let today: Vec<_> = cells.iter().filter(|c| c.is_today).collect();
        assert_eq!(cursor.len(), 1);
        assert_eq!(cursor[0].date, date(2024, 3, 12));
        assert_eq!(today[0].date, date(2024, 3, 4));
    }

    #[test]
    fn month_starting_on_sunday_has_no_leading_padding() {
        let navigator = navigator_with_entries(date(2024, 9, 15), &[]);

        let layout = calculate_layout(&navigator, date(2024, 9, 15), date(2024, 9, 15));

        assert_eq!(layout.weeks[0].days[0].date, date(2024, 9, 1));
        assert!(layout.weeks[0].days[0].is_current_month);
    }
}
