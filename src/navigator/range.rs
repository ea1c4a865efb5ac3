use chrono::{Datelike, Days, Months, NaiveDate};

/// Inclusive span of days shown by the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn month_of(date: NaiveDate) -> Self {
        let start = first_day_of_month(date);
        Self::new(start, last_day_of_month(start))
    }

    /// Sunday through Saturday around `date`.
    pub fn week_of(date: NaiveDate) -> Self {
        let start = start_of_week(date);
        let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
        Self::new(start, end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let days_from_sunday = date.weekday().num_days_from_sunday() as u64;
    date.checked_sub_days(Days::new(days_from_sunday))
        .unwrap_or(date)
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let year = date.year();
    let month = date.month();

    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    next_month_first
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    last_day_of_month(date).day()
}

/// Moves `date` by whole months, landing on `anchor_day` or the last day of
/// the target month when that month is shorter.
pub fn shift_months(date: NaiveDate, months: i32, anchor_day: u32) -> NaiveDate {
    let first = first_day_of_month(date);
    let step = Months::new(months.unsigned_abs());

    let target_first = if months >= 0 {
        first.checked_add_months(step)
    } else {
        first.checked_sub_months(step)
    };

    let Some(target_first) = target_first else {
        return date;
    };

    let day = anchor_day.clamp(1, days_in_month(target_first));
    target_first.with_day(day).unwrap_or(target_first)
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
    fn leap_february_month_range() {
        let range = DateRange::month_of(date(2024, 2, 15));

        assert_eq!(range, DateRange::new(date(2024, 2, 1), date(2024, 2, 29)));
    }

    #[test]
    fn december_month_range_ends_on_31st() {
        let range = DateRange::month_of(date(2023, 12, 5));

        assert_eq!(range.end, date(2023, 12, 31));
    }

    #[test]
    fn week_range_spans_month_boundary() {
        let friday = date(2024, 3, 1);
        assert_eq!(friday.weekday(), Weekday::Fri);

        let range = DateRange::week_of(friday);

        assert_eq!(range, DateRange::new(date(2024, 2, 25), date(2024, 3, 2)));
    }

    #[test]
    fn sunday_starts_its_own_week() {
        let sunday = date(2024, 3, 10);

        assert_eq!(start_of_week(sunday), sunday);
    }

    #[test]
    fn saturday_belongs_to_preceding_sunday() {
        assert_eq!(start_of_week(date(2024, 3, 16)), date(2024, 3, 10));
    }

    #[test]
    fn days_iterates_inclusively() {
        let range = DateRange::new(date(2024, 2, 27), date(2024, 3, 1));

        let days: Vec<NaiveDate> = range.days().collect();

        assert_eq!(days, vec![date(2024, 2, 27), date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]);
    }

    #[test]
    fn shift_months_clamps_to_shorter_month() {
        assert_eq!(shift_months(date(2024, 1, 31), 1, 31), date(2024, 2, 29));
        assert_eq!(shift_months(date(2023, 1, 31), 1, 31), date(2023, 2, 28));
    }

    #[test]
    fn shift_months_restores_anchor_day() {
        assert_eq!(shift_months(date(2024, 2, 29), -1, 31), date(2024, 1, 31));
        assert_eq!(shift_months(date(2024, 2, 29), 1, 31), date(2024, 3, 31));
    }

    #[test]
    fn shift_months_crosses_year_boundary() {
        assert_eq!(shift_months(date(2024, 12, 15), 1, 15), date(2025, 1, 15));
        assert_eq!(shift_months(date(2024, 1, 15), -1, 15), date(2023, 12, 15));
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (1900i32..2200, 1u32..=12, 1u32..=31).prop_map(|(y, m, d)| {
            let first = NaiveDate::from_ymd_opt(y, m, 1).unwrap();
            first.with_day(d.min(days_in_month(first))).unwrap()
        })
    }

    proptest! {
        #[test]
        fn month_range_starts_on_first_and_ends_on_last(reference in any_date()) {
            let range = DateRange::month_of(reference);

            prop_assert_eq!(range.start.day(), 1);
            prop_assert_eq!(range.start.month(), reference.month());
            prop_assert_eq!(range.end.month(), range.start.month());
            prop_assert_ne!(range.end.succ_opt().unwrap().month(), range.start.month());
            prop_assert!(range.contains(reference));
        }

        #[test]
        fn week_range_is_seven_days_from_sunday(reference in any_date()) {
            let range = DateRange::week_of(reference);

            prop_assert_eq!(range.start.weekday(), Weekday::Sun);
            prop_assert_eq!(range.days().count(), 7);
            prop_assert!(range.contains(reference));
        }
    }
}
