//! Pure calendar arithmetic: week boundaries and day ranges.
//!
//! Everything here works on [`NaiveDate`] day keys. How a timestamp becomes a
//! day key is decided elsewhere, by [`DayReference`](crate::settings::DayReference);
//! this module never looks at a clock.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::weekday::Weekday;

/// The weekday of `date`
pub fn weekday_of(date: NaiveDate) -> Weekday {
    Weekday::from(date.weekday())
}

/// The first day of the week that contains `date`, for weeks starting on `week_start`
pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (7 + weekday_of(date).days_from_sunday() - week_start.days_from_sunday()) % 7;
    date - Duration::days(i64::from(offset))
}

/// The last day of the week that contains `date` (inclusive, 6 days after the start)
pub fn end_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    start_of_week(date, week_start) + Duration::days(6)
}

/// The week that contains `date`, as an inclusive range
pub fn week_of(date: NaiveDate, week_start: Weekday) -> DayRange {
    let first = start_of_week(date, week_start);
    DayRange::new(first, first + Duration::days(6))
}

/// `count` consecutive days starting at `start`
pub fn days_from(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    start.iter_days().take(count).collect()
}

/// The `count` consecutive days ending at `end`, oldest first.
/// This is the window the dashboard chart asks for (7 days ending today)
pub fn trailing_days(end: NaiveDate, count: usize) -> Vec<NaiveDate> {
    if count == 0 {
        return Vec::new();
    }
    days_from(end - Duration::days(count as i64 - 1), count)
}

/// An inclusive range of calendar days, the unit sessions load completions by
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    first: NaiveDate,
    last: NaiveDate,
}

impl DayRange {
    /// A range spanning `first` to `last`, both included.
    /// Bounds given in reverse order are swapped
    pub fn new(first: NaiveDate, last: NaiveDate) -> Self {
        if first <= last {
            Self { first, last }
        } else {
            Self { first: last, last: first }
        }
    }

    /// The range holding only `date`
    pub fn single(date: NaiveDate) -> Self {
        Self { first: date, last: date }
    }

    /// The range of the `count` days ending at `end`.
    /// A range always spans at least one day, so `count == 0` yields the
    /// single day `end`
    pub fn trailing(end: NaiveDate, count: usize) -> Self {
        match trailing_days(end, count).first() {
            Some(first) => Self::new(*first, end),
            None => Self::single(end),
        }
    }

    pub fn first(&self) -> NaiveDate {
        self.first
    }

    pub fn last(&self) -> NaiveDate {
        self.last
    }

    /// Whether `date` falls within this range
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }

    /// Every day of the range, oldest first
    pub fn days(&self) -> Vec<NaiveDate> {
        self.first
            .iter_days()
            .take_while(|day| *day <= self.last)
            .collect()
    }

    /// How many days the range spans
    pub fn num_days(&self) -> usize {
        (self.last - self.first).num_days() as usize + 1
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekdays_of_known_dates() {
        // 2024-01-07 was a Sunday
        assert_eq!(weekday_of(date(2024, 1, 7)), Weekday::Sunday);
        assert_eq!(weekday_of(date(2024, 1, 8)), Weekday::Monday);
        assert_eq!(weekday_of(date(2024, 1, 13)), Weekday::Saturday);
    }

    #[test]
    fn week_boundaries_are_inclusive_and_configurable() {
        let wednesday = date(2024, 1, 10);

        assert_eq!(start_of_week(wednesday, Weekday::Sunday), date(2024, 1, 7));
        assert_eq!(end_of_week(wednesday, Weekday::Sunday), date(2024, 1, 13));

        // A Sunday is the last day of a Monday-started week
        assert_eq!(start_of_week(date(2024, 1, 7), Weekday::Monday), date(2024, 1, 1));
        assert_eq!(end_of_week(date(2024, 1, 7), Weekday::Monday), date(2024, 1, 7));

        // The start of a week is its own start
        assert_eq!(start_of_week(date(2024, 1, 7), Weekday::Sunday), date(2024, 1, 7));
    }

    #[test]
    fn week_of_enumerates_seven_days_in_order() {
        let week = week_of(date(2024, 1, 10), Weekday::Sunday);
        let days = week.days();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date(2024, 1, 7));
        assert_eq!(days[6], date(2024, 1, 13));
        assert_eq!(week.num_days(), 7);
    }

    #[test]
    fn day_enumeration_crosses_month_boundaries() {
        let days = days_from(date(2024, 1, 30), 4);
        assert_eq!(
            days,
            vec![date(2024, 1, 30), date(2024, 1, 31), date(2024, 2, 1), date(2024, 2, 2)]
        );
        assert!(days_from(date(2024, 1, 30), 0).is_empty());
    }

    #[test]
    fn trailing_days_end_at_the_given_day() {
        let days = trailing_days(date(2024, 1, 10), 7);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date(2024, 1, 4));
        assert_eq!(days[6], date(2024, 1, 10));
        assert!(trailing_days(date(2024, 1, 10), 0).is_empty());
    }

    #[test]
    fn ranges_normalize_and_test_membership() {
        let range = DayRange::new(date(2024, 1, 13), date(2024, 1, 7));
        assert_eq!(range.first(), date(2024, 1, 7));
        assert_eq!(range.last(), date(2024, 1, 13));

        assert!(range.contains(date(2024, 1, 7)));
        assert!(range.contains(date(2024, 1, 13)));
        assert!(range.contains(date(2024, 1, 6)) == false);
        assert!(range.contains(date(2024, 1, 14)) == false);

        let single = DayRange::single(date(2024, 1, 7));
        assert_eq!(single.days(), vec![date(2024, 1, 7)]);
        assert_eq!(DayRange::trailing(date(2024, 1, 10), 7).first(), date(2024, 1, 4));
        assert_eq!(DayRange::trailing(date(2024, 1, 10), 0), DayRange::single(date(2024, 1, 10)));
    }
}
