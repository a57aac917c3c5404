//! crates/meal_planner_core/src/window.rs
//!
//! Whole-calendar-day ranges used to select meals.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

/// Days of history, before the target date, that feed recommendations.
pub const LOOKBACK_DAYS: u64 = 30;

/// An inclusive range of calendar days, `first` through `last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DateWindow {
    pub fn new(first: NaiveDate, last: NaiveDate) -> Self {
        Self { first, last }
    }

    /// The `period` calendar days ending with `today`. A zero period is read as one day.
    pub fn trailing(today: NaiveDate, period: u32) -> Self {
        let back = u64::from(period.max(1) - 1);
        Self {
            first: today.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN),
            last: today,
        }
    }

    /// The recommendation lookback: `LOOKBACK_DAYS` before `date`, through `date`.
    pub fn lookback(date: NaiveDate) -> Self {
        Self {
            first: date
                .checked_sub_days(Days::new(LOOKBACK_DAYS))
                .unwrap_or(NaiveDate::MIN),
            last: date,
        }
    }

    /// Midnight at the start of `first`.
    pub fn start(&self) -> DateTime<Utc> {
        self.first.and_time(NaiveTime::MIN).and_utc()
    }

    /// The last representable instant of `last`.
    pub fn end(&self) -> DateTime<Utc> {
        let end_of_day =
            NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
        self.last.and_time(end_of_day).and_utc()
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        let day = instant.date_naive();
        self.first <= day && day <= self.last
    }
}
