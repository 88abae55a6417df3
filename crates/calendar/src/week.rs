//! Week numbering for a configurable first weekday and minimum first-week
//! length.

use jiff::Span;
use jiff::civil::{Date, Weekday};

/// Week rules of a calendar identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WeekRules {
    pub first_weekday: Weekday,
    pub minimum_days: u8,
}

/// Adds `n` days to `date`, returning `None` outside the supported range.
pub(crate) fn add_days(date: Date, n: i64) -> Option<Date> {
    let span = Span::new().try_days(n).ok()?;
    date.checked_add(span).ok()
}

/// Number of whole days from `earlier` to `later`.
pub(crate) fn days_between(earlier: Date, later: Date) -> Option<i64> {
    later.since(earlier).ok().map(|span| i64::from(span.get_days()))
}

impl WeekRules {
    /// Days from the first weekday to `weekday` (0..=6).
    pub fn offset(self, weekday: Weekday) -> i64 {
        let from = i64::from(self.first_weekday.to_monday_zero_offset());
        let to = i64::from(weekday.to_monday_zero_offset());
        (to - from).rem_euclid(7)
    }

    /// The first day of the week containing `date`.
    pub fn week_start(self, date: Date) -> Option<Date> {
        add_days(date, -self.offset(date.weekday()))
    }

    /// The first day of week 1 of the week-numbering year `year`.
    pub fn first_week_start(self, year: i32) -> Option<Date> {
        let jan1 = Date::new(i16::try_from(year).ok()?, 1, 1).ok()?;
        let offset = self.offset(jan1.weekday());
        let start = add_days(jan1, -offset)?;
        if 7 - offset >= i64::from(self.minimum_days) {
            Some(start)
        } else {
            add_days(start, 7)
        }
    }

    /// Returns `(year_for_week_of_year, week_of_year)` for `date`.
    pub fn week_of_year(self, date: Date) -> (i32, i32) {
        let year = i32::from(date.year());
        let mut week_year = year;
        match self.first_week_start(year) {
            Some(start) if date < start => week_year = year - 1,
            _ => {
                if let Some(next) = self.first_week_start(year + 1) {
                    if date >= next {
                        week_year = year + 1;
                    }
                }
            }
        }
        let week = self
            .first_week_start(week_year)
            .and_then(|start| days_between(start, date))
            .map_or(1, |days| days.div_euclid(7) + 1);
        (week_year, i32::try_from(week).unwrap_or(1))
    }

    /// Week of the month for `date`; 0 when the date falls in a leading
    /// partial week shorter than the minimum.
    pub fn week_of_month(self, date: Date) -> i32 {
        let offset = self.offset(date.first_of_month().weekday());
        let mut week = (i64::from(date.day()) - 1 + offset) / 7 + 1;
        if 7 - offset < i64::from(self.minimum_days) {
            week -= 1;
        }
        i32::try_from(week).unwrap_or(0)
    }
}
