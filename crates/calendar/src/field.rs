//! Calendar field kinds and their fixed search precedence.

use std::fmt;

/// A named unit of calendrical granularity.
///
/// Values extracted for each field follow the conventional numbering:
/// weekdays run from 1 (Sunday) to 7 (Saturday), eras are 0 (BC) and 1 (AD),
/// and `Year` is the year of the era.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Era (0 = BC, 1 = AD).
    Era,
    /// Year within the era.
    Year,
    /// Week-numbering year that owns the date's week of year.
    YearForWeekOfYear,
    /// Quarter of the year (1..=4).
    Quarter,
    /// Month of the year (1..=12).
    Month,
    /// Week of the week-numbering year.
    WeekOfYear,
    /// Week of the month; 0 when the first partial week is too short.
    WeekOfMonth,
    /// Which occurrence of the weekday within the month (1..=5).
    WeekdayOrdinal,
    /// Day of the week (1 = Sunday ..= 7 = Saturday).
    Weekday,
    /// Day of the month.
    Day,
    /// Day of the year (1..=366).
    DayOfYear,
    /// Hour of the day (0..=23).
    Hour,
    /// Minute of the hour.
    Minute,
    /// Second of the minute.
    Second,
    /// Nanosecond within the second.
    Nanosecond,
}

impl Field {
    /// Every field, coarse to fine, in the order the search engine matches
    /// them. The order is load-bearing and never changes.
    pub const PRECEDENCE: [Field; 15] = [
        Field::Era,
        Field::Year,
        Field::YearForWeekOfYear,
        Field::Quarter,
        Field::WeekOfYear,
        Field::DayOfYear,
        Field::Month,
        Field::WeekOfMonth,
        Field::WeekdayOrdinal,
        Field::Weekday,
        Field::Day,
        Field::Hour,
        Field::Minute,
        Field::Second,
        Field::Nanosecond,
    ];

    /// Position of this field in [`Field::PRECEDENCE`].
    pub fn precedence(self) -> usize {
        Self::PRECEDENCE
            .iter()
            .position(|&f| f == self)
            .unwrap_or(Self::PRECEDENCE.len())
    }

    /// Returns true for fields finer than a day.
    pub fn is_time(self) -> bool {
        matches!(
            self,
            Field::Hour | Field::Minute | Field::Second | Field::Nanosecond
        )
    }

    /// The next coarser unit whose span bounds a search for this field.
    ///
    /// Returns `None` for fields that are absolute (era and years), since
    /// there is no enclosing period to move into.
    pub fn next_higher(self) -> Option<Field> {
        match self {
            Field::Era | Field::Year | Field::YearForWeekOfYear => None,
            Field::Quarter | Field::Month | Field::DayOfYear => Some(Field::Year),
            Field::WeekOfYear => Some(Field::YearForWeekOfYear),
            Field::WeekOfMonth | Field::WeekdayOrdinal | Field::Day => Some(Field::Month),
            Field::Weekday => Some(Field::WeekOfYear),
            Field::Hour => Some(Field::Day),
            Field::Minute => Some(Field::Hour),
            Field::Second => Some(Field::Minute),
            Field::Nanosecond => Some(Field::Second),
        }
    }

    /// Lowercase snake-case name, as used in configuration and logs.
    pub fn name(self) -> &'static str {
        match self {
            Field::Era => "era",
            Field::Year => "year",
            Field::YearForWeekOfYear => "year_for_week_of_year",
            Field::Quarter => "quarter",
            Field::Month => "month",
            Field::WeekOfYear => "week_of_year",
            Field::WeekOfMonth => "week_of_month",
            Field::WeekdayOrdinal => "weekday_ordinal",
            Field::Weekday => "weekday",
            Field::Day => "day",
            Field::DayOfYear => "day_of_year",
            Field::Hour => "hour",
            Field::Minute => "minute",
            Field::Second => "second",
            Field::Nanosecond => "nanosecond",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
