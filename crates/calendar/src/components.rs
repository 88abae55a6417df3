//! Sparse calendar field targets.

use jiff::tz::TimeZone;

use crate::field::Field;
use crate::identity::CalendarSystem;

/// A partial date specification: target values for any subset of calendar
/// fields, plus optional calendar and time zone overrides.
///
/// Unset fields are absent, never a sentinel value.
///
/// # Example
///
/// ```
/// use kairos_calendar::{DateComponents, Field};
///
/// let comps = DateComponents::new().with_month(6).with_weekday(2);
/// assert_eq!(comps.get(Field::Month), Some(6));
/// assert_eq!(comps.highest_set_unit(), Some(Field::Month));
/// assert_eq!(comps.lowest_set_unit(), Some(Field::Weekday));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateComponents {
    era: Option<i32>,
    year: Option<i32>,
    year_for_week_of_year: Option<i32>,
    quarter: Option<i32>,
    month: Option<i32>,
    week_of_year: Option<i32>,
    week_of_month: Option<i32>,
    weekday_ordinal: Option<i32>,
    weekday: Option<i32>,
    day: Option<i32>,
    day_of_year: Option<i32>,
    hour: Option<i32>,
    minute: Option<i32>,
    second: Option<i32>,
    nanosecond: Option<i32>,
    calendar: Option<CalendarSystem>,
    time_zone: Option<TimeZone>,
}

macro_rules! with_field {
    ($($method:ident => $field:ident),* $(,)?) => {
        $(
            #[doc = concat!("Sets the `", stringify!($field), "` target.")]
            pub fn $method(mut self, value: i32) -> Self {
                self.$field = Some(value);
                self
            }
        )*
    };
}

impl DateComponents {
    /// Creates an empty specification.
    pub fn new() -> Self {
        Self::default()
    }

    with_field! {
        with_era => era,
        with_year => year,
        with_year_for_week_of_year => year_for_week_of_year,
        with_quarter => quarter,
        with_month => month,
        with_week_of_year => week_of_year,
        with_week_of_month => week_of_month,
        with_weekday_ordinal => weekday_ordinal,
        with_weekday => weekday,
        with_day => day,
        with_day_of_year => day_of_year,
        with_hour => hour,
        with_minute => minute,
        with_second => second,
        with_nanosecond => nanosecond,
    }

    /// Overrides the calendar system used for this search.
    pub fn with_calendar(mut self, calendar: CalendarSystem) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Overrides the time zone used for this search.
    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = Some(time_zone);
        self
    }

    /// Returns the target for `field`, if set.
    pub fn get(&self, field: Field) -> Option<i32> {
        match field {
            Field::Era => self.era,
            Field::Year => self.year,
            Field::YearForWeekOfYear => self.year_for_week_of_year,
            Field::Quarter => self.quarter,
            Field::Month => self.month,
            Field::WeekOfYear => self.week_of_year,
            Field::WeekOfMonth => self.week_of_month,
            Field::WeekdayOrdinal => self.weekday_ordinal,
            Field::Weekday => self.weekday,
            Field::Day => self.day,
            Field::DayOfYear => self.day_of_year,
            Field::Hour => self.hour,
            Field::Minute => self.minute,
            Field::Second => self.second,
            Field::Nanosecond => self.nanosecond,
        }
    }

    /// Sets or clears the target for `field`.
    pub fn set(&mut self, field: Field, value: Option<i32>) {
        let slot = match field {
            Field::Era => &mut self.era,
            Field::Year => &mut self.year,
            Field::YearForWeekOfYear => &mut self.year_for_week_of_year,
            Field::Quarter => &mut self.quarter,
            Field::Month => &mut self.month,
            Field::WeekOfYear => &mut self.week_of_year,
            Field::WeekOfMonth => &mut self.week_of_month,
            Field::WeekdayOrdinal => &mut self.weekday_ordinal,
            Field::Weekday => &mut self.weekday,
            Field::Day => &mut self.day,
            Field::DayOfYear => &mut self.day_of_year,
            Field::Hour => &mut self.hour,
            Field::Minute => &mut self.minute,
            Field::Second => &mut self.second,
            Field::Nanosecond => &mut self.nanosecond,
        };
        *slot = value;
    }

    /// Returns true if `field` has a target.
    pub fn is_set(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// Returns true if no field has a target.
    ///
    /// Calendar and time zone overrides do not count as targets.
    pub fn is_empty(&self) -> bool {
        Field::PRECEDENCE.iter().all(|&f| !self.is_set(f))
    }

    /// Iterates over `(field, target)` pairs in precedence order.
    pub fn iter_set(&self) -> impl Iterator<Item = (Field, i32)> + '_ {
        Field::PRECEDENCE
            .iter()
            .filter_map(move |&f| self.get(f).map(|v| (f, v)))
    }

    /// The coarsest field with a target, in precedence order.
    pub fn highest_set_unit(&self) -> Option<Field> {
        self.iter_set().next().map(|(f, _)| f)
    }

    /// The finest field with a target, in precedence order.
    pub fn lowest_set_unit(&self) -> Option<Field> {
        self.iter_set().last().map(|(f, _)| f)
    }

    /// The calendar system override, if any.
    pub fn calendar(&self) -> Option<CalendarSystem> {
        self.calendar
    }

    /// The time zone override, if any.
    pub fn time_zone(&self) -> Option<&TimeZone> {
        self.time_zone.as_ref()
    }
}
