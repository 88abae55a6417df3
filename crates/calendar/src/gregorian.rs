//! Proleptic Gregorian calendar primitive backed by `jiff`.
//!
//! All field arithmetic is done on civil dates and times in the identity's
//! time zone and mapped back to absolute instants. Local times that fall
//! into a DST gap resolve past the gap; repeated local times resolve to the
//! earlier occurrence.

use std::ops::RangeInclusive;

use jiff::civil::{Date, DateTime, Time};
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Span, Timestamp};

use crate::components::DateComponents;
use crate::field::Field;
use crate::identity::{CalendarIdentity, weekday_from_number, weekday_number};
use crate::primitive::{CalendarPrimitive, FieldInterval};
use crate::week::{WeekRules, add_days};

/// Year used by [`CalendarPrimitive::instant`] when none is given.
const DEFAULT_YEAR: i32 = 1970;

/// A [`CalendarPrimitive`] for the Gregorian and ISO 8601 calendars.
#[derive(Debug, Clone, PartialEq)]
pub struct GregorianCalendar {
    identity: CalendarIdentity,
}

impl Default for GregorianCalendar {
    fn default() -> Self {
        Self::new(CalendarIdentity::gregorian(TimeZone::UTC))
    }
}

impl GregorianCalendar {
    /// Creates a calendar for `identity`.
    pub fn new(identity: CalendarIdentity) -> Self {
        Self { identity }
    }

    /// The calendar's identity.
    pub fn identity(&self) -> &CalendarIdentity {
        &self.identity
    }

    /// The calendar's time zone.
    pub fn time_zone(&self) -> &TimeZone {
        self.identity.time_zone()
    }

    fn rules(&self) -> WeekRules {
        WeekRules {
            first_weekday: self.identity.first_weekday(),
            minimum_days: self.identity.minimum_days_in_first_week(),
        }
    }

    fn civil(&self, at: Timestamp) -> DateTime {
        self.time_zone().to_datetime(at)
    }

    fn resolve(&self, dt: DateTime) -> Option<Timestamp> {
        self.time_zone().to_ambiguous_timestamp(dt).compatible().ok()
    }

    /// First instant of `date` in the time zone.
    fn day_start(&self, date: Date) -> Option<Timestamp> {
        self.resolve(date.to_datetime(Time::midnight()))
    }

    /// Interval covering the civil dates `[first, end)`.
    fn dates(&self, first: Date, end: Date) -> Option<FieldInterval> {
        FieldInterval::between(self.day_start(first)?, self.day_start(end)?)
    }

    fn era_interval(&self, date: Date) -> Option<FieldInterval> {
        let boundary = self.day_start(Date::new(1, 1, 1).ok()?)?;
        if date.year() <= 0 {
            return FieldInterval::between(Timestamp::MIN, boundary);
        }
        // The current era never ends; its duration reaches one past the
        // last representable instant.
        let duration = Timestamp::MAX
            .duration_since(boundary)
            .checked_add(SignedDuration::from_nanos(1))?;
        Some(FieldInterval {
            start: boundary,
            duration,
        })
    }

    /// Hour, minute or second interval: truncated in local time and
    /// clipped to the time zone transitions around `at`.
    fn time_interval(&self, field: Field, at: Timestamp) -> Option<FieldInterval> {
        let dt = self.civil(at);
        let (truncated, unit) = match field {
            Field::Hour => (
                dt.with().minute(0).second(0).subsec_nanosecond(0).build().ok()?,
                SignedDuration::from_hours(1),
            ),
            Field::Minute => (
                dt.with().second(0).subsec_nanosecond(0).build().ok()?,
                SignedDuration::from_mins(1),
            ),
            _ => (
                dt.with().subsec_nanosecond(0).build().ok()?,
                SignedDuration::from_secs(1),
            ),
        };
        let tz = self.time_zone();
        let start = tz.to_offset(at).to_timestamp(truncated).ok()?;
        let end = start.checked_add(unit).ok()?;

        let after_at = at.checked_add(SignedDuration::from_nanos(1)).unwrap_or(at);
        let start = match tz.preceding(after_at).next() {
            Some(t) if t.timestamp() > start => t.timestamp(),
            _ => start,
        };
        let end = match tz.following(at).next() {
            Some(t) if t.timestamp() < end => t.timestamp(),
            _ => end,
        };
        FieldInterval::between(start, end)
    }

    /// Builds the civil date described by `components`, rolling overflowing
    /// values into the next unit.
    fn components_date(&self, c: &DateComponents) -> Option<Date> {
        let rules = self.rules();
        let year_of_era = c.get(Field::Year).unwrap_or(DEFAULT_YEAR);
        let year = if c.get(Field::Era) == Some(0) {
            1 - year_of_era
        } else {
            year_of_era
        };
        let has_month_day = c.is_set(Field::Month)
            || c.is_set(Field::Day)
            || c.is_set(Field::DayOfYear)
            || c.is_set(Field::Quarter);

        let week_year = c.get(Field::YearForWeekOfYear).or_else(|| {
            (c.is_set(Field::WeekOfYear) && !has_month_day).then_some(year)
        });
        if let Some(week_year) = week_year {
            let start = rules.first_week_start(week_year)?;
            let week = i64::from(c.get(Field::WeekOfYear).unwrap_or(1));
            let offset = c.get(Field::Weekday).map_or(0, |n| rules.offset(lenient_weekday(n)));
            return add_days(start, (week - 1) * 7 + offset);
        }

        if let Some(doy) = c.get(Field::DayOfYear) {
            if !c.is_set(Field::Month) && !c.is_set(Field::Day) {
                let jan1 = Date::new(i16::try_from(year).ok()?, 1, 1).ok()?;
                return add_days(jan1, i64::from(doy) - 1);
            }
        }

        let month = c
            .get(Field::Month)
            .or_else(|| c.get(Field::Quarter).map(|q| (q - 1) * 3 + 1))
            .unwrap_or(1);
        let first = first_of_month(year, month)?;

        if let Some(day) = c.get(Field::Day) {
            return add_days(first, i64::from(day) - 1);
        }
        if let (Some(ordinal), Some(weekday)) = (c.get(Field::WeekdayOrdinal), c.get(Field::Weekday)) {
            let target = lenient_weekday(weekday);
            let lead = (i64::from(target.to_sunday_zero_offset())
                - i64::from(first.weekday().to_sunday_zero_offset()))
            .rem_euclid(7);
            return add_days(first, lead + 7 * (i64::from(ordinal) - 1));
        }
        if let Some(week) = c.get(Field::WeekOfMonth) {
            let base = i64::from(rules.week_of_month(first));
            let offset = c.get(Field::Weekday).map_or(0, |n| rules.offset(lenient_weekday(n)));
            let start = rules.week_start(first)?;
            let date = add_days(start, 7 * (i64::from(week) - base) + offset)?;
            return Some(if c.is_set(Field::Weekday) { date } else { date.max(first) });
        }
        Some(first)
    }

    /// Rolls `field` by `amount` within its parent unit.
    fn roll(&self, amount: i32, field: Field, to: Timestamp) -> Option<Timestamp> {
        let dt = self.civil(to);
        let date = dt.date();
        let rolled = |value: i32, lo: i32, hi: i32| {
            let span = hi - lo + 1;
            lo + (value - lo + amount.rem_euclid(span)).rem_euclid(span)
        };
        let day = i32::from(date.day());
        let days_in_month = i32::from(date.days_in_month());

        let target = match field {
            Field::Era | Field::Year | Field::YearForWeekOfYear => {
                return self.adding(amount, field, to, false);
            }
            Field::Quarter => {
                let month = i32::from(date.month());
                let quarter = (month - 1) / 3 + 1;
                with_month(dt, month + 3 * (rolled(quarter, 1, 4) - quarter))?
            }
            Field::Month => with_month(dt, rolled(i32::from(date.month()), 1, 12))?,
            Field::Day => dt.with().day(i8::try_from(rolled(day, 1, days_in_month)).ok()?).build().ok()?,
            Field::DayOfYear => {
                let doy = i32::from(date.day_of_year());
                let new = rolled(doy, 1, i32::from(date.days_in_year()));
                shift_days(dt, i64::from(new - doy))?
            }
            Field::Weekday => {
                let rules = self.rules();
                let offset = i32::try_from(rules.offset(date.weekday())).ok()?;
                shift_days(dt, i64::from(rolled(offset, 0, 6) - offset))?
            }
            Field::WeekdayOrdinal => {
                let lead = (day - 1) % 7 + 1;
                let count = (days_in_month - lead) / 7 + 1;
                let ordinal = (day - 1) / 7 + 1;
                shift_days(dt, 7 * i64::from(rolled(ordinal, 1, count) - ordinal))?
            }
            Field::WeekOfMonth => {
                let rules = self.rules();
                let first = date.first_of_month();
                let last = date.last_of_month();
                let week = rules.week_of_month(date);
                let new = rolled(week, rules.week_of_month(first), rules.week_of_month(last));
                let moved = add_days(date, 7 * i64::from(new - week))?.clamp(first, last);
                moved.to_datetime(dt.time())
            }
            Field::WeekOfYear => {
                let rules = self.rules();
                let (week_year, week) = rules.week_of_year(date);
                let last = add_days(rules.first_week_start(week_year + 1)?, -1)?;
                let new = rolled(week, 1, rules.week_of_year(last).1);
                shift_days(dt, 7 * i64::from(new - week))?
            }
            Field::Hour => dt.with().hour(i8::try_from(rolled(i32::from(dt.hour()), 0, 23)).ok()?).build().ok()?,
            Field::Minute => dt
                .with()
                .minute(i8::try_from(rolled(i32::from(dt.minute()), 0, 59)).ok()?)
                .build()
                .ok()?,
            Field::Second => dt
                .with()
                .second(i8::try_from(rolled(i32::from(dt.second()), 0, 59)).ok()?)
                .build()
                .ok()?,
            Field::Nanosecond => dt
                .with()
                .subsec_nanosecond(rolled(dt.subsec_nanosecond(), 0, 999_999_999))
                .build()
                .ok()?,
        };
        self.resolve(target)
    }
}

fn lenient_weekday(number: i32) -> jiff::civil::Weekday {
    let normalized = (number - 1).rem_euclid(7) + 1;
    weekday_from_number(normalized).unwrap_or(jiff::civil::Weekday::Sunday)
}

/// First day of `month` in `year`, with months outside 1..=12 rolling into
/// neighbouring years.
fn first_of_month(year: i32, month: i32) -> Option<Date> {
    let total = month - 1;
    let year = i16::try_from(year.checked_add(total.div_euclid(12))?).ok()?;
    let month = i8::try_from(total.rem_euclid(12) + 1).ok()?;
    Date::new(year, month, 1).ok()
}

/// `dt` moved to `month` of the same year (months outside 1..=12 roll),
/// clamping the day to the month's length.
fn with_month(dt: DateTime, month: i32) -> Option<DateTime> {
    let first = first_of_month(i32::from(dt.year()), month)?;
    let day = dt.day().min(first.days_in_month());
    Some(first.with().day(day).build().ok()?.to_datetime(dt.time()))
}

fn shift_days(dt: DateTime, days: i64) -> Option<DateTime> {
    Some(add_days(dt.date(), days)?.to_datetime(dt.time()))
}

impl CalendarPrimitive for GregorianCalendar {
    fn field_value(&self, field: Field, at: Timestamp) -> i32 {
        let dt = self.civil(at);
        let date = dt.date();
        let year = i32::from(date.year());
        match field {
            Field::Era => i32::from(year > 0),
            Field::Year if year <= 0 => 1 - year,
            Field::Year => year,
            Field::YearForWeekOfYear => self.rules().week_of_year(date).0,
            Field::Quarter => (i32::from(date.month()) - 1) / 3 + 1,
            Field::Month => i32::from(date.month()),
            Field::WeekOfYear => self.rules().week_of_year(date).1,
            Field::WeekOfMonth => self.rules().week_of_month(date),
            Field::WeekdayOrdinal => (i32::from(date.day()) - 1) / 7 + 1,
            Field::Weekday => weekday_number(date.weekday()),
            Field::Day => i32::from(date.day()),
            Field::DayOfYear => i32::from(date.day_of_year()),
            Field::Hour => i32::from(dt.hour()),
            Field::Minute => i32::from(dt.minute()),
            Field::Second => i32::from(dt.second()),
            Field::Nanosecond => dt.subsec_nanosecond(),
        }
    }

    fn interval(&self, field: Field, containing: Timestamp) -> Option<FieldInterval> {
        let date = self.civil(containing).date();
        let rules = self.rules();
        match field {
            Field::Era => self.era_interval(date),
            Field::Year => {
                let first = date.first_of_year();
                self.dates(first, Date::new(first.year().checked_add(1)?, 1, 1).ok()?)
            }
            Field::YearForWeekOfYear => {
                let (week_year, _) = rules.week_of_year(date);
                self.dates(
                    rules.first_week_start(week_year)?,
                    rules.first_week_start(week_year + 1)?,
                )
            }
            Field::Quarter => {
                let quarter_month = (i32::from(date.month()) - 1) / 3 * 3 + 1;
                let first = first_of_month(i32::from(date.year()), quarter_month)?;
                self.dates(first, first_of_month(i32::from(date.year()), quarter_month + 3)?)
            }
            Field::Month => {
                let first = date.first_of_month();
                self.dates(first, add_days(date.last_of_month(), 1)?)
            }
            Field::WeekOfYear => {
                let start = rules.week_start(date)?;
                self.dates(start, add_days(start, 7)?)
            }
            Field::WeekOfMonth => {
                let start = rules.week_start(date)?.max(date.first_of_month());
                let end = add_days(rules.week_start(date)?, 7)?.min(add_days(date.last_of_month(), 1)?);
                self.dates(start, end)
            }
            Field::WeekdayOrdinal => {
                let chunk = (i64::from(date.day()) - 1) / 7;
                let start = add_days(date.first_of_month(), 7 * chunk)?;
                let end = add_days(start, 7)?.min(add_days(date.last_of_month(), 1)?);
                self.dates(start, end)
            }
            Field::Weekday | Field::Day | Field::DayOfYear => self.dates(date, date.tomorrow().ok()?),
            Field::Hour | Field::Minute | Field::Second => self.time_interval(field, containing),
            Field::Nanosecond => Some(FieldInterval {
                start: containing,
                duration: SignedDuration::from_nanos(1),
            }),
        }
    }

    fn instant(&self, components: &DateComponents) -> Option<Timestamp> {
        let date = self.components_date(components)?;
        let time = Span::new()
            .try_hours(components.get(Field::Hour).unwrap_or(0))
            .ok()?
            .try_minutes(components.get(Field::Minute).unwrap_or(0))
            .ok()?
            .try_seconds(components.get(Field::Second).unwrap_or(0))
            .ok()?
            .try_nanoseconds(components.get(Field::Nanosecond).unwrap_or(0))
            .ok()?;
        let dt = date.to_datetime(Time::midnight()).checked_add(time).ok()?;
        self.resolve(dt)
    }

    fn adding(&self, amount: i32, field: Field, to: Timestamp, wrapping: bool) -> Option<Timestamp> {
        if wrapping {
            return self.roll(amount, field, to);
        }
        let span = match field {
            Field::Era if amount == 0 => return Some(to),
            Field::Era => return None,
            Field::Year | Field::YearForWeekOfYear => Span::new().try_years(amount),
            Field::Quarter => Span::new().try_months(i64::from(amount) * 3),
            Field::Month => Span::new().try_months(amount),
            Field::WeekOfYear | Field::WeekOfMonth | Field::WeekdayOrdinal => Span::new().try_weeks(amount),
            Field::Weekday | Field::Day | Field::DayOfYear => Span::new().try_days(amount),
            Field::Hour => Span::new().try_hours(amount),
            Field::Minute => Span::new().try_minutes(amount),
            Field::Second => Span::new().try_seconds(amount),
            Field::Nanosecond => Span::new().try_nanoseconds(amount),
        }
        .ok()?;
        let zoned = to.to_zoned(self.time_zone().clone());
        zoned.checked_add(span).ok().map(|z| z.timestamp())
    }

    fn maximum_range(&self, field: Field) -> RangeInclusive<i32> {
        match field {
            Field::Era => 0..=1,
            Field::Year => 1..=9999,
            Field::YearForWeekOfYear => -9999..=9999,
            Field::Quarter => 1..=4,
            Field::Month => 1..=12,
            Field::WeekOfYear => 1..=53,
            Field::WeekOfMonth if self.identity.minimum_days_in_first_week() == 1 => 1..=6,
            Field::WeekOfMonth => 0..=6,
            Field::WeekdayOrdinal => 1..=5,
            Field::Weekday => 1..=7,
            Field::Day => 1..=31,
            Field::DayOfYear => 1..=366,
            Field::Hour => 0..=23,
            Field::Minute | Field::Second => 0..=59,
            Field::Nanosecond => 0..=999_999_999,
        }
    }

    fn scoped(&self, components: &DateComponents) -> Self {
        let mut identity = self.identity.clone();
        if let Some(system) = components.calendar() {
            if system != identity.system() {
                identity = identity.with_system(system);
            }
        }
        if let Some(time_zone) = components.time_zone() {
            identity = identity.with_time_zone(time_zone.clone());
        }
        Self { identity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    fn utc() -> GregorianCalendar {
        GregorianCalendar::default()
    }

    fn eastern() -> GregorianCalendar {
        let tz = TimeZone::posix("EST5EDT,M3.2.0,M11.1.0").unwrap();
        GregorianCalendar::new(CalendarIdentity::gregorian(tz))
    }

    fn sao_paulo_2018() -> GregorianCalendar {
        let tz = TimeZone::posix("<-03>3<-02>,M11.1.0/0,M2.3.0/0").unwrap();
        GregorianCalendar::new(CalendarIdentity::gregorian(tz))
    }

    #[test]
    fn field_values_utc() {
        let cal = utc();
        let at = ts("2023-01-01T13:45:30.5Z");
        assert_eq!(cal.field_value(Field::Era, at), 1);
        assert_eq!(cal.field_value(Field::Year, at), 2023);
        assert_eq!(cal.field_value(Field::Quarter, at), 1);
        assert_eq!(cal.field_value(Field::Month, at), 1);
        assert_eq!(cal.field_value(Field::Weekday, at), 1);
        assert_eq!(cal.field_value(Field::WeekOfYear, at), 1);
        assert_eq!(cal.field_value(Field::Day, at), 1);
        assert_eq!(cal.field_value(Field::Hour, at), 13);
        assert_eq!(cal.field_value(Field::Minute, at), 45);
        assert_eq!(cal.field_value(Field::Second, at), 30);
        assert_eq!(cal.field_value(Field::Nanosecond, at), 500_000_000);
    }

    #[test]
    fn era_and_year_of_era_before_common_era() {
        let cal = utc();
        let at = ts("-000001-06-01T00:00:00Z");
        assert_eq!(cal.field_value(Field::Era, at), 0);
        assert_eq!(cal.field_value(Field::Year, at), 2);
    }

    #[test]
    fn month_interval() {
        let cal = utc();
        let iv = cal.interval(Field::Month, ts("2023-02-14T08:00:00Z")).unwrap();
        assert_eq!(iv.start, ts("2023-02-01T00:00:00Z"));
        assert_eq!(iv.end(), Some(ts("2023-03-01T00:00:00Z")));
    }

    #[test]
    fn weekday_ordinal_interval_is_clipped_to_month() {
        let cal = utc();
        let iv = cal.interval(Field::WeekdayOrdinal, ts("2023-02-27T00:00:00Z")).unwrap();
        assert_eq!(iv.start, ts("2023-02-22T00:00:00Z"));
        assert_eq!(iv.end(), Some(ts("2023-03-01T00:00:00Z")));
    }

    #[test]
    fn week_of_month_interval_is_clipped_to_month() {
        let cal = utc();
        // 2023-03-01 is a Wednesday; its Sunday-first week starts in February.
        let iv = cal.interval(Field::WeekOfMonth, ts("2023-03-02T00:00:00Z")).unwrap();
        assert_eq!(iv.start, ts("2023-03-01T00:00:00Z"));
        assert_eq!(iv.end(), Some(ts("2023-03-05T00:00:00Z")));
    }

    #[test]
    fn spring_forward_day_is_short() {
        let cal = eastern();
        let iv = cal.interval(Field::Day, ts("2023-03-12T12:00:00Z")).unwrap();
        assert_eq!(iv.start, ts("2023-03-12T05:00:00Z"));
        assert_eq!(iv.duration, SignedDuration::from_hours(23));
    }

    #[test]
    fn hour_values_skip_the_gap() {
        let cal = eastern();
        assert_eq!(cal.field_value(Field::Hour, ts("2023-03-12T06:59:59Z")), 1);
        assert_eq!(cal.field_value(Field::Hour, ts("2023-03-12T07:00:00Z")), 3);
        let iv = cal.interval(Field::Hour, ts("2023-03-12T07:00:00Z")).unwrap();
        assert_eq!(iv.start, ts("2023-03-12T07:00:00Z"));
        assert_eq!(iv.duration, SignedDuration::from_hours(1));
    }

    #[test]
    fn repeated_hour_has_two_intervals() {
        let cal = eastern();
        let first = cal.interval(Field::Hour, ts("2023-11-05T05:30:00Z")).unwrap();
        let second = cal.interval(Field::Hour, ts("2023-11-05T06:30:00Z")).unwrap();
        assert_eq!(first.start, ts("2023-11-05T05:00:00Z"));
        assert_eq!(first.end(), Some(second.start));
        assert_eq!(second.start, ts("2023-11-05T06:00:00Z"));
        assert_eq!(cal.field_value(Field::Hour, first.start), 1);
        assert_eq!(cal.field_value(Field::Hour, second.start), 1);
    }

    #[test]
    fn midnight_gap_day_starts_at_one() {
        let cal = sao_paulo_2018();
        let iv = cal.interval(Field::Day, ts("2018-11-04T12:00:00Z")).unwrap();
        assert_eq!(iv.start, ts("2018-11-04T03:00:00Z"));
        assert_eq!(cal.field_value(Field::Hour, iv.start), 1);
        assert_eq!(iv.duration, SignedDuration::from_hours(23));
    }

    #[test]
    fn instant_is_lenient() {
        let cal = utc();
        let comps = DateComponents::new().with_year(2023).with_month(6).with_day(31);
        assert_eq!(cal.instant(&comps), Some(ts("2023-07-01T00:00:00Z")));

        let comps = DateComponents::new().with_year(2023).with_month(13);
        assert_eq!(cal.instant(&comps), Some(ts("2024-01-01T00:00:00Z")));

        let comps = DateComponents::new().with_year(2023).with_hour(25);
        assert_eq!(cal.instant(&comps), Some(ts("2023-01-02T01:00:00Z")));
    }

    #[test]
    fn instant_defaults_to_1970() {
        let cal = utc();
        let comps = DateComponents::new().with_hour(6);
        assert_eq!(cal.instant(&comps), Some(ts("1970-01-01T06:00:00Z")));
    }

    #[test]
    fn instant_in_gap_resolves_past_it() {
        let cal = eastern();
        let comps = DateComponents::new()
            .with_year(2023)
            .with_month(3)
            .with_day(12)
            .with_hour(2)
            .with_minute(30);
        assert_eq!(cal.instant(&comps), Some(ts("2023-03-12T07:30:00Z")));
    }

    #[test]
    fn instant_from_week_date() {
        let cal = GregorianCalendar::new(CalendarIdentity::iso8601(TimeZone::UTC));
        let comps = DateComponents::new()
            .with_year_for_week_of_year(2021)
            .with_week_of_year(1)
            .with_weekday(2);
        assert_eq!(cal.instant(&comps), Some(ts("2021-01-04T00:00:00Z")));
    }

    #[test]
    fn instant_from_weekday_ordinal() {
        let cal = utc();
        // Second Monday of May 2023.
        let comps = DateComponents::new()
            .with_year(2023)
            .with_month(5)
            .with_weekday_ordinal(2)
            .with_weekday(2);
        assert_eq!(cal.instant(&comps), Some(ts("2023-05-08T00:00:00Z")));
    }

    #[test]
    fn adding_months_clamps_day() {
        let cal = utc();
        let got = cal.adding(1, Field::Month, ts("2023-01-31T10:00:00Z"), false);
        assert_eq!(got, Some(ts("2023-02-28T10:00:00Z")));
    }

    #[test]
    fn adding_days_keeps_wall_clock_across_dst() {
        let cal = eastern();
        let got = cal.adding(1, Field::Day, ts("2023-03-11T17:00:00Z"), false);
        assert_eq!(got, Some(ts("2023-03-12T16:00:00Z")));
        let got = cal.adding(24, Field::Hour, ts("2023-03-11T17:00:00Z"), false);
        assert_eq!(got, Some(ts("2023-03-12T17:00:00Z")));
    }

    #[test]
    fn wrapping_stays_in_parent() {
        let cal = utc();
        assert_eq!(
            cal.adding(1, Field::Day, ts("2023-01-31T06:00:00Z"), true),
            Some(ts("2023-01-01T06:00:00Z"))
        );
        assert_eq!(
            cal.adding(2, Field::Hour, ts("2023-01-31T23:00:00Z"), true),
            Some(ts("2023-01-31T01:00:00Z"))
        );
        assert_eq!(
            cal.adding(-1, Field::Month, ts("2023-01-31T00:00:00Z"), true),
            Some(ts("2023-12-31T00:00:00Z"))
        );
    }

    #[test]
    fn wrapping_handles_extreme_amounts() {
        let cal = utc();
        let at = ts("2023-01-01T05:00:00Z");
        // i32::MAX is 7 modulo 24 and modulo 12.
        assert_eq!(cal.adding(i32::MAX, Field::Hour, at, true), Some(ts("2023-01-01T12:00:00Z")));
        assert_eq!(cal.adding(i32::MIN, Field::Hour, at, true), Some(ts("2023-01-01T21:00:00Z")));
        assert_eq!(cal.adding(i32::MAX, Field::Month, at, true), Some(ts("2023-08-01T05:00:00Z")));
        assert_eq!(cal.adding(i32::MAX, Field::Day, at, true), cal.adding(i32::MAX % 31, Field::Day, at, true));
        assert_eq!(cal.adding(i32::MAX, Field::Year, at, true), None);
        assert_eq!(cal.adding(i32::MAX, Field::Hour, at, false), None);
    }

    #[test]
    fn maximum_ranges() {
        let cal = utc();
        assert_eq!(cal.maximum_range(Field::Month), 1..=12);
        assert_eq!(cal.maximum_range(Field::Weekday), 1..=7);
        assert_eq!(cal.maximum_range(Field::WeekOfMonth), 1..=6);
        let iso = GregorianCalendar::new(CalendarIdentity::iso8601(TimeZone::UTC));
        assert_eq!(iso.maximum_range(Field::WeekOfMonth), 0..=6);
    }

    #[test]
    fn scoped_applies_overrides() {
        let cal = utc();
        let tz = TimeZone::fixed(jiff::tz::offset(2));
        let comps = DateComponents::new()
            .with_calendar(crate::identity::CalendarSystem::Iso8601)
            .with_time_zone(tz.clone());
        let scoped = cal.scoped(&comps);
        assert_eq!(scoped.time_zone(), &tz);
        assert_eq!(scoped.identity().first_weekday(), jiff::civil::Weekday::Monday);
        // The receiver is untouched.
        assert_eq!(cal.time_zone(), &TimeZone::UTC);
    }
}
