use jiff::Timestamp;
use jiff::tz::TimeZone;
use kairos_calendar::{
    CalendarIdentity, CalendarPrimitive, CalendarSystem, DateComponents, Field, GregorianCalendar,
};

fn ts(s: &str) -> Timestamp {
    s.parse().unwrap()
}

fn cal() -> GregorianCalendar {
    GregorianCalendar::new(CalendarIdentity::gregorian(TimeZone::UTC))
}

#[test]
fn full_specification() {
    let comps = DateComponents::new()
        .with_year(2023)
        .with_month(7)
        .with_day(14)
        .with_hour(9)
        .with_minute(5)
        .with_second(7)
        .with_nanosecond(11);
    assert_eq!(cal().instant(&comps), Some(ts("2023-07-14T09:05:07.000000011Z")));
}

#[test]
fn day_of_year() {
    let comps = DateComponents::new().with_year(2024).with_day_of_year(60);
    assert_eq!(cal().instant(&comps), Some(ts("2024-02-29T00:00:00Z")));
}

#[test]
fn quarter_starts_month() {
    let comps = DateComponents::new().with_year(2023).with_quarter(4);
    assert_eq!(cal().instant(&comps), Some(ts("2023-10-01T00:00:00Z")));
}

#[test]
fn before_common_era() {
    // 1 BC is proleptic year 0.
    let comps = DateComponents::new().with_era(0).with_year(1).with_month(3);
    assert_eq!(cal().instant(&comps), Some(ts("0000-03-01T00:00:00Z")));
}

#[test]
fn week_of_month_with_weekday() {
    // March 2023: week 2 (Sunday-first) runs March 5..=11; Friday is the 10th.
    let comps = DateComponents::new()
        .with_year(2023)
        .with_month(3)
        .with_week_of_month(2)
        .with_weekday(6);
    assert_eq!(cal().instant(&comps), Some(ts("2023-03-10T00:00:00Z")));
}

#[test]
fn fifth_weekday_rolls_into_next_month() {
    // February 2023 has four Mondays; the fifth is March 6.
    let comps = DateComponents::new()
        .with_year(2023)
        .with_month(2)
        .with_weekday_ordinal(5)
        .with_weekday(2);
    assert_eq!(cal().instant(&comps), Some(ts("2023-03-06T00:00:00Z")));
}

#[test]
fn out_of_range_year_is_none() {
    let comps = DateComponents::new().with_year(20_000);
    assert_eq!(cal().instant(&comps), None);
}

#[test]
fn round_trip_field_values() {
    let cal = cal();
    let at = ts("2031-11-23T22:10:45Z");
    let mut comps = DateComponents::new();
    for field in [
        Field::Year,
        Field::Month,
        Field::Day,
        Field::Hour,
        Field::Minute,
        Field::Second,
    ] {
        comps.set(field, Some(cal.field_value(field, at)));
    }
    assert_eq!(cal.instant(&comps), Some(at));
}

#[test]
fn iso_week_date_construction() {
    let cal = cal().scoped(&DateComponents::new().with_calendar(CalendarSystem::Iso8601));
    let comps = DateComponents::new()
        .with_year_for_week_of_year(2020)
        .with_week_of_year(53)
        .with_weekday(1);
    // Sunday of ISO week 2020-W53.
    assert_eq!(cal.instant(&comps), Some(ts("2021-01-03T00:00:00Z")));
}

#[test]
fn wrapping_weekday_stays_in_week() {
    let cal = cal();
    // Saturday 2023-01-07 + 1 wraps to Sunday 2023-01-01.
    let got = cal.adding(1, Field::Weekday, ts("2023-01-07T08:00:00Z"), true);
    assert_eq!(got, Some(ts("2023-01-01T08:00:00Z")));
}

#[test]
fn wrapping_minute_keeps_hour() {
    let cal = cal();
    let got = cal.adding(-5, Field::Minute, ts("2023-01-07T08:02:00Z"), true);
    assert_eq!(got, Some(ts("2023-01-07T08:57:00Z")));
}

#[test]
fn adding_quarters_and_years() {
    let cal = cal();
    assert_eq!(
        cal.adding(1, Field::Quarter, ts("2023-11-15T00:00:00Z"), false),
        Some(ts("2024-02-15T00:00:00Z"))
    );
    assert_eq!(
        cal.adding(-1, Field::Year, ts("2024-02-29T00:00:00Z"), false),
        Some(ts("2023-02-28T00:00:00Z"))
    );
}
