//! Component adjustment before a search step.
//!
//! Components whose coarsest field is the month or the day say nothing
//! about which year or month to search in. The pre-pass pins that down from
//! the search instant so the matchers neither overshoot nor stall on the
//! current period.

use jiff::Timestamp;
use kairos_calendar::{CalendarPrimitive, DateComponents, Field, FieldInterval};

use crate::options::SearchDirection;

/// The fields that form a contiguous prefix starting at the month.
const CHAIN: [Field; 6] = [
    Field::Month,
    Field::Day,
    Field::Hour,
    Field::Minute,
    Field::Second,
    Field::Nanosecond,
];

/// Returns `components` with a year (month-led) or month (day-led)
/// injected. Other components are returned unchanged.
pub fn adjust<C: CalendarPrimitive>(
    calendar: &C,
    components: &DateComponents,
    at: Timestamp,
    direction: SearchDirection,
) -> DateComponents {
    let mut adjusted = components.clone();
    // Years of the era count backwards before the common era.
    if calendar.field_value(Field::Era, at) != 1 {
        return adjusted;
    }
    match components.highest_set_unit() {
        Some(Field::Month) => {
            let year = calendar.field_value(Field::Year, at);
            let probe = DateComponents::new().with_year(year);
            let shift = probe_shift(calendar, components, probe, Field::Month, at, direction);
            adjusted.set(Field::Year, Some(year + shift));
        }
        Some(Field::Day) => {
            let month = calendar.field_value(Field::Month, at);
            let probe = DateComponents::new()
                .with_year(calendar.field_value(Field::Year, at))
                .with_month(month);
            let shift = probe_shift(calendar, components, probe, Field::Day, at, direction);
            adjusted.set(Field::Month, Some((month - 1 + shift).rem_euclid(12) + 1));
        }
        _ => {}
    }
    adjusted
}

/// Builds the instant described by `probe` plus the contiguous run of set
/// fields starting at `from`, and decides whether the period to search is
/// the current one (0) or its neighbour in `direction` (1 or -1).
fn probe_shift<C: CalendarPrimitive>(
    calendar: &C,
    components: &DateComponents,
    mut probe: DateComponents,
    from: Field,
    at: Timestamp,
    direction: SearchDirection,
) -> i32 {
    let mut last = from;
    for field in CHAIN.iter().copied().skip_while(|&f| f != from) {
        let Some(value) = components.get(field) else {
            break;
        };
        probe.set(field, Some(value));
        last = field;
    }
    let Some(iv) = calendar
        .instant(&probe)
        .and_then(|t| calendar.interval(last, t))
    else {
        return 0;
    };
    if is_behind(&iv, at, direction) {
        direction.sign()
    } else {
        0
    }
}

/// True if the whole interval lies behind `at` in `direction`.
fn is_behind(iv: &FieldInterval, at: Timestamp, direction: SearchDirection) -> bool {
    match direction {
        SearchDirection::Forward => iv.end().is_some_and(|end| end <= at),
        SearchDirection::Backward => iv.start > at,
    }
}
