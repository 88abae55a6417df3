//! Per-field component matchers.
//!
//! A matcher looks at one field of the target components. It returns
//! `Ok(None)` when the field is unset or the candidate already carries the
//! target value, and otherwise moves the candidate to the start of the
//! nearest interval in the search direction whose value is the target.

mod date;
mod time;

use jiff::{SignedDuration, Timestamp};
use kairos_calendar::{CalendarPrimitive, DateComponents, Field, FieldInterval};

use crate::error::EnumerationError;
use crate::options::{MatchingPolicy, RepeatedTimePolicy, SearchDirection, SearchOptions};

/// Upper bound on interval steps inside one matcher call.
pub(crate) const STEP_LIMIT: usize = 100_000;

/// Read-only state shared by the matchers of one `match_all` call.
#[derive(Debug)]
pub struct SearchContext<'a, C> {
    /// The calendar primitive, already scoped to the components.
    pub calendar: &'a C,
    /// The target components.
    pub components: &'a DateComponents,
    /// The requested search direction.
    pub direction: SearchDirection,
    /// How to treat non-existent times.
    pub matching_policy: MatchingPolicy,
    /// Which occurrence of a repeated time to pick.
    pub repeated_time_policy: RepeatedTimePolicy,
    /// The instant the search started from.
    pub origin: Timestamp,
}

impl<'a, C: CalendarPrimitive> SearchContext<'a, C> {
    /// Creates a context for one search starting at `origin`.
    pub fn new(
        calendar: &'a C,
        components: &'a DateComponents,
        options: &SearchOptions,
        origin: Timestamp,
    ) -> Self {
        Self {
            calendar,
            components,
            direction: options.direction(),
            matching_policy: options.matching_policy(),
            repeated_time_policy: options.repeated_time_policy(),
            origin,
        }
    }

    pub(crate) fn value(&self, field: Field, at: Timestamp) -> i32 {
        self.calendar.field_value(field, at)
    }

    pub(crate) fn interval(&self, field: Field, at: Timestamp) -> Result<FieldInterval, EnumerationError> {
        self.calendar
            .interval(field, at)
            .ok_or(EnumerationError::DateOutOfRange { field, instant: at })
    }

    pub(crate) fn is_strict(&self) -> bool {
        self.matching_policy == MatchingPolicy::Strict
    }

    /// Start of the interval of `field` adjacent to the one containing `at`.
    pub(crate) fn adjacent_start(
        &self,
        field: Field,
        at: Timestamp,
        direction: SearchDirection,
    ) -> Result<Timestamp, EnumerationError> {
        let out_of_range = EnumerationError::DateOutOfRange { field, instant: at };
        let iv = self.interval(field, at)?;
        match direction {
            SearchDirection::Forward => iv.end().ok_or(out_of_range),
            SearchDirection::Backward => {
                let before = one_before(iv.start).ok_or(out_of_range)?;
                Ok(self.interval(field, before)?.start)
            }
        }
    }
}

/// A matcher for one field: `(context, candidate, effective direction)`.
pub type Matcher<C> =
    fn(&SearchContext<'_, C>, Timestamp, SearchDirection) -> Result<Option<Timestamp>, EnumerationError>;

/// The matchers in search precedence order.
///
/// The order matches [`Field::PRECEDENCE`] and is load-bearing: each
/// matcher assumes every coarser field has already been committed.
pub fn matchers<C: CalendarPrimitive>() -> [(Field, Matcher<C>); 15] {
    [
        (Field::Era, date::match_era::<C>),
        (Field::Year, date::match_year::<C>),
        (Field::YearForWeekOfYear, date::match_year_for_week_of_year::<C>),
        (Field::Quarter, date::match_quarter::<C>),
        (Field::WeekOfYear, date::match_week_of_year::<C>),
        (Field::DayOfYear, date::match_day_of_year::<C>),
        (Field::Month, date::match_month::<C>),
        (Field::WeekOfMonth, date::match_week_of_month::<C>),
        (Field::WeekdayOrdinal, date::match_weekday_ordinal::<C>),
        (Field::Weekday, date::match_weekday::<C>),
        (Field::Day, date::match_day::<C>),
        (Field::Hour, time::match_hour::<C>),
        (Field::Minute, time::match_minute::<C>),
        (Field::Second, time::match_second::<C>),
        (Field::Nanosecond, time::match_nanosecond::<C>),
    ]
}

pub(crate) fn one_before(at: Timestamp) -> Option<Timestamp> {
    at.checked_sub(SignedDuration::from_nanos(1)).ok()
}

/// Fails with `NotAdvancing` unless `next` lies strictly beyond
/// `previous` in `direction`.
pub(crate) fn verify_advancing(
    direction: SearchDirection,
    next: Timestamp,
    previous: Timestamp,
) -> Result<(), EnumerationError> {
    if direction.is_beyond(next, previous) {
        Ok(())
    } else {
        Err(EnumerationError::NotAdvancing { next, previous })
    }
}

/// Returns true if a step from `before` to `after` jumped over `target`,
/// counting cyclically within `range`.
pub(crate) fn skips_over(before: i32, after: i32, target: i32, range: std::ops::RangeInclusive<i32>) -> bool {
    let span = range.end() - range.start() + 1;
    if span <= 0 {
        return false;
    }
    let step = (after - before).rem_euclid(span);
    let distance = (target - before).rem_euclid(span);
    distance > 0 && distance < step
}

/// Steps interval by interval until `field` reads `target`.
///
/// Moving forward through a time field in a non-strict search, a step that
/// jumps over `target` (a value swallowed by a DST gap) also ends the loop;
/// the caller receives the first instant past the gap.
pub(crate) fn step_to_value<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    field: Field,
    target: i32,
    candidate: Timestamp,
    direction: SearchDirection,
) -> Result<Timestamp, EnumerationError> {
    let stop_on_skip = field.is_time() && direction == SearchDirection::Forward && !ctx.is_strict();
    let range = ctx.calendar.maximum_range(field);
    let mut current = candidate;
    let mut previous_value = ctx.value(field, current);
    for _ in 0..STEP_LIMIT {
        let next = ctx.adjacent_start(field, current, direction)?;
        verify_advancing(direction, next, current)?;
        let value = ctx.value(field, next);
        if value == target {
            return Ok(next);
        }
        if stop_on_skip && skips_over(previous_value, value, target, range.clone()) {
            tracing::trace!(%field, target, from = previous_value, to = value, "target skipped");
            return Ok(next);
        }
        previous_value = value;
        current = next;
    }
    Err(EnumerationError::DateOutOfRange {
        field,
        instant: current,
    })
}

/// The generic matcher body shared by most fields.
pub(crate) fn match_by_stepping<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    field: Field,
    candidate: Timestamp,
    direction: SearchDirection,
) -> Result<Option<Timestamp>, EnumerationError> {
    let Some(target) = ctx.components.get(field) else {
        return Ok(None);
    };
    if ctx.value(field, candidate) == target {
        return Ok(None);
    }
    step_to_value(ctx, field, target, candidate, direction).map(Some)
}
