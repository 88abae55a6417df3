//! Matchers for hour and finer fields.

use jiff::{SignedDuration, Timestamp};
use kairos_calendar::{CalendarPrimitive, DateComponents, Field};
use tracing::trace;

use super::{SearchContext, one_before, step_to_value};
use crate::error::EnumerationError;
use crate::options::{RepeatedTimePolicy, SearchDirection};

type MatchResult = Result<Option<Timestamp>, EnumerationError>;

pub(super) fn match_hour<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    candidate: Timestamp,
    direction: SearchDirection,
) -> MatchResult {
    let Some(target) = ctx.components.get(Field::Hour) else {
        return Ok(None);
    };
    let value = ctx.value(Field::Hour, candidate);

    // A day that starts after a midnight gap has no hour 0; its first
    // instant stands in for it.
    if target == 0 && value != 0 && !ctx.is_strict() {
        let day = ctx.interval(Field::Day, candidate)?;
        if day.start == candidate {
            trace!(%candidate, "day has no hour 0");
            return Ok(None);
        }
    }

    let mut result = if value == target {
        candidate
    } else {
        step_to_value(ctx, Field::Hour, target, candidate, direction)?
    };
    if ctx.value(Field::Hour, result) == target {
        result = pick_occurrence(ctx, target, result, direction)?;
    }

    if ctx.direction == SearchDirection::Backward && result > ctx.origin {
        let rewound = ctx
            .calendar
            .adding(-1, Field::Day, result, false)
            .ok_or(EnumerationError::DateOutOfRange {
                field: Field::Hour,
                instant: result,
            })?;
        trace!(%result, %rewound, "backward hour search passed its origin");
        result = if ctx.value(Field::Hour, rewound) == target {
            rewound
        } else {
            step_to_value(ctx, Field::Hour, target, rewound, SearchDirection::Backward)?
        };
    }

    Ok((result != candidate).then_some(result))
}

/// Applies the repeated time policy to an hour that reads `target` at
/// `at`, moving to the occurrence the policy asks for.
fn pick_occurrence<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    target: i32,
    at: Timestamp,
    direction: SearchDirection,
) -> Result<Timestamp, EnumerationError> {
    let current = ctx.interval(Field::Hour, at)?;
    let next = match current.end() {
        Some(end) => Some(ctx.interval(Field::Hour, end)?),
        None => None,
    };
    let previous = match one_before(current.start) {
        Some(before) => Some(ctx.interval(Field::Hour, before)?),
        None => None,
    };
    let repeats_later = next.is_some_and(|iv| ctx.value(Field::Hour, iv.start) == target);
    let repeats_earlier = previous.is_some_and(|iv| ctx.value(Field::Hour, iv.start) == target);

    let picked = match (ctx.repeated_time_policy, direction) {
        (RepeatedTimePolicy::Last, SearchDirection::Forward) if repeats_later => {
            next.map_or(at, |iv| iv.start)
        }
        (RepeatedTimePolicy::First, SearchDirection::Backward) if repeats_earlier => {
            previous.map_or(at, |iv| iv.start)
        }
        // The occurrence under the candidate is the wrong one and the right
        // one lies behind the search direction: move on to the next day's.
        (RepeatedTimePolicy::First, SearchDirection::Forward) if repeats_earlier => {
            step_to_value(ctx, Field::Hour, target, at, direction)?
        }
        (RepeatedTimePolicy::Last, SearchDirection::Backward) if repeats_later => {
            step_to_value(ctx, Field::Hour, target, at, direction)?
        }
        _ => at,
    };
    if picked != at {
        trace!(%at, %picked, policy = ?ctx.repeated_time_policy, "repeated hour");
    }
    Ok(picked)
}

/// Shared body of the minute and second matchers. A backward search that
/// ends up past its origin is rewound by one unit of `higher`.
fn match_clock_field<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    field: Field,
    higher: Field,
    candidate: Timestamp,
    direction: SearchDirection,
) -> MatchResult {
    let Some(target) = ctx.components.get(field) else {
        return Ok(None);
    };
    if ctx.value(field, candidate) == target {
        return Ok(None);
    }
    let mut result = step_to_value(ctx, field, target, candidate, direction)?;
    if ctx.direction == SearchDirection::Backward && result > ctx.origin {
        let rewound = ctx
            .calendar
            .adding(-1, higher, result, false)
            .ok_or(EnumerationError::DateOutOfRange {
                field,
                instant: result,
            })?;
        result = if ctx.value(field, rewound) == target {
            rewound
        } else {
            step_to_value(ctx, field, target, rewound, SearchDirection::Backward)?
        };
    }
    Ok(Some(result))
}

pub(super) fn match_minute<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    candidate: Timestamp,
    direction: SearchDirection,
) -> MatchResult {
    match_clock_field(ctx, Field::Minute, Field::Hour, candidate, direction)
}

pub(super) fn match_second<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    candidate: Timestamp,
    direction: SearchDirection,
) -> MatchResult {
    match_clock_field(ctx, Field::Second, Field::Minute, candidate, direction)
}

/// Rebuilds the candidate with only the nanosecond replaced. Intervals are
/// not stepped below one second.
pub(super) fn match_nanosecond<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    candidate: Timestamp,
    direction: SearchDirection,
) -> MatchResult {
    let Some(target) = ctx.components.get(Field::Nanosecond) else {
        return Ok(None);
    };
    if ctx.value(Field::Nanosecond, candidate) == target {
        return Ok(None);
    }
    let out_of_range = EnumerationError::DateOutOfRange {
        field: Field::Nanosecond,
        instant: candidate,
    };
    let second = ctx.interval(Field::Second, candidate)?;

    let mut spec = DateComponents::new();
    for field in [
        Field::Era,
        Field::Year,
        Field::Month,
        Field::Day,
        Field::Hour,
        Field::Minute,
        Field::Second,
    ] {
        spec.set(field, Some(ctx.value(field, candidate)));
    }
    spec.set(Field::Nanosecond, Some(target));

    let same_second = |at: Timestamp| {
        ctx.calendar
            .interval(Field::Second, at)
            .is_some_and(|iv| iv.start == second.start)
    };
    let mut rebuilt = match ctx.calendar.instant(&spec) {
        Some(at) if same_second(at) => at,
        // Repeated local time: stay inside the candidate's own second.
        _ => second
            .start
            .checked_add(SignedDuration::from_nanos(i64::from(target)))
            .map_err(|_| out_of_range.clone())?,
    };
    if !direction.is_beyond(rebuilt, candidate) {
        rebuilt = ctx
            .calendar
            .adding(direction.sign(), Field::Second, rebuilt, false)
            .ok_or(out_of_range)?;
    }
    if ctx.value(Field::Nanosecond, rebuilt) != target {
        return Err(EnumerationError::UnexpectedResult {
            field: Field::Nanosecond,
            instant: rebuilt,
        });
    }
    Ok(Some(rebuilt))
}
