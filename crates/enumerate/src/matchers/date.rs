//! Matchers for day and coarser fields.

use jiff::Timestamp;
use kairos_calendar::{CalendarPrimitive, DateComponents, Field};
use tracing::trace;

use super::{STEP_LIMIT, SearchContext, match_by_stepping, one_before, verify_advancing};
use crate::error::EnumerationError;
use crate::options::SearchDirection;

type MatchResult = Result<Option<Timestamp>, EnumerationError>;

pub(super) fn match_era<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    candidate: Timestamp,
    direction: SearchDirection,
) -> MatchResult {
    match_by_stepping(ctx, Field::Era, candidate, direction)
}

/// Jumps straight to January 1 of the target year.
pub(super) fn match_year<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    candidate: Timestamp,
    direction: SearchDirection,
) -> MatchResult {
    let Some(target) = ctx.components.get(Field::Year) else {
        return Ok(None);
    };
    let era = ctx
        .components
        .get(Field::Era)
        .unwrap_or_else(|| ctx.value(Field::Era, candidate));
    if ctx.value(Field::Year, candidate) == target && ctx.value(Field::Era, candidate) == era {
        return Ok(None);
    }
    let spec = DateComponents::new().with_era(era).with_year(target);
    let start = ctx
        .calendar
        .instant(&spec)
        .ok_or(EnumerationError::DateOutOfRange {
            field: Field::Year,
            instant: candidate,
        })?;
    if !direction.is_beyond(start, candidate) {
        return Err(EnumerationError::DateOutOfRange {
            field: Field::Year,
            instant: start,
        });
    }
    Ok(Some(start))
}

pub(super) fn match_year_for_week_of_year<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    candidate: Timestamp,
    direction: SearchDirection,
) -> MatchResult {
    match_by_stepping(ctx, Field::YearForWeekOfYear, candidate, direction)
}

pub(super) fn match_quarter<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    candidate: Timestamp,
    direction: SearchDirection,
) -> MatchResult {
    match_by_stepping(ctx, Field::Quarter, candidate, direction)
}

pub(super) fn match_week_of_year<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    candidate: Timestamp,
    direction: SearchDirection,
) -> MatchResult {
    match_by_stepping(ctx, Field::WeekOfYear, candidate, direction)
}

pub(super) fn match_day_of_year<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    candidate: Timestamp,
    direction: SearchDirection,
) -> MatchResult {
    match_by_stepping(ctx, Field::DayOfYear, candidate, direction)
}

pub(super) fn match_month<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    candidate: Timestamp,
    direction: SearchDirection,
) -> MatchResult {
    match_by_stepping(ctx, Field::Month, candidate, direction)
}

pub(super) fn match_week_of_month<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    candidate: Timestamp,
    direction: SearchDirection,
) -> MatchResult {
    match_by_stepping(ctx, Field::WeekOfMonth, candidate, direction)
}

pub(super) fn match_weekday_ordinal<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    candidate: Timestamp,
    direction: SearchDirection,
) -> MatchResult {
    match_by_stepping(ctx, Field::WeekdayOrdinal, candidate, direction)
}

/// The next or previous day carrying the target weekday. Stepping back
/// subtracts the previous day's real length, which is not always 24 hours.
pub(super) fn match_weekday<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    candidate: Timestamp,
    direction: SearchDirection,
) -> MatchResult {
    let Some(target) = ctx.components.get(Field::Weekday) else {
        return Ok(None);
    };
    if ctx.value(Field::Weekday, candidate) == target {
        return Ok(None);
    }
    let mut current = candidate;
    for _ in 0..STEP_LIMIT {
        let out_of_range = EnumerationError::DateOutOfRange {
            field: Field::Weekday,
            instant: current,
        };
        let day = ctx.interval(Field::Day, current)?;
        let next = match direction {
            SearchDirection::Forward => day.end().ok_or(out_of_range)?,
            SearchDirection::Backward => {
                let before = one_before(day.start).ok_or(out_of_range.clone())?;
                let previous_day = ctx.interval(Field::Day, before)?;
                day.start
                    .checked_sub(previous_day.duration)
                    .map_err(|_| out_of_range)?
            }
        };
        verify_advancing(direction, next, current)?;
        if ctx.value(Field::Weekday, next) == target {
            return Ok(Some(next));
        }
        current = next;
    }
    Err(EnumerationError::DateOutOfRange {
        field: Field::Weekday,
        instant: current,
    })
}

/// Steps day by day towards the target day of the month.
///
/// When a month target is also set and the walk leaves that month, the
/// target day does not exist there: a strict search fails and any other
/// policy returns the first day past the month.
pub(super) fn match_day<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    candidate: Timestamp,
    direction: SearchDirection,
) -> MatchResult {
    let Some(target) = ctx.components.get(Field::Day) else {
        return Ok(None);
    };
    if ctx.value(Field::Day, candidate) == target {
        return Ok(None);
    }
    let month = ctx.components.get(Field::Month);
    let mut current = candidate;
    for _ in 0..STEP_LIMIT {
        let next = ctx.adjacent_start(Field::Day, current, direction)?;
        verify_advancing(direction, next, current)?;
        if ctx.value(Field::Day, next) == target {
            return Ok(Some(next));
        }
        if month.is_some_and(|m| ctx.value(Field::Month, next) != m) {
            if ctx.is_strict() {
                return Err(EnumerationError::DateOutOfRange {
                    field: Field::Day,
                    instant: next,
                });
            }
            trace!(target, %next, "day target overshot its month");
            return Ok(Some(next));
        }
        current = next;
    }
    Err(EnumerationError::DateOutOfRange {
        field: Field::Day,
        instant: current,
    })
}
