//! Runs the component matchers in precedence order.

use jiff::Timestamp;
use kairos_calendar::{CalendarPrimitive, DateComponents, Field};
use tracing::trace;

use crate::adjust::adjust;
use crate::error::EnumerationError;
use crate::matchers::{SearchContext, matchers, one_before};
use crate::options::{SearchDirection, SearchOptions};

/// Threads `candidate` through every matcher. Returns the final candidate
/// and whether any matcher moved it.
///
/// A matcher that sees the untouched candidate searches in the requested
/// direction. Once a coarser matcher has moved the candidate to the start
/// of a period, finer matchers search forward inside it.
fn run_matchers<C: CalendarPrimitive>(
    ctx: &SearchContext<'_, C>,
    candidate: Timestamp,
) -> Result<(Timestamp, bool), EnumerationError> {
    matchers::<C>()
        .iter()
        .filter(|(field, _)| ctx.components.is_set(*field))
        .try_fold((candidate, false), |(current, moved), (field, matcher)| {
            let direction = if moved {
                SearchDirection::Forward
            } else {
                ctx.direction
            };
            match matcher(ctx, current, direction)? {
                Some(next) => {
                    trace!(%field, from = %current, to = %next, "matcher moved candidate");
                    Ok((next, true))
                }
                None => Ok((current, moved)),
            }
        })
}

/// Finds the first candidate at or beyond `start` (in the search
/// direction) produced by running every matcher once.
///
/// `components` are adjusted against the instant each run starts from, so
/// day-led and month-led components search the right month or year.
///
/// If no matcher moves the candidate and `start` is not at the start of the
/// finest requested unit, the search is nudged: backward searches return
/// that unit's start, forward searches retry from the next unit with the
/// components adjusted again.
///
/// The result is not validated against `components`; a matcher may stop
/// early on a value that does not exist.
///
/// # Errors
///
/// Returns [`EnumerationError::EmptyComponents`] when nothing is set and
/// propagates matcher errors.
#[tracing::instrument(level = "trace", skip_all, fields(start = %start, direction = ?options.direction()))]
pub fn match_all<C: CalendarPrimitive>(
    calendar: &C,
    components: &DateComponents,
    start: Timestamp,
    options: &SearchOptions,
) -> Result<Timestamp, EnumerationError> {
    let lowest = components
        .lowest_set_unit()
        .ok_or(EnumerationError::EmptyComponents)?;
    let adjusted = adjust(calendar, components, start, options.direction());
    let ctx = SearchContext::new(calendar, &adjusted, options, start);

    let (candidate, moved) = run_matchers(&ctx, start)?;
    if moved {
        return Ok(candidate);
    }
    let iv = ctx.interval(lowest, candidate)?;
    if iv.start == candidate {
        return Ok(candidate);
    }
    match options.direction() {
        SearchDirection::Backward => Ok(iv.start),
        SearchDirection::Forward => {
            let next = iv.end().ok_or(EnumerationError::DateOutOfRange {
                field: lowest,
                instant: candidate,
            })?;
            let adjusted = adjust(calendar, components, next, SearchDirection::Forward);
            let ctx = SearchContext::new(calendar, &adjusted, options, start);
            trace!(%next, "nudged past a partial unit");
            run_matchers(&ctx, next).map(|(candidate, _)| candidate)
        }
    }
}

/// The instant and direction a search inside the next (or previous)
/// period of `unit` starts from.
///
/// Forward searches start at the end of the period containing `start`;
/// backward searches start one nanosecond before it. A backward search by
/// day instead starts at the previous day's first instant and searches
/// forward, so times in a day's first hour are not skipped.
pub(crate) fn next_boundary<C: CalendarPrimitive>(
    calendar: &C,
    start: Timestamp,
    unit: Field,
    direction: SearchDirection,
) -> Result<(Timestamp, SearchDirection), EnumerationError> {
    let out_of_range = EnumerationError::DateOutOfRange {
        field: unit,
        instant: start,
    };
    let iv = calendar.interval(unit, start).ok_or(out_of_range.clone())?;
    match direction {
        SearchDirection::Forward => Ok((iv.end().ok_or(out_of_range)?, SearchDirection::Forward)),
        SearchDirection::Backward => {
            let before = one_before(iv.start).ok_or(out_of_range.clone())?;
            if unit == Field::Day {
                let previous_day = calendar.interval(Field::Day, before).ok_or(out_of_range)?;
                Ok((previous_day.start, SearchDirection::Forward))
            } else {
                Ok((before, SearchDirection::Backward))
            }
        }
    }
}

/// Runs [`match_all`] inside the period of `unit` following (or
/// preceding) the one that contains `start`.
///
/// # Errors
///
/// Returns [`EnumerationError::DateOutOfRange`] if the period cannot be
/// computed and propagates matcher errors.
pub fn match_within_next<C: CalendarPrimitive>(
    calendar: &C,
    components: &DateComponents,
    start: Timestamp,
    unit: Field,
    options: &SearchOptions,
) -> Result<Timestamp, EnumerationError> {
    let (from, direction) = next_boundary(calendar, start, unit, options.direction())?;
    let options = options.clone().with_direction(direction);
    match_all(calendar, components, from, &options)
}

#[cfg(test)]
mod tests {
    use jiff::tz::TimeZone;
    use kairos_calendar::{CalendarIdentity, GregorianCalendar};

    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    fn utc() -> GregorianCalendar {
        GregorianCalendar::new(CalendarIdentity::gregorian(TimeZone::UTC))
    }

    fn backward() -> SearchOptions {
        SearchOptions::new().with_direction(SearchDirection::Backward)
    }

    #[test]
    fn empty_components_fail() {
        let err = match_all(&utc(), &DateComponents::new(), ts("2023-01-01T00:00:00Z"), &SearchOptions::new())
            .unwrap_err();
        assert_eq!(err, EnumerationError::EmptyComponents);
    }

    #[test]
    fn normalized_start_is_returned() {
        let comps = DateComponents::new().with_hour(6);
        let start = ts("2023-01-01T06:00:00Z");
        assert_eq!(match_all(&utc(), &comps, start, &SearchOptions::new()).unwrap(), start);
    }

    #[test]
    fn forward_nudges_past_partial_unit() {
        let comps = DateComponents::new().with_hour(6);
        let got = match_all(&utc(), &comps, ts("2023-01-01T06:30:00Z"), &SearchOptions::new()).unwrap();
        assert_eq!(got, ts("2023-01-02T06:00:00Z"));
    }

    #[test]
    fn backward_returns_unit_start() {
        let comps = DateComponents::new().with_hour(6);
        let got = match_all(&utc(), &comps, ts("2023-01-01T06:30:00Z"), &backward()).unwrap();
        assert_eq!(got, ts("2023-01-01T06:00:00Z"));
    }

    #[test]
    fn finer_matchers_search_forward_after_a_move() {
        // Backward to the previous February, then forward to its 10th.
        let comps = DateComponents::new().with_month(2).with_day(10);
        let got = match_all(&utc(), &comps, ts("2023-06-15T00:00:00Z"), &backward()).unwrap();
        assert_eq!(got, ts("2023-02-10T00:00:00Z"));
    }

    #[test]
    fn forward_nudge_readjusts_the_month() {
        // Mid-day on the 15th: the January 15th has started, so February's.
        let comps = DateComponents::new().with_day(15);
        let got = match_all(&utc(), &comps, ts("2023-01-15T12:00:00Z"), &SearchOptions::new()).unwrap();
        assert_eq!(got, ts("2023-02-15T00:00:00Z"));
    }

    #[test]
    fn forward_nudge_into_a_short_month_stays_in_it() {
        // February has no 31st; the day matcher stops at its end.
        let comps = DateComponents::new().with_day(31);
        let got = match_all(&utc(), &comps, ts("2023-01-31T12:00:00Z"), &SearchOptions::new()).unwrap();
        assert_eq!(got, ts("2023-03-01T00:00:00Z"));
    }

    #[test]
    fn within_next_day_backward_searches_previous_day() {
        let comps = DateComponents::new().with_hour(0).with_minute(30);
        let got = match_within_next(&utc(), &comps, ts("2023-01-05T12:00:00Z"), Field::Day, &backward())
            .unwrap();
        assert_eq!(got, ts("2023-01-04T00:30:00Z"));
    }

    #[test]
    fn within_next_month_forward() {
        let comps = DateComponents::new().with_day(3);
        let got = match_within_next(
            &utc(),
            &comps,
            ts("2023-01-05T12:00:00Z"),
            Field::Month,
            &SearchOptions::new(),
        )
        .unwrap();
        assert_eq!(got, ts("2023-02-03T00:00:00Z"));
    }
}
