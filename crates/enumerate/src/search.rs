//! Public entry points: single matches, next dates and enumeration.

use jiff::Timestamp;
use kairos_calendar::{CalendarPrimitive, DateComponents};
use tracing::debug;

use crate::driver::DateSequence;
use crate::error::EnumerationError;
use crate::observer::{NoopObserver, SearchObserver};
use crate::options::SearchOptions;
use crate::orchestrator::match_all;
use crate::validate::{is_exact, is_rejected_occurrence, validate_components};

/// Searches dates for one calendar, reporting progress to an observer.
///
/// The free functions [`matching_date`], [`next_date`], [`enumerate_dates`]
/// and [`dates`] are shorthands for an enumerator with a [`NoopObserver`].
///
/// # Example
///
/// ```
/// use kairos_calendar::{DateComponents, GregorianCalendar};
/// use kairos_enumerate::{DateEnumerator, SearchOptions, TracingObserver};
///
/// let enumerator = DateEnumerator::new(GregorianCalendar::default()).with_observer(TracingObserver);
/// let start: jiff::Timestamp = "2023-01-01T00:00:00Z".parse().unwrap();
/// let mondays = DateComponents::new().with_weekday(2);
///
/// let next = enumerator.next_date(start, &mondays, &SearchOptions::new());
/// assert_eq!(next, Some("2023-01-02T00:00:00Z".parse().unwrap()));
/// ```
#[derive(Debug, Clone)]
pub struct DateEnumerator<C, O = NoopObserver> {
    calendar: C,
    observer: O,
}

impl<C: CalendarPrimitive> DateEnumerator<C> {
    /// Creates an enumerator over `calendar` with no observer.
    pub fn new(calendar: C) -> Self {
        Self {
            calendar,
            observer: NoopObserver,
        }
    }
}

impl<C: CalendarPrimitive, O: SearchObserver> DateEnumerator<C, O> {
    /// Replaces the observer.
    pub fn with_observer<P: SearchObserver>(self, observer: P) -> DateEnumerator<C, P> {
        DateEnumerator {
            calendar: self.calendar,
            observer,
        }
    }

    /// Returns the calendar.
    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    /// Returns the observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Runs a single search step from `start` and returns its result if
    /// it matches every component exactly.
    ///
    /// Unlike [`DateEnumerator::next_date`], `start` itself may be
    /// returned, and no matching policy is applied: a candidate standing
    /// in for a non-existent time yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the components or options are invalid, or if
    /// the search step fails (for example a strict search for June 31).
    #[tracing::instrument(skip_all, fields(start = %start, direction = ?options.direction()))]
    pub fn matching_date(
        &self,
        start: Timestamp,
        components: &DateComponents,
        options: &SearchOptions,
    ) -> Result<Option<Timestamp>, EnumerationError> {
        options.validate()?;
        let calendar = self.calendar.scoped(components);
        validate_components(&calendar, components)?;
        let candidate = match_all(&calendar, components, start, options)?;
        let exact = is_exact(&calendar, components, candidate)
            && !is_rejected_occurrence(&calendar, components, options.repeated_time_policy(), candidate);
        debug!(%candidate, exact, "single search step");
        Ok(exact.then_some(candidate))
    }

    /// The first date strictly beyond `start` in the search direction
    /// matching `components`, or `None` if there is none within the
    /// iteration budget.
    #[tracing::instrument(skip_all, fields(start = %start, direction = ?options.direction()))]
    pub fn next_date(
        &self,
        start: Timestamp,
        components: &DateComponents,
        options: &SearchOptions,
    ) -> Option<Timestamp> {
        self.dates(start, components, options).next().map(|m| m.date)
    }

    /// Calls `on_match(date, exact, stop)` for each date matching
    /// `components`, in order, until `stop` is set or the sequence ends.
    ///
    /// When the sequence ends without being stopped, `on_match` is called
    /// once more with `None`.
    #[tracing::instrument(skip_all, fields(start = %start, direction = ?options.direction()))]
    pub fn enumerate_dates<F>(
        &self,
        start: Timestamp,
        components: &DateComponents,
        options: &SearchOptions,
        mut on_match: F,
    ) where
        F: FnMut(Option<Timestamp>, bool, &mut bool),
    {
        let mut stop = false;
        let mut count = 0usize;
        for found in self.dates(start, components, options) {
            count += 1;
            on_match(Some(found.date), found.exact, &mut stop);
            if stop {
                debug!(count, "enumeration stopped by caller");
                return;
            }
        }
        debug!(count, "enumeration exhausted");
        on_match(None, false, &mut stop);
    }

    /// A lazy sequence of the dates matching `components`.
    pub fn dates(
        &self,
        start: Timestamp,
        components: &DateComponents,
        options: &SearchOptions,
    ) -> DateSequence<C, &O> {
        DateSequence::new(&self.calendar, start, components, options, &self.observer)
    }
}

/// Runs a single search step from `start` and returns its result if it
/// matches every component exactly. See [`DateEnumerator::matching_date`].
///
/// # Errors
///
/// Returns an error if the components or options are invalid, or if the
/// search step fails.
pub fn matching_date<C: CalendarPrimitive>(
    calendar: &C,
    start: Timestamp,
    components: &DateComponents,
    options: &SearchOptions,
) -> Result<Option<Timestamp>, EnumerationError> {
    DateEnumerator::new(calendar.clone()).matching_date(start, components, options)
}

/// The first date strictly beyond `start` matching `components`. See
/// [`DateEnumerator::next_date`].
pub fn next_date<C: CalendarPrimitive>(
    calendar: &C,
    start: Timestamp,
    components: &DateComponents,
    options: &SearchOptions,
) -> Option<Timestamp> {
    DateEnumerator::new(calendar.clone()).next_date(start, components, options)
}

/// Calls `on_match` for each date matching `components`. See
/// [`DateEnumerator::enumerate_dates`].
pub fn enumerate_dates<C, F>(
    calendar: &C,
    start: Timestamp,
    components: &DateComponents,
    options: &SearchOptions,
    on_match: F,
) where
    C: CalendarPrimitive,
    F: FnMut(Option<Timestamp>, bool, &mut bool),
{
    DateEnumerator::new(calendar.clone()).enumerate_dates(start, components, options, on_match);
}

/// A lazy sequence of the dates matching `components`.
pub fn dates<C: CalendarPrimitive>(
    calendar: &C,
    start: Timestamp,
    components: &DateComponents,
    options: &SearchOptions,
) -> DateSequence<C> {
    DateSequence::new(calendar, start, components, options, NoopObserver)
}
