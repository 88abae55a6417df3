//! The enumeration driver: a lazy sequence of matching dates.

use jiff::Timestamp;
use kairos_calendar::{CalendarPrimitive, DateComponents, Field};
use tracing::debug;

use crate::error::EnumerationError;
use crate::observer::{NoopObserver, SearchEvent, SearchObserver};
use crate::options::{MatchingPolicy, SearchDirection, SearchOptions};
use crate::orchestrator::{match_all, next_boundary};
use crate::validate::{is_exact, is_rejected_occurrence, skipped_field, validate_components};

/// One date produced by a [`DateSequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateMatch {
    /// The matching instant.
    pub date: Timestamp,
    /// False when the instant stands in for a requested time that does not
    /// exist, as chosen by the matching policy.
    pub exact: bool,
}

#[derive(Debug, Clone)]
enum State {
    Searching,
    Invalid(EnumerationError),
    Done,
}

/// Outcome of one search attempt.
enum Step {
    Found(DateMatch),
    Resolved {
        field: Field,
        candidate: Timestamp,
        found: DateMatch,
    },
    Retry {
        candidate: Option<Timestamp>,
        next_from: Timestamp,
        direction: SearchDirection,
    },
    Finished,
    Abort(EnumerationError),
}

/// A lazy, strictly monotonic sequence of instants matching a set of date
/// components.
///
/// Each item lies strictly beyond the previous one (and beyond the start)
/// in the search direction. The sequence ends when the calendar runs out
/// of representable dates, when a search step fails, or after
/// [`SearchOptions::max_iterations`] consecutive steps without a match.
/// Cloning a sequence yields an independent copy that resumes from the
/// same point.
#[derive(Debug, Clone)]
pub struct DateSequence<C, O = NoopObserver> {
    calendar: C,
    components: DateComponents,
    options: SearchOptions,
    observer: O,
    /// The last emitted match, or the start.
    origin: Timestamp,
    search_from: Timestamp,
    search_direction: SearchDirection,
    state: State,
}

impl<C: CalendarPrimitive, O: SearchObserver> DateSequence<C, O> {
    /// Creates a sequence of dates after (or before) `start`.
    ///
    /// The calendar is scoped to the overrides carried by `components`.
    /// Invalid components or options are reported through the observer on
    /// the first call to `next`, which then returns `None`.
    pub fn new(
        calendar: &C,
        start: Timestamp,
        components: &DateComponents,
        options: &SearchOptions,
        observer: O,
    ) -> Self {
        let calendar = calendar.scoped(components);
        let state = match options
            .validate()
            .and_then(|()| validate_components(&calendar, components))
        {
            Ok(()) => State::Searching,
            Err(error) => State::Invalid(error),
        };
        Self {
            calendar,
            components: components.clone(),
            options: options.clone(),
            observer,
            origin: start,
            search_from: start,
            search_direction: options.direction(),
            state,
        }
    }

    /// The instant the next search step starts from.
    pub fn search_from(&self) -> Timestamp {
        self.search_from
    }

    /// Returns true once the sequence has ended.
    pub fn is_done(&self) -> bool {
        matches!(self.state, State::Done)
    }

    fn attempt(&self) -> Step {
        let direction = self.options.direction();
        let step_options = self.options.clone().with_direction(self.search_direction);
        let candidate = match match_all(&self.calendar, &self.components, self.search_from, &step_options) {
            Ok(candidate) => candidate,
            Err(EnumerationError::DateOutOfRange { field, instant }) => {
                debug!(%field, %instant, "search step ran out of range");
                return self.advance(None, instant);
            }
            Err(error) => return Step::Abort(error),
        };

        if !direction.is_beyond(candidate, self.origin) {
            let Some(lowest) = self.components.lowest_set_unit() else {
                return Step::Finished;
            };
            return match self.calendar.adding(direction.sign(), lowest, candidate, false) {
                Some(next_from) => Step::Retry {
                    candidate: Some(candidate),
                    next_from,
                    direction,
                },
                None => Step::Finished,
            };
        }

        if is_exact(&self.calendar, &self.components, candidate) {
            let policy = self.options.repeated_time_policy();
            if is_rejected_occurrence(&self.calendar, &self.components, policy, candidate) {
                debug!(%candidate, ?policy, "other occurrence of a repeated hour");
                return self.advance(Some(candidate), candidate);
            }
            return Step::Found(DateMatch {
                date: candidate,
                exact: true,
            });
        }
        if self.options.matching_policy() != MatchingPolicy::Strict {
            if let Some(field) = skipped_field(&self.calendar, &self.components, candidate) {
                if let Some(resolved) = self.resolve(field, candidate) {
                    if direction.is_beyond(resolved, self.origin) {
                        return Step::Resolved {
                            field,
                            candidate,
                            found: DateMatch {
                                date: resolved,
                                exact: false,
                            },
                        };
                    }
                }
            }
        }
        self.advance(Some(candidate), candidate)
    }

    /// Picks where to search after a miss. A hint beyond the current
    /// search instant is taken as is; otherwise the search moves to the
    /// next period of the unit above the coarsest component.
    fn advance(&self, candidate: Option<Timestamp>, hint: Timestamp) -> Step {
        let direction = self.options.direction();
        if direction.is_beyond(hint, self.search_from) {
            return Step::Retry {
                candidate,
                next_from: hint,
                direction,
            };
        }
        let Some(unit) = self
            .components
            .highest_set_unit()
            .and_then(Field::next_higher)
        else {
            return Step::Finished;
        };
        match next_boundary(&self.calendar, self.search_from, unit, direction) {
            Ok((next_from, direction)) => Step::Retry {
                candidate,
                next_from,
                direction,
            },
            Err(_) => Step::Finished,
        }
    }

    /// Applies the matching policy to a candidate whose `field` value was
    /// skipped.
    fn resolve(&self, field: Field, candidate: Timestamp) -> Option<Timestamp> {
        match self.options.matching_policy() {
            MatchingPolicy::NextTime => self.calendar.interval(field, candidate).map(|iv| iv.start),
            MatchingPolicy::NextTimePreservingSmallerComponents => Some(candidate),
            MatchingPolicy::PreviousTimePreservingSmallerComponents => {
                self.calendar.adding(-1, field, candidate, false)
            }
            MatchingPolicy::Strict => None,
        }
    }

    fn emit(&mut self, found: DateMatch, resume_from: Timestamp) -> Option<DateMatch> {
        self.origin = found.date;
        self.search_from = resume_from;
        self.search_direction = self.options.direction();
        self.observer.on_event(&SearchEvent::Match {
            date: found.date,
            exact: found.exact,
        });
        Some(found)
    }

    fn finish(&mut self, error: Option<EnumerationError>) -> Option<DateMatch> {
        if let Some(error) = error {
            self.observer.on_event(&SearchEvent::Aborted { error });
        }
        self.state = State::Done;
        None
    }
}

impl<C: CalendarPrimitive, O: SearchObserver> Iterator for DateSequence<C, O> {
    type Item = DateMatch;

    fn next(&mut self) -> Option<DateMatch> {
        match &self.state {
            State::Searching => {}
            State::Done => return None,
            State::Invalid(error) => {
                let error = error.clone();
                return self.finish(Some(error));
            }
        }

        let mut misses = 0;
        loop {
            match self.attempt() {
                Step::Found(found) => return self.emit(found, found.date),
                Step::Resolved {
                    field,
                    candidate,
                    found,
                } => {
                    self.observer.on_event(&SearchEvent::Resolved {
                        field,
                        candidate,
                        resolved: found.date,
                    });
                    // Resume from whichever of the two lies further along so
                    // the same gap is not resolved twice.
                    let direction = self.options.direction();
                    let resume_from = if direction.is_beyond(candidate, found.date) {
                        candidate
                    } else {
                        found.date
                    };
                    return self.emit(found, resume_from);
                }
                Step::Retry {
                    candidate,
                    next_from,
                    direction,
                } => {
                    misses += 1;
                    self.search_from = next_from;
                    self.search_direction = direction;
                    self.observer.on_event(&SearchEvent::Miss {
                        candidate,
                        next_from,
                        misses,
                    });
                    if misses >= self.options.max_iterations() {
                        self.observer.on_event(&SearchEvent::BudgetExhausted {
                            iterations: misses,
                            search_from: next_from,
                        });
                        return self.finish(None);
                    }
                }
                Step::Finished => return self.finish(None),
                Step::Abort(error) => return self.finish(Some(error)),
            }
        }
    }
}
