//! Diagnostic hook for the enumeration driver.

use jiff::Timestamp;
use kairos_calendar::Field;
use tracing::{debug, trace, warn};

use crate::error::EnumerationError;

/// A diagnostic event emitted while enumerating dates.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// One search step did not produce a match.
    Miss {
        /// The candidate that failed validation, if the step produced one.
        candidate: Option<Timestamp>,
        /// Where the next step starts.
        next_from: Timestamp,
        /// Consecutive misses so far.
        misses: usize,
    },
    /// A candidate landing on a non-existent time was resolved by the
    /// matching policy.
    Resolved {
        /// The field whose requested value does not exist.
        field: Field,
        /// The candidate before resolution.
        candidate: Timestamp,
        /// The reported instant.
        resolved: Timestamp,
    },
    /// A match was emitted.
    Match {
        /// The matching instant.
        date: Timestamp,
        /// False when the match was produced by the matching policy.
        exact: bool,
    },
    /// The sequence stopped on an error.
    Aborted {
        /// The error that ended the sequence.
        error: EnumerationError,
    },
    /// The sequence gave up after too many consecutive misses. A budget
    /// exhaustion cannot be told apart from a specification that never
    /// matches.
    BudgetExhausted {
        /// The number of consecutive misses.
        iterations: usize,
        /// Where the last step started.
        search_from: Timestamp,
    },
}

/// Receives [`SearchEvent`]s from a date sequence.
pub trait SearchObserver {
    /// Called for each event.
    fn on_event(&self, event: &SearchEvent);
}

impl<T: SearchObserver + ?Sized> SearchObserver for &T {
    fn on_event(&self, event: &SearchEvent) {
        (**self).on_event(event);
    }
}

/// An observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_event(&self, _event: &SearchEvent) {}
}

/// An observer that forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn on_event(&self, event: &SearchEvent) {
        match event {
            SearchEvent::Miss {
                candidate,
                next_from,
                misses,
            } => trace!(?candidate, %next_from, misses, "search miss"),
            SearchEvent::Resolved {
                field,
                candidate,
                resolved,
            } => debug!(%field, %candidate, %resolved, "non-existent time resolved"),
            SearchEvent::Match { date, exact } => debug!(%date, exact, "match"),
            SearchEvent::Aborted { error } => warn!(%error, "search aborted"),
            SearchEvent::BudgetExhausted {
                iterations,
                search_from,
            } => debug!(iterations, %search_from, "iteration budget exhausted"),
        }
    }
}
