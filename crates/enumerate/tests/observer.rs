use std::cell::RefCell;

use jiff::Timestamp;
use kairos_calendar::{DateComponents, Field, GregorianCalendar};
use kairos_enumerate::{
    DateEnumerator, EnumerationError, MatchingPolicy, SearchEvent, SearchObserver, SearchOptions,
};

fn ts(s: &str) -> Timestamp {
    s.parse().unwrap()
}

#[derive(Default)]
struct Recorder {
    events: RefCell<Vec<SearchEvent>>,
}

impl SearchObserver for Recorder {
    fn on_event(&self, event: &SearchEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

impl Recorder {
    fn matches(&self) -> Vec<(Timestamp, bool)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                SearchEvent::Match { date, exact } => Some((*date, *exact)),
                _ => None,
            })
            .collect()
    }
}

#[test]
fn match_events_follow_the_sequence() {
    let enumerator = DateEnumerator::new(GregorianCalendar::default()).with_observer(Recorder::default());
    let comps = DateComponents::new().with_day(1);
    let got: Vec<Timestamp> = enumerator
        .dates(ts("2023-01-15T00:00:00Z"), &comps, &SearchOptions::new())
        .take(2)
        .map(|m| m.date)
        .collect();
    assert_eq!(got, vec![ts("2023-02-01T00:00:00Z"), ts("2023-03-01T00:00:00Z")]);
    assert_eq!(
        enumerator.observer().matches(),
        vec![(ts("2023-02-01T00:00:00Z"), true), (ts("2023-03-01T00:00:00Z"), true)]
    );
}

#[test]
fn resolution_is_reported_before_the_match() {
    let enumerator = DateEnumerator::new(GregorianCalendar::default()).with_observer(Recorder::default());
    let comps = DateComponents::new().with_month(4).with_day(31);
    let next = enumerator.next_date(ts("2023-01-01T00:00:00Z"), &comps, &SearchOptions::new());
    assert_eq!(next, Some(ts("2023-05-01T00:00:00Z")));

    let events = enumerator.observer().events.borrow();
    let resolved = events
        .iter()
        .position(|e| matches!(e, SearchEvent::Resolved { field: Field::Day, .. }))
        .unwrap();
    let matched = events
        .iter()
        .position(|e| matches!(e, SearchEvent::Match { exact: false, .. }))
        .unwrap();
    assert!(resolved < matched);
}

#[test]
fn budget_exhaustion_is_reported() {
    let enumerator = DateEnumerator::new(GregorianCalendar::default()).with_observer(Recorder::default());
    let comps = DateComponents::new().with_month(2).with_day(30);
    let options = SearchOptions::new()
        .with_matching_policy(MatchingPolicy::Strict)
        .with_max_iterations(5);
    assert_eq!(enumerator.next_date(ts("2023-01-01T00:00:00Z"), &comps, &options), None);

    let events = enumerator.observer().events.borrow();
    let misses = events
        .iter()
        .filter(|e| matches!(e, SearchEvent::Miss { .. }))
        .count();
    assert_eq!(misses, 5);
    assert!(matches!(
        events.last(),
        Some(SearchEvent::BudgetExhausted { iterations: 5, .. })
    ));
}

#[test]
fn invalid_options_are_reported() {
    let enumerator = DateEnumerator::new(GregorianCalendar::default()).with_observer(Recorder::default());
    let options = SearchOptions::new().with_max_iterations(0);
    let comps = DateComponents::new().with_day(1);
    let mut calls = Vec::new();
    enumerator.enumerate_dates(ts("2023-01-01T00:00:00Z"), &comps, &options, |date, exact, _| {
        calls.push((date, exact));
    });
    assert_eq!(calls, vec![(None, false)]);

    let events = enumerator.observer().events.borrow();
    assert!(matches!(
        events.as_slice(),
        [SearchEvent::Aborted {
            error: EnumerationError::InvalidOptions { .. }
        }]
    ));
}
