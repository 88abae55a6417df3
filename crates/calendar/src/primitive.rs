//! The calendar arithmetic primitive consumed by the search engine.

use std::ops::RangeInclusive;

use jiff::{SignedDuration, Timestamp};

use crate::components::DateComponents;
use crate::field::Field;

/// The half-open span `[start, start + duration)` covered by one value of a
/// calendar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInterval {
    /// First instant of the interval.
    pub start: Timestamp,
    /// Length of the interval. Always positive.
    pub duration: SignedDuration,
}

impl FieldInterval {
    /// Builds the interval `[start, end)`.
    ///
    /// Returns `None` if `end` is not after `start`.
    pub fn between(start: Timestamp, end: Timestamp) -> Option<Self> {
        let duration = end.duration_since(start);
        if duration <= SignedDuration::ZERO {
            return None;
        }
        Some(Self { start, duration })
    }

    /// The first instant after the interval, or `None` if it cannot be
    /// represented.
    pub fn end(&self) -> Option<Timestamp> {
        self.start.checked_add(self.duration).ok()
    }

    /// Returns true if `at` falls inside the interval.
    pub fn contains(&self, at: Timestamp) -> bool {
        at >= self.start && self.end().is_none_or(|end| at < end)
    }
}

/// Field extraction and arithmetic over absolute instants for one calendar
/// identity.
///
/// Implementations must be immutable: every method takes `&self`, and any
/// scratch state lives on the stack of the call. The search engine clones a
/// primitive at each public entry point (see [`CalendarPrimitive::scoped`])
/// and never shares mutable state between searches.
pub trait CalendarPrimitive: Clone {
    /// Extracts the value of `field` at `at`.
    fn field_value(&self, field: Field, at: Timestamp) -> i32;

    /// The interval covered by the value of `field` containing `at`.
    ///
    /// Returns `None` when the interval cannot be represented (for example
    /// at the edges of the supported range).
    fn interval(&self, field: Field, containing: Timestamp) -> Option<FieldInterval>;

    /// Builds an instant from a full or partial specification.
    ///
    /// Construction is lenient: a value that overflows its unit rolls into
    /// the next one. Ambiguous local times resolve to the earlier instant
    /// and times inside a gap resolve past the gap.
    fn instant(&self, components: &DateComponents) -> Option<Timestamp>;

    /// Adds `amount` units of `field` to `to`.
    ///
    /// With `wrapping` set the field rolls around within its parent unit
    /// and no larger field changes.
    fn adding(&self, amount: i32, field: Field, to: Timestamp, wrapping: bool) -> Option<Timestamp>;

    /// The widest range of values `field` can take in this calendar.
    fn maximum_range(&self, field: Field) -> RangeInclusive<i32>;

    /// Returns a copy with the calendar and time zone overrides carried by
    /// `components` applied.
    fn scoped(&self, components: &DateComponents) -> Self;
}
