//! Checks on components and candidates.

use jiff::Timestamp;
use kairos_calendar::{CalendarPrimitive, DateComponents, Field};

use crate::error::EnumerationError;
use crate::matchers::{one_before, skips_over};
use crate::options::RepeatedTimePolicy;

/// Fails if `components` is empty or carries a value outside the
/// calendar's maximum range for its field.
///
/// # Errors
///
/// Returns [`EnumerationError::EmptyComponents`] or
/// [`EnumerationError::InvalidComponent`].
pub fn validate_components<C: CalendarPrimitive>(
    calendar: &C,
    components: &DateComponents,
) -> Result<(), EnumerationError> {
    if components.is_empty() {
        return Err(EnumerationError::EmptyComponents);
    }
    for (field, value) in components.iter_set() {
        let range = calendar.maximum_range(field);
        if !range.contains(&value) {
            return Err(EnumerationError::InvalidComponent {
                field,
                value,
                min: *range.start(),
                max: *range.end(),
            });
        }
    }
    Ok(())
}

/// Returns true if every set component reads its target value at `at`.
pub fn is_exact<C: CalendarPrimitive>(calendar: &C, components: &DateComponents, at: Timestamp) -> bool {
    components
        .iter_set()
        .all(|(field, value)| calendar.field_value(field, at) == value)
}

/// The field whose requested value does not exist around `at`, if the
/// mismatch at `at` is explained by a skipped value.
///
/// Only the finest mismatched field is considered, and only days (past the
/// end of a short month) and hours or minutes (inside a DST gap) can be
/// skipped. The value must have been jumped over when entering the
/// interval of that field containing `at`, and every coarser component
/// must hold either at `at` or just before the jump.
pub(crate) fn skipped_field<C: CalendarPrimitive>(
    calendar: &C,
    components: &DateComponents,
    at: Timestamp,
) -> Option<Field> {
    let (field, target) = components
        .iter_set()
        .filter(|&(field, value)| calendar.field_value(field, at) != value)
        .last()?;
    if !matches!(field, Field::Day | Field::Hour | Field::Minute) {
        return None;
    }
    let iv = calendar.interval(field, at)?;
    let just_before = one_before(iv.start)?;
    let before = calendar.field_value(field, just_before);
    let after = calendar.field_value(field, iv.start);
    if !skips_over(before, after, target, calendar.maximum_range(field)) {
        return None;
    }
    let coarser_hold = components
        .iter_set()
        .take_while(|&(f, _)| f != field)
        .all(|(f, value)| {
            calendar.field_value(f, at) == value || calendar.field_value(f, just_before) == value
        });
    coarser_hold.then_some(field)
}

/// True if `at` lies in the occurrence of a repeated target hour that
/// `policy` does not pick.
pub(crate) fn is_rejected_occurrence<C: CalendarPrimitive>(
    calendar: &C,
    components: &DateComponents,
    policy: RepeatedTimePolicy,
    at: Timestamp,
) -> bool {
    let Some(hour) = components.get(Field::Hour) else {
        return false;
    };
    let Some(iv) = calendar.interval(Field::Hour, at) else {
        return false;
    };
    let neighbour = match policy {
        RepeatedTimePolicy::First => one_before(iv.start),
        RepeatedTimePolicy::Last => iv.end(),
    };
    neighbour.is_some_and(|n| calendar.field_value(Field::Hour, n) == hour)
}
