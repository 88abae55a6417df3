//! Error types for the kairos-enumerate crate.

use jiff::Timestamp;
use kairos_calendar::Field;

/// Error type for all fallible operations in the kairos-enumerate crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnumerationError {
    /// Returned when the calendar cannot produce a valid interval or
    /// instant for a field, or when a strict search overshoots its target.
    #[error("date out of range for {field} at {instant}")]
    DateOutOfRange {
        /// The field being matched.
        field: Field,
        /// The instant at which the search gave up.
        instant: Timestamp,
    },

    /// Returned when a search step failed to move the candidate in the
    /// search direction.
    #[error("search did not advance: {next} does not move past {previous}")]
    NotAdvancing {
        /// The candidate produced by the step.
        next: Timestamp,
        /// The candidate before the step.
        previous: Timestamp,
    },

    /// Returned when a post-condition on a matcher result does not hold.
    #[error("unexpected result for {field} at {instant}")]
    UnexpectedResult {
        /// The field whose result was checked.
        field: Field,
        /// The offending instant.
        instant: Timestamp,
    },

    /// Returned when a component value lies outside the calendar's range.
    #[error("invalid {field} component: {value} (must be {min}..={max})")]
    InvalidComponent {
        /// The field carrying the value.
        field: Field,
        /// The invalid value.
        value: i32,
        /// Smallest allowed value.
        min: i32,
        /// Largest allowed value.
        max: i32,
    },

    /// Returned when no field has a target.
    #[error("no date components to match")]
    EmptyComponents,

    /// Returned when search options fail validation.
    #[error("invalid search options: {reason}")]
    InvalidOptions {
        /// Why the options were rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn error_date_out_of_range() {
        let err = EnumerationError::DateOutOfRange {
            field: Field::Day,
            instant: ts("2023-07-01T00:00:00Z"),
        };
        assert_eq!(
            err.to_string(),
            "date out of range for day at 2023-07-01T00:00:00Z"
        );
    }

    #[test]
    fn error_not_advancing() {
        let err = EnumerationError::NotAdvancing {
            next: ts("2023-01-01T00:00:00Z"),
            previous: ts("2023-01-01T00:00:00Z"),
        };
        assert_eq!(
            err.to_string(),
            "search did not advance: 2023-01-01T00:00:00Z does not move past 2023-01-01T00:00:00Z"
        );
    }

    #[test]
    fn error_unexpected_result() {
        let err = EnumerationError::UnexpectedResult {
            field: Field::Nanosecond,
            instant: ts("2023-01-01T00:00:00Z"),
        };
        assert_eq!(
            err.to_string(),
            "unexpected result for nanosecond at 2023-01-01T00:00:00Z"
        );
    }

    #[test]
    fn error_invalid_component() {
        let err = EnumerationError::InvalidComponent {
            field: Field::Month,
            value: 13,
            min: 1,
            max: 12,
        };
        assert_eq!(err.to_string(), "invalid month component: 13 (must be 1..=12)");
    }

    #[test]
    fn error_empty_components() {
        assert_eq!(
            EnumerationError::EmptyComponents.to_string(),
            "no date components to match"
        );
    }

    #[test]
    fn error_invalid_options() {
        let err = EnumerationError::InvalidOptions {
            reason: "max_iterations must be >= 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid search options: max_iterations must be >= 1"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<EnumerationError>();
    }
}
