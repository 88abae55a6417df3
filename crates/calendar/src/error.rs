//! Error types for the kairos-calendar crate.

/// Error type for building calendar identities and time zones.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a time zone name or POSIX TZ string cannot be resolved.
    #[error("invalid time zone {name:?}: {reason}")]
    InvalidTimeZone {
        /// The name or POSIX string that was provided.
        name: String,
        /// Why the lookup failed.
        reason: String,
    },

    /// Returned when the minimum number of days in the first week is
    /// outside 1..=7.
    #[error("invalid minimum days in first week: {days} (must be 1..=7)")]
    InvalidMinimumDays {
        /// The invalid value that was provided.
        days: u8,
    },

    /// Returned when a weekday number is outside 1..=7.
    #[error("invalid weekday: {number} (must be 1..=7, 1 = Sunday)")]
    InvalidWeekday {
        /// The invalid weekday number that was provided.
        number: i32,
    },
}
