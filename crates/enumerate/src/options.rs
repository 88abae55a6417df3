//! Search direction, disambiguation policies and the iteration budget.

use crate::error::EnumerationError;

/// Direction in which to search from the starting instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SearchDirection {
    /// Search towards later instants.
    #[default]
    Forward,
    /// Search towards earlier instants.
    Backward,
}

impl SearchDirection {
    /// Returns true if `a` lies strictly beyond `b` in this direction.
    pub fn is_beyond(self, a: jiff::Timestamp, b: jiff::Timestamp) -> bool {
        match self {
            SearchDirection::Forward => a > b,
            SearchDirection::Backward => a < b,
        }
    }

    /// `1` for forward, `-1` for backward.
    pub fn sign(self) -> i32 {
        match self {
            SearchDirection::Forward => 1,
            SearchDirection::Backward => -1,
        }
    }
}

/// How to resolve a requested time that does not exist, and how much of
/// the unspecified lower-precision time to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MatchingPolicy {
    /// Use the start of the first existing unit after the gap
    /// (no 2:30 resolves to 3:00).
    #[default]
    NextTime,
    /// Move past the gap and keep the lower components
    /// (no 2:30 resolves to 3:30).
    NextTimePreservingSmallerComponents,
    /// Move before the gap and keep the lower components
    /// (no 2:30 resolves to 1:30).
    PreviousTimePreservingSmallerComponents,
    /// Only report instants that match every component exactly.
    Strict,
}

/// Which occurrence of a repeated local time to pick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RepeatedTimePolicy {
    /// The earlier occurrence.
    #[default]
    First,
    /// The later occurrence.
    Last,
}

/// Options for a date search.
///
/// # Example
///
/// ```
/// use kairos_enumerate::{MatchingPolicy, SearchDirection, SearchOptions};
///
/// let options = SearchOptions::new()
///     .with_direction(SearchDirection::Backward)
///     .with_matching_policy(MatchingPolicy::Strict)
///     .with_max_iterations(500);
///
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    direction: SearchDirection,
    matching_policy: MatchingPolicy,
    repeated_time_policy: RepeatedTimePolicy,
    /// Consecutive misses tolerated before a sequence gives up.
    max_iterations: usize,
}

impl SearchOptions {
    /// Default iteration budget.
    pub const DEFAULT_MAX_ITERATIONS: usize = 100;

    /// Creates options with the defaults: forward, `NextTime`, `First`,
    /// and an iteration budget of 100.
    pub fn new() -> Self {
        Self {
            direction: SearchDirection::Forward,
            matching_policy: MatchingPolicy::NextTime,
            repeated_time_policy: RepeatedTimePolicy::First,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Sets the search direction.
    pub fn with_direction(mut self, direction: SearchDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the matching policy.
    pub fn with_matching_policy(mut self, policy: MatchingPolicy) -> Self {
        self.matching_policy = policy;
        self
    }

    /// Sets the repeated time policy.
    pub fn with_repeated_time_policy(mut self, policy: RepeatedTimePolicy) -> Self {
        self.repeated_time_policy = policy;
        self
    }

    /// Sets the number of consecutive misses tolerated before giving up.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Returns the search direction.
    pub fn direction(&self) -> SearchDirection {
        self.direction
    }

    /// Returns the matching policy.
    pub fn matching_policy(&self) -> MatchingPolicy {
        self.matching_policy
    }

    /// Returns the repeated time policy.
    pub fn repeated_time_policy(&self) -> RepeatedTimePolicy {
        self.repeated_time_policy
    }

    /// Returns the iteration budget.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Validates these options.
    ///
    /// Returns an error if the iteration budget is zero.
    pub fn validate(&self) -> Result<(), EnumerationError> {
        if self.max_iterations < 1 {
            return Err(EnumerationError::InvalidOptions {
                reason: format!("max_iterations must be >= 1, got {}", self.max_iterations),
            });
        }
        Ok(())
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = SearchOptions::default();
        assert_eq!(opts.direction(), SearchDirection::Forward);
        assert_eq!(opts.matching_policy(), MatchingPolicy::NextTime);
        assert_eq!(opts.repeated_time_policy(), RepeatedTimePolicy::First);
        assert_eq!(opts.max_iterations(), 100);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_builder_chaining() {
        let opts = SearchOptions::new()
            .with_direction(SearchDirection::Backward)
            .with_matching_policy(MatchingPolicy::PreviousTimePreservingSmallerComponents)
            .with_repeated_time_policy(RepeatedTimePolicy::Last)
            .with_max_iterations(7);
        assert_eq!(opts.direction(), SearchDirection::Backward);
        assert_eq!(
            opts.matching_policy(),
            MatchingPolicy::PreviousTimePreservingSmallerComponents
        );
        assert_eq!(opts.repeated_time_policy(), RepeatedTimePolicy::Last);
        assert_eq!(opts.max_iterations(), 7);
    }

    #[test]
    fn test_zero_budget_rejected() {
        let err = SearchOptions::new().with_max_iterations(0).validate().unwrap_err();
        assert_eq!(
            err,
            EnumerationError::InvalidOptions {
                reason: "max_iterations must be >= 1, got 0".into()
            }
        );
    }

    #[test]
    fn test_direction_helpers() {
        let a: jiff::Timestamp = "2023-01-02T00:00:00Z".parse().unwrap();
        let b: jiff::Timestamp = "2023-01-01T00:00:00Z".parse().unwrap();
        assert!(SearchDirection::Forward.is_beyond(a, b));
        assert!(!SearchDirection::Forward.is_beyond(b, b));
        assert!(SearchDirection::Backward.is_beyond(b, a));
        assert_eq!(SearchDirection::Backward.sign(), -1);
    }
}
