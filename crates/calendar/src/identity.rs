//! Calendar identity: system, time zone and week rules.

use jiff::civil::Weekday;
use jiff::tz::TimeZone;

use crate::error::CalendarError;

/// Supported calendar systems.
///
/// Both share the proleptic Gregorian leap rules; they differ in their
/// default week rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CalendarSystem {
    /// Gregorian: weeks start on Sunday, week 1 contains January 1.
    #[default]
    Gregorian,
    /// ISO 8601: weeks start on Monday, week 1 has at least four days.
    Iso8601,
}

impl CalendarSystem {
    /// Default first day of the week.
    pub fn default_first_weekday(self) -> Weekday {
        match self {
            CalendarSystem::Gregorian => Weekday::Sunday,
            CalendarSystem::Iso8601 => Weekday::Monday,
        }
    }

    /// Default minimum number of days in the first week of a year or month.
    pub fn default_minimum_days_in_first_week(self) -> u8 {
        match self {
            CalendarSystem::Gregorian => 1,
            CalendarSystem::Iso8601 => 4,
        }
    }
}

/// The full identity of a calendar: system, time zone, first weekday,
/// minimum days in the first week and an optional locale identifier.
///
/// An identity is immutable. Cloning it is cheap because the time zone is
/// reference counted, and every search works on its own clone.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarIdentity {
    system: CalendarSystem,
    time_zone: TimeZone,
    first_weekday: Weekday,
    minimum_days_in_first_week: u8,
    locale: Option<String>,
}

impl CalendarIdentity {
    /// Creates an identity for `system` in `time_zone` with the system's
    /// default week rules.
    pub fn new(system: CalendarSystem, time_zone: TimeZone) -> Self {
        Self {
            system,
            time_zone,
            first_weekday: system.default_first_weekday(),
            minimum_days_in_first_week: system.default_minimum_days_in_first_week(),
            locale: None,
        }
    }

    /// Gregorian calendar in `time_zone`.
    pub fn gregorian(time_zone: TimeZone) -> Self {
        Self::new(CalendarSystem::Gregorian, time_zone)
    }

    /// ISO 8601 calendar in `time_zone`.
    pub fn iso8601(time_zone: TimeZone) -> Self {
        Self::new(CalendarSystem::Iso8601, time_zone)
    }

    /// Sets the first day of the week.
    pub fn with_first_weekday(mut self, weekday: Weekday) -> Self {
        self.first_weekday = weekday;
        self
    }

    /// Sets the minimum number of days in the first week.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMinimumDays`] if `days` is not in
    /// 1..=7.
    pub fn with_minimum_days_in_first_week(mut self, days: u8) -> Result<Self, CalendarError> {
        if !(1..=7).contains(&days) {
            return Err(CalendarError::InvalidMinimumDays { days });
        }
        self.minimum_days_in_first_week = days;
        Ok(self)
    }

    /// Sets the locale identifier (for example `en_US`).
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Replaces the calendar system, resetting the week rules to the new
    /// system's defaults.
    pub fn with_system(self, system: CalendarSystem) -> Self {
        let locale = self.locale;
        Self {
            locale,
            ..Self::new(system, self.time_zone)
        }
    }

    /// Replaces the time zone.
    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// The calendar system.
    pub fn system(&self) -> CalendarSystem {
        self.system
    }

    /// The time zone.
    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    /// The first day of the week.
    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    /// The minimum number of days in the first week.
    pub fn minimum_days_in_first_week(&self) -> u8 {
        self.minimum_days_in_first_week
    }

    /// The locale identifier, if any.
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }
}

/// Converts a weekday number (1 = Sunday ..= 7 = Saturday) to a [`Weekday`].
///
/// # Errors
///
/// Returns [`CalendarError::InvalidWeekday`] if `number` is not in 1..=7.
pub fn weekday_from_number(number: i32) -> Result<Weekday, CalendarError> {
    i8::try_from(number)
        .ok()
        .and_then(|n| Weekday::from_sunday_one_offset(n).ok())
        .ok_or(CalendarError::InvalidWeekday { number })
}

/// Converts a [`Weekday`] to its number (1 = Sunday ..= 7 = Saturday).
pub fn weekday_number(weekday: Weekday) -> i32 {
    i32::from(weekday.to_sunday_one_offset())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gregorian_defaults() {
        let id = CalendarIdentity::gregorian(TimeZone::UTC);
        assert_eq!(id.system(), CalendarSystem::Gregorian);
        assert_eq!(id.first_weekday(), Weekday::Sunday);
        assert_eq!(id.minimum_days_in_first_week(), 1);
        assert_eq!(id.locale(), None);
    }

    #[test]
    fn iso_defaults() {
        let id = CalendarIdentity::iso8601(TimeZone::UTC);
        assert_eq!(id.first_weekday(), Weekday::Monday);
        assert_eq!(id.minimum_days_in_first_week(), 4);
    }

    #[test]
    fn builder_overrides() {
        let id = CalendarIdentity::gregorian(TimeZone::UTC)
            .with_first_weekday(Weekday::Saturday)
            .with_minimum_days_in_first_week(3)
            .unwrap()
            .with_locale("en_GB");
        assert_eq!(id.first_weekday(), Weekday::Saturday);
        assert_eq!(id.minimum_days_in_first_week(), 3);
        assert_eq!(id.locale(), Some("en_GB"));
    }

    #[test]
    fn invalid_minimum_days() {
        let err = CalendarIdentity::gregorian(TimeZone::UTC)
            .with_minimum_days_in_first_week(0)
            .unwrap_err();
        assert_eq!(err, CalendarError::InvalidMinimumDays { days: 0 });
    }

    #[test]
    fn with_system_resets_week_rules_but_keeps_locale() {
        let id = CalendarIdentity::gregorian(TimeZone::UTC)
            .with_locale("de_DE")
            .with_system(CalendarSystem::Iso8601);
        assert_eq!(id.first_weekday(), Weekday::Monday);
        assert_eq!(id.locale(), Some("de_DE"));
    }

    #[test]
    fn weekday_numbers_round_trip() {
        assert_eq!(weekday_from_number(1).unwrap(), Weekday::Sunday);
        assert_eq!(weekday_from_number(2).unwrap(), Weekday::Monday);
        assert_eq!(weekday_from_number(7).unwrap(), Weekday::Saturday);
        assert_eq!(weekday_number(Weekday::Wednesday), 4);
        assert_eq!(
            weekday_from_number(8).unwrap_err(),
            CalendarError::InvalidWeekday { number: 8 }
        );
    }
}
