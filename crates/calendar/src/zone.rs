//! Time zone lookup by IANA name or POSIX TZ string.

use jiff::tz::TimeZone;

use crate::error::CalendarError;

/// Resolves `name` to a time zone.
///
/// `UTC` (any case) maps to [`TimeZone::UTC`]. Other names are looked up in
/// the system time zone database first and then parsed as a POSIX TZ
/// string such as `EST5EDT,M3.2.0,M11.1.0`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidTimeZone`] if neither lookup succeeds.
pub fn resolve_time_zone(name: &str) -> Result<TimeZone, CalendarError> {
    if name.eq_ignore_ascii_case("utc") {
        return Ok(TimeZone::UTC);
    }
    match TimeZone::get(name) {
        Ok(tz) => Ok(tz),
        Err(lookup) => TimeZone::posix(name).map_err(|_| CalendarError::InvalidTimeZone {
            name: name.to_string(),
            reason: lookup.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utc_in_any_case() {
        assert_eq!(resolve_time_zone("utc").unwrap(), TimeZone::UTC);
        assert_eq!(resolve_time_zone("UTC").unwrap(), TimeZone::UTC);
    }

    #[test]
    fn posix_fallback() {
        let tz = resolve_time_zone("EST5EDT,M3.2.0,M11.1.0").unwrap();
        let at: jiff::Timestamp = "2023-07-01T12:00:00Z".parse().unwrap();
        assert_eq!(tz.to_offset(at), jiff::tz::offset(-4));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = resolve_time_zone("not a zone").unwrap_err();
        assert!(matches!(err, CalendarError::InvalidTimeZone { .. }));
    }
}
