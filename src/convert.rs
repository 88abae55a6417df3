//! Pure conversion functions: TOML config and CLI flags -> library types.

use anyhow::{Context, Result, bail};

use kairos_calendar::{
    CalendarIdentity, CalendarSystem, DateComponents, GregorianCalendar, resolve_time_zone,
    weekday_from_number,
};
use kairos_enumerate::{
    MatchingPolicy, RepeatedTimePolicy, SearchDirection, SearchOptions, validate_components,
};

use crate::cli::{FieldArgs, SearchArgs};
use crate::config::{CalendarToml, KairosConfig, SearchToml};

/// Everything a search subcommand needs, resolved from config and flags.
pub struct SearchPlan {
    pub calendar: GregorianCalendar,
    pub components: DateComponents,
    pub options: SearchOptions,
}

/// Resolves a [`SearchPlan`] from the loaded configuration and CLI flags.
pub fn build_plan(config: &KairosConfig, args: &SearchArgs) -> Result<SearchPlan> {
    let calendar = build_calendar(&config.calendar, args).context("invalid calendar settings")?;
    let components = build_components(&args.fields)?;
    validate_components(&calendar, &components)?;
    Ok(SearchPlan {
        calendar,
        components,
        options: build_search_options(&config.search, args)?,
    })
}

/// Parses a calendar system name into the corresponding enum variant.
pub fn parse_system(s: &str) -> Result<CalendarSystem> {
    match s.to_lowercase().as_str() {
        "gregorian" => Ok(CalendarSystem::Gregorian),
        "iso8601" | "iso" => Ok(CalendarSystem::Iso8601),
        other => bail!("unknown calendar system: {other:?}"),
    }
}

/// Parses a search direction name into the corresponding enum variant.
pub fn parse_direction(s: &str) -> Result<SearchDirection> {
    match s.to_lowercase().as_str() {
        "forward" => Ok(SearchDirection::Forward),
        "backward" => Ok(SearchDirection::Backward),
        other => bail!("unknown search direction: {other:?}"),
    }
}

/// Parses a matching policy name into the corresponding enum variant.
pub fn parse_matching_policy(s: &str) -> Result<MatchingPolicy> {
    match s.to_lowercase().replace('_', "-").as_str() {
        "next-time" => Ok(MatchingPolicy::NextTime),
        "next-time-preserving" => Ok(MatchingPolicy::NextTimePreservingSmallerComponents),
        "previous-time-preserving" => Ok(MatchingPolicy::PreviousTimePreservingSmallerComponents),
        "strict" => Ok(MatchingPolicy::Strict),
        other => bail!("unknown matching policy: {other:?}"),
    }
}

/// Parses a repeated time policy name into the corresponding enum variant.
pub fn parse_repeated_time_policy(s: &str) -> Result<RepeatedTimePolicy> {
    match s.to_lowercase().as_str() {
        "first" => Ok(RepeatedTimePolicy::First),
        "last" => Ok(RepeatedTimePolicy::Last),
        other => bail!("unknown repeated time policy: {other:?}"),
    }
}

/// Builds the calendar from the TOML calendar configuration, with the CLI
/// time zone and system overrides applied.
pub fn build_calendar(calendar: &CalendarToml, args: &SearchArgs) -> Result<GregorianCalendar> {
    let system = parse_system(args.calendar.as_deref().unwrap_or(&calendar.system))?;
    let zone_name = args.time_zone.as_deref().unwrap_or(&calendar.time_zone);
    let time_zone = resolve_time_zone(zone_name)?;

    let mut identity = CalendarIdentity::new(system, time_zone);
    if let Some(number) = calendar.first_weekday {
        identity = identity.with_first_weekday(weekday_from_number(number)?);
    }
    if let Some(days) = calendar.minimum_days_in_first_week {
        identity = identity.with_minimum_days_in_first_week(days)?;
    }
    if let Some(ref locale) = calendar.locale {
        identity = identity.with_locale(locale);
    }
    Ok(GregorianCalendar::new(identity))
}

/// Builds [`SearchOptions`] from the TOML search configuration, with CLI
/// overrides applied.
pub fn build_search_options(search: &SearchToml, args: &SearchArgs) -> Result<SearchOptions> {
    let direction = parse_direction(args.direction.as_deref().unwrap_or(&search.direction))?;
    let matching = parse_matching_policy(
        args.matching_policy
            .as_deref()
            .unwrap_or(&search.matching_policy),
    )?;
    let repeated = parse_repeated_time_policy(
        args.repeated_time_policy
            .as_deref()
            .unwrap_or(&search.repeated_time_policy),
    )?;
    let options = SearchOptions::new()
        .with_direction(direction)
        .with_matching_policy(matching)
        .with_repeated_time_policy(repeated)
        .with_max_iterations(args.max_iterations.unwrap_or(search.max_iterations));
    options.validate().context("invalid search settings")?;
    Ok(options)
}

/// Builds [`DateComponents`] from the CLI field flags.
///
/// At least one field must be given.
pub fn build_components(fields: &FieldArgs) -> Result<DateComponents> {
    let mut comps = DateComponents::new();
    let mut set = |value: Option<i32>, apply: fn(DateComponents, i32) -> DateComponents| {
        if let Some(v) = value {
            comps = apply(std::mem::take(&mut comps), v);
        }
    };
    set(fields.era, DateComponents::with_era);
    set(fields.year, DateComponents::with_year);
    set(fields.year_for_week_of_year, DateComponents::with_year_for_week_of_year);
    set(fields.quarter, DateComponents::with_quarter);
    set(fields.month, DateComponents::with_month);
    set(fields.week_of_year, DateComponents::with_week_of_year);
    set(fields.week_of_month, DateComponents::with_week_of_month);
    set(fields.weekday_ordinal, DateComponents::with_weekday_ordinal);
    set(fields.weekday, DateComponents::with_weekday);
    set(fields.day, DateComponents::with_day);
    set(fields.day_of_year, DateComponents::with_day_of_year);
    set(fields.hour, DateComponents::with_hour);
    set(fields.minute, DateComponents::with_minute);
    set(fields.second, DateComponents::with_second);
    set(fields.nanosecond, DateComponents::with_nanosecond);
    if comps.is_empty() {
        bail!("no date components given: pass at least one of --year, --month, --day, --hour, ...");
    }
    Ok(comps)
}

#[cfg(test)]
mod tests {
    use kairos_calendar::Field;

    use super::*;

    fn args() -> SearchArgs {
        SearchArgs {
            config: None,
            after: "2023-01-01T00:00:00Z".parse().unwrap(),
            time_zone: None,
            calendar: None,
            direction: None,
            matching_policy: None,
            repeated_time_policy: None,
            max_iterations: None,
            fields: FieldArgs::default(),
        }
    }

    #[test]
    fn test_parse_policies() {
        assert_eq!(parse_direction("Backward").unwrap(), SearchDirection::Backward);
        assert_eq!(
            parse_matching_policy("next_time_preserving").unwrap(),
            MatchingPolicy::NextTimePreservingSmallerComponents
        );
        assert_eq!(parse_repeated_time_policy("last").unwrap(), RepeatedTimePolicy::Last);
        assert!(parse_matching_policy("sometimes").is_err());
        assert!(parse_system("julian").is_err());
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut a = args();
        a.direction = Some("backward".to_string());
        a.max_iterations = Some(7);
        let options = build_search_options(&SearchToml::default(), &a).unwrap();
        assert_eq!(options.direction(), SearchDirection::Backward);
        assert_eq!(options.matching_policy(), MatchingPolicy::NextTime);
        assert_eq!(options.max_iterations(), 7);
    }

    #[test]
    fn test_zero_budget_rejected() {
        let mut a = args();
        a.max_iterations = Some(0);
        assert!(build_search_options(&SearchToml::default(), &a).is_err());
    }

    #[test]
    fn test_build_calendar() {
        let mut a = args();
        a.time_zone = Some("EST5EDT,M3.2.0,M11.1.0".to_string());
        a.calendar = Some("iso8601".to_string());
        let cal = build_calendar(&CalendarToml::default(), &a).unwrap();
        assert_eq!(cal.identity().system(), CalendarSystem::Iso8601);
        assert_eq!(cal.identity().minimum_days_in_first_week(), 4);
    }

    #[test]
    fn test_build_calendar_bad_weekday() {
        let calendar = CalendarToml {
            first_weekday: Some(9),
            ..CalendarToml::default()
        };
        assert!(build_calendar(&calendar, &args()).is_err());
    }

    #[test]
    fn test_build_components() {
        let fields = FieldArgs {
            month: Some(6),
            weekday: Some(2),
            ..FieldArgs::default()
        };
        let comps = build_components(&fields).unwrap();
        assert_eq!(comps.get(Field::Month), Some(6));
        assert_eq!(comps.get(Field::Weekday), Some(2));
        assert_eq!(comps.get(Field::Day), None);
        assert!(build_components(&FieldArgs::default()).is_err());
    }
}
