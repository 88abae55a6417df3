use anyhow::Result;
use tracing::info;

use kairos_calendar::GregorianCalendar;
use kairos_enumerate::{DateEnumerator, DateMatch, TracingObserver};

use crate::cli::EnumerateArgs;
use crate::config;
use crate::convert;

/// Print up to `limit` matches after `--after`, one per line.
pub fn run(args: EnumerateArgs) -> Result<()> {
    let search = &args.search;
    let config = config::load(search.config.as_deref())?;
    let plan = convert::build_plan(&config, search)?;
    let limit = args.limit.unwrap_or(config.search.limit);
    info!(after = %search.after, limit, "enumerating dates");

    let enumerator = DateEnumerator::new(plan.calendar).with_observer(TracingObserver);
    let mut printed = 0usize;
    enumerator.enumerate_dates(search.after, &plan.components, &plan.options, |date, exact, stop| {
        let Some(date) = date else {
            return;
        };
        if args.exact_only && !exact {
            return;
        }
        println!("{}", format_match(enumerator.calendar(), DateMatch { date, exact }));
        printed += 1;
        *stop = printed >= limit;
    });
    if printed == 0 {
        println!("no match");
    }
    info!(printed, "enumeration finished");
    Ok(())
}

/// Renders a match in the calendar's time zone, flagging inexact matches.
pub fn format_match(calendar: &GregorianCalendar, m: DateMatch) -> String {
    let zoned = m.date.to_zoned(calendar.time_zone().clone());
    if m.exact {
        zoned.to_string()
    } else {
        format!("{zoned} (inexact)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_match() {
        let cal = GregorianCalendar::default();
        let date = "2023-03-01T00:00:00Z".parse().unwrap();
        assert_eq!(
            format_match(&cal, DateMatch { date, exact: true }),
            "2023-03-01T00:00:00+00:00[UTC]"
        );
        assert!(format_match(&cal, DateMatch { date, exact: false }).ends_with(" (inexact)"));
    }
}
