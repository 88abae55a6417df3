use anyhow::Result;
use tracing::info;

use kairos_enumerate::{DateEnumerator, TracingObserver};

use crate::cli::NextArgs;
use crate::config;
use crate::convert;
use crate::enumerate_cmd::format_match;

/// Print the next match after `--after`, or `no match`.
pub fn run(args: NextArgs) -> Result<()> {
    let search = &args.search;
    let config = config::load(search.config.as_deref())?;
    let plan = convert::build_plan(&config, search)?;
    info!(after = %search.after, direction = ?plan.options.direction(), "searching next date");

    let enumerator = DateEnumerator::new(plan.calendar).with_observer(TracingObserver);
    let found = enumerator
        .dates(search.after, &plan.components, &plan.options)
        .next();
    match found {
        Some(m) => println!("{}", format_match(enumerator.calendar(), m)),
        None => println!("no match"),
    }
    Ok(())
}
