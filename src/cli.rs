use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::Timestamp;

/// Kairos calendar date search.
#[derive(Parser)]
#[command(
    name = "kairos",
    version,
    about = "Find and enumerate instants matching partial calendar dates"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the next instant matching the given components.
    Next(NextArgs),
    /// Print successive instants matching the given components.
    Enumerate(EnumerateArgs),
}

/// Arguments for the `next` subcommand.
#[derive(clap::Args)]
pub struct NextArgs {
    #[command(flatten)]
    pub search: SearchArgs,
}

/// Arguments for the `enumerate` subcommand.
#[derive(clap::Args)]
pub struct EnumerateArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Maximum number of matches to print. Overrides `[search].limit`.
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Only print exact matches.
    #[arg(long)]
    pub exact_only: bool,
}

/// Options shared by every search subcommand.
#[derive(clap::Args)]
pub struct SearchArgs {
    /// Path to TOML configuration file. `kairos.toml` is used when present.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Instant to search from, as an RFC 3339 timestamp.
    #[arg(long)]
    pub after: Timestamp,

    /// Time zone override (IANA name, POSIX TZ string or "UTC").
    #[arg(long = "time-zone", visible_alias = "tz")]
    pub time_zone: Option<String>,

    /// Calendar system override ("gregorian" or "iso8601").
    #[arg(long)]
    pub calendar: Option<String>,

    /// Search direction ("forward" or "backward").
    #[arg(long)]
    pub direction: Option<String>,

    /// Matching policy ("next-time", "next-time-preserving",
    /// "previous-time-preserving" or "strict").
    #[arg(long = "matching-policy")]
    pub matching_policy: Option<String>,

    /// Repeated time policy ("first" or "last").
    #[arg(long = "repeated-time-policy")]
    pub repeated_time_policy: Option<String>,

    /// Consecutive misses tolerated before giving up.
    #[arg(long = "max-iterations")]
    pub max_iterations: Option<usize>,

    /// Date components to match.
    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Date component targets. Unset flags match any value.
#[derive(clap::Args, Debug, Default)]
pub struct FieldArgs {
    /// Era (0 = BC, 1 = AD).
    #[arg(long)]
    pub era: Option<i32>,
    /// Year of the era.
    #[arg(long)]
    pub year: Option<i32>,
    /// Year of the week-numbering calendar.
    #[arg(long = "year-for-week-of-year")]
    pub year_for_week_of_year: Option<i32>,
    /// Quarter (1-4).
    #[arg(long)]
    pub quarter: Option<i32>,
    /// Month (1-12).
    #[arg(long)]
    pub month: Option<i32>,
    /// Week of the year.
    #[arg(long = "week-of-year")]
    pub week_of_year: Option<i32>,
    /// Week of the month.
    #[arg(long = "week-of-month")]
    pub week_of_month: Option<i32>,
    /// Occurrence of the weekday within the month (1-5).
    #[arg(long = "weekday-ordinal")]
    pub weekday_ordinal: Option<i32>,
    /// Weekday (1 = Sunday ... 7 = Saturday).
    #[arg(long)]
    pub weekday: Option<i32>,
    /// Day of the month.
    #[arg(long)]
    pub day: Option<i32>,
    /// Day of the year.
    #[arg(long = "day-of-year")]
    pub day_of_year: Option<i32>,
    /// Hour (0-23).
    #[arg(long)]
    pub hour: Option<i32>,
    /// Minute (0-59).
    #[arg(long)]
    pub minute: Option<i32>,
    /// Second (0-59).
    #[arg(long)]
    pub second: Option<i32>,
    /// Nanosecond within the second.
    #[arg(long)]
    pub nanosecond: Option<i32>,
}
