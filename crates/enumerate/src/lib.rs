//! # kairos-enumerate
//!
//! Finds and enumerates the instants that match a partial set of date
//! components ("every Monday", "the 31st of each month", "02:30 each day")
//! over a [`CalendarPrimitive`], including across daylight saving gaps and
//! folds.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["DateComponents"] --> B["adjust"]
//!     B --> C["match_all"]
//!     C -->|"per field"| D["matchers()"]
//!     C --> E["DateSequence"]
//!     E -->|"exact / resolved"| F["DateMatch"]
//!     E -.->|"events"| G["SearchObserver"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use kairos_calendar::{DateComponents, GregorianCalendar};
//! use kairos_enumerate::{SearchOptions, dates, next_date};
//!
//! let cal = GregorianCalendar::default();
//! let start: jiff::Timestamp = "2023-02-05T12:00:00Z".parse().unwrap();
//! let day_28 = DateComponents::new().with_day(28);
//!
//! let next = next_date(&cal, start, &day_28, &SearchOptions::new());
//! assert_eq!(next, Some("2023-02-28T00:00:00Z".parse().unwrap()));
//!
//! let months: Vec<_> = dates(&cal, start, &day_28, &SearchOptions::new())
//!     .take(3)
//!     .map(|m| m.date.to_string())
//!     .collect();
//! assert_eq!(
//!     months,
//!     ["2023-02-28T00:00:00Z", "2023-03-28T00:00:00Z", "2023-04-28T00:00:00Z"]
//! );
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `options` | Direction, matching and repeated time policies |
//! | `matchers` | Per-field matchers and their search context |
//! | `orchestrator` | `match_all` and `match_within_next` |
//! | `adjust` | Year and month injection before a search step |
//! | `validate` | Component validation and exactness checks |
//! | `driver` | `DateSequence`, the enumeration state machine |
//! | `search` | Public entry points and `DateEnumerator` |
//! | `observer` | Diagnostic events |
//! | `error` | Error types |

mod adjust;
mod driver;
mod error;
mod matchers;
mod observer;
mod options;
mod orchestrator;
mod search;
mod validate;

pub use adjust::adjust;
pub use driver::{DateMatch, DateSequence};
pub use error::EnumerationError;
pub use matchers::{Matcher, SearchContext, matchers};
pub use observer::{NoopObserver, SearchEvent, SearchObserver, TracingObserver};
pub use options::{MatchingPolicy, RepeatedTimePolicy, SearchDirection, SearchOptions};
pub use orchestrator::{match_all, match_within_next};
pub use search::{DateEnumerator, dates, enumerate_dates, matching_date, next_date};
pub use validate::{is_exact, validate_components};

#[doc(no_inline)]
pub use kairos_calendar::CalendarPrimitive;
