//! # kairos-calendar
//!
//! Calendar fields, partial date specifications and the calendar arithmetic
//! primitive used by the `kairos-enumerate` search engine.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["DateComponents"] -->|"instant()"| B["Timestamp"]
//!     B -->|"field_value()"| C["i32"]
//!     B -->|"interval()"| D["FieldInterval"]
//!     B -->|"adding()"| B
//!     E["CalendarIdentity"] --> F["GregorianCalendar"]
//!     F -.->|"implements"| G["CalendarPrimitive"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use kairos_calendar::{
//!     CalendarIdentity, CalendarPrimitive, DateComponents, Field, GregorianCalendar,
//!     resolve_time_zone,
//! };
//!
//! let tz = resolve_time_zone("UTC").unwrap();
//! let cal = GregorianCalendar::new(CalendarIdentity::gregorian(tz));
//!
//! let at = cal
//!     .instant(&DateComponents::new().with_year(2023).with_month(2).with_day(5))
//!     .unwrap();
//! assert_eq!(cal.field_value(Field::Weekday, at), 1); // Sunday
//!
//! let month = cal.interval(Field::Month, at).unwrap();
//! assert_eq!(month.duration.as_hours(), 28 * 24);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `field` | Field kinds and their search precedence |
//! | `components` | Sparse field targets (`DateComponents`) |
//! | `identity` | Calendar system, time zone and week rules |
//! | `primitive` | `CalendarPrimitive` trait and `FieldInterval` |
//! | `gregorian` | `jiff`-backed Gregorian/ISO 8601 primitive |
//! | `week` | Week numbering helpers |
//! | `zone` | Time zone resolution |
//! | `error` | Error types |

mod components;
mod error;
mod field;
mod gregorian;
mod identity;
mod primitive;
mod week;
mod zone;

pub use components::DateComponents;
pub use error::CalendarError;
pub use field::Field;
pub use gregorian::GregorianCalendar;
pub use identity::{CalendarIdentity, CalendarSystem, weekday_from_number, weekday_number};
pub use primitive::{CalendarPrimitive, FieldInterval};
pub use zone::resolve_time_zone;
