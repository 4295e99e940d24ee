//! Date picker core: a selection state machine and a fixed 6-week grid.
//!
//! The crate has no rendering of its own. A host feeds it constraints, an
//! external value and clicks; it answers with [`CalendarGrid`]s to draw and
//! [`CommittedValue`]s to write back.

mod config;
mod constraints;
mod consts;
mod controller;
mod date;
mod grid;
mod locale;
mod prelude;
mod range;
mod selection;
mod types;
mod value;

#[cfg(feature = "chrono")]
mod chrono_impls;

#[cfg(test)]
mod test_utils;

pub use config::{CalendarConfig, ConfigError};
pub use constraints::{ConstraintBundle, Direction};
pub use consts::*;
pub use controller::CalendarController;
pub use date::{CalendarDate, ParseError, YearMonth};
pub use grid::{CalendarGrid, CellKey, DayCell, Week};
pub use locale::{LocaleTable, Locales};
pub use range::{DateRange, RangeError};
pub use selection::{RangeSelection, Selection, SelectionMode};
pub use types::{Day, Month, Weekday, Year, days_in_month, is_leap_year};
pub use value::{CommittedValue, ExternalValue, ValueError};
