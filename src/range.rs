use std::iter;

use serde::{Deserialize, Serialize};

use crate::consts::RANGE_SEPARATOR;
use crate::{CalendarDate, ParseError, prelude::*};

/// A closed interval of days. The start date is never after the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}{}{}", start, RANGE_SEPARATOR, end)]
pub struct DateRange {
    start: CalendarDate,
    end:   CalendarDate,
}

/// Error type for date range construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: CalendarDate, end: CalendarDate },

    /// Error parsing an endpoint.
    #[error(transparent)]
    ParseError(#[from] ParseError),
}

impl DateRange {
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds a range from two endpoints given in either order.
    pub fn ordered(a: CalendarDate, b: CalendarDate) -> Self {
        Self {
            start: a.min(b),
            end:   a.max(b),
        }
    }

    /// A range covering a single day
    pub const fn single_day(date: CalendarDate) -> Self {
        Self {
            start: date,
            end:   date,
        }
    }

    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    pub const fn dates(&self) -> (CalendarDate, CalendarDate) {
        (self.start, self.end)
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Number of days in the range, both endpoints included.
    pub fn len_days(&self) -> u64 {
        (self.end.to_epoch_days() - self.start.to_epoch_days()).unsigned_abs() + 1
    }

    /// Walks every day from start to end inclusive.
    pub fn days(&self) -> impl Iterator<Item = CalendarDate> + use<> {
        let end = self.end;
        iter::successors(Some(self.start), move |day| day.succ().filter(|next| *next <= end))
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        [self.start, self.end].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let [start, end] = <[CalendarDate; 2]>::deserialize(deserializer)?;
        Self::new(start, end).map_err(serde::de::Error::custom)
    }
}
