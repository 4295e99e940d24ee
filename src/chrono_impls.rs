//! Conversions to and from `chrono`, behind the `chrono` feature.

use chrono::{Datelike, NaiveDate};

use crate::{CalendarDate, ParseError};

impl CalendarDate {
    /// Today's date in the local timezone, for hosts that do not track "today" themselves.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidFormat` if the system clock is outside years 1..=9999.
    pub fn today_local() -> Result<Self, ParseError> {
        Self::try_from(chrono::Local::now().date_naive())
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = ParseError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        let year = u16::try_from(date.year()).map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        let month = u8::try_from(date.month()).map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        let day = u8::try_from(date.day()).map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        Self::from_ymd(year, month, day)
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        // years 1..=9999 are all inside chrono's range
        Self::from_ymd_opt(
            i32::from(date.year().get()),
            u32::from(date.month().get()),
            u32::from(date.day().get()),
        )
        .unwrap_or_default()
    }
}
