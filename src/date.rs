use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DATE_SEPARATOR, DECEMBER, JANUARY, MAX_YEAR, MIN_DAY, MIN_YEAR, TIME_SEPARATORS,
};
use crate::prelude::*;
use crate::types::{Day, Month, Weekday, Year, days_in_month};

/// Days between 0000-03-01 and 1970-01-01 in the proleptic Gregorian calendar
const EPOCH_SHIFT: i64 = 719_468;
const DAYS_PER_ERA: i64 = 146_097;
/// 1970-01-01 was a Thursday
const EPOCH_WEEKDAY: i64 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {}", "_0")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-12)", "_0")]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year:04}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// A calendar day with no time-of-day component.
///
/// Equality and ordering look only at `(year, month, day)`, so two values
/// parsed from `2024-06-05` and `2024-06-05T23:59:00Z` are the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}-{}-{}", year, month, day)]
pub struct CalendarDate {
    year:  Year,
    month: Month,
    day:   Day,
}

impl CalendarDate {
    /// Creates a date from already validated components.
    pub const fn from_parts(year: Year, month: Month, day: Day) -> Self {
        Self { year, month, day }
    }

    /// # Errors
    /// Returns a `ParseError` naming the first component that is out of range.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> Day {
        self.day
    }

    /// The month this date falls in
    pub const fn year_month(&self) -> YearMonth {
        YearMonth {
            year:  self.year,
            month: self.month,
        }
    }

    /// The following day, or `None` past 9999-12-31.
    pub fn succ(&self) -> Option<Self> {
        let (y, m, d) = (self.year.get(), self.month.get(), self.day.get());
        if d < days_in_month(y, m) {
            return Self::from_ymd(y, m, d + 1).ok();
        }
        self.year_month().checked_next().map(|next| next.first_day())
    }

    /// The preceding day, or `None` before 0001-01-01.
    pub fn pred(&self) -> Option<Self> {
        let (y, m, d) = (self.year.get(), self.month.get(), self.day.get());
        if d > MIN_DAY {
            return Self::from_ymd(y, m, d - 1).ok();
        }
        self.year_month().checked_prev().map(|prev| prev.last_day())
    }

    /// Shifts by a signed number of days, `None` if the result leaves the supported years.
    pub fn checked_add_days(&self, days: i64) -> Option<Self> {
        self.to_epoch_days()
            .checked_add(days)
            .and_then(Self::from_epoch_days)
    }

    pub fn weekday(&self) -> Weekday {
        let index = (self.to_epoch_days() + EPOCH_WEEKDAY).rem_euclid(7);
        // rem_euclid keeps the index in 0..7
        Weekday::from_index(usize::try_from(index).unwrap_or_default())
    }

    /// Days since 1970-01-01 (negative before).
    pub fn to_epoch_days(&self) -> i64 {
        let month = i64::from(self.month.get());
        let day = i64::from(self.day.get());
        let year = i64::from(self.year.get()) - i64::from(month <= 2);

        let era = year.div_euclid(400);
        let year_of_era = year - era * 400;
        let day_of_year = (153 * ((month + 9) % 12) + 2) / 5 + day - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
        era * DAYS_PER_ERA + day_of_era - EPOCH_SHIFT
    }

    /// Inverse of [`CalendarDate::to_epoch_days`].
    pub fn from_epoch_days(days: i64) -> Option<Self> {
        let shifted = days.checked_add(EPOCH_SHIFT)?;
        let era = shifted.div_euclid(DAYS_PER_ERA);
        let day_of_era = shifted - era * DAYS_PER_ERA;
        let year_of_era =
            (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
        let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
        let shifted_month = (5 * day_of_year + 2) / 153;
        let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
        let month = if shifted_month < 10 { shifted_month + 3 } else { shifted_month - 9 };
        let year = year_of_era + era * 400 + i64::from(month <= 2);

        Self::from_ymd(
            u16::try_from(year).ok()?,
            u8::try_from(month).ok()?,
            u8::try_from(day).ok()?,
        )
        .ok()
    }

    fn parse_component<T: FromStr>(part: &str) -> Result<T, ParseError> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(part.to_owned()));
        }
        part.parse::<T>()
            .map_err(|_| ParseError::InvalidFormat(part.to_owned()))
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Parses `YYYY-MM-DD`, discarding any time-of-day suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let date_part = trimmed.split(TIME_SEPARATORS).next().unwrap_or(trimmed);
        let parts: Vec<&str> = date_part.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(trimmed.to_owned()));
        };

        Self::from_ymd(
            Self::parse_component(year)?,
            Self::parse_component(month)?,
            Self::parse_component(day)?,
        )
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A month of a particular year: the page the calendar is showing.
///
/// There is no day component, so a visible month is always anchored on its 1st.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}-{}", year, month)]
pub struct YearMonth {
    year:  Year,
    month: Month,
}

impl YearMonth {
    /// # Errors
    /// Returns `ParseError::InvalidYear` or `ParseError::InvalidMonth`.
    pub fn new(year: u16, month: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year:  Year::new(year)?,
            month: Month::new(month)?,
        })
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn days_in_month(&self) -> u8 {
        days_in_month(self.year.get(), self.month.get())
    }

    pub const fn first_day(&self) -> CalendarDate {
        CalendarDate::from_parts(self.year, self.month, Day::FIRST)
    }

    pub const fn last_day(&self) -> CalendarDate {
        CalendarDate::from_parts(self.year, self.month, Day::last_of(self.year, self.month))
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        date.year_month() == *self
    }

    pub fn checked_prev(&self) -> Option<Self> {
        match self.month.get() {
            JANUARY => Self::new(self.year.get().checked_sub(1)?, DECEMBER).ok(),
            m => Self::new(self.year.get(), m - 1).ok(),
        }
    }

    pub fn checked_next(&self) -> Option<Self> {
        match self.month.get() {
            DECEMBER => Self::new(self.year.get().checked_add(1)?, JANUARY).ok(),
            m => Self::new(self.year.get(), m + 1).ok(),
        }
    }

    /// Whether a full 6-week grid around this month stays inside the supported years.
    ///
    /// 0001-01 has no previous month to pad from and 9999-12 no next month.
    pub fn is_renderable(&self) -> bool {
        self.checked_prev().is_some() && self.checked_next().is_some()
    }

    /// Moves the first and last supported months one step inward.
    pub fn clamp_to_grid(self) -> Self {
        if self.checked_prev().is_none() {
            self.checked_next().unwrap_or(self)
        } else if self.checked_next().is_none() {
            self.checked_prev().unwrap_or(self)
        } else {
            self
        }
    }
}

impl FromStr for YearMonth {
    type Err = ParseError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        let [year, month] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(trimmed.to_owned()));
        };
        Self::new(
            CalendarDate::parse_component(year)?,
            CalendarDate::parse_component(month)?,
        )
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl From<CalendarDate> for YearMonth {
    fn from(date: CalendarDate) -> Self {
        date.year_month()
    }
}
