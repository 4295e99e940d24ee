use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DAYS_PER_WEEK, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR,
};
use crate::ParseError;
use std::fmt;
use std::num::{NonZeroU16, NonZeroU8};

/// A year in `1..=MAX_YEAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Year(NonZeroU16);

impl Year {
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is 0 or above `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        NonZeroU16::new(value)
            .filter(|_| value <= MAX_YEAR)
            .map(Self)
            .ok_or(ParseError::InvalidYear(value))
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    pub const fn is_leap(self) -> bool {
        is_leap_year(self.get())
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0.get())
    }
}

/// A month in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NonZeroU8);

impl Month {
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or above 12.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        NonZeroU8::new(value)
            .filter(|_| value <= MAX_MONTH)
            .map(Self)
            .ok_or(ParseError::InvalidMonth(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Zero-based position, for indexing month name tables
    #[inline]
    pub const fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0.get())
    }
}

/// A day of month, validated against its year and month on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NonZeroU8);

impl Day {
    pub const FIRST: Self = Self(NonZeroU8::MIN);

    /// Last day of the given month
    pub const fn last_of(year: Year, month: Month) -> Self {
        match NonZeroU8::new(days_in_month(year.get(), month.get())) {
            Some(day) => Self(day),
            None => Self::FIRST,
        }
    }

    /// # Errors
    /// Returns `ParseError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, ParseError> {
        NonZeroU8::new(value)
            .filter(|_| value <= days_in_month(year.get(), month.get()))
            .map(Self)
            .ok_or(ParseError::InvalidDay {
                year: year.get(),
                month: month.get(),
                day: value,
            })
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0.get())
    }
}

/// Day of the week. Grid columns start on Sunday, so `Sunday` has index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Self; DAYS_PER_WEEK] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Column of this weekday in the grid
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Wraps around, so any value maps to a weekday.
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % DAYS_PER_WEEK]
    }
}

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_bounds() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(9999).is_ok());
        assert!(matches!(Year::new(0), Err(ParseError::InvalidYear(0))));
        assert!(matches!(Year::new(10000), Err(ParseError::InvalidYear(10000))));
    }

    #[test]
    fn test_year_display_is_zero_padded() {
        let year = Year::new(42).expect("year 42 is valid");
        assert_eq!(year.to_string(), "0042");
    }

    #[test]
    fn test_month_bounds() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
        assert!(matches!(Month::new(0), Err(ParseError::InvalidMonth(0))));
        assert!(matches!(Month::new(13), Err(ParseError::InvalidMonth(13))));
    }

    #[test]
    fn test_month_index() {
        let june = Month::new(6).expect("June is valid");
        assert_eq!(june.index(), 5);
        assert_eq!(june.to_string(), "06");
    }

    #[test]
    fn test_day_checks_month_length() {
        struct TestCase {
            year:  u16,
            month: u8,
            day:   u8,
            valid: bool,
        }

        let cases = [
            TestCase { year: 2024, month: 1, day: 31, valid: true },
            TestCase { year: 2024, month: 4, day: 31, valid: false },
            TestCase { year: 2023, month: 2, day: 29, valid: false },
            TestCase { year: 2024, month: 2, day: 29, valid: true },
            TestCase { year: 2024, month: 2, day: 30, valid: false },
            TestCase { year: 2024, month: 6, day: 0, valid: false },
        ];

        for case in &cases {
            let year = Year::new(case.year).expect("test year is valid");
            let month = Month::new(case.month).expect("test month is valid");
            assert_eq!(
                Day::new(case.day, year, month).is_ok(),
                case.valid,
                "{}-{}-{}",
                case.year,
                case.month,
                case.day
            );
        }
    }

    #[test]
    fn test_is_leap_year_cases() {
        for (year, leap) in [(2020, true), (2023, false), (1900, false), (2100, false), (2000, true), (2400, true)] {
            assert_eq!(is_leap_year(year), leap, "Year {year}");
        }
    }

    #[test]
    fn test_days_in_month_common_year() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(days_in_month(2023, month), expected[month as usize], "Month {month}");
        }
        assert_eq!(days_in_month(2024, 2), 29);
    }

    #[test]
    fn test_weekday_index_round_trip() {
        for (index, weekday) in Weekday::ALL.iter().enumerate() {
            assert_eq!(weekday.index(), index);
            assert_eq!(Weekday::from_index(index), *weekday);
        }
        assert_eq!(Weekday::from_index(7), Weekday::Sunday);
    }
}
