use crate::{CalendarDate, DateRange, YearMonth};

pub(crate) fn date(year: u16, month: u8, day: u8) -> CalendarDate {
    CalendarDate::from_ymd(year, month, day).expect("valid test date")
}

pub(crate) fn month(year: u16, month: u8) -> YearMonth {
    YearMonth::new(year, month).expect("valid test month")
}

pub(crate) fn range(start: (u16, u8, u8), end: (u16, u8, u8)) -> DateRange {
    DateRange::new(date(start.0, start.1, start.2), date(end.0, end.1, end.2)).expect("ordered test range")
}
