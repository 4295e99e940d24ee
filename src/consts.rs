/// Smallest supported year
pub const MIN_YEAR: u16 = 1;
/// Largest supported year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Months are 1-indexed, December is the last
pub const MAX_MONTH: u8 = 12;
/// First day of every month
pub const MIN_DAY: u8 = 1;

pub const JANUARY: u8 = 1;
pub const FEBRUARY: u8 = 2;
pub const DECEMBER: u8 = 12;

pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Days per month in a common year, index 0 unused
pub const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
pub(crate) const CENTURY_CYCLE: u16 = 100;
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Columns of the calendar grid, Sunday first
pub const DAYS_PER_WEEK: usize = 7;
/// Rows of the calendar grid; every month renders with the same height
pub const WEEKS_PER_GRID: usize = 6;
/// Total cells of a rendered month
pub const GRID_CELLS: usize = DAYS_PER_WEEK * WEEKS_PER_GRID;

/// Separator between ISO date components
pub const DATE_SEPARATOR: char = '-';
/// Separators that may start a time-of-day suffix, which is discarded
pub const TIME_SEPARATORS: [char; 2] = ['T', ' '];
/// Separator of the legacy "start,end" range string
pub const LEGACY_RANGE_SEPARATOR: char = ',';
/// Separator used when displaying a range (ISO 8601 interval)
pub const RANGE_SEPARATOR: char = '/';
