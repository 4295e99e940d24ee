use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, SelectionMode, YearMonth, prelude::*};

/// Month navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[display(fmt = "previous")]
    Previous,
    #[display(fmt = "next")]
    Next,
}

impl Direction {
    /// The neighbouring month, if it can be rendered as a full grid.
    pub fn step(self, month: YearMonth) -> Option<YearMonth> {
        match self {
            Self::Previous => month.checked_prev(),
            Self::Next => month.checked_next(),
        }
        .filter(YearMonth::is_renderable)
    }
}

/// Everything that decides which days can be picked.
///
/// Built once per render cycle and replaced wholesale when the host's
/// configuration changes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConstraintBundle {
    min_date:       Option<CalendarDate>,
    max_date:       Option<CalendarDate>,
    disabled_dates: BTreeSet<CalendarDate>,
    enabled_dates:  BTreeSet<CalendarDate>,
    range_mode:     bool,
    is_disabled:    bool,
}

impl ConstraintBundle {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_min_date(mut self, date: Option<CalendarDate>) -> Self {
        self.min_date = date;
        self
    }

    #[must_use]
    pub fn with_max_date(mut self, date: Option<CalendarDate>) -> Self {
        self.max_date = date;
        self
    }

    #[must_use]
    pub fn with_disabled_dates(mut self, dates: impl IntoIterator<Item = CalendarDate>) -> Self {
        self.disabled_dates = dates.into_iter().collect();
        self
    }

    /// A non-empty set turns on allowlist mode: only these days are enabled.
    #[must_use]
    pub fn with_enabled_dates(mut self, dates: impl IntoIterator<Item = CalendarDate>) -> Self {
        self.enabled_dates = dates.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_range_mode(mut self, range_mode: bool) -> Self {
        self.range_mode = range_mode;
        self
    }

    /// Makes the whole widget inert.
    #[must_use]
    pub fn with_disabled(mut self, is_disabled: bool) -> Self {
        self.is_disabled = is_disabled;
        self
    }

    pub const fn min_date(&self) -> Option<CalendarDate> {
        self.min_date
    }

    pub const fn max_date(&self) -> Option<CalendarDate> {
        self.max_date
    }

    pub const fn disabled_dates(&self) -> &BTreeSet<CalendarDate> {
        &self.disabled_dates
    }

    pub const fn enabled_dates(&self) -> &BTreeSet<CalendarDate> {
        &self.enabled_dates
    }

    pub const fn range_mode(&self) -> bool {
        self.range_mode
    }

    pub const fn mode(&self) -> SelectionMode {
        SelectionMode::from_range_flag(self.range_mode)
    }

    pub const fn is_disabled(&self) -> bool {
        self.is_disabled
    }

    pub fn is_allowlist(&self) -> bool {
        !self.enabled_dates.is_empty()
    }

    /// Whether `date` is greyed out. The first matching rule wins:
    ///
    /// 1. with an allowlist, every day outside it (nothing else is consulted)
    /// 2. explicitly disabled days
    /// 3. days before `min_date`
    /// 4. days after `max_date`
    pub fn is_date_disabled(&self, date: &CalendarDate) -> bool {
        if self.is_allowlist() {
            return !self.enabled_dates.contains(date);
        }
        if self.disabled_dates.contains(date) {
            return true;
        }
        if self.min_date.is_some_and(|min| *date < min) {
            return true;
        }
        self.max_date.is_some_and(|max| *date > max)
    }

    /// A range is valid when `start <= end` and every day in between is enabled.
    pub fn is_valid_range(&self, start: &CalendarDate, end: &CalendarDate) -> bool {
        if start > end {
            return false;
        }
        let mut day = Some(*start);
        while let Some(current) = day.filter(|current| current <= end) {
            if self.is_date_disabled(&current) {
                return false;
            }
            day = current.succ();
        }
        true
    }

    /// Whether the calendar may move from `visible` one month in `direction`.
    ///
    /// Bounds are compared by month: going back from March is allowed when
    /// `min_date` falls anywhere in February.
    pub fn can_navigate(&self, visible: YearMonth, direction: Direction) -> bool {
        if self.is_disabled {
            return false;
        }
        let Some(target) = direction.step(visible) else {
            return false;
        };
        match direction {
            Direction::Previous => self.min_date.is_none_or(|min| target >= min.year_month()),
            Direction::Next => self.max_date.is_none_or(|max| target <= max.year_month()),
        }
    }
}
