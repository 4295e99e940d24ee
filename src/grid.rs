//! Six-week month grid.
//!
//! Every month renders as exactly [`WEEKS_PER_GRID`] rows of
//! [`DAYS_PER_WEEK`] cells, Sunday first. The rows before and after the
//! month are padded with days from the neighbouring months, so the grid
//! height never changes while paging.

use std::{fmt, iter};

use serde::Serialize;

use crate::consts::{DAYS_PER_WEEK, GRID_CELLS, WEEKS_PER_GRID};
use crate::{CalendarDate, ConstraintBundle, Selection, YearMonth};

/// Stable identity of a cell for keyed rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKey {
    /// Padding from the previous month
    Previous(u8),
    Current(u8),
    /// Padding from the next month
    Next(u8),
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Previous(day) => write!(f, "prev-{day}"),
            Self::Current(day) => write!(f, "current-{day}"),
            Self::Next(day) => write!(f, "next-{day}"),
        }
    }
}

impl Serialize for CellKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date:             CalendarDate,
    pub key:              CellKey,
    pub is_current_month: bool,
    pub is_selected:      bool,
    pub is_range_start:   bool,
    pub is_range_end:     bool,
    pub is_in_range:      bool,
    pub is_today:         bool,
    /// Greyed out by the constraints
    pub is_disabled:      bool,
    /// Clicking this cell can change the selection
    pub is_selectable:    bool,
}

impl DayCell {
    pub const fn day(&self) -> u8 {
        self.date.day().get()
    }
}

/// One row of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week<'a> {
    pub index: usize,
    pub days:  &'a [DayCell],
}

impl Week<'_> {
    pub fn key(&self) -> String {
        format!("week-{}", self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarGrid {
    month: YearMonth,
    cells: Vec<DayCell>,
}

impl CalendarGrid {
    /// Lays out `month` with every cell's flags derived from the inputs.
    ///
    /// `0001-01` and `9999-12` cannot be padded on both sides and are
    /// clamped one month inward.
    pub fn build(
        month: YearMonth,
        selection: &Selection,
        constraints: &ConstraintBundle,
        today: CalendarDate,
    ) -> Self {
        let month = month.clamp_to_grid();
        let first = month.first_day();
        let leading = i64::try_from(first.weekday().index()).unwrap_or_default();
        let start = first.checked_add_days(-leading).unwrap_or(first);

        let cells: Vec<DayCell> = iter::successors(Some(start), CalendarDate::succ)
            .take(GRID_CELLS)
            .map(|date| {
                let is_current_month = month.contains(&date);
                let is_disabled = constraints.is_date_disabled(&date);
                let day = date.day().get();
                DayCell {
                    date,
                    key: if is_current_month {
                        CellKey::Current(day)
                    } else if date < first {
                        CellKey::Previous(day)
                    } else {
                        CellKey::Next(day)
                    },
                    is_current_month,
                    is_selected: selection.is_selected(&date),
                    is_range_start: selection.is_range_start(&date),
                    is_range_end: selection.is_range_end(&date),
                    is_in_range: selection.is_in_range(&date),
                    is_today: date == today,
                    is_disabled,
                    is_selectable: is_current_month && !is_disabled && !constraints.is_disabled(),
                }
            })
            .collect();

        tracing::trace!(%month, %start, cells = cells.len(), "built calendar grid");
        Self { month, cells }
    }

    pub const fn month(&self) -> YearMonth {
        self.month
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn weeks(&self) -> impl Iterator<Item = Week<'_>> {
        self.cells
            .chunks_exact(DAYS_PER_WEEK)
            .take(WEEKS_PER_GRID)
            .enumerate()
            .map(|(index, days)| Week { index, days })
    }

    pub fn cell(&self, date: &CalendarDate) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.date == *date)
    }
}
