use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::{CalendarDate, CommittedValue, DateRange};

/// Whether the picker selects one day or a span of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    #[display(fmt = "single")]
    Single,
    #[display(fmt = "range")]
    Range,
}

impl SelectionMode {
    pub const fn from_range_flag(range_mode: bool) -> Self {
        if range_mode { Self::Range } else { Self::Single }
    }
}

/// Progress of a range being picked with two clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RangeSelection {
    /// Nothing picked yet
    #[default]
    Empty,
    /// First endpoint placed, waiting for the second click
    Anchored(CalendarDate),
    /// Both endpoints fixed
    Committed(DateRange),
}

/// Selection state, tagged by mode so only one representation can exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    Single(Option<CalendarDate>),
    Range(RangeSelection),
}

impl Default for Selection {
    fn default() -> Self {
        Self::empty(SelectionMode::default())
    }
}

impl Selection {
    pub const fn empty(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Single => Self::Single(None),
            SelectionMode::Range => Self::Range(RangeSelection::Empty),
        }
    }

    /// Rebuilds selection state from a committed value.
    ///
    /// A value whose shape belongs to the other mode yields the empty state.
    pub const fn from_committed(value: CommittedValue, mode: SelectionMode) -> Self {
        match (mode, value) {
            (SelectionMode::Single, CommittedValue::Single(date)) => Self::Single(Some(date)),
            (SelectionMode::Range, CommittedValue::Range(range)) => Self::Range(RangeSelection::Committed(range)),
            _ => Self::empty(mode),
        }
    }

    pub const fn mode(&self) -> SelectionMode {
        match self {
            Self::Single(_) => SelectionMode::Single,
            Self::Range(_) => SelectionMode::Range,
        }
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Single(None) | Self::Range(RangeSelection::Empty))
    }

    /// The value a host should store. An unfinished range is not committed.
    pub const fn committed_value(&self) -> CommittedValue {
        match self {
            Self::Single(Some(date)) => CommittedValue::Single(*date),
            Self::Range(RangeSelection::Committed(range)) => CommittedValue::Range(*range),
            Self::Single(None) | Self::Range(RangeSelection::Empty | RangeSelection::Anchored(_)) => {
                CommittedValue::Empty
            },
        }
    }

    /// The anchor of a range waiting for its second click
    pub const fn pending_anchor(&self) -> Option<CalendarDate> {
        match self {
            Self::Range(RangeSelection::Anchored(anchor)) => Some(*anchor),
            _ => None,
        }
    }

    /// Whether `date` is highlighted as picked: the single date, a pending anchor, or a range endpoint.
    pub fn is_selected(&self, date: &CalendarDate) -> bool {
        match self {
            Self::Single(selected) => selected.as_ref() == Some(date),
            Self::Range(RangeSelection::Empty) => false,
            Self::Range(RangeSelection::Anchored(anchor)) => anchor == date,
            Self::Range(RangeSelection::Committed(range)) => range.start() == *date || range.end() == *date,
        }
    }

    pub fn is_range_start(&self, date: &CalendarDate) -> bool {
        match self {
            Self::Range(RangeSelection::Anchored(anchor)) => anchor == date,
            Self::Range(RangeSelection::Committed(range)) => range.start() == *date,
            _ => false,
        }
    }

    pub fn is_range_end(&self, date: &CalendarDate) -> bool {
        matches!(self, Self::Range(RangeSelection::Committed(range)) if range.end() == *date)
    }

    /// Whether `date` lies inside a committed range, endpoints included.
    pub fn is_in_range(&self, date: &CalendarDate) -> bool {
        matches!(self, Self::Range(RangeSelection::Committed(range)) if range.contains(date))
    }
}
