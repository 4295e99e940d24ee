//! The value exchanged with the hosting form.
//!
//! Hosts hand in whatever they have stored ([`ExternalValue`]); the picker
//! hands back a [`CommittedValue`], which serializes to `null`, an ISO date
//! string, or a `[start, end]` pair of ISO date strings.

use serde::{Deserialize, Serialize};

use crate::consts::LEGACY_RANGE_SEPARATOR;
use crate::prelude::*;
use crate::{CalendarDate, DateRange, ParseError, RangeError, SelectionMode};

/// A stored value as the host hands it over, before any validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, From)]
#[serde(untagged)]
pub enum ExternalValue {
    Text(String),
    List(Vec<String>),
}

impl ExternalValue {
    fn shape(&self) -> &'static str {
        match self {
            Self::Text(_) => "a string",
            Self::List(items) if items.len() == 2 => "a pair",
            Self::List(_) => "a list",
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }
}

impl From<&str> for ExternalValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl<const N: usize> From<[&str; N]> for ExternalValue {
    fn from(items: [&str; N]) -> Self {
        Self::List(items.iter().map(|item| (*item).to_owned()).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error(transparent)]
    Date(#[from] ParseError),

    #[error(transparent)]
    Range(#[from] RangeError),

    /// The value does not have the shape the selection mode expects.
    #[error("Expected {expected} for {mode} selection, found {found}")]
    UnexpectedShape {
        mode:     SelectionMode,
        expected: &'static str,
        found:    &'static str,
    },
}

/// The externally visible selection.
///
/// An anchor placed while building a range is not committed; it reads as `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CommittedValue {
    #[default]
    Empty,
    Single(CalendarDate),
    Range(DateRange),
}

impl CommittedValue {
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Parses a stored value for the given mode.
    ///
    /// A missing or blank value is `Empty`. Range mode takes a pair of dates, or
    /// the legacy `"start,end"` string; endpoints given in reverse order are
    /// sorted. Single mode takes one date.
    ///
    /// # Errors
    /// Returns `ValueError` if a date does not parse or the shape does not fit the mode.
    pub fn from_external(value: Option<&ExternalValue>, mode: SelectionMode) -> Result<Self, ValueError> {
        let Some(value) = value.filter(|value| !value.is_blank()) else {
            return Ok(Self::Empty);
        };

        match (mode, value) {
            (SelectionMode::Single, ExternalValue::Text(text)) => Ok(Self::Single(text.parse()?)),
            (SelectionMode::Range, ExternalValue::List(items)) => match items.as_slice() {
                [start, end] => Self::parse_range(start, end),
                _ => Err(Self::shape_error(mode, value)),
            },
            (SelectionMode::Range, ExternalValue::Text(text)) => {
                match text.split(LEGACY_RANGE_SEPARATOR).collect::<Vec<_>>().as_slice() {
                    [start, end] => Self::parse_range(start, end),
                    _ => Err(Self::shape_error(mode, value)),
                }
            },
            (SelectionMode::Single, ExternalValue::List(_)) => Err(Self::shape_error(mode, value)),
        }
    }

    /// The value in the shape hosts store: `None`, a string, or a pair of strings.
    pub fn to_external(&self) -> Option<ExternalValue> {
        match self {
            Self::Empty => None,
            Self::Single(date) => Some(ExternalValue::Text(date.to_string())),
            Self::Range(range) => Some(ExternalValue::List(vec![
                range.start().to_string(),
                range.end().to_string(),
            ])),
        }
    }

    /// The month a calendar should open on for this value.
    pub const fn focus_date(&self) -> Option<CalendarDate> {
        match self {
            Self::Empty => None,
            Self::Single(date) => Some(*date),
            Self::Range(range) => Some(range.start()),
        }
    }

    fn parse_range(start: &str, end: &str) -> Result<Self, ValueError> {
        let start: CalendarDate = start.parse()?;
        let end: CalendarDate = end.parse()?;
        Ok(Self::Range(DateRange::ordered(start, end)))
    }

    fn shape_error(mode: SelectionMode, value: &ExternalValue) -> ValueError {
        ValueError::UnexpectedShape {
            mode,
            expected: match mode {
                SelectionMode::Single => "a date string",
                SelectionMode::Range => "a pair of dates",
            },
            found: value.shape(),
        }
    }
}

impl From<CalendarDate> for CommittedValue {
    fn from(date: CalendarDate) -> Self {
        Self::Single(date)
    }
}

impl From<DateRange> for CommittedValue {
    fn from(range: DateRange) -> Self {
        Self::Range(range)
    }
}

impl Serialize for CommittedValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Empty => serializer.serialize_none(),
            Self::Single(date) => date.serialize(serializer),
            Self::Range(range) => range.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for CommittedValue {
    /// Accepts `null`, a date string, or a `[start, end]` pair; the mode is
    /// inferred from the shape.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Option::<ExternalValue>::deserialize(deserializer)?;
        let mode = match value {
            Some(ExternalValue::List(_)) => SelectionMode::Range,
            _ => SelectionMode::Single,
        };
        Self::from_external(value.as_ref(), mode).map_err(serde::de::Error::custom)
    }
}
