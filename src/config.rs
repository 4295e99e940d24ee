//! Host-facing configuration.
//!
//! Mirrors the payload a form framework hands the widget, with its camelCase
//! keys. Resolution into a [`ConstraintBundle`] is lenient: dates that fail
//! to parse are dropped with a warning rather than failing the whole widget.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{CalendarDate, ConstraintBundle, ExternalValue};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid calendar configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarConfig {
    pub min_date:       Option<String>,
    pub max_date:       Option<String>,
    pub disabled_dates: Vec<String>,
    /// Non-empty turns on allowlist mode
    pub enabled_dates:  Vec<String>,
    #[serde(alias = "rangeSelection")]
    pub range_mode:     bool,
    pub is_disabled:    bool,
    /// Tag used to pick a [`crate::LocaleTable`]
    pub locale:         Option<String>,
    /// The value the host has stored for this field
    pub initial_value:  Option<ExternalValue>,
}

impl CalendarConfig {
    /// # Errors
    /// Returns `ConfigError::Json` if the payload is not valid JSON of the expected shape.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves the constraint fields, skipping any date that does not parse.
    pub fn constraints(&self) -> ConstraintBundle {
        ConstraintBundle::new()
            .with_min_date(self.min_date.as_deref().and_then(|s| lenient_date("minDate", s)))
            .with_max_date(self.max_date.as_deref().and_then(|s| lenient_date("maxDate", s)))
            .with_disabled_dates(
                self.disabled_dates
                    .iter()
                    .filter_map(|s| lenient_date("disabledDates", s)),
            )
            .with_enabled_dates(
                self.enabled_dates
                    .iter()
                    .filter_map(|s| lenient_date("enabledDates", s)),
            )
            .with_range_mode(self.range_mode)
            .with_disabled(self.is_disabled)
    }
}

fn lenient_date(key: &'static str, raw: &str) -> Option<CalendarDate> {
    raw.parse()
        .map_err(|error: crate::ParseError| warn!(key, raw, %error, "ignoring unparseable constraint date"))
        .ok()
}

impl ConstraintBundle {
    /// The normalized constraint payload, with every date as `YYYY-MM-DD`.
    pub fn to_config(&self) -> CalendarConfig {
        let iso = |dates: &BTreeSet<CalendarDate>| -> Vec<String> { dates.iter().map(ToString::to_string).collect() };
        CalendarConfig {
            min_date: self.min_date().map(|d| d.to_string()),
            max_date: self.max_date().map(|d| d.to_string()),
            disabled_dates: iso(self.disabled_dates()),
            enabled_dates: iso(self.enabled_dates()),
            range_mode: self.range_mode(),
            is_disabled: self.is_disabled(),
            ..CalendarConfig::default()
        }
    }
}
