//! Injected display names.
//!
//! The picker never generates localized text itself; hosts supply tables of
//! day and month names per locale tag.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::DAYS_PER_WEEK;
use crate::{Month, Weekday, YearMonth};

const MONTHS_PER_YEAR: usize = 12;

/// Day and month names for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleTable {
    /// Short weekday names, Sunday first
    pub day_names:   [String; DAYS_PER_WEEK],
    /// Month names, January first
    pub month_names: [String; MONTHS_PER_YEAR],
}

impl LocaleTable {
    pub fn english() -> Self {
        Self {
            day_names:   ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"].map(String::from),
            month_names: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]
            .map(String::from),
        }
    }

    pub fn day_name(&self, weekday: Weekday) -> &str {
        &self.day_names[weekday.index()]
    }

    pub fn month_name(&self, month: Month) -> &str {
        &self.month_names[month.index()]
    }

    /// Grid header labels in column order
    pub fn weekday_header(&self) -> impl Iterator<Item = &str> {
        Weekday::ALL.into_iter().map(|weekday| self.day_name(weekday))
    }

    /// "`<month name> <year>`", e.g. "June 2024"
    pub fn month_year_label(&self, month: YearMonth) -> String {
        format!("{} {}", self.month_name(month.month()), month.year().get())
    }
}

impl Default for LocaleTable {
    fn default() -> Self {
        Self::english()
    }
}

/// Locale tables keyed by tag, with a fallback chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Locales {
    /// Tag used when the requested locale has no table
    pub fallback: Option<String>,
    pub tables:   HashMap<String, LocaleTable>,
    #[serde(skip)]
    english:      LocaleTable,
}

impl Locales {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_table(mut self, tag: impl Into<String>, table: LocaleTable) -> Self {
        self.tables.insert(tag.into(), table);
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, tag: impl Into<String>) -> Self {
        self.fallback = Some(tag.into());
        self
    }

    /// Picks a table for `tag`: exact match, then its language subtag
    /// (`pt` for `pt-BR`), then the fallback tag, then built-in English.
    pub fn resolve(&self, tag: Option<&str>) -> &LocaleTable {
        let language = |tag: &str| tag.split(['-', '_']).next().map(str::to_owned);

        let resolved = tag
            .and_then(|tag| self.tables.get(tag).or_else(|| self.tables.get(&language(tag)?)))
            .or_else(|| self.fallback.as_deref().and_then(|tag| self.tables.get(tag)));

        resolved.unwrap_or_else(|| {
            tracing::debug!(?tag, "no locale table found, using English");
            &self.english
        })
    }
}
