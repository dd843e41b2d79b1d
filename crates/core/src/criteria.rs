//! Filter-control values and date range presets.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Snapshot of every filter control.
///
/// This is both the input of the predicate evaluator and the `values` payload
/// of a saved preset, so it serializes with the control names a UI uses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Global search term matched against the whole row.
    pub global_search: String,
    /// Treat `global_search` as a regular expression.
    pub regex_enabled: bool,
    /// Match `global_search` case-sensitively.
    pub case_sensitive: bool,
    /// Loose "email" term: any cell containing it, case-insensitively.
    pub email_filter: String,
    /// Column targeted by `column_value` (also the case-transform target).
    #[serde(rename = "columnSelect")]
    #[serde(deserialize_with = "blank_as_none")]
    pub column: Option<String>,
    /// Substring required in `column`.
    #[serde(rename = "columnFilterValue")]
    pub column_value: String,
    /// Column checked by the numeric range.
    #[serde(deserialize_with = "blank_as_none")]
    pub numeric_column: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub numeric_min: Option<f64>,
    #[serde(deserialize_with = "blank_as_none")]
    pub numeric_max: Option<f64>,
    /// Column checked by the date range.
    #[serde(deserialize_with = "blank_as_none")]
    pub date_column: Option<String>,
    /// Relative preset; when set it overrides `date_from`/`date_to`.
    #[serde(rename = "dateRangePreset")]
    #[serde(deserialize_with = "blank_as_none")]
    pub date_preset: Option<DatePreset>,
    #[serde(deserialize_with = "blank_as_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(deserialize_with = "blank_as_none")]
    pub date_to: Option<NaiveDate>,
}

impl FilterCriteria {
    /// True when no clause constrains anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let date_bounds =
            self.date_preset.is_some() || self.date_from.is_some() || self.date_to.is_some();
        self.global_search.is_empty()
            && self.email_filter.is_empty()
            && (self.column.is_none() || self.column_value.is_empty())
            && self.numeric_column.is_none()
            && (self.date_column.is_none() || !date_bounds)
    }

    /// Select a date preset and copy its concrete bounds into
    /// `date_from`/`date_to`. `None` clears the date bounds.
    pub fn apply_date_preset(&mut self, preset: Option<DatePreset>, today: NaiveDate) {
        self.date_preset = preset;
        let range = preset.map(|p| p.resolve(today)).unwrap_or_default();
        self.date_from = range.from;
        self.date_to = range.to;
    }

    /// Concrete date bounds as of `today`.
    #[must_use]
    pub fn date_range(&self, today: NaiveDate) -> DateRange {
        match self.date_preset {
            Some(preset) => preset.resolve(today),
            None => DateRange {
                from: self.date_from,
                to: self.date_to,
            },
        }
    }
}

/// Deserialize an optional control value.
///
/// Form controls persist unset values as `""` and numbers as strings, so a
/// blank string or null is `None` and anything else goes through `FromStr`.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => return Ok(None),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(D::Error::custom(format!(
                "expected a string or number, found {other}"
            )))
        }
    };
    raw.trim().parse().map(Some).map_err(D::Error::custom)
}

/// Inclusive calendar date range; either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// True when neither bound is set.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Relative date range presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatePreset {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "yesterday")]
    Yesterday,
    #[serde(rename = "last7days")]
    Last7Days,
    #[serde(rename = "last30days")]
    Last30Days,
    #[serde(rename = "thisMonth")]
    ThisMonth,
    #[serde(rename = "lastMonth")]
    LastMonth,
}

impl DatePreset {
    /// Every preset in menu order.
    pub const ALL: [DatePreset; 6] = [
        DatePreset::Today,
        DatePreset::Yesterday,
        DatePreset::Last7Days,
        DatePreset::Last30Days,
        DatePreset::ThisMonth,
        DatePreset::LastMonth,
    ];

    /// Identifier used in persisted presets.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DatePreset::Today => "today",
            DatePreset::Yesterday => "yesterday",
            DatePreset::Last7Days => "last7days",
            DatePreset::Last30Days => "last30days",
            DatePreset::ThisMonth => "thisMonth",
            DatePreset::LastMonth => "lastMonth",
        }
    }

    /// Resolve to concrete inclusive bounds relative to `today`.
    ///
    /// `lastMonth` spans the whole previous calendar month.
    #[must_use]
    pub fn resolve(self, today: NaiveDate) -> DateRange {
        let days_back = |n: u64| today.checked_sub_days(Days::new(n)).unwrap_or(today);
        let month_start = today.with_day(1).unwrap_or(today);

        let (from, to) = match self {
            DatePreset::Today => (today, today),
            DatePreset::Yesterday => (days_back(1), days_back(1)),
            DatePreset::Last7Days => (days_back(7), today),
            DatePreset::Last30Days => (days_back(30), today),
            DatePreset::ThisMonth => (month_start, today),
            DatePreset::LastMonth => {
                let start = month_start
                    .checked_sub_months(Months::new(1))
                    .unwrap_or(month_start);
                let end = month_start.pred_opt().unwrap_or(month_start);
                (start, end)
            }
        };
        DateRange {
            from: Some(from),
            to: Some(to),
        }
    }
}

impl fmt::Display for DatePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatePreset::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Unknown date range preset: {s}"))
    }
}
