//! Column statistics.

use crate::error::{SiftError, SiftResult};
use serde::{Deserialize, Serialize};
use sheetsift_sheet::{is_empty_cell, try_parse_number, Table};
use std::collections::HashSet;
use std::fmt;

/// Inferred column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Every non-empty value parses as a number.
    Numeric,
    Text,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => f.write_str("numeric"),
            ColumnKind::Text => f.write_str("text"),
        }
    }
}

/// Summary of one column.
///
/// For numeric columns `min`/`max`/`avg` are value statistics rounded to two
/// decimals. For text columns `min`/`max` are the shortest and longest value
/// lengths in characters and `avg` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub column: String,
    pub kind: ColumnKind,
    pub min: f64,
    pub max: f64,
    pub avg: Option<f64>,
    /// Distinct raw values, compared exactly.
    pub unique_count: usize,
    /// Non-empty values the statistics were computed over.
    pub count: usize,
}

/// Compute statistics over the non-empty values of `column`.
///
/// Returns `Ok(None)` when the column has no non-empty values.
pub fn column_stats(table: &Table, column: &str) -> SiftResult<Option<ColumnStats>> {
    let values: Vec<&str> = table
        .column_values(column)
        .map_err(SiftError::from_sheet_lookup)?
        .filter(|v| !is_empty_cell(v))
        .collect();

    if values.is_empty() {
        return Ok(None);
    }

    let unique_count = values.iter().collect::<HashSet<_>>().len();
    let numbers: Option<Vec<f64>> = values.iter().map(|v| try_parse_number(v)).collect();

    let stats = match numbers {
        Some(numbers) => {
            let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
            let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let avg = numbers.iter().sum::<f64>() / numbers.len() as f64;
            ColumnStats {
                column: column.to_string(),
                kind: ColumnKind::Numeric,
                min: round2(min),
                max: round2(max),
                avg: Some(round2(avg)),
                unique_count,
                count: values.len(),
            }
        }
        None => {
            let lengths = values.iter().map(|v| v.chars().count());
            let min = lengths.clone().min().unwrap_or(0);
            let max = lengths.max().unwrap_or(0);
            ColumnStats {
                column: column.to_string(),
                kind: ColumnKind::Text,
                min: min as f64,
                max: max as f64,
                avg: None,
                unique_count,
                count: values.len(),
            }
        }
    };
    Ok(Some(stats))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::from_rows(vec![
            vec!["price", "city", "blank", "mixed"],
            vec!["1.005", "NYC", "", "1"],
            vec!["2", "Los Angeles", "", "two"],
            vec!["", "nyc", "", "3"],
            vec!["4.5", "NYC", "", ""],
        ])
        .unwrap()
    }

    #[test]
    fn test_numeric_column() {
        let stats = column_stats(&table(), "price").unwrap().unwrap();
        assert_eq!(stats.kind, ColumnKind::Numeric);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.5);
        assert_eq!(stats.avg, Some(2.5));
        assert_eq!(stats.unique_count, 3);
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn test_text_column_uses_lengths() {
        let stats = column_stats(&table(), "city").unwrap().unwrap();
        assert_eq!(stats.kind, ColumnKind::Text);
        assert_eq!(stats.min, 3.0);
        assert_eq!(stats.max, 11.0);
        assert_eq!(stats.avg, None);
        // case-sensitive distinctness
        assert_eq!(stats.unique_count, 3);
    }

    #[test]
    fn test_one_text_value_makes_column_text() {
        let stats = column_stats(&table(), "mixed").unwrap().unwrap();
        assert_eq!(stats.kind, ColumnKind::Text);
        assert_eq!(stats.kind.to_string(), "text");
    }

    #[test]
    fn test_units_after_numbers_stay_numeric() {
        let table = Table::from_rows(vec![vec!["pct"], vec!["10%"], vec!["20%"], vec!["35%"]])
            .unwrap();
        let stats = column_stats(&table, "pct").unwrap().unwrap();
        assert_eq!(stats.kind, ColumnKind::Numeric);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 35.0);
        assert_eq!(stats.avg, Some(21.67));
        assert_eq!(stats.unique_count, 3);
    }

    #[test]
    fn test_no_data() {
        assert_eq!(column_stats(&table(), "blank").unwrap(), None);
    }

    #[test]
    fn test_unknown_column() {
        assert!(matches!(
            column_stats(&table(), "zip"),
            Err(SiftError::ColumnNotFound(_))
        ));
    }
}
