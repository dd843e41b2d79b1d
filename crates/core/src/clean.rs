//! Cleaning transforms.
//!
//! Every transform mutates the table in place and reports how many rows or
//! cells it touched. Email validation only reports; it never mutates.

use crate::error::{SiftError, SiftResult};
use crate::pattern::build_regex;
use serde::{Deserialize, Serialize};
use sheetsift_sheet::{Row, Table};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Shape of a plausible email address.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

// ===== Row removal =====

/// Remove rows whose cells equal an earlier row's cells, column by column.
/// The first occurrence is kept. Returns the number of rows removed.
pub fn remove_duplicates(table: &mut Table) -> usize {
    let mut seen: HashSet<Row> = HashSet::with_capacity(table.row_count());
    let removed = table.retain_rows(|row| seen.insert(row.clone()));
    tracing::info!(removed, "removed duplicate rows");
    removed
}

/// Remove rows in which every cell is empty. Returns the number removed.
pub fn remove_empty_rows(table: &mut Table) -> usize {
    let removed = table.retain_rows(|row| !row.is_blank());
    tracing::info!(removed, "removed empty rows");
    removed
}

// ===== Cell rewrites =====

/// Strip leading and trailing whitespace from every cell.
///
/// Returns the number of cells that actually changed.
pub fn trim_whitespace(table: &mut Table) -> usize {
    let mut changed = 0;
    for row in table.rows_mut() {
        for cell in row.cells_mut() {
            let trimmed = cell.trim();
            if trimmed.len() != cell.len() {
                *cell = trimmed.to_string();
                changed += 1;
            }
        }
    }
    tracing::info!(changed, "trimmed whitespace");
    changed
}

/// Target case for [`transform_case`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseKind {
    Upper,
    Lower,
}

impl CaseKind {
    fn apply(self, value: &str) -> String {
        match self {
            CaseKind::Upper => value.to_uppercase(),
            CaseKind::Lower => value.to_lowercase(),
        }
    }
}

impl fmt::Display for CaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseKind::Upper => f.write_str("upper"),
            CaseKind::Lower => f.write_str("lower"),
        }
    }
}

/// Upper- or lowercase every cell of one column.
///
/// `column` is the currently selected target; `None` fails with
/// [`SiftError::NoColumnSelected`] before anything is touched. Returns the
/// number of cells whose text changed.
pub fn transform_case(table: &mut Table, column: Option<&str>, kind: CaseKind) -> SiftResult<usize> {
    let column = column.ok_or(SiftError::NoColumnSelected)?;
    let index = table
        .column_index(column)
        .map_err(SiftError::from_sheet_lookup)?;

    let mut changed = 0;
    for row in table.rows_mut() {
        let transformed = kind.apply(row.get(index));
        if transformed != row.get(index) {
            row.set(index, transformed);
            changed += 1;
        }
    }
    tracing::info!(column, %kind, changed, "transformed case");
    Ok(changed)
}

// ===== Validation =====

/// Result of an email validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Positions (in the table) of rows holding at least one invalid value.
    pub rows: BTreeSet<usize>,
    /// Invalid values found across all cells.
    pub invalid_count: usize,
}

impl ValidationReport {
    /// True when nothing was flagged.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.invalid_count == 0
    }
}

/// Flag values that contain `@` but are not shaped like `local@domain.tld`.
pub fn validate_emails(table: &Table) -> SiftResult<ValidationReport> {
    let email = build_regex(EMAIL_PATTERN, true)?;
    let mut report = ValidationReport::default();

    for (index, row) in table.rows().iter().enumerate() {
        for cell in row.cells() {
            if cell.contains('@') && !email.is_match(cell) {
                report.rows.insert(index);
                report.invalid_count += 1;
            }
        }
    }
    tracing::info!(
        invalid = report.invalid_count,
        rows = report.rows.len(),
        "validated emails"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(table: &Table) -> Vec<Vec<String>> {
        table.rows().iter().map(|r| r.cells().to_vec()).collect()
    }

    #[test]
    fn test_remove_duplicates_keeps_first() {
        let mut table = Table::from_rows(vec![
            vec!["a", "b"],
            vec!["1", "x"],
            vec!["2", "y"],
            vec!["1", "x"],
            vec!["1", "X"],
        ])
        .unwrap();
        assert_eq!(remove_duplicates(&mut table), 1);
        assert_eq!(
            cells(&table),
            vec![vec!["1", "x"], vec!["2", "y"], vec!["1", "X"]]
        );
        assert_eq!(remove_duplicates(&mut table), 0);
    }

    #[test]
    fn test_remove_empty_rows() {
        let mut table =
            Table::from_rows(vec![vec!["a", "b"], vec!["", ""], vec!["x", ""]]).unwrap();
        assert_eq!(remove_empty_rows(&mut table), 1);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.value(0, "a"), Some("x"));
    }

    #[test]
    fn test_whitespace_only_row_is_not_empty() {
        let mut table = Table::from_rows(vec![vec!["a"], vec![" "]]).unwrap();
        assert_eq!(remove_empty_rows(&mut table), 0);
    }

    #[test]
    fn test_trim_counts_changed_cells_only() {
        let mut table = Table::from_rows(vec![
            vec!["a", "b"],
            vec![" x", "y"],
            vec!["z\t", "\n w \n"],
        ])
        .unwrap();
        assert_eq!(trim_whitespace(&mut table), 3);
        assert_eq!(cells(&table), vec![vec!["x", "y"], vec!["z", "w"]]);
        assert_eq!(trim_whitespace(&mut table), 0);
    }

    #[test]
    fn test_transform_case() {
        let mut table =
            Table::from_rows(vec![vec!["name", "id"], vec!["Ann", "a1"], vec!["BOB", "b2"]])
                .unwrap();
        assert_eq!(
            transform_case(&mut table, Some("name"), CaseKind::Upper).unwrap(),
            1
        );
        assert_eq!(table.value(0, "name"), Some("ANN"));
        assert_eq!(table.value(0, "id"), Some("a1"));

        assert_eq!(
            transform_case(&mut table, Some("name"), CaseKind::Lower).unwrap(),
            2
        );
        assert_eq!(table.value(1, "name"), Some("bob"));
    }

    #[test]
    fn test_transform_case_requires_column() {
        let mut table = Table::from_rows(vec![vec!["name"], vec!["Ann"]]).unwrap();
        let result = transform_case(&mut table, None, CaseKind::Upper);
        assert!(matches!(result, Err(SiftError::NoColumnSelected)));
        assert_eq!(table.value(0, "name"), Some("Ann"));

        let result = transform_case(&mut table, Some("nope"), CaseKind::Upper);
        assert!(matches!(result, Err(SiftError::ColumnNotFound(_))));
    }

    #[test]
    fn test_validate_emails() {
        let table = Table::from_rows(vec![
            vec!["email", "backup"],
            vec!["good@example.com", ""],
            vec!["bad@example", "also@bad"],
            vec!["no at sign", "x@y.z"],
            vec!["two@@example.com", ""],
        ])
        .unwrap();
        let report = validate_emails(&table).unwrap();
        assert_eq!(report.invalid_count, 3);
        assert_eq!(report.rows.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert!(!report.is_clean());
    }
}
