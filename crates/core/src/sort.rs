//! Sort engine.

use crate::error::{SiftError, SiftResult};
use feruca::Collator;
use serde::{Deserialize, Serialize};
use sheetsift_sheet::{try_parse_number, Table};
use std::cmp::Ordering;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active sort key. No column means natural (original) order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub column: Option<String>,
    pub direction: SortDirection,
}

impl SortConfig {
    /// Sort by `column` ascending.
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            direction: SortDirection::Ascending,
        }
    }

    /// Sort by `column` descending.
    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            direction: SortDirection::Descending,
        }
    }

    /// Header-click behavior: the same column flips direction, a new column
    /// starts ascending.
    pub fn toggle(&mut self, column: &str) {
        if self.column.as_deref() == Some(column) {
            self.direction = self.direction.flipped();
        } else {
            self.column = Some(column.to_string());
            self.direction = SortDirection::Ascending;
        }
    }

    /// Drop the sort key.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Sort key of one cell: empty cells first, then numbers, then text.
///
/// Numbers compare by value and fall back to their text when the values tie
/// (`"7"` before `"7x"`, `"2024-02-01"` before `"2024-03-01"`). Text compares
/// with Unicode collation over the lowercased value.
#[derive(Debug, Clone, PartialEq)]
enum CellKey {
    Empty,
    Number(f64, String),
    Text(String),
}

impl CellKey {
    fn new(value: &str) -> Self {
        let lower = value.to_lowercase();
        if lower.is_empty() {
            return CellKey::Empty;
        }
        match try_parse_number(&lower) {
            Some(n) => CellKey::Number(n, lower),
            None => CellKey::Text(lower),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellKey::Empty => 0,
            CellKey::Number(..) => 1,
            CellKey::Text(_) => 2,
        }
    }
}

/// Total order over cell values, reusable across a whole sort.
#[derive(Debug, Default)]
pub struct CellComparator {
    collator: Collator,
}

impl CellComparator {
    /// Comparator using the root collation order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare two raw cell values.
    pub fn compare(&mut self, a: &str, b: &str) -> Ordering {
        self.compare_keys(&CellKey::new(a), &CellKey::new(b))
    }

    fn compare_keys(&mut self, a: &CellKey, b: &CellKey) -> Ordering {
        match (a, b) {
            (CellKey::Number(x, a), CellKey::Number(y, b)) => x
                .total_cmp(y)
                .then_with(|| self.collator.collate(a.as_str(), b.as_str())),
            (CellKey::Text(a), CellKey::Text(b)) => self.collator.collate(a.as_str(), b.as_str()),
            _ => a.rank().cmp(&b.rank()),
        }
    }
}

/// Compare two raw cell values.
///
/// Both values are lowercased. Empty cells sort first and numbers before
/// text; numbers compare by value, text by Unicode collation. This is a
/// total order, so mixed columns sort consistently.
#[must_use]
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    CellComparator::new().compare(a, b)
}

/// Reorder `indices` (row positions in `table`) by `config`.
///
/// The sort is stable: rows with equal keys keep their relative order in
/// either direction.
pub fn sort_indices(table: &Table, indices: &mut [usize], config: &SortConfig) -> SiftResult<()> {
    let Some(column) = &config.column else {
        return Ok(());
    };
    let col = table
        .column_index(column)
        .map_err(SiftError::from_sheet_lookup)?;

    let mut keyed: Vec<(CellKey, usize)> = indices
        .iter()
        .map(|&row| (CellKey::new(table.row(row).map_or("", |r| r.get(col))), row))
        .collect();

    let mut comparator = CellComparator::new();
    match config.direction {
        SortDirection::Ascending => keyed.sort_by(|a, b| comparator.compare_keys(&a.0, &b.0)),
        SortDirection::Descending => keyed.sort_by(|a, b| comparator.compare_keys(&b.0, &a.0)),
    }
    for (slot, (_, row)) in indices.iter_mut().zip(keyed) {
        *slot = row;
    }
    Ok(())
}
