use crate::cell::{is_empty_cell, try_parse_number};
use crate::error::{Result, SheetError};
use indexmap::IndexMap;
use std::collections::HashSet;
use serde::{Deserialize, Serialize};

/// Default name for a freshly decoded table.
pub const DEFAULT_TABLE_NAME: &str = "Sheet1";

/// One record of a table: cell strings aligned by position to the table columns.
///
/// A row always holds exactly one cell per column; missing source cells are
/// stored as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    /// Create a row from its cells
    #[must_use]
    pub fn new(cells: Vec<String>) -> Self {
        Row { cells }
    }

    /// Get the cell at a column position, or `""` if the row is shorter
    #[must_use]
    pub fn get(&self, index: usize) -> &str {
        self.cells.get(index).map_or("", String::as_str)
    }

    /// Replace the cell at a column position. Returns `false` if out of range.
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) => {
                *cell = value.into();
                true
            }
            None => false,
        }
    }

    /// All cells in column order
    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Mutable access to the cells in column order
    pub fn cells_mut(&mut self) -> &mut [String] {
        &mut self.cells
    }

    /// Number of cells in the row
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the row has no cells at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when every cell is empty
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| is_empty_cell(c))
    }

    /// Join every cell value with a separator
    #[must_use]
    pub fn joined(&self, separator: &str) -> String {
        self.cells.join(separator)
    }

    fn fit_to(mut self, width: usize) -> Self {
        self.cells.resize(width, String::new());
        self
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Row::new(iter.into_iter().map(Into::into).collect())
    }
}

/// A parsed table: ordered column names plus the authoritative rows.
///
/// Column names keep source order and are not deduplicated. Name lookups
/// resolve to the first column carrying that name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Default for Table {
    fn default() -> Self {
        Table::new(Vec::new())
    }
}

impl Table {
    /// Create an empty table with the given columns
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            name: DEFAULT_TABLE_NAME.to_string(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from decoded rows where row 0 holds the headers.
    ///
    /// Short rows are padded with empty strings; cells beyond the header
    /// width are dropped.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::EmptyInput` if there is no header row.
    ///
    /// # Example
    /// ```
    /// use sheetsift_sheet::Table;
    ///
    /// let table = Table::from_rows(vec![
    ///     vec!["name", "age"],
    ///     vec!["Alice", "30"],
    ///     vec!["Bob"],
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(table.row_count(), 2);
    /// assert_eq!(table.value(1, "age"), Some(""));
    /// ```
    pub fn from_rows<S: Into<String>>(rows: Vec<Vec<S>>) -> Result<Self> {
        let mut iter = rows.into_iter();
        let header = iter
            .next()
            .ok_or_else(|| SheetError::EmptyInput("no header row".to_string()))?;
        let columns: Vec<String> = header.into_iter().map(Into::into).collect();

        let mut table = Table::new(columns);
        for row in iter {
            table.push_row(row);
        }
        Ok(table)
    }

    /// Get the table name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the table name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Column names in order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows (the header is not a row)
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row, fitting it to the column width
    pub fn push_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        let row: Row = cells.into_iter().collect();
        self.rows.push(row.fit_to(self.columns.len()));
    }

    /// All rows in order
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Mutable access to the rows. Row count and order cannot change through this.
    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// Get a row by index
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Keep only rows matching the predicate. Returns the number removed.
    pub fn retain_rows<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&Row) -> bool,
    {
        let before = self.rows.len();
        self.rows.retain(|row| keep(row));
        before - self.rows.len()
    }

    /// Resolve a column name to its position
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| SheetError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    /// Get a cell by row index and column name
    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column).ok()?;
        self.rows.get(row).map(|r| r.get(col))
    }

    /// Set a cell by row index and column name
    pub fn set_value(&mut self, row: usize, column: &str, value: impl Into<String>) -> Result<()> {
        let col = self.column_index(column)?;
        let count = self.rows.len();
        let target = self
            .rows
            .get_mut(row)
            .ok_or(SheetError::RowIndexOutOfBounds { index: row, count })?;
        target.set(col, value);
        Ok(())
    }

    /// Iterate one column's values in row order
    pub fn column_values(&self, column: &str) -> Result<impl Iterator<Item = &str> + '_> {
        let col = self.column_index(column)?;
        Ok(self.rows.iter().map(move |row| row.get(col)))
    }

    /// Columns whose non-empty values all parse as numbers.
    ///
    /// Columns with no values at all are not listed.
    #[must_use]
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(col, _)| {
                let mut values = self
                    .rows
                    .iter()
                    .map(|row| row.get(*col))
                    .filter(|v| !is_empty_cell(v))
                    .peekable();
                values.peek().is_some() && values.all(|v| try_parse_number(v).is_some())
            })
            .map(|(_, name)| name.as_str())
            .collect()
    }

    /// Copy a subset of rows and columns into a new table.
    ///
    /// Row and column indices are used in the order given; out-of-range
    /// indices are skipped.
    #[must_use]
    pub fn select(&self, rows: &[usize], columns: &[usize]) -> Table {
        let columns: Vec<usize> = columns
            .iter()
            .copied()
            .filter(|&c| c < self.columns.len())
            .collect();

        let mut table = Table::new(columns.iter().map(|&c| self.columns[c].clone()).collect());
        table.name.clone_from(&self.name);
        table.rows = rows
            .iter()
            .filter_map(|&r| self.rows.get(r))
            .map(|row| columns.iter().map(|&c| row.get(c).to_string()).collect())
            .collect();
        table
    }

    /// Convert to a list of records (column name -> value).
    ///
    /// Every column is kept. A repeated column name gets a numeric suffix
    /// (`name`, `name_2`, `name_3`), skipping suffixes already taken by other
    /// columns.
    #[must_use]
    pub fn to_records(&self) -> Vec<IndexMap<String, String>> {
        let keys = self.record_keys();
        self.rows
            .iter()
            .map(|row| {
                keys.iter()
                    .enumerate()
                    .map(|(i, key)| (key.clone(), row.get(i).to_string()))
                    .collect()
            })
            .collect()
    }

    /// Unique record keys, one per column.
    fn record_keys(&self) -> Vec<String> {
        let mut used: HashSet<String> = self.columns.iter().cloned().collect();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut keys = Vec::with_capacity(self.columns.len());

        for name in &self.columns {
            if seen.insert(name.as_str()) {
                keys.push(name.clone());
                continue;
            }
            let mut n = 2;
            while used.contains(&format!("{name}_{n}")) {
                n += 1;
            }
            let key = format!("{name}_{n}");
            used.insert(key.clone());
            keys.push(key);
        }
        keys
    }

    /// Convert to a 2D array with the header row first
    #[must_use]
    pub fn to_array(&self) -> Vec<Vec<String>> {
        std::iter::once(self.columns.clone())
            .chain(self.rows.iter().map(|r| r.cells().to_vec()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(vec![
            vec!["name", "age", "city"],
            vec!["Alice", "30", "NYC"],
            vec!["Bob", "25"],
            vec!["Carol", "41", "LA", "extra"],
        ])
        .unwrap()
    }

    #[test]
    fn test_from_rows_pads_and_truncates() {
        let table = sample();
        assert_eq!(table.columns(), &["name", "age", "city"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.value(1, "city"), Some(""));
        assert_eq!(table.row(2).unwrap().len(), 3);
    }

    #[test]
    fn test_from_rows_empty_input() {
        let result = Table::from_rows(Vec::<Vec<String>>::new());
        assert!(matches!(result, Err(SheetError::EmptyInput(_))));
    }

    #[test]
    fn test_header_only_table() {
        let table = Table::from_rows(vec![vec!["a", "b"]]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_duplicate_columns_are_kept() {
        let table = Table::from_rows(vec![vec!["x", "x"], vec!["1", "2"]]).unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column_index("x").unwrap(), 0);
        assert_eq!(table.value(0, "x"), Some("1"));

        let records = table.to_records();
        assert_eq!(records[0].get("x").map(String::as_str), Some("1"));
        assert_eq!(records[0].get("x_2").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_record_keys_skip_taken_suffixes() {
        let table = Table::from_rows(vec![
            vec!["x", "x_2", "x", "x"],
            vec!["a", "b", "c", "d"],
        ])
        .unwrap();
        let records = table.to_records();
        let keys: Vec<&str> = records[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["x", "x_2", "x_3", "x_4"]);
        let values: Vec<&str> = records[0].values().map(String::as_str).collect();
        assert_eq!(values, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_set_value() {
        let mut table = sample();
        table.set_value(0, "age", "31").unwrap();
        assert_eq!(table.value(0, "age"), Some("31"));
        assert!(matches!(
            table.set_value(0, "missing", "x"),
            Err(SheetError::ColumnNotFound { .. })
        ));
        assert!(matches!(
            table.set_value(9, "age", "x"),
            Err(SheetError::RowIndexOutOfBounds { index: 9, count: 3 })
        ));
    }

    #[test]
    fn test_numeric_columns() {
        let table = Table::from_rows(vec![
            vec!["id", "score", "label", "blank"],
            vec!["1", "2.5", "a", ""],
            vec!["2", "", "b", ""],
        ])
        .unwrap();
        assert_eq!(table.numeric_columns(), vec!["id", "score"]);
    }

    #[test]
    fn test_select() {
        let table = sample();
        let subset = table.select(&[2, 0], &[2, 0]);
        assert_eq!(subset.columns(), &["city", "name"]);
        assert_eq!(subset.row(0).unwrap().cells(), &["LA", "Carol"]);
        assert_eq!(subset.row(1).unwrap().cells(), &["NYC", "Alice"]);
    }

    #[test]
    fn test_retain_rows() {
        let mut table = sample();
        let removed = table.retain_rows(|row| row.get(0) != "Bob");
        assert_eq!(removed, 1);
        assert_eq!(table.row_count(), 2);
    }
}
