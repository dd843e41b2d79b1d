//! One loaded table plus its view state.

use crate::aggregate::{aggregate, Aggregation, Bucket};
use crate::clean::{self, CaseKind, ValidationReport};
use crate::config::EngineConfig;
use crate::criteria::{DatePreset, FilterCriteria};
use crate::error::{SiftError, SiftResult};
use crate::filter::{apply_filters, Predicate};
use crate::replace::{FindReplace, ReplacePreview};
use crate::sort::{sort_indices, SortConfig};
use crate::stats::{column_stats, ColumnStats};
use chrono::NaiveDate;
use sheetsift_sheet::{ExportFormat, Row, Table, EXPORT_SHEET_NAME};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// First rows of the filtered view, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWindow<'a> {
    /// Table positions of the rows shown.
    pub rows: &'a [usize],
    /// Filtered rows left out of the window.
    pub remaining: usize,
}

/// A loaded table with its filter, sort, visibility and validation state.
///
/// The table itself is the original row set. The filtered view is a list of
/// row positions into it, recomputed in full after every criteria, sort or
/// data change.
///
/// ```
/// use sheetsift_core::{FilterCriteria, Session};
/// use sheetsift_sheet::Table;
///
/// let table = Table::from_rows(vec![
///     vec!["name", "age"],
///     vec!["Alice", "30"],
///     vec!["Bob", "25"],
/// ])
/// .unwrap();
/// let mut session = Session::new(table).unwrap();
///
/// session
///     .set_criteria(FilterCriteria { global_search: "ali".into(), ..Default::default() })
///     .unwrap();
/// assert_eq!(session.filtered_count(), 1);
/// assert_eq!(session.total_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    table: Table,
    config: EngineConfig,
    criteria: FilterCriteria,
    sort: SortConfig,
    hidden: BTreeSet<String>,
    /// Table positions flagged by the last validation run.
    markers: BTreeSet<usize>,
    filtered: Vec<usize>,
    /// Fixed evaluation date; `None` uses the local date.
    today: Option<NaiveDate>,
}

impl Session {
    /// Start a session with the default configuration.
    pub fn new(table: Table) -> SiftResult<Self> {
        Self::with_config(table, EngineConfig::default())
    }

    /// Start a session with a validated configuration.
    pub fn with_config(table: Table, config: EngineConfig) -> SiftResult<Self> {
        config.validate()?;
        let mut session = Self {
            table: Table::default(),
            config,
            criteria: FilterCriteria::default(),
            sort: SortConfig::default(),
            hidden: BTreeSet::new(),
            markers: BTreeSet::new(),
            filtered: Vec::new(),
            today: None,
        };
        session.load(table)?;
        Ok(session)
    }

    /// Decode a file and start a session over it.
    pub fn open<P: AsRef<Path>>(path: P, config: EngineConfig) -> SiftResult<Self> {
        let table = Table::from_path(path)?;
        Self::with_config(table, config)
    }

    /// Replace the loaded table, discarding all view state.
    pub fn load(&mut self, table: Table) -> SiftResult<()> {
        tracing::info!(
            name = table.name(),
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded table"
        );
        self.table = table;
        self.criteria = FilterCriteria::default();
        self.sort = SortConfig::default();
        self.hidden.clear();
        self.markers.clear();
        self.recompute()
    }

    // ===== Accessors =====

    /// The original row set.
    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub fn sort_config(&self) -> &SortConfig {
        &self.sort
    }

    /// Date that relative date presets resolve against.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Pin the evaluation date, or pass `None` to follow the clock.
    pub fn set_today(&mut self, today: Option<NaiveDate>) -> SiftResult<()> {
        self.today = today;
        self.recompute()
    }

    /// Rows in the original set.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.table.row_count()
    }

    /// Rows in the filtered view.
    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    /// Table positions of the filtered view, in display order.
    #[must_use]
    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered
    }

    /// Rows of the filtered view, in display order.
    pub fn filtered_rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.filtered.iter().filter_map(|&i| self.table.row(i))
    }

    /// The first `render_limit` rows of the filtered view.
    #[must_use]
    pub fn display_window(&self) -> DisplayWindow<'_> {
        let shown = self.filtered.len().min(self.config.render_limit);
        DisplayWindow {
            rows: &self.filtered[..shown],
            remaining: self.filtered.len() - shown,
        }
    }

    /// Columns whose values all parse as numbers.
    #[must_use]
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.table.numeric_columns()
    }

    // ===== Filtering & sorting =====

    /// Replace every filter control at once.
    ///
    /// Criteria naming a column the table lacks are rejected and the current
    /// criteria stay in place.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> SiftResult<()> {
        Predicate::compile(&self.table, &criteria, self.today())?;
        self.criteria = criteria;
        self.recompute()
    }

    /// Select a date range preset, filling in its concrete bounds.
    pub fn set_date_preset(&mut self, preset: Option<DatePreset>) -> SiftResult<()> {
        let mut criteria = self.criteria.clone();
        criteria.apply_date_preset(preset, self.today());
        self.set_criteria(criteria)
    }

    /// Clear every filter control.
    pub fn reset_filters(&mut self) -> SiftResult<()> {
        self.criteria = FilterCriteria::default();
        self.recompute()
    }

    /// Header click: sort by `column`, flipping direction when it is already
    /// the sort key.
    pub fn toggle_sort(&mut self, column: &str) -> SiftResult<()> {
        self.table
            .column_index(column)
            .map_err(SiftError::from_sheet_lookup)?;
        self.sort.toggle(column);
        self.recompute()
    }

    /// Set the sort key directly.
    pub fn set_sort(&mut self, sort: SortConfig) -> SiftResult<()> {
        if let Some(column) = &sort.column {
            self.table
                .column_index(column)
                .map_err(SiftError::from_sheet_lookup)?;
        }
        self.sort = sort;
        self.recompute()
    }

    /// Recompute the filtered view from scratch.
    pub fn refresh(&mut self) -> SiftResult<()> {
        self.recompute()
    }

    fn recompute(&mut self) -> SiftResult<()> {
        let mut indices = apply_filters(&self.table, &self.criteria, self.today())?;
        sort_indices(&self.table, &mut indices, &self.sort)?;
        self.filtered = indices;
        Ok(())
    }

    // ===== Column visibility =====

    /// Column names not hidden, in table order.
    #[must_use]
    pub fn visible_columns(&self) -> Vec<&str> {
        self.table
            .columns()
            .iter()
            .filter(|c| !self.hidden.contains(c.as_str()))
            .map(String::as_str)
            .collect()
    }

    #[must_use]
    pub fn is_hidden(&self, column: &str) -> bool {
        self.hidden.contains(column)
    }

    pub fn hide_column(&mut self, column: &str) -> SiftResult<()> {
        self.table
            .column_index(column)
            .map_err(SiftError::from_sheet_lookup)?;
        self.hidden.insert(column.to_string());
        Ok(())
    }

    pub fn show_column(&mut self, column: &str) {
        self.hidden.remove(column);
    }

    pub fn show_all_columns(&mut self) {
        self.hidden.clear();
    }

    pub fn hide_all_columns(&mut self) {
        self.hidden = self.table.columns().iter().cloned().collect();
    }

    fn visible_positions(&self) -> Vec<usize> {
        self.table
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, c)| !self.hidden.contains(c.as_str()))
            .map(|(i, _)| i)
            .collect()
    }

    // ===== Statistics & charts =====

    /// Statistics for one column over the original set.
    pub fn column_stats(&self, column: &str) -> SiftResult<Option<ColumnStats>> {
        column_stats(&self.table, column)
    }

    /// Buckets for one column over the filtered view.
    pub fn aggregate(&self, column: &str, kind: Aggregation) -> SiftResult<Vec<Bucket>> {
        aggregate(
            &self.table,
            &self.filtered,
            column,
            kind,
            self.config.top_categories,
            self.config.histogram_bins,
        )
    }

    // ===== Cleaning =====

    pub fn remove_duplicates(&mut self) -> SiftResult<usize> {
        let removed = clean::remove_duplicates(&mut self.table);
        self.after_mutation()?;
        Ok(removed)
    }

    pub fn remove_empty_rows(&mut self) -> SiftResult<usize> {
        let removed = clean::remove_empty_rows(&mut self.table);
        self.after_mutation()?;
        Ok(removed)
    }

    pub fn trim_whitespace(&mut self) -> SiftResult<usize> {
        let changed = clean::trim_whitespace(&mut self.table);
        self.after_mutation()?;
        Ok(changed)
    }

    /// Change the case of the column picked in the column filter control.
    pub fn transform_case(&mut self, kind: CaseKind) -> SiftResult<usize> {
        let column = self.criteria.column.clone();
        let changed = clean::transform_case(&mut self.table, column.as_deref(), kind)?;
        self.after_mutation()?;
        Ok(changed)
    }

    /// Flag rows holding malformed email values, replacing earlier flags.
    pub fn validate_emails(&mut self) -> SiftResult<ValidationReport> {
        let report = clean::validate_emails(&self.table)?;
        self.markers.clone_from(&report.rows);
        Ok(report)
    }

    /// Table positions flagged by the last validation run.
    #[must_use]
    pub fn flagged_rows(&self) -> &BTreeSet<usize> {
        &self.markers
    }

    /// Whether the row at table position `row` is flagged.
    #[must_use]
    pub fn is_flagged(&self, row: usize) -> bool {
        self.markers.contains(&row)
    }

    // ===== Find & replace =====

    /// Dry run of a find & replace over the original set.
    pub fn preview_replace(&self, request: &FindReplace) -> SiftResult<ReplacePreview> {
        request.preview(&self.table, self.config.preview_samples)
    }

    /// Apply a find & replace to the original set.
    pub fn replace(&mut self, request: &FindReplace) -> SiftResult<usize> {
        let replaced = request.apply(&mut self.table)?;
        self.after_mutation()?;
        Ok(replaced)
    }

    fn after_mutation(&mut self) -> SiftResult<()> {
        self.markers.clear();
        self.recompute()
    }

    // ===== Export =====

    /// The filtered view with every column, named for export.
    #[must_use]
    pub fn export_table(&self) -> Table {
        let columns: Vec<usize> = (0..self.table.column_count()).collect();
        let mut table = self.table.select(&self.filtered, &columns);
        table.set_name(EXPORT_SHEET_NAME);
        table
    }

    /// Encode the filtered view.
    pub fn export(&self, format: ExportFormat) -> SiftResult<Vec<u8>> {
        Ok(self.export_table().to_bytes(format)?)
    }

    /// Write the filtered view into `dir` under its dated download name.
    pub fn export_to_dir<P: AsRef<Path>>(&self, dir: P, format: ExportFormat) -> SiftResult<PathBuf> {
        let path = dir.as_ref().join(format.file_name(self.today()));
        std::fs::write(&path, self.export(format)?)?;
        tracing::info!(path = %path.display(), rows = self.filtered.len(), "exported view");
        Ok(path)
    }

    /// The display window restricted to visible columns.
    #[must_use]
    pub fn preview_table(&self) -> Table {
        self.table
            .select(self.display_window().rows, &self.visible_positions())
    }

    /// Tab-separated text of the filtered view, visible columns only.
    #[must_use]
    pub fn clipboard_text(&self) -> String {
        self.table
            .select(&self.filtered, &self.visible_positions())
            .to_clipboard_text()
    }
}
