//! Predicate evaluator.
//!
//! Compiles a [`FilterCriteria`] against a table's columns into a
//! [`Predicate`] whose clauses combine with logical AND. A clause with no
//! active constraint is absent from the compiled predicate and so is
//! vacuously true.

use crate::criteria::{DateRange, FilterCriteria};
use crate::error::{SiftError, SiftResult};
use crate::pattern::{contains_ignore_case, Pattern};
use chrono::NaiveDate;
use sheetsift_sheet::{try_parse_date, try_parse_number, Row, Table};

/// Composite row predicate.
#[derive(Debug, Clone, Default)]
pub struct Predicate {
    global: Option<Pattern>,
    /// Lowercased term; any cell containing it passes.
    email: Option<String>,
    /// Column index and lowercased term.
    column: Option<(usize, String)>,
    numeric: Option<NumericClause>,
    date: Option<(usize, DateRange)>,
}

#[derive(Debug, Clone, Copy)]
struct NumericClause {
    column: usize,
    min: Option<f64>,
    max: Option<f64>,
}

impl NumericClause {
    fn contains(self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

impl Predicate {
    /// Compile criteria for `table`, resolving any date preset against `today`.
    ///
    /// An invalid global regex degrades to a case-insensitive substring
    /// match. A criteria column missing from the table is an error.
    pub fn compile(table: &Table, criteria: &FilterCriteria, today: NaiveDate) -> SiftResult<Self> {
        let lookup = |name: &str| table.column_index(name).map_err(SiftError::from_sheet_lookup);

        let global = (!criteria.global_search.is_empty()).then(|| {
            Pattern::compile_or_literal(
                &criteria.global_search,
                criteria.regex_enabled,
                criteria.case_sensitive,
            )
        });

        let email = (!criteria.email_filter.is_empty()).then(|| criteria.email_filter.to_lowercase());

        let column = match &criteria.column {
            Some(name) if !criteria.column_value.is_empty() => {
                Some((lookup(name)?, criteria.column_value.to_lowercase()))
            }
            _ => None,
        };

        let numeric = match &criteria.numeric_column {
            Some(name) => Some(NumericClause {
                column: lookup(name)?,
                min: criteria.numeric_min,
                max: criteria.numeric_max,
            }),
            None => None,
        };

        let range = criteria.date_range(today);
        let date = match &criteria.date_column {
            Some(name) if !range.is_open() => Some((lookup(name)?, range)),
            _ => None,
        };

        Ok(Self {
            global,
            email,
            column,
            numeric,
            date,
        })
    }

    /// True when every clause is inactive.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.global.is_none()
            && self.email.is_none()
            && self.column.is_none()
            && self.numeric.is_none()
            && self.date.is_none()
    }

    /// Evaluate the predicate against one row.
    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        if let Some(pattern) = &self.global {
            if !pattern.is_match(&row.joined(" ")) {
                return false;
            }
        }

        if let Some(term) = &self.email {
            if !row.cells().iter().any(|cell| contains_ignore_case(cell, term)) {
                return false;
            }
        }

        if let Some((index, term)) = &self.column {
            if !contains_ignore_case(row.get(*index), term) {
                return false;
            }
        }

        if let Some(clause) = self.numeric {
            match try_parse_number(row.get(clause.column)) {
                Some(value) if clause.contains(value) => {}
                _ => return false,
            }
        }

        if let Some((index, range)) = &self.date {
            match try_parse_date(row.get(*index)) {
                Some(date) if range.contains(date) => {}
                _ => return false,
            }
        }

        true
    }

    /// Indices of the rows of `table` that match, in table order.
    #[must_use]
    pub fn filter(&self, table: &Table) -> Vec<usize> {
        if self.is_trivial() {
            return (0..table.row_count()).collect();
        }
        table
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| self.matches(row))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Compile `criteria` and return the indices of matching rows.
pub fn apply_filters(
    table: &Table,
    criteria: &FilterCriteria,
    today: NaiveDate,
) -> SiftResult<Vec<usize>> {
    let predicate = Predicate::compile(table, criteria, today)?;
    let matched = predicate.filter(table);
    tracing::debug!(
        matched = matched.len(),
        total = table.row_count(),
        "filters applied"
    );
    Ok(matched)
}
