//! Find & replace with a non-mutating preview.

use crate::error::{SiftError, SiftResult};
use crate::pattern::build_regex;
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use sheetsift_sheet::Table;
use std::fmt;

/// Columns searched by a find & replace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReplaceScope {
    #[default]
    AllColumns,
    Column(String),
}

/// A find & replace request.
///
/// ```
/// use sheetsift_core::FindReplace;
/// use sheetsift_sheet::Table;
///
/// let mut table = Table::from_rows(vec![vec!["pet"], vec!["Cat sat on the cat"]]).unwrap();
/// let request = FindReplace::new("cat", "dog").with_whole_word(true).with_case_sensitive(true);
///
/// assert_eq!(request.preview(&table, 5).unwrap().matches, 1);
/// assert_eq!(request.apply(&mut table).unwrap(), 1);
/// assert_eq!(table.value(0, "pet"), Some("Cat sat on the dog"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FindReplace {
    pub find: String,
    pub replace: String,
    pub scope: ReplaceScope,
    /// Match only at word boundaries. The find text is then used as a raw
    /// pattern between `\b` anchors.
    pub whole_word: bool,
    pub case_sensitive: bool,
}

impl FindReplace {
    /// Substring, case-insensitive, all columns.
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
            ..Self::default()
        }
    }

    /// Restrict the search to one column.
    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.scope = ReplaceScope::Column(column.into());
        self
    }

    /// Set the scope.
    #[must_use]
    pub fn with_scope(mut self, scope: ReplaceScope) -> Self {
        self.scope = scope;
        self
    }

    /// Toggle whole-word matching.
    #[must_use]
    pub fn with_whole_word(mut self, whole_word: bool) -> Self {
        self.whole_word = whole_word;
        self
    }

    /// Toggle case sensitivity.
    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    fn compile(&self) -> SiftResult<Regex> {
        if self.find.is_empty() {
            return Err(SiftError::EmptyFindText);
        }
        let source = if self.whole_word {
            format!(r"\b{}\b", self.find)
        } else {
            regex::escape(&self.find)
        };
        build_regex(&source, self.case_sensitive)
    }

    fn columns(&self, table: &Table) -> SiftResult<Vec<usize>> {
        match &self.scope {
            ReplaceScope::AllColumns => Ok((0..table.column_count()).collect()),
            ReplaceScope::Column(name) => table
                .column_index(name)
                .map(|index| vec![index])
                .map_err(SiftError::from_sheet_lookup),
        }
    }

    /// Count matching cells and render up to `limit` sample rewrites.
    /// The table is not modified.
    pub fn preview(&self, table: &Table, limit: usize) -> SiftResult<ReplacePreview> {
        let regex = self.compile()?;
        let columns = self.columns(table)?;
        let mut preview = ReplacePreview::default();

        for (row_index, row) in table.rows().iter().enumerate() {
            for &col in &columns {
                let before = row.get(col);
                if !regex.is_match(before) {
                    continue;
                }
                preview.matches += 1;
                if preview.samples.len() < limit {
                    preview.samples.push(ReplaceSample {
                        row: row_index,
                        column: table.columns()[col].clone(),
                        before: before.to_string(),
                        after: regex.replace_all(before, NoExpand(&self.replace)).into_owned(),
                    });
                }
            }
        }
        tracing::debug!(matches = preview.matches, find = %self.find, "find & replace preview");
        Ok(preview)
    }

    /// Rewrite every matching cell. Returns the number of cells changed.
    ///
    /// Fails without touching the table when the find text is empty or the
    /// scope column does not exist.
    pub fn apply(&self, table: &mut Table) -> SiftResult<usize> {
        let regex = self.compile()?;
        let columns = self.columns(table)?;
        let mut replaced = 0;

        for row in table.rows_mut() {
            for &col in &columns {
                let after = match regex.replace_all(row.get(col), NoExpand(&self.replace)) {
                    std::borrow::Cow::Borrowed(_) => continue,
                    std::borrow::Cow::Owned(after) => after,
                };
                row.set(col, after);
                replaced += 1;
            }
        }
        tracing::info!(replaced, find = %self.find, "find & replace applied");
        Ok(replaced)
    }
}

/// One sample rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceSample {
    /// Zero-based row position in the table.
    pub row: usize,
    pub column: String,
    pub before: String,
    pub after: String,
}

impl fmt::Display for ReplaceSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Row {}, {}: \"{}\" → \"{}\"",
            self.row + 1,
            self.column,
            self.before,
            self.after
        )
    }
}

/// Outcome of [`FindReplace::preview`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacePreview {
    /// Matching cells across the whole scope.
    pub matches: usize,
    pub samples: Vec<ReplaceSample>,
}
