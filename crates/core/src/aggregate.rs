//! Frequency and bucket computation for charts.

use crate::error::{SiftError, SiftResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sheetsift_sheet::{is_empty_cell, try_parse_number, Table};

/// Aggregation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Top-K most frequent values.
    Categorical,
    /// Equal-width numeric bins.
    Histogram,
}

/// One labelled count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
}

impl Bucket {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Count each distinct non-empty value of `column` over `rows`, most
/// frequent first, keeping at most `top_k`. Ties keep first-seen order.
pub fn categorical(
    table: &Table,
    rows: &[usize],
    column: &str,
    top_k: usize,
) -> SiftResult<Vec<Bucket>> {
    let col = table
        .column_index(column)
        .map_err(SiftError::from_sheet_lookup)?;

    let mut frequency: IndexMap<&str, usize> = IndexMap::new();
    for value in rows.iter().filter_map(|&r| table.row(r)).map(|row| row.get(col)) {
        if !is_empty_cell(value) {
            *frequency.entry(value).or_insert(0) += 1;
        }
    }

    let mut buckets: Vec<Bucket> = frequency
        .into_iter()
        .map(|(label, count)| Bucket::new(label, count))
        .collect();
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets.truncate(top_k);
    Ok(buckets)
}

/// Partition the numeric values of `column` over `rows` into `bins`
/// equal-width bins spanning `[min, max]`.
///
/// Values that do not parse are skipped. The maximum falls in the last bin;
/// when every value is equal they all land in the first. Labels are the bin
/// bounds with one decimal, e.g. `"1.0-10.9"`.
pub fn histogram(
    table: &Table,
    rows: &[usize],
    column: &str,
    bins: usize,
) -> SiftResult<Vec<Bucket>> {
    let col = table
        .column_index(column)
        .map_err(SiftError::from_sheet_lookup)?;

    let values: Vec<f64> = rows
        .iter()
        .filter_map(|&r| table.row(r))
        .filter_map(|row| try_parse_number(row.get(col)))
        .collect();

    if values.is_empty() {
        return Err(SiftError::NotNumeric(column.to_string()));
    }
    let bins = bins.max(1);

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // binning runs on halved values when the span overflows
    let scale = if (max - min).is_finite() { 1.0 } else { 0.5 };
    let low = min * scale;
    let width = (max * scale - low) / bins as f64;

    let mut counts = vec![0usize; bins];
    for value in values {
        let index = if width > 0.0 {
            (((value * scale - low) / width).floor() as usize).min(bins - 1)
        } else {
            0
        };
        counts[index] += 1;
    }

    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let start = (low + i as f64 * width) / scale;
            let end = (low + (i + 1) as f64 * width) / scale;
            Bucket::new(format!("{start:.1}-{end:.1}"), count)
        })
        .collect())
}

/// Run either aggregation with its configured limit.
pub fn aggregate(
    table: &Table,
    rows: &[usize],
    column: &str,
    kind: Aggregation,
    top_k: usize,
    bins: usize,
) -> SiftResult<Vec<Bucket>> {
    let buckets = match kind {
        Aggregation::Categorical => categorical(table, rows, column, top_k)?,
        Aggregation::Histogram => histogram(table, rows, column, bins)?,
    };
    tracing::debug!(column, ?kind, buckets = buckets.len(), "aggregated");
    Ok(buckets)
}
