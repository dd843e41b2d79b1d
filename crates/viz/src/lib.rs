//! # sheetsift-viz
//!
//! Chart specifications for sheetsift.
//!
//! This crate turns aggregation buckets into chart specifications that an
//! external presentation layer renders:
//! - Bar, pie and line charts over the most frequent values of a column
//! - Histograms over equal-width numeric bins
//!
//! ```
//! use sheetsift_core::Session;
//! use sheetsift_sheet::Table;
//! use sheetsift_viz::{chart_for, ChartKind};
//!
//! let table = Table::from_rows(vec![vec!["city"], vec!["Oslo"], vec!["Rome"], vec!["Oslo"]]).unwrap();
//! let session = Session::new(table).unwrap();
//!
//! let chart = chart_for(&session, "city", ChartKind::Pie).unwrap();
//! assert_eq!(chart.title, "city Distribution");
//! assert_eq!(chart.data.labels, vec!["Oslo", "Rome"]);
//! ```

use serde::{Deserialize, Serialize};
use sheetsift_core::{Aggregation, Bucket, Session, SiftError};
use thiserror::Error;

/// Fill colors cycled over chart segments.
pub const PALETTE: [&str; 7] = [
    "#6366f1", "#8b5cf6", "#ec4899", "#f59e0b", "#10b981", "#3b82f6", "#ef4444",
];

/// Result type for chart building.
pub type VizResult<T> = Result<T, VizError>;

/// Errors raised while building a chart.
#[derive(Debug, Error)]
pub enum VizError {
    /// The column has no non-empty values in the current view.
    #[error("No data to visualize in column '{0}'")]
    NoData(String),

    /// Aggregation failed.
    #[error(transparent)]
    Sift(#[from] SiftError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Chart specification for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub chart_type: ChartKind,
    pub title: String,
    pub data: ChartData,
    pub options: ChartOptions,
}

/// Chart type for visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
    Histogram,
}

impl ChartKind {
    /// Aggregation feeding this chart type.
    #[must_use]
    pub fn aggregation(self) -> Aggregation {
        match self {
            ChartKind::Histogram => Aggregation::Histogram,
            ChartKind::Bar | ChartKind::Pie | ChartKind::Line => Aggregation::Categorical,
        }
    }

    fn title(self, column: &str) -> String {
        match self {
            ChartKind::Bar | ChartKind::Pie => format!("{column} Distribution"),
            ChartKind::Line => format!("{column} Trend"),
            ChartKind::Histogram => format!("{column} Histogram"),
        }
    }
}

/// Chart data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// A dataset in a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    /// One color per point for pie charts, otherwise a single color.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub background_color: Vec<String>,
}

/// Chart rendering options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis_label: Option<String>,
    pub show_legend: bool,
    pub horizontal: bool,
}

impl ChartSpec {
    /// Create an empty chart specification.
    #[must_use]
    pub fn new(chart_type: ChartKind, title: impl Into<String>) -> Self {
        Self {
            chart_type,
            title: title.into(),
            data: ChartData {
                labels: Vec::new(),
                datasets: Vec::new(),
            },
            options: ChartOptions::default(),
        }
    }

    /// Build a chart over `column` from aggregation buckets.
    ///
    /// # Errors
    ///
    /// Returns `VizError::NoData` when `buckets` is empty.
    pub fn from_buckets(kind: ChartKind, column: &str, buckets: &[Bucket]) -> VizResult<Self> {
        if buckets.is_empty() {
            return Err(VizError::NoData(column.to_string()));
        }

        let background_color = match kind {
            ChartKind::Pie => PALETTE
                .iter()
                .cycle()
                .take(buckets.len())
                .map(|c| (*c).to_string())
                .collect(),
            ChartKind::Bar | ChartKind::Line | ChartKind::Histogram => {
                vec![PALETTE[0].to_string()]
            }
        };

        let mut chart = Self::new(kind, kind.title(column));
        chart.data.labels = buckets.iter().map(|b| b.label.clone()).collect();
        chart.data.datasets.push(Dataset {
            label: column.to_string(),
            data: buckets.iter().map(|b| b.count as f64).collect(),
            background_color,
        });
        chart.options = ChartOptions {
            x_axis_label: (kind != ChartKind::Pie).then(|| column.to_string()),
            y_axis_label: (kind != ChartKind::Pie).then(|| "Count".to_string()),
            show_legend: kind == ChartKind::Pie,
            horizontal: kind == ChartKind::Bar,
        };
        Ok(chart)
    }

    /// Legend lines: `"label: count"`, with the share of the total for pies.
    #[must_use]
    pub fn legend(&self) -> Vec<String> {
        let Some(dataset) = self.data.datasets.first() else {
            return Vec::new();
        };
        let total: f64 = dataset.data.iter().sum();
        self.data
            .labels
            .iter()
            .zip(&dataset.data)
            .map(|(label, value)| {
                if self.chart_type == ChartKind::Pie && total > 0.0 {
                    format!("{label}: {value} ({:.1}%)", value / total * 100.0)
                } else {
                    format!("{label}: {value}")
                }
            })
            .collect()
    }

    /// Convert to a JSON string for the presentation layer.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> VizResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Aggregate `column` over the session's filtered view and chart it.
///
/// # Errors
///
/// Fails when the column is missing, when a histogram finds no numbers, or
/// when the view holds no values for the column.
pub fn chart_for(session: &Session, column: &str, kind: ChartKind) -> VizResult<ChartSpec> {
    let buckets = session.aggregate(column, kind.aggregation())?;
    ChartSpec::from_buckets(kind, column, &buckets)
}
