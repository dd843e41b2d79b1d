//! # sheetsift-core
//!
//! In-memory engine for exploring a loaded spreadsheet.
//!
//! This crate provides:
//! - The composite filter predicate (global search, email heuristic, column
//!   term, numeric and date ranges)
//! - Numeric-aware stable sorting
//! - Column statistics
//! - Cleaning transforms and find & replace with preview
//! - Frequency and histogram buckets for charts
//! - Saved filter presets behind a key-value store
//! - [`Session`], which ties them to one loaded table

/// Chart bucket computation.
pub mod aggregate;
/// Cleaning transforms and email validation.
pub mod clean;
/// Engine configuration.
pub mod config;
/// Filter control values and date presets.
pub mod criteria;
/// Error types and result aliases.
pub mod error;
/// Predicate evaluator.
pub mod filter;
/// Literal and regex search patterns.
pub mod pattern;
/// Saved filter presets and theme preference.
pub mod preset;
/// Find & replace.
pub mod replace;
/// Loaded table and view state.
pub mod session;
/// Sort engine.
pub mod sort;
/// Column statistics.
pub mod stats;
/// Key-value storage backends.
pub mod store;

/// Re-export aggregation types.
pub use aggregate::{Aggregation, Bucket};
/// Re-export cleaning types.
pub use clean::{CaseKind, ValidationReport};
/// Re-export configuration.
pub use config::EngineConfig;
/// Re-export filter criteria types.
pub use criteria::{DatePreset, DateRange, FilterCriteria};
/// Re-export core error types.
pub use error::{SiftError, SiftResult};
/// Re-export the compiled predicate.
pub use filter::{apply_filters, Predicate};
/// Re-export the search pattern.
pub use pattern::Pattern;
/// Re-export preset types.
pub use preset::{FilterPreset, PresetStore, Theme};
/// Re-export find & replace types.
pub use replace::{FindReplace, ReplacePreview, ReplaceSample, ReplaceScope};
/// Re-export the session.
pub use session::{DisplayWindow, Session};
/// Re-export sort types.
pub use sort::{compare_cells, CellComparator, SortConfig, SortDirection};
/// Re-export statistics types.
pub use stats::{ColumnKind, ColumnStats};
/// Re-export storage backends.
pub use store::{FileStore, KeyValueStore, MemoryStore};
