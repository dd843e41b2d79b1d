//! Table model for sheetsift
//!
//! Holds a decoded spreadsheet as ordered column names plus rows of raw cell
//! strings, and converts it from and to the file formats a user drops in or
//! downloads: CSV/TSV, JSON (array of row objects) and Excel workbooks.
//!
//! # Examples
//!
//! ## Building a table from decoded rows
//!
//! ```
//! use sheetsift_sheet::Table;
//!
//! let table = Table::from_rows(vec![
//!     vec!["Name", "Age", "City"],
//!     vec!["Alice", "30", "NYC"],
//!     vec!["Bob", "25", "LA"],
//! ])
//! .unwrap();
//!
//! assert_eq!(table.row_count(), 2);
//! assert_eq!(table.column_count(), 3);
//! assert_eq!(table.value(1, "City"), Some("LA"));
//! ```
//!
//! ## Loading from CSV
//!
//! ```no_run
//! use sheetsift_sheet::Table;
//!
//! let table = Table::from_csv("data.csv").unwrap();
//! ```
//!
//! ## Typed accessors
//!
//! ```
//! use sheetsift_sheet::{try_parse_date, try_parse_number};
//!
//! assert_eq!(try_parse_number(" 4.5 "), Some(4.5));
//! assert!(try_parse_date("2024-02-29").is_some());
//! ```

mod cell;
mod csv;
mod error;
mod format;
mod json;
mod table;
#[cfg(not(target_arch = "wasm32"))]
mod xlsx;

/// Re-export typed cell accessors.
pub use cell::{is_empty_cell, try_parse_date, try_parse_number};
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export import/export format selectors.
pub use format::{ExportFormat, SourceFormat, EXPORT_SHEET_NAME};
/// Re-export table types.
pub use table::{Row, Table, DEFAULT_TABLE_NAME};
