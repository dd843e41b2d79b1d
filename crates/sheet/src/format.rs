use crate::csv::CsvOptions;
use crate::error::{Result, SheetError};
use crate::table::Table;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Table name given to an exported view; also the worksheet name in XLSX.
pub const EXPORT_SHEET_NAME: &str = "Filtered Data";

/// Input formats the decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Csv,
    Tsv,
    Xlsx,
    Json,
}

impl SourceFormat {
    /// Pick a format from a file extension (case-insensitive)
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" | "txt" => Some(SourceFormat::Csv),
            "tsv" | "tab" => Some(SourceFormat::Tsv),
            "xlsx" | "xlsm" => Some(SourceFormat::Xlsx),
            "json" => Some(SourceFormat::Json),
            _ => None,
        }
    }

    /// Pick a format from a file path
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Output formats for a table export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    /// File extension without the dot
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    /// Download name for an export made on `date`: `Filtered_Data_2024-05-01.xlsx`
    #[must_use]
    pub fn file_name(self, date: NaiveDate) -> String {
        format!("Filtered_Data_{}.{}", date.format("%Y-%m-%d"), self.extension())
    }
}

impl Table {
    /// Decode raw file bytes in the given format.
    ///
    /// Text formats must be UTF-8. A decoded file without a header row is
    /// reported as `SheetError::EmptyInput`.
    pub fn from_bytes(bytes: &[u8], format: SourceFormat) -> Result<Self> {
        if bytes.is_empty() {
            return Err(SheetError::EmptyInput("file has no content".to_string()));
        }
        match format {
            SourceFormat::Csv => Table::from_csv_reader(bytes, CsvOptions::default()),
            SourceFormat::Tsv => Table::from_csv_reader(bytes, CsvOptions::tsv()),
            SourceFormat::Json => Table::from_json_reader(bytes),
            #[cfg(not(target_arch = "wasm32"))]
            SourceFormat::Xlsx => Table::from_xlsx_bytes(bytes),
            #[cfg(target_arch = "wasm32")]
            SourceFormat::Xlsx => Err(SheetError::UnsupportedFormat("xlsx".to_string())),
        }
    }

    /// Read and decode a file, picking the format from its extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = SourceFormat::from_path(path)
            .ok_or_else(|| SheetError::UnsupportedFormat(path.display().to_string()))?;
        let bytes = std::fs::read(path)?;
        let mut table = Table::from_bytes(&bytes, format)?;
        if format != SourceFormat::Xlsx {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                table.set_name(stem);
            }
        }
        Ok(table)
    }

    /// Encode the table in an export format
    pub fn to_bytes(&self, format: ExportFormat) -> Result<Vec<u8>> {
        match format {
            ExportFormat::Csv => Ok(self.to_csv_string()?.into_bytes()),
            ExportFormat::Json => Ok(self.to_json_string_pretty()?.into_bytes()),
            #[cfg(not(target_arch = "wasm32"))]
            ExportFormat::Xlsx => self.to_xlsx_bytes(),
            #[cfg(target_arch = "wasm32")]
            ExportFormat::Xlsx => Err(SheetError::UnsupportedFormat("xlsx".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_source_format_detection() {
        assert_eq!(SourceFormat::from_path("data.CSV"), Some(SourceFormat::Csv));
        assert_eq!(SourceFormat::from_path("a/b.tsv"), Some(SourceFormat::Tsv));
        assert_eq!(SourceFormat::from_path("book.xlsx"), Some(SourceFormat::Xlsx));
        assert_eq!(SourceFormat::from_path("rows.json"), Some(SourceFormat::Json));
        assert_eq!(SourceFormat::from_path("notes.md"), None);
        assert_eq!(SourceFormat::from_path("no_extension"), None);
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(
            ExportFormat::Xlsx.file_name(date),
            "Filtered_Data_2024-05-01.xlsx"
        );
        assert_eq!(ExportFormat::Csv.file_name(date), "Filtered_Data_2024-05-01.csv");
    }

    #[test]
    fn test_from_bytes_empty() {
        assert!(matches!(
            Table::from_bytes(b"", SourceFormat::Csv),
            Err(SheetError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_from_path_uses_stem_as_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.csv");
        std::fs::write(&path, "name,email\nAna,ana@example.com\n").unwrap();

        let table = Table::from_path(&path).unwrap();
        assert_eq!(table.name(), "contacts");
        assert_eq!(table.value(0, "email"), Some("ana@example.com"));
    }

    #[test]
    fn test_from_path_unsupported() {
        let result = Table::from_path("notes.md");
        assert!(matches!(result, Err(SheetError::UnsupportedFormat(_))));
    }
}
