use crate::error::{Result, SheetError};
use crate::table::Table;
use calamine::{Data, Reader, Xlsx};
use chrono::{Duration, NaiveDate};
use rust_xlsxwriter::{Workbook, XlsxError};
use std::io::Cursor;
use std::path::Path;

fn xlsx_error(e: impl std::fmt::Display) -> SheetError {
    SheetError::Xlsx(e.to_string())
}

/// Convert an Excel serial date (days since 1899-12-30) to ISO text.
///
/// Whole days render as `YYYY-MM-DD`; a time part adds `HH:MM:SS`.
fn excel_serial_to_text(serial: f64) -> Option<String> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let days = serial.floor();
    let seconds = ((serial - days) * 86_400.0).round() as i64;
    let datetime = epoch.and_hms_opt(0, 0, 0)?
        + Duration::days(days as i64)
        + Duration::seconds(seconds);
    if seconds == 0 {
        Some(datetime.format("%Y-%m-%d").to_string())
    } else {
        Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

/// Convert calamine Data to the raw cell string
fn data_to_cell_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::Bool(b) => b.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::String(s) => s.clone(),
        Data::DateTime(dt) => {
            excel_serial_to_text(dt.as_f64()).unwrap_or_else(|| dt.as_f64().to_string())
        }
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERROR: {e:?}"),
    }
}

impl Table {
    /// Decode the first worksheet of an in-memory Excel workbook.
    ///
    /// Row 0 of the worksheet becomes the header.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::Xlsx` for corrupt workbooks and
    /// `SheetError::EmptyInput` when the workbook has no sheets or no rows.
    pub fn from_xlsx_bytes(bytes: &[u8]) -> Result<Self> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(xlsx_error)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| SheetError::EmptyInput("workbook has no sheets".to_string()))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| SheetError::EmptyInput("workbook has no sheets".to_string()))?
            .map_err(xlsx_error)?;

        let data: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(data_to_cell_text).collect())
            .collect();

        tracing::debug!(sheet = %sheet_name, rows = data.len(), "decoded worksheet");
        let mut table = Table::from_rows(data)?;
        table.set_name(&sheet_name);
        Ok(table)
    }

    /// Load the first worksheet of an Excel file
    pub fn from_xlsx<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_xlsx_bytes(&bytes)
    }

    /// Encode the table as an Excel workbook with a single worksheet named
    /// after the table. Cells are written as text.
    pub fn to_xlsx_bytes(&self) -> Result<Vec<u8>> {
        let mut workbook = self.build_workbook().map_err(xlsx_error)?;
        workbook.save_to_buffer().map_err(xlsx_error)
    }

    /// Save the table to an Excel file
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = self.build_workbook().map_err(xlsx_error)?;
        workbook.save(path.as_ref()).map_err(xlsx_error)
    }

    fn build_workbook(&self) -> std::result::Result<Workbook, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(self.name())?;

        for (col_idx, name) in self.columns().iter().enumerate() {
            let col_num = u16::try_from(col_idx).map_err(|_| XlsxError::RowColumnLimitError)?;
            worksheet.write_string(0, col_num, name)?;
        }

        for (row_idx, row) in self.rows().iter().enumerate() {
            let row_num = u32::try_from(row_idx + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
            for (col_idx, cell) in row.cells().iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                let col_num = u16::try_from(col_idx).map_err(|_| XlsxError::RowColumnLimitError)?;
                worksheet.write_string(row_num, col_num, cell)?;
            }
        }

        Ok(workbook)
    }
}
