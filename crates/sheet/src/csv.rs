use crate::error::Result;
use crate::table::Table;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// CSV reader/writer options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Trim leading and trailing whitespace from every field when reading
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            quote: b'"',
            trim: false,
        }
    }
}

impl CsvOptions {
    /// Create options for TSV (tab-separated values)
    #[must_use]
    pub fn tsv() -> Self {
        CsvOptions {
            delimiter: b'\t',
            ..Default::default()
        }
    }

    /// Set the delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether fields are trimmed when reading
    #[must_use]
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

impl Table {
    /// Load a table from a CSV file (first record is the header)
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_csv_with_options(path, CsvOptions::default())
    }

    /// Load a table from a CSV file with custom options
    pub fn from_csv_with_options<P: AsRef<Path>>(path: P, options: CsvOptions) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        Self::from_csv_reader(reader, options)
    }

    /// Load a table from a CSV string
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_csv_reader(content.as_bytes(), CsvOptions::default())
    }

    /// Load a table from a CSV string with custom options
    pub fn from_csv_str_with_options(content: &str, options: CsvOptions) -> Result<Self> {
        Self::from_csv_reader(content.as_bytes(), options)
    }

    /// Load a table from a reader.
    ///
    /// Records may have uneven lengths; they are fitted to the header width.
    pub fn from_csv_reader<R: Read>(reader: R, options: CsvOptions) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false) // row 0 is handled by Table::from_rows
            .flexible(true)
            .trim(if options.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(reader);

        let mut data: Vec<Vec<String>> = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            data.push(record.iter().map(str::to_string).collect());
        }

        tracing::debug!(records = data.len(), "decoded delimited text");
        Table::from_rows(data)
    }

    /// Save the table to a CSV file
    pub fn save_as_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_as_csv_with_options(path, CsvOptions::default())
    }

    /// Save the table to a CSV file with custom options
    pub fn save_as_csv_with_options<P: AsRef<Path>>(
        &self,
        path: P,
        options: CsvOptions,
    ) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.write_csv(writer, options)
    }

    /// Write the header line and every row as CSV.
    ///
    /// Fields containing the delimiter, a quote or a line break are quoted,
    /// with embedded quotes doubled.
    pub fn write_csv<W: Write>(&self, writer: W, options: CsvOptions) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(writer);

        csv_writer.write_record(self.columns())?;
        for row in self.rows() {
            csv_writer.write_record(row.cells())?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Convert the table to a CSV string
    pub fn to_csv_string(&self) -> Result<String> {
        self.to_csv_string_with_options(CsvOptions::default())
    }

    /// Convert the table to a CSV string with custom options
    pub fn to_csv_string_with_options(&self, options: CsvOptions) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer, options)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    // ===== Clipboard =====

    /// Render the table as clipboard text: tab-joined header line followed by
    /// one tab-joined line per row. Values are not quoted.
    #[must_use]
    pub fn to_clipboard_text(&self) -> String {
        std::iter::once(self.columns().join("\t"))
            .chain(self.rows().iter().map(|row| row.joined("\t")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_from_csv_str() {
        let csv = "name,age,city\nAlice,30,NYC\nBob,25,LA";
        let table = Table::from_csv_str(csv).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.value(0, "name"), Some("Alice"));
        assert_eq!(table.value(1, "age"), Some("25"));
    }

    #[test]
    fn test_uneven_records() {
        let csv = "a,b,c\n1\n1,2,3,4";
        let table = Table::from_csv_str(csv).unwrap();
        assert_eq!(table.row(0).unwrap().cells(), &["1", "", ""]);
        assert_eq!(table.row(1).unwrap().cells(), &["1", "2", "3"]);
    }

    #[test]
    fn test_empty_csv_is_rejected() {
        assert!(Table::from_csv_str("").is_err());
    }

    #[test]
    fn test_quoting() {
        let table = Table::from_rows(vec![
            vec!["text", "n"],
            vec!["a,b", "1"],
            vec!["say \"hi\"", "2"],
            vec!["line\nbreak", "3"],
        ])
        .unwrap();

        let csv = table.to_csv_string().unwrap();
        assert!(csv.starts_with("text,n\n"));
        assert!(csv.contains("\"a,b\",1"));
        assert!(csv.contains("\"say \"\"hi\"\"\",2"));
        assert!(csv.contains("\"line\nbreak\",3"));
    }

    #[test]
    fn test_tsv() {
        let tsv = "name\tage\nAlice\t30";
        let table = Table::from_csv_str_with_options(tsv, CsvOptions::tsv()).unwrap();
        assert_eq!(table.value(0, "age"), Some("30"));

        let output = table.to_csv_string_with_options(CsvOptions::tsv()).unwrap();
        assert!(output.contains("name\tage"));
    }

    #[test]
    fn test_trim_option() {
        let csv = "name , age\n Alice , 30 ";
        let table =
            Table::from_csv_str_with_options(csv, CsvOptions::default().with_trim(true)).unwrap();
        assert_eq!(table.columns(), &["name", "age"]);
        assert_eq!(table.value(0, "name"), Some("Alice"));
    }

    #[test]
    fn test_clipboard_text() {
        let table = Table::from_rows(vec![vec!["a", "b"], vec!["1", ""], vec!["x,y", "2"]]).unwrap();
        assert_eq!(table.to_clipboard_text(), "a\tb\n1\t\nx,y\t2");
    }

    #[test]
    fn test_save_and_load_csv_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.csv");

        let table = Table::from_rows(vec![vec!["k", "v"], vec!["1", "2"], vec!["3", "4"]]).unwrap();
        table.save_as_csv(&file_path).unwrap();

        let loaded = Table::from_csv(&file_path).unwrap();
        assert_eq!(loaded, table);
    }
}
