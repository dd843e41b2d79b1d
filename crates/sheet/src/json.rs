//! JSON support for Table
//!
//! Tables are read from and written as an array of row objects:
//! `[{"name": "Alice", "age": "30"}, ...]`

use crate::error::{Result, SheetError};
use crate::table::Table;
use indexmap::IndexSet;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

impl Table {
    /// Load a table from a JSON file containing an array of objects
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        Self::from_json_reader(reader)
    }

    /// Load a table from a JSON string containing an array of objects
    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::from_json_reader(content.as_bytes())
    }

    /// Load a table from a reader containing a JSON array of objects.
    ///
    /// Columns are the union of object keys in first-seen order. Numbers and
    /// booleans become their text form, `null` and missing keys become `""`.
    pub fn from_json_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)
            .map_err(|e| SheetError::Parse(format!("Invalid JSON: {e}")))?;

        let array = value
            .as_array()
            .ok_or_else(|| SheetError::Parse("JSON must be an array of objects".to_string()))?;

        if array.is_empty() {
            return Err(SheetError::EmptyInput("JSON array has no rows".to_string()));
        }

        let mut objects = Vec::with_capacity(array.len());
        let mut columns: IndexSet<String> = IndexSet::new();
        for (idx, item) in array.iter().enumerate() {
            let obj = item.as_object().ok_or_else(|| {
                SheetError::Parse(format!("Element at index {idx} must be an object"))
            })?;
            columns.extend(obj.keys().cloned());
            objects.push(obj);
        }

        let mut table = Table::new(columns.iter().cloned().collect());
        for obj in objects {
            let row: Vec<String> = columns
                .iter()
                .map(|name| obj.get(name).map(json_value_to_cell).unwrap_or_default())
                .collect();
            table.push_row(row);
        }
        Ok(table)
    }

    /// Save the table to a JSON file as a pretty-printed array of objects
    pub fn save_as_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.write_json(writer, true)
    }

    /// Write the table to a writer as an array of row objects
    pub fn write_json<W: Write>(&self, writer: W, pretty: bool) -> Result<()> {
        let records = self.to_records();
        let written = if pretty {
            serde_json::to_writer_pretty(writer, &records)
        } else {
            serde_json::to_writer(writer, &records)
        };
        written.map_err(|e| SheetError::Serialize(format!("JSON write error: {e}")))
    }

    /// Convert the table to a compact JSON string
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(&self.to_records())
            .map_err(|e| SheetError::Serialize(format!("JSON write error: {e}")))
    }

    /// Convert the table to a pretty-printed JSON string
    pub fn to_json_string_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_records())
            .map_err(|e| SheetError::Serialize(format!("JSON write error: {e}")))
    }
}

fn json_value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested => nested.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_str() {
        let json = r#"[{"name": "Alice", "age": 30, "active": true}, {"name": "Bob", "city": "LA", "age": null}]"#;
        let table = Table::from_json_str(json).unwrap();

        assert_eq!(table.columns(), &["name", "age", "active", "city"]);
        assert_eq!(table.value(0, "age"), Some("30"));
        assert_eq!(table.value(0, "active"), Some("true"));
        assert_eq!(table.value(0, "city"), Some(""));
        assert_eq!(table.value(1, "age"), Some(""));
    }

    #[test]
    fn test_from_json_rejects_non_arrays() {
        assert!(matches!(
            Table::from_json_str(r#"{"a": 1}"#),
            Err(SheetError::Parse(_))
        ));
        assert!(matches!(
            Table::from_json_str("[1, 2]"),
            Err(SheetError::Parse(_))
        ));
        assert!(matches!(
            Table::from_json_str("[]"),
            Err(SheetError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_to_json_string_pretty() {
        let table = Table::from_rows(vec![vec!["name", "age"], vec!["Alice", "30"]]).unwrap();
        let json = table.to_json_string_pretty().unwrap();
        assert!(json.contains('\n'));

        let parsed: Vec<serde_json::Map<String, Value>> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["name"], "Alice");
        assert_eq!(parsed[0]["age"], "30");
    }

    #[test]
    fn test_key_order_follows_columns() {
        let table = Table::from_rows(vec![vec!["z", "a"], vec!["1", "2"]]).unwrap();
        assert_eq!(table.to_json_string().unwrap(), r#"[{"z":"1","a":"2"}]"#);
    }
}
