// ============================================================
// CSV WRITER
// ============================================================
// Serialize a Table as comma-separated text, header first, no index column

use csv::{Terminator, WriterBuilder};

use crate::domain::error::AppError;
use crate::domain::table::Table;

pub struct CsvWriter {
    delimiter: u8,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&self, table: &Table) -> Result<Vec<u8>, AppError> {
        // A record with no fields has no CSV spelling; emit nothing at all.
        if table.column_count() == 0 {
            return Ok(Vec::new());
        }

        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer
            .write_record(table.column_names())
            .map_err(|e| AppError::EncodingError(format!("Failed to write CSV header: {}", e)))?;

        for index in 0..table.row_count() {
            let record: Vec<String> = table
                .columns()
                .iter()
                .map(|c| c.values[index].to_csv_field())
                .collect();
            writer.write_record(&record).map_err(|e| {
                AppError::EncodingError(format!("Failed to write CSV row {}: {}", index + 1, e))
            })?;
        }

        writer
            .into_inner()
            .map_err(|e| AppError::EncodingError(format!("Failed to flush CSV output: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::{Column, Value};

    #[test]
    fn test_two_by_two_table() {
        let table = Table::new(vec![
            Column::new("a", vec![Value::Int(1), Value::Int(2)]),
            Column::new("b", vec![Value::Int(3), Value::Int(4)]),
        ])
        .unwrap();

        let bytes = CsvWriter::new().write(&table).unwrap();
        assert_eq!(bytes, b"a,b\n1,3\n2,4\n");
    }

    #[test]
    fn test_quoting_and_missing() {
        let table = Table::new(vec![
            Column::new(
                "note",
                vec![Value::Text("hello, world".to_string()), Value::Missing],
            ),
            Column::new("x", vec![Value::Float(2.0), Value::Bool(false)]),
        ])
        .unwrap();

        let bytes = CsvWriter::new().write(&table).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "note,x\n\"hello, world\",2.0\n,False\n"
        );
    }

    #[test]
    fn test_zero_columns_is_empty() {
        let table = Table::with_row_count(Vec::new(), 3).unwrap();
        assert!(CsvWriter::new().write(&table).unwrap().is_empty());
    }
}
