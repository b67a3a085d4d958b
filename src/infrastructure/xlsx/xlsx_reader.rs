// ============================================================
// XLSX READER
// ============================================================
// Decode the first worksheet of a workbook into a Table

use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};

use crate::domain::error::AppError;
use crate::domain::table::{Column, Table, Value};
use crate::infrastructure::headers::normalize_headers;

/// Dates are kept as text so they never count as numbers
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Default)]
pub struct XlsxReader;

impl XlsxReader {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Table, AppError> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| AppError::ParseError(format!("Failed to open Excel file: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| AppError::ParseError("No worksheet found".to_string()))?
            .map_err(|e| AppError::ParseError(format!("Failed to read Excel range: {}", e)))?;

        Self::range_to_table(&range)
    }

    fn range_to_table(range: &Range<Data>) -> Result<Table, AppError> {
        let mut rows = range.rows();

        let Some(header_row) = rows.next() else {
            return Ok(Table::empty());
        };

        let names = normalize_headers(header_row.iter().map(header_text).collect());
        let mut cells: Vec<Vec<Value>> = vec![Vec::new(); names.len()];

        for row in rows {
            for (idx, column) in cells.iter_mut().enumerate() {
                let value = row.get(idx).map(cell_value).unwrap_or(Value::Missing);
                column.push(value);
            }
        }

        let columns = names
            .into_iter()
            .zip(cells)
            .map(|(name, values)| Column::inferred(name, values))
            .collect();

        Table::new(columns)
    }
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Missing,
        Data::String(s) => Value::from_text(s),
        Data::Float(f) => Value::Float(*f),
        Data::Int(i) => Value::Int(*i),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => match dt.as_duration() {
            Some(duration) => Value::Text(duration.to_string()),
            None => Value::Missing,
        },
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => Value::Text(datetime.format(DATETIME_FORMAT).to_string()),
            None => Value::Missing,
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
    }
}
