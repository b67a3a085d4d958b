// ============================================================
// CSV PARSER
// ============================================================
// Decode CSV bytes into a Table with encoding detection

use csv::{ReaderBuilder, StringRecord};
use encoding_rs::{UTF_8, WINDOWS_1252};

use crate::domain::error::AppError;
use crate::domain::table::{Column, Table, Value};
use crate::infrastructure::headers::normalize_headers;

/// CSV parser with encoding detection
#[derive(Default)]
pub struct CsvParser;

impl CsvParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse raw upload bytes into a table
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Table, AppError> {
        let content = Self::decode_text(bytes);
        self.parse_content(&content)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<Table, AppError> {
        let mut reader = ReaderBuilder::new()
            .flexible(true) // Short rows are padded below
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();
        let names = normalize_headers(headers.iter().map(|h| h.to_string()).collect());

        let mut cells: Vec<Vec<Value>> = vec![Vec::new(); names.len()];

        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            self.push_row(index, &headers, &record, &mut cells)?;
        }

        let columns = names
            .into_iter()
            .zip(cells)
            .map(|(name, values)| Column::inferred(name, values))
            .collect();

        Table::new(columns)
    }

    /// UTF-8 (with or without BOM) first, Windows-1252 when the bytes are not valid UTF-8
    fn decode_text(bytes: &[u8]) -> String {
        let (content, _, had_errors) = UTF_8.decode(bytes);
        if !had_errors {
            return content.into_owned();
        }

        let (content, _, _) = WINDOWS_1252.decode(bytes);
        content.into_owned()
    }

    fn push_row(
        &self,
        index: usize,
        headers: &StringRecord,
        record: &StringRecord,
        cells: &mut [Vec<Value>],
    ) -> Result<(), AppError> {
        if record.len() > headers.len() {
            return Err(AppError::ParseError(format!(
                "CSV row {} has {} fields, expected {}",
                index + 1,
                record.len(),
                headers.len()
            )));
        }

        for (idx, column) in cells.iter_mut().enumerate() {
            let value = record.get(idx).map(Value::from_text).unwrap_or(Value::Missing);
            column.push(value);
        }

        Ok(())
    }
}
