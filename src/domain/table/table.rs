// ============================================================
// TABLE
// ============================================================
// Ordered named columns of equal length with an explicit row count

use serde::Serialize;

use super::{Column, Value};
use crate::domain::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

/// Row-oriented snapshot used for previews
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub total_rows: usize,
}

impl Table {
    /// Build a table, checking that every column has the same length
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);
        Self::with_row_count(columns, row_count)
    }

    /// Build a table with an explicit row count, which a zero-column table needs
    pub fn with_row_count(columns: Vec<Column>, row_count: usize) -> Result<Self> {
        if let Some(bad) = columns.iter().find(|c| c.len() != row_count) {
            return Err(AppError::ValidationError(format!(
                "Column '{}' has {} values, expected {}",
                bad.name,
                bad.len(),
                row_count
            )));
        }
        Ok(Self { columns, row_count })
    }

    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            row_count: 0,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Keep only the rows whose index is marked in `keep`
    pub fn filter_rows(&self, keep: &[bool]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let values = c
                    .values
                    .iter()
                    .zip(keep)
                    .filter(|(_, k)| **k)
                    .map(|(v, _)| v.clone())
                    .collect();
                Column::new(c.name.clone(), values)
            })
            .collect();
        let row_count = keep.iter().take(self.row_count).filter(|k| **k).count();
        Self { columns, row_count }
    }

    pub fn head(&self, n: usize) -> TablePreview {
        let shown = n.min(self.row_count);
        let rows = (0..shown)
            .map(|i| self.columns.iter().map(|c| c.values[i].clone()).collect())
            .collect();
        TablePreview {
            columns: self.column_names(),
            rows,
            total_rows: self.row_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(vec![
            Column::new("a", vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
            Column::new(
                "b",
                vec![
                    Value::Text("x".to_string()),
                    Value::Missing,
                    Value::Text("z".to_string()),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_ragged_columns() {
        let result = Table::new(vec![
            Column::new("a", vec![Value::Int(1)]),
            Column::new("b", vec![]),
        ]);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_zero_column_table_keeps_row_count() {
        let table = Table::with_row_count(Vec::new(), 3).unwrap();
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.head(2).rows, vec![Vec::<Value>::new(), Vec::new()]);
    }

    #[test]
    fn test_filter_rows() {
        let filtered = sample().filter_rows(&[true, false, true]);
        assert_eq!(filtered.row_count(), 2);
        assert_eq!(
            filtered.column("a").unwrap().values,
            vec![Value::Int(1), Value::Int(3)]
        );
    }

    #[test]
    fn test_head_limits_rows() {
        let preview = sample().head(2);
        assert_eq!(preview.columns, vec!["a", "b"]);
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.total_rows, 3);
    }
}
