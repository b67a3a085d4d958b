use std::collections::HashSet;

use crate::domain::error::{AppError, Result};
use crate::domain::table::{Column, Table};

/// Keep exactly the named columns, in the given order.
///
/// Every name must exist in `table`; repeats keep their first position.
/// An empty selection keeps the row count with no columns.
pub fn select_columns(table: &Table, selected: &[String]) -> Result<Table> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut columns: Vec<Column> = Vec::with_capacity(selected.len());

    for name in selected {
        if !seen.insert(name.as_str()) {
            continue;
        }
        let column = table
            .column(name)
            .ok_or_else(|| AppError::UnknownColumn(name.clone()))?;
        columns.push(column.clone());
    }

    Table::with_row_count(columns, table.row_count())
}
