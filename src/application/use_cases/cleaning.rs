use std::collections::HashSet;

use crate::domain::table::{Column, Table, Value, ValueKey};

/// Which cleaning operations the user triggered in this render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningPlan {
    pub remove_duplicates: bool,
    pub fill_missing: bool,
}

impl CleaningPlan {
    pub fn is_empty(&self) -> bool {
        !self.remove_duplicates && !self.fill_missing
    }
}

/// Run the selected operations in fixed order: deduplicate, then fill
pub fn apply(table: &Table, plan: CleaningPlan) -> Table {
    let deduplicated = if plan.remove_duplicates {
        remove_duplicates(table)
    } else {
        table.clone()
    };

    if plan.fill_missing {
        fill_missing_with_mean(&deduplicated)
    } else {
        deduplicated
    }
}

/// Drop rows equal to an earlier row, keeping first occurrences in order
pub fn remove_duplicates(table: &Table) -> Table {
    if table.column_count() == 0 {
        return table.clone();
    }

    let mut seen: HashSet<Vec<ValueKey>> = HashSet::with_capacity(table.row_count());
    let keep: Vec<bool> = (0..table.row_count())
        .map(|index| {
            let key: Vec<ValueKey> = table
                .columns()
                .iter()
                .map(|c| c.values[index].key())
                .collect();
            seen.insert(key)
        })
        .collect();

    table.filter_rows(&keep)
}

/// Replace missing cells of each numeric column with that column's mean.
/// Columns without any present value have no mean and stay as they are.
pub fn fill_missing_with_mean(table: &Table) -> Table {
    let columns: Vec<Column> = table
        .columns()
        .iter()
        .map(|column| {
            if !column.is_numeric() || column.missing_count() == 0 {
                return column.clone();
            }
            let Some(mean) = column.mean() else {
                return column.clone();
            };
            let values = column
                .values
                .iter()
                .map(|v| match v {
                    Value::Missing => Value::Float(mean),
                    other => other.clone(),
                })
                .collect();
            Column::new(column.name.clone(), values)
        })
        .collect();

    // Same shape as the input, so the row count carries over unchanged
    Table::with_row_count(columns, table.row_count()).unwrap_or_else(|_| table.clone())
}
