use crate::domain::error::{AppError, Result};
use crate::domain::sweep::{ChartData, ChartSeries};
use crate::domain::table::{Table, Value};

/// Numeric columns plotted at most
pub const MAX_CHART_SERIES: usize = 2;

/// Bar chart of the first numeric columns, one bar group per row
pub fn chart_summary(table: &Table) -> Result<ChartData> {
    let series: Vec<ChartSeries> = table
        .columns()
        .iter()
        .filter(|c| c.is_numeric())
        .take(MAX_CHART_SERIES)
        .map(|c| ChartSeries {
            name: c.name.clone(),
            values: c.values.iter().map(Value::as_f64).collect(),
        })
        .collect();

    if series.is_empty() || table.row_count() == 0 {
        return Err(AppError::EmptyNumericData);
    }

    Ok(ChartData {
        categories: (0..table.row_count()).collect(),
        series,
    })
}
