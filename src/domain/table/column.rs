// ============================================================
// COLUMNS
// ============================================================
// Named value sequences and per-column type inference

use serde::Serialize;

use super::value::{parse_bool, parse_int, parse_number, Value};

/// A named column of cells
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Build a column from raw decoded cells, settling on one scalar kind
    pub fn inferred(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(name, infer_values(values))
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    /// True when every present value is a number.
    /// A column holding nothing but missing values counts as numeric.
    pub fn is_numeric(&self) -> bool {
        self.values
            .iter()
            .all(|v| v.is_missing() || v.is_numeric())
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Arithmetic mean of the present numeric values
    pub fn mean(&self) -> Option<f64> {
        let (sum, count) = self
            .values
            .iter()
            .filter_map(Value::as_f64)
            .fold((0.0f64, 0usize), |(sum, count), v| (sum + v, count + 1));
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }
}

enum Kind {
    Int,
    Float,
    Bool,
    Keep,
}

fn infer_values(values: Vec<Value>) -> Vec<Value> {
    let kind = detect_kind(&values);
    match kind {
        Kind::Keep => values,
        Kind::Int => values
            .into_iter()
            .map(|v| match v {
                Value::Text(s) => parse_int(&s).map(Value::Int).unwrap_or(Value::Text(s)),
                Value::Float(f) => Value::Int(f as i64),
                other => other,
            })
            .collect(),
        Kind::Float => values
            .into_iter()
            .map(|v| match v {
                Value::Text(s) => parse_number(&s).map(Value::Float).unwrap_or(Value::Text(s)),
                Value::Int(i) => Value::Float(i as f64),
                other => other,
            })
            .collect(),
        Kind::Bool => values
            .into_iter()
            .map(|v| match v {
                Value::Text(s) => parse_bool(&s).map(Value::Bool).unwrap_or(Value::Text(s)),
                other => other,
            })
            .collect(),
    }
}

fn detect_kind(values: &[Value]) -> Kind {
    let present: Vec<&Value> = values.iter().filter(|v| !v.is_missing()).collect();
    if present.is_empty() {
        return Kind::Keep;
    }

    let all_numeric = present.iter().all(|v| match v {
        Value::Int(_) | Value::Float(_) => true,
        Value::Text(s) => parse_number(s).is_some(),
        _ => false,
    });
    if all_numeric {
        let has_missing = present.len() < values.len();
        let all_integral = present.iter().all(|v| match v {
            Value::Int(_) => true,
            Value::Float(f) => f.fract() == 0.0 && f.abs() < i64::MAX as f64,
            Value::Text(s) => parse_int(s).is_some(),
            _ => false,
        });
        return if all_integral && !has_missing {
            Kind::Int
        } else {
            Kind::Float
        };
    }

    let all_bool = present.iter().all(|v| match v {
        Value::Bool(_) => true,
        Value::Text(s) => parse_bool(s).is_some(),
        _ => false,
    });
    if all_bool {
        return Kind::Bool;
    }

    Kind::Keep
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(values: &[&str]) -> Vec<Value> {
        values.iter().map(|s| Value::from_text(s)).collect()
    }

    #[test]
    fn test_integer_column() {
        let column = Column::inferred("a", text(&["1", "2", "-3"]));
        assert_eq!(
            column.values,
            vec![Value::Int(1), Value::Int(2), Value::Int(-3)]
        );
        assert!(column.is_numeric());
    }

    #[test]
    fn test_integer_column_with_missing_becomes_float() {
        let column = Column::inferred("a", text(&["1", "", "3"]));
        assert_eq!(
            column.values,
            vec![Value::Float(1.0), Value::Missing, Value::Float(3.0)]
        );
    }

    #[test]
    fn test_mixed_text_column_is_kept() {
        let column = Column::inferred("a", text(&["1", "abc"]));
        assert_eq!(
            column.values,
            vec![Value::Text("1".to_string()), Value::Text("abc".to_string())]
        );
        assert!(!column.is_numeric());
    }

    #[test]
    fn test_bool_column_is_not_numeric() {
        let column = Column::inferred("flag", text(&["True", "false"]));
        assert_eq!(column.values, vec![Value::Bool(true), Value::Bool(false)]);
        assert!(!column.is_numeric());
    }

    #[test]
    fn test_spreadsheet_integral_floats_become_ints() {
        let column = Column::inferred("n", vec![Value::Float(1.0), Value::Float(4.0)]);
        assert_eq!(column.values, vec![Value::Int(1), Value::Int(4)]);
    }

    #[test]
    fn test_mean_ignores_missing() {
        let column = Column::new("a", vec![Value::Int(1), Value::Missing, Value::Int(3)]);
        assert_eq!(column.mean(), Some(2.0));
        assert_eq!(column.missing_count(), 1);
        assert_eq!(Column::new("b", vec![Value::Missing]).mean(), None);
    }
}
