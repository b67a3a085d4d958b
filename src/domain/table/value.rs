// ============================================================
// CELL VALUES
// ============================================================
// Scalar cell representation shared by decoders, cleaners and encoders

use serde::{Serialize, Serializer};

/// Tokens read as a missing value, following the usual dataframe defaults
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Missing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Hashable identity of a value, used for duplicate detection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Missing,
    Bool(bool),
    Number(u64),
    Text(String),
}

impl Value {
    /// Build a value from raw text, mapping NA tokens to `Missing`
    pub fn from_text(raw: &str) -> Self {
        if Self::is_na_token(raw) {
            Value::Missing
        } else {
            Value::Text(raw.to_string())
        }
    }

    pub fn is_na_token(raw: &str) -> bool {
        NA_TOKENS.contains(&raw)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Numeric view of the value; `None` for anything that is not a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Identity for equality checks across rows.
    /// Int and Float compare numerically, so `1` and `1.0` are the same key.
    pub fn key(&self) -> ValueKey {
        match self {
            Value::Missing => ValueKey::Missing,
            Value::Bool(b) => ValueKey::Bool(*b),
            Value::Int(v) => ValueKey::Number(normalize_bits(*v as f64)),
            Value::Float(v) => ValueKey::Number(normalize_bits(*v)),
            Value::Text(s) => ValueKey::Text(s.clone()),
        }
    }

    /// Text form used in comma-separated output
    pub fn to_csv_field(&self) -> String {
        match self {
            Value::Missing => String::new(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => format_float(*v),
            Value::Text(s) => s.clone(),
        }
    }
}

fn normalize_bits(v: f64) -> u64 {
    // -0.0 and 0.0 are the same number
    if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}

/// Shortest round-trip form, always carrying a decimal point or exponent
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return String::new();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }
    format!("{:?}", v)
}

/// Parse a numeric-looking string. `inf` and `infinity` are accepted with an
/// optional sign; other words are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if let Some(v) = parse_infinity(trimmed) {
        return Some(v);
    }
    if trimmed.is_empty()
        || !trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        || !trimmed.chars().any(|c| c.is_ascii_digit())
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

fn parse_infinity(raw: &str) -> Option<f64> {
    let (sign, word) = match raw.as_bytes().first() {
        Some(b'-') => (-1.0, &raw[1..]),
        Some(b'+') => (1.0, &raw[1..]),
        _ => (1.0, raw),
    };
    if word.eq_ignore_ascii_case("inf") || word.eq_ignore_ascii_case("infinity") {
        Some(sign * f64::INFINITY)
    } else {
        None
    }
}

pub fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Missing => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Float(v) if v.is_finite() => serializer.serialize_f64(*v),
            Value::Float(_) => serializer.serialize_none(),
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}
