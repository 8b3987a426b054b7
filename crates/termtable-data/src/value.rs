use serde::{Deserialize, Serialize};
use std::fmt;

/// A single raw table cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl CellValue {
    /// Null and the empty string both count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Str(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Numeric view of the value; numeric-looking strings are parsed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            CellValue::Str(s) => parse_number(s),
            CellValue::Null | CellValue::Bool(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            CellValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            CellValue::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            CellValue::Null => serde_json::Value::Null,
            CellValue::Bool(b) => serde_json::Value::Bool(*b),
            CellValue::Int(i) => serde_json::Value::from(*i),
            CellValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            CellValue::Str(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Str(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Str(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        CellValue::Str(value.clone())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Int(value as i64)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Int(value as i64)
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Int(value as i64)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Null,
            serde_json::Value::Bool(b) => CellValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => n.as_f64().map(CellValue::Float).unwrap_or(CellValue::Null),
            },
            serde_json::Value::String(s) => CellValue::Str(s),
            other => CellValue::Str(other.to_string()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(CellValue::from)
    }
}

/// Column type inferred from the values of one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    String,
}

impl ColumnType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::String => "string",
        }
    }

    /// Infer the type of a column. Empty values are ignored; a column with
    /// no non-empty values is a string column.
    pub fn infer<'a, I>(values: I) -> ColumnType
    where
        I: IntoIterator<Item = &'a CellValue>,
    {
        let mut seen_any = false;
        let mut all_int = true;
        let mut all_numeric = true;
        let mut all_bool = true;

        for value in values.into_iter().filter(|v| !v.is_empty()) {
            seen_any = true;
            let kind = literal_kind(value);
            all_int &= kind == Literal::Integer;
            all_numeric &= matches!(kind, Literal::Integer | Literal::Float);
            all_bool &= kind == Literal::Boolean;
            if !all_numeric && !all_bool {
                return ColumnType::String;
            }
        }

        if !seen_any {
            ColumnType::String
        } else if all_int {
            ColumnType::Integer
        } else if all_numeric {
            ColumnType::Float
        } else if all_bool {
            ColumnType::Boolean
        } else {
            ColumnType::String
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Literal {
    Integer,
    Float,
    Boolean,
    Other,
}

fn literal_kind(value: &CellValue) -> Literal {
    match value {
        CellValue::Int(_) => Literal::Integer,
        CellValue::Float(_) => Literal::Float,
        CellValue::Bool(_) => Literal::Boolean,
        CellValue::Null => Literal::Other,
        CellValue::Str(s) => {
            let s = s.trim();
            if s.parse::<i64>().is_ok() {
                Literal::Integer
            } else if is_float_literal(s) {
                Literal::Float
            } else if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") {
                Literal::Boolean
            } else {
                Literal::Other
            }
        }
    }
}

/// Decimal literal such as `3.14`, `-0.5`, `.5` or `1e3`; rejects `inf`/`nan`.
fn is_float_literal(s: &str) -> bool {
    let body = s.strip_prefix(['-', '+']).unwrap_or(s);
    !body.is_empty()
        && body.chars().any(|c| c.is_ascii_digit())
        && body
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '-' | '+'))
        && s.parse::<f64>().is_ok()
}

fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.parse::<i64>().is_ok() || is_float_literal(s) {
        s.parse().ok()
    } else {
        None
    }
}
