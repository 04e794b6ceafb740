//! Scalar cell values and their SQL-literal rendering

use crate::error::{Result, TablediffError};
use std::fmt;

/// A single scalar cell fetched from a table scan.
///
/// Nullable source representations (e.g. a column that may hold SQL NULL)
/// are normalized into these variants at construction time via the
/// `From<Option<_>>` impls, so a missing optional and an explicit NULL are
/// indistinguishable from here on.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(Vec<u8>),
}

/// The kind of a [`Value`], used in type-mismatch diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Integer,
    Float,
    Text,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
        };
        write!(f, "{}", name)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Strict less-than between two values of the same kind.
    ///
    /// Ordering is only defined within one kind (text compares byte-wise).
    /// Anything else, including NULL on either side, is a caller bug and
    /// fails with a type-mismatch error.
    pub fn is_before(&self, other: &Value) -> Result<bool> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Ok(a < b),
            (Value::Float(a), Value::Float(b)) => Ok(a < b),
            (Value::Text(a), Value::Text(b)) => Ok(a < b),
            _ => Err(TablediffError::type_mismatch(
                self.kind().to_string(),
                other.kind().to_string(),
            )),
        }
    }

    /// NULL-aware equality.
    ///
    /// `NULL == NULL` holds; `NULL` never equals a concrete value. Two
    /// concrete values of different kinds are a type-mismatch error.
    pub fn equals(&self, other: &Value) -> Result<bool> {
        match (self, other) {
            (Value::Null, Value::Null) => Ok(true),
            (Value::Null, _) | (_, Value::Null) => Ok(false),
            (Value::Integer(a), Value::Integer(b)) => Ok(a == b),
            (Value::Float(a), Value::Float(b)) => Ok(a == b),
            (Value::Text(a), Value::Text(b)) => Ok(a == b),
            _ => Err(TablediffError::type_mismatch(
                self.kind().to_string(),
                other.kind().to_string(),
            )),
        }
    }

    /// Render as a SQL literal.
    ///
    /// Floats use Rust's shortest round-trip decimal formatting; text is
    /// single-quoted with embedded quotes backslash-escaped.
    pub fn render(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Text(bytes) => escape(&String::from_utf8_lossy(bytes)),
        }
    }
}

/// Quote and escape a string for use as a SQL literal.
pub fn escape(s: &str) -> String {
    format!("'{}'", s.replace('\'', "\\'"))
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v.into_bytes())
    }
}

impl From<Option<i64>> for Value {
    fn from(v: Option<i64>) -> Self {
        v.map_or(Value::Null, Value::Integer)
    }
}

impl From<Option<f64>> for Value {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Value::Null, Value::Float)
    }
}

impl From<Option<Vec<u8>>> for Value {
    fn from(v: Option<Vec<u8>>) -> Self {
        v.map_or(Value::Null, Value::Text)
    }
}

impl From<Option<String>> for Value {
    fn from(v: Option<String>) -> Self {
        v.map_or(Value::Null, |s| Value::Text(s.into_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_before_same_kind() {
        assert!(Value::Integer(1).is_before(&Value::Integer(2)).unwrap());
        assert!(!Value::Integer(2).is_before(&Value::Integer(2)).unwrap());
        assert!(Value::Float(1.5).is_before(&Value::Float(2.5)).unwrap());
        assert!(Value::from("abc").is_before(&Value::from("abd")).unwrap());
        assert!(!Value::from("b").is_before(&Value::from("a")).unwrap());
    }

    #[test]
    fn test_is_before_cross_kind_fails() {
        let err = Value::Integer(1).is_before(&Value::from("x")).unwrap_err();
        assert!(matches!(
            err,
            TablediffError::TypeMismatch { .. }
        ));
        // NULL is never orderable
        assert!(Value::Null.is_before(&Value::Null).is_err());
        assert!(Value::Integer(1).is_before(&Value::Null).is_err());
    }

    #[test]
    fn test_equals_null_semantics() {
        assert!(Value::Null.equals(&Value::Null).unwrap());
        assert!(!Value::Null.equals(&Value::Integer(1)).unwrap());
        assert!(!Value::from("x").equals(&Value::Null).unwrap());
    }

    #[test]
    fn test_equals_same_kind() {
        assert!(Value::Integer(7).equals(&Value::Integer(7)).unwrap());
        assert!(!Value::Integer(7).equals(&Value::Integer(8)).unwrap());
        assert!(Value::from("abc").equals(&Value::from("abc")).unwrap());
        assert!(Value::Float(0.5).equals(&Value::Float(0.5)).unwrap());
    }

    #[test]
    fn test_equals_cross_kind_fails() {
        assert!(Value::Integer(1).equals(&Value::Float(1.0)).is_err());
        assert!(Value::from("1").equals(&Value::Integer(1)).is_err());
    }

    #[test]
    fn test_render() {
        assert_eq!(Value::Null.render(), "NULL");
        assert_eq!(Value::Integer(-42).render(), "-42");
        assert_eq!(Value::Float(1.5).render(), "1.5");
        assert_eq!(Value::Float(0.1).render(), "0.1");
        assert_eq!(Value::from("hello").render(), "'hello'");
        assert_eq!(Value::from("it's").render(), "'it\\'s'");
    }

    #[test]
    fn test_render_round_trips_scalars() {
        for f in [0.1, 1.0 / 3.0, 1e-7, 123456.789, -2.5] {
            assert_eq!(Value::Float(f).render().parse::<f64>().unwrap(), f);
        }
        assert_eq!(Value::Integer(-42).render().parse::<i64>().unwrap(), -42);

        // Text round-trips after stripping quotes and unescaping
        let rendered = Value::from("it's").render();
        let inner = &rendered[1..rendered.len() - 1];
        assert_eq!(inner.replace("\\'", "'"), "it's");
    }

    #[test]
    fn test_nullable_normalization() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(3i64)), Value::Integer(3));
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(
            Value::from(Some("x".to_string())),
            Value::Text(b"x".to_vec())
        );
        // Optional and plain forms compare identically once constructed
        assert!(Value::from(Some(3i64))
            .equals(&Value::Integer(3))
            .unwrap());
    }
}
