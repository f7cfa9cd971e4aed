use std::cmp::Ordering;
use std::fmt;

/// The value types a condition or action argument can produce.
///
/// `None` is what a [`Variable`](super::Expr::Variable) resolves to when the
/// attribute path is absent from the resource; it is a first-class value so
/// that rules over optional attributes do not error.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Int(i64),
    /// A UTF-8 string.
    Str(String),
    /// A boolean value.
    Bool(bool),
    /// The absent value.
    None,
}

impl Value {
    /// Whether this value counts as true in a boolean position.
    ///
    /// Zero, the empty string, and `None` are false; everything else is true.
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Value::Int(i) => *i != 0,
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::None => false,
        }
    }

    /// Ordering between two values, defined only within a type.
    /// Returns `None` for mismatched or unordered operand types, so ordering
    /// comparisons across types evaluate to false rather than erroring.
    pub(crate) fn partial_cmp_value(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "\"{v}\""),
            Value::Bool(v) => write!(f, "{v}"),
            Value::None => write!(f, "none"),
        }
    }
}
