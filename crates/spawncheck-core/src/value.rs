//! Tagged value storage for projected columns.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The primitive value kinds the projection understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Str,
    I32,
    F32,
    Bool,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Str => write!(f, "string"),
            ScalarKind::I32 => write!(f, "int"),
            ScalarKind::F32 => write!(f, "float"),
            ScalarKind::Bool => write!(f, "bool"),
        }
    }
}

/// Storage type of a projected column: a scalar kind or an array of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Scalar(ScalarKind),
    Array(ScalarKind),
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Scalar(kind) => write!(f, "{kind}"),
            ColumnType::Array(kind) => write!(f, "{kind}[]"),
        }
    }
}

/// A value stored in a projected row.
///
/// `None` is the flattened form of a dangling cross-record reference and is
/// accepted by a column of any type.
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Str(Arc<str>),
    I32(i32),
    F32(f32),
    Bool(bool),
    StrArray(Vec<Arc<str>>),
    I32Array(Vec<i32>),
    F32Array(Vec<f32>),
    BoolArray(Vec<bool>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            // Bit equality keeps Eq and Hash consistent for float columns.
            (Value::F32(a), Value::F32(b)) => a.to_bits() == b.to_bits(),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::StrArray(a), Value::StrArray(b)) => a == b,
            (Value::I32Array(a), Value::I32Array(b)) => a == b,
            (Value::F32Array(a), Value::F32Array(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|(x, y)| x.to_bits() == y.to_bits())
            }
            (Value::BoolArray(a), Value::BoolArray(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::None => {}
            Value::Str(v) => v.hash(state),
            Value::I32(v) => v.hash(state),
            Value::F32(v) => v.to_bits().hash(state),
            Value::Bool(v) => v.hash(state),
            Value::StrArray(v) => v.hash(state),
            Value::I32Array(v) => v.hash(state),
            Value::F32Array(v) => {
                for item in v {
                    item.to_bits().hash(state);
                }
            }
            Value::BoolArray(v) => v.hash(state),
        }
    }
}

impl Value {
    /// Returns true if this is the no-value marker.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Attempts to extract a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to extract an i32 value.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::I32(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to extract an f32 value.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::F32(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to extract a bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to extract a string array.
    pub fn as_str_slice(&self) -> Option<&[Arc<str>]> {
        match self {
            Value::StrArray(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to extract an i32 array.
    pub fn as_i32_slice(&self) -> Option<&[i32]> {
        match self {
            Value::I32Array(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the column type this value would be stored under.
    ///
    /// `None` carries no type of its own and returns no column type.
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            Value::None => None,
            Value::Str(_) => Some(ColumnType::Scalar(ScalarKind::Str)),
            Value::I32(_) => Some(ColumnType::Scalar(ScalarKind::I32)),
            Value::F32(_) => Some(ColumnType::Scalar(ScalarKind::F32)),
            Value::Bool(_) => Some(ColumnType::Scalar(ScalarKind::Bool)),
            Value::StrArray(_) => Some(ColumnType::Array(ScalarKind::Str)),
            Value::I32Array(_) => Some(ColumnType::Array(ScalarKind::I32)),
            Value::F32Array(_) => Some(ColumnType::Array(ScalarKind::F32)),
            Value::BoolArray(_) => Some(ColumnType::Array(ScalarKind::Bool)),
        }
    }

    /// Checks whether this value can be stored in a column of the given type.
    pub fn matches(&self, ty: ColumnType) -> bool {
        match self.column_type() {
            Some(own) => own == ty,
            None => true,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "<none>"),
            Value::Str(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::StrArray(v) => {
                write!(f, "[")?;
                for (i, item) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::I32Array(v) => write!(f, "{v:?}"),
            Value::F32Array(v) => write!(f, "{v:?}"),
            Value::BoolArray(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(Arc::from(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::F32(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_accessors() {
        let v = Value::I32(42);
        assert_eq!(v.as_i32(), Some(42));
        assert_eq!(v.as_str(), None);
        assert!(!v.is_none());

        let v = Value::from("hello");
        assert_eq!(v.as_str(), Some("hello"));

        assert!(Value::None.is_none());
        assert_eq!(Value::None.as_bool(), None);
    }

    #[test]
    fn test_column_type_match() {
        assert!(Value::I32(1).matches(ColumnType::Scalar(ScalarKind::I32)));
        assert!(!Value::I32(1).matches(ColumnType::Scalar(ScalarKind::Str)));
        assert!(Value::I32Array(vec![1, 2]).matches(ColumnType::Array(ScalarKind::I32)));
        assert!(!Value::I32Array(vec![1]).matches(ColumnType::Scalar(ScalarKind::I32)));

        // No-value fits any column.
        assert!(Value::None.matches(ColumnType::Scalar(ScalarKind::Bool)));
        assert!(Value::None.matches(ColumnType::Array(ScalarKind::Str)));
    }

    #[test]
    fn test_hash_map_key() {
        let mut map = HashMap::new();
        map.insert(Value::from("ak47"), 0usize);
        map.insert(Value::I32(7), 1);
        assert_eq!(map.get(&Value::from("ak47")), Some(&0));
        assert_eq!(map.get(&Value::I32(7)), Some(&1));
        assert_eq!(map.get(&Value::I32(8)), None);
    }

    #[test]
    fn test_float_equality_is_bitwise() {
        assert_eq!(Value::F32(1.5), Value::F32(1.5));
        assert_ne!(Value::F32(1.5), Value::F32(1.5000001));
        assert_eq!(Value::F32(f32::NAN), Value::F32(f32::NAN));
    }
}
