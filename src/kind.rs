//! The closed set of key and value kinds a table can hold.
//!
//! A table declares one [`KeyKind`] and one [`ValueKind`] up front (its
//! schema). Keys and values are plain sum types whose variant determines
//! their kind, so an entry can never carry a tag that disagrees with its
//! payload.

use std::fmt;

/// Kind of key stored in a table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Integer,
    Text,
}

impl KeyKind {
    /// Every key kind, in declaration order.
    pub const ALL: [KeyKind; 2] = [KeyKind::Integer, KeyKind::Text];

    /// Short name used in dumps.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            KeyKind::Integer => "int",
            KeyKind::Text => "str",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of value stored in a table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Integer,
    Float,
    Text,
    Opaque,
}

impl ValueKind {
    /// Every value kind, in declaration order.
    pub const ALL: [ValueKind; 4] = [
        ValueKind::Integer,
        ValueKind::Float,
        ValueKind::Text,
        ValueKind::Opaque,
    ];

    /// Short name used in dumps.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Integer => "int",
            ValueKind::Float => "flt",
            ValueKind::Text => "str",
            ValueKind::Opaque => "ptr",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A caller-owned token stored as an opaque value.
///
/// The table never interprets it; it is compared and printed, nothing more.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OpaqueHandle(pub usize);

impl fmt::Display for OpaqueHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A key: an integer or a string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Integer(i64),
    Text(String),
}

impl Key {
    #[inline]
    pub fn kind(&self) -> KeyKind {
        match self {
            Key::Integer(_) => KeyKind::Integer,
            Key::Text(_) => KeyKind::Text,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Key::Integer(i) => Some(i),
            Key::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Key::Text(s) => Some(s),
            Key::Integer(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Integer(i) => write!(f, "{}", i),
            Key::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Key {
    fn from(key: i64) -> Self {
        Key::Integer(key)
    }
}

impl From<i32> for Key {
    fn from(key: i32) -> Self {
        Key::Integer(key.into())
    }
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        Key::Text(key.to_owned())
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Key::Text(key)
    }
}

/// A value: integer, float, string or opaque handle.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
    Opaque(OpaqueHandle),
}

impl Value {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
            Value::Opaque(_) => ValueKind::Opaque,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:.2}", x),
            Value::Text(s) => f.write_str(s),
            Value::Opaque(h) => write!(f, "{}", h),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<OpaqueHandle> for Value {
    fn from(value: OpaqueHandle) -> Self {
        Value::Opaque(value)
    }
}
