//! Open property bag attached to every entity

use std::collections::HashMap;
use std::fmt;

/// Dynamically typed attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Boolean flag
    Bool(bool),
    /// Whole number
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Free text
    Text(String),
}

impl AttributeValue {
    /// Numeric view; integers are widened
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Integer view; only exact integers qualify
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Boolean view
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Text view
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Human-readable type name, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "number",
            Self::Text(_) => "string",
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f32> for AttributeValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// String-keyed attribute map.
///
/// Every read goes through a default: absence is a normal condition, not an
/// error. Required attributes are checked by the owner, which knows the
/// entity name to report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    values: HashMap<String, AttributeValue>,
}

impl Attributes {
    /// Create an empty attribute map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Raw value, if present
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.values.get(key)
    }

    /// Value or the given default
    pub fn get_or(&self, key: &str, default: impl Into<AttributeValue>) -> AttributeValue {
        self.values.get(key).cloned().unwrap_or_else(|| default.into())
    }

    /// Numeric value or default; a present non-numeric value also yields the default
    pub fn f64_or(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(AttributeValue::as_f64).unwrap_or(default)
    }

    /// Integer value or default
    pub fn i64_or(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(AttributeValue::as_i64).unwrap_or(default)
    }

    /// Boolean value or default
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(AttributeValue::as_bool).unwrap_or(default)
    }

    /// Text value or default
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).and_then(AttributeValue::as_str).unwrap_or(default)
    }

    /// Whether the key is present
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Remove a value, returning it
    pub fn remove(&mut self, key: &str) -> Option<AttributeValue> {
        self.values.remove(key)
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no attributes
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all key/value pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
