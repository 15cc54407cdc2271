// Dotted field-path lookups over decoded JSON.
//
// A path such as `owner.name` or `sheets.0.uid` is resolved left to right:
// object members are selected by key and array elements by numeric index.
// Only scalars (strings, numbers, booleans) are valid results.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A path expression could not be parsed.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("field path is empty")]
    Empty,
    #[error("field path '{0}' contains an empty segment")]
    EmptySegment(String),
}

/// Why a lookup produced no scalar. Both cases are ordinary outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// A segment does not exist (or its parent cannot be indexed).
    NotFound { segment: String },
    /// The path exists but ends on an object, array or null.
    NotScalar,
}

/// Parsed dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(expr: &str) -> Result<Self, FilterError> {
        let raw = expr.trim();
        if raw.is_empty() {
            return Err(FilterError::Empty);
        }
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(FilterError::EmptySegment(raw.to_string()));
        }
        Ok(FieldPath {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Walk `root` along the path and return the scalar found there.
    pub fn resolve<'a>(&self, root: &'a Value) -> Result<Scalar<'a>, Lookup> {
        let mut current = root;
        for segment in &self.segments {
            let next = match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            current = next.ok_or_else(|| Lookup::NotFound {
                segment: segment.clone(),
            })?;
        }
        Scalar::from_value(current).ok_or(Lookup::NotScalar)
    }
}

impl FromStr for FieldPath {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A scalar borrowed from the tree. Displays as plain text: strings are
/// printed without quotes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    String(&'a str),
    Number(&'a serde_json::Number),
    Bool(bool),
}

impl<'a> Scalar<'a> {
    fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Scalar::String(s)),
            Value::Number(n) => Some(Scalar::Number(n)),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}
