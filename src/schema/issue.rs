//! Validation issues.

use std::fmt;

use serde_json::Value;

/// One step into a nested value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Array or argument position.
    Index(usize),
    /// Object key.
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "[{i}]"),
            PathSegment::Key(k) => write!(f, ".{k}"),
        }
    }
}

/// Why a value did not satisfy a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// Location of the rejected value, outermost first.
    pub path: Vec<PathSegment>,
    /// What the schema wanted.
    pub expected: String,
    /// What it got.
    pub found: String,
}

impl SchemaIssue {
    /// Create an issue at the root of the validated value.
    pub fn new(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Issue for a value of the wrong kind.
    pub(crate) fn mismatch(expected: impl fmt::Display, value: Option<&Value>) -> Self {
        Self::new(expected.to_string(), kind_of(value))
    }

    /// Prefix the path with an enclosing segment.
    pub(crate) fn at(mut self, segment: PathSegment) -> Self {
        self.path.insert(0, segment);
        self
    }

    /// Render the path, e.g. `[1].name`.
    pub fn path_string(&self) -> String {
        self.path.iter().map(|s| s.to_string()).collect()
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "expected {}, found {}", self.expected, self.found)
        } else {
            write!(
                f,
                "at {}: expected {}, found {}",
                self.path_string(),
                self.expected,
                self.found
            )
        }
    }
}

/// Short name of a value's kind, `undefined` for a missing value.
pub(crate) fn kind_of(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}
