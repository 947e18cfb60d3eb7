//! Schema definitions and their display form.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Reserved marker for "expect zero arguments".
///
/// As a standalone value schema it accepts only a missing value. Classified
/// as an overload signature it becomes [`Signature::NoArgs`](crate::overload::Signature::NoArgs).
pub const NO_PARAMS: Schema = Schema::Absent;

/// Runtime schema over dynamic values.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Any value, including a missing one.
    Any,
    /// Only a missing value.
    Absent,
    /// `null`.
    Null,
    /// `true` or `false`.
    Bool,
    /// Any JSON number.
    Number,
    /// A number with no fractional part.
    Integer,
    /// A string.
    String,
    /// Exactly this value.
    Literal(Value),
    /// Homogeneous array.
    Array(Box<Schema>),
    /// Fixed-position array, optionally with a variadic tail.
    Tuple(TupleSchema),
    /// Object with declared fields.
    Object(ObjectSchema),
    /// The inner schema, or a missing value.
    Optional(Box<Schema>),
    /// The inner schema, or `null`.
    Nullable(Box<Schema>),
    /// First alternative that accepts the value.
    Union(Vec<Schema>),
    /// Caller-supplied refinement or transform.
    Custom(CustomSchema),
}

impl Schema {
    /// Homogeneous array of `element`.
    pub fn array(element: Schema) -> Self {
        Schema::Array(Box::new(element))
    }

    /// Fixed-length tuple.
    pub fn tuple(items: impl IntoIterator<Item = Schema>) -> Self {
        Schema::Tuple(TupleSchema::new(items))
    }

    /// Tuple with a variadic tail, e.g. `[string, ...number[]]`.
    pub fn variadic(items: impl IntoIterator<Item = Schema>, rest: Schema) -> Self {
        Schema::Tuple(TupleSchema::new(items).rest(rest))
    }

    /// Exactly `value`.
    pub fn literal(value: impl Into<Value>) -> Self {
        Schema::Literal(value.into())
    }

    /// Union of alternatives, tried in order.
    pub fn union(alternatives: impl IntoIterator<Item = Schema>) -> Self {
        Schema::Union(alternatives.into_iter().collect())
    }

    /// Named custom check. The closure returns the parsed value or a reason.
    pub fn custom<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        Schema::Custom(CustomSchema::new(name, check))
    }

    /// Also accept a missing value.
    pub fn optional(self) -> Self {
        Schema::Optional(Box::new(self))
    }

    /// Also accept `null`.
    pub fn nullable(self) -> Self {
        Schema::Nullable(Box::new(self))
    }

    /// `self`, or else `other`.
    pub fn or(self, other: Schema) -> Self {
        match self {
            Schema::Union(mut alternatives) => {
                alternatives.push(other);
                Schema::Union(alternatives)
            }
            first => Schema::Union(vec![first, other]),
        }
    }

    /// True for the reserved zero-argument marker.
    pub fn is_no_params(&self) -> bool {
        matches!(self, Schema::Absent)
    }
}

impl From<TupleSchema> for Schema {
    fn from(tuple: TupleSchema) -> Self {
        Schema::Tuple(tuple)
    }
}

impl From<ObjectSchema> for Schema {
    fn from(object: ObjectSchema) -> Self {
        Schema::Object(object)
    }
}

/// Ordered positional items plus an optional variadic tail.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TupleSchema {
    /// Leading positional items.
    pub items: Vec<Schema>,
    /// Schema for every element past `items`, if the tuple is variadic.
    pub rest: Option<Box<Schema>>,
}

impl TupleSchema {
    /// Fixed-length tuple of `items`.
    pub fn new(items: impl IntoIterator<Item = Schema>) -> Self {
        Self {
            items: items.into_iter().collect(),
            rest: None,
        }
    }

    /// Accept any number of trailing elements matching `schema`.
    pub fn rest(mut self, schema: Schema) -> Self {
        self.rest = Some(Box::new(schema));
        self
    }

    /// Smallest accepted length.
    pub fn min_len(&self) -> usize {
        self.items.len()
    }

    /// Largest accepted length, `None` when variadic.
    pub fn max_len(&self) -> Option<usize> {
        match self.rest {
            Some(_) => None,
            None => Some(self.items.len()),
        }
    }
}

/// Policy for object keys that no field declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeys {
    /// Drop them from the parsed value.
    #[default]
    Strip,
    /// Keep them unvalidated.
    Passthrough,
    /// Reject the object.
    Strict,
}

/// Object with declared fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    /// Declared fields, in declaration order.
    pub fields: Vec<(String, Schema)>,
    /// What to do with undeclared keys.
    pub unknown_keys: UnknownKeys,
}

impl ObjectSchema {
    /// Create an object schema with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. Wrap the schema in [`Schema::optional`] to allow it to be missing.
    pub fn field(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.fields.push((name.into(), schema));
        self
    }

    /// Set the unknown-key policy.
    pub fn unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.unknown_keys = policy;
        self
    }
}

type CheckFn = dyn Fn(&Value) -> Result<Value, String> + Send + Sync;

/// Named caller-supplied check.
///
/// Two custom schemas are equal only if they share the same closure.
#[derive(Clone)]
pub struct CustomSchema {
    name: String,
    check: Arc<CheckFn>,
}

impl CustomSchema {
    /// Wrap a check closure under a display name.
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn check(&self, value: &Value) -> Result<Value, String> {
        (self.check)(value)
    }
}

impl PartialEq for CustomSchema {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.check, &other.check)
    }
}

impl fmt::Debug for CustomSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomSchema")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Any => f.write_str("any"),
            Schema::Absent => f.write_str("undefined"),
            Schema::Null => f.write_str("null"),
            Schema::Bool => f.write_str("boolean"),
            Schema::Number => f.write_str("number"),
            Schema::Integer => f.write_str("integer"),
            Schema::String => f.write_str("string"),
            Schema::Literal(value) => write!(f, "{value}"),
            Schema::Array(element) => write_element(f, element),
            Schema::Tuple(tuple) => write!(f, "{tuple}"),
            Schema::Object(object) => write!(f, "{object}"),
            Schema::Optional(inner) => write!(f, "{inner} | undefined"),
            Schema::Nullable(inner) => write!(f, "{inner} | null"),
            Schema::Union(alternatives) => {
                for (i, alt) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{alt}")?;
                }
                Ok(())
            }
            Schema::Custom(custom) => f.write_str(&custom.name),
        }
    }
}

/// `T[]`, parenthesized when `T` is itself a union.
pub(crate) fn write_element(f: &mut fmt::Formatter<'_>, element: &Schema) -> fmt::Result {
    match element {
        Schema::Union(_) | Schema::Optional(_) | Schema::Nullable(_) => write!(f, "({element})[]"),
        _ => write!(f, "{element}[]"),
    }
}

impl TupleSchema {
    /// Comma-separated items, without the surrounding brackets.
    pub(crate) fn write_items(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        if let Some(rest) = &self.rest {
            if !self.items.is_empty() {
                f.write_str(", ")?;
            }
            f.write_str("...")?;
            write_element(f, rest)?;
        }
        Ok(())
    }
}

impl fmt::Display for TupleSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        self.write_items(f)?;
        f.write_str("]")
    }
}

impl fmt::Display for ObjectSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{ ")?;
        for (i, (name, schema)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match schema {
                Schema::Optional(inner) => write!(f, "{name}?: {inner}")?,
                _ => write!(f, "{name}: {schema}")?,
            }
        }
        f.write_str(" }")
    }
}
