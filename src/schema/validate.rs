//! Schema validation.
//!
//! Parsing returns the value a handler should see: objects lose undeclared
//! keys under [`UnknownKeys::Strip`], custom schemas may transform, integral
//! floats become integers under [`Schema::Integer`], and a missing value that
//! a schema accepts parses to `null`.

use serde_json::{Map, Value};

use super::issue::{kind_of, PathSegment, SchemaIssue};
use super::types::{ObjectSchema, Schema, TupleSchema, UnknownKeys};

impl Schema {
    /// Validate `value`, where `None` means the value is missing entirely.
    pub fn parse(&self, value: Option<&Value>) -> Result<Value, SchemaIssue> {
        match (self, value) {
            (Schema::Any | Schema::Absent | Schema::Optional(_), None) => Ok(Value::Null),
            (Schema::Nullable(inner), None) => inner
                .parse(None)
                .map_err(|_| SchemaIssue::mismatch(self, None)),
            (Schema::Union(alternatives), None) => alternatives
                .iter()
                .find_map(|alt| alt.parse(None).ok())
                .ok_or_else(|| SchemaIssue::mismatch(self, None)),
            (_, None) => Err(SchemaIssue::mismatch(self, None)),
            (_, Some(v)) => self.parse_present(v),
        }
    }

    /// True if `value` passes validation.
    pub fn accepts(&self, value: Option<&Value>) -> bool {
        self.parse(value).is_ok()
    }

    fn parse_present(&self, value: &Value) -> Result<Value, SchemaIssue> {
        match self {
            Schema::Any => Ok(value.clone()),
            Schema::Absent => Err(SchemaIssue::mismatch(self, Some(value))),
            Schema::Null => check_kind(value.is_null(), self, value),
            Schema::Bool => check_kind(value.is_boolean(), self, value),
            Schema::Number => check_kind(value.is_number(), self, value),
            Schema::Integer => {
                parse_integer(value).ok_or_else(|| SchemaIssue::mismatch(self, Some(value)))
            }
            Schema::String => check_kind(value.is_string(), self, value),
            Schema::Literal(expected) => {
                if value == expected {
                    Ok(value.clone())
                } else {
                    Err(SchemaIssue::new(expected.to_string(), value.to_string()))
                }
            }
            Schema::Array(element) => match value {
                Value::Array(items) => parse_each(element, items).map(Value::Array),
                _ => Err(SchemaIssue::mismatch(self, Some(value))),
            },
            Schema::Tuple(tuple) => match value {
                Value::Array(items) => tuple.parse_elements(items).map(Value::Array),
                _ => Err(SchemaIssue::mismatch(self, Some(value))),
            },
            Schema::Object(object) => match value {
                Value::Object(map) => object.parse_fields(map).map(Value::Object),
                _ => Err(SchemaIssue::mismatch(self, Some(value))),
            },
            Schema::Optional(inner) => inner.parse_present(value),
            Schema::Nullable(inner) => {
                if value.is_null() {
                    Ok(Value::Null)
                } else {
                    inner.parse_present(value)
                }
            }
            Schema::Union(alternatives) => alternatives
                .iter()
                .find_map(|alt| alt.parse_present(value).ok())
                .ok_or_else(|| SchemaIssue::mismatch(self, Some(value))),
            Schema::Custom(custom) => custom
                .check(value)
                .map_err(|reason| SchemaIssue::new(custom.name(), reason)),
        }
    }
}

impl TupleSchema {
    /// Validate a positional sequence, e.g. a whole call argument list.
    pub fn parse_elements(&self, values: &[Value]) -> Result<Vec<Value>, SchemaIssue> {
        let len = values.len();
        match &self.rest {
            None if len != self.items.len() => {
                return Err(SchemaIssue::new(
                    format!("exactly {} element(s)", self.items.len()),
                    len.to_string(),
                ));
            }
            Some(_) if len < self.items.len() => {
                return Err(SchemaIssue::new(
                    format!("at least {} element(s)", self.items.len()),
                    len.to_string(),
                ));
            }
            _ => {}
        }

        let mut parsed = Vec::with_capacity(len);
        for (i, value) in values.iter().enumerate() {
            // Past the positional items only a variadic tuple gets here.
            let Some(schema) = self.items.get(i).or(self.rest.as_deref()) else {
                break;
            };
            let v = schema
                .parse(Some(value))
                .map_err(|issue| issue.at(PathSegment::Index(i)))?;
            parsed.push(v);
        }
        Ok(parsed)
    }
}

impl ObjectSchema {
    fn parse_fields(&self, map: &Map<String, Value>) -> Result<Map<String, Value>, SchemaIssue> {
        let mut parsed = Map::new();

        for (name, schema) in &self.fields {
            let raw = map.get(name);
            let v = schema
                .parse(raw)
                .map_err(|issue| issue.at(PathSegment::Key(name.clone())))?;
            if raw.is_some() {
                parsed.insert(name.clone(), v);
            }
        }

        if self.unknown_keys == UnknownKeys::Strip {
            return Ok(parsed);
        }

        for (key, value) in map {
            if self.fields.iter().any(|(name, _)| name == key) {
                continue;
            }
            match self.unknown_keys {
                UnknownKeys::Strict => {
                    return Err(
                        SchemaIssue::new("no undeclared keys", format!("key `{key}`"))
                            .at(PathSegment::Key(key.clone())),
                    );
                }
                UnknownKeys::Passthrough => {
                    parsed.insert(key.clone(), value.clone());
                }
                UnknownKeys::Strip => {}
            }
        }
        Ok(parsed)
    }
}

/// Validate every element against one schema.
pub(crate) fn parse_each(element: &Schema, values: &[Value]) -> Result<Vec<Value>, SchemaIssue> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            element
                .parse(Some(v))
                .map_err(|issue| issue.at(PathSegment::Index(i)))
        })
        .collect()
}

fn check_kind(ok: bool, schema: &Schema, value: &Value) -> Result<Value, SchemaIssue> {
    if ok {
        Ok(value.clone())
    } else {
        Err(SchemaIssue::new(schema.to_string(), kind_of(Some(value))))
    }
}

/// Integral floats such as `2.0` come back as integers so that handlers
/// typed `i64` or `usize` can decode them.
fn parse_integer(value: &Value) -> Option<Value> {
    let Value::Number(n) = value else {
        return None;
    };
    if n.is_i64() || n.is_u64() {
        return Some(value.clone());
    }
    let f = n.as_f64().filter(|f| f.is_finite() && f.fract() == 0.0)?;
    if f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(Value::from(f as i64))
    } else {
        Some(value.clone())
    }
}
