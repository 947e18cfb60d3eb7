//! Schema module - runtime shape validation for dynamic argument values.
//!
//! Provides:
//! - [`Schema`] - a closed schema language over `serde_json::Value`
//! - [`TupleSchema`] / [`ObjectSchema`] - composite shapes with their own options
//! - [`SchemaIssue`] - why a value was rejected, with the path to the offending element
//!
//! Validation never fails with an error: [`Schema::parse`] returns either the
//! parsed value or the issue as data. Missing input (an argument position the
//! caller never supplied) is passed as `None`.
//!
//! # Example
//!
//! ```
//! use overload_dispatch::schema::{Schema, TupleSchema};
//! use serde_json::json;
//!
//! let pair = Schema::Tuple(TupleSchema::new([Schema::String, Schema::Number]));
//! assert!(pair.parse(Some(&json!(["a", 1]))).is_ok());
//!
//! let issue = pair.parse(Some(&json!(["a", "b"]))).unwrap_err();
//! assert_eq!(issue.to_string(), "at [1]: expected number, found string");
//! ```

mod issue;
mod types;
mod validate;

pub use issue::{PathSegment, SchemaIssue};
pub use types::{CustomSchema, ObjectSchema, Schema, TupleSchema, UnknownKeys, NO_PARAMS};

pub(crate) use types::write_element;
pub(crate) use validate::parse_each;
