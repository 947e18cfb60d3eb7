//! Overload signatures and their classification.
//!
//! Every entry is classified into one of four kinds, and each kind validates
//! the call arguments differently:
//!
//! | kind      | validates                     | handler receives        |
//! |-----------|-------------------------------|-------------------------|
//! | `NoArgs`  | argument count is zero        | nothing                 |
//! | `Fixed`   | whole list against a tuple    | parsed values, spread   |
//! | `Rest`    | every argument against one    | parsed values, spread   |
//! | `Single`  | first argument, plus arity    | the single parsed value |
//!
//! The arity guard applies to `Single` only. Tuple and array schemas encode
//! their own length, but a broad single-value schema would otherwise match
//! calls carrying extra trailing arguments meant for another overload.

use std::fmt;

use serde_json::Value;

use super::handler::Arguments;
use crate::schema::{parse_each, write_element, PathSegment, Schema, SchemaIssue, TupleSchema};

/// Classification tag of a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureKind {
    /// Matches only a call with no arguments.
    NoArgs,
    /// Fixed-length tuple, optionally with a variadic tail.
    Fixed,
    /// Homogeneous array of arguments.
    Rest,
    /// One value validated against the first argument.
    Single,
}

impl fmt::Display for SignatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SignatureKind::NoArgs => "no-arguments",
            SignatureKind::Fixed => "fixed-tuple",
            SignatureKind::Rest => "rest-array",
            SignatureKind::Single => "single-value",
        })
    }
}

/// How an entry matches call arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Signature {
    /// Zero arguments.
    NoArgs,
    /// The argument list as a tuple.
    Fixed(TupleSchema),
    /// Every argument against the element schema.
    Rest(Schema),
    /// The first argument against the schema.
    Single(Schema),
}

impl Signature {
    /// Classify a bare schema.
    ///
    /// [`NO_PARAMS`](crate::schema::NO_PARAMS) becomes `NoArgs`, tuples become
    /// `Fixed`, arrays become `Rest`, and anything else is `Single`.
    pub fn classify(schema: Schema) -> Self {
        match schema {
            no_params if no_params.is_no_params() => Signature::NoArgs,
            Schema::Tuple(tuple) => Signature::Fixed(tuple),
            Schema::Array(element) => Signature::Rest(*element),
            other => Signature::Single(other),
        }
    }

    /// Classification tag.
    pub fn kind(&self) -> SignatureKind {
        match self {
            Signature::NoArgs => SignatureKind::NoArgs,
            Signature::Fixed(_) => SignatureKind::Fixed,
            Signature::Rest(_) => SignatureKind::Rest,
            Signature::Single(_) => SignatureKind::Single,
        }
    }

    /// Validate a call's arguments and shape them for the handler.
    ///
    /// `arity` is the entry's minimum-argument-count; only `Single` reads it.
    pub fn validate(&self, args: &[Value], arity: usize) -> Result<Arguments, SchemaIssue> {
        match self {
            Signature::NoArgs => {
                if args.is_empty() {
                    Ok(Arguments::Empty)
                } else {
                    Err(SchemaIssue::new(
                        "no arguments",
                        format!("{} argument(s)", args.len()),
                    ))
                }
            }
            Signature::Fixed(tuple) => tuple.parse_elements(args).map(Arguments::Spread),
            Signature::Rest(element) => parse_each(element, args).map(Arguments::Spread),
            Signature::Single(schema) => {
                if args.len() != arity {
                    return Err(SchemaIssue::new(
                        format!("{arity} argument(s)"),
                        format!("{} argument(s)", args.len()),
                    ));
                }
                schema
                    .parse(args.first())
                    .map(Arguments::Single)
                    .map_err(|issue| issue.at(PathSegment::Index(0)))
            }
        }
    }
}

impl From<Schema> for Signature {
    fn from(schema: Schema) -> Self {
        Signature::classify(schema)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signature::NoArgs => f.write_str("()"),
            Signature::Fixed(tuple) => {
                f.write_str("(")?;
                tuple.write_items(f)?;
                f.write_str(")")
            }
            Signature::Rest(element) => {
                f.write_str("(...")?;
                write_element(f, element)?;
                f.write_str(")")
            }
            Signature::Single(schema) => write!(f, "({schema})"),
        }
    }
}

/// Diagnostic view of one declared entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OverloadSignature {
    /// Declaration index.
    pub index: usize,
    /// The entry's signature.
    pub signature: Signature,
    /// Declared minimum-argument-count, if any.
    pub min_args: Option<usize>,
}

impl OverloadSignature {
    /// Describe an entry.
    pub fn new(index: usize, signature: Signature, min_args: Option<usize>) -> Self {
        Self {
            index,
            signature,
            min_args,
        }
    }

    /// Effective minimum-argument-count (undeclared counts as zero).
    pub fn arity(&self) -> usize {
        self.min_args.unwrap_or(0)
    }
}

impl fmt::Display for OverloadSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.index, self.signature)?;
        if self.signature.kind() == SignatureKind::Single {
            write!(f, " with {} argument(s)", self.arity())?;
        }
        Ok(())
    }
}
