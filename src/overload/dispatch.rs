//! Per-call overload resolution.
//!
//! Each call builds one [`Row`] per declared entry, in declaration order,
//! validates all of them, and then takes the first success. Rows live only
//! for the duration of the call; the method holds no state between calls.

use std::fmt;

use serde_json::Value;

use super::entry::OverloadEntry;
use super::handler::Arguments;
use super::signature::{OverloadSignature, SignatureKind};
use crate::error::{NoMatchingOverload, OverloadError, Result};
use crate::schema::SchemaIssue;

/// Original method body, run when no entry matches.
pub type Fallback<C, R> = Box<dyn Fn(&mut C, Vec<Value>) -> R + Send + Sync>;

/// Validation outcome of one entry for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Declaration index of the entry.
    pub index: usize,
    /// Classification of the entry's signature.
    pub kind: SignatureKind,
    /// Shaped arguments on success, the rejection otherwise.
    pub outcome: std::result::Result<Arguments, SchemaIssue>,
}

impl Row {
    /// True if the entry accepted the call.
    pub fn is_match(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// A method whose calls are routed to overload handlers.
pub struct OverloadedMethod<C, R> {
    name: String,
    entries: Vec<OverloadEntry<C, R>>,
    fallback: Fallback<C, R>,
}

impl<C, R> OverloadedMethod<C, R> {
    pub(crate) fn new(
        name: String,
        entries: Vec<OverloadEntry<C, R>>,
        fallback: Fallback<C, R>,
    ) -> Self {
        Self {
            name,
            entries,
            fallback,
        }
    }

    /// The original method's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of declared entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no entries were declared; every call falls back.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Diagnostic descriptions of every entry, in declaration order.
    pub fn signatures(&self) -> Vec<OverloadSignature> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| e.describe(i))
            .collect()
    }

    /// Validate every entry against `args`.
    pub fn rows(&self, args: &[Value]) -> Vec<Row> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let row = Row {
                    index,
                    kind: entry.signature().kind(),
                    outcome: entry.signature().validate(args, entry.arity()),
                };
                match &row.outcome {
                    Ok(_) => {
                        tracing::trace!("{}: overload #{} ({}) matched", self.name, index, row.kind)
                    }
                    Err(issue) => tracing::trace!(
                        "{}: overload #{} ({}) rejected: {}",
                        self.name,
                        index,
                        row.kind,
                        issue
                    ),
                }
                row
            })
            .collect()
    }

    /// First matching row, if any.
    pub fn resolve(&self, args: &[Value]) -> Option<Row> {
        self.rows(args).into_iter().find(Row::is_match)
    }

    /// Invoke the method on `receiver`.
    ///
    /// Runs the first matching entry's handler, or the fallback with the
    /// original arguments. Whatever either returns is passed through as is.
    ///
    /// # Errors
    ///
    /// Returns [`OverloadError::Decode`] if the matched handler cannot
    /// deserialize the parsed arguments into its parameter type.
    pub fn call(&self, receiver: &mut C, args: Vec<Value>) -> Result<R> {
        let selected = self
            .resolve(&args)
            .and_then(|row| row.outcome.ok().map(|arguments| (row.index, arguments)));

        match selected {
            Some((index, arguments)) => {
                tracing::debug!(
                    "{}: dispatching {} argument(s) to overload #{}",
                    self.name,
                    args.len(),
                    index
                );
                self.entries[index]
                    .handler()
                    .call(receiver, arguments)
                    .map_err(|source| OverloadError::Decode {
                        method: self.name.clone(),
                        index,
                        source,
                    })
            }
            None => {
                tracing::debug!(
                    "{}: no overload matched {} argument(s), using fallback",
                    self.name,
                    args.len()
                );
                Ok((self.fallback)(receiver, args))
            }
        }
    }

    /// Build the no-match signal for this method, for use inside a fallback.
    pub fn no_match<I>(&self, fragments: I) -> NoMatchingOverload
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        NoMatchingOverload::new(self.signatures(), fragments)
    }
}

impl<C, R> fmt::Debug for OverloadedMethod<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverloadedMethod")
            .field("name", &self.name)
            .field("overloads", &self.signatures())
            .finish_non_exhaustive()
    }
}
