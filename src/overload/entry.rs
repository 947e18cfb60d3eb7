//! Overload entries and the set builder.
//!
//! An [`OverloadSet`] is an ordered list of entries. Order is precedence:
//! when several entries accept the same arguments, the earliest declared wins.
//!
//! # Example
//!
//! ```
//! use overload_dispatch::overload::OverloadSet;
//! use overload_dispatch::schema::Schema;
//! use overload_dispatch::args;
//!
//! struct Greeter;
//!
//! let greet = OverloadSet::<Greeter, String>::new()
//!     .none(|_| "hello".to_string())
//!     .single(Schema::String, |_, name: String| format!("hello {name}"))
//!     .decorate("greet", |_, args| format!("cannot greet {} things", args.len()));
//!
//! let mut g = Greeter;
//! assert_eq!(greet.call(&mut g, args![]).unwrap(), "hello");
//! assert_eq!(greet.call(&mut g, args!["ann"]).unwrap(), "hello ann");
//! assert_eq!(greet.call(&mut g, args![1, 2]).unwrap(), "cannot greet 2 things");
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::dispatch::OverloadedMethod;
use super::handler::{Handler, NoArgsHandler, TypedHandler};
use super::signature::{OverloadSignature, Signature};
use crate::schema::{Schema, TupleSchema};

/// One declared overload: signature, handler, and minimum-argument-count.
pub struct OverloadEntry<C, R> {
    signature: Signature,
    handler: Box<dyn Handler<C, R>>,
    min_args: Option<usize>,
}

impl<C: 'static, R: 'static> OverloadEntry<C, R> {
    /// Entry with a typed handler and no declared minimum-argument-count.
    pub fn new<F, T>(signature: impl Into<Signature>, handler: F) -> Self
    where
        F: Fn(&mut C, T) -> R + Send + Sync + 'static,
        T: DeserializeOwned + 'static,
    {
        Self::from_handler(signature, TypedHandler::new(handler))
    }

    /// Entry for the zero-argument overload.
    pub fn no_args<F>(handler: F) -> Self
    where
        F: Fn(&mut C) -> R + Send + Sync + 'static,
    {
        Self::from_handler(Signature::NoArgs, NoArgsHandler::new(handler))
    }

    /// Entry with any [`Handler`] implementation.
    pub fn from_handler<H>(signature: impl Into<Signature>, handler: H) -> Self
    where
        H: Handler<C, R> + 'static,
    {
        Self {
            signature: signature.into(),
            handler: Box::new(handler),
            min_args: None,
        }
    }
}

impl<C, R> OverloadEntry<C, R> {
    /// Declare the minimum-argument-count.
    ///
    /// Only single-value signatures consult it: they match only calls
    /// carrying exactly this many arguments.
    pub fn min_args(mut self, count: usize) -> Self {
        self.min_args = Some(count);
        self
    }

    /// The entry's signature.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Declared minimum-argument-count, zero if undeclared.
    pub fn arity(&self) -> usize {
        self.min_args.unwrap_or(0)
    }

    /// Diagnostic description at `index`.
    pub fn describe(&self, index: usize) -> OverloadSignature {
        OverloadSignature::new(index, self.signature.clone(), self.min_args)
    }

    pub(crate) fn handler(&self) -> &dyn Handler<C, R> {
        self.handler.as_ref()
    }
}

/// Ordered overload declarations for one method.
pub struct OverloadSet<C, R> {
    entries: Vec<OverloadEntry<C, R>>,
}

impl<C: 'static, R: 'static> OverloadSet<C, R> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a prepared entry.
    pub fn entry(mut self, entry: OverloadEntry<C, R>) -> Self {
        self.entries.push(entry);
        self
    }

    /// Register a bare schema, classified automatically.
    ///
    /// Pass [`NO_PARAMS`](crate::schema::NO_PARAMS) for the zero-argument
    /// overload, a tuple or array schema to match the whole argument list,
    /// or any other schema to match the first argument. `min_args` defaults
    /// to zero when `None`.
    pub fn overload<F, T>(self, schema: Schema, min_args: Option<usize>, handler: F) -> Self
    where
        F: Fn(&mut C, T) -> R + Send + Sync + 'static,
        T: DeserializeOwned + 'static,
    {
        let mut entry = OverloadEntry::new(Signature::classify(schema), handler);
        entry.min_args = min_args;
        self.entry(entry)
    }

    /// Register the zero-argument overload.
    pub fn none<F>(self, handler: F) -> Self
    where
        F: Fn(&mut C) -> R + Send + Sync + 'static,
    {
        self.entry(OverloadEntry::no_args(handler))
    }

    /// Register a fixed-length overload. The handler receives the parsed
    /// values positionally, typically as a tuple.
    pub fn fixed<F, T>(self, items: impl IntoIterator<Item = Schema>, handler: F) -> Self
    where
        F: Fn(&mut C, T) -> R + Send + Sync + 'static,
        T: DeserializeOwned + 'static,
    {
        self.entry(OverloadEntry::new(
            Signature::Fixed(TupleSchema::new(items)),
            handler,
        ))
    }

    /// Register leading positional items followed by any number of `rest` values.
    pub fn variadic<F, T>(
        self,
        items: impl IntoIterator<Item = Schema>,
        rest: Schema,
        handler: F,
    ) -> Self
    where
        F: Fn(&mut C, T) -> R + Send + Sync + 'static,
        T: DeserializeOwned + 'static,
    {
        self.entry(OverloadEntry::new(
            Signature::Fixed(TupleSchema::new(items).rest(rest)),
            handler,
        ))
    }

    /// Register a homogeneous overload: every argument must match `element`.
    pub fn rest<F, T>(self, element: Schema, handler: F) -> Self
    where
        F: Fn(&mut C, T) -> R + Send + Sync + 'static,
        T: DeserializeOwned + 'static,
    {
        self.entry(OverloadEntry::new(Signature::Rest(element), handler))
    }

    /// Register a single-value overload for calls with exactly one argument.
    pub fn single<F, T>(self, schema: Schema, handler: F) -> Self
    where
        F: Fn(&mut C, T) -> R + Send + Sync + 'static,
        T: DeserializeOwned + 'static,
    {
        self.single_with_arity(schema, 1, handler)
    }

    /// Register a single-value overload for calls with exactly `arity`
    /// arguments; only the first is validated and passed on.
    pub fn single_with_arity<F, T>(self, schema: Schema, arity: usize, handler: F) -> Self
    where
        F: Fn(&mut C, T) -> R + Send + Sync + 'static,
        T: DeserializeOwned + 'static,
    {
        self.entry(OverloadEntry::new(Signature::Single(schema), handler).min_args(arity))
    }

    /// Number of declared entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been declared.
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

    /// Wrap the original method body.
    ///
    /// The returned method keeps `name`, dispatches to the first matching
    /// entry, and calls `fallback` with the untouched arguments when none match.
    pub fn decorate<F>(self, name: impl Into<String>, fallback: F) -> OverloadedMethod<C, R>
    where
        F: Fn(&mut C, Vec<Value>) -> R + Send + Sync + 'static,
    {
        OverloadedMethod::new(name.into(), self.entries, Box::new(fallback))
    }
}

impl<C: 'static, R: 'static> Default for OverloadSet<C, R> {
    fn default() -> Self {
        Self::new()
    }
}
