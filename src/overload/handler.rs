//! Handlers invoked on a successful match.
//!
//! A handler receives the receiving object and the shaped, already-parsed
//! arguments. Typed closures are adapted with [`TypedHandler`], which
//! deserializes the arguments into the closure's parameter type:
//!
//! - [`Arguments::Spread`] deserializes as a sequence, so a `(String, i64)`
//!   parameter takes the values positionally and a `Vec<Value>` takes all of them.
//! - [`Arguments::Single`] deserializes the one value directly.
//! - [`Arguments::Empty`] deserializes as `null`, so `()` accepts it.
//!
//! # Example
//!
//! ```
//! use overload_dispatch::overload::{Arguments, Handler, TypedHandler};
//! use serde_json::json;
//!
//! struct Counter(usize);
//!
//! let add = TypedHandler::new(|c: &mut Counter, (by,): (usize,)| {
//!     c.0 += by;
//!     c.0
//! });
//!
//! let mut counter = Counter(1);
//! let out = add.call(&mut counter, Arguments::Spread(vec![json!(2)])).unwrap();
//! assert_eq!(out, 3);
//! ```

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Boxed future, for overloads whose handlers are async.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Parsed call arguments, shaped for the matched signature.
#[derive(Debug, Clone, PartialEq)]
pub enum Arguments {
    /// No arguments.
    Empty,
    /// Parsed values, passed positionally.
    Spread(Vec<Value>),
    /// One parsed value.
    Single(Value),
}

impl Arguments {
    /// Number of positional values the handler receives.
    pub fn len(&self) -> usize {
        match self {
            Arguments::Empty => 0,
            Arguments::Spread(values) => values.len(),
            Arguments::Single(_) => 1,
        }
    }

    /// True when the handler receives nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collapse into one value for deserialization.
    pub fn into_value(self) -> Value {
        match self {
            Arguments::Empty => Value::Null,
            Arguments::Spread(values) => Value::Array(values),
            Arguments::Single(value) => value,
        }
    }

    /// Positional values as a list.
    pub fn into_vec(self) -> Vec<Value> {
        match self {
            Arguments::Empty => Vec::new(),
            Arguments::Spread(values) => values,
            Arguments::Single(value) => vec![value],
        }
    }
}

/// Trait for overload handlers.
pub trait Handler<C, R>: Send + Sync {
    /// Invoke with the receiving object and the matched arguments.
    ///
    /// Fails only if the arguments cannot be converted to the handler's input.
    fn call(&self, receiver: &mut C, args: Arguments) -> serde_json::Result<R>;
}

/// Wrapper that deserializes arguments before calling the handler.
pub struct TypedHandler<F, C, T, R>
where
    F: Fn(&mut C, T) -> R + Send + Sync,
    T: DeserializeOwned,
{
    handler: F,
    _phantom: PhantomData<fn(&mut C, T) -> R>,
}

impl<F, C, T, R> TypedHandler<F, C, T, R>
where
    F: Fn(&mut C, T) -> R + Send + Sync,
    T: DeserializeOwned,
{
    /// Create a new typed handler.
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _phantom: PhantomData,
        }
    }
}

impl<F, C, T, R> Handler<C, R> for TypedHandler<F, C, T, R>
where
    F: Fn(&mut C, T) -> R + Send + Sync,
    T: DeserializeOwned,
{
    fn call(&self, receiver: &mut C, args: Arguments) -> serde_json::Result<R> {
        let parsed: T = serde_json::from_value(args.into_value())?;
        Ok((self.handler)(receiver, parsed))
    }
}

/// Handler for the zero-argument overload; ignores whatever it is given.
pub struct NoArgsHandler<F, C, R>
where
    F: Fn(&mut C) -> R + Send + Sync,
{
    handler: F,
    _phantom: PhantomData<fn(&mut C) -> R>,
}

impl<F, C, R> NoArgsHandler<F, C, R>
where
    F: Fn(&mut C) -> R + Send + Sync,
{
    /// Create a new zero-argument handler.
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _phantom: PhantomData,
        }
    }
}

impl<F, C, R> Handler<C, R> for NoArgsHandler<F, C, R>
where
    F: Fn(&mut C) -> R + Send + Sync,
{
    fn call(&self, receiver: &mut C, _args: Arguments) -> serde_json::Result<R> {
        Ok((self.handler)(receiver))
    }
}
