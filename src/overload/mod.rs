//! Overload module - declaration and dispatch of method overloads.
//!
//! Provides:
//! - [`OverloadSet`] - ordered overload declarations; `decorate` wraps the original method
//! - [`OverloadedMethod`] - the replacement method that resolves each call
//! - [`Signature`] - how an entry matches call arguments (no-args, fixed, rest, single)
//! - [`Handler`] / [`TypedHandler`] - what runs on a match
//!
//! # Example
//!
//! ```
//! use overload_dispatch::overload::OverloadSet;
//! use overload_dispatch::schema::{Schema, NO_PARAMS};
//! use overload_dispatch::args;
//! use serde_json::Value;
//!
//! #[derive(Default)]
//! struct Stack {
//!     items: Vec<Value>,
//! }
//!
//! let push = OverloadSet::<Stack, usize>::new()
//!     .overload(NO_PARAMS, None, |s: &mut Stack, (): ()| s.items.len())
//!     .rest(Schema::Any, |s: &mut Stack, values: Vec<Value>| {
//!         s.items.extend(values);
//!         s.items.len()
//!     })
//!     .decorate("push", |s, _| s.items.len());
//!
//! let mut stack = Stack::default();
//! assert_eq!(push.call(&mut stack, args![1, "two", null]).unwrap(), 3);
//! assert_eq!(push.call(&mut stack, args![]).unwrap(), 3);
//! ```

mod dispatch;
mod entry;
mod handler;
mod signature;

pub use dispatch::{Fallback, OverloadedMethod, Row};
pub use entry::{OverloadEntry, OverloadSet};
pub use handler::{Arguments, BoxFuture, Handler, NoArgsHandler, TypedHandler};
pub use signature::{OverloadSignature, Signature, SignatureKind};
