//! # overload-dispatch
//!
//! Runtime overloading for methods that take dynamically typed arguments.
//!
//! A method is declared as an ordered set of overloads, each a schema plus a
//! handler. Every call validates its argument list against every overload,
//! runs the handler of the first one that matches, and otherwise falls back
//! to the original method body.
//!
//! ## Signatures
//!
//! - **no-arguments**: matches only an empty argument list
//! - **fixed**: validates the whole list as a tuple, optionally with a variadic tail
//! - **rest**: validates every argument against one element schema
//! - **single**: validates the first argument, and requires an exact argument count
//!
//! ## Example
//!
//! ```
//! use overload_dispatch::{args, OverloadSet, Schema};
//!
//! struct Ruler;
//!
//! let measure = OverloadSet::<Ruler, usize>::new()
//!     .none(|_| 0)
//!     .fixed([Schema::String, Schema::String], |_, (a, b): (String, String)| a.len() + b.len())
//!     .single(Schema::String, |_, s: String| s.len())
//!     .decorate("measure", |_, _| usize::MAX);
//!
//! let mut ruler = Ruler;
//! assert_eq!(measure.name(), "measure");
//! assert_eq!(measure.call(&mut ruler, args![]).unwrap(), 0);
//! assert_eq!(measure.call(&mut ruler, args!["ab", "cde"]).unwrap(), 5);
//! assert_eq!(measure.call(&mut ruler, args!["abcd"]).unwrap(), 4);
//! assert_eq!(measure.call(&mut ruler, args![true]).unwrap(), usize::MAX);
//! ```

pub mod error;
pub mod overload;
pub mod schema;

mod macros;

pub use error::{NoMatchingOverload, OverloadError, Result};
pub use overload::{
    Arguments, BoxFuture, OverloadSet, OverloadSignature, OverloadedMethod, Signature,
};
pub use schema::{Schema, NO_PARAMS};

#[doc(hidden)]
pub mod __private {
    pub use serde_json::{json, Value};
}
