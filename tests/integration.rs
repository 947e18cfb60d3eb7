//! Integration tests for overload-dispatch.
//!
//! These tests drive overloaded methods end to end through the public API.

use std::sync::LazyLock;

use overload_dispatch::overload::{OverloadEntry, SignatureKind};
use overload_dispatch::schema::{ObjectSchema, Schema, TupleSchema, NO_PARAMS};
use overload_dispatch::{args, BoxFuture, NoMatchingOverload, OverloadSet, OverloadedMethod};
use serde_json::{json, Value};

#[derive(Debug, Default)]
struct Shelf {
    books: Vec<String>,
    calls: Vec<&'static str>,
}

/// `shelf.add()` overloads used by several tests.
fn add_method() -> OverloadedMethod<Shelf, Result<usize, NoMatchingOverload>> {
    let set = OverloadSet::new()
        .none(|shelf: &mut Shelf| {
            shelf.calls.push("none");
            Ok(shelf.books.len())
        })
        .fixed(
            [Schema::String, Schema::Integer],
            |shelf: &mut Shelf, (title, copies): (String, usize)| {
                shelf.calls.push("copies");
                shelf.books.extend(std::iter::repeat(title).take(copies));
                Ok(shelf.books.len())
            },
        )
        .single(Schema::String, |shelf: &mut Shelf, title: String| {
            shelf.calls.push("single");
            shelf.books.push(title);
            Ok(shelf.books.len())
        });

    let overloads = set.signatures();
    set.decorate("add", move |shelf: &mut Shelf, args| {
        shelf.calls.push("fallback");
        let count = args.len().to_string();
        Err(NoMatchingOverload::new(
            overloads.clone(),
            ["add:", "no overload takes", count.as_str(), "argument(s)"],
        ))
    })
}

/// Test that each argument shape reaches its own handler.
#[test]
fn test_each_shape_reaches_its_handler() {
    let add = add_method();
    let mut shelf = Shelf::default();

    assert_eq!(add.call(&mut shelf, args!["Dune"]).unwrap().unwrap(), 1);
    assert_eq!(add.call(&mut shelf, args!["Emma", 2]).unwrap().unwrap(), 3);
    assert_eq!(add.call(&mut shelf, args![]).unwrap().unwrap(), 3);

    assert_eq!(shelf.books, vec!["Dune", "Emma", "Emma"]);
    assert_eq!(shelf.calls, vec!["single", "copies", "none"]);
}

/// Test that an unmatched call runs the fallback and its error is returned untouched.
#[test]
fn test_fallback_error_is_passed_through() {
    let add = add_method();
    let mut shelf = Shelf::default();

    let err = add
        .call(&mut shelf, args![1, 2, 3])
        .unwrap()
        .unwrap_err();

    assert_eq!(err.message, "add: no overload takes 3 argument(s)");
    assert_eq!(err.overloads, add.signatures());
    assert_eq!(shelf.calls, vec!["fallback"]);
    assert!(shelf.books.is_empty());
}

/// Test the earlier declaration wins when two overloads accept the same call.
#[test]
fn test_first_declared_match_wins() {
    let method = OverloadSet::<(), &'static str>::new()
        .single(Schema::Any, |_, _: Value| "H1")
        .single(Schema::String, |_, _: String| "H2")
        .decorate("pick", |_, _| "fallback");

    assert_eq!(method.call(&mut (), args!["x"]).unwrap(), "H1");

    let reversed = OverloadSet::<(), &'static str>::new()
        .single(Schema::String, |_, _: String| "H2")
        .single(Schema::Any, |_, _: Value| "H1")
        .decorate("pick", |_, _| "fallback");

    assert_eq!(reversed.call(&mut (), args!["x"]).unwrap(), "H2");
    assert_eq!(reversed.call(&mut (), args![5]).unwrap(), "H1");
}

/// Test that a zero-argument call only matches the NO_PARAMS overload.
#[test]
fn test_no_params_marker() {
    let method = OverloadSet::<(), Value>::new()
        .overload(NO_PARAMS, None, |_, (): ()| json!("none"))
        .single(Schema::String, |_, s: String| json!(s.len()))
        .decorate("size", |_, _| Value::Null);

    assert_eq!(method.call(&mut (), args![]).unwrap(), json!("none"));
    assert_eq!(method.call(&mut (), args!["abc"]).unwrap(), json!(3));
    assert_eq!(method.call(&mut (), args![null]).unwrap(), Value::Null);
}

/// Test fixed tuples pass values positionally and reject extra arguments.
#[test]
fn test_fixed_tuple() {
    let method = OverloadSet::<(), Option<(String, i64)>>::new()
        .fixed([Schema::String, Schema::Number], |_, pair: (String, i64)| Some(pair))
        .decorate("pair", |_, _| None);

    assert_eq!(
        method.call(&mut (), args!["a", 1]).unwrap(),
        Some(("a".to_string(), 1))
    );
    assert_eq!(method.call(&mut (), args!["a", 1, 2]).unwrap(), None);
    assert_eq!(method.call(&mut (), args!["a"]).unwrap(), None);
}

/// Test a variadic tuple spreads every value, including an empty tail.
#[test]
fn test_variadic_tail() {
    let method = OverloadSet::<(), Vec<Value>>::new()
        .variadic([Schema::String], Schema::Number, |_, all: Vec<Value>| all)
        .decorate("collect", |_, _| Vec::new());

    assert_eq!(
        method.call(&mut (), args!["r", 1, 2, 3]).unwrap(),
        vec![json!("r"), json!(1), json!(2), json!(3)]
    );
    assert_eq!(method.call(&mut (), args!["r"]).unwrap(), vec![json!("r")]);
    assert!(method.call(&mut (), args!["r", "s"]).unwrap().is_empty());
}

/// Test a rest overload receives every argument, and a classified array schema behaves the same.
#[test]
fn test_rest_array() {
    let method = OverloadSet::<(), f64>::new()
        .rest(Schema::Number, |_, xs: Vec<f64>| xs.iter().sum())
        .decorate("sum", |_, _| f64::NAN);

    assert_eq!(method.call(&mut (), args![1, 2, 3.5]).unwrap(), 6.5);
    assert_eq!(method.call(&mut (), args![]).unwrap(), 0.0);
    assert!(method.call(&mut (), args![1, "2"]).unwrap().is_nan());

    let classified = OverloadSet::<(), f64>::new()
        .overload(Schema::array(Schema::Number), None, |_, xs: Vec<f64>| xs.iter().sum())
        .decorate("sum", |_, _| f64::NAN);
    assert_eq!(classified.call(&mut (), args![4, 5]).unwrap(), 9.0);
}

/// Test the single-value arity guard, including the zero default.
#[test]
fn test_single_value_arity_guard() {
    let method = OverloadSet::<(), &'static str>::new()
        .overload(Schema::Any, None, |_, _: Value| "zero")
        .single_with_arity(Schema::String, 2, |_, _: String| "two")
        .single(Schema::Any, |_, _: Value| "one")
        .decorate("arity", |_, _| "fallback");

    // Undeclared arity is zero: the broad schema only sees an empty call.
    assert_eq!(method.call(&mut (), args![]).unwrap(), "zero");
    assert_eq!(method.call(&mut (), args!["x"]).unwrap(), "one");
    assert_eq!(method.call(&mut (), args!["x", 1]).unwrap(), "two");
    assert_eq!(method.call(&mut (), args![1, 1]).unwrap(), "fallback");
    assert_eq!(method.call(&mut (), args![1, 2, 3]).unwrap(), "fallback");
}

/// Test handlers receive parsed values, not the raw arguments.
#[test]
fn test_handlers_receive_parsed_values() {
    let method = OverloadSet::<(), Value>::new()
        .single(
            ObjectSchema::new().field("name", Schema::String).into(),
            |_, user: Value| user,
        )
        .single(
            Schema::custom("trimmed", |v| {
                v.as_str()
                    .map(|s| json!(s.trim()))
                    .ok_or_else(|| "not a string".to_string())
            }),
            |_, s: Value| s,
        )
        .decorate("parse", |_, _| Value::Null);

    assert_eq!(
        method.call(&mut (), args![{"name": "ann", "role": "admin"}]).unwrap(),
        json!({"name": "ann"})
    );
    assert_eq!(method.call(&mut (), args!["  padded  "]).unwrap(), json!("padded"));
}

/// Test integral floats reach integer-typed handlers instead of failing to decode.
#[test]
fn test_integral_floats_reach_integer_handlers() {
    let method = OverloadSet::<(), i64>::new()
        .single(Schema::Integer, |_, n: i64| n * 10)
        .rest(Schema::Integer, |_, xs: Vec<usize>| xs.iter().sum::<usize>() as i64)
        .decorate("scale", |_, _| -1);

    assert!(method.rows(&args![2.0])[0].is_match());
    assert_eq!(method.call(&mut (), args![2.0]).unwrap(), 20);
    assert_eq!(method.call(&mut (), args![1, 2.0, 3.0]).unwrap(), 6);
    assert_eq!(method.call(&mut (), args![2.5]).unwrap(), -1);
}

/// Test a union that admits a missing value matches a call with no arguments.
#[test]
fn test_optional_union_matches_empty_call() {
    let method = OverloadSet::<(), &'static str>::new()
        .overload(Schema::String.optional().or(Schema::Number), None, |_, _: Value| "maybe")
        .decorate("maybe", |_, _| "fallback");

    assert_eq!(method.call(&mut (), args![]).unwrap(), "maybe");
    assert_eq!(method.call(&mut (), args!["x"]).unwrap(), "fallback");
}

/// Test the fallback sees the original, unparsed arguments.
#[test]
fn test_fallback_receives_original_arguments() {
    let method = OverloadSet::<Vec<Value>, ()>::new()
        .single(Schema::Number, |_, _: f64| ())
        .decorate("record", |seen: &mut Vec<Value>, args| seen.extend(args));

    let mut seen = Vec::new();
    method.call(&mut seen, args!["a", {"b": [1]}]).unwrap();
    assert_eq!(seen, vec![json!("a"), json!({"b": [1]})]);
}

/// Test resolve exposes the canonical rows without invoking anything.
#[test]
fn test_resolve_reports_rows() {
    let method = OverloadSet::<(), ()>::new()
        .none(|_| ())
        .entry(OverloadEntry::<(), ()>::new(
            Schema::Tuple(TupleSchema::new([Schema::Bool])),
            |_, _: (bool,)| (),
        ))
        .decorate("flag", |_, _| ());

    let rows = method.rows(&args![true]);
    assert_eq!(rows.len(), 2);
    assert!(!rows[0].is_match());
    assert_eq!(rows[0].kind, SignatureKind::NoArgs);
    assert!(rows[1].is_match());

    let selected = method.resolve(&args![true]).unwrap();
    assert_eq!(selected.index, 1);
    assert_eq!(selected.kind, SignatureKind::Fixed);
}

static GREET: LazyLock<OverloadedMethod<Greeter, Result<String, NoMatchingOverload>>> =
    LazyLock::new(|| {
        OverloadSet::new()
            .none(|g: &mut Greeter| Ok(format!("{}!", g.salutation)))
            .single(Schema::String, |g: &mut Greeter, name: String| {
                Ok(format!("{}, {name}!", g.salutation))
            })
            .decorate("greet", |_: &mut Greeter, _| {
                Err(GREET.no_match(["greet:", "expected", "a", "name"]))
            })
    });

struct Greeter {
    salutation: &'static str,
}

impl Greeter {
    fn greet(&mut self, args: Vec<Value>) -> Result<String, NoMatchingOverload> {
        GREET.call(self, args).expect("greet handlers take strings")
    }
}

/// Test the static-method pattern, including raising the no-match signal from the fallback.
#[test]
fn test_static_method_on_receiver() {
    let mut greeter = Greeter { salutation: "Hi" };

    assert_eq!(greeter.greet(args![]).unwrap(), "Hi!");
    assert_eq!(greeter.greet(args!["Bo"]).unwrap(), "Hi, Bo!");

    let err = greeter.greet(args![42]).unwrap_err();
    assert_eq!(err.to_string(), "greet: expected a name");
    assert_eq!(err.overloads.len(), 2);
    assert_eq!(GREET.name(), "greet");
}

/// Test async handlers: the dispatcher returns the future and the caller awaits it.
#[tokio::test]
async fn test_async_handlers() {
    let method = OverloadSet::<u32, BoxFuture<'static, String>>::new()
        .single(Schema::String, |base: &mut u32, s: String| {
            let base = *base;
            Box::pin(async move { format!("{s}{base}") }) as BoxFuture<'static, String>
        })
        .decorate("fetch", |_: &mut u32, _| {
            Box::pin(async { "fallback".to_string() }) as BoxFuture<'static, String>
        });

    let mut base = 7;
    assert_eq!(method.call(&mut base, args!["v"]).unwrap().await, "v7");
    assert_eq!(method.call(&mut base, args![]).unwrap().await, "fallback");
}

/// Test calls on a shared method do not interact.
#[test]
fn test_concurrent_calls_are_independent() {
    let method = std::sync::Arc::new(
        OverloadSet::<usize, usize>::new()
            .rest(Schema::Integer, |acc: &mut usize, xs: Vec<usize>| {
                *acc += xs.iter().sum::<usize>();
                *acc
            })
            .decorate("accumulate", |acc: &mut usize, _| *acc),
    );

    let handles: Vec<_> = (1..=4usize)
        .map(|n| {
            let method = method.clone();
            std::thread::spawn(move || {
                let mut acc = 0;
                for _ in 0..100 {
                    method.call(&mut acc, args![n]).unwrap();
                }
                acc
            })
        })
        .collect();

    let totals: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(totals, vec![100, 200, 300, 400]);
}
