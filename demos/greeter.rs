//! Greeter - overloaded method example.
//!
//! This example demonstrates:
//! - Declaring overloads for one method in declaration (precedence) order
//! - Keeping the overloaded method in a `static` and calling it from `impl`
//! - Raising the no-match signal from the fallback
//!
//! Run with `RUST_LOG=overload_dispatch=trace` to watch each call resolve.

use std::sync::LazyLock;

use overload_dispatch::schema::{ObjectSchema, Schema};
use overload_dispatch::{args, NoMatchingOverload, OverloadSet, OverloadedMethod};
use serde::Deserialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Input for the object overload.
#[derive(Deserialize, Debug)]
struct Person {
    name: String,
    title: Option<String>,
}

struct Greeter {
    salutation: String,
}

type Greeting = Result<String, NoMatchingOverload>;

static GREET: LazyLock<OverloadedMethod<Greeter, Greeting>> = LazyLock::new(|| {
    OverloadSet::new()
        // greet()
        .none(|g: &mut Greeter| Ok(format!("{}, everyone!", g.salutation)))
        // greet("Ada")
        .single(Schema::String, |g: &mut Greeter, name: String| {
            Ok(format!("{}, {name}!", g.salutation))
        })
        // greet({ name: "Ada", title?: "Dr" })
        .single(
            ObjectSchema::new()
                .field("name", Schema::String)
                .field("title", Schema::String.optional())
                .into(),
            |g: &mut Greeter, p: Person| match p.title {
                Some(title) => Ok(format!("{}, {title} {}!", g.salutation, p.name)),
                None => Ok(format!("{}, {}!", g.salutation, p.name)),
            },
        )
        // greet("Ada", "Grace", ...)
        .rest(Schema::String, |g: &mut Greeter, names: Vec<String>| {
            Ok(format!("{}, {}!", g.salutation, names.join(" and ")))
        })
        .decorate("greet", |_: &mut Greeter, args| {
            let shown = Value::Array(args).to_string();
            Err(GREET.no_match(["greet: cannot greet", shown.as_str()]))
        })
});

impl Greeter {
    fn greet(&mut self, args: Vec<Value>) -> Greeting {
        match GREET.call(self, args) {
            Ok(greeting) => greeting,
            Err(e) => panic!("greet handler misconfigured: {e}"),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut greeter = Greeter {
        salutation: "Hello".to_string(),
    };

    let calls = [
        args![],
        args!["Ada"],
        args![{"name": "Hopper", "title": "Rear Admiral"}],
        args!["Ada", "Grace", "Barbara"],
        args![42],
    ];

    for call in calls {
        match greeter.greet(call) {
            Ok(greeting) => println!("{greeting}"),
            Err(e) => {
                println!("error: {e}");
                println!("declared overloads:\n{}", e.describe_overloads());
            }
        }
    }
}
