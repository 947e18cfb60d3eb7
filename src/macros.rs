//! Call-site helpers.

/// Build a call argument list using `serde_json::json!` array syntax.
///
/// ```
/// use overload_dispatch::args;
/// use serde_json::json;
///
/// let name = "ann";
/// assert_eq!(args!["a", -1, null], vec![json!("a"), json!(-1), json!(null)]);
/// assert_eq!(args![name, {"id": 7}], vec![json!("ann"), json!({"id": 7})]);
/// assert!(args![].is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::__private::Value>::new()
    };
    ($($tt:tt)+) => {
        match $crate::__private::json!([$($tt)+]) {
            $crate::__private::Value::Array(values) => values,
            _ => ::std::unreachable!("json! array literal"),
        }
    };
}
