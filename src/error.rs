//! Error types for overload-dispatch.
//!
//! Schema validation failures are not errors: they are recorded per entry
//! as [`SchemaIssue`](crate::schema::SchemaIssue) and simply exclude that
//! entry from selection. Only the conditions below propagate to the caller.

use std::fmt;

use thiserror::Error;

use crate::overload::OverloadSignature;

/// Main error type for all dispatch operations.
#[derive(Debug, Error)]
pub enum OverloadError {
    /// A matched handler could not deserialize its shaped arguments.
    #[error("handler #{index} of `{method}` rejected its arguments: {source}")]
    Decode {
        /// Name of the overloaded method.
        method: String,
        /// Declaration index of the matched entry.
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Raised explicitly by a fallback that treats "no handler" as an error.
    #[error(transparent)]
    NoMatch(#[from] NoMatchingOverload),
}

/// Result type alias using OverloadError.
pub type Result<T> = std::result::Result<T, OverloadError>;

/// Signal that no declared overload accepted a call.
///
/// The dispatcher never raises this itself. A fallback builds it when
/// reaching the un-decorated body is an error condition, and `overloads`
/// carries every declared signature for diagnostics.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct NoMatchingOverload {
    /// Every declared entry, in declaration order.
    pub overloads: Vec<OverloadSignature>,
    /// Message fragments joined with single spaces and trimmed.
    pub message: String,
}

impl NoMatchingOverload {
    /// Build the signal from the declared entries and message fragments.
    pub fn new<I>(overloads: Vec<OverloadSignature>, fragments: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let message = fragments
            .into_iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        Self { overloads, message }
    }

    /// Multi-line listing of the declared overloads, one per line.
    pub fn describe_overloads(&self) -> String {
        self.overloads
            .iter()
            .map(|o| format!("  {o}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overload::Signature;
    use crate::schema::Schema;

    fn sample_overloads() -> Vec<OverloadSignature> {
        vec![
            OverloadSignature::new(0, Signature::NoArgs, None),
            OverloadSignature::new(1, Signature::Single(Schema::String), Some(1)),
        ]
    }

    #[test]
    fn test_message_joins_fragments_with_spaces() {
        let err = NoMatchingOverload::new(sample_overloads(), ["a", "b", "c"]);
        assert_eq!(err.message, "a b c");
        assert_eq!(err.to_string(), "a b c");
    }

    #[test]
    fn test_message_is_trimmed() {
        let err = NoMatchingOverload::new(Vec::new(), ["", "no", "handler", ""]);
        assert_eq!(err.message, "no handler");

        let empty = NoMatchingOverload::new(Vec::new(), Vec::<String>::new());
        assert_eq!(empty.message, "");
    }

    #[test]
    fn test_overloads_field_is_preserved() {
        let overloads = sample_overloads();
        let err = NoMatchingOverload::new(overloads.clone(), ["x"]);
        assert_eq!(err.overloads, overloads);
    }

    #[test]
    fn test_fragments_accept_display_values() {
        let fragments: [&dyn fmt::Display; 3] = [&"got", &3, &"args"];
        let err = NoMatchingOverload::new(Vec::new(), fragments);
        assert_eq!(err.message, "got 3 args");
    }

    #[test]
    fn test_no_match_converts_into_overload_error() {
        let err: OverloadError = NoMatchingOverload::new(Vec::new(), ["nothing", "matched"]).into();
        assert!(matches!(err, OverloadError::NoMatch(_)));
        assert_eq!(err.to_string(), "nothing matched");
    }

    #[test]
    fn test_describe_overloads_lists_each_entry() {
        let err = NoMatchingOverload::new(sample_overloads(), ["x"]);
        let listing = err.describe_overloads();
        assert_eq!(listing.lines().count(), 2);
        assert!(listing.contains("()"));
        assert!(listing.contains("string"));
    }
}
