//! Error types for document parsing, path resolution, and member access.

use thiserror::Error;

use crate::value::Kind;

/// Errors that can occur while loading a document or navigating into it.
///
/// A key that is simply absent from the tree being searched is not an error:
/// [`crate::contains_key`] and [`crate::remove_first_key`] report that case
/// with `false`.
#[derive(Error, Debug)]
pub enum RedactError {
    /// The input text was not valid JSON, or the tree could not be serialized.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A member was accessed directly but the object does not have it.
    #[error("missing key '{key}' at '{path}'")]
    MissingKey { key: String, path: String },

    /// An array index in a path was past the end of the array.
    #[error("index {index} out of range (len {len}) at '{path}'")]
    IndexOutOfRange {
        index: usize,
        len: usize,
        path: String,
    },

    /// A path segment tried to step into a scalar value.
    #[error("cannot resolve '{segment}': value is {kind}, not an object or array")]
    NotAContainer { segment: String, kind: Kind },
}

/// Convenience alias used throughout redact-core.
pub type Result<T> = std::result::Result<T, RedactError>;
