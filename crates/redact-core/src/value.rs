//! Document tree access: value kinds, member lookup, key removal, and path
//! resolution over `serde_json::Value`.
//!
//! The tree itself is a plain [`serde_json::Value`] built with the
//! `preserve_order` feature, so object members iterate in document order and
//! removal keeps the relative order of the remaining members.

use std::fmt;

use serde_json::Value;

use crate::error::{RedactError, Result};

/// The six variants a document value can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// `true` for arrays and objects, the only kinds the walker descends into.
    pub fn is_composite(self) -> bool {
        matches!(self, Kind::Array | Kind::Object)
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "Null",
            Kind::Bool => "Bool",
            Kind::Number => "Number",
            Kind::String => "String",
            Kind::Array => "Array",
            Kind::Object => "Object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Object-member operations on a document value.
///
/// Every method treats a non-object receiver as an object with no members:
/// lookups return `None`, `has_key` and `remove_key` return `false`.
///
/// # Examples
///
/// ```
/// use redact_core::DocumentExt;
/// use serde_json::json;
///
/// let mut doc = json!({"id": "G1", "speed": 22.1});
/// assert!(doc.has_key("speed"));
/// assert!(doc.remove_key("speed"));
/// assert!(!doc.remove_key("speed"));
/// assert_eq!(doc, json!({"id": "G1"}));
/// ```
pub trait DocumentExt {
    fn kind(&self) -> Kind;

    fn is_composite(&self) -> bool {
        self.kind().is_composite()
    }

    fn has_key(&self, name: &str) -> bool;

    fn member(&self, name: &str) -> Option<&Value>;

    /// Single lookup returning a mutable reference to the member, if present.
    fn member_mut(&mut self, name: &str) -> Option<&mut Value>;

    /// Like [`DocumentExt::member_mut`], but an absent member is an error.
    fn require_member_mut(&mut self, name: &str) -> Result<&mut Value>;

    /// Remove `name` from this object. Returns `true` iff the key existed.
    fn remove_key(&mut self, name: &str) -> bool;
}

impl DocumentExt for Value {
    fn kind(&self) -> Kind {
        Kind::of(self)
    }

    fn has_key(&self, name: &str) -> bool {
        self.as_object().is_some_and(|map| map.contains_key(name))
    }

    fn member(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(name))
    }

    fn member_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.as_object_mut().and_then(|map| map.get_mut(name))
    }

    fn require_member_mut(&mut self, name: &str) -> Result<&mut Value> {
        match self {
            Value::Object(map) => map.get_mut(name).ok_or_else(|| RedactError::MissingKey {
                key: name.to_string(),
                path: ROOT.to_string(),
            }),
            other => Err(RedactError::NotAContainer {
                segment: name.to_string(),
                kind: Kind::of(other),
            }),
        }
    }

    fn remove_key(&mut self, name: &str) -> bool {
        match self.as_object_mut() {
            Some(map) => map.shift_remove(name).is_some(),
            None => false,
        }
    }
}

const ROOT: &str = "$";

/// Split a dot-separated path into segments. The empty path has no segments.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|s| !s.is_empty())
}

fn step<'a>(value: &'a Value, segment: &str, walked: &str) -> Result<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment).ok_or_else(|| missing(segment, walked)),
        Value::Array(items) => {
            let index = array_index(segment, walked)?;
            items.get(index).ok_or_else(|| RedactError::IndexOutOfRange {
                index,
                len: items.len(),
                path: walked.to_string(),
            })
        }
        other => Err(RedactError::NotAContainer {
            segment: segment.to_string(),
            kind: Kind::of(other),
        }),
    }
}

fn step_mut<'a>(value: &'a mut Value, segment: &str, walked: &str) -> Result<&'a mut Value> {
    match value {
        Value::Object(map) => map.get_mut(segment).ok_or_else(|| missing(segment, walked)),
        Value::Array(items) => {
            let index = array_index(segment, walked)?;
            let len = items.len();
            items.get_mut(index).ok_or_else(|| RedactError::IndexOutOfRange {
                index,
                len,
                path: walked.to_string(),
            })
        }
        other => Err(RedactError::NotAContainer {
            segment: segment.to_string(),
            kind: Kind::of(other),
        }),
    }
}

fn array_index(segment: &str, walked: &str) -> Result<usize> {
    if segment.bytes().all(|b| b.is_ascii_digit()) {
        segment.parse().map_err(|_| missing(segment, walked))
    } else {
        Err(missing(segment, walked))
    }
}

fn missing(segment: &str, walked: &str) -> RedactError {
    RedactError::MissingKey {
        key: segment.to_string(),
        path: walked.to_string(),
    }
}

/// Follow a dot-separated path from `root` to a sub-tree.
///
/// Segments name object keys; a segment made only of digits indexes into an
/// array. The empty path resolves to `root` itself.
///
/// # Errors
///
/// - [`RedactError::MissingKey`] if an object lacks the next key
/// - [`RedactError::IndexOutOfRange`] if an array index is past the end
/// - [`RedactError::NotAContainer`] if the path steps into a scalar
///
/// # Examples
///
/// ```
/// use redact_core::resolve_path;
/// use serde_json::json;
///
/// let doc = json!({"payload": {"data": {"partII": [{"id": "VEHICLESAFETYEXT"}]}}});
/// let first = resolve_path(&doc, "payload.data.partII.0").unwrap();
/// assert_eq!(first["id"], "VEHICLESAFETYEXT");
/// assert!(resolve_path(&doc, "payload.meta").is_err());
/// ```
pub fn resolve_path<'a>(root: &'a Value, path: &str) -> Result<&'a Value> {
    let mut current = root;
    let mut walked = String::from(ROOT);
    for segment in segments(path) {
        current = step(current, segment, &walked)?;
        walked.push('.');
        walked.push_str(segment);
    }
    Ok(current)
}

/// Mutable counterpart of [`resolve_path`]; mutation through the returned
/// reference edits `root` in place.
pub fn resolve_path_mut<'a>(root: &'a mut Value, path: &str) -> Result<&'a mut Value> {
    let mut current = root;
    let mut walked = String::from(ROOT);
    for segment in segments(path) {
        current = step_mut(current, segment, &walked)?;
        walked.push('.');
        walked.push_str(segment);
    }
    Ok(current)
}

/// Parse JSON text into a document tree.
///
/// # Errors
///
/// Returns [`RedactError::JsonParse`] if the text is not valid JSON.
pub fn parse_document(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text)?)
}

/// Serialize a document tree back to JSON text, compact or pretty-printed.
pub fn serialize_document(value: &Value, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}
