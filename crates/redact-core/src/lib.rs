//! # redact-core
//!
//! Depth-first key search and first-match removal for JSON document trees.
//!
//! Documents are plain [`serde_json::Value`] trees. The walker answers "does
//! this key appear anywhere below here?" and "remove the first member with
//! this key", stopping at the first match. Redacting several fields is a
//! sequence of those calls, one per field name.
//!
//! ## Quick start
//!
//! ```rust
//! use redact_core::{contains_key, parse_document, remove_first_key, resolve_path_mut};
//!
//! let mut doc = parse_document(r#"{"payload":{"data":{"partII":[{"value":{"yawRate":"test"}}]}}}"#).unwrap();
//! let part_ii = resolve_path_mut(&mut doc, "payload.data.partII").unwrap();
//!
//! assert!(contains_key(part_ii, "yawRate"));
//! assert!(remove_first_key(part_ii, "yawRate"));
//! assert!(!contains_key(part_ii, "yawRate"));
//! ```
//!
//! ## Modules
//!
//! - [`value`] — value kinds, member access, path resolution, parse/serialize
//! - [`walker`] — `contains_key`, `remove_first_key`, `find_first_key`, structure listing
//! - [`redact`] — multi-member redaction with per-member reports and presets
//! - [`error`] — error types for parsing and path resolution

pub mod error;
pub mod redact;
pub mod value;
pub mod walker;

pub use error::RedactError;
pub use redact::{redact_document, redact_members, MemberOutcome, RedactionPreset, RedactionReport};
pub use value::{parse_document, resolve_path, resolve_path_mut, serialize_document, DocumentExt, Kind};
pub use walker::{contains_key, find_first_key, print_structure, remove_first_key, Search, Structure};
