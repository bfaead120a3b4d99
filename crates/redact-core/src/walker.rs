//! Depth-first key search and first-match removal over a document tree.
//!
//! All walks share one traversal order: at each object the object's own
//! members are checked for the target key first, then composite children are
//! visited in member order; arrays visit their composite elements in index
//! order. Scalars are never descended into. The first match ends the walk.
//!
//! ```
//! use redact_core::{contains_key, remove_first_key};
//! use serde_json::json;
//!
//! let mut doc = json!({"a": {"b": 1, "c": {"target": 2}}, "d": [{"target": 3}]});
//! assert!(remove_first_key(&mut doc, "target"));
//! assert_eq!(doc, json!({"a": {"b": 1, "c": {}}, "d": [{"target": 3}]}));
//! assert!(contains_key(&doc, "target"));
//! ```

use std::fmt;

use serde_json::Value;

use crate::value::{DocumentExt, Kind};

/// Outcome of one recursive step. `Found` unwinds the walk immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Search {
    Found,
    NotFound,
}

impl Search {
    pub fn is_found(self) -> bool {
        self == Search::Found
    }
}

/// Returns `true` iff `target` is an object key anywhere in the tree rooted
/// at `root`, including `root`'s own members. Never mutates the tree.
pub fn contains_key(root: &Value, target: &str) -> bool {
    search(root, target).is_found()
}

fn search(value: &Value, target: &str) -> Search {
    match value {
        Value::Object(map) => {
            if map.contains_key(target) {
                return Search::Found;
            }
            for child in map.values().filter(|v| v.is_composite()) {
                if search(child, target).is_found() {
                    return Search::Found;
                }
            }
            Search::NotFound
        }
        Value::Array(items) => {
            for child in items.iter().filter(|v| v.is_composite()) {
                if search(child, target).is_found() {
                    return Search::Found;
                }
            }
            Search::NotFound
        }
        _ => Search::NotFound,
    }
}

/// Remove the first occurrence of `target` in traversal order.
///
/// Returns `true` iff a member was removed. At most one member is removed per
/// call; call repeatedly until [`contains_key`] reports `false` to remove
/// every occurrence. The remaining members of the edited object keep their
/// order, and no other part of the tree changes.
pub fn remove_first_key(root: &mut Value, target: &str) -> bool {
    let removed = remove_first(root, target).is_found();
    if removed {
        log::debug!("removed first '{target}' member");
    } else {
        log::debug!("no '{target}' member to remove");
    }
    removed
}

fn remove_first(value: &mut Value, target: &str) -> Search {
    match value {
        Value::Object(map) => {
            if map.shift_remove(target).is_some() {
                return Search::Found;
            }
            for child in map.values_mut() {
                if child.is_composite() && remove_first(child, target).is_found() {
                    return Search::Found;
                }
            }
            Search::NotFound
        }
        Value::Array(items) => {
            for child in items.iter_mut() {
                if child.is_composite() && remove_first(child, target).is_found() {
                    return Search::Found;
                }
            }
            Search::NotFound
        }
        _ => Search::NotFound,
    }
}

/// Locate the match [`contains_key`] would find, as a JSON Pointer
/// (RFC 6901) relative to `root`, e.g. `/d/0/target`.
pub fn find_first_key(root: &Value, target: &str) -> Option<String> {
    let mut trail = locate(root, target)?;
    trail.reverse();
    let mut pointer = String::new();
    for segment in &trail {
        pointer.push('/');
        pointer.push_str(&segment.replace('~', "~0").replace('/', "~1"));
    }
    Some(pointer)
}

/// Returns the path to the match, innermost segment first.
fn locate(value: &Value, target: &str) -> Option<Vec<String>> {
    match value {
        Value::Object(map) => {
            if map.contains_key(target) {
                return Some(vec![target.to_string()]);
            }
            map.iter()
                .filter(|(_, child)| child.is_composite())
                .find_map(|(key, child)| {
                    let mut trail = locate(child, target)?;
                    trail.push(key.clone());
                    Some(trail)
                })
        }
        Value::Array(items) => items
            .iter()
            .enumerate()
            .filter(|(_, child)| child.is_composite())
            .find_map(|(index, child)| {
                let mut trail = locate(child, target)?;
                trail.push(index.to_string());
                Some(trail)
            }),
        _ => None,
    }
}

/// Depth-indented listing of a tree's member names and kinds.
///
/// Each object member produces one `"<indent><key> - <Kind>"` line, indented
/// two spaces per level. Array elements get no line of their own but their
/// composite elements are listed one level deeper.
#[derive(Debug, Clone, Copy)]
pub struct Structure<'a> {
    value: &'a Value,
}

impl<'a> Structure<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }
}

impl fmt::Display for Structure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_structure(f, self.value, 0)
    }
}

/// Write the [`Structure`] listing of `value` to `out`, starting at `depth`.
pub fn write_structure<W: fmt::Write + ?Sized>(
    out: &mut W,
    value: &Value,
    depth: usize,
) -> fmt::Result {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let kind = Kind::of(child);
                writeln!(out, "{}{} - {}", "  ".repeat(depth), key, kind)?;
                if kind.is_composite() {
                    write_structure(out, child, depth + 1)?;
                }
            }
        }
        Value::Array(items) => {
            for child in items.iter().filter(|v| v.is_composite()) {
                write_structure(out, child, depth + 1)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Render the [`Structure`] listing of `value` as a string.
pub fn print_structure(value: &Value) -> String {
    Structure::new(value).to_string()
}
