//! Dotted field paths (`nested.foo`, `@timestamp`).
//!
//! Path syntax lives here; filters treat paths as opaque strings and only
//! ever hand them back to the record they came with.

#![forbid(unsafe_code)]

use serde_json::{Map, Value};

/// Split a dotted path into segments. Rejects the empty path and any empty
/// segment (`""`, `".a"`, `"a..b"`).
pub fn split(path: &str) -> Option<Vec<&str>> {
    if path.is_empty() {
        return None;
    }
    let segs: Vec<&str> = path.split('.').collect();
    if segs.iter().any(|s| s.is_empty()) {
        return None;
    }
    Some(segs)
}

/// Walk `root` down `path`. `None` on an invalid path, a missing key, or a
/// non-object intermediate.
pub fn resolve<'a>(root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let segs = split(path)?;
    let (last, parents) = segs.split_last()?;
    let mut cur = root;
    for seg in parents {
        cur = cur.get(*seg)?.as_object()?;
    }
    cur.get(*last)
}

/// Write `value` at `path`, creating intermediate objects along the way.
/// An intermediate that already holds a non-object is replaced. Invalid
/// paths are ignored.
pub fn write(root: &mut Map<String, Value>, path: &str, value: Value) {
    let Some(segs) = split(path) else { return };
    let Some((last, parents)) = segs.split_last() else { return };
    let mut cur = root;
    for seg in parents {
        let slot = cur
            .entry((*seg).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else { return };
        cur = next;
    }
    cur.insert((*last).to_string(), value);
}
