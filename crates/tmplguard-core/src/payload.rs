//! Dotted-path reads over JSON payloads.

use serde_json::Value;

/// Reads the value at `path`, or `None` when any segment is absent.
///
/// Objects are indexed by key and arrays by numeric segment; `a.0.b` and
/// `a[0].b` are equivalent. Stepping into a scalar (string, number, bool or
/// null) is absent, not an error.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut segments = segments(path).peekable();
    segments.peek()?;
    segments.try_fold(root, step)
}

pub fn contains(root: &Value, path: &str) -> bool {
    lookup(root, path).is_some()
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(['.', '[', ']']).filter(|s| !s.is_empty())
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}
