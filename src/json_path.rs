//! Dot-path lookup into loosely structured JSON response bodies.
//!
//! A path such as `meta.pagination.total` is split on `.` and walked one
//! segment at a time. Objects are indexed by key and arrays by decimal
//! index; any other combination ends the walk with `None`.

use serde_json::Value;

/// Resolve `path` inside `root`.
///
/// Returns `None` when any segment is missing or lands on a scalar. An
/// explicit `null` at the end of the path is returned as `Some(&Value::Null)`
/// so callers can tell "absent" from "present but null" if they care.
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |level, segment| match level {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Move the value at `path` out of `root`, leaving `null` in its place.
pub fn take_path(root: &mut Value, path: &str) -> Option<Value> {
    path.split('.')
        .try_fold(root, |level, segment| match level {
            Value::Object(map) => map.get_mut(segment),
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get_mut(i)),
            _ => None,
        })
        .map(Value::take)
}
