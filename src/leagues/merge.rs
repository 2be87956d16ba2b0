//! Field-level reducer for repeated player records
//!
//! Objects merge key by key. At the leaves the later value wins unless it is
//! empty, in which case the earlier value is kept. Reducing rows in file order
//! therefore keeps the most recent non-empty value of every field.

use serde_json::Value;

/// Returns true for null, `""`, `[]` and `{}`
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Merges `later` into `earlier`, preferring non-empty and then later values
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use shelf_press::leagues::prefer_later;
///
/// let merged = prefer_later(
///     json!({"club": "Ajax", "number": 10}),
///     json!({"club": "", "number": 7}),
/// );
/// assert_eq!(merged, json!({"club": "Ajax", "number": 7}));
/// ```
pub fn prefer_later(earlier: Value, later: Value) -> Value {
    match (earlier, later) {
        (Value::Object(mut base), Value::Object(update)) => {
            for (key, value) in update {
                match base.get_mut(&key) {
                    Some(slot) => {
                        let previous = std::mem::take(slot);
                        *slot = prefer_later(previous, value);
                    }
                    None => {
                        base.insert(key, value);
                    }
                }
            }
            Value::Object(base)
        }
        (earlier, later) => {
            if is_empty(&later) {
                earlier
            } else {
                later
            }
        }
    }
}
