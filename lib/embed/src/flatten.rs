//! Text flattening
//!
//! Collapses an arbitrary JSON value into a single searchable string.
//! Leaves are visited depth-first in document order and joined with a
//! single space. Object keys are not part of the output, `null` and empty
//! strings contribute nothing, and booleans render as `True` / `False`.

use serde_json::Value;

/// Flatten `value` into one whitespace-separated text blob
pub fn flatten(value: &Value) -> String {
    let mut out = String::new();
    flatten_into(value, &mut out);
    out
}

/// Flatten `value`, appending its leaves to `out`
pub fn flatten_into(value: &Value, out: &mut String) {
    match value {
        Value::Null => {}
        Value::Bool(true) => push_leaf(out, "True"),
        Value::Bool(false) => push_leaf(out, "False"),
        Value::Number(n) => push_leaf(out, &n.to_string()),
        Value::String(s) => push_leaf(out, s),
        Value::Array(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                flatten_into(item, out);
            }
        }
    }
}

#[inline]
fn push_leaf(out: &mut String, leaf: &str) {
    if leaf.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(leaf);
}
