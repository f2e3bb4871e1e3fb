use serde_json::Value;

/// Performs a deep equality check between two JSON values.
///
/// Scalars compare by value, arrays element by element in order, and objects
/// by key set and per-key values with key order irrelevant. Values of
/// different types are never equal.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_delta_util::deep_equal;
///
/// let a = json!({"id": 1, "tags": ["x", "y"]});
/// let b = json!({"tags": ["x", "y"], "id": 1});
///
/// assert!(deep_equal(&a, &b));
/// assert!(!deep_equal(&a, &json!({"id": 2, "tags": ["x", "y"]})));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,

        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| deep_equal(x, y))
        }

        (Value::Object(a), Value::Object(b)) => {
            if a.len() != b.len() {
                return false;
            }
            a.iter()
                .all(|(key, val)| b.get(key).is_some_and(|other| deep_equal(val, other)))
        }

        // Different types are never equal
        _ => false,
    }
}
