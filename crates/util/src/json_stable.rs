//! Deterministic JSON serialization with sorted object keys.
//!
//! Standard serialization emits object members in insertion order, so two
//! deeply equal values can serialize differently. Sorting keys first yields a
//! canonical form: two values are deeply equal exactly when their canonical
//! forms are byte-identical.

use serde_json::Value;

/// Serialize `value` to a minified JSON string with object keys sorted.
///
/// Scalars and strings use `serde_json`'s own compact formatting, so the
/// output is always valid JSON.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_delta_util::stable_stringify;
///
/// let val = json!({"b": 2, "a": 1});
/// assert_eq!(stable_stringify(&val), r#"{"a":1,"b":2}"#);
/// ```
pub fn stable_stringify(value: &Value) -> String {
    match value {
        Value::Array(arr) => {
            let mut out = String::from('[');
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&stable_stringify(item));
            }
            out.push(']');
            out
        }
        Value::Object(obj) => {
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort_unstable();
            let mut out = String::from('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String((*key).clone()).to_string());
                out.push(':');
                out.push_str(&stable_stringify(&obj[key.as_str()]));
            }
            out.push('}');
            out
        }
        scalar => scalar.to_string(),
    }
}
