use serde_json::{Map, Value};

/// Creates a deep clone of a JSON value.
///
/// Every nested array and object is rebuilt, so the result shares no
/// allocation with the input.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_delta_util::clone;
///
/// let original = json!({"items": [1, 2, 3]});
/// assert_eq!(clone(&original), original);
/// ```
pub fn clone(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => Value::String(s.clone()),
        Value::Array(arr) => Value::Array(arr.iter().map(clone).collect()),
        Value::Object(obj) => Value::Object(
            obj.iter()
                .map(|(key, val)| (key.clone(), clone(val)))
                .collect::<Map<String, Value>>(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clone_scalars() {
        for value in [json!(null), json!(true), json!(42), json!("hello")] {
            assert_eq!(clone(&value), value);
        }
    }

    #[test]
    fn clone_array() {
        let value = json!([1, "two", [3]]);
        assert_eq!(clone(&value), value);
    }

    #[test]
    fn clone_object() {
        let value = json!({"a": {"b": [false, null]}, "c": 1.5});
        assert_eq!(clone(&value), value);
    }

    #[test]
    fn clone_is_independent() {
        let original = json!({"arr": [1, 2, 3]});
        let mut cloned = clone(&original);
        cloned["arr"][0] = json!(99);
        assert_eq!(original["arr"][0], json!(1));
    }
}
