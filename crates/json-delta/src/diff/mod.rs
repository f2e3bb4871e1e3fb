//! Structural diff: produce a delta that transforms `left` into `right`.

mod array;
mod object;

use std::collections::HashSet;

use json_delta_util::{clone, deep_equal};
use serde_json::Value;

use crate::types::{ArrayDiffMode, DiffOptions};

/// Diff two JSON values with default options.
///
/// Returns `None` when the documents are deeply equal.
pub fn diff(left: &Value, right: &Value) -> Option<Value> {
    diff_with_options(left, right, &DiffOptions::default())
}

/// Diff two JSON values.
///
/// Returns `None` when the documents are deeply equal (after the null
/// coercion described below), otherwise the delta in wire format.
pub fn diff_with_options(left: &Value, right: &Value, options: &DiffOptions) -> Option<Value> {
    let state = DiffState {
        options,
        excluded: options.excluded_set(),
    };
    state.diff_values(left, right, "")
}

/// JSON `null` dispatches as the empty-string scalar, and the substitution is
/// visible on the wire: `diff(null, {})` encodes as `["", {}]`.
fn null_as_empty_string(value: &Value) -> &Value {
    static EMPTY: Value = Value::String(String::new());
    if value.is_null() {
        &EMPTY
    } else {
        value
    }
}

/// Per-call diff context: the options plus the derived exclusion set.
pub(crate) struct DiffState<'a> {
    pub(crate) options: &'a DiffOptions,
    excluded: HashSet<String>,
}

impl DiffState<'_> {
    pub(crate) fn diff_values(&self, left: &Value, right: &Value, path: &str) -> Option<Value> {
        let left = null_as_empty_string(left);
        let right = null_as_empty_string(right);

        match (left, right) {
            (Value::Object(l), Value::Object(r)) => self.diff_objects(l, r, path),
            (Value::Array(l), Value::Array(r)) => match self.options.array_diff_mode {
                ArrayDiffMode::Efficient => self.diff_arrays(l, r, path),
                ArrayDiffMode::Simple => self.replace(left, right),
            },
            _ => self.replace(left, right),
        }
    }

    fn replace(&self, left: &Value, right: &Value) -> Option<Value> {
        if deep_equal(left, right) {
            None
        } else {
            Some(Value::Array(vec![clone(left), clone(right)]))
        }
    }

    pub(crate) fn is_excluded(&self, path: &str) -> bool {
        self.excluded.contains(&path.to_lowercase())
    }

    /// Dot-joined property path; array elements inherit their container path.
    pub(crate) fn child_path(path: &str, key: &str) -> String {
        if path.is_empty() {
            key.to_string()
        } else {
            format!("{path}.{key}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn equal_values_produce_no_delta() {
        assert_eq!(diff(&json!({}), &json!({})), None);
        assert_eq!(diff(&json!([1, 2]), &json!([1, 2])), None);
        assert_eq!(diff(&json!("x"), &json!("x")), None);
        assert_eq!(diff(&json!(null), &json!(null)), None);
    }

    #[test]
    fn scalar_replace() {
        assert_eq!(diff(&json!(1), &json!("hello")), Some(json!([1, "hello"])));
    }

    #[test]
    fn type_change_is_a_replace() {
        assert_eq!(
            diff(&json!({"a": 1}), &json!([1])),
            Some(json!([{"a": 1}, [1]]))
        );
    }

    #[test]
    fn null_coerces_to_empty_string() {
        assert_eq!(diff(&json!(null), &json!({})), Some(json!(["", {}])));
        assert_eq!(diff(&json!(null), &json!("")), None);
        assert_eq!(
            diff(&json!({"a": null}), &json!({"a": 1})),
            Some(json!({"a": ["", 1]}))
        );
    }

    #[test]
    fn simple_mode_replaces_whole_arrays() {
        let options = DiffOptions {
            array_diff_mode: ArrayDiffMode::Simple,
            ..DiffOptions::default()
        };
        assert_eq!(
            diff_with_options(&json!([1, 2, 3]), &json!([1, 3]), &options),
            Some(json!([[1, 2, 3], [1, 3]]))
        );
        assert_eq!(diff_with_options(&json!([1, 2]), &json!([1, 2]), &options), None);
    }

    #[test]
    fn nested_scalar_change() {
        assert_eq!(
            diff(&json!({"user": {"age": 30}}), &json!({"user": {"age": 31}})),
            Some(json!({"user": {"age": [30, 31]}}))
        );
    }
}
