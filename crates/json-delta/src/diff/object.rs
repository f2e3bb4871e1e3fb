//! Property-wise object diffing.

use json_delta_util::clone;
use serde_json::{Map, Value};

use super::DiffState;
use crate::types::DiffBehaviors;

impl DiffState<'_> {
    /// Diff two objects property by property.
    ///
    /// Keys only on the left encode as deletions `[v, 0, 0]`, keys only on
    /// the right as additions `[v]`, shared keys recurse. Excluded paths are
    /// skipped on both sides so they never appear in a delta.
    pub(crate) fn diff_objects(
        &self,
        left: &Map<String, Value>,
        right: &Map<String, Value>,
        path: &str,
    ) -> Option<Value> {
        let mut delta = Map::new();

        for (key, left_val) in left {
            let child = Self::child_path(path, key);
            if self.is_excluded(&child) {
                continue;
            }
            match right.get(key) {
                Some(right_val) => {
                    if let Some(nested) = self.diff_values(left_val, right_val, &child) {
                        delta.insert(key.clone(), nested);
                    }
                }
                None => {
                    if !self
                        .options
                        .behaviors
                        .contains(DiffBehaviors::IGNORE_MISSING_PROPERTIES)
                    {
                        delta.insert(
                            key.clone(),
                            Value::Array(vec![clone(left_val), 0.into(), 0.into()]),
                        );
                    }
                }
            }
        }

        for (key, right_val) in right {
            if left.contains_key(key) {
                continue;
            }
            let child = Self::child_path(path, key);
            if self.is_excluded(&child) {
                continue;
            }
            if self
                .options
                .behaviors
                .contains(DiffBehaviors::IGNORE_NEW_PROPERTIES)
            {
                continue;
            }
            delta.insert(key.clone(), Value::Array(vec![clone(right_val)]));
        }

        if delta.is_empty() {
            None
        } else {
            Some(Value::Object(delta))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::diff::{diff, diff_with_options};
    use crate::types::{DiffBehaviors, DiffOptions};
    use serde_json::json;

    #[test]
    fn changed_property() {
        assert_eq!(
            diff(&json!({"p": true}), &json!({"p": false})),
            Some(json!({"p": [true, false]}))
        );
    }

    #[test]
    fn removed_property() {
        assert_eq!(
            diff(&json!({"p": true}), &json!({})),
            Some(json!({"p": [true, 0, 0]}))
        );
    }

    #[test]
    fn added_property() {
        assert_eq!(
            diff(&json!({}), &json!({"p": true})),
            Some(json!({"p": [true]}))
        );
    }

    #[test]
    fn unchanged_properties_are_omitted() {
        assert_eq!(
            diff(
                &json!({"keep": 1, "change": "a"}),
                &json!({"keep": 1, "change": "b"})
            ),
            Some(json!({"change": ["a", "b"]}))
        );
    }

    #[test]
    fn ignore_missing_properties() {
        let options = DiffOptions {
            behaviors: DiffBehaviors::IGNORE_MISSING_PROPERTIES,
            ..DiffOptions::default()
        };
        assert_eq!(
            diff_with_options(&json!({"gone": 1, "p": 2}), &json!({"p": 3}), &options),
            Some(json!({"p": [2, 3]}))
        );
    }

    #[test]
    fn ignore_new_properties() {
        let options = DiffOptions {
            behaviors: DiffBehaviors::IGNORE_NEW_PROPERTIES,
            ..DiffOptions::default()
        };
        assert_eq!(
            diff_with_options(&json!({"p": 2}), &json!({"p": 3, "extra": 1}), &options),
            Some(json!({"p": [2, 3]}))
        );
        assert_eq!(
            diff_with_options(&json!({"p": 2}), &json!({"p": 2, "extra": 1}), &options),
            None
        );
    }

    #[test]
    fn excluded_paths_skip_both_sides() {
        let options = DiffOptions {
            exclude_paths: vec!["id".to_string(), "nested.id".to_string()],
            ..DiffOptions::default()
        };
        let left = json!({"id": 1, "nested": {"id": 10, "p": "a"}});
        let right = json!({"id": 2, "nested": {"id": 20, "p": "b"}, "ID2": 3});
        assert_eq!(
            diff_with_options(&left, &right, &options),
            Some(json!({"nested": {"p": ["a", "b"]}, "ID2": [3]}))
        );
    }

    #[test]
    fn exclusion_is_case_insensitive() {
        let options = DiffOptions {
            exclude_paths: vec!["ID".to_string()],
            ..DiffOptions::default()
        };
        assert_eq!(
            diff_with_options(&json!({"id": 1}), &json!({"id": 2}), &options),
            None
        );
    }
}
