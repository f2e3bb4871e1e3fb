//! Forward delta application: replay a delta onto the left document.

use json_delta_util::clone;
use serde_json::{Map, Value};

use crate::types::{DeltaError, DeltaOp};

/// Apply `delta` to `left`, producing the right-hand document.
///
/// `left` is cloned before any mutation, so the caller's value is untouched
/// even when an invalid delta aborts the call. A `Null` delta and the
/// empty-string scalar are both identity.
pub fn patch(left: &Value, delta: &Value) -> Result<Value, DeltaError> {
    match delta {
        Value::Null => Ok(clone(left)),
        Value::String(s) if s.is_empty() => Ok(clone(left)),
        Value::Array(parts) => patch_scalar_form(parts),
        Value::Object(props) => {
            if is_array_delta(props) {
                match left {
                    Value::Array(items) => patch_array(items, props),
                    // A nested array delta may land on a target that never
                    // existed; it then builds the array from scratch.
                    Value::Null => patch_array(&[], props),
                    other => Err(DeltaError::InvalidDelta(format!(
                        "array delta applied to non-array value: {other}"
                    ))),
                }
            } else {
                patch_object(left, props)
            }
        }
        other => Err(DeltaError::InvalidDelta(format!(
            "unrecognized delta shape: {other}"
        ))),
    }
}

/// An object delta is an array delta exactly when it carries `"_t": "a"`.
pub(crate) fn is_array_delta(props: &Map<String, Value>) -> bool {
    props.get("_t").and_then(Value::as_str) == Some("a")
}

/// Decode the third slot of a 3-element tuple into an operation code.
pub(crate) fn op_code(raw: &Value) -> Result<DeltaOp, DeltaError> {
    raw.as_u64()
        .and_then(DeltaOp::from_code)
        .ok_or_else(|| DeltaError::InvalidDelta(format!("unrecognized operation code: {raw}")))
}

/// Parse an array-delta key ("3" or "_3") into an index.
pub(crate) fn parse_index(key: &str) -> Result<usize, DeltaError> {
    key.parse()
        .map_err(|_| DeltaError::InvalidDelta(format!("non-numeric array delta key: {key:?}")))
}

fn patch_scalar_form(parts: &[Value]) -> Result<Value, DeltaError> {
    match parts {
        [added] => Ok(clone(added)),
        [_, replacement] => Ok(clone(replacement)),
        [_, _, raw] => match op_code(raw)? {
            DeltaOp::Deleted => Ok(Value::Null),
            DeltaOp::TextDiff => Err(DeltaError::TextDiffNotSupported),
            DeltaOp::ArrayMoved => Err(DeltaError::InvalidDelta(
                "array move outside an array delta".to_string(),
            )),
        },
        [] => Err(DeltaError::InvalidDelta("empty delta tuple".to_string())),
        _ => Err(DeltaError::InvalidDelta(format!(
            "delta tuple has {} elements, at most 3 allowed",
            parts.len()
        ))),
    }
}

/// A delete tuple `[v, 0, 0]` inside an object delta removes the property.
fn is_delete_tuple(delta: &Value) -> bool {
    match delta {
        Value::Array(parts) => {
            parts.len() == 3 && parts[2].as_u64() == Some(DeltaOp::Deleted.code())
        }
        _ => false,
    }
}

fn patch_object(left: &Value, props: &Map<String, Value>) -> Result<Value, DeltaError> {
    // A missing or scalar target means the delta describes properties of a
    // node that did not exist yet; build them on an empty object.
    let mut target = match left {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };

    for (key, child) in props {
        if is_delete_tuple(child) {
            target.remove(key);
            continue;
        }
        let next = match target.get(key) {
            Some(existing) => patch(existing, child)?,
            None => patch(&Value::Null, child)?,
        };
        target.insert(key.clone(), next);
    }

    Ok(Value::Object(target))
}

fn patch_array(items: &[Value], props: &Map<String, Value>) -> Result<Value, DeltaError> {
    let mut to_remove: Vec<usize> = Vec::new();
    let mut to_insert: Vec<(usize, Value)> = Vec::new();
    let mut to_modify: Vec<(usize, &Value)> = Vec::new();

    for (key, child) in props {
        if key == "_t" {
            continue;
        }
        if let Some(raw_index) = key.strip_prefix('_') {
            let li = parse_index(raw_index)?;
            let parts = match child {
                Value::Array(parts) if parts.len() == 3 => parts,
                _ => {
                    return Err(DeltaError::InvalidDelta(format!(
                        "array delta entry {key:?} carries neither a deletion nor a move"
                    )))
                }
            };
            match op_code(&parts[2])? {
                DeltaOp::Deleted => to_remove.push(li),
                DeltaOp::ArrayMoved => {
                    let source = items.get(li).ok_or_else(|| {
                        DeltaError::InvalidDelta(format!("move source index {li} out of bounds"))
                    })?;
                    let new_index = parts[1].as_u64().ok_or_else(|| {
                        DeltaError::InvalidDelta(format!(
                            "move destination is not an index: {}",
                            parts[1]
                        ))
                    })? as usize;
                    to_insert.push((new_index, patch(source, &parts[0])?));
                    to_remove.push(li);
                }
                DeltaOp::TextDiff => return Err(DeltaError::TextDiffNotSupported),
            }
        } else {
            let ri = parse_index(key)?;
            match child {
                Value::Array(parts) if parts.len() == 1 => to_insert.push((ri, clone(&parts[0]))),
                _ => to_modify.push((ri, child)),
            }
        }
    }

    let mut target: Vec<Value> = items.to_vec();

    // Removals run from the highest left index down so pending removals are
    // not shifted by earlier ones.
    to_remove.sort_unstable();
    for &li in to_remove.iter().rev() {
        if li >= target.len() {
            return Err(DeltaError::InvalidDelta(format!(
                "removal index {li} out of bounds"
            )));
        }
        target.remove(li);
    }

    to_insert.sort_by_key(|(index, _)| *index);
    for (index, value) in to_insert {
        if index > target.len() {
            return Err(DeltaError::InvalidDelta(format!(
                "insertion index {index} out of bounds"
            )));
        }
        target.insert(index, value);
    }

    for (ri, child) in to_modify {
        if ri >= target.len() {
            return Err(DeltaError::InvalidDelta(format!(
                "modification index {ri} out of bounds"
            )));
        }
        let next = patch(&target[ri], child)?;
        target[ri] = next;
    }

    Ok(Value::Array(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identity_deltas() {
        let doc = json!({"a": [1, 2]});
        assert_eq!(patch(&doc, &Value::Null).unwrap(), doc);
        assert_eq!(patch(&doc, &json!("")).unwrap(), doc);
    }

    #[test]
    fn scalar_forms() {
        assert_eq!(patch(&Value::Null, &json!([5])).unwrap(), json!(5));
        assert_eq!(patch(&json!(1), &json!([1, "hello"])).unwrap(), json!("hello"));
        assert_eq!(patch(&json!(1), &json!([1, 0, 0])).unwrap(), Value::Null);
    }

    #[test]
    fn text_diff_is_rejected() {
        assert_eq!(
            patch(&json!("ab"), &json!(["@@ -1,2 +1,2 @@", 0, 2])),
            Err(DeltaError::TextDiffNotSupported)
        );
    }

    #[test]
    fn malformed_tuples_are_rejected() {
        assert!(matches!(
            patch(&json!(1), &json!([1, 2, 3, 4])),
            Err(DeltaError::InvalidDelta(_))
        ));
        assert!(matches!(
            patch(&json!(1), &json!([])),
            Err(DeltaError::InvalidDelta(_))
        ));
        assert!(matches!(
            patch(&json!(1), &json!([1, 2, 7])),
            Err(DeltaError::InvalidDelta(_))
        ));
        assert!(matches!(
            patch(&json!(1), &json!([1, 2, "x"])),
            Err(DeltaError::InvalidDelta(_))
        ));
    }

    #[test]
    fn object_add_replace_delete() {
        let left = json!({"keep": 1, "change": "a", "drop": true});
        let delta = json!({
            "change": ["a", "b"],
            "drop": [true, 0, 0],
            "fresh": [42]
        });
        assert_eq!(
            patch(&left, &delta).unwrap(),
            json!({"keep": 1, "change": "b", "fresh": 42})
        );
    }

    #[test]
    fn missing_nested_target_is_built() {
        let delta = json!({"outer": {"inner": [7]}});
        assert_eq!(
            patch(&json!({}), &delta).unwrap(),
            json!({"outer": {"inner": 7}})
        );
    }

    #[test]
    fn nested_array_delta_on_missing_target() {
        let delta = json!({"list": {"_t": "a", "0": ["x"]}});
        assert_eq!(patch(&json!({}), &delta).unwrap(), json!({"list": ["x"]}));
    }

    #[test]
    fn array_removal_and_insertion() {
        let delta = json!({"_t": "a", "_0": [1, 0, 0], "2": ["z"]});
        assert_eq!(
            patch(&json!([1, 2, 3]), &delta).unwrap(),
            json!([2, 3, "z"])
        );
    }

    #[test]
    fn array_move_applies_nested_delta() {
        let delta = json!({"_t": "a", "_0": [{"p": [1, 2]}, 2, 3]});
        assert_eq!(
            patch(&json!([{"p": 1}, "a", "b"]), &delta).unwrap(),
            json!(["a", "b", {"p": 2}])
        );
    }

    #[test]
    fn array_modify_recurses() {
        let delta = json!({"_t": "a", "1": {"p": [false, true]}});
        assert_eq!(
            patch(&json!([0, {"p": false}]), &delta).unwrap(),
            json!([0, {"p": true}])
        );
    }

    #[test]
    fn underscore_entry_requires_delete_or_move() {
        let delta = json!({"_t": "a", "_0": [1]});
        assert!(matches!(
            patch(&json!([1]), &delta),
            Err(DeltaError::InvalidDelta(_))
        ));
        let replace = json!({"_t": "a", "_0": [1, 2]});
        assert!(matches!(
            patch(&json!([1]), &replace),
            Err(DeltaError::InvalidDelta(_))
        ));
    }

    #[test]
    fn array_delta_on_non_array_is_invalid() {
        let delta = json!({"_t": "a", "0": [1]});
        assert!(matches!(
            patch(&json!({"a": 1}), &delta),
            Err(DeltaError::InvalidDelta(_))
        ));
    }

    #[test]
    fn out_of_bounds_indices_are_invalid() {
        assert!(matches!(
            patch(&json!([1]), &json!({"_t": "a", "_5": [0, 0, 0]})),
            Err(DeltaError::InvalidDelta(_))
        ));
        assert!(matches!(
            patch(&json!([1]), &json!({"_t": "a", "9": {"p": [1, 2]}})),
            Err(DeltaError::InvalidDelta(_))
        ));
    }

    #[test]
    fn inputs_are_never_mutated() {
        let left = json!({"list": [1, 2, 3]});
        let delta = json!({"list": {"_t": "a", "_1": [2, 0, 0]}});
        let left_before = left.to_string();
        let delta_before = delta.to_string();
        let _ = patch(&left, &delta).unwrap();
        assert_eq!(left.to_string(), left_before);
        assert_eq!(delta.to_string(), delta_before);
    }
}
