//! Reverse delta application: rewind a delta from the right document.

use json_delta_util::clone;
use serde_json::{Map, Value};

use crate::patch::{is_array_delta, op_code, parse_index};
use crate::types::{DeltaError, DeltaOp};

/// Apply `delta` in reverse to `right`, recovering the left-hand document.
///
/// Mirror of [`crate::patch`]: additions are removed, deletions are
/// reinserted, replacements and moves are undone. `right` is cloned before
/// any mutation.
pub fn unpatch(right: &Value, delta: &Value) -> Result<Value, DeltaError> {
    match delta {
        Value::Null => Ok(clone(right)),
        Value::String(s) if s.is_empty() => Ok(clone(right)),
        Value::Array(parts) => unpatch_scalar_form(parts),
        Value::Object(props) => {
            if is_array_delta(props) {
                match right {
                    Value::Array(items) => unpatch_array(items, props),
                    Value::Null => unpatch_array(&[], props),
                    other => Err(DeltaError::InvalidDelta(format!(
                        "array delta applied to non-array value: {other}"
                    ))),
                }
            } else {
                unpatch_object(right, props)
            }
        }
        other => Err(DeltaError::InvalidDelta(format!(
            "unrecognized delta shape: {other}"
        ))),
    }
}

fn unpatch_scalar_form(parts: &[Value]) -> Result<Value, DeltaError> {
    match parts {
        // Reverse of an addition: the value did not exist before.
        [_added] => Ok(Value::Null),
        [original, _] => Ok(clone(original)),
        [original, _, raw] => match op_code(raw)? {
            DeltaOp::Deleted => Ok(clone(original)),
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

/// An add tuple `[v]` inside an object delta removes the property on reversal.
fn is_add_tuple(delta: &Value) -> bool {
    matches!(delta, Value::Array(parts) if parts.len() == 1)
}

fn unpatch_object(right: &Value, props: &Map<String, Value>) -> Result<Value, DeltaError> {
    let mut target = match right {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };

    for (key, child) in props {
        if is_add_tuple(child) {
            target.remove(key);
            continue;
        }
        let next = match target.get(key) {
            Some(existing) => unpatch(existing, child)?,
            // Deleted-going-forward properties are absent on the right; the
            // reversal recovers them from the delta itself.
            None => unpatch(&Value::Null, child)?,
        };
        target.insert(key.clone(), next);
    }

    Ok(Value::Object(target))
}

fn unpatch_array(items: &[Value], props: &Map<String, Value>) -> Result<Value, DeltaError> {
    let mut to_remove: Vec<usize> = Vec::new();
    let mut to_insert: Vec<(usize, Value)> = Vec::new();
    let mut to_modify: Vec<(usize, &Value)> = Vec::new();
    // (left index, landing index, nested delta); sources are resolved only
    // after the in-place modifications have been rewound.
    let mut moves: Vec<(usize, usize, &Value)> = Vec::new();

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
                // A forward deletion reappears at its left index.
                DeltaOp::Deleted => to_insert.push((li, clone(&parts[0]))),
                DeltaOp::ArrayMoved => {
                    let new_index = parts[1].as_u64().ok_or_else(|| {
                        DeltaError::InvalidDelta(format!(
                            "move destination is not an index: {}",
                            parts[1]
                        ))
                    })? as usize;
                    moves.push((li, new_index, &parts[0]));
                }
                DeltaOp::TextDiff => return Err(DeltaError::TextDiffNotSupported),
            }
        } else {
            let ri = parse_index(key)?;
            match child {
                // A forward addition is removed on reversal.
                Value::Array(parts) if parts.len() == 1 => to_remove.push(ri),
                _ => to_modify.push((ri, child)),
            }
        }
    }

    let mut target: Vec<Value> = items.to_vec();

    // Modifications reference right-side positions, so they must be rewound
    // before anything shifts.
    for (ri, child) in to_modify {
        if ri >= target.len() {
            return Err(DeltaError::InvalidDelta(format!(
                "modification index {ri} out of bounds"
            )));
        }
        let previous = unpatch(&target[ri], child)?;
        target[ri] = previous;
    }

    for (li, new_index, nested) in moves {
        let moved = target.get(new_index).ok_or_else(|| {
            DeltaError::InvalidDelta(format!("move destination {new_index} out of bounds"))
        })?;
        to_insert.push((li, unpatch(moved, nested)?));
        to_remove.push(new_index);
    }

    to_remove.sort_unstable();
    for &index in to_remove.iter().rev() {
        if index >= target.len() {
            return Err(DeltaError::InvalidDelta(format!(
                "removal index {index} out of bounds"
            )));
        }
        target.remove(index);
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

    Ok(Value::Array(target))
}
