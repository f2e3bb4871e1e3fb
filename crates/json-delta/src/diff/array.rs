//! Array diffing: head/tail trim, LCS classification, delta assembly.

use json_delta_util::{clone, deep_equal};
use serde_json::{Map, Value};

use super::DiffState;
use crate::lcs;

/// In-place modification is only worth encoding when both sides are the same
/// kind of container; re-paired scalars fall back to remove + add.
fn same_container_kind(a: &Value, b: &Value) -> bool {
    (a.is_object() && b.is_object()) || (a.is_array() && b.is_array())
}

impl DiffState<'_> {
    /// Diff two arrays into an `{"_t": "a", ...}` delta.
    ///
    /// Plain keys are right-side indices (edits and additions); underscore
    /// keys are left-side indices (removals and moves).
    pub(crate) fn diff_arrays(&self, left: &[Value], right: &[Value], path: &str) -> Option<Value> {
        let min_len = left.len().min(right.len());
        let mut head = 0;
        while head < min_len && deep_equal(&left[head], &right[head]) {
            head += 1;
        }
        if head == left.len() && head == right.len() {
            return None;
        }
        let mut tail = 0;
        while tail < min_len - head
            && deep_equal(&left[left.len() - 1 - tail], &right[right.len() - 1 - tail])
        {
            tail += 1;
        }

        let analysis = lcs::compute(
            &left[head..left.len() - tail],
            &right[head..right.len() - tail],
            head,
        );

        let mut delta = Map::new();
        delta.insert("_t".to_string(), Value::String("a".to_string()));

        let mut removes = analysis.to_remove;
        let mut adds = analysis.to_add;

        for (li, ri) in analysis.to_diff {
            if same_container_kind(&left[li], &right[ri]) {
                self.emit_pair(&mut delta, left, right, li, ri, path);
            } else {
                removes.push(li);
                adds.push(ri);
            }
        }
        for (li, ri) in analysis.to_move {
            self.emit_pair(&mut delta, left, right, li, ri, path);
        }

        adds.sort_unstable();
        for ri in adds {
            delta.insert(ri.to_string(), Value::Array(vec![clone(&right[ri])]));
        }
        removes.sort_unstable();
        for li in removes {
            delta.insert(
                format!("_{li}"),
                Value::Array(vec![clone(&left[li]), 0.into(), 0.into()]),
            );
        }

        if delta.len() == 1 {
            None
        } else {
            Some(Value::Object(delta))
        }
    }

    /// Encode a matched `(left, right)` pair: an in-place edit when the
    /// position is unchanged, otherwise a move carrying the nested delta.
    fn emit_pair(
        &self,
        delta: &mut Map<String, Value>,
        left: &[Value],
        right: &[Value],
        li: usize,
        ri: usize,
        path: &str,
    ) {
        let nested = self.diff_values(&left[li], &right[ri], path);
        if li == ri {
            if let Some(nested) = nested {
                delta.insert(ri.to_string(), nested);
            }
        } else {
            let inner = nested.unwrap_or_else(|| Value::String(String::new()));
            delta.insert(
                format!("_{li}"),
                Value::Array(vec![inner, (ri as u64).into(), 3.into()]),
            );
        }
    }
}
