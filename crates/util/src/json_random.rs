//! Random JSON documents and random structural mutations.
//!
//! Drives the seeded [`Fuzzer`] so the property suites can generate document
//! pairs that exercise scalar edits, object key churn, and array
//! insert/remove/reorder, all reproducibly from a fixed seed.

use serde_json::{Map, Value};

use crate::fuzzer::Fuzzer;
use crate::json_clone::clone;

/// Options for random JSON generation.
#[derive(Debug, Clone)]
pub struct RandomJsonOptions {
    /// Containers are only generated above this depth.
    pub max_depth: usize,
    /// Maximum number of elements per array and properties per object.
    pub max_width: usize,
    /// Whether JSON `null` may appear as a leaf.
    pub allow_null: bool,
}

impl Default for RandomJsonOptions {
    fn default() -> Self {
        Self {
            max_depth: 4,
            max_width: 5,
            allow_null: true,
        }
    }
}

/// Generate a random JSON value.
pub fn random_json(fuzzer: &Fuzzer, opts: &RandomJsonOptions) -> Value {
    node(fuzzer, opts, 0)
}

/// Return a copy of `value` with `edits` random structural edits applied.
///
/// Edits replace scalars, add/remove object properties, and
/// insert/remove/swap array elements. Introduced leaves are never `null`.
pub fn mutate_json(fuzzer: &Fuzzer, value: &Value, edits: usize) -> Value {
    let mut out = clone(value);
    for _ in 0..edits {
        mutate_in_place(fuzzer, &mut out, 0);
    }
    out
}

fn node(fuzzer: &Fuzzer, opts: &RandomJsonOptions, depth: usize) -> Value {
    let containers_allowed = depth < opts.max_depth;
    match fuzzer.random_int(0, 9) {
        0 if opts.allow_null => Value::Null,
        0 | 1 => Value::Bool(fuzzer.random_bool(0.5)),
        2..=4 => random_number(fuzzer),
        5 | 6 => Value::String(random_word(fuzzer)),
        7 | 8 if containers_allowed => {
            let len = fuzzer.random_int(0, opts.max_width as i64) as usize;
            Value::Array((0..len).map(|_| node(fuzzer, opts, depth + 1)).collect())
        }
        9 if containers_allowed => {
            let len = fuzzer.random_int(0, opts.max_width as i64) as usize;
            let mut map = Map::new();
            for _ in 0..len {
                map.insert(random_word(fuzzer), node(fuzzer, opts, depth + 1));
            }
            Value::Object(map)
        }
        _ => random_number(fuzzer),
    }
}

fn random_number(fuzzer: &Fuzzer) -> Value {
    if fuzzer.random_bool(0.8) {
        Value::from(fuzzer.random_int(-1_000, 1_000))
    } else {
        Value::from(fuzzer.random_int(-1_000, 1_000) as f64 / 4.0)
    }
}

fn random_word(fuzzer: &Fuzzer) -> String {
    let len = fuzzer.random_int(1, 8) as usize;
    fuzzer.random_string(len, "abcdefghijklmnopqrstuvwxyz")
}

fn random_leaf(fuzzer: &Fuzzer) -> Value {
    match fuzzer.random_int(0, 3) {
        0 => Value::Bool(fuzzer.random_bool(0.5)),
        1 | 2 => random_number(fuzzer),
        _ => Value::String(random_word(fuzzer)),
    }
}

fn mutate_in_place(fuzzer: &Fuzzer, target: &mut Value, depth: usize) {
    match target {
        Value::Array(items) if !items.is_empty() && depth < 8 => {
            match fuzzer.random_int(0, 4) {
                0 => {
                    let i = fuzzer.random_int(0, items.len() as i64 - 1) as usize;
                    items.remove(i);
                }
                1 => {
                    let i = fuzzer.random_int(0, items.len() as i64) as usize;
                    items.insert(i, random_leaf(fuzzer));
                }
                2 => {
                    let i = fuzzer.random_int(0, items.len() as i64 - 1) as usize;
                    let j = fuzzer.random_int(0, items.len() as i64 - 1) as usize;
                    items.swap(i, j);
                }
                _ => {
                    let i = fuzzer.random_int(0, items.len() as i64 - 1) as usize;
                    mutate_in_place(fuzzer, &mut items[i], depth + 1);
                }
            }
        }
        Value::Object(map) if !map.is_empty() && depth < 8 => {
            let keys: Vec<String> = map.keys().cloned().collect();
            match fuzzer.random_int(0, 3) {
                0 => {
                    map.remove(fuzzer.pick(&keys));
                }
                1 => {
                    map.insert(random_word(fuzzer), random_leaf(fuzzer));
                }
                _ => {
                    let key = fuzzer.pick(&keys);
                    if let Some(child) = map.get_mut(key) {
                        mutate_in_place(fuzzer, child, depth + 1);
                    }
                }
            }
        }
        other => *other = random_leaf(fuzzer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stable_stringify;

    fn seeded() -> Fuzzer {
        Fuzzer::new(Some([42u8; 32]))
    }

    #[test]
    fn generation_is_reproducible() {
        let opts = RandomJsonOptions::default();
        let a = random_json(&seeded(), &opts);
        let b = random_json(&seeded(), &opts);
        assert_eq!(stable_stringify(&a), stable_stringify(&b));
    }

    fn has_null(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Array(items) => items.iter().any(has_null),
            Value::Object(map) => map.values().any(has_null),
            _ => false,
        }
    }

    #[test]
    fn allow_null_false_generates_no_nulls() {
        let fuzzer = seeded();
        let opts = RandomJsonOptions {
            allow_null: false,
            ..RandomJsonOptions::default()
        };
        for _ in 0..50 {
            let value = random_json(&fuzzer, &opts);
            assert!(!has_null(&value), "{value}");
        }
    }

    #[test]
    fn mutation_leaves_input_untouched() {
        let fuzzer = seeded();
        let opts = RandomJsonOptions::default();
        let original = random_json(&fuzzer, &opts);
        let before = stable_stringify(&original);
        let _ = mutate_json(&fuzzer, &original, 5);
        assert_eq!(stable_stringify(&original), before);
    }

    #[test]
    fn mutation_respects_depth_guard() {
        let fuzzer = seeded();
        let deep = serde_json::json!([[[[[[[[[[1]]]]]]]]]]);
        // Must terminate and produce a value.
        let _ = mutate_json(&fuzzer, &deep, 10);
    }
}
