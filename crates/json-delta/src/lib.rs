//! json-delta — structural JSON diff and patch.
//!
//! Computes compact deltas between two JSON values and applies them in both
//! directions. The delta format follows the jsondiffpatch convention:
//!
//! - `[v]` — added value
//! - `[a, b]` — replaced `a` with `b`
//! - `[a, 0, 0]` — deleted value `a`
//! - `[v, newIndex, 3]` — array element moved to `newIndex` (`v` is its
//!   nested delta, or the empty string)
//! - `{ ... }` — property-wise object delta
//! - `{ "_t": "a", ... }` — array delta; plain keys are right-side indices,
//!   `_`-prefixed keys are left-side indices
//!
//! Array deltas are produced by a longest-common-subsequence pass over deep
//! equality of the elements, after trimming the common head and tail, so
//! insertions, removals, in-place edits, and moves are all encoded at minimal
//! cost. Every produced delta is reversible: [`patch`] replays it onto the
//! left document and [`unpatch`] rewinds it from the right document.
//!
//! ```
//! use serde_json::json;
//! use json_delta::{diff, patch, unpatch};
//!
//! let left = json!({"name": "ada", "tags": ["a", "b"]});
//! let right = json!({"name": "bob", "tags": ["a", "b", "c"]});
//!
//! let delta = diff(&left, &right).expect("documents differ");
//! assert_eq!(delta, json!({"name": ["ada", "bob"], "tags": {"_t": "a", "2": ["c"]}}));
//!
//! assert_eq!(patch(&left, &delta).unwrap(), right);
//! assert_eq!(unpatch(&right, &delta).unwrap(), left);
//! ```

pub mod codec;
pub mod diff;
pub mod lcs;
pub mod patch;
pub mod types;
pub mod unpatch;

pub use codec::{diff_json, patch_json, unpatch_json};
pub use diff::{diff, diff_with_options};
pub use patch::patch;
pub use types::{ArrayDiffMode, DeltaError, DeltaOp, DiffBehaviors, DiffOptions};
pub use unpatch::unpatch;
