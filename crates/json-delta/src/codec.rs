//! Text-level entry points: parse JSON, run the value operation, serialize.

use serde_json::Value;

use crate::diff::diff_with_options;
use crate::patch::patch;
use crate::types::{DeltaError, DiffOptions};
use crate::unpatch::unpatch;

/// Parse a JSON document from text.
///
/// An empty input is treated as the empty-string scalar value, matching the
/// in-band identity encoding of the delta format.
fn parse_document(text: &str) -> Result<Value, DeltaError> {
    if text.is_empty() {
        return Ok(Value::String(String::new()));
    }
    serde_json::from_str(text).map_err(|err| DeltaError::InvalidJson(err.to_string()))
}

/// Diff two JSON texts; `None` means the documents are deeply equal.
pub fn diff_json(
    left: &str,
    right: &str,
    options: &DiffOptions,
) -> Result<Option<String>, DeltaError> {
    let left = parse_document(left)?;
    let right = parse_document(right)?;
    Ok(diff_with_options(&left, &right, options).map(|delta| delta.to_string()))
}

/// Apply a delta text to a left document text.
pub fn patch_json(left: &str, delta: &str) -> Result<String, DeltaError> {
    let left = parse_document(left)?;
    let delta = parse_document(delta)?;
    Ok(patch(&left, &delta)?.to_string())
}

/// Reverse a delta text from a right document text.
pub fn unpatch_json(right: &str, delta: &str) -> Result<String, DeltaError> {
    let right = parse_document(right)?;
    let delta = parse_document(delta)?;
    Ok(unpatch(&right, &delta)?.to_string())
}
