//! Core types: error, operation codes, and diff options.

use std::collections::HashSet;
use std::ops::{BitOr, BitOrAssign};

use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeltaError {
    /// The delta does not follow the wire format.
    #[error("invalid delta: {0}")]
    InvalidDelta(String),
    /// Operation code 2 is reserved for text diffs, which are not supported.
    #[error("text diff operations are not supported")]
    TextDiffNotSupported,
    /// Text-level input could not be parsed as JSON.
    #[error("invalid JSON input: {0}")]
    InvalidJson(String),
}

// ── Operation codes ───────────────────────────────────────────────────────

/// Operation code carried in the third slot of a 3-element delta tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaOp {
    Deleted,
    TextDiff,
    ArrayMoved,
}

impl DeltaOp {
    /// The numeric code used on the wire.
    pub fn code(self) -> u64 {
        match self {
            DeltaOp::Deleted => 0,
            DeltaOp::TextDiff => 2,
            DeltaOp::ArrayMoved => 3,
        }
    }

    /// Decode a wire code. Unknown codes return `None`.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(DeltaOp::Deleted),
            2 => Some(DeltaOp::TextDiff),
            3 => Some(DeltaOp::ArrayMoved),
            _ => None,
        }
    }
}

// ── Behavior flags ────────────────────────────────────────────────────────

/// Bit-set of diff behavior flags, combinable with `|`.
///
/// ```
/// use json_delta::DiffBehaviors;
///
/// let behaviors = DiffBehaviors::IGNORE_MISSING_PROPERTIES | DiffBehaviors::IGNORE_NEW_PROPERTIES;
/// assert!(behaviors.contains(DiffBehaviors::IGNORE_NEW_PROPERTIES));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffBehaviors(u32);

impl DiffBehaviors {
    /// No special behavior.
    pub const NONE: DiffBehaviors = DiffBehaviors(0);
    /// Keys present only on the left side produce no delete encodings.
    pub const IGNORE_MISSING_PROPERTIES: DiffBehaviors = DiffBehaviors(1);
    /// Keys present only on the right side produce no add encodings.
    pub const IGNORE_NEW_PROPERTIES: DiffBehaviors = DiffBehaviors(1 << 1);

    /// Whether every flag in `flags` is set.
    pub fn contains(self, flags: DiffBehaviors) -> bool {
        self.0 & flags.0 == flags.0
    }
}

impl BitOr for DiffBehaviors {
    type Output = DiffBehaviors;

    fn bitor(self, rhs: DiffBehaviors) -> DiffBehaviors {
        DiffBehaviors(self.0 | rhs.0)
    }
}

impl BitOrAssign for DiffBehaviors {
    fn bitor_assign(&mut self, rhs: DiffBehaviors) {
        self.0 |= rhs.0;
    }
}

// ── Array diff mode ───────────────────────────────────────────────────────

/// Strategy used when both sides of a comparison are arrays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArrayDiffMode {
    /// Run the LCS-based array differ (adds, removes, moves, edits).
    #[default]
    Efficient,
    /// Encode unequal arrays as a whole-value replace `[left, right]`.
    Simple,
}

// ── Options ───────────────────────────────────────────────────────────────

/// Configuration for a diff run.
#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    /// Dot-joined node paths to skip, matched case-insensitively.
    pub exclude_paths: Vec<String>,
    /// Behavior flags.
    pub behaviors: DiffBehaviors,
    /// Array comparison strategy.
    pub array_diff_mode: ArrayDiffMode,
}

impl DiffOptions {
    /// Lowercased exclusion set, rebuilt per top-level diff call.
    pub(crate) fn excluded_set(&self) -> HashSet<String> {
        self.exclude_paths
            .iter()
            .map(|path| path.to_lowercase())
            .collect()
    }
}
