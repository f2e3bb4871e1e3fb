//! json-delta-util - Utility functions for json-delta
//!
//! Leaf helpers shared by the json-delta crates: deep equality and cloning
//! of JSON trees, canonical serialization, and seeded random data generation
//! for the test suites.

pub mod fuzzer;
pub mod json_clone;
pub mod json_equal;
pub mod json_random;
pub mod json_stable;

// Re-exports for convenience
pub use fuzzer::Fuzzer;
pub use json_clone::clone;
pub use json_equal::deep_equal;
pub use json_random::{mutate_json, random_json, RandomJsonOptions};
pub use json_stable::stable_stringify;
