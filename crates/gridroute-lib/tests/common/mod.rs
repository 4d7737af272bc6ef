//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use gridroute_lib::{load_level, Level};

/// Tolerance used when comparing accumulated floating point costs.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-9;

/// Path to fixtures directory shared by the workspace tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Load the main example level (waypoints a-e plus an isolated `z`).
#[allow(dead_code)]
pub fn example_level() -> Level {
    load_level(&fixtures_dir().join("example.txt")).expect("load fixture example.txt")
}

#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}
