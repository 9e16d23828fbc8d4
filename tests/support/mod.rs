//! Test support library
//! Provides helpers shared by the integration tests.
#![allow(dead_code)]

use geomops::{Geometry, OperationCatalog, from_wkt, float_types::Real};

/// Tolerance used by [`approx_eq`] when a test does not need a tighter one.
pub const EPSILON: Real = 1e-9;

/// True when `a` and `b` differ by at most `eps`.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() <= eps
}

/// Reads exchange-format text, panicking with the parse error on failure.
pub fn wkt(text: &str) -> Geometry {
    from_wkt(text).unwrap_or_else(|e| panic!("could not read {text:?}: {e}"))
}

pub fn catalog() -> OperationCatalog {
    OperationCatalog::new()
}

pub const SQUARE: &str = "POLYGON ((0 0, 4 0, 4 4, 0 4, 0 0))";
pub const A: &str = "POLYGON ((0 0, 2 0, 2 2, 0 2, 0 0))";
pub const B: &str = "POLYGON ((1 1, 3 1, 3 3, 1 3, 1 1))";
