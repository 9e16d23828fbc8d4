// Our Real scalar type. geo-buf only offsets f64 geometry, so there is no f32 build.
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized tolerance used by the engine when it compares
/// coordinates (collinearity, vertex identity, ring closure after snapping).
/// Defaults to `1e-9`, but can be overridden:
///  1) **Build-time**: set env var `GEOMOPS_TOLERANCE` (e.g. `GEOMOPS_TOLERANCE=1e-7 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    1e-9
}

/// Returns the current tolerance value.
/// If not set yet, it tries `GEOMOPS_TOLERANCE` (parsed as `Real`) and
/// falls back to the default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        // Compile-time env if provided, inherited by dependencies
        if let Some(environment_variable) = option_env!("GEOMOPS_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `geomops::float_types::set_tolerance(1e-7);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;

/// π/2
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

/// The full circle constant (τ)
pub const TAU: Real = core::f64::consts::TAU;

/// Quarter-circle segment count used by `Buffer` when the caller has no preference.
pub const DEFAULT_QUADRANT_SEGMENTS: i32 = 8;

/// Quarter-circle segment count used when arcs are replaced by line work.
pub const DEFAULT_CURVE_SEGMENTS: u32 = 32;
