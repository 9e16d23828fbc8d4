//! The geometry engine boundary
//!
//! An [`Engine`] speaks exchange-format text only: every geometry argument
//! arrives as WKT and every geometry result leaves as WKT. Scalars, booleans
//! and matrix strings are returned directly. Each method has a default body
//! reporting [`EngineError::Unsupported`], so an engine that only provides
//! part of the catalog is still a valid engine.
//!
//! [`GeoEngine`] is the complete implementation, computing on top of `geo`.

use crate::errors::EngineError;
use crate::float_types::Real;

mod construct;
pub mod convert;
mod geo_engine;
mod linework;
mod measure;
mod overlay;
mod relate;
mod structure;

#[cfg(feature = "offset")]
mod buffer;

pub use geo_engine::GeoEngine;

pub type EngineResult<T> = Result<T, EngineError>;

/// One method per catalog operation, over exchange-format text.
///
/// Implementations must be safe to call from several threads at once.
pub trait Engine: Send + Sync {
    fn area(&self, _wkt: &str) -> EngineResult<Real> {
        Err(EngineError::Unsupported("Area"))
    }

    fn boundary(&self, _wkt: &str) -> EngineResult<String> {
        Err(EngineError::Unsupported("Boundary"))
    }

    fn centroid(&self, _wkt: &str) -> EngineResult<String> {
        Err(EngineError::Unsupported("Centroid"))
    }

    fn is_simple(&self, _wkt: &str) -> EngineResult<bool> {
        Err(EngineError::Unsupported("IsSimple"))
    }

    fn length(&self, _wkt: &str) -> EngineResult<Real> {
        Err(EngineError::Unsupported("Length"))
    }

    fn distance(&self, _a: &str, _b: &str) -> EngineResult<Real> {
        Err(EngineError::Unsupported("Distance"))
    }

    fn hausdorff_distance(&self, _a: &str, _b: &str) -> EngineResult<Real> {
        Err(EngineError::Unsupported("HausdorffDistance"))
    }

    /// Hausdorff distance after splitting every segment into pieces no longer
    /// than `densify_fraction` of its length.
    fn hausdorff_distance_densify(
        &self,
        _a: &str,
        _b: &str,
        _densify_fraction: Real,
    ) -> EngineResult<Real> {
        Err(EngineError::Unsupported("HausdorffDistanceDensify"))
    }

    fn is_empty(&self, _wkt: &str) -> EngineResult<bool> {
        Err(EngineError::Unsupported("IsEmpty"))
    }

    fn envelope(&self, _wkt: &str) -> EngineResult<String> {
        Err(EngineError::Unsupported("Envelope"))
    }

    fn convex_hull(&self, _wkt: &str) -> EngineResult<String> {
        Err(EngineError::Unsupported("ConvexHull"))
    }

    fn unary_union(&self, _wkt: &str) -> EngineResult<String> {
        Err(EngineError::Unsupported("UnaryUnion"))
    }

    fn point_on_surface(&self, _wkt: &str) -> EngineResult<String> {
        Err(EngineError::Unsupported("PointOnSurface"))
    }

    fn line_merge(&self, _wkt: &str) -> EngineResult<String> {
        Err(EngineError::Unsupported("LineMerge"))
    }

    fn simplify(&self, _wkt: &str, _tolerance: Real) -> EngineResult<String> {
        Err(EngineError::Unsupported("Simplify"))
    }

    fn simplify_preserve_topology(&self, _wkt: &str, _tolerance: Real) -> EngineResult<String> {
        Err(EngineError::Unsupported("SimplifyP"))
    }

    fn buffer(&self, _wkt: &str, _width: Real, _quadrant_segments: i32) -> EngineResult<String> {
        Err(EngineError::Unsupported("Buffer"))
    }

    fn equals_exact(&self, _a: &str, _b: &str, _tolerance: Real) -> EngineResult<bool> {
        Err(EngineError::Unsupported("EqualsExact"))
    }

    /// DE-9IM matrix as nine characters from `{F, 0, 1, 2}`.
    fn relate(&self, _a: &str, _b: &str) -> EngineResult<String> {
        Err(EngineError::Unsupported("Relate"))
    }

    fn unique_points(&self, _wkt: &str) -> EngineResult<String> {
        Err(EngineError::Unsupported("UniquePoints"))
    }

    fn shared_paths(&self, _a: &str, _b: &str) -> EngineResult<String> {
        Err(EngineError::Unsupported("SharedPaths"))
    }

    fn snap(&self, _input: &str, _reference: &str, _tolerance: Real) -> EngineResult<String> {
        Err(EngineError::Unsupported("Snap"))
    }

    fn intersection(&self, _a: &str, _b: &str) -> EngineResult<String> {
        Err(EngineError::Unsupported("Intersection"))
    }

    fn difference(&self, _a: &str, _b: &str) -> EngineResult<String> {
        Err(EngineError::Unsupported("Difference"))
    }

    fn sym_difference(&self, _a: &str, _b: &str) -> EngineResult<String> {
        Err(EngineError::Unsupported("SymDifference"))
    }

    fn union(&self, _a: &str, _b: &str) -> EngineResult<String> {
        Err(EngineError::Unsupported("Union"))
    }

    fn overlaps(&self, _a: &str, _b: &str) -> EngineResult<bool> {
        Err(EngineError::Unsupported("Overlaps"))
    }

    fn equals(&self, _a: &str, _b: &str) -> EngineResult<bool> {
        Err(EngineError::Unsupported("Equals"))
    }

    fn covers(&self, _a: &str, _b: &str) -> EngineResult<bool> {
        Err(EngineError::Unsupported("Covers"))
    }

    fn covered_by(&self, _a: &str, _b: &str) -> EngineResult<bool> {
        Err(EngineError::Unsupported("CoveredBy"))
    }

    fn crosses(&self, _a: &str, _b: &str) -> EngineResult<bool> {
        Err(EngineError::Unsupported("Crosses"))
    }

    fn within(&self, _a: &str, _b: &str) -> EngineResult<bool> {
        Err(EngineError::Unsupported("Within"))
    }

    fn contains(&self, _a: &str, _b: &str) -> EngineResult<bool> {
        Err(EngineError::Unsupported("Contains"))
    }

    fn disjoint(&self, _a: &str, _b: &str) -> EngineResult<bool> {
        Err(EngineError::Unsupported("Disjoint"))
    }

    fn touches(&self, _a: &str, _b: &str) -> EngineResult<bool> {
        Err(EngineError::Unsupported("Touches"))
    }

    fn intersects(&self, _a: &str, _b: &str) -> EngineResult<bool> {
        Err(EngineError::Unsupported("Intersects"))
    }

    fn is_ring(&self, _wkt: &str) -> EngineResult<bool> {
        Err(EngineError::Unsupported("IsRing"))
    }

    fn has_z(&self, _wkt: &str) -> EngineResult<bool> {
        Err(EngineError::Unsupported("HasZ"))
    }

    fn is_closed(&self, _wkt: &str) -> EngineResult<bool> {
        Err(EngineError::Unsupported("IsClosed"))
    }

    fn n_geometry(&self, _wkt: &str) -> EngineResult<usize> {
        Err(EngineError::Unsupported("NGeometry"))
    }
}
