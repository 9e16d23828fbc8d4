//! The operation catalog: marshal, delegate, unmarshal
//!
//! Every operation serializes its geometry arguments to exchange-format
//! text, hands them to the configured [`Engine`], and reads geometry results
//! back. Nothing is retried and nothing is substituted: an engine failure
//! becomes [`GeometryError::Engine`] (or [`GeometryError::UnsupportedOperation`]
//! when the engine lacks the operation) and unreadable engine output becomes
//! [`GeometryError::MalformedResult`].

use crate::engine::{Engine, EngineResult, GeoEngine};
use crate::errors::{GeometryError, Result};
use crate::float_types::Real;
use crate::geometry::Geometry;
use crate::traits::GeometryOps;
use crate::wkt::{from_wkt, to_wkt};
use tracing::{debug, trace};

/// [`GeometryOps`] backed by an [`Engine`].
#[derive(Debug, Clone, Default)]
pub struct OperationCatalog<E: Engine = GeoEngine> {
    engine: E,
}

impl OperationCatalog<GeoEngine> {
    pub const fn new() -> Self {
        Self {
            engine: GeoEngine::new(),
        }
    }
}

impl<E: Engine> OperationCatalog<E> {
    pub const fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    pub const fn engine(&self) -> &E {
        &self.engine
    }

    fn dispatch<T>(
        &self,
        operation: &'static str,
        payload: usize,
        call: impl FnOnce(&E) -> EngineResult<T>,
    ) -> Result<T> {
        trace!(operation, payload, "dispatching to engine");
        call(&self.engine).map_err(|error| {
            debug!(operation, %error, "engine reported failure");
            GeometryError::from(error)
        })
    }

    fn dispatch_geometry(
        &self,
        operation: &'static str,
        payload: usize,
        call: impl FnOnce(&E) -> EngineResult<String>,
    ) -> Result<Geometry> {
        let text = self.dispatch(operation, payload, call)?;
        from_wkt(&text).map_err(|source| {
            debug!(operation, %source, wkt = %text, "engine result is not readable");
            GeometryError::MalformedResult {
                operation,
                wkt: text,
                source,
            }
        })
    }

    fn unary<T>(
        &self,
        operation: &'static str,
        g: &Geometry,
        call: impl FnOnce(&E, &str) -> EngineResult<T>,
    ) -> Result<T> {
        let text = to_wkt(g);
        self.dispatch(operation, text.len(), |engine| call(engine, &text))
    }

    fn binary<T>(
        &self,
        operation: &'static str,
        a: &Geometry,
        b: &Geometry,
        call: impl FnOnce(&E, &str, &str) -> EngineResult<T>,
    ) -> Result<T> {
        let (a, b) = (to_wkt(a), to_wkt(b));
        self.dispatch(operation, a.len() + b.len(), |engine| call(engine, &a, &b))
    }

    fn unary_geometry(
        &self,
        operation: &'static str,
        g: &Geometry,
        call: impl FnOnce(&E, &str) -> EngineResult<String>,
    ) -> Result<Geometry> {
        let text = to_wkt(g);
        self.dispatch_geometry(operation, text.len(), |engine| call(engine, &text))
    }

    fn binary_geometry(
        &self,
        operation: &'static str,
        a: &Geometry,
        b: &Geometry,
        call: impl FnOnce(&E, &str, &str) -> EngineResult<String>,
    ) -> Result<Geometry> {
        let (a, b) = (to_wkt(a), to_wkt(b));
        self.dispatch_geometry(operation, a.len() + b.len(), |engine| call(engine, &a, &b))
    }
}

impl<E: Engine> GeometryOps for OperationCatalog<E> {
    fn area(&self, g: &Geometry) -> Result<Real> {
        self.unary("Area", g, E::area)
    }

    fn boundary(&self, g: &Geometry) -> Result<Geometry> {
        self.unary_geometry("Boundary", g, E::boundary)
    }

    fn centroid(&self, g: &Geometry) -> Result<Geometry> {
        self.unary_geometry("Centroid", g, E::centroid)
    }

    fn is_simple(&self, g: &Geometry) -> Result<bool> {
        self.unary("IsSimple", g, E::is_simple)
    }

    fn length(&self, g: &Geometry) -> Result<Real> {
        self.unary("Length", g, E::length)
    }

    fn distance(&self, a: &Geometry, b: &Geometry) -> Result<Real> {
        self.binary("Distance", a, b, E::distance)
    }

    fn hausdorff_distance(&self, a: &Geometry, b: &Geometry) -> Result<Real> {
        self.binary("HausdorffDistance", a, b, E::hausdorff_distance)
    }

    fn hausdorff_distance_densify(
        &self,
        a: &Geometry,
        b: &Geometry,
        densify_fraction: Real,
    ) -> Result<Real> {
        self.binary("HausdorffDistanceDensify", a, b, |engine, a, b| {
            engine.hausdorff_distance_densify(a, b, densify_fraction)
        })
    }

    fn is_empty(&self, g: &Geometry) -> Result<bool> {
        self.unary("IsEmpty", g, E::is_empty)
    }

    fn envelope(&self, g: &Geometry) -> Result<Geometry> {
        self.unary_geometry("Envelope", g, E::envelope)
    }

    fn convex_hull(&self, g: &Geometry) -> Result<Geometry> {
        self.unary_geometry("ConvexHull", g, E::convex_hull)
    }

    fn unary_union(&self, g: &Geometry) -> Result<Geometry> {
        self.unary_geometry("UnaryUnion", g, E::unary_union)
    }

    fn point_on_surface(&self, g: &Geometry) -> Result<Geometry> {
        self.unary_geometry("PointOnSurface", g, E::point_on_surface)
    }

    fn line_merge(&self, g: &Geometry) -> Result<Geometry> {
        self.unary_geometry("LineMerge", g, E::line_merge)
    }

    fn simplify(&self, g: &Geometry, tolerance: Real) -> Result<Geometry> {
        self.unary_geometry("Simplify", g, |engine, text| engine.simplify(text, tolerance))
    }

    fn simplify_preserve_topology(&self, g: &Geometry, tolerance: Real) -> Result<Geometry> {
        self.unary_geometry("SimplifyP", g, |engine, text| {
            engine.simplify_preserve_topology(text, tolerance)
        })
    }

    fn buffer(&self, g: &Geometry, width: Real, quadrant_segments: i32) -> Result<Geometry> {
        self.unary_geometry("Buffer", g, |engine, text| {
            engine.buffer(text, width, quadrant_segments)
        })
    }

    fn equals_exact(&self, a: &Geometry, b: &Geometry, tolerance: Real) -> Result<bool> {
        self.binary("EqualsExact", a, b, |engine, a, b| engine.equals_exact(a, b, tolerance))
    }

    fn relate(&self, a: &Geometry, b: &Geometry) -> Result<String> {
        self.binary("Relate", a, b, E::relate)
    }

    fn unique_points(&self, g: &Geometry) -> Result<Geometry> {
        self.unary_geometry("UniquePoints", g, E::unique_points)
    }

    fn shared_paths(&self, a: &Geometry, b: &Geometry) -> Result<String> {
        self.binary("SharedPaths", a, b, E::shared_paths)
    }

    fn snap(&self, input: &Geometry, reference: &Geometry, tolerance: Real) -> Result<Geometry> {
        self.binary_geometry("Snap", input, reference, |engine, a, b| engine.snap(a, b, tolerance))
    }

    fn intersection(&self, a: &Geometry, b: &Geometry) -> Result<Geometry> {
        self.binary_geometry("Intersection", a, b, E::intersection)
    }

    fn difference(&self, a: &Geometry, b: &Geometry) -> Result<Geometry> {
        self.binary_geometry("Difference", a, b, E::difference)
    }

    fn sym_difference(&self, a: &Geometry, b: &Geometry) -> Result<Geometry> {
        self.binary_geometry("SymDifference", a, b, E::sym_difference)
    }

    fn union(&self, a: &Geometry, b: &Geometry) -> Result<Geometry> {
        self.binary_geometry("Union", a, b, E::union)
    }

    fn overlaps(&self, a: &Geometry, b: &Geometry) -> Result<bool> {
        self.binary("Overlaps", a, b, E::overlaps)
    }

    fn equals(&self, a: &Geometry, b: &Geometry) -> Result<bool> {
        self.binary("Equals", a, b, E::equals)
    }

    fn covers(&self, a: &Geometry, b: &Geometry) -> Result<bool> {
        self.binary("Covers", a, b, E::covers)
    }

    fn covered_by(&self, a: &Geometry, b: &Geometry) -> Result<bool> {
        self.binary("CoveredBy", a, b, E::covered_by)
    }

    fn crosses(&self, a: &Geometry, b: &Geometry) -> Result<bool> {
        self.binary("Crosses", a, b, E::crosses)
    }

    fn within(&self, a: &Geometry, b: &Geometry) -> Result<bool> {
        self.binary("Within", a, b, E::within)
    }

    fn contains(&self, a: &Geometry, b: &Geometry) -> Result<bool> {
        self.binary("Contains", a, b, E::contains)
    }

    fn disjoint(&self, a: &Geometry, b: &Geometry) -> Result<bool> {
        self.binary("Disjoint", a, b, E::disjoint)
    }

    fn touches(&self, a: &Geometry, b: &Geometry) -> Result<bool> {
        self.binary("Touches", a, b, E::touches)
    }

    fn intersects(&self, a: &Geometry, b: &Geometry) -> Result<bool> {
        self.binary("Intersects", a, b, E::intersects)
    }

    fn is_ring(&self, g: &Geometry) -> Result<bool> {
        self.unary("IsRing", g, E::is_ring)
    }

    fn has_z(&self, g: &Geometry) -> Result<bool> {
        self.unary("HasZ", g, E::has_z)
    }

    fn is_closed(&self, g: &Geometry) -> Result<bool> {
        self.unary("IsClosed", g, E::is_closed)
    }

    fn n_geometry(&self, g: &Geometry) -> Result<usize> {
        self.unary("NGeometry", g, E::n_geometry)
    }
}
