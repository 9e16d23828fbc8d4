use crate::engine::convert::{GeoGeometry, from_geo, to_geo};
use crate::engine::relate::Predicate;
use crate::engine::{Engine, EngineResult, construct, linework, measure, overlay, relate, structure};
use crate::errors::EngineError;
use crate::float_types::{DEFAULT_CURVE_SEGMENTS, Real};
use crate::geometry::{Geometry, GeometryCollection, MultiLineString};
use crate::wkt::{from_wkt, to_wkt};
use geo::Intersects;

/// Engine computing every operation in-process with `geo`.
///
/// Curves are replaced by line work before any planar computation, with
/// `curve_segments` pieces per quarter circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoEngine {
    curve_segments: u32,
}

impl Default for GeoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoEngine {
    pub const fn new() -> Self {
        Self {
            curve_segments: DEFAULT_CURVE_SEGMENTS,
        }
    }

    /// Density used when linearizing arcs; at least one piece per quadrant.
    pub const fn with_curve_segments(mut self, segments_per_quadrant: u32) -> Self {
        self.curve_segments = if segments_per_quadrant == 0 {
            1
        } else {
            segments_per_quadrant
        };
        self
    }

    pub const fn curve_segments(&self) -> u32 {
        self.curve_segments
    }

    fn read(&self, operation: &'static str, wkt: &str) -> EngineResult<Geometry> {
        from_wkt(wkt).map_err(|e| EngineError::failed(operation, format!("ParseException: {e}")))
    }

    fn planar(&self, geometry: &Geometry) -> GeoGeometry {
        if geometry.has_curves() {
            to_geo(&geometry.linearize(self.curve_segments))
        } else {
            to_geo(geometry)
        }
    }

    fn read_planar(&self, operation: &'static str, wkt: &str) -> EngineResult<GeoGeometry> {
        Ok(self.planar(&self.read(operation, wkt)?))
    }

    fn read_pair(
        &self,
        operation: &'static str,
        a: &str,
        b: &str,
    ) -> EngineResult<(GeoGeometry, GeoGeometry)> {
        Ok((self.read_planar(operation, a)?, self.read_planar(operation, b)?))
    }

    fn write(geometry: &GeoGeometry) -> String {
        to_wkt(&from_geo(geometry))
    }

    fn predicate(
        &self,
        operation: &'static str,
        predicate: Predicate,
        a: &str,
        b: &str,
    ) -> EngineResult<bool> {
        let (a, b) = (self.read(operation, a)?, self.read(operation, b)?);
        let matrix = relate::matrix(&self.planar(&a), &self.planar(&b));
        Ok(predicate.holds(&matrix, a.dimension(), b.dimension()))
    }
}

impl Engine for GeoEngine {
    fn area(&self, wkt: &str) -> EngineResult<Real> {
        Ok(measure::area(&self.read_planar("Area", wkt)?))
    }

    fn boundary(&self, wkt: &str) -> EngineResult<String> {
        let g = self.read_planar("Boundary", wkt)?;
        construct::boundary(&g)
            .map(|b| Self::write(&b))
            .map_err(|message| EngineError::failed("Boundary", message))
    }

    fn centroid(&self, wkt: &str) -> EngineResult<String> {
        Ok(Self::write(&construct::centroid(&self.read_planar("Centroid", wkt)?)))
    }

    fn is_simple(&self, wkt: &str) -> EngineResult<bool> {
        Ok(relate::is_simple(&self.read_planar("IsSimple", wkt)?))
    }

    fn length(&self, wkt: &str) -> EngineResult<Real> {
        Ok(measure::length(&self.read_planar("Length", wkt)?))
    }

    fn distance(&self, a: &str, b: &str) -> EngineResult<Real> {
        let (a, b) = self.read_pair("Distance", a, b)?;
        Ok(measure::distance(&a, &b))
    }

    fn hausdorff_distance(&self, a: &str, b: &str) -> EngineResult<Real> {
        let (a, b) = self.read_pair("HausdorffDistance", a, b)?;
        Ok(measure::hausdorff(&a, &b))
    }

    fn hausdorff_distance_densify(
        &self,
        a: &str,
        b: &str,
        densify_fraction: Real,
    ) -> EngineResult<Real> {
        if !(densify_fraction > 0.0 && densify_fraction <= 1.0) {
            return Err(EngineError::failed(
                "HausdorffDistanceDensify",
                format!("Fraction is not in range (0.0 - 1.0]: {densify_fraction}"),
            ));
        }
        let (a, b) = self.read_pair("HausdorffDistanceDensify", a, b)?;
        measure::hausdorff_densify(&a, &b, densify_fraction)
            .map_err(|message| EngineError::failed("HausdorffDistanceDensify", message))
    }

    fn is_empty(&self, wkt: &str) -> EngineResult<bool> {
        Ok(self.read("IsEmpty", wkt)?.is_empty())
    }

    fn envelope(&self, wkt: &str) -> EngineResult<String> {
        Ok(Self::write(&construct::envelope(&self.read_planar("Envelope", wkt)?)))
    }

    fn convex_hull(&self, wkt: &str) -> EngineResult<String> {
        Ok(Self::write(&construct::convex_hull(&self.read_planar("ConvexHull", wkt)?)))
    }

    fn unary_union(&self, wkt: &str) -> EngineResult<String> {
        Ok(Self::write(&overlay::unary_union(&self.read_planar("UnaryUnion", wkt)?)))
    }

    fn point_on_surface(&self, wkt: &str) -> EngineResult<String> {
        Ok(Self::write(&construct::point_on_surface(
            &self.read_planar("PointOnSurface", wkt)?,
        )))
    }

    fn line_merge(&self, wkt: &str) -> EngineResult<String> {
        let g = self.read_planar("LineMerge", wkt)?;
        Ok(match linework::lineal(&g) {
            Some(lines) => {
                let merged = linework::merge(&lines);
                if merged.0.len() == 1 {
                    Self::write(&geo::Geometry::LineString(merged.0[0].clone()))
                } else {
                    Self::write(&geo::Geometry::MultiLineString(merged))
                }
            },
            None => to_wkt(&Geometry::empty_collection()),
        })
    }

    fn simplify(&self, wkt: &str, tolerance: Real) -> EngineResult<String> {
        Ok(Self::write(&construct::simplify(&self.read_planar("Simplify", wkt)?, tolerance)))
    }

    fn simplify_preserve_topology(&self, wkt: &str, tolerance: Real) -> EngineResult<String> {
        Ok(Self::write(&construct::simplify_preserve_topology(
            &self.read_planar("SimplifyP", wkt)?,
            tolerance,
        )))
    }

    #[cfg(feature = "offset")]
    fn buffer(&self, wkt: &str, width: Real, quadrant_segments: i32) -> EngineResult<String> {
        let g = self.read_planar("Buffer", wkt)?;
        crate::engine::buffer::buffer(&g, width, quadrant_segments)
            .map(|region| Self::write(&region))
            .map_err(|message| EngineError::failed("Buffer", message))
    }

    fn equals_exact(&self, a: &str, b: &str, tolerance: Real) -> EngineResult<bool> {
        let (a, b) = (self.read("EqualsExact", a)?, self.read("EqualsExact", b)?);
        Ok(structure::equals_exact(&a, &b, tolerance))
    }

    fn relate(&self, a: &str, b: &str) -> EngineResult<String> {
        let (a, b) = self.read_pair("Relate", a, b)?;
        Ok(relate::matrix(&a, &b))
    }

    fn unique_points(&self, wkt: &str) -> EngineResult<String> {
        let g = self.read("UniquePoints", wkt)?;
        Ok(to_wkt(&linework::unique_points(&g).into()))
    }

    fn shared_paths(&self, a: &str, b: &str) -> EngineResult<String> {
        let (ga, gb) = self.read_pair("SharedPaths", a, b)?;
        let not_lineal = || EngineError::failed("SharedPaths", "Geometry is not lineal");
        let la = linework::lineal(&ga).ok_or_else(not_lineal)?;
        let lb = linework::lineal(&gb).ok_or_else(not_lineal)?;
        let (forward, backward) = linework::shared_paths(&la, &lb);
        let as_model = |mls: &geo::MultiLineString<Real>| -> Geometry {
            MultiLineString::new(
                mls.iter()
                    .map(crate::engine::convert::from_geo_line_string)
                    .collect(),
            )
            .into()
        };
        let pair = GeometryCollection::new(vec![as_model(&forward), as_model(&backward)]);
        Ok(to_wkt(&pair.into()))
    }

    fn snap(&self, input: &str, reference: &str, tolerance: Real) -> EngineResult<String> {
        let input = self.read("Snap", input)?;
        let reference = self.read("Snap", reference)?;
        Ok(to_wkt(&linework::snap(&input, &reference, tolerance)))
    }

    fn intersection(&self, a: &str, b: &str) -> EngineResult<String> {
        let (a, b) = self.read_pair("Intersection", a, b)?;
        Ok(Self::write(&overlay::intersection(&a, &b)))
    }

    fn difference(&self, a: &str, b: &str) -> EngineResult<String> {
        let (a, b) = self.read_pair("Difference", a, b)?;
        Ok(Self::write(&overlay::difference(&a, &b)))
    }

    fn sym_difference(&self, a: &str, b: &str) -> EngineResult<String> {
        let (a, b) = self.read_pair("SymDifference", a, b)?;
        Ok(Self::write(&overlay::sym_difference(&a, &b)))
    }

    fn union(&self, a: &str, b: &str) -> EngineResult<String> {
        let (a, b) = self.read_pair("Union", a, b)?;
        Ok(Self::write(&overlay::union(&a, &b)))
    }

    fn overlaps(&self, a: &str, b: &str) -> EngineResult<bool> {
        self.predicate("Overlaps", Predicate::Overlaps, a, b)
    }

    fn equals(&self, a: &str, b: &str) -> EngineResult<bool> {
        self.predicate("Equals", Predicate::Equals, a, b)
    }

    fn covers(&self, a: &str, b: &str) -> EngineResult<bool> {
        self.predicate("Covers", Predicate::Covers, a, b)
    }

    fn covered_by(&self, a: &str, b: &str) -> EngineResult<bool> {
        self.predicate("CoveredBy", Predicate::CoveredBy, a, b)
    }

    fn crosses(&self, a: &str, b: &str) -> EngineResult<bool> {
        self.predicate("Crosses", Predicate::Crosses, a, b)
    }

    fn within(&self, a: &str, b: &str) -> EngineResult<bool> {
        self.predicate("Within", Predicate::Within, a, b)
    }

    fn contains(&self, a: &str, b: &str) -> EngineResult<bool> {
        self.predicate("Contains", Predicate::Contains, a, b)
    }

    fn disjoint(&self, a: &str, b: &str) -> EngineResult<bool> {
        let (a, b) = self.read_pair("Disjoint", a, b)?;
        Ok(!a.intersects(&b))
    }

    fn touches(&self, a: &str, b: &str) -> EngineResult<bool> {
        self.predicate("Touches", Predicate::Touches, a, b)
    }

    fn intersects(&self, a: &str, b: &str) -> EngineResult<bool> {
        let (a, b) = self.read_pair("Intersects", a, b)?;
        Ok(a.intersects(&b))
    }

    fn is_ring(&self, wkt: &str) -> EngineResult<bool> {
        Ok(relate::is_ring(&self.read_planar("IsRing", wkt)?))
    }

    fn has_z(&self, wkt: &str) -> EngineResult<bool> {
        Ok(self.read("HasZ", wkt)?.has_z())
    }

    fn is_closed(&self, wkt: &str) -> EngineResult<bool> {
        structure::is_closed(&self.read("IsClosed", wkt)?)
            .map_err(|message| EngineError::failed("IsClosed", message))
    }

    fn n_geometry(&self, wkt: &str) -> EngineResult<usize> {
        Ok(self.read("NGeometry", wkt)?.num_geometries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "POLYGON ((0 0, 4 0, 4 4, 0 4, 0 0))";

    #[test]
    fn unreadable_input_is_an_engine_failure() {
        let err = GeoEngine::new().area("POLYGON ((0 0, 1 1)").unwrap_err();
        let EngineError::Failed { operation, message } = err else {
            panic!("expected an engine failure");
        };
        assert_eq!(operation, "Area");
        assert!(message.starts_with("ParseException"));
    }

    #[test]
    fn arcs_are_linearized() {
        let engine = GeoEngine::new().with_curve_segments(64);
        let length = engine.length("CIRCULARSTRING (-1 0, 0 1, 1 0)").unwrap();
        assert!((length - crate::float_types::PI).abs() < 1e-3);
        assert_eq!(engine.is_closed("CIRCULARSTRING (-1 0, 0 1, 1 0)"), Ok(false));
    }

    #[test]
    fn predicates_on_point_and_square() {
        let engine = GeoEngine::new();
        assert_eq!(engine.within("POINT (1 1)", SQUARE), Ok(true));
        assert_eq!(engine.within("POINT (5 5)", SQUARE), Ok(false));
        assert_eq!(engine.contains(SQUARE, "POINT (1 1)"), Ok(true));
        assert_eq!(engine.touches("POINT (0 2)", SQUARE), Ok(true));
        assert_eq!(engine.disjoint("POINT (5 5)", SQUARE), Ok(true));
        assert_eq!(engine.covers(SQUARE, "POINT (0 2)"), Ok(true));
    }

    #[test]
    fn densify_fraction_is_checked() {
        let engine = GeoEngine::new();
        assert!(engine.hausdorff_distance_densify("POINT (0 0)", "POINT (1 1)", 0.0).is_err());
        assert!(engine.hausdorff_distance_densify("POINT (0 0)", "POINT (1 1)", 1.5).is_err());
        let err = engine
            .hausdorff_distance_densify("LINESTRING (0 0, 10 0)", "LINESTRING (0 1, 10 1)", 1e-15)
            .unwrap_err();
        assert!(matches!(err, EngineError::Failed { operation: "HausdorffDistanceDensify", .. }));
    }

    #[test]
    fn shared_paths_are_split_by_direction() {
        let engine = GeoEngine::new();
        let out = engine
            .shared_paths("LINESTRING (0 0, 10 0)", "MULTILINESTRING ((2 0, 4 0), (8 0, 6 0))")
            .unwrap();
        assert_eq!(
            out,
            "GEOMETRYCOLLECTION (MULTILINESTRING ((2 0, 4 0)), MULTILINESTRING ((6 0, 8 0)))"
        );
        assert!(engine.shared_paths("POINT (0 0)", "LINESTRING (0 0, 1 1)").is_err());
    }

    #[test]
    fn line_merge_sews_pieces() {
        let engine = GeoEngine::new();
        assert_eq!(
            engine.line_merge("MULTILINESTRING ((0 0, 1 0), (1 0, 2 0))"),
            Ok("LINESTRING (0 0, 1 0, 2 0)".to_string())
        );
        assert_eq!(engine.line_merge("POINT (1 1)"), Ok("GEOMETRYCOLLECTION EMPTY".to_string()));
    }

    #[test]
    fn snap_moves_close_vertices() {
        let engine = GeoEngine::new();
        assert_eq!(
            engine.snap("LINESTRING (0 0, 10.05 0)", "POINT (10 0)", 0.1),
            Ok("LINESTRING (0 0, 10 0)".to_string())
        );
        assert_eq!(
            engine.snap("LINESTRING (0 0, 10 0)", "POINT (5 0.05)", 0.1),
            Ok("LINESTRING (0 0, 5 0.05, 10 0)".to_string())
        );
        assert_eq!(
            engine.snap("LINESTRING (0 0, 10 0)", "POINT (50 50)", 0.1),
            Ok("LINESTRING (0 0, 10 0)".to_string())
        );
    }

    #[test]
    fn unique_points_keep_first_occurrence() {
        let engine = GeoEngine::new();
        assert_eq!(
            engine.unique_points("POLYGON ((0 0, 1 0, 1 1, 0 0))"),
            Ok("MULTIPOINT ((0 0), (1 0), (1 1))".to_string())
        );
    }
}
