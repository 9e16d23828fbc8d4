//! Structural predicates evaluated on the geometry model itself.

use crate::float_types::Real;
use crate::geometry::{Coord, CurveSegment, Geometry, LineString, Point, Polygon};

/// Closure of a lineal geometry; other kinds have no notion of closure.
pub fn is_closed(geometry: &Geometry) -> Result<bool, String> {
    let endpoints_meet = |coords: &[Coord]| match (coords.first(), coords.last()) {
        (Some(first), Some(last)) => first.equals_2d(last),
        _ => false,
    };
    match geometry {
        Geometry::LineString(ls) => Ok(ls.is_closed()),
        Geometry::MultiLineString(mls) => Ok(mls.is_closed()),
        Geometry::CircularString(cs) => Ok(endpoints_meet(cs.coords())),
        Geometry::CompoundCurve(cc) => {
            let first = cc.segments().first().and_then(|s| s.coords().first());
            let last = cc.segments().last().and_then(|s| s.coords().last());
            Ok(matches!((first, last), (Some(f), Some(l)) if f.equals_2d(l)))
        },
        other => Err(format!(
            "Argument is not a LineString or MultiLineString but a {}",
            other.kind()
        )),
    }
}

fn close(a: &Coord, b: &Coord, tolerance: Real) -> bool {
    (a.x - b.x).hypot(a.y - b.y) <= tolerance
}

fn coords_equal(a: &[Coord], b: &[Coord], tolerance: Real) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(p, q)| close(p, q, tolerance))
}

fn points_equal(a: &Point, b: &Point, tolerance: Real) -> bool {
    match (a.coord(), b.coord()) {
        (Some(p), Some(q)) => close(&p, &q, tolerance),
        (None, None) => true,
        _ => false,
    }
}

fn lines_equal(a: &LineString, b: &LineString, tolerance: Real) -> bool {
    coords_equal(a.coords(), b.coords(), tolerance)
}

fn polygons_equal(a: &Polygon, b: &Polygon, tolerance: Real) -> bool {
    a.interiors().len() == b.interiors().len()
        && a.rings().zip(b.rings()).all(|(r, s)| lines_equal(r, s, tolerance))
}

fn all_pairs<T>(a: &[T], b: &[T], eq: impl Fn(&T, &T) -> bool) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| eq(x, y))
}

/// Same kind, same structure, and every pair of vertices in storage order
/// within `tolerance` of each other in the plane.
pub fn equals_exact(a: &Geometry, b: &Geometry, tolerance: Real) -> bool {
    match (a, b) {
        (Geometry::Point(p), Geometry::Point(q)) => points_equal(p, q, tolerance),
        (Geometry::LineString(p), Geometry::LineString(q)) => lines_equal(p, q, tolerance),
        (Geometry::Polygon(p), Geometry::Polygon(q)) => polygons_equal(p, q, tolerance),
        (Geometry::MultiPoint(p), Geometry::MultiPoint(q)) => {
            all_pairs(p.points(), q.points(), |x, y| points_equal(x, y, tolerance))
        },
        (Geometry::MultiLineString(p), Geometry::MultiLineString(q)) => {
            all_pairs(p.line_strings(), q.line_strings(), |x, y| lines_equal(x, y, tolerance))
        },
        (Geometry::MultiPolygon(p), Geometry::MultiPolygon(q)) => {
            all_pairs(p.polygons(), q.polygons(), |x, y| polygons_equal(x, y, tolerance))
        },
        (Geometry::GeometryCollection(p), Geometry::GeometryCollection(q)) => {
            all_pairs(p.geometries(), q.geometries(), |x, y| equals_exact(x, y, tolerance))
        },
        (Geometry::CircularString(p), Geometry::CircularString(q)) => {
            coords_equal(p.coords(), q.coords(), tolerance)
        },
        (Geometry::CompoundCurve(p), Geometry::CompoundCurve(q)) => {
            all_pairs(p.segments(), q.segments(), |x, y| match (x, y) {
                (CurveSegment::Line(l), CurveSegment::Line(m)) => lines_equal(l, m, tolerance),
                (CurveSegment::Arc(l), CurveSegment::Arc(m)) => {
                    coords_equal(l.coords(), m.coords(), tolerance)
                },
                _ => false,
            })
        },
        _ => false,
    }
}
