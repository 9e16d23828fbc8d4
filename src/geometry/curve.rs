//! Curve segments and their linear approximation
//!
//! Planar algorithms only understand straight segments, so arcs are replaced
//! by line work before anything is computed. Each arc is walked around its
//! circumscribed circle with a fixed number of segments per quarter turn; the
//! three defining points are always kept exactly.

use super::{Coord, Geometry, GeometryCollection, LineString};
use crate::float_types::{FRAC_PI_2, Real, TAU, tolerance};

/// One piece of a [`CompoundCurve`](super::CompoundCurve).
#[derive(Debug, Clone, PartialEq)]
pub enum CurveSegment {
    Line(LineString),
    Arc(super::CircularString),
}

impl CurveSegment {
    pub fn coords(&self) -> &[Coord] {
        match self {
            CurveSegment::Line(ls) => ls.coords(),
            CurveSegment::Arc(cs) => cs.coords(),
        }
    }
}

impl Geometry {
    /// True if any part of this geometry is a circular arc.
    pub fn has_curves(&self) -> bool {
        match self {
            Geometry::CircularString(_) | Geometry::CompoundCurve(_) => true,
            Geometry::GeometryCollection(gc) => gc.geometries().iter().any(Geometry::has_curves),
            _ => false,
        }
    }

    /// Replaces every circular arc by a `LineString` approximation using
    /// `segments_per_quadrant` straight segments per quarter circle.
    /// Geometries without arcs are returned unchanged.
    pub fn linearize(&self, segments_per_quadrant: u32) -> Geometry {
        match self {
            Geometry::CircularString(cs) => {
                let coords = linearize_arcs(cs.coords(), segments_per_quadrant);
                Geometry::LineString(LineString::new(coords))
            },
            Geometry::CompoundCurve(cc) => {
                let mut coords: Vec<Coord> = Vec::new();
                for segment in cc.segments() {
                    let piece = match segment {
                        CurveSegment::Line(ls) => ls.coords().to_vec(),
                        CurveSegment::Arc(cs) => linearize_arcs(cs.coords(), segments_per_quadrant),
                    };
                    // segments share their junction vertex
                    let skip = usize::from(!coords.is_empty() && !piece.is_empty());
                    coords.extend(piece.into_iter().skip(skip));
                }
                Geometry::LineString(LineString::new(coords))
            },
            Geometry::GeometryCollection(gc) if self.has_curves() => {
                Geometry::GeometryCollection(GeometryCollection::new(
                    gc.geometries()
                        .iter()
                        .map(|g| g.linearize(segments_per_quadrant))
                        .collect(),
                ))
            },
            other => other.clone(),
        }
    }
}

/// Linearize consecutive arcs `(p0, p1, p2), (p2, p3, p4), ...`.
pub fn linearize_arcs(coords: &[Coord], segments_per_quadrant: u32) -> Vec<Coord> {
    if coords.len() < 3 {
        return coords.to_vec();
    }
    let mut out: Vec<Coord> = vec![coords[0]];
    for arc in coords.windows(3).step_by(2) {
        let points = arc_points(arc[0], arc[1], arc[2], segments_per_quadrant);
        out.extend(points.into_iter().skip(1));
    }
    out
}

/// Approximates the arc from `start` through `mid` to `end`.
///
/// Collinear control points yield the polyline through them; coincident end
/// points describe a full circle whose diameter runs from `start` to `mid`.
pub fn arc_points(start: Coord, mid: Coord, end: Coord, segments_per_quadrant: u32) -> Vec<Coord> {
    let segments_per_quadrant = segments_per_quadrant.max(1) as Real;
    let full_circle = start.equals_2d(&end);

    let (cx, cy) = if full_circle {
        ((start.x + mid.x) * 0.5, (start.y + mid.y) * 0.5)
    } else {
        let d = 2.0
            * (start.x * (mid.y - end.y) + mid.x * (end.y - start.y) + end.x * (start.y - mid.y));
        if d.abs() <= tolerance() {
            return vec![start, mid, end];
        }
        let s2 = start.x * start.x + start.y * start.y;
        let m2 = mid.x * mid.x + mid.y * mid.y;
        let e2 = end.x * end.x + end.y * end.y;
        (
            (s2 * (mid.y - end.y) + m2 * (end.y - start.y) + e2 * (start.y - mid.y)) / d,
            (s2 * (end.x - mid.x) + m2 * (start.x - end.x) + e2 * (mid.x - start.x)) / d,
        )
    };

    let radius = ((start.x - cx).powi(2) + (start.y - cy).powi(2)).sqrt();
    let a0 = (start.y - cy).atan2(start.x - cx);
    let a2 = (end.y - cy).atan2(end.x - cx);

    let sweep = if full_circle {
        TAU
    } else {
        let cross = (mid.x - start.x) * (end.y - mid.y) - (mid.y - start.y) * (end.x - mid.x);
        let mut sweep = a2 - a0;
        if cross > 0.0 {
            while sweep <= 0.0 {
                sweep += TAU;
            }
        } else {
            while sweep >= 0.0 {
                sweep -= TAU;
            }
        }
        sweep
    };

    let steps = ((sweep.abs() / FRAC_PI_2) * segments_per_quadrant).ceil().max(2.0) as usize;
    let z_at = |t: Real| match (start.z, end.z) {
        (Some(z0), Some(z1)) => Some(z0 + (z1 - z0) * t),
        _ => None,
    };

    let mut points = Vec::with_capacity(steps + 1);
    points.push(start);
    for i in 1..steps {
        let t = i as Real / steps as Real;
        let angle = a0 + sweep * t;
        points.push(Coord {
            x: cx + radius * angle.cos(),
            y: cy + radius * angle.sin(),
            z: z_at(t),
        });
    }
    points.push(end);
    points
}
