//! Scalar measures: area, length, distance and Hausdorff distance.

use crate::engine::convert::GeoGeometry;
use crate::float_types::Real;
use geo::{Area, Intersects, Line, Point};

/// Isolated points and segments of a planar geometry. Polygon rings count
/// as segments; interiors are handled by the callers through `Intersects`.
pub fn decompose(geometry: &GeoGeometry) -> (Vec<Point<Real>>, Vec<Line<Real>>) {
    fn walk(g: &GeoGeometry, points: &mut Vec<Point<Real>>, lines: &mut Vec<Line<Real>>) {
        match g {
            geo::Geometry::Point(p) => points.push(*p),
            geo::Geometry::MultiPoint(mp) => points.extend(mp.iter().copied()),
            geo::Geometry::Line(l) => lines.push(*l),
            geo::Geometry::LineString(ls) => push_line_string(ls, points, lines),
            geo::Geometry::MultiLineString(mls) => {
                mls.iter().for_each(|ls| push_line_string(ls, points, lines))
            },
            geo::Geometry::Polygon(poly) => {
                std::iter::once(poly.exterior())
                    .chain(poly.interiors())
                    .for_each(|ls| push_line_string(ls, points, lines));
            },
            geo::Geometry::MultiPolygon(mp) => mp
                .iter()
                .for_each(|poly| walk(&geo::Geometry::Polygon(poly.clone()), points, lines)),
            geo::Geometry::GeometryCollection(gc) => gc.iter().for_each(|m| walk(m, points, lines)),
            geo::Geometry::Rect(r) => walk(&geo::Geometry::Polygon(r.to_polygon()), points, lines),
            geo::Geometry::Triangle(t) => {
                walk(&geo::Geometry::Polygon(t.to_polygon()), points, lines)
            },
        }
    }

    fn push_line_string(
        ls: &geo::LineString<Real>,
        points: &mut Vec<Point<Real>>,
        lines: &mut Vec<Line<Real>>,
    ) {
        match ls.0.len() {
            0 => {},
            1 => points.push(Point::from(ls.0[0])),
            _ => lines.extend(ls.lines()),
        }
    }

    let mut points = Vec::new();
    let mut lines = Vec::new();
    walk(geometry, &mut points, &mut lines);
    (points, lines)
}

pub fn area(geometry: &GeoGeometry) -> Real {
    geometry.unsigned_area()
}

/// Length of the lineal parts. Polygon rings do not count.
#[allow(deprecated)]
pub fn length(geometry: &GeoGeometry) -> Real {
    use geo::EuclideanLength;
    match geometry {
        geo::Geometry::Line(l) => l.euclidean_length(),
        geo::Geometry::LineString(ls) => ls.euclidean_length(),
        geo::Geometry::MultiLineString(mls) => mls.euclidean_length(),
        geo::Geometry::GeometryCollection(gc) => gc.iter().map(length).sum(),
        _ => 0.0,
    }
}

fn is_empty(geometry: &GeoGeometry) -> bool {
    let (points, lines) = decompose(geometry);
    points.is_empty() && lines.is_empty()
}

/// Minimum planar distance, 0 when either side is empty or they meet.
#[allow(deprecated)]
pub fn distance(a: &GeoGeometry, b: &GeoGeometry) -> Real {
    use geo::EuclideanDistance;
    if is_empty(a) || is_empty(b) || a.intersects(b) {
        return 0.0;
    }
    let (a_points, a_lines) = decompose(a);
    let (b_points, b_lines) = decompose(b);

    let mut best = Real::INFINITY;
    for p in &a_points {
        best = b_points.iter().map(|q| p.euclidean_distance(q)).fold(best, Real::min);
        best = b_lines.iter().map(|l| p.euclidean_distance(l)).fold(best, Real::min);
    }
    for l in &a_lines {
        best = b_points.iter().map(|q| q.euclidean_distance(l)).fold(best, Real::min);
        best = b_lines.iter().map(|m| l.euclidean_distance(m)).fold(best, Real::min);
    }
    best
}

type Parts = (Vec<Point<Real>>, Vec<Line<Real>>);

/// Nearest distance from `p` to any point or segment of `to`.
#[allow(deprecated)]
fn distance_to(p: &Point<Real>, to: &Parts) -> Real {
    use geo::EuclideanDistance;
    let to_points = to.0.iter().map(|q| p.euclidean_distance(q));
    let to_lines = to.1.iter().map(|l| p.euclidean_distance(l));
    to_points.chain(to_lines).fold(Real::INFINITY, Real::min)
}

/// Largest distance from a sample point to the other geometry as a whole.
fn oriented(samples: impl Iterator<Item = Point<Real>>, to: &Parts) -> Real {
    samples.map(|p| distance_to(&p, to)).fold(0.0, Real::max)
}

fn vertices(parts: &Parts) -> impl Iterator<Item = Point<Real>> + '_ {
    parts
        .0
        .iter()
        .copied()
        .chain(parts.1.iter().flat_map(|l| [l.start_point(), l.end_point()]))
}

/// Discrete Hausdorff distance: every vertex of one side is measured against
/// the segments and points of the other.
pub fn hausdorff(a: &GeoGeometry, b: &GeoGeometry) -> Real {
    if is_empty(a) || is_empty(b) {
        return 0.0;
    }
    let (a, b) = (decompose(a), decompose(b));
    oriented(vertices(&a), &b).max(oriented(vertices(&b), &a))
}

/// Number of equal pieces each segment is split into for `fraction`.
pub fn densify_pieces(fraction: Real) -> Result<u32, String> {
    let pieces = (1.0 / fraction).round().max(1.0);
    if pieces > Real::from(u32::MAX) {
        return Err(format!("Densify fraction {fraction} asks for too many segment pieces"));
    }
    Ok(pieces as u32)
}

/// Endpoints of every segment plus `pieces - 1` evenly spaced points inside it.
pub fn densified(lines: &[Line<Real>], pieces: u32) -> impl Iterator<Item = Point<Real>> + '_ {
    lines.iter().flat_map(move |line| {
        let delta = line.delta();
        (0..=pieces).map(move |i| {
            let t = Real::from(i) / Real::from(pieces);
            Point::from(line.start + delta * t)
        })
    })
}

fn samples(parts: &Parts, pieces: u32) -> impl Iterator<Item = Point<Real>> + '_ {
    parts.0.iter().copied().chain(densified(&parts.1, pieces))
}

/// Discrete Hausdorff distance over vertices and densified segment points.
pub fn hausdorff_densify(
    a: &GeoGeometry,
    b: &GeoGeometry,
    fraction: Real,
) -> Result<Real, String> {
    let pieces = densify_pieces(fraction)?;
    if is_empty(a) || is_empty(b) {
        return Ok(0.0);
    }
    let (a, b) = (decompose(a), decompose(b));
    Ok(oriented(samples(&a, pieces), &b).max(oriented(samples(&b, pieces), &a)))
}
