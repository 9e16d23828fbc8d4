//! Line work built from `geo` segment primitives: collinear overlaps,
//! crossings, line merging, shared paths, snapping and vertex extraction.

use crate::float_types::{Real, tolerance};
use crate::geometry::{
    CircularString, CompoundCurve, Coord, CurveSegment, Geometry, GeometryCollection, LineString,
    MultiPoint, Point, Polygon,
};
use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::{Line, MultiLineString};
use hashbrown::{HashMap, HashSet};

type GeoCoord = geo::Coord<Real>;

/// Hashable identity of a planar position (`-0.0` and `0.0` coincide).
#[inline]
pub fn key(c: GeoCoord) -> (u64, u64) {
    ((c.x + 0.0).to_bits(), (c.y + 0.0).to_bits())
}

#[inline]
fn model_key(c: &Coord) -> (u64, u64) {
    key(geo::coord! { x: c.x, y: c.y })
}

#[inline]
fn dot(a: GeoCoord, b: GeoCoord) -> Real {
    a.x * b.x + a.y * b.y
}

#[inline]
fn distance(a: GeoCoord, b: GeoCoord) -> Real {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Position of `p` along `line`, 0 at the start and 1 at the end.
#[inline]
fn parameter(line: &Line<Real>, p: GeoCoord) -> Real {
    let d = line.delta();
    let len2 = dot(d, d);
    if len2 == 0.0 {
        return 0.0;
    }
    dot(p - line.start, d) / len2
}

#[inline]
fn at(line: &Line<Real>, t: Real) -> GeoCoord {
    line.start + line.delta() * t
}

/// Non-degenerate segments of every line string.
pub fn segments(lines: &MultiLineString<Real>) -> Vec<Line<Real>> {
    lines
        .iter()
        .flat_map(|ls| ls.lines())
        .filter(|l| l.start != l.end)
        .collect()
}

/// Joins pieces whose end meets the next piece's start into line strings.
pub fn chain(pieces: Vec<Line<Real>>) -> MultiLineString<Real> {
    let mut out: Vec<geo::LineString<Real>> = Vec::new();
    let mut current: Vec<GeoCoord> = Vec::new();
    for piece in pieces {
        match current.last() {
            Some(last) if *last == piece.start => current.push(piece.end),
            _ => {
                if current.len() >= 2 {
                    out.push(geo::LineString::new(std::mem::take(&mut current)));
                }
                current = vec![piece.start, piece.end];
            },
        }
    }
    if current.len() >= 2 {
        out.push(geo::LineString::new(current));
    }
    MultiLineString::new(out)
}

/// Parameter intervals of `segment` that lie on any of `others`.
fn covered_intervals(segment: &Line<Real>, others: &[Line<Real>]) -> Vec<(Real, Real)> {
    let mut intervals: Vec<(Real, Real)> = others
        .iter()
        .filter_map(|other| match line_intersection(*segment, *other) {
            Some(LineIntersection::Collinear { intersection }) => {
                let (t0, t1) = (
                    parameter(segment, intersection.start),
                    parameter(segment, intersection.end),
                );
                let (lo, hi) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
                (hi - lo > tolerance()).then_some((lo.max(0.0), hi.min(1.0)))
            },
            _ => None,
        })
        .collect();
    intervals.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut merged: Vec<(Real, Real)> = Vec::new();
    for (lo, hi) in intervals {
        match merged.last_mut() {
            Some(last) if lo <= last.1 + tolerance() => last.1 = last.1.max(hi),
            _ => merged.push((lo, hi)),
        }
    }
    merged
}

/// Portions of `lines` that do not run along `others`.
pub fn subtract(
    lines: &MultiLineString<Real>,
    others: &MultiLineString<Real>,
) -> MultiLineString<Real> {
    let others = segments(others);
    let mut pieces = Vec::new();
    for segment in segments(lines) {
        let mut start = 0.0;
        for (lo, hi) in covered_intervals(&segment, &others) {
            if lo - start > tolerance() {
                pieces.push(Line::new(at(&segment, start), at(&segment, lo)));
            }
            start = hi;
        }
        if 1.0 - start > tolerance() {
            let from = if start == 0.0 { segment.start } else { at(&segment, start) };
            pieces.push(Line::new(from, segment.end));
        }
    }
    chain(pieces)
}

/// Portions of `lines` that run along `others`, in the direction of `lines`.
pub fn common(
    lines: &MultiLineString<Real>,
    others: &MultiLineString<Real>,
) -> MultiLineString<Real> {
    let others = segments(others);
    let mut pieces = Vec::new();
    for segment in segments(lines) {
        for (lo, hi) in covered_intervals(&segment, &others) {
            pieces.push(Line::new(at(&segment, lo), at(&segment, hi)));
        }
    }
    chain(pieces)
}

/// Isolated intersection points between the segments of two line sets.
pub fn crossings(a: &MultiLineString<Real>, b: &MultiLineString<Real>) -> Vec<GeoCoord> {
    let b = segments(b);
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for sa in segments(a) {
        for sb in &b {
            let hit = line_intersection(sa, *sb);
            if let Some(LineIntersection::SinglePoint { intersection, .. }) = hit {
                if seen.insert(key(intersection)) {
                    out.push(intersection);
                }
            }
        }
    }
    out
}

/// Line strings of a lineal `geo` geometry, `None` when anything else is present.
pub fn lineal(geometry: &geo::Geometry<Real>) -> Option<MultiLineString<Real>> {
    fn collect(g: &geo::Geometry<Real>, out: &mut Vec<geo::LineString<Real>>) -> bool {
        match g {
            geo::Geometry::Line(l) => {
                out.push(geo::LineString::new(vec![l.start, l.end]));
                true
            },
            geo::Geometry::LineString(ls) => {
                out.push(ls.clone());
                true
            },
            geo::Geometry::MultiLineString(mls) => {
                out.extend(mls.0.iter().cloned());
                true
            },
            geo::Geometry::GeometryCollection(gc) => gc.0.iter().all(|m| collect(m, out)),
            _ => false,
        }
    }
    let mut out = Vec::new();
    collect(geometry, &mut out).then(|| MultiLineString::new(out))
}

/// Sews line strings together at nodes where exactly two ends meet.
pub fn merge(lines: &MultiLineString<Real>) -> MultiLineString<Real> {
    let lines: Vec<&geo::LineString<Real>> = lines.iter().filter(|ls| ls.0.len() >= 2).collect();
    let mut ends: HashMap<(u64, u64), Vec<(usize, bool)>> = HashMap::new();
    for (i, ls) in lines.iter().enumerate() {
        ends.entry(key(ls.0[0])).or_default().push((i, true));
        ends.entry(key(ls.0[ls.0.len() - 1])).or_default().push((i, false));
    }
    let degree = |c: GeoCoord| ends.get(&key(c)).map_or(0, Vec::len);

    let mut used = vec![false; lines.len()];
    let mut merged = Vec::new();
    // chains hanging off a node of degree != 2 first, then closed cycles
    for open_pass in [true, false] {
        for i in 0..lines.len() {
            if used[i] {
                continue;
            }
            let first = lines[i].0[0];
            let last = lines[i].0[lines[i].0.len() - 1];
            if open_pass && degree(first) == 2 && degree(last) == 2 {
                continue;
            }
            used[i] = true;
            let mut coords = lines[i].0.clone();
            if open_pass && degree(first) == 2 {
                coords.reverse();
            }
            loop {
                let tail = coords[coords.len() - 1];
                if degree(tail) != 2 {
                    break;
                }
                let next = ends[&key(tail)].iter().copied().find(|(j, _)| !used[*j]);
                let Some((j, at_start)) = next else {
                    break;
                };
                used[j] = true;
                if at_start {
                    coords.extend(lines[j].0.iter().skip(1));
                } else {
                    coords.extend(lines[j].0.iter().rev().skip(1));
                }
            }
            merged.push(geo::LineString::new(coords));
        }
    }
    MultiLineString::new(merged)
}

/// Paths shared by two line sets, split by relative direction and given in
/// the direction of `a`: `(same direction, opposite direction)`.
pub fn shared_paths(
    a: &MultiLineString<Real>,
    b: &MultiLineString<Real>,
) -> (MultiLineString<Real>, MultiLineString<Real>) {
    let b = segments(b);
    let mut forward = Vec::new();
    let mut backward = Vec::new();
    for sa in segments(a) {
        for sb in &b {
            let hit = line_intersection(sa, *sb);
            let Some(LineIntersection::Collinear { intersection }) = hit else {
                continue;
            };
            let (t0, t1) = (parameter(&sa, intersection.start), parameter(&sa, intersection.end));
            if (t1 - t0).abs() <= tolerance() {
                continue;
            }
            let piece = if t0 <= t1 {
                Line::new(intersection.start, intersection.end)
            } else {
                Line::new(intersection.end, intersection.start)
            };
            if dot(sa.delta(), sb.delta()) > 0.0 {
                forward.push(piece);
            } else {
                backward.push(piece);
            }
        }
    }
    (chain(forward), chain(backward))
}

/// Distinct vertices in order of first appearance, Z kept.
pub fn unique_points(geometry: &Geometry) -> MultiPoint {
    let mut seen = HashSet::new();
    MultiPoint::new(
        geometry
            .coords()
            .filter(|c| seen.insert(model_key(c)))
            .map(Point::new)
            .collect(),
    )
}

/// Snaps the vertices of `geometry` onto the vertices of `reference`, then
/// inserts reference vertices that lie within `tolerance` of a segment.
/// Arc control points are snapped like vertices; nothing is inserted into an arc.
pub fn snap(geometry: &Geometry, reference: &Geometry, snap_tolerance: Real) -> Geometry {
    let mut seen = HashSet::new();
    let targets: Vec<Coord> = reference.coords().filter(|c| seen.insert(model_key(c))).collect();
    if targets.is_empty() || snap_tolerance <= 0.0 {
        return geometry.clone();
    }
    let snapper = Snapper {
        targets,
        tolerance: snap_tolerance,
    };
    snapper.geometry(geometry)
}

struct Snapper {
    targets: Vec<Coord>,
    tolerance: Real,
}

impl Snapper {
    fn planar(c: &Coord) -> GeoCoord {
        geo::coord! { x: c.x, y: c.y }
    }

    fn vertex(&self, c: Coord) -> Coord {
        self.targets
            .iter()
            .map(|t| (distance(Self::planar(t), Self::planar(&c)), t))
            .filter(|(d, _)| *d <= self.tolerance)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map_or(c, |(_, t)| Coord { x: t.x, y: t.y, z: c.z })
    }

    fn sequence(&self, coords: &[Coord], ring: bool) -> Vec<Coord> {
        let mut snapped: Vec<Coord> = coords.iter().map(|c| self.vertex(*c)).collect();

        // segment snapping: insert untouched targets lying close to a segment interior
        for target in &self.targets {
            if snapped.iter().any(|c| c.equals_2d(target)) {
                continue;
            }
            let t = Self::planar(target);
            let mut best: Option<(Real, usize)> = None;
            for i in 0..snapped.len().saturating_sub(1) {
                let seg = Line::new(Self::planar(&snapped[i]), Self::planar(&snapped[i + 1]));
                let u = parameter(&seg, t);
                if u <= 0.0 || u >= 1.0 {
                    continue;
                }
                let d = distance(at(&seg, u), t);
                if d <= self.tolerance && best.is_none_or(|(bd, _)| d < bd) {
                    best = Some((d, i));
                }
            }
            if let Some((_, i)) = best {
                let z = match (snapped[i].z, snapped[i + 1].z) {
                    (Some(z0), Some(z1)) => Some((z0 + z1) * 0.5),
                    _ => None,
                };
                snapped.insert(i + 1, Coord { x: target.x, y: target.y, z });
            }
        }

        let mut deduped = snapped.clone();
        deduped.dedup_by(|a, b| a.equals_2d(b));
        let min = if ring { 4 } else { 2 };
        if deduped.len() >= min || coords.len() < min {
            deduped
        } else {
            snapped
        }
    }

    fn point(&self, p: &Point) -> Point {
        p.coord().map_or(Point::empty(), |c| Point::new(self.vertex(c)))
    }

    fn arc(&self, cs: &CircularString) -> CircularString {
        CircularString::new(cs.coords().iter().map(|c| self.vertex(*c)).collect())
    }

    fn line(&self, ls: &LineString) -> LineString {
        LineString::new(self.sequence(ls.coords(), false))
    }

    fn polygon(&self, poly: &Polygon) -> Polygon {
        let ring = |r: &LineString| LineString::new(self.sequence(r.coords(), true));
        Polygon::new(ring(poly.exterior()), poly.interiors().iter().map(ring).collect())
    }

    fn geometry(&self, geometry: &Geometry) -> Geometry {
        match geometry {
            Geometry::Point(p) => Geometry::Point(self.point(p)),
            Geometry::MultiPoint(mp) => {
                let points = mp.points().iter().map(|p| self.point(p)).collect();
                Geometry::MultiPoint(MultiPoint::new(points))
            },
            Geometry::LineString(ls) => Geometry::LineString(self.line(ls)),
            Geometry::Polygon(poly) => Geometry::Polygon(self.polygon(poly)),
            Geometry::MultiLineString(mls) => {
                let lines = mls.line_strings().iter().map(|ls| self.line(ls)).collect();
                Geometry::MultiLineString(crate::geometry::MultiLineString::new(lines))
            },
            Geometry::MultiPolygon(mp) => {
                let polygons = mp.polygons().iter().map(|p| self.polygon(p)).collect();
                Geometry::MultiPolygon(crate::geometry::MultiPolygon::new(polygons))
            },
            Geometry::GeometryCollection(gc) => {
                let members = gc.geometries().iter().map(|g| self.geometry(g)).collect();
                Geometry::GeometryCollection(GeometryCollection::new(members))
            },
            Geometry::CircularString(cs) => Geometry::CircularString(self.arc(cs)),
            Geometry::CompoundCurve(cc) => Geometry::CompoundCurve(CompoundCurve::new(
                cc.segments()
                    .iter()
                    .map(|segment| match segment {
                        CurveSegment::Line(ls) => CurveSegment::Line(self.line(ls)),
                        CurveSegment::Arc(cs) => CurveSegment::Arc(self.arc(cs)),
                    })
                    .collect(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::line_string;

    #[test]
    fn subtract_removes_overlap() {
        let a = MultiLineString::new(vec![line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)]]);
        let b = MultiLineString::new(vec![line_string![(x: 2.0, y: 0.0), (x: 4.0, y: 0.0)]]);
        let rest = subtract(&a, &b);
        assert_eq!(rest.0.len(), 2);
        assert_eq!(rest.0[0], line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0)]);
        assert_eq!(rest.0[1], line_string![(x: 4.0, y: 0.0), (x: 10.0, y: 0.0)]);
    }

    #[test]
    fn common_follows_first_direction() {
        let a = MultiLineString::new(vec![line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)]]);
        let b = MultiLineString::new(vec![line_string![(x: 6.0, y: 0.0), (x: 3.0, y: 0.0)]]);
        let shared = common(&a, &b);
        assert_eq!(shared.0, vec![line_string![(x: 3.0, y: 0.0), (x: 6.0, y: 0.0)]]);
    }

    #[test]
    fn merge_joins_reversed_pieces() {
        let lines = MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
            line_string![(x: 2.0, y: 0.0), (x: 1.0, y: 0.0)],
            line_string![(x: 2.0, y: 0.0), (x: 3.0, y: 1.0)],
        ]);
        let merged = merge(&lines);
        assert_eq!(merged.0.len(), 1);
        assert_eq!(merged.0[0].0.len(), 4);
    }

    #[test]
    fn merge_keeps_branches_apart() {
        // three lines meeting at one node cannot be sewn
        let lines = MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)],
            line_string![(x: 1.0, y: 1.0), (x: 2.0, y: 0.0)],
            line_string![(x: 1.0, y: 1.0), (x: 1.0, y: 2.0)],
        ]);
        assert_eq!(merge(&lines).0.len(), 3);
    }

    #[test]
    fn crossing_of_an_x() {
        let a = MultiLineString::new(vec![line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 2.0)]]);
        let b = MultiLineString::new(vec![line_string![(x: 0.0, y: 2.0), (x: 2.0, y: 0.0)]]);
        assert_eq!(crossings(&a, &b), vec![geo::coord! { x: 1.0, y: 1.0 }]);
    }

    #[test]
    fn snap_moves_arc_control_points() {
        let arc = crate::wkt::from_wkt("CIRCULARSTRING (0.05 0, 1 1, 2 0)").unwrap();
        let reference = crate::wkt::from_wkt("POINT (0 0)").unwrap();
        assert_eq!(
            crate::wkt::to_wkt(&snap(&arc, &reference, 0.1)),
            "CIRCULARSTRING (0 0, 1 1, 2 0)"
        );
    }

    #[test]
    fn snap_keeps_compound_curves_connected() {
        let text = "COMPOUNDCURVE ((0 0, 1.05 0), CIRCULARSTRING (1.05 0, 2 1, 3 0))";
        let curve = crate::wkt::from_wkt(text).unwrap();
        let reference = crate::wkt::from_wkt("POINT (1 0)").unwrap();
        let snapped = snap(&curve, &reference, 0.1);
        assert_eq!(
            crate::wkt::to_wkt(&snapped),
            "COMPOUNDCURVE ((0 0, 1 0), CIRCULARSTRING (1 0, 2 1, 3 0))"
        );
        assert!(snapped.validate().is_ok());
    }
}
