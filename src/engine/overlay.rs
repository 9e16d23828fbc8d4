//! Set-theoretic overlay of mixed-dimension geometries
//!
//! Areal parts go through `geo`'s boolean operations. Lineal parts are
//! clipped against the areal parts and compared segment by segment against
//! each other; puntal parts are tested for containment. The result is
//! normalized so that no lower-dimensional part lies on a higher one, then
//! assembled as the simplest geometry holding the remaining parts.

use crate::engine::convert::GeoGeometry;
use crate::engine::linework::{common, crossings, key, subtract};
use crate::float_types::Real;
use geo::{BooleanOps, Intersects, LineString, MultiLineString, MultiPolygon, Point, Polygon};
use hashbrown::HashSet;

#[derive(Debug, Clone)]
struct Parts {
    points: Vec<Point<Real>>,
    lines: MultiLineString<Real>,
    polygons: MultiPolygon<Real>,
}

fn union_polygons(a: &MultiPolygon<Real>, b: &MultiPolygon<Real>) -> MultiPolygon<Real> {
    match (a.0.is_empty(), b.0.is_empty()) {
        (true, _) => b.clone(),
        (_, true) => a.clone(),
        _ => a.union(b),
    }
}

fn concat(a: &MultiLineString<Real>, b: &MultiLineString<Real>) -> MultiLineString<Real> {
    MultiLineString::new(a.iter().chain(b.iter()).cloned().collect())
}

fn rings(polygons: &MultiPolygon<Real>) -> MultiLineString<Real> {
    MultiLineString::new(
        polygons
            .iter()
            .flat_map(|poly| std::iter::once(poly.exterior()).chain(poly.interiors()))
            .cloned()
            .collect(),
    )
}

impl Parts {
    fn empty() -> Self {
        Parts {
            points: vec![],
            lines: MultiLineString::new(vec![]),
            polygons: MultiPolygon::new(vec![]),
        }
    }

    fn of(geometry: &GeoGeometry) -> Self {
        let mut parts = Parts::empty();
        parts.collect(geometry);
        parts
    }

    fn collect(&mut self, geometry: &GeoGeometry) {
        match geometry {
            geo::Geometry::Point(p) => self.points.push(*p),
            geo::Geometry::MultiPoint(mp) => self.points.extend(mp.iter().copied()),
            geo::Geometry::Line(l) => self.lines.0.push(LineString::new(vec![l.start, l.end])),
            geo::Geometry::LineString(ls) => self.push_line(ls),
            geo::Geometry::MultiLineString(mls) => mls.iter().for_each(|ls| self.push_line(ls)),
            geo::Geometry::Polygon(poly) => self.push_polygon(poly.clone()),
            geo::Geometry::MultiPolygon(mp) => {
                mp.iter().for_each(|poly| self.push_polygon(poly.clone()))
            },
            geo::Geometry::Rect(r) => self.push_polygon(r.to_polygon()),
            geo::Geometry::Triangle(t) => self.push_polygon(t.to_polygon()),
            geo::Geometry::GeometryCollection(gc) => gc.iter().for_each(|g| self.collect(g)),
        }
    }

    fn push_line(&mut self, ls: &LineString<Real>) {
        match ls.0.len() {
            0 => {},
            1 => self.points.push(Point::from(ls.0[0])),
            _ => self.lines.0.push(ls.clone()),
        }
    }

    // members of a collection may overlap, so polygons are dissolved on entry
    fn push_polygon(&mut self, poly: Polygon<Real>) {
        if poly.exterior().0.is_empty() {
            return;
        }
        self.polygons = union_polygons(&self.polygons, &MultiPolygon::new(vec![poly]));
    }

    /// Every line, polygon rings included.
    fn linework(&self) -> MultiLineString<Real> {
        concat(&self.lines, &rings(&self.polygons))
    }

    fn geometry(&self) -> GeoGeometry {
        let mut members = Vec::new();
        members.extend(self.polygons.iter().cloned().map(geo::Geometry::Polygon));
        members.extend(self.lines.iter().cloned().map(geo::Geometry::LineString));
        members.extend(self.points.iter().copied().map(geo::Geometry::Point));
        geo::Geometry::GeometryCollection(geo::GeometryCollection(members))
    }

    /// Drops parts that lie on higher-dimensional parts and duplicates.
    fn normalize(mut self) -> Self {
        if !self.polygons.0.is_empty() && !self.lines.0.is_empty() {
            let outside = self.polygons.clip(&self.lines, true);
            self.lines = subtract(&outside, &rings(&self.polygons));
        }

        let mut kept = MultiLineString::new(vec![]);
        for ls in &self.lines {
            let rest = subtract(&MultiLineString::new(vec![ls.clone()]), &kept);
            kept.0.extend(rest.0);
        }
        self.lines = kept;

        let mut seen = HashSet::new();
        let polygons = &self.polygons;
        let lines = &self.lines;
        self.points.retain(|p| {
            !p.intersects(polygons) && !p.intersects(lines) && seen.insert(key(p.0))
        });
        self
    }

    /// The simplest geometry holding the parts.
    fn assemble(self) -> GeoGeometry {
        let Parts {
            points,
            lines,
            polygons,
        } = self.normalize();
        let kinds = [!polygons.0.is_empty(), !lines.0.is_empty(), !points.is_empty()];
        match kinds {
            [true, false, false] if polygons.0.len() == 1 => {
                geo::Geometry::Polygon(polygons.0[0].clone())
            },
            [true, false, false] => geo::Geometry::MultiPolygon(polygons),
            [false, true, false] if lines.0.len() == 1 => {
                geo::Geometry::LineString(lines.0[0].clone())
            },
            [false, true, false] => geo::Geometry::MultiLineString(lines),
            [false, false, true] if points.len() == 1 => geo::Geometry::Point(points[0]),
            [false, false, true] => geo::Geometry::MultiPoint(points.into()),
            _ => Parts {
                points,
                lines,
                polygons,
            }
            .geometry(),
        }
    }
}

fn clip_inside(
    polygons: &MultiPolygon<Real>,
    lines: &MultiLineString<Real>,
) -> MultiLineString<Real> {
    if polygons.0.is_empty() || lines.0.is_empty() {
        return MultiLineString::new(vec![]);
    }
    polygons.clip(lines, false)
}

fn difference_parts(a: &Parts, b: &Parts, b_geometry: &GeoGeometry) -> Parts {
    let polygons = if a.polygons.0.is_empty() || b.polygons.0.is_empty() {
        a.polygons.clone()
    } else {
        a.polygons.difference(&b.polygons)
    };
    let outside = if b.polygons.0.is_empty() || a.lines.0.is_empty() {
        a.lines.clone()
    } else {
        b.polygons.clip(&a.lines, true)
    };
    Parts {
        points: a.points.iter().copied().filter(|p| !p.intersects(b_geometry)).collect(),
        lines: subtract(&outside, &b.linework()),
        polygons,
    }
}

pub fn intersection(a: &GeoGeometry, b: &GeoGeometry) -> GeoGeometry {
    let (pa, pb) = (Parts::of(a), Parts::of(b));
    let polygons = if pa.polygons.0.is_empty() || pb.polygons.0.is_empty() {
        MultiPolygon::new(vec![])
    } else {
        pa.polygons.intersection(&pb.polygons)
    };

    let (la, lb) = (pa.linework(), pb.linework());
    let mut lines = concat(
        &clip_inside(&pb.polygons, &pa.lines),
        &clip_inside(&pa.polygons, &pb.lines),
    );
    lines.0.extend(common(&la, &lb).0);

    let mut points: Vec<Point<Real>> =
        pa.points.iter().copied().filter(|p| p.intersects(b)).collect();
    points.extend(pb.points.iter().copied().filter(|p| p.intersects(a)));
    points.extend(crossings(&la, &lb).into_iter().map(Point::from));

    Parts {
        points,
        lines,
        polygons,
    }
    .assemble()
}

pub fn union(a: &GeoGeometry, b: &GeoGeometry) -> GeoGeometry {
    let (pa, pb) = (Parts::of(a), Parts::of(b));
    Parts {
        points: pa.points.iter().chain(&pb.points).copied().collect(),
        lines: concat(&pa.lines, &pb.lines),
        polygons: union_polygons(&pa.polygons, &pb.polygons),
    }
    .assemble()
}

pub fn difference(a: &GeoGeometry, b: &GeoGeometry) -> GeoGeometry {
    difference_parts(&Parts::of(a), &Parts::of(b), b).assemble()
}

pub fn sym_difference(a: &GeoGeometry, b: &GeoGeometry) -> GeoGeometry {
    let (pa, pb) = (Parts::of(a), Parts::of(b));
    let polygons = match (pa.polygons.0.is_empty(), pb.polygons.0.is_empty()) {
        (true, _) => pb.polygons.clone(),
        (_, true) => pa.polygons.clone(),
        _ => pa.polygons.xor(&pb.polygons),
    };
    let ab = difference_parts(&pa, &pb, b);
    let ba = difference_parts(&pb, &pa, a);
    Parts {
        points: ab.points.into_iter().chain(ba.points).collect(),
        lines: concat(&ab.lines, &ba.lines),
        polygons,
    }
    .assemble()
}

/// Dissolves the members of a single geometry into each other.
pub fn unary_union(geometry: &GeoGeometry) -> GeoGeometry {
    Parts::of(geometry).assemble()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::convert::{from_geo, to_geo};
    use crate::wkt::{from_wkt, to_wkt};
    use geo::Area;

    fn geo(text: &str) -> GeoGeometry {
        to_geo(&from_wkt(text).unwrap())
    }

    const A: &str = "POLYGON ((0 0, 2 0, 2 2, 0 2, 0 0))";
    const B: &str = "POLYGON ((1 1, 3 1, 3 3, 1 3, 1 1))";

    fn close(a: Real, b: Real) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn overlapping_squares() {
        let (a, b) = (geo(A), geo(B));
        assert!(close(intersection(&a, &b).unsigned_area(), 1.0));
        assert!(close(union(&a, &b).unsigned_area(), 7.0));
        assert!(close(difference(&a, &b).unsigned_area(), 3.0));
        assert!(close(sym_difference(&a, &b).unsigned_area(), 6.0));
    }

    #[test]
    fn line_clipped_by_polygon() {
        let line = geo("LINESTRING (-1 1, 3 1)");
        let square = geo(A);
        let inside = intersection(&line, &square);
        assert!(matches!(inside, geo::Geometry::LineString(_)));
        assert!(close(crate::engine::measure::length(&inside), 2.0));
        let outside = difference(&line, &square);
        assert!(matches!(outside, geo::Geometry::MultiLineString(ref mls) if mls.0.len() == 2));
    }

    #[test]
    fn crossing_lines_meet_in_a_point() {
        let x = intersection(&geo("LINESTRING (0 0, 2 2)"), &geo("LINESTRING (0 2, 2 0)"));
        assert_eq!(to_wkt(&from_geo(&x)), "POINT (1 1)");
    }

    #[test]
    fn disjoint_intersection_is_empty() {
        let x = intersection(&geo("POINT (9 9)"), &geo(A));
        assert_eq!(to_wkt(&from_geo(&x)), "GEOMETRYCOLLECTION EMPTY");
    }

    #[test]
    fn union_absorbs_point_inside_polygon() {
        let u = union(&geo("POINT (1 1)"), &geo(A));
        assert!(matches!(u, geo::Geometry::Polygon(_)));
    }

    #[test]
    fn unary_union_dissolves_members() {
        let u = unary_union(&geo(
            "MULTIPOLYGON (((0 0, 2 0, 2 2, 0 2, 0 0)), ((1 1, 3 1, 3 3, 1 3, 1 1)))",
        ));
        assert!(matches!(u, geo::Geometry::Polygon(_)));
        assert!(close(u.unsigned_area(), 7.0));
    }
}
