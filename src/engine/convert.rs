//! Conversion between the geometry model and `geo` types
//!
//! `geo` is strictly planar: Z ordinates are dropped on the way in, and
//! arcs must already be linearized. Empty points have no `geo` counterpart
//! and become empty multi-points.

use crate::float_types::Real;
use crate::geometry::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};

pub type GeoGeometry = geo::Geometry<Real>;

fn to_geo_coord(c: &Coord) -> geo::Coord<Real> {
    geo::coord! { x: c.x, y: c.y }
}

fn to_geo_line_string(ls: &LineString) -> geo::LineString<Real> {
    geo::LineString::new(ls.coords().iter().map(to_geo_coord).collect())
}

fn to_geo_polygon(poly: &Polygon) -> geo::Polygon<Real> {
    geo::Polygon::new(
        to_geo_line_string(poly.exterior()),
        poly.interiors().iter().map(to_geo_line_string).collect(),
    )
}

/// Planar view of a geometry. Curves must be linearized by the caller.
pub fn to_geo(geometry: &Geometry) -> GeoGeometry {
    match geometry {
        Geometry::Point(p) => match p.coord() {
            Some(c) => geo::Geometry::Point(geo::Point::from(to_geo_coord(&c))),
            None => geo::Geometry::MultiPoint(geo::MultiPoint::new(vec![])),
        },
        Geometry::LineString(ls) => geo::Geometry::LineString(to_geo_line_string(ls)),
        Geometry::Polygon(poly) => geo::Geometry::Polygon(to_geo_polygon(poly)),
        Geometry::MultiPoint(mp) => geo::Geometry::MultiPoint(geo::MultiPoint::new(
            mp.points()
                .iter()
                .filter_map(Point::coord)
                .map(|c| geo::Point::from(to_geo_coord(&c)))
                .collect(),
        )),
        Geometry::MultiLineString(mls) => geo::Geometry::MultiLineString(geo::MultiLineString::new(
            mls.line_strings().iter().map(to_geo_line_string).collect(),
        )),
        Geometry::MultiPolygon(mp) => geo::Geometry::MultiPolygon(geo::MultiPolygon::new(
            mp.polygons().iter().map(to_geo_polygon).collect(),
        )),
        Geometry::GeometryCollection(gc) => geo::Geometry::GeometryCollection(
            geo::GeometryCollection(gc.geometries().iter().map(to_geo).collect()),
        ),
        Geometry::CircularString(cs) => geo::Geometry::LineString(geo::LineString::new(
            cs.coords().iter().map(to_geo_coord).collect(),
        )),
        Geometry::CompoundCurve(cc) => geo::Geometry::LineString(geo::LineString::new(
            cc.segments()
                .iter()
                .flat_map(|s| s.coords().iter().map(to_geo_coord))
                .collect(),
        )),
    }
}

fn from_geo_coord(c: &geo::Coord<Real>) -> Coord {
    Coord::xy(c.x, c.y)
}

pub fn from_geo_line_string(ls: &geo::LineString<Real>) -> LineString {
    LineString::new(ls.0.iter().map(from_geo_coord).collect())
}

pub fn from_geo_polygon(poly: &geo::Polygon<Real>) -> Polygon {
    if poly.exterior().0.is_empty() {
        return Polygon::empty();
    }
    Polygon::new(
        from_geo_line_string(poly.exterior()),
        poly.interiors().iter().map(from_geo_line_string).collect(),
    )
}

pub fn from_geo_point(p: &geo::Point<Real>) -> Point {
    Point::new(from_geo_coord(&p.0))
}

/// Model view of a `geo` result.
pub fn from_geo(geometry: &GeoGeometry) -> Geometry {
    match geometry {
        geo::Geometry::Point(p) => Geometry::Point(from_geo_point(p)),
        geo::Geometry::Line(line) => Geometry::LineString(LineString::new(vec![
            from_geo_coord(&line.start),
            from_geo_coord(&line.end),
        ])),
        geo::Geometry::LineString(ls) => Geometry::LineString(from_geo_line_string(ls)),
        geo::Geometry::Polygon(poly) => Geometry::Polygon(from_geo_polygon(poly)),
        geo::Geometry::MultiPoint(mp) => {
            Geometry::MultiPoint(MultiPoint::new(mp.0.iter().map(from_geo_point).collect()))
        },
        geo::Geometry::MultiLineString(mls) => Geometry::MultiLineString(MultiLineString::new(
            mls.0.iter().map(from_geo_line_string).collect(),
        )),
        geo::Geometry::MultiPolygon(mp) => Geometry::MultiPolygon(MultiPolygon::new(
            mp.0.iter().map(from_geo_polygon).collect(),
        )),
        geo::Geometry::GeometryCollection(gc) => Geometry::GeometryCollection(
            GeometryCollection::new(gc.0.iter().map(from_geo).collect()),
        ),
        geo::Geometry::Rect(rect) => Geometry::Polygon(from_geo_polygon(&rect.to_polygon())),
        geo::Geometry::Triangle(tri) => Geometry::Polygon(from_geo_polygon(&tri.to_polygon())),
    }
}
