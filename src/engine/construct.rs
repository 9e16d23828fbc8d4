//! Derived geometries: boundary, centroid, envelope, hull, interior point
//! and simplification.

use crate::engine::convert::GeoGeometry;
use crate::engine::linework::key;
use crate::float_types::Real;
use geo::{
    Area, BoundingRect, Centroid, ConvexHull, InteriorPoint, LineString, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon, Simplify, SimplifyVwPreserve,
};
use hashbrown::HashMap;

fn empty_collection() -> GeoGeometry {
    geo::Geometry::GeometryCollection(geo::GeometryCollection(vec![]))
}

fn rings(poly: &Polygon<Real>) -> impl Iterator<Item = &LineString<Real>> {
    std::iter::once(poly.exterior()).chain(poly.interiors())
}

/// Combinatorial boundary. Collections have none.
pub fn boundary(geometry: &GeoGeometry) -> Result<GeoGeometry, String> {
    Ok(match geometry {
        geo::Geometry::Point(_) | geo::Geometry::MultiPoint(_) => empty_collection(),
        geo::Geometry::Line(l) => {
            geo::Geometry::MultiPoint(MultiPoint::new(vec![l.start.into(), l.end.into()]))
        },
        geo::Geometry::LineString(ls) => {
            if ls.0.is_empty() || ls.is_closed() {
                geo::Geometry::MultiPoint(MultiPoint::new(vec![]))
            } else {
                geo::Geometry::MultiPoint(MultiPoint::new(vec![
                    ls.0[0].into(),
                    ls.0[ls.0.len() - 1].into(),
                ]))
            }
        },
        geo::Geometry::MultiLineString(mls) => {
            // mod-2 rule: endpoints shared by an even number of line ends are interior
            let mut order = Vec::new();
            let mut counts: HashMap<(u64, u64), usize> = HashMap::new();
            for ls in mls.iter().filter(|ls| !ls.0.is_empty()) {
                for end in [ls.0[0], ls.0[ls.0.len() - 1]] {
                    let count = counts.entry(key(end)).or_insert(0);
                    if *count == 0 {
                        order.push(end);
                    }
                    *count += 1;
                }
            }
            geo::Geometry::MultiPoint(MultiPoint::new(
                order
                    .into_iter()
                    .filter(|c| counts.get(&key(*c)).is_some_and(|n| n % 2 == 1))
                    .map(Point::from)
                    .collect(),
            ))
        },
        geo::Geometry::Polygon(poly) => {
            if poly.interiors().is_empty() {
                geo::Geometry::LineString(poly.exterior().clone())
            } else {
                geo::Geometry::MultiLineString(MultiLineString::new(rings(poly).cloned().collect()))
            }
        },
        geo::Geometry::MultiPolygon(mp) => geo::Geometry::MultiLineString(MultiLineString::new(
            mp.iter().flat_map(|poly| rings(poly).cloned()).collect(),
        )),
        geo::Geometry::Rect(r) => geo::Geometry::LineString(r.to_polygon().exterior().clone()),
        geo::Geometry::Triangle(t) => geo::Geometry::LineString(t.to_polygon().exterior().clone()),
        geo::Geometry::GeometryCollection(_) => {
            return Err("Operation not supported by GeometryCollection".to_string());
        },
    })
}

pub fn centroid(geometry: &GeoGeometry) -> GeoGeometry {
    geometry
        .centroid()
        .map_or_else(empty_collection, geo::Geometry::Point)
}

pub fn point_on_surface(geometry: &GeoGeometry) -> GeoGeometry {
    geometry
        .interior_point()
        .map_or_else(empty_collection, geo::Geometry::Point)
}

/// Axis-aligned bounding box, collapsing to a point or a segment when flat.
pub fn envelope(geometry: &GeoGeometry) -> GeoGeometry {
    let Some(rect) = geometry.bounding_rect() else {
        return geo::Geometry::Polygon(Polygon::new(LineString::new(vec![]), vec![]));
    };
    let (min, max) = (rect.min(), rect.max());
    match (min.x == max.x, min.y == max.y) {
        (true, true) => geo::Geometry::Point(min.into()),
        (true, false) | (false, true) => geo::Geometry::LineString(LineString::new(vec![min, max])),
        (false, false) => geo::Geometry::Polygon(Polygon::new(
            LineString::new(vec![
                geo::coord! { x: min.x, y: min.y },
                geo::coord! { x: min.x, y: max.y },
                geo::coord! { x: max.x, y: max.y },
                geo::coord! { x: max.x, y: min.y },
                geo::coord! { x: min.x, y: min.y },
            ]),
            vec![],
        )),
    }
}

/// Smallest convex geometry holding every vertex, degenerating to a point or
/// a segment for degenerate input.
pub fn convex_hull(geometry: &GeoGeometry) -> GeoGeometry {
    use geo::CoordsIter;
    // `-0.0` and `0.0` must sort together for `dedup` and the extremes below
    let mut coords: Vec<geo::Coord<Real>> = geometry
        .coords_iter()
        .map(|c| geo::coord! { x: c.x + 0.0, y: c.y + 0.0 })
        .collect();
    coords.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    coords.dedup();
    match coords.len() {
        0 => empty_collection(),
        1 => geo::Geometry::Point(coords[0].into()),
        n => {
            let hull = MultiPoint::from(coords.clone()).convex_hull();
            if hull.unsigned_area() > 0.0 {
                geo::Geometry::Polygon(hull)
            } else {
                // collinear: the lexicographic extremes are the farthest pair
                geo::Geometry::LineString(LineString::new(vec![coords[0], coords[n - 1]]))
            }
        },
    }
}

fn keep_valid_polygon(poly: Polygon<Real>) -> Option<Polygon<Real>> {
    if poly.exterior().0.len() < 4 {
        return None;
    }
    let (exterior, interiors) = poly.into_inner();
    Some(Polygon::new(
        exterior,
        interiors.into_iter().filter(|ring| ring.0.len() >= 4).collect(),
    ))
}

/// Douglas-Peucker simplification. Rings that collapse below four points
/// are dropped.
pub fn simplify(geometry: &GeoGeometry, tolerance: Real) -> GeoGeometry {
    match geometry {
        geo::Geometry::LineString(ls) => geo::Geometry::LineString(ls.simplify(&tolerance)),
        geo::Geometry::MultiLineString(mls) => {
            geo::Geometry::MultiLineString(mls.simplify(&tolerance))
        },
        geo::Geometry::Polygon(poly) => geo::Geometry::Polygon(
            keep_valid_polygon(poly.simplify(&tolerance))
                .unwrap_or_else(|| Polygon::new(LineString::new(vec![]), vec![])),
        ),
        geo::Geometry::MultiPolygon(mp) => geo::Geometry::MultiPolygon(MultiPolygon::new(
            mp.iter()
                .filter_map(|poly| keep_valid_polygon(poly.simplify(&tolerance)))
                .collect(),
        )),
        geo::Geometry::GeometryCollection(gc) => {
            let members = gc.iter().map(|g| simplify(g, tolerance)).collect();
            geo::Geometry::GeometryCollection(geo::GeometryCollection(members))
        },
        other => other.clone(),
    }
}

/// Visvalingam-Whyatt simplification that refuses to introduce
/// intersections. The tolerance is a distance, compared as an area against
/// its square.
pub fn simplify_preserve_topology(geometry: &GeoGeometry, tolerance: Real) -> GeoGeometry {
    let epsilon = tolerance * tolerance;
    match geometry {
        geo::Geometry::LineString(ls) => {
            geo::Geometry::LineString(ls.simplify_vw_preserve(&epsilon))
        },
        geo::Geometry::MultiLineString(mls) => {
            geo::Geometry::MultiLineString(mls.simplify_vw_preserve(&epsilon))
        },
        geo::Geometry::Polygon(poly) => geo::Geometry::Polygon(poly.simplify_vw_preserve(&epsilon)),
        geo::Geometry::MultiPolygon(mp) => {
            geo::Geometry::MultiPolygon(mp.simplify_vw_preserve(&epsilon))
        },
        geo::Geometry::GeometryCollection(gc) => {
            let members = gc
                .iter()
                .map(|g| simplify_preserve_topology(g, tolerance))
                .collect();
            geo::Geometry::GeometryCollection(geo::GeometryCollection(members))
        },
        other => other.clone(),
    }
}
