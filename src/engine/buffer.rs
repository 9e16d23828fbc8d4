//! Rounded buffering
//!
//! Points and polygons are offset with `geo-buf`; line work is buffered as
//! the union of one capsule per segment. Every partial region is dissolved
//! into a single multi-polygon with `geo`'s boolean operations.
//!
//! `geo-buf` picks its own arc density for polygon corners, so the quadrant
//! segment count only shapes point and line buffers.

use crate::engine::convert::GeoGeometry;
use crate::float_types::{FRAC_PI_2, PI, Real};
use geo::orient::{Direction, Orient};
use geo::{BooleanOps, Line, LineString, MultiPolygon, Point, Polygon};
use geo_buf::{buffer_multi_polygon_rounded, buffer_point};

/// Stadium-shaped region around a segment, each end capped by a half circle
/// of `2 * quadrant_segments` pieces.
fn capsule(line: &Line<Real>, width: Real, quadrant_segments: usize) -> Polygon<Real> {
    let (dx, dy) = line.delta().x_y();
    let heading = dy.atan2(dx);
    let steps = 2 * quadrant_segments;
    let mut ring = Vec::with_capacity(2 * steps + 3);
    for (center, start) in [(line.end, heading - FRAC_PI_2), (line.start, heading + FRAC_PI_2)] {
        for i in 0..=steps {
            let angle = start + PI * i as Real / steps as Real;
            ring.push(geo::coord! {
                x: center.x + width * angle.cos(),
                y: center.y + width * angle.sin(),
            });
        }
    }
    ring.push(ring[0]);
    Polygon::new(LineString::new(ring), vec![])
}

fn dissolve(acc: MultiPolygon<Real>, next: MultiPolygon<Real>) -> MultiPolygon<Real> {
    match (acc.0.is_empty(), next.0.is_empty()) {
        (true, _) => next,
        (_, true) => acc,
        _ => acc.union(&next),
    }
}

#[derive(Default)]
struct Inputs {
    points: Vec<Point<Real>>,
    lines: Vec<Line<Real>>,
    polygons: Vec<Polygon<Real>>,
}

impl Inputs {
    fn collect(&mut self, geometry: &GeoGeometry) {
        match geometry {
            geo::Geometry::Polygon(poly) => {
                if !poly.exterior().0.is_empty() {
                    self.polygons.push(poly.clone());
                }
            },
            geo::Geometry::MultiPolygon(mp) => mp
                .iter()
                .for_each(|poly| self.collect(&geo::Geometry::Polygon(poly.clone()))),
            geo::Geometry::Rect(r) => self.polygons.push(r.to_polygon()),
            geo::Geometry::Triangle(t) => self.polygons.push(t.to_polygon()),
            geo::Geometry::GeometryCollection(gc) => gc.iter().for_each(|g| self.collect(g)),
            other => {
                let (points, lines) = crate::engine::measure::decompose(other);
                self.points.extend(points);
                self.lines.extend(lines.into_iter().filter(|l| l.start != l.end));
            },
        }
    }
}

/// Region within `width` of the geometry; a negative width erodes polygons.
pub fn buffer(
    geometry: &GeoGeometry,
    width: Real,
    quadrant_segments: i32,
) -> Result<GeoGeometry, String> {
    if !width.is_finite() {
        return Err(format!("buffer width must be finite, got {width}"));
    }
    let quadrant_segments = usize::try_from(quadrant_segments)
        .ok()
        .filter(|q| *q >= 1)
        .ok_or_else(|| format!("quadrant segments must be at least 1, got {quadrant_segments}"))?;

    let mut inputs = Inputs::default();
    inputs.collect(geometry);

    let mut region = MultiPolygon::new(vec![]);
    if width > 0.0 {
        for p in &inputs.points {
            let disc = buffer_point(p, width, 4 * quadrant_segments);
            region = dissolve(region, MultiPolygon::new(vec![disc]));
        }
        for line in &inputs.lines {
            let stadium = capsule(line, width, quadrant_segments);
            region = dissolve(region, MultiPolygon::new(vec![stadium]));
        }
    }
    if !inputs.polygons.is_empty() {
        // geo-buf expects counter-clockwise shells and clockwise holes
        let polygons = MultiPolygon::new(inputs.polygons).orient(Direction::Default);
        let offset = if width == 0.0 {
            polygons
        } else {
            buffer_multi_polygon_rounded(&polygons, width)
        };
        region = dissolve(region, offset);
    }

    let mut members = region.0;
    Ok(match members.len() {
        0 => geo::Geometry::Polygon(Polygon::new(LineString::new(vec![]), vec![])),
        1 => geo::Geometry::Polygon(members.remove(0)),
        _ => geo::Geometry::MultiPolygon(MultiPolygon::new(members)),
    })
}
