use crate::geometry::{
    Coord, CurveSegment, Geometry, LineString, Point, Polygon,
};
use std::fmt::{self, Display, Write};

const EMPTY: &str = "EMPTY";

impl Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tagged(f, self)
    }
}

fn write_tagged<W: Write>(out: &mut W, geometry: &Geometry) -> fmt::Result {
    out.write_str(geometry.kind().keyword())?;
    if geometry.has_z() {
        out.write_str(" Z")?;
    }
    out.write_char(' ')?;
    match geometry {
        Geometry::Point(p) => write_point(out, p),
        Geometry::LineString(ls) => write_coords(out, ls.coords()),
        Geometry::CircularString(cs) => write_coords(out, cs.coords()),
        Geometry::Polygon(poly) => write_polygon(out, poly),
        Geometry::MultiPoint(mp) => write_list(out, mp.points(), write_point),
        Geometry::MultiLineString(mls) => {
            write_list(out, mls.line_strings(), |o, ls: &LineString| write_coords(o, ls.coords()))
        },
        Geometry::MultiPolygon(mp) => write_list(out, mp.polygons(), write_polygon),
        Geometry::GeometryCollection(gc) => write_list(out, gc.geometries(), write_tagged),
        Geometry::CompoundCurve(cc) => write_list(out, cc.segments(), |o, segment: &CurveSegment| {
            match segment {
                CurveSegment::Line(ls) => write_coords(o, ls.coords()),
                CurveSegment::Arc(cs) => {
                    write_tagged(o, &Geometry::CircularString(cs.clone()))
                },
            }
        }),
    }
}

fn write_coord<W: Write>(out: &mut W, coord: &Coord) -> fmt::Result {
    write!(out, "{coord}")
}

fn write_coords<W: Write>(out: &mut W, coords: &[Coord]) -> fmt::Result {
    if coords.is_empty() {
        return out.write_str(EMPTY);
    }
    out.write_char('(')?;
    for (i, coord) in coords.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write_coord(out, coord)?;
    }
    out.write_char(')')
}

fn write_point<W: Write>(out: &mut W, point: &Point) -> fmt::Result {
    match point.coord() {
        Some(coord) => {
            out.write_char('(')?;
            write_coord(out, &coord)?;
            out.write_char(')')
        },
        None => out.write_str(EMPTY),
    }
}

fn write_polygon<W: Write>(out: &mut W, polygon: &Polygon) -> fmt::Result {
    if polygon.is_empty() && polygon.interiors().is_empty() {
        return out.write_str(EMPTY);
    }
    out.write_char('(')?;
    for (i, ring) in polygon.rings().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write_coords(out, ring.coords())?;
    }
    out.write_char(')')
}

fn write_list<W: Write, T>(
    out: &mut W,
    members: &[T],
    mut write_member: impl FnMut(&mut W, &T) -> fmt::Result,
) -> fmt::Result {
    if members.is_empty() {
        return out.write_str(EMPTY);
    }
    out.write_char('(')?;
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write_member(out, member)?;
    }
    out.write_char(')')
}
