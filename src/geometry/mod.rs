//! The in-memory geometry model
//!
//! Geometries are plain values: every variant owns its coordinates, nothing is
//! shared, and there is no mutating API. A value is either built through the
//! constructors below or read back from exchange-format text with
//! [`crate::wkt::from_wkt`].

use crate::errors::ValidationError;
use crate::float_types::Real;
use std::fmt;

pub mod curve;

pub use curve::CurveSegment;

/// A 2D coordinate with an optional Z ordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub x: Real,
    pub y: Real,
    pub z: Option<Real>,
}

impl Coord {
    pub const fn xy(x: Real, y: Real) -> Self {
        Self { x, y, z: None }
    }

    pub const fn xyz(x: Real, y: Real, z: Real) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// True when both coordinates sit at the same planar position.
    #[inline]
    pub fn equals_2d(&self, other: &Coord) -> bool {
        self.x == other.x && self.y == other.y
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_none_or(Real::is_finite)
    }
}

impl From<(Real, Real)> for Coord {
    fn from((x, y): (Real, Real)) -> Self {
        Self::xy(x, y)
    }
}

impl From<(Real, Real, Real)> for Coord {
    fn from((x, y, z): (Real, Real, Real)) -> Self {
        Self::xyz(x, y, z)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.z {
            Some(z) => write!(f, "{} {} {}", self.x, self.y, z),
            None => write!(f, "{} {}", self.x, self.y),
        }
    }
}

/// The variant tag of a [`Geometry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    CircularString,
    CompoundCurve,
}

impl GeometryKind {
    /// Upper-case exchange-format keyword.
    pub const fn keyword(self) -> &'static str {
        match self {
            GeometryKind::Point => "POINT",
            GeometryKind::LineString => "LINESTRING",
            GeometryKind::Polygon => "POLYGON",
            GeometryKind::MultiPoint => "MULTIPOINT",
            GeometryKind::MultiLineString => "MULTILINESTRING",
            GeometryKind::MultiPolygon => "MULTIPOLYGON",
            GeometryKind::GeometryCollection => "GEOMETRYCOLLECTION",
            GeometryKind::CircularString => "CIRCULARSTRING",
            GeometryKind::CompoundCurve => "COMPOUNDCURVE",
        }
    }

    /// Case-insensitive lookup of a keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        const ALL: [GeometryKind; 9] = [
            GeometryKind::Point,
            GeometryKind::LineString,
            GeometryKind::Polygon,
            GeometryKind::MultiPoint,
            GeometryKind::MultiLineString,
            GeometryKind::MultiPolygon,
            GeometryKind::GeometryCollection,
            GeometryKind::CircularString,
            GeometryKind::CompoundCurve,
        ];
        ALL.into_iter()
            .find(|kind| kind.keyword().eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Point(Option<Coord>);

impl Point {
    pub const fn new(coord: Coord) -> Self {
        Self(Some(coord))
    }

    pub const fn empty() -> Self {
        Self(None)
    }

    pub const fn coord(&self) -> Option<Coord> {
        self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString(Vec<Coord>);

impl LineString {
    pub const fn new(coords: Vec<Coord>) -> Self {
        Self(coords)
    }

    pub fn coords(&self) -> &[Coord] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First and last vertex coincide in the plane. Empty lines are not closed.
    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => first.equals_2d(last),
            _ => false,
        }
    }
}

/// One exterior ring and any number of interior rings (holes).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    exterior: LineString,
    interiors: Vec<LineString>,
}

impl Polygon {
    pub const fn new(exterior: LineString, interiors: Vec<LineString>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub const fn exterior(&self) -> &LineString {
        &self.exterior
    }

    pub fn interiors(&self) -> &[LineString] {
        &self.interiors
    }

    /// Exterior ring followed by the interior rings.
    pub fn rings(&self) -> impl Iterator<Item = &LineString> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPoint(Vec<Point>);

impl MultiPoint {
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiLineString(Vec<LineString>);

impl MultiLineString {
    pub const fn new(lines: Vec<LineString>) -> Self {
        Self(lines)
    }

    pub fn line_strings(&self) -> &[LineString] {
        &self.0
    }

    /// Every member is closed. An empty multi-line is not closed.
    pub fn is_closed(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(LineString::is_closed)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPolygon(Vec<Polygon>);

impl MultiPolygon {
    pub const fn new(polygons: Vec<Polygon>) -> Self {
        Self(polygons)
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometryCollection(Vec<Geometry>);

impl GeometryCollection {
    pub const fn new(geometries: Vec<Geometry>) -> Self {
        Self(geometries)
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.0
    }
}

/// A sequence of circular arcs, each defined by three points that share
/// their end points with the neighbouring arcs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CircularString(Vec<Coord>);

impl CircularString {
    pub const fn new(coords: Vec<Coord>) -> Self {
        Self(coords)
    }

    pub fn coords(&self) -> &[Coord] {
        &self.0
    }
}

/// Contiguous linear and circular segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundCurve(Vec<CurveSegment>);

impl CompoundCurve {
    pub const fn new(segments: Vec<CurveSegment>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[CurveSegment] {
        &self.0
    }
}

/// A geometry value of any variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
    CircularString(CircularString),
    CompoundCurve(CompoundCurve),
}

macro_rules! impl_from_variant {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Geometry {
                fn from(value: $variant) -> Self {
                    Geometry::$variant(value)
                }
            }
        )*
    };
}

impl_from_variant!(
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    CircularString,
    CompoundCurve
);

impl Geometry {
    /// `GEOMETRYCOLLECTION EMPTY`
    pub const fn empty_collection() -> Self {
        Geometry::GeometryCollection(GeometryCollection::new(Vec::new()))
    }

    pub const fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
            Geometry::CircularString(_) => GeometryKind::CircularString,
            Geometry::CompoundCurve(_) => GeometryKind::CompoundCurve,
        }
    }

    /// A multi-part value is empty when every part is empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(p) => p.is_empty(),
            Geometry::LineString(ls) => ls.is_empty(),
            Geometry::Polygon(poly) => poly.is_empty(),
            Geometry::MultiPoint(mp) => mp.points().iter().all(Point::is_empty),
            Geometry::MultiLineString(mls) => mls.line_strings().iter().all(LineString::is_empty),
            Geometry::MultiPolygon(mp) => mp.polygons().iter().all(Polygon::is_empty),
            Geometry::GeometryCollection(gc) => gc.geometries().iter().all(Geometry::is_empty),
            Geometry::CircularString(cs) => cs.coords().is_empty(),
            Geometry::CompoundCurve(cc) => cc.segments().iter().all(|s| s.coords().is_empty()),
        }
    }

    pub fn has_z(&self) -> bool {
        self.coords().any(|c| c.z.is_some())
    }

    /// Number of component geometries: member count for multi-part values, 1 otherwise.
    pub fn num_geometries(&self) -> usize {
        match self {
            Geometry::MultiPoint(mp) => mp.points().len(),
            Geometry::MultiLineString(mls) => mls.line_strings().len(),
            Geometry::MultiPolygon(mp) => mp.polygons().len(),
            Geometry::GeometryCollection(gc) => gc.geometries().len(),
            _ => 1,
        }
    }

    /// Topological dimension of the highest-dimension non-empty part:
    /// 0 for points, 1 for curves, 2 for surfaces, `None` when empty.
    pub fn dimension(&self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Some(0),
            Geometry::LineString(_)
            | Geometry::MultiLineString(_)
            | Geometry::CircularString(_)
            | Geometry::CompoundCurve(_) => Some(1),
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Some(2),
            Geometry::GeometryCollection(gc) => {
                gc.geometries().iter().filter_map(Geometry::dimension).max()
            },
        }
    }

    /// Every vertex in storage order, depth first.
    pub fn coords(&self) -> Box<dyn Iterator<Item = Coord> + '_> {
        match self {
            Geometry::Point(p) => Box::new(p.coord().into_iter()),
            Geometry::LineString(ls) => Box::new(ls.coords().iter().copied()),
            Geometry::Polygon(poly) => {
                Box::new(poly.rings().flat_map(|r| r.coords().iter().copied()))
            },
            Geometry::MultiPoint(mp) => Box::new(mp.points().iter().filter_map(Point::coord)),
            Geometry::MultiLineString(mls) => Box::new(
                mls.line_strings()
                    .iter()
                    .flat_map(|ls| ls.coords().iter().copied()),
            ),
            Geometry::MultiPolygon(mp) => Box::new(
                mp.polygons()
                    .iter()
                    .flat_map(|poly| poly.rings().flat_map(|r| r.coords().iter().copied())),
            ),
            Geometry::GeometryCollection(gc) => {
                Box::new(gc.geometries().iter().flat_map(Geometry::coords))
            },
            Geometry::CircularString(cs) => Box::new(cs.coords().iter().copied()),
            Geometry::CompoundCurve(cc) => Box::new(
                cc.segments()
                    .iter()
                    .flat_map(|s| s.coords().iter().copied()),
            ),
        }
    }

    /// Checks the structural invariants of every variant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut dims = self.coords().map(|c| c.z.is_some());
        if let Some(first) = dims.next() {
            if dims.any(|has_z| has_z != first) {
                return Err(ValidationError::MixedDimensions);
            }
        }
        if let Some(bad) = self.coords().find(|c| !c.is_finite()) {
            return Err(ValidationError::InvalidCoordinate(bad));
        }
        self.validate_structure()
    }

    fn validate_structure(&self) -> Result<(), ValidationError> {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Ok(()),
            Geometry::LineString(ls) => validate_line(ls),
            Geometry::Polygon(poly) => validate_polygon(poly),
            Geometry::MultiLineString(mls) => {
                mls.line_strings().iter().try_for_each(validate_line)
            },
            Geometry::MultiPolygon(mp) => mp.polygons().iter().try_for_each(validate_polygon),
            Geometry::GeometryCollection(gc) => gc
                .geometries()
                .iter()
                .try_for_each(Geometry::validate_structure),
            Geometry::CircularString(cs) => validate_arc(cs.coords()),
            Geometry::CompoundCurve(cc) => {
                let mut previous_end: Option<Coord> = None;
                for segment in cc.segments() {
                    match segment {
                        CurveSegment::Line(ls) => validate_line(ls)?,
                        CurveSegment::Arc(cs) => validate_arc(cs.coords())?,
                    }
                    let coords = segment.coords();
                    if let (Some(end), Some(start)) = (previous_end, coords.first()) {
                        if end != *start {
                            return Err(ValidationError::DisconnectedCurve(*start));
                        }
                    }
                    if let Some(last) = coords.last() {
                        previous_end = Some(*last);
                    }
                }
                Ok(())
            },
        }
    }
}

fn validate_line(ls: &LineString) -> Result<(), ValidationError> {
    match ls.coords().len() {
        1 => Err(ValidationError::TooFewPoints {
            kind: "LineString",
            min: 2,
            found: 1,
        }),
        _ => Ok(()),
    }
}

fn validate_ring(ring: &LineString) -> Result<(), ValidationError> {
    let coords = ring.coords();
    match coords.len() {
        0 => Ok(()),
        found @ 1..=3 => Err(ValidationError::TooFewPoints {
            kind: "LinearRing",
            min: 4,
            found,
        }),
        _ => {
            let (first, last) = (coords[0], coords[coords.len() - 1]);
            if first == last {
                Ok(())
            } else {
                Err(ValidationError::RingNotClosed { first, last })
            }
        },
    }
}

fn validate_polygon(poly: &Polygon) -> Result<(), ValidationError> {
    poly.rings().try_for_each(validate_ring)
}

fn validate_arc(coords: &[Coord]) -> Result<(), ValidationError> {
    match coords.len() {
        0 => Ok(()),
        found @ (1 | 2) => Err(ValidationError::TooFewPoints {
            kind: "CircularString",
            min: 3,
            found,
        }),
        n if n % 2 == 0 => Err(ValidationError::EvenArcPoints(n)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(
            LineString::new(vec![
                Coord::xy(0.0, 0.0),
                Coord::xy(4.0, 0.0),
                Coord::xy(4.0, 4.0),
                Coord::xy(0.0, 4.0),
                Coord::xy(0.0, 0.0),
            ]),
            vec![],
        )
    }

    #[test]
    fn emptiness_is_per_variant() {
        assert!(Geometry::from(Point::empty()).is_empty());
        assert!(Geometry::empty_collection().is_empty());
        let members = vec![Point::empty().into(), LineString::default().into()];
        let nested = GeometryCollection::new(members);
        assert!(Geometry::from(nested).is_empty());
        assert!(!Geometry::from(square()).is_empty());
    }

    #[test]
    fn num_geometries_counts_members() {
        let mp = MultiPoint::new(vec![
            Point::new(Coord::xy(0.0, 0.0)),
            Point::new(Coord::xy(1.0, 1.0)),
        ]);
        assert_eq!(Geometry::from(mp).num_geometries(), 2);
        assert_eq!(Geometry::from(square()).num_geometries(), 1);
        assert_eq!(Geometry::empty_collection().num_geometries(), 0);
    }

    #[test]
    fn dimension_of_mixed_collection_is_highest_part() {
        let gc = GeometryCollection::new(vec![
            Point::new(Coord::xy(9.0, 9.0)).into(),
            square().into(),
        ]);
        assert_eq!(Geometry::from(gc).dimension(), Some(2));
        assert_eq!(Geometry::empty_collection().dimension(), None);
    }

    #[test]
    fn open_ring_is_rejected() {
        let open = Polygon::new(
            LineString::new(vec![
                Coord::xy(0.0, 0.0),
                Coord::xy(1.0, 0.0),
                Coord::xy(1.0, 1.0),
                Coord::xy(0.0, 1.0),
            ]),
            vec![],
        );
        assert!(matches!(
            Geometry::from(open).validate(),
            Err(ValidationError::RingNotClosed { .. })
        ));
    }

    #[test]
    fn single_point_line_is_rejected() {
        let line = LineString::new(vec![Coord::xy(0.0, 0.0)]);
        assert_eq!(
            Geometry::from(line).validate(),
            Err(ValidationError::TooFewPoints {
                kind: "LineString",
                min: 2,
                found: 1
            })
        );
    }

    #[test]
    fn mixed_dimensions_are_rejected() {
        let line = LineString::new(vec![Coord::xy(0.0, 0.0), Coord::xyz(1.0, 1.0, 1.0)]);
        assert_eq!(
            Geometry::from(line).validate(),
            Err(ValidationError::MixedDimensions)
        );
    }

    #[test]
    fn nan_is_rejected() {
        let p = Point::new(Coord::xy(Real::NAN, 0.0));
        assert!(matches!(
            Geometry::from(p).validate(),
            Err(ValidationError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn even_arc_is_rejected() {
        let arc = CircularString::new(vec![
            Coord::xy(0.0, 0.0),
            Coord::xy(1.0, 1.0),
            Coord::xy(2.0, 0.0),
            Coord::xy(3.0, 1.0),
        ]);
        assert_eq!(
            Geometry::from(arc).validate(),
            Err(ValidationError::EvenArcPoints(4))
        );
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(GeometryKind::from_keyword("polygon"), Some(GeometryKind::Polygon));
        assert_eq!(
            GeometryKind::from_keyword("GeometryCollection"),
            Some(GeometryKind::GeometryCollection)
        );
        assert_eq!(GeometryKind::from_keyword("TRIANGLE"), None);
    }
}
