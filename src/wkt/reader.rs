use crate::errors::{ParseError, ParseErrorKind};
use crate::float_types::Real;
use crate::geometry::{
    CircularString, CompoundCurve, Coord, CurveSegment, Geometry, GeometryCollection,
    GeometryKind, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{alpha1, char, multispace0},
    combinator::{map, value},
    error::ErrorKind,
    multi::{many_m_n, separated_list1},
    number::complete::double,
    sequence::delimited,
};

/// Parser error carrying the unconsumed input so the offset can be recovered.
#[derive(Debug)]
struct WktError<'a> {
    input: &'a str,
    kind: ParseErrorKind,
}

impl<'a> nom::error::ParseError<&'a str> for WktError<'a> {
    fn from_error_kind(input: &'a str, _kind: ErrorKind) -> Self {
        Self {
            input,
            kind: ParseErrorKind::Syntax("well-formed geometry text"),
        }
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

type Res<'a, O> = IResult<&'a str, O, WktError<'a>>;

fn failure<'a, O>(input: &'a str, kind: ParseErrorKind) -> Res<'a, O> {
    Err(nom::Err::Failure(WktError { input, kind }))
}

pub(super) fn read(text: &str) -> Result<Geometry, ParseError> {
    let offset_of = |rest: &str| text.len() - rest.len();
    let (rest, geometry) = match geometry(text) {
        Ok(parsed) => parsed,
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
            return Err(ParseError::new(offset_of(e.input), e.kind));
        },
        Err(nom::Err::Incomplete(_)) => {
            return Err(ParseError::new(text.len(), ParseErrorKind::Syntax("more input")));
        },
    };
    if !rest.is_empty() {
        return Err(ParseError::new(offset_of(rest), ParseErrorKind::TrailingInput));
    }
    geometry
        .validate()
        .map_err(|e| ParseError::new(0, ParseErrorKind::Invalid(e)))?;
    Ok(geometry)
}

/// Wraps `inner` so that surrounding whitespace is skipped.
fn ws<'a, O>(inner: impl FnMut(&'a str) -> Res<'a, O>) -> impl FnMut(&'a str) -> Res<'a, O> {
    delimited(multispace0, inner, multispace0)
}

/// Replaces a recoverable error from `inner` with "expected `what`".
fn expect<'a, O>(
    what: &'static str,
    mut inner: impl FnMut(&'a str) -> Res<'a, O>,
) -> impl FnMut(&'a str) -> Res<'a, O> {
    move |input| {
        inner(input).map_err(|e| match e {
            nom::Err::Error(err) => nom::Err::Error(WktError {
                input: err.input,
                kind: ParseErrorKind::Syntax(what),
            }),
            other => other,
        })
    }
}

fn open(input: &str) -> Res<'_, char> {
    expect("'('", ws(char('(')))(input)
}

fn close(input: &str) -> Res<'_, char> {
    expect("')' or ','", ws(char(')')))(input)
}

fn comma(input: &str) -> Res<'_, char> {
    ws(char(','))(input)
}

fn empty(input: &str) -> Res<'_, ()> {
    value((), ws(tag_no_case("EMPTY")))(input)
}

fn number(input: &str) -> Res<'_, Real> {
    expect("a number", ws(double))(input)
}

fn coord(input: &str) -> Res<'_, Coord> {
    let (rest, ordinates) = many_m_n(2, 4, number)(input)?;
    match ordinates.as_slice() {
        [x, y] => Ok((rest, Coord::xy(*x, *y))),
        [x, y, z] => Ok((rest, Coord::xyz(*x, *y, *z))),
        _ => failure(input, ParseErrorKind::UnsupportedDimension("ZM".to_string())),
    }
}

/// `(x y, x y, ...)`
fn coord_list(input: &str) -> Res<'_, Vec<Coord>> {
    delimited(open, separated_list1(comma, coord), close)(input)
}

/// `EMPTY` or `(x y, ...)`
fn line_body(input: &str) -> Res<'_, Vec<Coord>> {
    alt((value(Vec::new(), empty), coord_list))(input)
}

fn point_body(input: &str) -> Res<'_, Point> {
    alt((
        value(Point::empty(), empty),
        map(delimited(open, coord, close), Point::new),
    ))(input)
}

fn polygon_body(input: &str) -> Res<'_, Polygon> {
    alt((
        value(Polygon::empty(), empty),
        map(
            delimited(open, separated_list1(comma, map(line_body, LineString::new)), close),
            |mut rings| {
                let exterior = rings.remove(0);
                Polygon::new(exterior, rings)
            },
        ),
    ))(input)
}

/// Members are either `(x y)`, a bare `x y`, or `EMPTY`.
fn multi_point_body(input: &str) -> Res<'_, MultiPoint> {
    let member = alt((point_body, map(coord, Point::new)));
    alt((
        value(MultiPoint::default(), empty),
        map(delimited(open, separated_list1(comma, member), close), MultiPoint::new),
    ))(input)
}

fn multi_line_body(input: &str) -> Res<'_, MultiLineString> {
    alt((
        value(MultiLineString::default(), empty),
        map(
            delimited(open, separated_list1(comma, map(line_body, LineString::new)), close),
            MultiLineString::new,
        ),
    ))(input)
}

fn multi_polygon_body(input: &str) -> Res<'_, MultiPolygon> {
    alt((
        value(MultiPolygon::default(), empty),
        map(delimited(open, separated_list1(comma, polygon_body), close), MultiPolygon::new),
    ))(input)
}

fn collection_body(input: &str) -> Res<'_, GeometryCollection> {
    alt((
        value(GeometryCollection::default(), empty),
        map(delimited(open, separated_list1(comma, geometry), close), GeometryCollection::new),
    ))(input)
}

/// A compound curve member: a bare coordinate list, or a tagged line or arc.
fn curve_segment(input: &str) -> Res<'_, CurveSegment> {
    if let Ok((rest, coords)) = coord_list(input) {
        return Ok((rest, CurveSegment::Line(LineString::new(coords))));
    }
    let (rest, member) = geometry(input)?;
    match member {
        Geometry::LineString(ls) => Ok((rest, CurveSegment::Line(ls))),
        Geometry::CircularString(cs) => Ok((rest, CurveSegment::Arc(cs))),
        _ => failure(input, ParseErrorKind::Syntax("a LINESTRING or CIRCULARSTRING member")),
    }
}

fn compound_body(input: &str) -> Res<'_, CompoundCurve> {
    alt((
        value(CompoundCurve::default(), empty),
        map(delimited(open, separated_list1(comma, curve_segment), close), CompoundCurve::new),
    ))(input)
}

/// `KEYWORD [Z] (EMPTY | body)`
fn geometry(input: &str) -> Res<'_, Geometry> {
    let (after_keyword, word) = expect("a geometry keyword", ws(alpha1))(input)?;
    let Some(kind) = GeometryKind::from_keyword(word) else {
        return failure(input, ParseErrorKind::UnknownKeyword(word.to_string()));
    };

    // optional dimension tag; `EMPTY` is also alphabetic, so leave it for the body
    let mut rest = after_keyword;
    let mut tagged_z = false;
    if let Ok((after_tag, tag)) = ws(alpha1::<&str, WktError>)(after_keyword) {
        if tag.eq_ignore_ascii_case("Z") {
            tagged_z = true;
            rest = after_tag;
        } else if tag.eq_ignore_ascii_case("M") || tag.eq_ignore_ascii_case("ZM") {
            let kind = ParseErrorKind::UnsupportedDimension(tag.to_ascii_uppercase());
            return failure(after_keyword, kind);
        } else if !tag.eq_ignore_ascii_case("EMPTY") {
            return failure(after_keyword, ParseErrorKind::Syntax("'(' or EMPTY"));
        }
    }

    let (rest, geometry) = match kind {
        GeometryKind::Point => map(point_body, Geometry::Point)(rest)?,
        GeometryKind::LineString => {
            map(line_body, |c| Geometry::LineString(LineString::new(c)))(rest)?
        },
        GeometryKind::CircularString => {
            map(line_body, |c| Geometry::CircularString(CircularString::new(c)))(rest)?
        },
        GeometryKind::Polygon => map(polygon_body, Geometry::Polygon)(rest)?,
        GeometryKind::MultiPoint => map(multi_point_body, Geometry::MultiPoint)(rest)?,
        GeometryKind::MultiLineString => map(multi_line_body, Geometry::MultiLineString)(rest)?,
        GeometryKind::MultiPolygon => map(multi_polygon_body, Geometry::MultiPolygon)(rest)?,
        GeometryKind::GeometryCollection => {
            map(collection_body, Geometry::GeometryCollection)(rest)?
        },
        GeometryKind::CompoundCurve => map(compound_body, Geometry::CompoundCurve)(rest)?,
    };

    if tagged_z && !geometry.is_empty() && !geometry.has_z() {
        return failure(after_keyword, ParseErrorKind::Syntax("three ordinates after the Z tag"));
    }
    Ok((rest, geometry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use crate::wkt::{from_wkt, to_wkt};

    #[test]
    fn reads_keywords_in_any_case() {
        let g = from_wkt("point(1 2)").unwrap();
        assert_eq!(g, Geometry::Point(Point::new(Coord::xy(1.0, 2.0))));
        let g = from_wkt("  LineString ( 0 0 ,1  1 )  ").unwrap();
        assert_eq!(g.kind(), GeometryKind::LineString);
    }

    #[test]
    fn reads_scientific_notation() {
        let g = from_wkt("POINT (1e3 -2.5E-2)").unwrap();
        assert_eq!(g, Geometry::Point(Point::new(Coord::xy(1000.0, -0.025))));
    }

    #[test]
    fn reads_both_multipoint_forms() {
        let a = from_wkt("MULTIPOINT ((1 2), (3 4))").unwrap();
        let b = from_wkt("MULTIPOINT (1 2, 3 4)").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.num_geometries(), 2);
    }

    #[test]
    fn reads_z_tagged_and_untagged() {
        let a = from_wkt("POINT Z (1 2 3)").unwrap();
        let b = from_wkt("POINT (1 2 3)").unwrap();
        assert_eq!(a, b);
        assert!(a.has_z());
    }

    #[test]
    fn reads_empty_variants() {
        for text in [
            "POINT EMPTY",
            "LINESTRING EMPTY",
            "POLYGON EMPTY",
            "MULTIPOINT EMPTY",
            "MULTILINESTRING EMPTY",
            "MULTIPOLYGON EMPTY",
            "GEOMETRYCOLLECTION EMPTY",
            "CIRCULARSTRING EMPTY",
            "COMPOUNDCURVE EMPTY",
        ] {
            let g = from_wkt(text).unwrap();
            assert!(g.is_empty(), "{text}");
            assert_eq!(to_wkt(&g), text);
        }
    }

    #[test]
    fn reads_nested_collection() {
        let text = concat!(
            "GEOMETRYCOLLECTION (POINT (1 1), GEOMETRYCOLLECTION (LINESTRING (0 0, 1 1)), ",
            "MULTIPOLYGON (((0 0, 1 0, 1 1, 0 0)), EMPTY))"
        );
        let g = from_wkt(text).unwrap();
        assert_eq!(g.num_geometries(), 3);
        assert_eq!(to_wkt(&g), text);
    }

    #[test]
    fn reads_compound_curve() {
        let text = "COMPOUNDCURVE ((0 0, 1 0), CIRCULARSTRING (1 0, 2 1, 3 0))";
        let g = from_wkt(text).unwrap();
        assert_eq!(to_wkt(&g), text);
    }

    #[test]
    fn unbalanced_parens_are_a_parse_error() {
        let err = from_wkt("POLYGON((0 0,1 1)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Syntax("')' or ','"));
        assert_eq!(err.offset, "POLYGON((0 0,1 1)".len());
    }

    #[test]
    fn unknown_keyword() {
        let err = from_wkt("TRIANGLE ((0 0, 1 0, 0 1, 0 0))").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownKeyword("TRIANGLE".to_string()));
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn non_numeric_coordinate() {
        let err = from_wkt("POINT (1 x)").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::Syntax(_)));
    }

    #[test]
    fn measured_coordinates_are_rejected() {
        let err = from_wkt("POINT M (1 2 3)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnsupportedDimension("M".to_string()));
        let err = from_wkt("POINT (1 2 3 4)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnsupportedDimension("ZM".to_string()));
    }

    #[test]
    fn open_ring_is_rejected() {
        let err = from_wkt("POLYGON ((0 0, 1 0, 1 1, 0 1))").unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::Invalid(ValidationError::RingNotClosed { .. })
        ));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        let err = from_wkt("POINT (1 2) POINT (3 4)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TrailingInput);
        assert_eq!(err.offset, 12);
    }

    #[test]
    fn non_finite_ordinates_are_rejected() {
        assert!(from_wkt("POINT (inf 1)").is_err());
        assert!(from_wkt("POINT (1 NaN)").is_err());
    }

    #[test]
    fn garbage_never_panics() {
        let garbage = [
            "",
            "(",
            ")",
            "POINT",
            "POINT (",
            "POINT ()",
            "MULTIPOLYGON (((",
            "GEOMETRYCOLLECTION (POINT (1 2),",
            "POLYGON ((0 0, 1 0, 1 1, 0 0)) )",
            "LINESTRING (0 0, 1 1,)",
        ];
        for text in garbage {
            assert!(from_wkt(text).is_err(), "{text:?} should not parse");
        }
    }
}
