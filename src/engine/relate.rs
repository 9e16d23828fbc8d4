//! DE-9IM relation, the named spatial predicates and simplicity tests.

use crate::engine::convert::GeoGeometry;
use crate::engine::linework::key;
use crate::float_types::Real;
use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::coordinate_position::CoordPos;
use geo::dimensions::Dimensions;
use geo::{Line, Relate};
use hashbrown::HashSet;

const POSITIONS: [CoordPos; 3] = [CoordPos::Inside, CoordPos::OnBoundary, CoordPos::Outside];

/// Intersection matrix in row-major order: interior, boundary, exterior of `a`
/// against the same of `b`.
pub fn matrix(a: &GeoGeometry, b: &GeoGeometry) -> String {
    let im = a.relate(b);
    let mut out = String::with_capacity(9);
    for lhs in POSITIONS {
        for rhs in POSITIONS {
            out.push(match im.get(lhs, rhs) {
                Dimensions::Empty => 'F',
                Dimensions::ZeroDimensional => '0',
                Dimensions::OneDimensional => '1',
                Dimensions::TwoDimensional => '2',
            });
        }
    }
    out
}

/// Matches a matrix against a pattern of `T`, `F`, `*`, `0`, `1` and `2`.
pub fn matches(matrix: &str, pattern: &str) -> bool {
    matrix.len() == 9
        && pattern.len() == 9
        && matrix.chars().zip(pattern.chars()).all(|(m, p)| match p {
            '*' => true,
            'T' => m != 'F',
            other => m == other,
        })
}

fn any_of(matrix: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| matches(matrix, p))
}

/// A named spatial predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    Equals,
    Disjoint,
    Intersects,
    Touches,
    Crosses,
    Within,
    Contains,
    Overlaps,
    Covers,
    CoveredBy,
}

impl Predicate {
    /// Evaluates the predicate on a matrix, given the dimensions of both inputs.
    pub fn holds(self, matrix: &str, dim_a: Option<u8>, dim_b: Option<u8>) -> bool {
        match self {
            // empty inputs are equal to each other
            Predicate::Equals => {
                (dim_a.is_none() && dim_b.is_none()) || matches(matrix, "T*F**FFF*")
            },
            Predicate::Disjoint => matches(matrix, "FF*FF****"),
            Predicate::Intersects => !matches(matrix, "FF*FF****"),
            Predicate::Touches => any_of(matrix, &["FT*******", "F**T*****", "F***T****"]),
            Predicate::Within => matches(matrix, "T*F**F***"),
            Predicate::Contains => matches(matrix, "T*****FF*"),
            Predicate::Covers => {
                any_of(matrix, &["T*****FF*", "*T****FF*", "***T**FF*", "****T*FF*"])
            },
            Predicate::CoveredBy => {
                any_of(matrix, &["T*F**F***", "*TF**F***", "**FT*F***", "**F*TF***"])
            },
            Predicate::Crosses => match (dim_a, dim_b) {
                (Some(1), Some(1)) => matches(matrix, "0********"),
                (Some(a), Some(b)) if a < b => matches(matrix, "T*T******"),
                (Some(a), Some(b)) if a > b => matches(matrix, "T*****T**"),
                _ => false,
            },
            Predicate::Overlaps => match (dim_a, dim_b) {
                (Some(1), Some(1)) => matches(matrix, "1*T***T**"),
                (Some(a), Some(b)) if a == b => matches(matrix, "T*T***T**"),
                _ => false,
            },
        }
    }
}

fn non_degenerate(ls: &geo::LineString<Real>) -> Vec<Line<Real>> {
    ls.lines().filter(|l| l.start != l.end).collect()
}

fn line_string_is_simple(ls: &geo::LineString<Real>) -> bool {
    let segments = non_degenerate(ls);
    let closed = ls.is_closed() && segments.len() > 2;
    let last = segments.len().saturating_sub(1);
    for i in 0..segments.len() {
        for j in i + 1..segments.len() {
            let Some(hit) = line_intersection(segments[i], segments[j]) else {
                continue;
            };
            let shared = if j == i + 1 {
                Some(segments[i].end)
            } else if closed && i == 0 && j == last {
                Some(segments[i].start)
            } else {
                None
            };
            match (hit, shared) {
                (LineIntersection::SinglePoint { intersection, .. }, Some(vertex))
                    if intersection == vertex => {},
                _ => return false,
            }
        }
    }
    true
}

fn endpoints(ls: &geo::LineString<Real>) -> [geo::Coord<Real>; 2] {
    [ls.0[0], ls.0[ls.0.len() - 1]]
}

fn multi_line_string_is_simple(mls: &geo::MultiLineString<Real>) -> bool {
    let lines: Vec<&geo::LineString<Real>> = mls.iter().filter(|ls| !ls.0.is_empty()).collect();
    if !lines.iter().all(|ls| line_string_is_simple(ls)) {
        return false;
    }
    for (i, a) in lines.iter().enumerate() {
        for b in &lines[i + 1..] {
            let ends_a = endpoints(a);
            let ends_b = endpoints(b);
            for sa in non_degenerate(a) {
                for sb in non_degenerate(b) {
                    match line_intersection(sa, sb) {
                        None => {},
                        Some(LineIntersection::SinglePoint { intersection, .. })
                            if ends_a.contains(&intersection)
                                && ends_b.contains(&intersection) => {},
                        Some(_) => return false,
                    }
                }
            }
        }
    }
    true
}

/// No self-intersection other than at permitted shared vertices.
pub fn is_simple(geometry: &GeoGeometry) -> bool {
    match geometry {
        geo::Geometry::Point(_) | geo::Geometry::Line(_) => true,
        geo::Geometry::MultiPoint(mp) => {
            let mut seen = HashSet::new();
            mp.iter().all(|p| seen.insert(key(p.0)))
        },
        geo::Geometry::LineString(ls) => line_string_is_simple(ls),
        geo::Geometry::MultiLineString(mls) => multi_line_string_is_simple(mls),
        geo::Geometry::Polygon(poly) => {
            std::iter::once(poly.exterior())
                .chain(poly.interiors())
                .all(line_string_is_simple)
        },
        geo::Geometry::MultiPolygon(mp) => mp
            .iter()
            .all(|poly| is_simple(&geo::Geometry::Polygon(poly.clone()))),
        geo::Geometry::GeometryCollection(gc) => gc.iter().all(is_simple),
        geo::Geometry::Rect(_) | geo::Geometry::Triangle(_) => true,
    }
}

/// A closed, simple, non-empty line string.
pub fn is_ring(geometry: &GeoGeometry) -> bool {
    match geometry {
        geo::Geometry::LineString(ls) => {
            !ls.0.is_empty() && ls.is_closed() && line_string_is_simple(ls)
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::convert::to_geo;
    use crate::wkt::from_wkt;

    fn geo(text: &str) -> GeoGeometry {
        to_geo(&from_wkt(text).unwrap())
    }

    const SQUARE: &str = "POLYGON ((0 0, 4 0, 4 4, 0 4, 0 0))";

    #[test]
    fn point_inside_square() {
        let im = matrix(&geo("POINT (1 1)"), &geo(SQUARE));
        assert_eq!(im, "0FFFFF212");
        assert!(Predicate::Within.holds(&im, Some(0), Some(2)));
        assert!(Predicate::CoveredBy.holds(&im, Some(0), Some(2)));
        assert!(!Predicate::Touches.holds(&im, Some(0), Some(2)));
    }

    #[test]
    fn pattern_matching() {
        assert!(matches("212101212", "T*T***T**"));
        assert!(!matches("FF2FF1212", "T********"));
        assert!(!matches("FF2", "FF*"));
    }

    #[test]
    fn crossing_lines() {
        let im = matrix(&geo("LINESTRING (0 0, 2 2)"), &geo("LINESTRING (0 2, 2 0)"));
        assert!(Predicate::Crosses.holds(&im, Some(1), Some(1)));
        assert!(!Predicate::Overlaps.holds(&im, Some(1), Some(1)));
    }

    #[test]
    fn empty_inputs_are_equal() {
        assert!(Predicate::Equals.holds("FFFFFFFF2", None, None));
        assert!(!Predicate::Equals.holds("FFFFFF0F2", None, Some(0)));
    }

    #[test]
    fn bow_tie_is_not_simple() {
        assert!(!is_simple(&geo("LINESTRING (0 0, 2 2, 2 0, 0 2)")));
        assert!(is_simple(&geo("LINESTRING (0 0, 2 0, 2 2)")));
        assert!(is_simple(&geo("LINESTRING (0 0, 2 0, 2 2, 0 0)")));
        assert!(!is_simple(&geo("MULTIPOINT ((1 1), (1 1))")));
    }

    #[test]
    fn lines_meeting_at_ends_are_simple() {
        assert!(is_simple(&geo("MULTILINESTRING ((0 0, 1 1), (1 1, 2 0))")));
        assert!(!is_simple(&geo("MULTILINESTRING ((0 0, 2 2), (0 2, 2 0))")));
    }

    #[test]
    fn rings() {
        assert!(is_ring(&geo("LINESTRING (0 0, 1 0, 1 1, 0 0)")));
        assert!(!is_ring(&geo("LINESTRING (0 0, 1 0, 1 1)")));
        assert!(!is_ring(&geo(SQUARE)));
    }
}
