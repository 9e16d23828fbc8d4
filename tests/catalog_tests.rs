mod support;

use geomops::{GeometryError, GeometryKind, GeometryOps, ParseError, from_wkt, to_wkt};
use support::{A, B, EPSILON, SQUARE, approx_eq, catalog, wkt};

#[test]
fn area_of_square() {
    assert_eq!(catalog().area(&wkt(SQUARE)).unwrap(), 16.0);
    assert_eq!(catalog().area(&wkt("LINESTRING (0 0, 1 1)")).unwrap(), 0.0);
}

#[test]
fn distance_between_points() {
    assert_eq!(catalog().distance(&wkt("POINT (0 0)"), &wkt("POINT (3 4)")).unwrap(), 5.0);
}

#[test]
fn within_square() {
    let c = catalog();
    assert!(c.within(&wkt("POINT (1 1)"), &wkt(SQUARE)).unwrap());
    assert!(!c.within(&wkt("POINT (5 5)"), &wkt(SQUARE)).unwrap());
}

#[test]
fn malformed_text_is_a_parse_error() {
    let err: ParseError = from_wkt("POLYGON((0 0,1 1)").unwrap_err();
    assert_eq!(err.offset, "POLYGON((0 0,1 1)".len());
    assert!(matches!(GeometryError::from(err), GeometryError::Parse(_)));
}

#[test]
fn length_and_structure() {
    let c = catalog();
    let line = wkt("LINESTRING Z (0 0 1, 3 4 1)");
    assert!(approx_eq(c.length(&line).unwrap(), 5.0, EPSILON));
    assert!(c.has_z(&line).unwrap());
    assert!(!c.has_z(&wkt(SQUARE)).unwrap());
    assert!(!c.is_closed(&line).unwrap());
    assert!(c.is_closed(&wkt("LINESTRING (0 0, 1 0, 1 1, 0 0)")).unwrap());
    assert!(matches!(
        c.is_closed(&wkt(SQUARE)),
        Err(GeometryError::Engine { operation: "IsClosed", .. })
    ));
}

#[test]
fn counting_and_emptiness() {
    let c = catalog();
    assert_eq!(c.n_geometry(&wkt("MULTIPOINT ((0 0), (1 1), (2 2))")).unwrap(), 3);
    assert_eq!(c.n_geometry(&wkt(SQUARE)).unwrap(), 1);
    assert!(c.is_empty(&wkt("GEOMETRYCOLLECTION EMPTY")).unwrap());
    assert!(!c.is_empty(&wkt("POINT (0 0)")).unwrap());
}

#[test]
fn simplicity_and_rings() {
    let c = catalog();
    assert!(c.is_simple(&wkt("LINESTRING (0 0, 1 0, 1 1)")).unwrap());
    assert!(!c.is_simple(&wkt("LINESTRING (0 0, 2 2, 2 0, 0 2)")).unwrap());
    assert!(c.is_ring(&wkt("LINESTRING (0 0, 1 0, 1 1, 0 0)")).unwrap());
    assert!(!c.is_ring(&wkt("LINESTRING (0 0, 2 2, 2 0, 0 2, 0 0)")).unwrap());
}

#[test]
fn derived_geometries() {
    let c = catalog();
    assert_eq!(to_wkt(&c.centroid(&wkt(SQUARE)).unwrap()), "POINT (2 2)");
    assert_eq!(
        to_wkt(&c.envelope(&wkt("LINESTRING (1 1, 3 2)")).unwrap()),
        "POLYGON ((1 1, 1 2, 3 2, 3 1, 1 1))"
    );
    assert_eq!(
        to_wkt(&c.boundary(&wkt("LINESTRING (0 0, 5 5)")).unwrap()),
        "MULTIPOINT ((0 0), (5 5))"
    );
    assert_eq!(to_wkt(&c.centroid(&wkt("POINT EMPTY")).unwrap()), "GEOMETRYCOLLECTION EMPTY");

    let hull = c.convex_hull(&wkt("MULTIPOINT ((0 0), (4 0), (4 4), (0 4), (1 2))")).unwrap();
    assert_eq!(hull.kind(), GeometryKind::Polygon);
    assert_eq!(c.area(&hull).unwrap(), 16.0);

    let inside = c.point_on_surface(&wkt(SQUARE)).unwrap();
    assert!(c.intersects(&inside, &wkt(SQUARE)).unwrap());
}

#[test]
fn relate_matrix() {
    let c = catalog();
    assert_eq!(c.relate(&wkt("POINT (1 1)"), &wkt(SQUARE)).unwrap(), "0FFFFF212");
    assert_eq!(c.relate(&wkt(A), &wkt(B)).unwrap(), "212101212");
}

#[test]
fn named_predicates() {
    let c = catalog();
    let (a, b, square) = (wkt(A), wkt(B), wkt(SQUARE));
    assert!(c.overlaps(&a, &b).unwrap());
    assert!(!c.overlaps(&a, &square).unwrap());
    assert!(c.covers(&square, &a).unwrap());
    assert!(c.covered_by(&a, &square).unwrap());
    assert!(c.contains(&square, &wkt("POINT (2 2)")).unwrap());
    assert!(c.crosses(&wkt("LINESTRING (-1 1, 5 1)"), &square).unwrap());
    assert!(c.touches(&wkt("POINT (4 4)"), &square).unwrap());
    assert!(c.disjoint(&wkt("POINT (9 9)"), &square).unwrap());
    assert!(c.intersects(&a, &b).unwrap());
    assert!(c.equals(&square, &wkt("POLYGON ((4 4, 0 4, 0 0, 4 0, 4 4))")).unwrap());
}

#[test]
fn exact_equality() {
    let c = catalog();
    let line = wkt("LINESTRING (0 0, 1 1)");
    assert!(c.equals_exact(&line, &wkt("LINESTRING (0 0, 1 1.01)"), 0.1).unwrap());
    assert!(!c.equals_exact(&line, &wkt("LINESTRING (1 1, 0 0)"), 0.1).unwrap());
}

#[test]
fn overlay_results() {
    let c = catalog();
    let (a, b) = (wkt(A), wkt(B));
    assert!(approx_eq(c.area(&c.intersection(&a, &b).unwrap()).unwrap(), 1.0, EPSILON));
    assert!(approx_eq(c.area(&c.union(&a, &b).unwrap()).unwrap(), 7.0, EPSILON));
    assert!(approx_eq(c.area(&c.difference(&a, &b).unwrap()).unwrap(), 3.0, EPSILON));
    assert!(approx_eq(c.area(&c.sym_difference(&a, &b).unwrap()).unwrap(), 6.0, EPSILON));

    let dissolved = c
        .unary_union(&wkt(
            "MULTIPOLYGON (((0 0, 2 0, 2 2, 0 2, 0 0)), ((1 1, 3 1, 3 3, 1 3, 1 1)))",
        ))
        .unwrap();
    assert_eq!(dissolved.kind(), GeometryKind::Polygon);
}

#[test]
fn line_work() {
    let c = catalog();
    assert_eq!(
        to_wkt(&c.line_merge(&wkt("MULTILINESTRING ((0 0, 1 0), (2 0, 1 0))")).unwrap()),
        "LINESTRING (0 0, 1 0, 2 0)"
    );
    assert_eq!(
        c.shared_paths(&wkt("LINESTRING (0 0, 10 0)"), &wkt("LINESTRING (3 0, 5 0)")).unwrap(),
        "GEOMETRYCOLLECTION (MULTILINESTRING ((3 0, 5 0)), MULTILINESTRING EMPTY)"
    );
    assert_eq!(
        to_wkt(&c.unique_points(&wkt("LINESTRING Z (0 0 1, 1 1 2, 0 0 1)")).unwrap()),
        "MULTIPOINT Z ((0 0 1), (1 1 2))"
    );
    assert_eq!(
        to_wkt(&c.snap(&wkt("POINT (0.05 0)"), &wkt("POINT (0 0)"), 0.1).unwrap()),
        "POINT (0 0)"
    );
}

#[test]
fn simplification() {
    let c = catalog();
    let wiggly = wkt("LINESTRING (0 0, 1 0.05, 2 -0.05, 3 0.05, 4 0)");
    assert_eq!(to_wkt(&c.simplify(&wiggly, 0.1).unwrap()), "LINESTRING (0 0, 4 0)");
    let kept = c.simplify_preserve_topology(&wkt(SQUARE), 0.1).unwrap();
    assert_eq!(c.area(&kept).unwrap(), 16.0);
}

#[test]
fn hausdorff_distances() {
    let c = catalog();
    let a = wkt("LINESTRING (0 0, 10 0)");
    let b = wkt("LINESTRING (0 1, 10 1)");
    assert!(approx_eq(c.hausdorff_distance(&a, &b).unwrap(), 1.0, EPSILON));
    assert!(approx_eq(c.hausdorff_distance_densify(&a, &b, 0.5).unwrap(), 1.0, EPSILON));
    assert!(matches!(
        c.hausdorff_distance_densify(&a, &b, 2.0),
        Err(GeometryError::Engine { operation: "HausdorffDistanceDensify", .. })
    ));
}

#[test]
fn hausdorff_with_unequal_vertex_spacing() {
    let c = catalog();
    let a = wkt("LINESTRING (0 0, 10 0)");
    let b = wkt("LINESTRING (0 0.1, 3 0.1, 10 0.1)");
    assert!(approx_eq(c.hausdorff_distance(&a, &b).unwrap(), 0.1, EPSILON));
    assert!(approx_eq(c.hausdorff_distance(&b, &a).unwrap(), 0.1, EPSILON));
    assert!(approx_eq(c.hausdorff_distance_densify(&a, &b, 0.25).unwrap(), 0.1, EPSILON));
}

#[test]
fn tiny_densify_fraction_is_an_error() {
    let c = catalog();
    let a = wkt("LINESTRING (0 0, 10 0)");
    let b = wkt("LINESTRING (0 1, 10 1)");
    assert!(matches!(
        c.hausdorff_distance_densify(&a, &b, 1e-15),
        Err(GeometryError::Engine { operation: "HausdorffDistanceDensify", .. })
    ));
}

#[test]
fn empty_geometries_are_equal() {
    let c = catalog();
    assert!(c.equals(&wkt("POINT EMPTY"), &wkt("POINT EMPTY")).unwrap());
    assert!(c.equals(&wkt("POINT EMPTY"), &wkt("GEOMETRYCOLLECTION EMPTY")).unwrap());
    assert!(!c.equals(&wkt("POINT EMPTY"), &wkt("POINT (0 0)")).unwrap());
}

#[test]
fn snapping_moves_arc_control_points() {
    let snapped = catalog()
        .snap(&wkt("CIRCULARSTRING (0.05 0, 1 1, 2 0)"), &wkt("POINT (0 0)"), 0.1)
        .unwrap();
    assert_eq!(to_wkt(&snapped), "CIRCULARSTRING (0 0, 1 1, 2 0)");
}

#[test]
fn curves_are_accepted() {
    let c = catalog();
    let arc = wkt("CIRCULARSTRING (-1 0, 0 1, 1 0)");
    assert!(approx_eq(c.length(&arc).unwrap(), std::f64::consts::PI, 1e-3));
    let env = c.envelope(&arc).unwrap();
    assert!(approx_eq(c.area(&env).unwrap(), 2.0, 1e-6));
}
