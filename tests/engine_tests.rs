mod support;

use geomops::engine::EngineResult;
use geomops::float_types::Real;
use geomops::{Engine, EngineError, GeoEngine, GeometryError, GeometryOps, OperationCatalog};
use support::{SQUARE, wkt};

/// Only measures areas; everything else is left to the trait defaults.
struct AreaOnly;

impl Engine for AreaOnly {
    fn area(&self, wkt: &str) -> EngineResult<Real> {
        GeoEngine::new().area(wkt)
    }
}

/// Returns text that is not a geometry.
struct Garbage;

impl Engine for Garbage {
    fn envelope(&self, _wkt: &str) -> EngineResult<String> {
        Ok("BOX (0 0, 1 1)".to_string())
    }
}

#[test]
fn partial_engine_reports_missing_operations() {
    let catalog = OperationCatalog::with_engine(AreaOnly);
    assert_eq!(catalog.area(&wkt(SQUARE)).unwrap(), 16.0);
    assert_eq!(
        catalog.relate(&wkt(SQUARE), &wkt(SQUARE)),
        Err(GeometryError::UnsupportedOperation("Relate"))
    );
    assert_eq!(
        catalog.buffer(&wkt(SQUARE), 1.0, 8),
        Err(GeometryError::UnsupportedOperation("Buffer"))
    );
}

#[test]
fn malformed_engine_output_keeps_the_text() {
    let catalog = OperationCatalog::with_engine(Garbage);
    match catalog.envelope(&wkt(SQUARE)) {
        Err(GeometryError::MalformedResult { operation, wkt, .. }) => {
            assert_eq!(operation, "Envelope");
            assert_eq!(wkt, "BOX (0 0, 1 1)");
        },
        other => panic!("expected a malformed result, got {other:?}"),
    }
}

#[test]
fn engine_failures_carry_their_message() {
    let catalog = OperationCatalog::new();
    let err = catalog
        .boundary(&wkt("GEOMETRYCOLLECTION (POINT (0 0))"))
        .unwrap_err();
    assert_eq!(
        err,
        GeometryError::Engine {
            operation: "Boundary",
            message: "Operation not supported by GeometryCollection".to_string(),
        }
    );
}

#[test]
fn engine_rejects_unreadable_text_directly() {
    let err = GeoEngine::new().length("LINESTRING (0 0, 1").unwrap_err();
    assert!(matches!(err, EngineError::Failed { operation: "Length", .. }));
}

#[test]
fn catalog_is_shareable_across_threads() {
    let catalog = std::sync::Arc::new(OperationCatalog::new());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let catalog = catalog.clone();
            std::thread::spawn(move || {
                let p = wkt(&format!("POINT ({i} 0)"));
                catalog.distance(&p, &wkt("POINT (0 0)")).unwrap()
            })
        })
        .collect();
    let distances: Vec<Real> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(distances, vec![0.0, 1.0, 2.0, 3.0]);
}
