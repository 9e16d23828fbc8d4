// main.rs
//
// Walk through the operation catalog on a few fixed inputs and log each result.
// Set `RUST_LOG=trace` to also see the per-dispatch traces.

use geomops::{Geometry, GeometryOps, OperationCatalog, from_wkt};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("a global tracing subscriber is already installed");
    }
}

fn main() {
    setup_logging();

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> geomops::errors::Result<()> {
    let catalog = OperationCatalog::new();

    let a: Geometry = from_wkt("POLYGON ((0 0, 2 0, 2 2, 0 2, 0 0))")?;
    let b: Geometry = from_wkt("POLYGON ((1 1, 3 1, 3 3, 1 3, 1 1))")?;
    let line: Geometry = from_wkt("LINESTRING (-1 1, 4 1)")?;
    let origin: Geometry = from_wkt("POINT (0 0)")?;

    // 1) measures
    info!("area(a) = {}", catalog.area(&a)?);
    info!("length(line) = {}", catalog.length(&line)?);
    info!("distance(origin, b) = {}", catalog.distance(&origin, &b)?);
    info!("hausdorff(a, b) = {}", catalog.hausdorff_distance(&a, &b)?);

    // 2) derived geometries
    info!("boundary(a) = {}", catalog.boundary(&a)?);
    info!("centroid(b) = {}", catalog.centroid(&b)?);
    info!("envelope(line) = {}", catalog.envelope(&line)?);
    info!("convex_hull(line) = {}", catalog.convex_hull(&line)?);
    info!("point_on_surface(a) = {}", catalog.point_on_surface(&a)?);

    // 3) overlay
    info!("intersection(a, b) = {}", catalog.intersection(&a, &b)?);
    info!("union(a, b) = {}", catalog.union(&a, &b)?);
    info!("difference(a, b) = {}", catalog.difference(&a, &b)?);
    info!("sym_difference(a, b) = {}", catalog.sym_difference(&a, &b)?);
    info!("intersection(line, a) = {}", catalog.intersection(&line, &a)?);

    // 4) predicates and the intersection matrix
    info!("relate(a, b) = {}", catalog.relate(&a, &b)?);
    info!("overlaps(a, b) = {}", catalog.overlaps(&a, &b)?);
    info!("crosses(line, a) = {}", catalog.crosses(&line, &a)?);
    info!("touches(origin, a) = {}", catalog.touches(&origin, &a)?);

    // 5) buffer, falling back gracefully when the engine was built without it
    match catalog.buffer(&origin, 1.0, 8) {
        Ok(disc) => info!("area(buffer(origin, 1)) = {}", catalog.area(&disc)?),
        Err(e) => info!("buffer unavailable: {e}"),
    }

    // 6) errors are values
    match from_wkt("POLYGON((0 0,1 1)") {
        Ok(g) => info!("unexpectedly parsed {g}"),
        Err(e) => info!("malformed text rejected: {e}"),
    }

    Ok(())
}
