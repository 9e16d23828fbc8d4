//! **2D geometry operations** behind a Well-Known Text boundary.
//!
//! Every operation of the [`OperationCatalog`] serializes its geometry
//! arguments to WKT, delegates to an [`Engine`] that speaks WKT, and reads
//! geometry results back into the owned [`Geometry`] model. The bundled
//! [`GeoEngine`] computes in-process with [`geo`](https://crates.io/crates/geo).
//!
//! ```
//! use geomops::{GeometryOps, OperationCatalog, from_wkt};
//!
//! let catalog = OperationCatalog::new();
//! let square = from_wkt("POLYGON ((0 0, 4 0, 4 4, 0 4, 0 0))").unwrap();
//! assert_eq!(catalog.area(&square).unwrap(), 16.0);
//! ```
//!
//! # Features
//! #### Default
//! - **offset**: use `geo-buf` for `Buffer` (without it the engine reports `Buffer` as unsupported)
//! - **demo**: build the `geomops` walkthrough binary with `tracing-subscriber` output

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod catalog;
pub mod engine;
pub mod errors;
pub mod float_types;
pub mod geometry;
pub mod traits;
pub mod wkt;

pub use catalog::OperationCatalog;
pub use engine::{Engine, GeoEngine};
pub use errors::{EngineError, GeometryError, ParseError};
pub use geometry::{
    CircularString, CompoundCurve, Coord, CurveSegment, Geometry, GeometryCollection, GeometryKind,
    LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
pub use traits::GeometryOps;
pub use wkt::{from_wkt, to_wkt};
