//! Well-Known Text import/export of [`Geometry`] values
//!
//! The writer is total and deterministic: ordinates are printed with the
//! shortest decimal form that reads back to the same `f64`, so
//! `from_wkt(&to_wkt(g)) == Ok(g)` for every valid geometry.
//! The reader never panics; malformed text becomes a [`ParseError`] that
//! records the byte offset where reading stopped.

mod reader;
mod writer;

use crate::errors::ParseError;
use crate::geometry::Geometry;
use std::str::FromStr;

/// Serialize a geometry to exchange-format text.
pub fn to_wkt(geometry: &Geometry) -> String {
    geometry.to_string()
}

/// Deserialize exchange-format text, checking structural invariants.
pub fn from_wkt(text: &str) -> Result<Geometry, ParseError> {
    reader::read(text)
}

impl FromStr for Geometry {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        from_wkt(text)
    }
}
