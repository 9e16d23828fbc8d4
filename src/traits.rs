use crate::errors::Result;
use crate::float_types::Real;
use crate::geometry::Geometry;

/// Geometry operations over owned, immutable [`Geometry`] values.
///
/// Every method is a pure function of its arguments. Implementations report
/// failures as [`GeometryError`](crate::errors::GeometryError) and never panic
/// on degenerate input.
pub trait GeometryOps {
    /// Absolute area of the polygonal parts, 0 for everything else.
    fn area(&self, g: &Geometry) -> Result<Real>;
    /// Combinatorial boundary.
    fn boundary(&self, g: &Geometry) -> Result<Geometry>;
    /// Center of mass of the highest-dimension parts; empty input yields an empty collection.
    fn centroid(&self, g: &Geometry) -> Result<Geometry>;
    fn is_simple(&self, g: &Geometry) -> Result<bool>;
    /// 2D length of the lineal parts.
    fn length(&self, g: &Geometry) -> Result<Real>;
    /// Minimum planar distance; 0 when either geometry is empty.
    fn distance(&self, a: &Geometry, b: &Geometry) -> Result<Real>;
    /// Discrete Hausdorff distance, measuring the vertices of each side against
    /// the other geometry as a whole.
    fn hausdorff_distance(&self, a: &Geometry, b: &Geometry) -> Result<Real>;
    /// Discrete Hausdorff distance after densifying every segment by `densify_fraction`,
    /// which must lie in `(0, 1]`.
    fn hausdorff_distance_densify(&self, a: &Geometry, b: &Geometry, densify_fraction: Real)
    -> Result<Real>;
    fn is_empty(&self, g: &Geometry) -> Result<bool>;
    /// Axis-aligned bounding box as a closed ring.
    fn envelope(&self, g: &Geometry) -> Result<Geometry>;
    fn convex_hull(&self, g: &Geometry) -> Result<Geometry>;
    /// Dissolves the components of a multi-part or collection input.
    fn unary_union(&self, g: &Geometry) -> Result<Geometry>;
    /// A point guaranteed to lie on the input.
    fn point_on_surface(&self, g: &Geometry) -> Result<Geometry>;
    /// Sews line strings into maximal line strings.
    fn line_merge(&self, g: &Geometry) -> Result<Geometry>;
    /// Douglas-Peucker simplification; validity is not preserved.
    fn simplify(&self, g: &Geometry, tolerance: Real) -> Result<Geometry>;
    /// Simplification that introduces no self-intersections.
    fn simplify_preserve_topology(&self, g: &Geometry, tolerance: Real) -> Result<Geometry>;
    /// Region within `width` of the input, arcs drawn with `quadrant_segments`
    /// pieces per quarter circle. A negative width erodes polygons; a
    /// non-finite width is an engine error.
    fn buffer(&self, g: &Geometry, width: Real, quadrant_segments: i32) -> Result<Geometry>;
    /// Vertex-by-vertex comparison in storage order.
    fn equals_exact(&self, a: &Geometry, b: &Geometry, tolerance: Real) -> Result<bool>;
    /// DE-9IM intersection matrix as a nine-character string.
    fn relate(&self, a: &Geometry, b: &Geometry) -> Result<String>;
    /// Distinct vertices as a multi-point.
    fn unique_points(&self, g: &Geometry) -> Result<Geometry>;
    /// Collection text of the paths shared by two lineal geometries:
    /// same direction first, opposite direction second.
    fn shared_paths(&self, a: &Geometry, b: &Geometry) -> Result<String>;
    /// Snaps `input` onto the vertices of `reference` within `tolerance`.
    fn snap(&self, input: &Geometry, reference: &Geometry, tolerance: Real) -> Result<Geometry>;
    fn intersection(&self, a: &Geometry, b: &Geometry) -> Result<Geometry>;
    fn difference(&self, a: &Geometry, b: &Geometry) -> Result<Geometry>;
    fn sym_difference(&self, a: &Geometry, b: &Geometry) -> Result<Geometry>;
    fn union(&self, a: &Geometry, b: &Geometry) -> Result<Geometry>;
    fn overlaps(&self, a: &Geometry, b: &Geometry) -> Result<bool>;
    /// Topological equality.
    fn equals(&self, a: &Geometry, b: &Geometry) -> Result<bool>;
    fn covers(&self, a: &Geometry, b: &Geometry) -> Result<bool>;
    fn covered_by(&self, a: &Geometry, b: &Geometry) -> Result<bool>;
    fn crosses(&self, a: &Geometry, b: &Geometry) -> Result<bool>;
    fn within(&self, a: &Geometry, b: &Geometry) -> Result<bool>;
    fn contains(&self, a: &Geometry, b: &Geometry) -> Result<bool>;
    fn disjoint(&self, a: &Geometry, b: &Geometry) -> Result<bool>;
    fn touches(&self, a: &Geometry, b: &Geometry) -> Result<bool>;
    fn intersects(&self, a: &Geometry, b: &Geometry) -> Result<bool>;
    /// Closed and simple line string.
    fn is_ring(&self, g: &Geometry) -> Result<bool>;
    fn has_z(&self, g: &Geometry) -> Result<bool>;
    /// Closure of a lineal geometry; other kinds are an error.
    fn is_closed(&self, g: &Geometry) -> Result<bool>;
    /// Member count for multi-part values, 1 otherwise.
    fn n_geometry(&self, g: &Geometry) -> Result<usize>;
}
