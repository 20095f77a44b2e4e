//! Whole-polygon transforms used by the generator and by callers placing polygons.

use super::matrix::LinearMap;
use super::polygon::Polygon;
use super::types::Vector;

/// Shift every vertex by `offset`. Translation keeps hull order as is.
pub fn translate(offset: Vector, polygon: &mut Polygon) -> &mut Polygon {
    polygon.map_vertices(|p| p + offset);
    polygon
}

/// Apply `map` to every vertex, then re-derive hull order.
///
/// A unimodular map can move the lowest vertex and a reflection reverses the
/// winding, so the vertex list is re-wrapped; a singular map collapses the
/// polygon to a segment or point.
pub fn transform<'a>(map: &LinearMap, polygon: &'a mut Polygon) -> &'a mut Polygon {
    polygon.map_vertices(|p| map.apply_point(p));
    polygon.rewrap();
    polygon
}
