//! Basic 2D types: vector/point aliases, closed half-spaces, classification enums.
//!
//! - `Vector`, `Point`: nalgebra values; equality is exact component equality.
//! - `Hs2`: closed half-space `n·p <= c`, tested without tolerance.
//! - `PositionType`, `PolygonEvent`: results of point classification and renovation.
//!
//! Code cross-refs: `polygon::Polygon::inequalities`, `vector::LatticeVector`

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Direction/displacement in the plane.
pub type Vector = Vector2<f64>;
/// Location in the plane.
pub type Point = Point2<f64>;

/// Closed half-space `n · p <= c`.
///
/// Invariants:
/// - `n` is a reduced (primitive, for lattice edges) outward normal; it is not
///   unit length.
/// - No epsilon: coordinates come from integer constructions and integer maps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hs2 {
    pub n: Vector,
    pub c: f64,
}

impl Hs2 {
    #[inline]
    pub fn new(n: Vector, c: f64) -> Self {
        Self { n, c }
    }
    #[inline]
    pub fn satisfies(&self, p: Point) -> bool {
        self.n.dot(&p.coords) <= self.c
    }
    #[inline]
    pub fn satisfies_strict(&self, p: Point) -> bool {
        self.n.dot(&p.coords) < self.c
    }
}

/// Where a point sits relative to a polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PositionType {
    Vertex,
    Internal,
    OnEdge,
    Other,
}

/// Outcome of `Polygon::renovate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PolygonEvent {
    Reduction,
    Expansion,
    NoChange,
}

impl PolygonEvent {
    #[inline]
    pub fn changed(self) -> bool {
        !matches!(self, PolygonEvent::NoChange)
    }
}

/// Axis-aligned bounding box of a vertex set (bounds need not be integral).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl BoundingBox {
    /// `None` for an empty slice.
    pub fn of(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let init = Self {
            x_min: first.x,
            x_max: first.x,
            y_min: first.y,
            y_max: first.y,
        };
        Some(points.iter().skip(1).fold(init, |b, p| Self {
            x_min: b.x_min.min(p.x),
            x_max: b.x_max.max(p.x),
            y_min: b.y_min.min(p.y),
            y_max: b.y_max.max(p.y),
        }))
    }
}
