//! 2D lattice polygon geometry.
//!
//! Purpose
//! - Vectors, points and 2×2 linear maps on exact (integer/rational) coordinates.
//! - `Polygon`: gift-wrap hull, inequality form, containment classification,
//!   lattice point enumeration, vertex add/remove (`renovate`), polar dual.
//! - Random reflexive/terminal polygons via unimodular maps (`rand`).
//!
//! Numerics
//! - No epsilons. Coordinates originate from small integers and integer maps, so
//!   exact equality is used for vertex tests and hull termination. Do not feed
//!   interpolated/float-transformed coordinates into the engine.
//!
//! Code cross-refs: `Polygon`, `Hs2`, `LinearMap`, `Generator`

pub mod hull;
pub mod manager;
mod matrix;
mod polygon;
pub mod rand;
mod types;
pub mod util;
mod vector;

pub use hull::gift_wrap;
pub use matrix::LinearMap;
pub use polygon::{Polygon, PolygonData};
pub use self::rand::{GenCfg, Generator, ReplayToken, ShapeLibrary};
pub use types::{BoundingBox, Hs2, Point, PolygonEvent, PositionType, Vector};
pub use util::{closest_points, is_member, remove_all};
pub use vector::{LatticePoint, LatticeVector};

#[cfg(test)]
mod tests;
