//! Curated re-export surface (what the CLI and game-side callers use).
//!
//! Prefer these re-exports over reaching into submodules.

// Values and maps
pub use crate::geom2::{
    BoundingBox, Hs2, LatticePoint, LatticeVector, LinearMap, Point, PositionType, Vector,
};
// Polygon engine
pub use crate::geom2::{gift_wrap, Polygon, PolygonData, PolygonEvent};
// Point-set helpers and whole-polygon transforms
pub use crate::geom2::manager::{transform, translate};
pub use crate::geom2::{closest_points, is_member, remove_all};
// Generators
pub use crate::geom2::rand::{
    generate_reflexive, generate_terminal, random_primitive_vector, random_unimodular,
    spawn_point_outside, GenCfg, Generator, ReplayToken, ShapeLibrary, MAX_DISTANCE,
    MAX_EXACT_COMP, REFLEXIVE_DATA, TERMINAL_DATA,
};
// Errors
pub use crate::error::{GeomError, Result};
