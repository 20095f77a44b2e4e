//! Lattice polygon engine: hulls, containment, renovation, reflexive/terminal polygons.
//!
//! - `geom2`: vectors/points (nalgebra), `LinearMap`, gift-wrap hull, `Polygon`,
//!   generators under random unimodular maps.
//! - `error`: `GeomError`, returned by every operation that can fail instead of
//!   producing NaN or an empty polygon.
//!
//! API Policy
//! - `api` is the curated surface for the CLI and other callers; `prelude` is the
//!   short list for quick imports.

pub mod api;
pub mod error;
pub mod geom2;

pub use error::{GeomError, Result};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::{Matrix2 as Mat2, Point2 as Pt2, Vector2 as Vec2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::GeomError;
    pub use crate::geom2::manager::{transform, translate};
    pub use crate::geom2::{
        GenCfg, Generator, LatticePoint, LatticeVector, LinearMap, Point, Polygon, PolygonEvent,
        PositionType, ReplayToken, ShapeLibrary, Vector,
    };
}

/// Signed area of the parallelogram spanned by vectors `a` and `b` in R².
/// Positive for a→b counterclockwise, negative otherwise. Used as the turn test of the hull.
#[inline]
pub fn parallelogram_area(a: Vec2<f64>, b: Vec2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}
