//! Immutable 2×2 linear map `[[xx, xy], [yx, yy]]`.
//!
//! Every operation returns a new value. The mutable accumulated view transform
//! of a renderer is not modelled here.

use nalgebra::Matrix2;

use super::types::{Point, Vector};
use super::vector::is_integral;
use crate::error::{GeomError, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearMap {
    pub m: Matrix2<f64>,
}

impl Default for LinearMap {
    fn default() -> Self {
        Self::identity()
    }
}

impl LinearMap {
    #[inline]
    pub fn new(xx: f64, xy: f64, yx: f64, yy: f64) -> Self {
        Self {
            m: Matrix2::new(xx, xy, yx, yy),
        }
    }
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
        }
    }
    /// Row-major `[[xx, xy], [yx, yy]]`.
    #[inline]
    pub fn from_array(a: [[f64; 2]; 2]) -> Self {
        Self::new(a[0][0], a[0][1], a[1][0], a[1][1])
    }
    #[inline]
    pub fn to_array(&self) -> [[f64; 2]; 2] {
        [
            [self.m[(0, 0)], self.m[(0, 1)]],
            [self.m[(1, 0)], self.m[(1, 1)]],
        ]
    }

    /// `xx*yy - xy*yx`, spelled out so integer entries give an exact result.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.m[(0, 0)] * self.m[(1, 1)] - self.m[(0, 1)] * self.m[(1, 0)]
    }

    /// Integer entries and determinant exactly 1.
    pub fn is_unimodular(&self) -> bool {
        self.m.iter().all(|&t| is_integral(t)) && self.determinant() == 1.0
    }

    /// Inverse map; `DegenerateGeometry` when the determinant is zero.
    pub fn inverse(&self) -> Result<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(GeomError::degenerate(format!(
                "inverse of singular map (det = {det})"
            )));
        }
        let [[xx, xy], [yx, yy]] = self.to_array();
        let inv = Self::new(yy / det, -xy / det, -yx / det, xx / det);
        if inv.m.iter().all(|t| t.is_finite()) {
            Ok(inv)
        } else {
            Err(GeomError::degenerate("inverse has non-finite entries"))
        }
    }

    /// Composition `self ∘ other`: applying the result equals applying `other`, then `self`.
    #[inline]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            m: self.m * other.m,
        }
    }

    #[inline]
    pub fn apply(&self, v: Vector) -> Vector {
        self.m * v
    }

    #[inline]
    pub fn apply_point(&self, p: Point) -> Point {
        Point::from(self.m * p.coords)
    }

    /// Frobenius norm.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.m.norm()
    }
}

impl std::ops::Add for LinearMap {
    type Output = LinearMap;
    #[inline]
    fn add(self, rhs: LinearMap) -> Self::Output {
        LinearMap { m: self.m + rhs.m }
    }
}
impl std::ops::Sub for LinearMap {
    type Output = LinearMap;
    #[inline]
    fn sub(self, rhs: LinearMap) -> Self::Output {
        LinearMap { m: self.m - rhs.m }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn determinant_and_inverse() {
        let a = LinearMap::from_array([[2.0, 1.0], [1.0, 1.0]]);
        assert_eq!(a.determinant(), 1.0);
        assert!(a.is_unimodular());
        let inv = a.inverse().unwrap();
        assert_eq!(inv.to_array(), [[1.0, -1.0], [-1.0, 2.0]]);
        assert_eq!(a.compose(&inv), LinearMap::identity());
    }

    #[test]
    fn singular_inverse_is_an_error() {
        let s = LinearMap::new(1.0, 2.0, 2.0, 4.0);
        assert!(matches!(
            s.inverse(),
            Err(GeomError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn compose_applies_right_factor_first() {
        let rot = LinearMap::new(0.0, -1.0, 1.0, 0.0);
        let shear = LinearMap::new(1.0, 1.0, 0.0, 1.0);
        let v = Vector::new(1.0, 0.0);
        let composed = rot.compose(&shear);
        assert_eq!(composed.apply(v), rot.apply(shear.apply(v)));
        assert_eq!(composed.apply_point(Point::new(0.0, 1.0)), Point::new(-1.0, 1.0));
    }

    #[test]
    fn add_sub_norm() {
        let a = LinearMap::identity();
        let b = LinearMap::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!((a + b).to_array(), [[2.0, 2.0], [3.0, 5.0]]);
        assert_eq!((b - a).to_array(), [[0.0, 2.0], [3.0, 3.0]]);
        assert!((b.norm() - 30f64.sqrt()).abs() < 1e-12);
        assert!(!b.is_unimodular());
    }
}
