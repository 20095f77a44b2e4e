//! Lattice helpers on top of nalgebra vectors and points.
//!
//! nalgebra already supplies the vector algebra (add, sub, scalar mul, `dot`,
//! `norm`, `norm_squared`) and `From<[f64; 2]>`. The traits here add the pieces
//! that only make sense on the integer lattice: integral length, reduction to a
//! primitive direction and the right-orthogonal normal used for edge inequalities.

use super::types::{Point, Vector};

#[inline]
pub(crate) fn is_integral(t: f64) -> bool {
    t.is_finite() && t.fract() == 0.0
}

/// gcd on integer-valued floats; `fmod` is exact there.
fn gcd_f64(a: f64, b: f64) -> f64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0.0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

pub trait LatticeVector {
    /// `atan2(y, x)`.
    fn polar_angle(&self) -> f64;
    /// Component-wise nearest integer.
    fn rounded(&self) -> Self;
    fn is_lattice(&self) -> bool;
    /// gcd of the components for lattice vectors (0 for the zero vector).
    ///
    /// Non-lattice vectors fall back to the Euclidean length, so `reduced` still
    /// yields a positive multiple of the input.
    fn integral_length(&self) -> f64;
    /// Primitive direction `v / integral_length(v)`; the zero vector is returned unchanged.
    fn reduced(&self) -> Self;
    /// 90° clockwise rotation `(y, -x)`, reduced.
    fn right_orthogonal(&self) -> Self;
}

impl LatticeVector for Vector {
    #[inline]
    fn polar_angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    #[inline]
    fn rounded(&self) -> Self {
        Vector::new(self.x.round(), self.y.round())
    }

    #[inline]
    fn is_lattice(&self) -> bool {
        is_integral(self.x) && is_integral(self.y)
    }

    fn integral_length(&self) -> f64 {
        if self.x == 0.0 && self.y == 0.0 {
            0.0
        } else if !self.is_lattice() {
            self.norm()
        } else if self.x == 0.0 || self.y == 0.0 {
            self.x.abs().max(self.y.abs())
        } else {
            gcd_f64(self.x, self.y)
        }
    }

    fn reduced(&self) -> Self {
        let len = self.integral_length();
        if len == 0.0 {
            *self
        } else {
            *self / len
        }
    }

    #[inline]
    fn right_orthogonal(&self) -> Self {
        Vector::new(self.y, -self.x).reduced()
    }
}

pub trait LatticePoint {
    /// Both coordinates are integers.
    fn is_lattice_point(&self) -> bool;
    fn rounded(&self) -> Self;
}

impl LatticePoint for Point {
    #[inline]
    fn is_lattice_point(&self) -> bool {
        self.coords.is_lattice()
    }
    #[inline]
    fn rounded(&self) -> Self {
        Point::from(self.coords.rounded())
    }
}
