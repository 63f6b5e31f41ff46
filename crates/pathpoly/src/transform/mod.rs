//! Affine transform: a 2×2 linear part plus a translation.

mod parse;

pub use parse::parse;

use crate::geom::{Point, Unit, Vector, approx_eq};

type Matrix = euclid::Transform2D<f64, Unit, Unit>;

/// Composable, invertible affine transform.
///
/// Coefficients follow the SVG `matrix(a b c d e f)` convention:
/// `x' = a·x + c·y + e`, `y' = b·x + d·y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform(Matrix);

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self(Matrix::identity())
    }

    pub fn matrix(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self(Matrix::new(a, b, c, d, e, f))
    }

    pub fn translate(x: f64, y: f64) -> Self {
        Self(Matrix::translation(x, y))
    }

    pub fn scale(x: f64, y: f64) -> Self {
        Self(Matrix::scale(x, y))
    }

    /// Rotation by `degrees`; positive angles turn the x axis towards the y axis.
    pub fn rotate(degrees: f64) -> Self {
        Self(Matrix::rotation(euclid::Angle::degrees(degrees)))
    }

    /// Rotation by `degrees` around `center`.
    pub fn rotate_around(degrees: f64, center: Point) -> Self {
        Self::translate(-center.x, -center.y)
            .then(&Self::rotate(degrees))
            .then(&Self::translate(center.x, center.y))
    }

    pub fn skew_x(degrees: f64) -> Self {
        Self::matrix(1.0, 0.0, degrees.to_radians().tan(), 1.0, 0.0, 0.0)
    }

    pub fn skew_y(degrees: f64) -> Self {
        Self::matrix(1.0, degrees.to_radians().tan(), 0.0, 1.0, 0.0, 0.0)
    }

    /// Returns the transform that applies `self` first and `other` second.
    pub fn then(&self, other: &Transform) -> Transform {
        Transform(self.0.then(&other.0))
    }

    /// `None` when the linear part is singular.
    pub fn inverse(&self) -> Option<Transform> {
        self.0.inverse().map(Transform)
    }

    pub fn transform_point(&self, p: Point) -> Point {
        self.0.transform_point(p)
    }

    /// Maps a direction; the translation part is ignored.
    pub fn transform_vector(&self, v: Vector) -> Vector {
        self.0.transform_vector(v)
    }

    /// `[a, b, c, d, e, f]`
    pub fn to_array(&self) -> [f64; 6] {
        self.0.to_array()
    }

    pub fn determinant(&self) -> f64 {
        self.0.determinant()
    }

    pub fn is_identity(&self) -> bool {
        let [a, b, c, d, e, f] = self.to_array();
        a == 1.0 && b == 0.0 && c == 0.0 && d == 1.0 && e == 0.0 && f == 0.0
    }

    /// True when the axes are only scaled (and translated), never rotated or sheared.
    pub fn is_rotation_free(&self) -> bool {
        let [_, b, c, _, _, _] = self.to_array();
        approx_eq(b, 0.0) && approx_eq(c, 0.0)
    }

    /// True when circles stay circles: a rotation combined with an equal scale on both axes.
    pub fn is_uniform(&self) -> bool {
        let [a, b, c, d, _, _] = self.to_array();
        approx_eq(a, d) && approx_eq(b, -c)
    }
}
