//! 2-D Transformations

#![allow(dead_code)]
use crate::geometry::*;
use crate::pbrt::*;
use std::ops::Mul;

/// A 3x3 matrix containing Float values, used for homogeneous 2-D transforms.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix3x3 {
    /// Stores a 2-D array of Float
    pub m: [[Float; 3]; 3],
}

/// Identity matrix.
pub const IDENTITY_MATRIX: Matrix3x3 = Matrix3x3 {
    m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
};

/// Create a 3x3 matrix using the following order of the parameters:
///
/// * `t00`, `t01`, `t02` - Row 1
/// * `t10`, `t11`, `t12` - Row 2
/// * `t20`, `t21`, `t22` - Row 3
#[rustfmt::skip]
pub fn matrix3x3(
    t00: Float, t01: Float, t02: Float,
    t10: Float, t11: Float, t12: Float,
    t20: Float, t21: Float, t22: Float,
) -> Matrix3x3 {
    Matrix3x3 {
        m: [
            [t00, t01, t02],
            [t10, t11, t12],
            [t20, t21, t22],
        ],
    }
}

impl Matrix3x3 {
    /// Returns the transpose of the matrix.
    #[rustfmt::skip]
    pub fn transpose(&self) -> Matrix3x3 {
        matrix3x3(
            self.m[0][0], self.m[1][0], self.m[2][0],
            self.m[0][1], self.m[1][1], self.m[2][1],
            self.m[0][2], self.m[1][2], self.m[2][2],
        )
    }
}

impl Default for Matrix3x3 {
    /// Returns the identity matrix.
    fn default() -> Self {
        IDENTITY_MATRIX
    }
}

impl Mul for Matrix3x3 {
    type Output = Self;

    /// Post-multiply the given matrix.
    ///
    /// * `other` - The matrix to multiply.
    fn mul(self, other: Self) -> Self::Output {
        let mut m = [[0.0; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j];
            }
        }
        Self::Output { m }
    }
}

/// A 2-D affine (optionally projective) transformation of texture
/// coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform2 {
    /// The transformation matrix.
    pub m: Matrix3x3,
}

impl Transform2 {
    /// Create a transformation from a 3x3 matrix.
    ///
    /// * `m` - The transformation matrix.
    pub fn new(m: Matrix3x3) -> Self {
        Self { m }
    }

    /// Create a transformation for a translation.
    ///
    /// * `delta` - The translation vector.
    pub fn translate(delta: &Vector2f) -> Self {
        Self::new(matrix3x3(
            1.0, 0.0, delta.x, //
            0.0, 1.0, delta.y, //
            0.0, 0.0, 1.0,
        ))
    }

    /// Create a transformation for a non-uniform scale.
    ///
    /// * `x` - Scale in the x-direction.
    /// * `y` - Scale in the y-direction.
    pub fn scale(x: Float, y: Float) -> Self {
        Self::new(matrix3x3(
            x, 0.0, 0.0, //
            0.0, y, 0.0, //
            0.0, 0.0, 1.0,
        ))
    }

    /// Create a transformation for a counterclockwise rotation.
    ///
    /// * `theta` - The rotation angle in degrees.
    pub fn rotate(theta: Float) -> Self {
        let sin_theta = sin(theta.to_radians());
        let cos_theta = cos(theta.to_radians());
        Self::new(matrix3x3(
            cos_theta, -sin_theta, 0.0, //
            sin_theta, cos_theta, 0.0, //
            0.0, 0.0, 1.0,
        ))
    }

    /// Applies the transformation to a 2-D point, performing the homogeneous
    /// divide when the bottom matrix row is projective.
    ///
    /// * `p` - The point to transform.
    pub fn transform_point(&self, p: &Point2f) -> Point2f {
        let m = &self.m.m;
        let x = m[0][0] * p.x + m[0][1] * p.y + m[0][2];
        let y = m[1][0] * p.x + m[1][1] * p.y + m[1][2];
        let w = m[2][0] * p.x + m[2][1] * p.y + m[2][2];
        if w == 1.0 {
            Point2f::new(x, y)
        } else {
            Point2f::new(x, y) / w
        }
    }
}

impl Default for Transform2 {
    /// Returns the identity transformation.
    fn default() -> Self {
        Self::new(IDENTITY_MATRIX)
    }
}

impl Mul for Transform2 {
    type Output = Self;

    /// Compose with another transformation; the right-hand side is applied
    /// first.
    ///
    /// * `other` - The transformation to compose.
    fn mul(self, other: Self) -> Self::Output {
        Self::Output::new(self.m * other.m)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
