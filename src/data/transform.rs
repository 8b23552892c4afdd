//! Affine 2D transforms.

use euclid::default::{Point2D, Transform2D, Vector2D};
use euclid::{vec2, Angle};
use std::ops;

/// Largest deviation of the linear part from identity that still counts as identity.
pub const IDENTITY_EPSILON: f32 = 1e-5;

/// Largest translation that still counts as identity.
pub const TRANSLATION_EPSILON: f32 = 1e-4;

/// A 2×3 affine transform.
///
/// Composition follows the usual "outer after inner" reading: `Affine::compose(a, b)` maps a
/// point through `b` first and `a` second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine(Transform2D<f32>);

impl Affine {
    /// The identity transform.
    pub fn identity() -> Affine {
        Affine(Transform2D::identity())
    }

    /// Creates a transform from its six coefficients (row-vector convention, as in euclid).
    pub fn new(m11: f32, m12: f32, m21: f32, m22: f32, m31: f32, m32: f32) -> Affine {
        Affine(Transform2D::new(m11, m12, m21, m22, m31, m32))
    }

    pub fn translation(dx: f32, dy: f32) -> Affine {
        Affine(Transform2D::translation(dx, dy))
    }

    pub fn scale(sx: f32, sy: f32) -> Affine {
        Affine(Transform2D::scale(sx, sy))
    }

    /// Rotation about the origin.
    pub fn rotation(angle: Angle<f32>) -> Affine {
        Affine(Transform2D::rotation(angle))
    }

    /// Rotation by `angle` radians about `pivot`.
    pub fn rotate_around_radians(angle: f32, pivot: Point2D<f32>) -> Affine {
        Affine(
            Transform2D::translation(-pivot.x, -pivot.y)
                .then_rotate(Angle::radians(angle))
                .then_translate(vec2(pivot.x, pivot.y)),
        )
    }

    /// Rotation by `angle` degrees about `pivot`.
    pub fn rotate_around_degrees(angle: f32, pivot: Point2D<f32>) -> Affine {
        Affine::rotate_around_radians(angle.to_radians(), pivot)
    }

    /// Returns the transform that applies `inner` and then `outer`.
    pub fn compose(outer: Affine, inner: Affine) -> Affine {
        Affine(inner.0.then(&outer.0))
    }

    /// Returns the transform that applies `self` and then `next`.
    pub fn then(self, next: Affine) -> Affine {
        Affine::compose(next, self)
    }

    /// Returns true if this transform is the identity within [IDENTITY_EPSILON] for the linear
    /// part and [TRANSLATION_EPSILON] for the translation.
    pub fn is_identity(&self) -> bool {
        let m = &self.0;
        (m.m11 - 1.).abs() <= IDENTITY_EPSILON
            && m.m12.abs() <= IDENTITY_EPSILON
            && m.m21.abs() <= IDENTITY_EPSILON
            && (m.m22 - 1.).abs() <= IDENTITY_EPSILON
            && m.m31.abs() <= TRANSLATION_EPSILON
            && m.m32.abs() <= TRANSLATION_EPSILON
    }

    /// Returns the inverse transform, if the matrix is invertible.
    pub fn inverse(&self) -> Option<Affine> {
        self.0.inverse().map(Affine)
    }

    pub fn transform_point(&self, point: Point2D<f32>) -> Point2D<f32> {
        self.0.transform_point(point)
    }

    pub fn transform_vector(&self, vector: Vector2D<f32>) -> Vector2D<f32> {
        self.0.transform_vector(vector)
    }

    /// Returns the underlying matrix (the same type as `lyon::math::Transform`).
    pub fn matrix(&self) -> Transform2D<f32> {
        self.0
    }
}

impl Default for Affine {
    fn default() -> Affine {
        Affine::identity()
    }
}

impl From<Transform2D<f32>> for Affine {
    fn from(m: Transform2D<f32>) -> Affine {
        Affine(m)
    }
}

/// `a * b` is `Affine::compose(a, b)`.
impl ops::Mul for Affine {
    type Output = Affine;
    fn mul(self, inner: Affine) -> Affine {
        Affine::compose(self, inner)
    }
}
