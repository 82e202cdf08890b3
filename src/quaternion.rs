//! Quaternion rotation algebra.
//!
//! Every orientation in this crate — camera and model instance alike — is a
//! [`Quaternion`], composed incrementally and converted to a [`Matrix4`]
//! rotation block only when a derived matrix is rebuilt. Quaternions are
//! cheaper to chain than matrices (28 ops against 45) and do not gimbal-lock.
//!
//! Components are stored `(w, x, y, z)`. Any quaternion used as an
//! orientation must be unit length before matrix conversion; the composition
//! paths in [`Camera`] and [`Instance`] re-normalize after every multiply to
//! counter floating-point drift.
//!
//! [`Camera`]: crate::Camera
//! [`Instance`]: crate::Instance

use std::ops::Mul;

use crate::matrix::Matrix4;
use crate::vector::Vector3;

/// A rotation stored as `(w, x, y, z)`.
///
/// # Example
///
/// ```
/// use kinema::{Quaternion, Vector3};
///
/// let axis = Vector3::new(0.0, 1.0, 0.0);
/// let quarter = Quaternion::from_axis_angle(axis, std::f32::consts::FRAC_PI_2);
/// let half = (quarter * quarter).normalized();
/// let reference = Quaternion::from_axis_angle(axis, std::f32::consts::PI);
/// assert!((half.w - reference.w).abs() < 1e-6);
/// assert!((half.y - reference.y).abs() < 1e-6);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Quaternion {
    /// Scalar component.
    pub w: f32,
    /// X component of the vector part.
    pub x: f32,
    /// Y component of the vector part.
    pub y: f32,
    /// Z component of the vector part.
    pub z: f32,
}

impl Quaternion {
    /// The identity rotation, `(1, 0, 0, 0)`.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    /// Creates a quaternion from its components.
    #[inline]
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Creates a rotation of `angle` radians about `axis`.
    ///
    /// `axis` must already be normalized; this is a documented precondition,
    /// not a runtime check, and an unnormalized axis yields an unnormalized
    /// quaternion.
    pub fn from_axis_angle(axis: Vector3, angle: f32) -> Self {
        let half = 0.5 * angle;
        let s = half.sin();
        Self::new(half.cos(), s * axis.x, s * axis.y, s * axis.z)
    }

    /// Euclidean norm over all four components.
    #[inline]
    pub fn length(self) -> f32 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns this quaternion scaled to unit length.
    ///
    /// There is no zero-norm guard: normalizing a zero quaternion divides by
    /// zero and every component becomes NaN. Orientations are kept non-zero
    /// by construction everywhere in this crate, so the divide is left
    /// unchecked rather than masked.
    pub fn normalized(self) -> Self {
        let inv = 1.0 / self.length();
        Self::new(self.w * inv, self.x * inv, self.y * inv, self.z * inv)
    }

    /// Expands a unit quaternion into a rotation matrix.
    ///
    /// Assumes `self` is already normalized; the caller owns that invariant.
    /// The translation terms and homogeneous row of the result are those of
    /// the identity matrix.
    pub fn to_matrix(self) -> Matrix4 {
        let mut m = Matrix4::IDENTITY;
        m.set_orientation(self);
        m
    }

    /// Derives a quaternion from the rotation block of a matrix.
    ///
    /// Uses the Shepperd trace method, seeding each component's magnitude
    /// from the signed cube root of the matrix determinant, correcting signs
    /// from the off-diagonal differences, and normalizing the result. The
    /// camera calls this once per focus to seed its orientation from a
    /// freshly built look-at matrix.
    pub fn from_matrix(m: &Matrix4) -> Self {
        let e = m.as_array();
        let (m0, m1, m2) = (e[0], e[1], e[2]);
        let (m4, m5, m6) = (e[4], e[5], e[6]);
        let (m8, m9, m10) = (e[8], e[9], e[10]);

        let abs_q = m.determinant().cbrt();
        let q = Self::new(
            (abs_q + m0 + m5 + m10).max(0.0).sqrt() / 2.0,
            ((abs_q + m0 - m5 - m10).max(0.0).sqrt() / 2.0).copysign(m6 - m9),
            ((abs_q - m0 + m5 - m10).max(0.0).sqrt() / 2.0).copysign(m8 - m2),
            ((abs_q - m0 - m5 + m10).max(0.0).sqrt() / 2.0).copysign(m1 - m4),
        );

        q.normalized()
    }
}

impl Mul for Quaternion {
    type Output = Self;

    /// Hamilton product. Order matters: composing "rotation A, then B"
    /// multiplies with the second-applied rotation on the left, `b * a`.
    fn mul(self, rhs: Self) -> Self {
        let Self {
            w: w1,
            x: x1,
            y: y1,
            z: z1,
        } = self;
        let Self {
            w: w2,
            x: x2,
            y: y2,
            z: z2,
        } = rhs;

        Self::new(
            w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2,
            w1 * x2 + x1 * w2 + y1 * z2 - z1 * y2,
            w1 * y2 + y1 * w2 + z1 * x2 - x1 * z2,
            w1 * z2 + z1 * w2 + x1 * y2 - y1 * x2,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn approx(a: Quaternion, b: Quaternion) -> bool {
        (a.w - b.w).abs() < EPS
            && (a.x - b.x).abs() < EPS
            && (a.y - b.y).abs() < EPS
            && (a.z - b.z).abs() < EPS
    }

    #[test]
    fn normalize_is_idempotent() {
        let q = Quaternion::new(0.3, -1.2, 2.0, 0.5);
        let once = q.normalized();
        let twice = once.normalized();
        assert!(approx(once, twice));
        assert!((once.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn identity_expands_to_identity_matrix() {
        assert_eq!(Quaternion::IDENTITY.to_matrix(), Matrix4::IDENTITY);
    }

    #[test]
    fn axis_angle_rotations_compose_additively() {
        let axis = Vector3::new(0.0, 1.0, 0.0);
        let a = 0.7_f32;
        let b = 1.1_f32;

        let chained =
            (Quaternion::from_axis_angle(axis, b) * Quaternion::from_axis_angle(axis, a))
                .normalized();
        let direct = Quaternion::from_axis_angle(axis, a + b);

        assert!(approx(chained, direct));
    }

    #[test]
    fn multiply_is_order_sensitive() {
        let yaw = Quaternion::from_axis_angle(Vector3::new(0.0, 1.0, 0.0), 0.8);
        let pitch = Quaternion::from_axis_angle(Vector3::new(1.0, 0.0, 0.0), 0.4);
        let ab = yaw * pitch;
        let ba = pitch * yaw;
        assert!(!approx(ab, ba));
    }

    #[test]
    fn from_matrix_recovers_axis_angle_rotation() {
        let axis = Vector3::new(0.0, 1.0, 0.0);
        let q = Quaternion::from_axis_angle(axis, 1.3);
        let recovered = Quaternion::from_matrix(&q.to_matrix());
        assert!(approx(q, recovered));
    }

    #[test]
    fn from_matrix_of_identity_is_identity() {
        let q = Quaternion::from_matrix(&Matrix4::IDENTITY);
        assert!(approx(q, Quaternion::IDENTITY));
    }
}
