//! 4×4 matrix assembly for view, model, and projection transforms.
//!
//! [`Matrix4`] stores 16 floats in the column-major layout GPU APIs consume
//! (element `r + 4*c`; columns are contiguous):
//!
//! ```text
//! m0 m4 m8  m12        column 0: local X (right)
//! m1 m5 m9  m13        column 1: local Y (up)
//! m2 m6 m10 m14        column 2: local Z (forward)
//! m3 m7 m11 m15        column 3: translation + homogeneous row
//! ```
//!
//! The camera and instance pipelines assemble their matrices row-oriented —
//! [`Matrix4::set_orientation`] and [`Matrix4::set_translation`] write the
//! rotation block and the per-row translation slots (elements 3/7/11) — and
//! finish with one in-place [`Matrix4::transpose`] to land in the layout
//! above. A finished matrix is an opaque 16-float uniform payload:
//! [`Matrix4`] is [`bytemuck::Pod`], so `bytemuck::bytes_of(&m)` is the
//! upload buffer.

use std::ops::{Index, IndexMut};

use crate::quaternion::Quaternion;
use crate::vector::Vector3;

/// A 4×4 `f32` matrix in column-major memory layout.
///
/// # Example
///
/// ```
/// use kinema::{Matrix4, Vector3};
///
/// let projection = Matrix4::perspective(45.0, 16.0 / 9.0, 0.1, 100.0);
/// let view = Matrix4::look_at(
///     Vector3::new(0.0, 0.0, 5.0),
///     Vector3::ZERO,
///     Vector3::new(0.0, 1.0, 0.0),
/// );
/// // Both are ready to hand to a renderer as 16-float uniforms.
/// assert_eq!(view.as_array().len(), 16);
/// # let _ = projection;
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Matrix4([f32; 16]);

impl Matrix4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Creates a matrix from 16 elements in column-major order.
    #[inline]
    pub const fn from_array(e: [f32; 16]) -> Self {
        Self(e)
    }

    /// The elements in column-major order.
    #[inline]
    pub const fn as_array(&self) -> &[f32; 16] {
        &self.0
    }

    /// Copies the elements out in column-major order.
    #[inline]
    pub const fn to_array(self) -> [f32; 16] {
        self.0
    }

    /// Builds an OpenGL-style perspective projection.
    ///
    /// `fovy` is the vertical field of view in degrees; `aspect` is
    /// width/height. Derives symmetric frustum bounds and delegates to
    /// [`Matrix4::frustum`].
    pub fn perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> Self {
        let top = near * (fovy * std::f32::consts::PI / 360.0).tan();
        let right = top * aspect;
        Self::frustum(-right, right, -top, top, near, far)
    }

    /// Builds a frustum projection from explicit clip-plane bounds.
    ///
    /// Element 11 carries the `-1` that makes the homogeneous divide a
    /// perspective divide.
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let rl = right - left;
        let tb = top - bottom;
        let depth = far - near;

        let mut m = [0.0; 16];
        m[0] = (near * 2.0) / rl;
        m[5] = (near * 2.0) / tb;
        m[8] = (right + left) / rl;
        m[9] = (top + bottom) / tb;
        m[10] = -(far + near) / depth;
        m[11] = -1.0;
        m[14] = -(far * near * 2.0) / depth;
        Self(m)
    }

    /// Builds a view matrix looking from `eye` toward `target`.
    ///
    /// The backward axis is `eye - target`; `up` steers the basis via cross
    /// products; the translation column is `-(basis · eye)` per axis. If
    /// `eye` and `target` coincide component-wise there is no defined look
    /// direction and the identity matrix is returned instead of dividing by
    /// a zero-length vector.
    pub fn look_at(eye: Vector3, target: Vector3, up: Vector3) -> Self {
        if eye == target {
            return Self::IDENTITY;
        }

        // Never zero-length thanks to the early return above.
        let back = eye - target;
        let z = back * (1.0 / back.length());
        let x = up.cross(z).normalized();
        let y = z.cross(x).normalized();

        Self([
            x.x,
            y.x,
            z.x,
            0.0,
            x.y,
            y.y,
            z.y,
            0.0,
            x.z,
            y.z,
            z.z,
            0.0,
            -x.dot(eye),
            -y.dot(eye),
            -z.dot(eye),
            1.0,
        ])
    }

    /// Returns the element-wise negation of this matrix.
    pub fn negated(&self) -> Self {
        let mut m = [0.0; 16];
        for (dst, src) in m.iter_mut().zip(self.0.iter()) {
            *dst = -src;
        }
        Self(m)
    }

    /// Applies this matrix to `v` as a row vector.
    ///
    /// Each output component is the dot of `v` with the first three elements
    /// of a basis row plus that row's affine term (elements 3/7/11) — `v` is
    /// treated as a direction whose implicit homogeneous coordinate folds
    /// into the per-row term. The camera and instance use this to re-derive
    /// their forward vectors after an orientation change.
    pub fn transform_vector3(&self, v: Vector3) -> Vector3 {
        let m = &self.0;
        Vector3::new(
            m[0] * v.x + m[1] * v.y + m[2] * v.z + m[3],
            m[4] * v.x + m[5] * v.y + m[6] * v.z + m[7],
            m[8] * v.x + m[9] * v.y + m[10] * v.z + m[11],
        )
    }

    /// Writes `v` into the row-oriented translation slots (elements 3/7/11),
    /// leaving every other element as previously set.
    ///
    /// The assembly convention is row-oriented; the closing
    /// [`Matrix4::transpose`] moves these slots into the column-major
    /// translation column (elements 12/13/14).
    pub fn set_translation(&mut self, v: Vector3) {
        self.0[3] = v.x;
        self.0[7] = v.y;
        self.0[11] = v.z;
    }

    /// Overwrites this matrix with the rotation of `quat`.
    ///
    /// The rotation block is the standard unit-quaternion expansion; the
    /// translation slots are zeroed and the homogeneous element reset to 1,
    /// so orientation is always written before translation during assembly.
    /// `quat` is assumed normalized.
    pub fn set_orientation(&mut self, quat: Quaternion) {
        let Quaternion { w, x, y, z } = quat;
        let x2 = x + x;
        let y2 = y + y;
        let z2 = z + z;

        let xx = x * x2;
        let xy = x * y2;
        let xz = x * z2;
        let yy = y * y2;
        let yz = y * z2;
        let zz = z * z2;
        let wx = w * x2;
        let wy = w * y2;
        let wz = w * z2;

        self.0 = [
            1.0 - (yy + zz),
            xy + wz,
            xz - wy,
            0.0,
            xy - wz,
            1.0 - (xx + zz),
            yz + wx,
            0.0,
            xz + wy,
            yz - wx,
            1.0 - (xx + yy),
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ];
    }

    /// Transposes this matrix in place.
    ///
    /// Called once per recomputation per camera/instance to flip the
    /// row-oriented assembly into the column-major layout the rendering API
    /// consumes.
    pub fn transpose(&mut self) {
        let m = &mut self.0;
        let (a01, a02, a03) = (m[1], m[2], m[3]);
        let (a12, a13) = (m[6], m[7]);
        let a23 = m[11];

        m[1] = m[4];
        m[2] = m[8];
        m[3] = m[12];
        m[4] = a01;
        m[6] = m[9];
        m[7] = m[13];
        m[8] = a02;
        m[9] = a12;
        m[11] = m[14];
        m[12] = a03;
        m[13] = a13;
        m[14] = a23;
    }

    /// Full 4×4 determinant by cofactor expansion.
    pub fn determinant(&self) -> f32 {
        let m = &self.0;
        let (a00, a01, a02, a03) = (m[0], m[1], m[2], m[3]);
        let (a10, a11, a12, a13) = (m[4], m[5], m[6], m[7]);
        let (a20, a21, a22, a23) = (m[8], m[9], m[10], m[11]);
        let (a30, a31, a32, a33) = (m[12], m[13], m[14], m[15]);

        a30 * a21 * a12 * a03 - a20 * a31 * a12 * a03 - a30 * a11 * a22 * a03
            + a10 * a31 * a22 * a03
            + a20 * a11 * a32 * a03
            - a10 * a21 * a32 * a03
            - a30 * a21 * a02 * a13
            + a20 * a31 * a02 * a13
            + a30 * a01 * a22 * a13
            - a00 * a31 * a22 * a13
            - a20 * a01 * a32 * a13
            + a00 * a21 * a32 * a13
            + a30 * a11 * a02 * a23
            - a10 * a31 * a02 * a23
            - a30 * a01 * a12 * a23
            + a00 * a31 * a12 * a23
            + a10 * a01 * a32 * a23
            - a00 * a11 * a32 * a23
            - a20 * a11 * a02 * a33
            + a10 * a21 * a02 * a33
            + a20 * a01 * a12 * a33
            - a00 * a21 * a12 * a33
            - a10 * a01 * a22 * a33
            + a00 * a11 * a22 * a33
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<usize> for Matrix4 {
    type Output = f32;

    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.0[i]
    }
}

impl IndexMut<usize> for Matrix4 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut self.0[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_matrix_eq(actual: &Matrix4, expected: &[f32; 16]) {
        for (i, (a, e)) in actual.as_array().iter().zip(expected.iter()).enumerate() {
            assert!(
                (a - e).abs() < EPS,
                "element {i}: got {a}, expected {e}",
            );
        }
    }

    #[test]
    fn perspective_matches_reference_implementation() {
        let ours = Matrix4::perspective(45.0, 1.5, 0.1, 100.0);
        let reference =
            glam::Mat4::perspective_rh_gl(45.0_f32.to_radians(), 1.5, 0.1, 100.0).to_cols_array();
        assert_matrix_eq(&ours, &reference);
    }

    #[test]
    fn perspective_divide_flag_is_set() {
        let m = Matrix4::perspective(60.0, 1.0, 0.5, 50.0);
        assert_eq!(m[11], -1.0);
        assert_eq!(m[15], 0.0);
    }

    #[test]
    fn look_at_matches_reference_implementation() {
        let eye = Vector3::new(1.0, 2.0, 5.0);
        let target = Vector3::new(0.0, 0.5, -1.0);
        let up = Vector3::new(0.0, 1.0, 0.0);

        let ours = Matrix4::look_at(eye, target, up);
        let reference = glam::Mat4::look_at_rh(
            glam::Vec3::new(eye.x, eye.y, eye.z),
            glam::Vec3::new(target.x, target.y, target.z),
            glam::Vec3::new(up.x, up.y, up.z),
        )
        .to_cols_array();
        assert_matrix_eq(&ours, &reference);
    }

    #[test]
    fn look_at_coincident_eye_and_target_is_identity() {
        let p = Vector3::new(3.0, -2.0, 7.5);
        let up = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(Matrix4::look_at(p, p, up), Matrix4::IDENTITY);
    }

    #[test]
    fn transpose_is_an_involution() {
        let mut m = Matrix4::from_array([
            1.0, 2.0, 3.0, 4.0, //
            5.0, 6.0, 7.0, 8.0, //
            9.0, 10.0, 11.0, 12.0, //
            13.0, 14.0, 15.0, 16.0,
        ]);
        let original = m;
        m.transpose();
        assert_ne!(m, original);
        m.transpose();
        assert_eq!(m, original);
    }

    #[test]
    fn determinant_of_identity_is_one() {
        assert_eq!(Matrix4::IDENTITY.determinant(), 1.0);
    }

    #[test]
    fn determinant_of_uniform_scale() {
        let mut m = Matrix4::IDENTITY;
        m[0] = 2.0;
        m[5] = 2.0;
        m[10] = 2.0;
        assert!((m.determinant() - 8.0).abs() < EPS);
    }

    #[test]
    fn set_translation_then_transpose_lands_in_translation_column() {
        let mut m = Matrix4::IDENTITY;
        m.set_translation(Vector3::new(1.0, 2.0, 3.0));
        m.transpose();
        assert_eq!(m[12], 1.0);
        assert_eq!(m[13], 2.0);
        assert_eq!(m[14], 3.0);
    }

    #[test]
    fn transform_vector3_applies_rows_and_affine_terms() {
        let mut m = Matrix4::IDENTITY;
        m.set_translation(Vector3::new(10.0, 20.0, 30.0));
        let v = m.transform_vector3(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(v, Vector3::new(11.0, 22.0, 33.0));
    }

    #[test]
    fn set_orientation_matches_quaternion_expansion() {
        let q = Quaternion::from_axis_angle(Vector3::new(0.0, 1.0, 0.0), 0.9);
        let mut m = Matrix4::IDENTITY;
        m.set_translation(Vector3::new(5.0, 5.0, 5.0));
        m.set_orientation(q);
        // set_orientation resets the translation slots.
        assert_eq!(m[3], 0.0);
        assert_eq!(m[7], 0.0);
        assert_eq!(m[11], 0.0);
        assert_eq!(m, q.to_matrix());
    }
}
