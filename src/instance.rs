//! Per-instance placement of shared model geometry.
//!
//! An [`Instance`] is one placed copy of a model's geometry: its own
//! position and quaternion orientation, and a derived model matrix that
//! carries the mesh from local space into world space. Instances are created
//! through [`Model::create_instance`] and updated through the same
//! move/rotate contract as the camera, except that rotation is a single yaw
//! angle and the translation column holds the position directly — a model
//! matrix places an object in the world rather than pulling the world into
//! view space, so nothing is negated.
//!
//! [`Model::create_instance`]: crate::Model::create_instance

use crate::matrix::Matrix4;
use crate::quaternion::Quaternion;
use crate::vector::{Vector3, WORLD_UP};

/// One placed copy of a model, with independent position and orientation.
///
/// A fresh instance sits at the origin facing -Z with an identity model
/// matrix; the matrix is re-derived on every [`Instance::move_by`] /
/// [`Instance::rotate`] and cached until the next update.
#[derive(Clone, Debug)]
pub struct Instance {
    position: Vector3,
    direction: Vector3,
    up: Vector3,
    orientation: Quaternion,
    forward: Vector3,
    model: Matrix4,
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}

impl Instance {
    /// Creates an instance at the origin, facing -Z, not yet rotated.
    pub fn new() -> Self {
        Self {
            position: Vector3::ZERO,
            direction: Vector3::new(0.0, 0.0, -1.0),
            up: WORLD_UP,
            orientation: Quaternion::IDENTITY,
            forward: Vector3::new(0.0, 0.0, -1.0),
            model: Matrix4::IDENTITY,
        }
    }

    /// Moves the instance `distance` units along its forward vector.
    pub fn move_by(&mut self, distance: f32) {
        self.position += self.forward * distance;
        self.refresh_model();
    }

    /// Rotates the instance by `angle` radians about its up axis.
    ///
    /// The yaw delta is pre-multiplied onto the accumulated orientation and
    /// the result re-normalized, matching the camera's composition order.
    pub fn rotate(&mut self, angle: f32) {
        let delta = Quaternion::from_axis_angle(self.up, angle).normalized();
        self.orientation = (delta * self.orientation).normalized();

        self.refresh_model();
    }

    /// The derived model matrix, column-major, ready for upload.
    pub fn model_matrix(&self) -> &Matrix4 {
        &self.model
    }

    /// Current world-space position.
    pub fn position(&self) -> Vector3 {
        self.position
    }

    /// Current forward direction.
    pub fn forward(&self) -> Vector3 {
        self.forward
    }

    /// Current orientation quaternion.
    pub fn orientation(&self) -> Quaternion {
        self.orientation
    }

    /// Rebuilds the cached model matrix from orientation and position.
    ///
    /// Orientation goes into the rotation block, the forward vector is
    /// re-derived from the matrix while it is still in assembly order, the
    /// position is written directly as the translation, and the final
    /// transpose lands the matrix in the column-major convention.
    fn refresh_model(&mut self) {
        self.model.set_orientation(self.orientation);

        self.forward = self.model.transform_vector3(self.direction);

        self.model.set_translation(self.position);
        self.model.transpose();
    }
}
