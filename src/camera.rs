//! First-person camera state and view-matrix derivation.
//!
//! [`Camera`] owns a position and a quaternion orientation and derives a
//! view matrix from them. Input handling feeds it raw deltas —
//! [`Camera::move_by`] with a signed distance, [`Camera::rotate`] with
//! pitch/yaw angles in radians — and a renderer reads the resulting
//! [`Camera::view_matrix`] and [`Camera::projection_matrix`] as opaque
//! 16-float uniforms. The camera never decides when to render or how to
//! upload; it only keeps the math straight across arbitrarily many
//! incremental updates.
//!
//! # Example
//!
//! ```
//! use kinema::{Camera, Vector3};
//!
//! let mut camera = Camera::new(45.0, 16.0 / 9.0, 0.1, 100.0);
//! camera.look_at(
//!     Vector3::new(0.0, 0.0, 5.0),
//!     Vector3::new(0.0, 0.0, -1.0),
//!     Vector3::new(0.0, 1.0, 0.0),
//! );
//!
//! // One frame's worth of input:
//! camera.move_by(0.1);
//! camera.rotate(0.0, 0.01);
//!
//! let view = camera.view_matrix();      // upload as the view uniform
//! let projection = camera.projection_matrix();
//! # let _ = (view, projection);
//! ```

use crate::matrix::Matrix4;
use crate::quaternion::Quaternion;
use crate::vector::{Vector3, WORLD_UP};

/// Perspective projection parameters.
///
/// Plain configuration handed to [`Camera::with_perspective`]. The defaults
/// match a common viewer setup; any field can be overridden through the
/// builder methods.
///
/// # Example
///
/// ```
/// use kinema::{Camera, Perspective};
///
/// let camera = Camera::with_perspective(
///     Perspective::default().fovy(60.0).aspect(21.0 / 9.0),
/// );
/// # let _ = camera;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Perspective {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Viewport width divided by height.
    pub aspect: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            aspect: 4.0 / 3.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Perspective {
    /// Sets the vertical field of view in degrees.
    pub fn fovy(mut self, fovy: f32) -> Self {
        self.fovy = fovy;
        self
    }

    /// Sets the width/height aspect ratio.
    pub fn aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Sets the near and far clipping planes.
    pub fn clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Builds the projection matrix for these parameters.
    pub fn matrix(&self) -> Matrix4 {
        Matrix4::perspective(self.fovy, self.aspect, self.near, self.far)
    }
}

/// A camera that derives its view matrix from a quaternion orientation.
///
/// # Lifecycle
///
/// A camera is constructed with a perspective configuration and immediately
/// focused on its default pose (origin, looking down -Z). [`Camera::look_at`]
/// re-focuses it: the look-at matrix is built first and the orientation
/// quaternion is derived *from* that matrix, making the quaternion the single
/// source of truth for every later incremental update. After focusing, the
/// camera is mutated only through [`Camera::move_by`] and [`Camera::rotate`],
/// both of which re-derive the cached view matrix; there is no terminal
/// state and updates repeat indefinitely.
///
/// # Rotation convention
///
/// [`Camera::rotate`] applies yaw about the camera's stored up axis (world
/// space) and pitch about the re-derived right axis (camera-local space),
/// composed as `horizontal * vertical` and pre-multiplied onto the current
/// orientation. Keeping exactly this order is what prevents orientation
/// drift from differing between input paths.
#[derive(Clone, Debug)]
pub struct Camera {
    position: Vector3,
    direction: Vector3,
    up: Vector3,
    orientation: Quaternion,
    forward: Vector3,
    view: Matrix4,
    projection: Matrix4,
}

impl Camera {
    /// Creates a camera with the given perspective projection.
    ///
    /// `fovy` is in degrees; `aspect`, `near`, and `far` are finite and
    /// positive. The camera starts at the origin looking down -Z with the
    /// world up axis, already focused.
    pub fn new(fovy: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::with_perspective(Perspective {
            fovy,
            aspect,
            near,
            far,
        })
    }

    /// Creates a camera from a [`Perspective`] configuration.
    pub fn with_perspective(perspective: Perspective) -> Self {
        let mut camera = Self {
            position: Vector3::ZERO,
            direction: Vector3::new(0.0, 0.0, -1.0),
            up: WORLD_UP,
            orientation: Quaternion::IDENTITY,
            forward: Vector3::new(0.0, 0.0, -1.0),
            view: Matrix4::IDENTITY,
            projection: perspective.matrix(),
        };
        camera.focus();
        camera
    }

    /// Focuses the camera: position, the point/direction to face, and up.
    ///
    /// Rebuilds the view matrix with [`Matrix4::look_at`] and re-seeds the
    /// orientation quaternion from it via [`Quaternion::from_matrix`].
    pub fn look_at(&mut self, position: Vector3, direction: Vector3, up: Vector3) {
        self.position = position;
        self.direction = direction;
        self.up = up;
        self.focus();
    }

    /// Moves the camera `distance` units along its forward vector.
    ///
    /// Negative distances move backward.
    pub fn move_by(&mut self, distance: f32) {
        self.position += self.forward * distance;
        self.refresh_view();
    }

    /// Rotates the camera by `angle_v` (pitch) and `angle_h` (yaw), radians.
    ///
    /// Pitch turns about the camera's current right axis; yaw turns about
    /// the stored up axis. The two are composed into a single delta and
    /// pre-multiplied onto the accumulated orientation, which is then
    /// re-normalized to counter floating-point drift.
    pub fn rotate(&mut self, angle_v: f32, angle_h: f32) {
        let right = self.forward.cross(self.up).normalized();

        let vertical = Quaternion::from_axis_angle(right, angle_v).normalized();
        let horizontal = Quaternion::from_axis_angle(self.up, angle_h).normalized();

        let delta = (horizontal * vertical).normalized();
        self.orientation = (delta * self.orientation).normalized();

        self.refresh_view();
    }

    /// The derived view matrix — the camera's single source of truth for
    /// rendering, column-major, ready for upload.
    pub fn view_matrix(&self) -> &Matrix4 {
        &self.view
    }

    /// The projection matrix fixed at construction.
    pub fn projection_matrix(&self) -> &Matrix4 {
        &self.projection
    }

    /// Current world-space position.
    pub fn position(&self) -> Vector3 {
        self.position
    }

    /// Current forward direction, re-derived on every update.
    pub fn forward(&self) -> Vector3 {
        self.forward
    }

    /// Current orientation quaternion.
    pub fn orientation(&self) -> Quaternion {
        self.orientation
    }

    /// Establishes orientation state from the raw position/direction/up
    /// triple, then derives the view matrix from it.
    fn focus(&mut self) {
        self.view = Matrix4::look_at(self.position, self.direction, self.up);
        self.orientation = Quaternion::from_matrix(&self.view);

        log::debug!(
            "camera focused at ({}, {}, {})",
            self.position.x,
            self.position.y,
            self.position.z
        );

        self.refresh_view();
    }

    /// Rebuilds the cached view matrix from orientation and position.
    ///
    /// The orientation is written into the rotation block, the translation
    /// is the position transformed through a negated copy of the matrix, and
    /// a final transpose lands the result in the column-major convention.
    /// The forward vector is then re-derived by pushing the original look
    /// direction through the updated matrix.
    fn refresh_view(&mut self) {
        self.view.set_orientation(self.orientation);

        let translation = self.view.negated().transform_vector3(self.position);
        self.view.set_translation(translation);

        self.view.transpose();

        self.forward = self.view.transform_vector3(self.direction);
    }
}
