//! # Kinema
//!
//! **The spatial transform core of a real-time 3D viewer.**
//!
//! Kinema owns the math a renderer doesn't want to think about: vector,
//! quaternion, and matrix primitives, and the camera and model-instance
//! kinematics built on them. Input handling feeds it raw deltas (angles,
//! distances); it hands back column-major matrices ready to upload as
//! uniforms. It opens no windows, compiles no shaders, and touches no GPU —
//! those collaborators sit on either side of it.
//!
//! ## Quick Start
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
//! // Per frame: apply input deltas, then read the derived matrices.
//! camera.move_by(0.1);
//! camera.rotate(0.0, 0.01);
//!
//! let view: &[f32; 16] = camera.view_matrix().as_array();
//! let projection: &[f32; 16] = camera.projection_matrix().as_array();
//! # let _ = (view, projection);
//! ```
//!
//! ## Design
//!
//! - **Quaternions are the source of truth** — orientations accumulate as
//!   quaternions and are expanded into matrices only when a derived matrix
//!   is rebuilt, re-normalized on every composition to stay stable across
//!   indefinitely many updates.
//! - **Matrices are cached, not lazy** — `move`/`rotate` calls re-derive
//!   them eagerly; finish a frame's mutations before reading.
//! - **Payload-ready types** — [`Matrix4`], [`Vector3`], and [`Vertex`] are
//!   `#[repr(C)]` + [`bytemuck::Pod`], so they cast straight into upload
//!   buffers.
//! - **Single-threaded by design** — nothing locks, nothing suspends;
//!   shared geometry is immutable behind an `Arc`.

mod camera;
mod geometry;
mod instance;
mod light;
mod matrix;
mod mesh;
mod model;
mod quaternion;
mod vector;

pub use camera::{Camera, Perspective};
pub use geometry::{Geometry, GeometryError};
pub use instance::Instance;
pub use light::Light;
pub use matrix::Matrix4;
pub use mesh::{Mesh, SubMesh, Vertex};
pub use model::{InstanceId, Model};
pub use quaternion::Quaternion;
pub use vector::{Vector3, WORLD_UP};
