//! Immutable vertex/index containers shared across model instances.
//!
//! A [`Geometry`] is the CPU-side source a renderer uploads from: one vertex
//! array and one index array, validated once at construction and never
//! mutated afterwards. Models wrap it in an `Arc` so every instance of a
//! model renders from the same allocation — instances are placed, geometry
//! is referenced, nothing is copied per placement.
//!
//! Parsing model files into these arrays is a loader's concern, not this
//! module's; only the validated in-memory form lives here.

use crate::mesh::Vertex;
use crate::vector::Vector3;

/// Errors raised when assembling geometry or a model's mesh layout.
#[derive(Debug)]
pub enum GeometryError {
    /// An index references a vertex past the end of the vertex array.
    IndexOutOfRange {
        /// The offending index value.
        index: u32,
        /// Number of vertices actually present.
        vertex_count: usize,
    },
    /// A submesh range extends past the end of the index array.
    SubmeshOutOfRange {
        /// One-past-the-end index of the offending submesh.
        end: u32,
        /// Number of indices actually present.
        index_count: usize,
    },
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::IndexOutOfRange {
                index,
                vertex_count,
            } => {
                write!(
                    f,
                    "index {} out of range for {} vertices",
                    index, vertex_count
                )
            }
            GeometryError::SubmeshOutOfRange { end, index_count } => {
                write!(
                    f,
                    "submesh range ends at {} but only {} indices exist",
                    end, index_count
                )
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Immutable vertex and index data for one model.
///
/// Construction validates that every index lands inside the vertex array;
/// after that the data is read-only and safe to share via `Arc`.
///
/// # Example
///
/// ```
/// use kinema::{Geometry, Vertex};
///
/// let vertices = vec![
///     Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.5, 0.0]),
///     Vertex::new([-1.0, -1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
///     Vertex::new([1.0, -1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0]),
/// ];
/// let triangle = Geometry::new(vertices, vec![0, 1, 2]).unwrap();
/// assert_eq!(triangle.index_count(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct Geometry {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Geometry {
    /// Creates geometry from vertex and index arrays.
    ///
    /// Returns [`GeometryError::IndexOutOfRange`] if any index references a
    /// missing vertex.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Self, GeometryError> {
        let vertex_count = vertices.len();
        for &index in &indices {
            if index as usize >= vertex_count {
                return Err(GeometryError::IndexOutOfRange {
                    index,
                    vertex_count,
                });
            }
        }

        Ok(Self { vertices, indices })
    }

    /// The vertex array.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The index array.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of indices.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Axis-aligned bounding box as `(min, max)` corners.
    pub fn bounds(&self) -> (Vector3, Vector3) {
        let mut min = Vector3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
        let mut max = Vector3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY);

        for v in &self.vertices {
            let [x, y, z] = v.position;
            min = Vector3::new(min.x.min(x), min.y.min(y), min.z.min(z));
            max = Vector3::new(max.x.max(x), max.y.max(y), max.z.max(z));
        }

        (min, max)
    }

    /// Center point of the bounding box.
    pub fn center(&self) -> Vector3 {
        let (min, max) = self.bounds();
        (min + max) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_vertices() -> Vec<Vertex> {
        vec![
            Vertex::new([-0.5, -0.5, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
            Vertex::new([0.5, -0.5, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
            Vertex::new([0.5, 0.5, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0]),
            Vertex::new([-0.5, 0.5, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
        ]
    }

    #[test]
    fn valid_indices_are_accepted() {
        let geom = Geometry::new(quad_vertices(), vec![0, 1, 2, 2, 3, 0]);
        assert!(geom.is_ok());
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let err = Geometry::new(quad_vertices(), vec![0, 1, 4]).unwrap_err();
        match err {
            GeometryError::IndexOutOfRange {
                index,
                vertex_count,
            } => {
                assert_eq!(index, 4);
                assert_eq!(vertex_count, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let geom = Geometry::new(quad_vertices(), vec![0, 1, 2]).unwrap();
        let (min, max) = geom.bounds();
        assert_eq!(min, Vector3::new(-0.5, -0.5, 0.0));
        assert_eq!(max, Vector3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn center_of_symmetric_quad_is_origin() {
        let geom = Geometry::new(quad_vertices(), vec![0, 1, 2]).unwrap();
        assert_eq!(geom.center(), Vector3::ZERO);
    }
}
