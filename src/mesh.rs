//! Vertex layout and draw-range bookkeeping for shared geometry.
//!
//! - [`Vertex`] — the interleaved position/normal/UV format a renderer
//!   uploads verbatim
//! - [`SubMesh`] — one contiguous index range drawn in a single call
//! - [`Mesh`] — a named group of submeshes within a model's index buffer
//!
//! None of these own GPU resources; they describe how a [`Geometry`]'s
//! buffers are sliced for drawing. Texture binding is the rendering
//! collaborator's concern and is not represented here.
//!
//! [`Geometry`]: crate::Geometry

/// An interleaved vertex with position, normal, and texture coordinates.
///
/// `#[repr(C)]` with a [`bytemuck::Pod`] derive, so a `&[Vertex]` casts
/// directly to the byte slice a GPU vertex buffer is created from. Each
/// vertex occupies 32 bytes: position at offset 0, normal at 12, uv at 24.
///
/// # Example
///
/// ```
/// use kinema::Vertex;
///
/// let v = Vertex::new(
///     [0.0, 1.0, 0.0],  // position
///     [0.0, 1.0, 0.0],  // normal (should be normalized)
///     [0.5, 0.5],       // uv
/// );
/// let bytes: &[u8] = bytemuck::bytes_of(&v);
/// assert_eq!(bytes.len(), 32);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in model space.
    pub position: [f32; 3],
    /// Surface normal (should be normalized for correct lighting).
    pub normal: [f32; 3],
    /// Texture coordinates, typically in `[0, 1]`.
    pub uv: [f32; 2],
}

impl Vertex {
    /// Creates a vertex from its attributes.
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// One contiguous range of a model's index buffer, drawn in a single call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SubMesh {
    /// Offset of the first index, in indices (not bytes).
    pub index_offset: u32,
    /// Number of indices in the range.
    pub index_len: u32,
}

impl SubMesh {
    /// Creates a submesh covering `index_len` indices from `index_offset`.
    pub const fn new(index_offset: u32, index_len: u32) -> Self {
        Self {
            index_offset,
            index_len,
        }
    }

    /// One-past-the-end index of the range.
    pub const fn index_end(&self) -> u32 {
        self.index_offset + self.index_len
    }
}

/// A group of submeshes sharing one material slot of a model.
///
/// A model exported with two materials arrives as two meshes, each listing
/// the index ranges drawn with that material.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// The draw ranges belonging to this mesh.
    pub submeshes: Vec<SubMesh>,
}

impl Mesh {
    /// Creates a mesh from its submesh ranges.
    pub fn new(submeshes: Vec<SubMesh>) -> Self {
        Self { submeshes }
    }

    /// Creates a mesh with a single submesh spanning `index_len` indices.
    pub fn single(index_len: u32) -> Self {
        Self {
            submeshes: vec![SubMesh::new(0, index_len)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_32_bytes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }

    #[test]
    fn submesh_end_is_offset_plus_len() {
        let sm = SubMesh::new(6, 12);
        assert_eq!(sm.index_end(), 18);
    }

    #[test]
    fn single_mesh_spans_from_zero() {
        let mesh = Mesh::single(36);
        assert_eq!(mesh.submeshes, vec![SubMesh::new(0, 36)]);
    }
}
