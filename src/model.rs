//! Models: shared geometry plus the instances placed from it.
//!
//! A [`Model`] ties together one immutable [`Geometry`] (shared by `Arc`,
//! never copied), a mesh layout describing how its index buffer is sliced
//! for drawing, and any number of [`Instance`]s. The geometry and the layout
//! arrive independently — loaders typically fetch binary vertex data and a
//! JSON layout as separate requests — so a model reports
//! [`Model::is_ready`] only once both halves are present. Instances may be
//! created at any point, including before the data lands; their matrices are
//! safe to read for rendering only after the model is ready.

use std::sync::Arc;

use crate::geometry::{Geometry, GeometryError};
use crate::instance::Instance;
use crate::mesh::Mesh;

/// Handle to an instance created by [`Model::create_instance`].
///
/// Instances are never destroyed, so a handle stays valid for the life of
/// its model.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct InstanceId(pub usize);

/// Shared geometry, its mesh layout, and the instances placed from it.
///
/// # Example
///
/// ```
/// use kinema::{Geometry, Mesh, Model, Vertex};
/// use std::sync::Arc;
///
/// let geometry = Arc::new(
///     Geometry::new(
///         vec![
///             Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.5, 0.0]),
///             Vertex::new([-1.0, -1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
///             Vertex::new([1.0, -1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0]),
///         ],
///         vec![0, 1, 2],
///     )
///     .unwrap(),
/// );
///
/// let mut model = Model::new();
/// model.set_geometry(geometry).unwrap();
/// model.set_meshes(vec![Mesh::single(3)]).unwrap();
/// assert!(model.is_ready());
///
/// let id = model.create_instance();
/// model.instance_mut(id).move_by(2.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Model {
    geometry: Option<Arc<Geometry>>,
    meshes: Vec<Mesh>,
    instances: Vec<Instance>,
}

impl Model {
    /// Creates an empty model: no geometry, no layout, no instances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies the model's geometry. The first write wins.
    ///
    /// A second call is ignored with a warning — geometry is immutable once
    /// the renderer may have uploaded it. If a mesh layout arrived first,
    /// its submesh ranges are validated against the new geometry.
    pub fn set_geometry(&mut self, geometry: Arc<Geometry>) -> Result<(), GeometryError> {
        if self.geometry.is_some() {
            log::warn!("model geometry already set; ignoring replacement");
            return Ok(());
        }

        validate_meshes(&self.meshes, &geometry)?;

        log::debug!(
            "model geometry ready: {} vertices, {} indices",
            geometry.vertex_count(),
            geometry.index_count()
        );
        self.geometry = Some(geometry);
        Ok(())
    }

    /// Supplies the model's mesh layout.
    ///
    /// If the geometry is already present, every submesh range is validated
    /// against its index buffer.
    pub fn set_meshes(&mut self, meshes: Vec<Mesh>) -> Result<(), GeometryError> {
        if let Some(geometry) = &self.geometry {
            validate_meshes(&meshes, geometry)?;
        }

        self.meshes = meshes;
        Ok(())
    }

    /// Whether both the geometry and the mesh layout have arrived.
    ///
    /// This is the readiness flag the rendering collaborator polls before
    /// reading instance matrices for this model.
    pub fn is_ready(&self) -> bool {
        self.geometry.is_some() && !self.meshes.is_empty()
    }

    /// The shared geometry, if it has arrived.
    ///
    /// Every instance of this model renders from this single allocation;
    /// collaborators clone the `Arc`, never the data.
    pub fn geometry(&self) -> Option<&Arc<Geometry>> {
        self.geometry.as_ref()
    }

    /// The mesh layout.
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// Creates a new instance at the default pose and returns its handle.
    ///
    /// Instances can be created before the model's data arrives.
    pub fn create_instance(&mut self) -> InstanceId {
        let id = InstanceId(self.instances.len());
        self.instances.push(Instance::new());
        id
    }

    /// All instances, in creation order.
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// An instance by handle.
    pub fn instance(&self, id: InstanceId) -> &Instance {
        &self.instances[id.0]
    }

    /// A mutable instance by handle.
    pub fn instance_mut(&mut self, id: InstanceId) -> &mut Instance {
        &mut self.instances[id.0]
    }
}

fn validate_meshes(meshes: &[Mesh], geometry: &Geometry) -> Result<(), GeometryError> {
    let index_count = geometry.index_count();
    for mesh in meshes {
        for submesh in &mesh.submeshes {
            if submesh.index_end() as usize > index_count {
                return Err(GeometryError::SubmeshOutOfRange {
                    end: submesh.index_end(),
                    index_count,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{SubMesh, Vertex};

    fn triangle_geometry() -> Arc<Geometry> {
        Arc::new(
            Geometry::new(
                vec![
                    Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.5, 0.0]),
                    Vertex::new([-1.0, -1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
                    Vertex::new([1.0, -1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0]),
                ],
                vec![0, 1, 2],
            )
            .unwrap(),
        )
    }

    #[test]
    fn readiness_requires_both_geometry_and_layout() {
        let mut model = Model::new();
        assert!(!model.is_ready());

        model.set_geometry(triangle_geometry()).unwrap();
        assert!(!model.is_ready());

        model.set_meshes(vec![Mesh::single(3)]).unwrap();
        assert!(model.is_ready());
    }

    #[test]
    fn layout_may_arrive_before_geometry() {
        let mut model = Model::new();
        model.set_meshes(vec![Mesh::single(3)]).unwrap();
        assert!(!model.is_ready());

        model.set_geometry(triangle_geometry()).unwrap();
        assert!(model.is_ready());
    }

    #[test]
    fn second_geometry_set_is_ignored() {
        let mut model = Model::new();
        let first = triangle_geometry();
        model.set_geometry(Arc::clone(&first)).unwrap();
        model.set_geometry(triangle_geometry()).unwrap();

        assert!(Arc::ptr_eq(model.geometry().unwrap(), &first));
    }

    #[test]
    fn oversized_submesh_is_rejected() {
        let mut model = Model::new();
        model.set_geometry(triangle_geometry()).unwrap();

        let err = model
            .set_meshes(vec![Mesh::new(vec![SubMesh::new(0, 6)])])
            .unwrap_err();
        match err {
            GeometryError::SubmeshOutOfRange { end, index_count } => {
                assert_eq!(end, 6);
                assert_eq!(index_count, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn oversized_submesh_is_rejected_when_geometry_arrives_second() {
        let mut model = Model::new();
        model
            .set_meshes(vec![Mesh::new(vec![SubMesh::new(0, 6)])])
            .unwrap();

        assert!(model.set_geometry(triangle_geometry()).is_err());
    }

    #[test]
    fn instances_share_one_geometry_allocation() {
        let mut model = Model::new();
        model.set_geometry(triangle_geometry()).unwrap();
        model.set_meshes(vec![Mesh::single(3)]).unwrap();

        let a = model.create_instance();
        let b = model.create_instance();

        model.instance_mut(a).move_by(1.0);
        model.instance_mut(b).move_by(-2.0);

        // Distinct placements...
        assert_ne!(
            model.instance(a).model_matrix(),
            model.instance(b).model_matrix()
        );

        // ...over the same shared buffers.
        let geom_for_a = Arc::clone(model.geometry().unwrap());
        let geom_for_b = Arc::clone(model.geometry().unwrap());
        assert!(Arc::ptr_eq(&geom_for_a, &geom_for_b));
    }

    #[test]
    fn instances_can_exist_before_data_arrives() {
        let mut model = Model::new();
        let id = model.create_instance();
        model.instance_mut(id).rotate(0.5);

        assert!(!model.is_ready());
        assert_eq!(model.instances().len(), 1);
    }
}
