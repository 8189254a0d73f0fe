//! Mesh payload carried by mesh nodes

use nalgebra::Point3;

/// A face of a mesh, stored as indices into [`MeshData::vertices`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    /// Vertex indices in winding order
    pub vertices: Vec<usize>,
}

impl Polygon {
    /// Create a polygon from vertex indices
    pub fn new(vertices: Vec<usize>) -> Self {
        Self { vertices }
    }

    /// Create a three-sided polygon
    pub fn triangle(v1: usize, v2: usize, v3: usize) -> Self {
        Self {
            vertices: vec![v1, v2, v3],
        }
    }

    /// Number of corners of this face
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Reference to a material owned by the host
///
/// Two slots referencing the same material name count as one material.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaterialRef(pub String);

impl MaterialRef {
    /// Create a material reference by name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Material name
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Geometry and shading references of a mesh node, in the node's local space
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    /// Vertex positions
    pub vertices: Vec<Point3<f64>>,
    /// Faces
    pub polygons: Vec<Polygon>,
    /// Material slots; an empty slot is `None`
    pub material_slots: Vec<Option<MaterialRef>>,
    /// Names of the UV channels
    pub uv_layers: Vec<String>,
}

impl MeshData {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from vertices and faces
    pub fn from_geometry(vertices: Vec<Point3<f64>>, polygons: Vec<Polygon>) -> Self {
        Self {
            vertices,
            polygons,
            material_slots: Vec::new(),
            uv_layers: Vec::new(),
        }
    }

    /// Add a material slot referencing `name`
    pub fn with_material(mut self, name: impl Into<String>) -> Self {
        self.material_slots.push(Some(MaterialRef::new(name)));
        self
    }

    /// Add an empty material slot
    pub fn with_empty_slot(mut self) -> Self {
        self.material_slots.push(None);
        self
    }

    /// Add a UV channel
    pub fn with_uv_layer(mut self, name: impl Into<String>) -> Self {
        self.uv_layers.push(name.into());
        self
    }

    /// Iterate over the materials referenced by non-empty slots
    pub fn materials(&self) -> impl Iterator<Item = &MaterialRef> {
        self.material_slots.iter().flatten()
    }
}
