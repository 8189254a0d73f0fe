//! Scene nodes and their local transforms

use nalgebra::{Matrix4, UnitQuaternion, Vector3};

use super::NodeId;
use super::mesh::MeshData;

/// Display size given to synthesized placeholder nodes
pub const PLACEHOLDER_DISPLAY_SIZE: f64 = 0.2;

/// How an empty node is drawn by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyDisplay {
    /// Three axis lines through the origin
    PlainAxes,
    /// Arrowed axes
    Arrows,
    /// Wire cube
    Cube,
}

/// What a node is
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Non-renderable grouping node
    Empty {
        /// Viewport drawing style
        display: EmptyDisplay,
        /// Viewport drawing size
        size: f64,
    },
    /// Renderable node; its geometry lives in [`SceneNode::mesh`]
    Mesh,
}

impl NodeKind {
    /// The axis-marker kind used for synthesized hierarchy placeholders
    pub fn axis_marker() -> Self {
        NodeKind::Empty {
            display: EmptyDisplay::PlainAxes,
            size: PLACEHOLDER_DISPLAY_SIZE,
        }
    }

    /// Whether this is a mesh node
    pub fn is_mesh(&self) -> bool {
        matches!(self, NodeKind::Mesh)
    }
}

/// Local transform of a node relative to its parent
///
/// Composition order is translation * rotation * scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Translation
    pub location: Vector3<f64>,
    /// Orientation
    pub rotation: UnitQuaternion<f64>,
    /// Per-axis scale
    pub scale: Vector3<f64>,
}

impl Transform {
    /// The identity transform
    pub fn identity() -> Self {
        Self {
            location: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Identity rotation and scale with the given translation
    pub fn from_location(location: Vector3<f64>) -> Self {
        Self {
            location,
            ..Self::identity()
        }
    }

    /// Homogeneous local matrix
    pub fn matrix(&self) -> Matrix4<f64> {
        Matrix4::new_translation(&self.location)
            * self.rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// Map a parent-space offset through the inverse of this transform's
    /// rotation and scale.
    ///
    /// Returns `None` when a scale component is zero.
    pub fn inverse_linear(&self, offset: &Vector3<f64>) -> Option<Vector3<f64>> {
        if self.scale.iter().any(|s| *s == 0.0) {
            return None;
        }
        let rotated = self.rotation.inverse_transform_vector(offset);
        Some(rotated.component_div(&self.scale))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// A named, transformable node of the asset tree
///
/// Hierarchy links and the name are owned by [`super::Scene`], which keeps
/// them consistent with the name index and with the other end of each link.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Node kind
    pub kind: NodeKind,
    /// Local transform
    pub transform: Transform,
    /// Mesh payload; expected on mesh nodes only
    pub mesh: Option<MeshData>,
}

impl SceneNode {
    /// Create an empty (grouping) node
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Empty {
                display: EmptyDisplay::PlainAxes,
                size: 1.0,
            },
            transform: Transform::identity(),
            mesh: None,
        }
    }

    /// Create a non-renderable axis-marker node
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::axis_marker(),
            ..Self::empty(name)
        }
    }

    /// Create a mesh node
    pub fn mesh(name: impl Into<String>, mesh: MeshData) -> Self {
        Self {
            kind: NodeKind::Mesh,
            mesh: Some(mesh),
            ..Self::empty(name)
        }
    }

    /// Set the local translation
    pub fn with_location(mut self, x: f64, y: f64, z: f64) -> Self {
        self.transform.location = Vector3::new(x, y, z);
        self
    }

    /// Set the local scale
    pub fn with_scale(mut self, x: f64, y: f64, z: f64) -> Self {
        self.transform.scale = Vector3::new(x, y, z);
        self
    }

    /// Set the local rotation
    pub fn with_rotation(mut self, rotation: UnitQuaternion<f64>) -> Self {
        self.transform.rotation = rotation;
        self
    }

    /// Node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent handle, `None` for unparented nodes
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child handles
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Mesh payload of a mesh node.
    ///
    /// `None` for empties and for mesh nodes that carry no geometry.
    pub fn mesh_data(&self) -> Option<&MeshData> {
        if self.kind.is_mesh() {
            self.mesh.as_ref()
        } else {
            None
        }
    }

    pub(crate) fn mesh_data_mut(&mut self) -> Option<&mut MeshData> {
        if self.kind.is_mesh() {
            self.mesh.as_mut()
        } else {
            None
        }
    }

    /// A copy of this node's own data with no hierarchy links
    pub(crate) fn detached_copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            parent: None,
            children: Vec::new(),
            kind: self.kind.clone(),
            transform: self.transform.clone(),
            mesh: self.mesh.clone(),
        }
    }
}
