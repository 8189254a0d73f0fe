//! Scene graph holding the single live asset tree
//!
//! Nodes live in an arena keyed by [`NodeId`]. Each node is owned by the
//! scene; the parent field is a back-reference for upward traversal and the
//! children list is the forward edge. Every mutator here keeps both ends of a
//! link consistent, and keeps the flat name index (the host's "scene
//! collection" lookup) in sync with node names.

mod mesh;
mod node;

pub use mesh::{MaterialRef, MeshData, Polygon};
pub use node::{EmptyDisplay, NodeKind, PLACEHOLDER_DISPLAY_SIZE, SceneNode, Transform};

use std::collections::HashMap;

use nalgebra::{Matrix4, Vector3};
use slotmap::{SlotMap, new_key_type};

use crate::error::{Error, Result};
use crate::mesh_ops;

new_key_type! {
    /// Handle to a node in a [`Scene`]
    pub struct NodeId;
}

/// Name of the root node every asset tree starts from
pub const ROOT_NAME: &str = "Model";

/// The asset tree plus a flat name lookup
#[derive(Debug, Clone)]
pub struct Scene {
    nodes: SlotMap<NodeId, SceneNode>,
    names: HashMap<String, NodeId>,
    root: NodeId,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a scene containing only the root node `"Model"`
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::empty(ROOT_NAME));
        let mut names = HashMap::new();
        names.insert(ROOT_NAME.to_string(), root);
        Self { nodes, names, root }
    }

    /// The root node created with the scene
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes, the root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a scene owns at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Borrow a node
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Mutably borrow a node's data (kind, transform, mesh)
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    /// Borrow a node, failing with [`Error::NodeNotFound`]
    pub fn node(&self, id: NodeId) -> Result<&SceneNode> {
        self.nodes.get(id).ok_or_else(|| Error::stale_handle("node"))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| Error::stale_handle("node"))
    }

    /// Name of a node, or `""` for a stale handle
    pub fn name(&self, id: NodeId) -> &str {
        self.nodes.get(id).map(|n| n.name.as_str()).unwrap_or("")
    }

    /// Look up a node by exact name
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Iterate over all nodes in arena order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter()
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Children of a node; empty for stale handles
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Link a node into the scene without a parent.
    ///
    /// The node's name is made unique first, see [`Scene::rename`].
    pub fn add_node(&mut self, mut node: SceneNode) -> NodeId {
        node.parent = None;
        node.children.clear();
        let requested = std::mem::take(&mut node.name);
        let id = self.nodes.insert(node);
        let name = self.unique_name(&requested, id);
        self.names.insert(name.clone(), id);
        if let Some(n) = self.nodes.get_mut(id) {
            n.name = name;
        }
        id
    }

    /// Link a node into the scene under `parent`
    pub fn add_child(&mut self, parent: NodeId, node: SceneNode) -> Result<NodeId> {
        self.node(parent)?;
        let id = self.add_node(node);
        self.attach(id, parent)?;
        Ok(id)
    }

    /// Rename a node and return the name actually assigned.
    ///
    /// Names are unique per scene: when `name` belongs to another node the
    /// first free `name.NNN` variant is used instead.
    pub fn rename(&mut self, id: NodeId, name: &str) -> Result<String> {
        let current = self.node(id)?.name.clone();
        if current == name {
            return Ok(current);
        }
        let assigned = self.unique_name(name, id);
        if self.names.get(&current) == Some(&id) {
            self.names.remove(&current);
        }
        self.names.insert(assigned.clone(), id);
        self.node_mut(id)?.name = assigned.clone();
        Ok(assigned)
    }

    fn unique_name(&self, requested: &str, id: NodeId) -> String {
        let free = |candidate: &str| match self.names.get(candidate) {
            Some(owner) => *owner == id,
            None => true,
        };
        if free(requested) {
            return requested.to_string();
        }
        let mut suffix = 1usize;
        loop {
            let candidate = format!("{}.{:03}", requested, suffix);
            if free(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    /// Make `child` a child of `parent`, detaching it from any previous parent
    pub fn attach(&mut self, child: NodeId, parent: NodeId) -> Result<()> {
        self.node(child)?;
        self.node(parent)?;

        // Walk up from the new parent; meeting the child means a cycle
        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == child {
                return Err(Error::CyclicHierarchy(format!(
                    "cannot attach '{}' under '{}', which is itself or one of its descendants",
                    self.name(child),
                    self.name(parent)
                )));
            }
            cursor = self.parent(current);
        }

        self.detach(child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        log::debug!(
            "attached '{}' under '{}'",
            self.name(child),
            self.name(parent)
        );
        Ok(())
    }

    /// Clear a node's parent link, keeping it in the scene
    pub fn detach(&mut self, child: NodeId) -> Result<()> {
        let Some(old_parent) = self.node(child)?.parent else {
            return Ok(());
        };
        if let Some(p) = self.nodes.get_mut(old_parent)
            && let Some(pos) = p.children.iter().position(|&c| c == child)
        {
            p.children.remove(pos);
        }
        self.node_mut(child)?.parent = None;
        Ok(())
    }

    /// Remove a node and its whole subtree from the scene
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(Error::MissingRoot(format!(
                "the root '{}' cannot be removed",
                self.name(id)
            )));
        }
        let doomed = self.subtree(id);
        self.detach(id)?;
        for node_id in doomed {
            if let Some(node) = self.nodes.remove(node_id)
                && self.names.get(&node.name) == Some(&node_id)
            {
                self.names.remove(&node.name);
            }
        }
        Ok(())
    }

    /// Topmost ancestor of a node
    pub fn root_of(&self, id: NodeId) -> Result<NodeId> {
        let mut current = id;
        while let Some(parent) = self.node(current)?.parent {
            current = parent;
        }
        Ok(current)
    }

    /// The node and all its descendants, parents before children
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Local matrix of a node
    pub fn local_matrix(&self, id: NodeId) -> Result<Matrix4<f64>> {
        Ok(self.node(id)?.transform.matrix())
    }

    /// World matrix of a node, composing all ancestor transforms
    pub fn world_matrix(&self, id: NodeId) -> Result<Matrix4<f64>> {
        let mut matrix = self.local_matrix(id)?;
        let mut cursor = self.node(id)?.parent;
        while let Some(parent) = cursor {
            let node = self.node(parent)?;
            matrix = node.transform.matrix() * matrix;
            cursor = node.parent;
        }
        Ok(matrix)
    }

    /// World-space position of a node's origin
    pub fn world_location(&self, id: NodeId) -> Result<Vector3<f64>> {
        let m = self.world_matrix(id)?;
        Ok(Vector3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)]))
    }

    /// Link an independent, unparented copy of a node's own data.
    ///
    /// Children are not copied; the copy's name is made unique.
    pub fn duplicate(&mut self, id: NodeId) -> Result<NodeId> {
        let copy = self.node(id)?.detached_copy();
        Ok(self.add_node(copy))
    }

    /// Fold a node's translation into its geometry.
    ///
    /// The node's location becomes zero; its mesh vertices and its children's
    /// locations absorb the offset so nothing moves in world space. A node
    /// with a zero scale component cannot be baked and is left untouched.
    pub fn apply_location(&mut self, id: NodeId) -> Result<()> {
        let node = self.node(id)?;
        let location = node.transform.location;
        if location == Vector3::zeros() {
            return Ok(());
        }
        let Some(offset) = node.transform.inverse_linear(&location) else {
            log::warn!(
                "cannot bake location of '{}': degenerate scale {:?}",
                node.name,
                node.transform.scale
            );
            return Ok(());
        };
        self.shift_contents(id, &offset)?;
        self.node_mut(id)?.transform.location = Vector3::zeros();
        log::debug!("baked location {:?} of '{}'", location, self.name(id));
        Ok(())
    }

    /// Move a node's origin to `location` (parent space) without moving its
    /// geometry or its children in world space.
    pub fn set_origin(&mut self, id: NodeId, location: Vector3<f64>) -> Result<()> {
        let node = self.node(id)?;
        let delta = node.transform.location - location;
        if delta == Vector3::zeros() {
            return Ok(());
        }
        let Some(offset) = node.transform.inverse_linear(&delta) else {
            return Err(Error::non_unit_scale(&node.name, &[node.name.clone()]));
        };
        self.shift_contents(id, &offset)?;
        self.node_mut(id)?.transform.location = location;
        Ok(())
    }

    /// Translate a node's own vertices and its direct children's locations
    fn shift_contents(&mut self, id: NodeId, offset: &Vector3<f64>) -> Result<()> {
        let node = self.node_mut(id)?;
        if let Some(mesh) = node.mesh_data_mut() {
            mesh_ops::translate_vertices(mesh, offset);
        }
        let children = node.children.clone();
        for child in children {
            self.node_mut(child)?.transform.location += offset;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, UnitQuaternion};

    fn unit_triangle() -> MeshData {
        MeshData::from_geometry(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![Polygon::triangle(0, 1, 2)],
        )
    }

    fn world_vertices(scene: &Scene, id: NodeId) -> Vec<Point3<f64>> {
        let m = scene.world_matrix(id).unwrap();
        scene
            .node(id)
            .unwrap()
            .mesh_data()
            .unwrap()
            .vertices
            .iter()
            .map(|v| m.transform_point(v))
            .collect()
    }

    #[test]
    fn test_new_scene_has_root() {
        let scene = Scene::new();
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.find(ROOT_NAME), Some(scene.root()));
        assert_eq!(scene.name(scene.root()), "Model");
    }

    #[test]
    fn test_names_are_made_unique() {
        let mut scene = Scene::new();
        let a = scene.add_node(SceneNode::empty("frame"));
        let b = scene.add_node(SceneNode::empty("frame"));
        let c = scene.add_node(SceneNode::empty("frame"));
        assert_eq!(scene.name(a), "frame");
        assert_eq!(scene.name(b), "frame.001");
        assert_eq!(scene.name(c), "frame.002");
        assert_eq!(scene.find("frame.001"), Some(b));
    }

    #[test]
    fn test_rename_updates_index() {
        let mut scene = Scene::new();
        let id = scene.add_node(SceneNode::empty("Cube"));
        assert_eq!(scene.rename(id, "frame").unwrap(), "frame");
        assert_eq!(scene.find("Cube"), None);
        assert_eq!(scene.find("frame"), Some(id));
        // Renaming to its own name is a no-op
        assert_eq!(scene.rename(id, "frame").unwrap(), "frame");
    }

    #[test]
    fn test_attach_keeps_links_consistent() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.add_child(root, SceneNode::empty("frame")).unwrap();
        let b = scene.add_child(root, SceneNode::empty("lenses")).unwrap();
        let leaf = scene.add_child(a, SceneNode::empty("front_rim")).unwrap();

        scene.attach(leaf, b).unwrap();
        assert!(scene.children(a).is_empty());
        assert_eq!(scene.children(b), &[leaf]);
        assert_eq!(scene.parent(leaf), Some(b));
    }

    #[test]
    fn test_attach_rejects_cycles() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.add_child(root, SceneNode::empty("temples")).unwrap();
        let b = scene.add_child(a, SceneNode::empty("temple_left")).unwrap();

        let err = scene.attach(a, b).unwrap_err();
        assert!(matches!(err, Error::CyclicHierarchy(_)));
        assert!(scene.attach(a, a).is_err());
        assert_eq!(scene.parent(a), Some(root));
    }

    #[test]
    fn test_world_matrix_composes_ancestors() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene
            .add_child(root, SceneNode::empty("temples").with_location(1.0, 0.0, 0.0))
            .unwrap();
        let b = scene
            .add_child(a, SceneNode::empty("temple_left").with_location(0.0, 2.0, 0.0))
            .unwrap();
        assert_eq!(
            scene.world_location(b).unwrap(),
            Vector3::new(1.0, 2.0, 0.0)
        );
    }

    #[test]
    fn test_apply_location_preserves_world_geometry() {
        let mut scene = Scene::new();
        let root = scene.root();
        let group = scene
            .add_child(root, SceneNode::empty("temple_left").with_location(2.0, 0.0, 0.0))
            .unwrap();
        let mesh = scene
            .add_child(
                group,
                SceneNode::mesh("temple_left_outer", unit_triangle()).with_location(0.5, 0.5, 0.0),
            )
            .unwrap();
        let before = world_vertices(&scene, mesh);

        scene.apply_location(group).unwrap();
        assert_eq!(scene.node(group).unwrap().transform.location, Vector3::zeros());
        assert_eq!(world_vertices(&scene, mesh), before);

        scene.apply_location(mesh).unwrap();
        assert_eq!(scene.node(mesh).unwrap().transform.location, Vector3::zeros());
        assert_eq!(world_vertices(&scene, mesh), before);
    }

    #[test]
    fn test_apply_location_respects_rotation() {
        let mut scene = Scene::new();
        let root = scene.root();
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f64::consts::PI);
        let mesh = scene
            .add_child(
                root,
                SceneNode::mesh("lens_left", unit_triangle())
                    .with_location(4.0, 0.0, 0.0)
                    .with_rotation(rotation),
            )
            .unwrap();
        let before = world_vertices(&scene, mesh);
        scene.apply_location(mesh).unwrap();
        let after = world_vertices(&scene, mesh);
        for (a, b) in before.iter().zip(after.iter()) {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn test_set_origin_keeps_children_in_place() {
        let mut scene = Scene::new();
        let root = scene.root();
        let group = scene.add_child(root, SceneNode::empty("temple_left")).unwrap();
        let mesh = scene
            .add_child(group, SceneNode::mesh("screw_left", unit_triangle()))
            .unwrap();
        let before = world_vertices(&scene, mesh);

        scene.set_origin(group, Vector3::new(3.0, 1.0, 0.0)).unwrap();
        assert_eq!(
            scene.node(mesh).unwrap().transform.location,
            Vector3::new(-3.0, -1.0, 0.0)
        );
        assert_eq!(world_vertices(&scene, mesh), before);
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut scene = Scene::new();
        let root = scene.root();
        let original = scene
            .add_child(root, SceneNode::mesh("lens_left", unit_triangle()))
            .unwrap();
        let copy = scene.duplicate(original).unwrap();

        assert_eq!(scene.name(copy), "lens_left.001");
        assert_eq!(scene.parent(copy), None);
        scene.get_mut(copy).unwrap().mesh.as_mut().unwrap().vertices[0].x = 9.0;
        assert_eq!(
            scene.node(original).unwrap().mesh_data().unwrap().vertices[0].x,
            0.0
        );
    }

    #[test]
    fn test_remove_drops_subtree_and_names() {
        let mut scene = Scene::new();
        let root = scene.root();
        let group = scene.add_child(root, SceneNode::empty("lenses")).unwrap();
        scene.add_child(group, SceneNode::empty("lens_left")).unwrap();

        scene.remove(group).unwrap();
        assert_eq!(scene.len(), 1);
        assert!(scene.find("lens_left").is_none());
        assert!(scene.children(root).is_empty());
        assert!(scene.remove(root).is_err());
    }
}
