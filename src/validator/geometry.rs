//! Geometric invariant checks
//!
//! Four independent read-only aggregations over a subtree: unit scale,
//! canonical origins, face topology, and UV/material cardinality. Each takes
//! the scene by shared reference and allocates its own accumulator, so they
//! can run in any order or concurrently.

use std::collections::HashSet;
use std::fmt;

use nalgebra::Vector3;

use crate::mesh_ops::{self, FaceTally};
use crate::scene::{NodeId, Scene};
use crate::schema::SchemaRegistry;

/// Whether two vectors agree per component within `tolerance`
///
/// With a zero tolerance this is exact equality.
pub(crate) fn vec_matches(a: &Vector3<f64>, b: &Vector3<f64>, tolerance: f64) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= tolerance)
}

fn fmt_vec(v: &Vector3<f64>) -> String {
    format!("({}, {}, {})", v.x, v.y, v.z)
}

/// A node whose scale is not (1, 1, 1)
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleViolation {
    /// Node name
    pub name: String,
    /// The actual scale
    pub scale: Vector3<f64>,
}

impl fmt::Display for ScaleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "2.1 Invalid scale {} of object \"{}\"",
            fmt_vec(&self.scale),
            self.name
        )
    }
}

/// An origin that is where it should not be, or not where it should be
#[derive(Debug, Clone, PartialEq)]
pub enum LocationFinding {
    /// A bilateral temple group sits at the world origin (never aligned)
    TempleAtOrigin {
        /// Temple group name
        name: String,
    },
    /// The root is not at the origin
    RootOffOrigin {
        /// Root name
        name: String,
        /// Its location
        location: Vector3<f64>,
    },
    /// A non-temple node is not at its local origin (strict rule)
    NodeOffOrigin {
        /// Node name
        name: String,
        /// Its location
        location: Vector3<f64>,
    },
}

impl fmt::Display for LocationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationFinding::TempleAtOrigin { name } => {
                write!(f, "3.3 Temple group \"{}\" location in world origin", name)
            }
            LocationFinding::RootOffOrigin { name, location } => write!(
                f,
                "2.1 Invalid location {} of root \"{}\"",
                fmt_vec(location),
                name
            ),
            LocationFinding::NodeOffOrigin { name, location } => write!(
                f,
                "2.1 Invalid location {} of object \"{}\"",
                fmt_vec(location),
                name
            ),
        }
    }
}

/// Collect every node under (and including) `root` whose scale is not the
/// unit vector. Children are reported before their parent.
pub fn check_scale(scene: &Scene, root: NodeId, tolerance: f64) -> Vec<ScaleViolation> {
    fn visit(scene: &Scene, id: NodeId, tolerance: f64, out: &mut Vec<ScaleViolation>) {
        for &child in scene.children(id) {
            visit(scene, child, tolerance, out);
        }
        let Some(node) = scene.get(id) else {
            return;
        };
        let unit = Vector3::new(1.0, 1.0, 1.0);
        if !vec_matches(&node.transform.scale, &unit, tolerance) {
            out.push(ScaleViolation {
                name: node.name().to_string(),
                scale: node.transform.scale,
            });
        }
    }

    let mut out = Vec::new();
    visit(scene, root, tolerance, &mut out);
    out
}

/// Report bilateral temple groups under `root` that sit at the world origin
pub fn check_location(
    scene: &Scene,
    root: NodeId,
    schema: &SchemaRegistry,
    tolerance: f64,
) -> Vec<LocationFinding> {
    fn visit(
        scene: &Scene,
        id: NodeId,
        temples: &[&str],
        tolerance: f64,
        out: &mut Vec<LocationFinding>,
    ) {
        for &child in scene.children(id) {
            visit(scene, child, temples, tolerance, out);
        }
        let name = scene.name(id);
        if !temples.contains(&name) {
            return;
        }
        if let Ok(location) = scene.world_location(id)
            && vec_matches(&location, &Vector3::zeros(), tolerance)
        {
            out.push(LocationFinding::TempleAtOrigin {
                name: name.to_string(),
            });
        }
    }

    let temples = schema.side_groups();
    let mut out = Vec::new();
    visit(scene, root, &temples, tolerance, &mut out);
    out
}

/// The root must sit exactly at the origin
pub fn check_root_origin(scene: &Scene, root: NodeId, tolerance: f64) -> Option<LocationFinding> {
    let node = scene.get(root)?;
    let location = node.transform.location;
    (!vec_matches(&location, &Vector3::zeros(), tolerance)).then(|| {
        LocationFinding::RootOffOrigin {
            name: node.name().to_string(),
            location,
        }
    })
}

/// Strict origin rule: every descendant of `root` except the temple groups
/// must sit at its local origin
pub fn check_origins(
    scene: &Scene,
    root: NodeId,
    schema: &SchemaRegistry,
    tolerance: f64,
) -> Vec<LocationFinding> {
    let temples = schema.side_groups();
    scene
        .subtree(root)
        .into_iter()
        .skip(1)
        .filter_map(|id| scene.get(id))
        .filter(|node| !temples.contains(&node.name()))
        .filter(|node| !vec_matches(&node.transform.location, &Vector3::zeros(), tolerance))
        .map(|node| LocationFinding::NodeOffOrigin {
            name: node.name().to_string(),
            location: node.transform.location,
        })
        .collect()
}

/// Sum triangles and n-gons over every mesh in the subtree
pub fn check_faces(scene: &Scene, root: NodeId) -> FaceTally {
    let own = scene
        .get(root)
        .and_then(|node| node.mesh_data())
        .map(mesh_ops::count_faces)
        .unwrap_or_default();
    scene
        .children(root)
        .iter()
        .fold(own, |tally, &child| tally + check_faces(scene, child))
}

/// Visit the topmost mesh nodes of a subtree: a node with mesh data is
/// handed to `f` and not descended into; any other node is descended into.
fn for_each_top_mesh<'a>(
    scene: &'a Scene,
    id: NodeId,
    f: &mut impl FnMut(&'a crate::scene::MeshData),
) {
    match scene.get(id).and_then(|node| node.mesh_data()) {
        Some(mesh) => f(mesh),
        None => {
            for &child in scene.children(id) {
                for_each_top_mesh(scene, child, f);
            }
        }
    }
}

/// Number of distinct UV channel names across the subtree's meshes
pub fn count_uv_maps(scene: &Scene, root: NodeId) -> usize {
    let mut names: HashSet<&str> = HashSet::new();
    for_each_top_mesh(scene, root, &mut |mesh| {
        names.extend(mesh.uv_layers.iter().map(String::as_str));
    });
    names.len()
}

/// Number of distinct materials referenced across the subtree's meshes
pub fn count_materials(scene: &Scene, root: NodeId) -> usize {
    let mut materials = HashSet::new();
    for_each_top_mesh(scene, root, &mut |mesh| {
        materials.extend(mesh.materials());
    });
    materials.len()
}
