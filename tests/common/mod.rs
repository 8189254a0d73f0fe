//! Shared fixtures for the integration tests
//!
//! The fixtures build complete eyewear trees. All coordinates are dyadic
//! rationals so baking and re-deriving origins is exact in `f64`.

#![allow(dead_code)]

use eyewear_qa::{MeshData, NodeId, Polygon, Scene, SceneNode, Side};
use nalgebra::Point3;

/// UV channel shared by every fixture mesh
pub const UV_MAP: &str = "UVMap";

/// Material shared by every fixture mesh
pub const MATERIAL: &str = "acetate";

/// A single triangle whose bounding box is exactly `min..max`
pub fn wedge(min: [f64; 3], max: [f64; 3]) -> MeshData {
    MeshData::from_geometry(
        vec![
            Point3::from(min),
            Point3::from(max),
            Point3::new(min[0], max[1], min[2]),
        ],
        vec![Polygon::triangle(0, 1, 2)],
    )
    .with_uv_layer(UV_MAP)
    .with_material(MATERIAL)
}

/// A mesh with `count` triangles over three shared vertices
pub fn triangle_soup(count: usize) -> MeshData {
    let mut mesh = wedge([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
    mesh.polygons = (0..count).map(|_| Polygon::triangle(0, 1, 2)).collect();
    mesh
}

/// Add an empty under `parent`
pub fn group(scene: &mut Scene, parent: NodeId, name: &str) -> NodeId {
    scene
        .add_child(parent, SceneNode::empty(name))
        .expect("parent is live")
}

/// Add a mesh under `parent`
pub fn part(scene: &mut Scene, parent: NodeId, name: &str, mesh: MeshData) -> NodeId {
    scene
        .add_child(parent, SceneNode::mesh(name, mesh))
        .expect("parent is live")
}

fn frame_and_lenses(scene: &mut Scene) {
    let root = scene.root();
    let frame = group(scene, root, "frame");
    part(scene, frame, "front_rim", wedge([-6.0, -1.0, 0.0], [6.0, 1.5, 0.5]));
    part(scene, frame, "nose_bridge", wedge([-0.5, 0.0, 0.0], [0.5, 0.5, 0.25]));

    let lenses = group(scene, root, "lenses");
    part(scene, lenses, "lens_left", wedge([0.5, -1.0, 0.0], [5.5, 1.0, 0.125]));
    part(scene, lenses, "lens_right", wedge([-5.5, -1.0, 0.0], [-0.5, 1.0, 0.125]));
}

fn temple_x(side: Side) -> f64 {
    match side {
        Side::Left => 7.0,
        Side::Right => -7.0,
    }
}

/// A schema-conformant tree whose temples already sit on their screws
///
/// Every check of the default configuration passes on it.
pub fn conformant_scene() -> Scene {
    let mut scene = Scene::new();
    frame_and_lenses(&mut scene);
    let root = scene.root();
    let temples = group(&mut scene, root, "temples");
    for side in Side::BOTH {
        let x = temple_x(side);
        let temple = scene
            .add_child(
                temples,
                SceneNode::empty(side.temple_group()).with_location(x, -1.0, 0.5),
            )
            .expect("temples is live");
        part(
            &mut scene,
            temple,
            &format!("temple_{}_outer", side),
            wedge([-0.25, -0.25, -0.5], [0.25, 12.0, 0.0]),
        );
        part(
            &mut scene,
            temple,
            &side.screw(),
            wedge([-0.25, -0.25, -0.5], [0.25, 0.25, 0.5]),
        );
    }
    scene
}

/// The same asset before alignment: temple groups sit at the world origin and
/// all geometry is authored in world coordinates
pub fn unaligned_scene() -> Scene {
    let mut scene = Scene::new();
    frame_and_lenses(&mut scene);
    let root = scene.root();
    let temples = group(&mut scene, root, "temples");
    for side in Side::BOTH {
        let x = temple_x(side);
        let temple = group(&mut scene, temples, &side.temple_group());
        part(
            &mut scene,
            temple,
            &format!("temple_{}_outer", side),
            wedge([x - 0.25, -1.25, 0.0], [x + 0.25, 11.0, 0.5]),
        );
        part(
            &mut scene,
            temple,
            &side.screw(),
            wedge([x - 0.25, -1.25, 0.0], [x + 0.25, -0.75, 1.0]),
        );
    }
    scene
}

/// World-space vertices of a mesh node
pub fn world_vertices(scene: &Scene, id: NodeId) -> Vec<Point3<f64>> {
    let matrix = scene.world_matrix(id).expect("node is live");
    scene
        .get(id)
        .and_then(|node| node.mesh_data())
        .map(|mesh| mesh.vertices.iter().map(|v| matrix.transform_point(v)).collect())
        .unwrap_or_default()
}

/// Look up a node that the fixture is known to contain
pub fn node(scene: &Scene, name: &str) -> NodeId {
    scene
        .find(name)
        .unwrap_or_else(|| panic!("fixture has no node '{}'", name))
}
