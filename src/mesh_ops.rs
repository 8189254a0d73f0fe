//! Mesh operations used by the checks and corrective operations
//!
//! This module provides the geometric primitives the rest of the crate needs:
//! - Axis-aligned bounding box in mesh-local space
//! - Bounding-box corners and centroid
//! - Vertex translation (baking a node's location)
//! - Reflection across the YZ plane (mirroring a side)
//! - Triangle / n-gon tally

use crate::scene::MeshData;
use nalgebra::{Point3, Vector3};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner
    pub min: Point3<f64>,
    /// Maximum corner
    pub max: Point3<f64>,
}

impl BoundingBox {
    /// A degenerate box at the origin, used for nodes without geometry
    pub fn empty() -> Self {
        Self {
            min: Point3::origin(),
            max: Point3::origin(),
        }
    }

    /// The eight corners of the box
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (min, max) = (self.min, self.max);
        [
            Point3::new(min.x, min.y, min.z),
            Point3::new(min.x, min.y, max.z),
            Point3::new(min.x, max.y, min.z),
            Point3::new(min.x, max.y, max.z),
            Point3::new(max.x, min.y, min.z),
            Point3::new(max.x, min.y, max.z),
            Point3::new(max.x, max.y, min.z),
            Point3::new(max.x, max.y, max.z),
        ]
    }

    /// Average of the eight corners
    pub fn centroid(&self) -> Point3<f64> {
        let sum = self
            .corners()
            .iter()
            .fold(Vector3::zeros(), |acc, c| acc + c.coords);
        Point3::from(sum * 0.125)
    }
}

/// Compute the local axis-aligned bounding box of a mesh
///
/// Returns `None` when the mesh has no vertices.
///
/// # Example
/// ```
/// use eyewear_qa::mesh_ops::compute_local_bounds;
/// use eyewear_qa::{MeshData, Polygon};
/// use nalgebra::Point3;
///
/// let mesh = MeshData::from_geometry(
///     vec![Point3::new(-1.0, 0.0, 2.0), Point3::new(3.0, 4.0, -2.0)],
///     vec![],
/// );
/// let bounds = compute_local_bounds(&mesh).unwrap();
/// assert_eq!(bounds.min, Point3::new(-1.0, 0.0, -2.0));
/// assert_eq!(bounds.max, Point3::new(3.0, 4.0, 2.0));
/// ```
pub fn compute_local_bounds(mesh: &MeshData) -> Option<BoundingBox> {
    let first = *mesh.vertices.first()?;
    let (min, max) = mesh
        .vertices
        .iter()
        .skip(1)
        .fold((first, first), |(min, max), v| (min.inf(v), max.sup(v)));
    Some(BoundingBox { min, max })
}

/// Translate every vertex of a mesh by `offset`
pub fn translate_vertices(mesh: &mut MeshData, offset: &Vector3<f64>) {
    for vertex in &mut mesh.vertices {
        *vertex += offset;
    }
}

/// Negate the X coordinate of every vertex
pub fn reflect_x(mesh: &mut MeshData) {
    for vertex in &mut mesh.vertices {
        vertex.x = -vertex.x;
    }
}

/// Triangle and n-gon counts of a set of faces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceTally {
    /// Faces with exactly three corners
    pub triangles: usize,
    /// Faces with more than three corners
    pub ngons: usize,
}

impl std::ops::Add for FaceTally {
    type Output = FaceTally;

    fn add(self, other: FaceTally) -> FaceTally {
        FaceTally {
            triangles: self.triangles + other.triangles,
            ngons: self.ngons + other.ngons,
        }
    }
}

/// Count the triangles and n-gons of one mesh
///
/// Faces with fewer than three corners count as neither.
pub fn count_faces(mesh: &MeshData) -> FaceTally {
    mesh.polygons
        .iter()
        .fold(FaceTally::default(), |mut tally, poly| {
            match poly.vertex_count() {
                3 => tally.triangles += 1,
                n if n > 3 => tally.ngons += 1,
                _ => {}
            }
            tally
        })
}
