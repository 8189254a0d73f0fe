//! Re-basing temple origins onto their screws
//!
//! A temple swings around its hinge screw in the viewer, so the origin of
//! each `temple_{side}` group must sit at the centre of `screw_{side}`. The
//! move keeps every descendant in place in world space.

use nalgebra::{Point3, Vector3};

use crate::config::QaConfig;
use crate::error::{Error, Result};
use crate::mesh_ops::{self, BoundingBox};
use crate::scene::{NodeId, Scene};
use crate::schema::Side;
use crate::validator::{check_scale, vec_matches};

/// Outcome of aligning one side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideAlignment {
    /// The temple origin was moved
    Aligned,
    /// The origin already matched; nothing was changed
    AlreadyAligned,
}

/// World-space centre of a node's local bounding box
///
/// A node without geometry contributes its own origin.
pub fn reference_point(scene: &Scene, id: NodeId) -> Result<Point3<f64>> {
    let bounds = scene
        .node(id)?
        .mesh_data()
        .and_then(mesh_ops::compute_local_bounds)
        .unwrap_or_else(BoundingBox::empty);
    Ok(scene
        .world_matrix(id)?
        .transform_point(&bounds.centroid()))
}

/// Convert a world-space point into the space of `id`'s parent
fn to_parent_space(scene: &Scene, id: NodeId, point: &Point3<f64>) -> Result<Vector3<f64>> {
    let Some(parent) = scene.parent(id) else {
        return Ok(point.coords);
    };
    let inverse = scene.world_matrix(parent)?.try_inverse().ok_or_else(|| {
        Error::non_unit_scale(scene.name(parent), &[scene.name(parent).to_string()])
    })?;
    Ok(inverse.transform_point(point).coords)
}

/// Fold the location of each direct child into its contents
fn bake_children(scene: &mut Scene, id: NodeId) -> Result<()> {
    let children = scene.children(id).to_vec();
    for child in children {
        scene.apply_location(child)?;
    }
    Ok(())
}

/// Move the origin of one side's temple group to its screw centre
///
/// # Errors
///
/// - [`Error::MissingReference`] when `screw_{side}` or `temple_{side}` is absent
/// - [`Error::NonUnitScale`] when a node of the temple subtree is scaled
pub fn align_temple_side(
    scene: &mut Scene,
    side: Side,
    config: &QaConfig,
) -> Result<SideAlignment> {
    let screw_name = side.screw();
    let screw = scene
        .find(&screw_name)
        .ok_or_else(|| Error::missing_reference(&screw_name))?;
    let target = reference_point(scene, screw)?;

    let temple_name = side.temple_group();
    let temple = scene
        .find(&temple_name)
        .ok_or_else(|| Error::missing_reference(&temple_name))?;

    let violations = check_scale(scene, temple, config.tolerance());
    if !violations.is_empty() {
        let offenders: Vec<String> = violations.into_iter().map(|v| v.name).collect();
        return Err(Error::non_unit_scale(&temple_name, &offenders));
    }

    let target = to_parent_space(scene, temple, &target)?;
    let location = scene.node(temple)?.transform.location;
    if vec_matches(&location, &target, config.tolerance()) {
        log::info!("{} is already aligned", temple_name);
        return Ok(SideAlignment::AlreadyAligned);
    }

    if location != Vector3::zeros() {
        scene.apply_location(temple)?;
        bake_children(scene, temple)?;
    }
    scene.set_origin(temple, target)?;
    bake_children(scene, temple)?;

    log::debug!("moved origin of {} to {:?}", temple_name, target);
    Ok(SideAlignment::Aligned)
}

/// Align both sides, left first, and report each outcome
///
/// Sides are independent: a side that fails leaves the other's changes in
/// place.
pub fn align_temples_detailed(
    scene: &mut Scene,
    config: &QaConfig,
) -> Vec<(Side, Result<SideAlignment>)> {
    Side::BOTH
        .into_iter()
        .map(|side| {
            let outcome = align_temple_side(scene, side, config);
            if let Err(err) = &outcome {
                log::warn!("could not align {} temple: {}", side, err);
            }
            (side, outcome)
        })
        .collect()
}

/// Align both sides; `true` when neither side failed
pub fn align_temples(scene: &mut Scene, config: &QaConfig) -> bool {
    align_temples_detailed(scene, config)
        .iter()
        .all(|(_, outcome)| outcome.is_ok())
}
