//! Mirroring a temple subtree to the opposite side

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{Error, Result};
use crate::mesh_ops;
use crate::placement::place;
use crate::scene::{NodeId, Scene};
use crate::schema::{SchemaRegistry, Side};

/// Swap every `left`/`right` token of an underscore-separated name
///
/// ```
/// use eyewear_qa::{mirror::opposite_name, schema::Side};
///
/// assert_eq!(opposite_name("temple_tip_inner_left", Side::Left), "temple_tip_inner_right");
/// assert_eq!(opposite_name("misc_logo", Side::Left), "misc_logo");
/// ```
pub fn opposite_name(name: &str, from: Side) -> String {
    let (source, target) = (from.token(), from.opposite().token());
    name.split('_')
        .map(|token| if token == source { target } else { token })
        .collect::<Vec<_>>()
        .join("_")
}

/// Copy the subtree of `temple_{source}` to the other side
///
/// Each node is duplicated (no data shared with the source), renamed to the
/// opposite side and placed through the schema; mesh vertices and the local
/// location are reflected across the YZ plane. A copy whose new name has no
/// schema parent, such as a `misc_` node, goes under the copy of its source
/// parent, and so does a copy whose schema parent would be a node of the
/// source subtree. The source subtree is not modified.
///
/// Nothing is deduplicated against an existing opposite side. When
/// `temple_{opposite}` is already present, the new group is named with a
/// `.NNN` suffix while the copied parts are placed by name under the existing
/// `temple_{opposite}`, leaving the suffixed group without children.
///
/// Returns the copies, parents before children; the first is the new temple
/// group.
pub fn mirror(scene: &mut Scene, source: Side, schema: &SchemaRegistry) -> Result<Vec<NodeId>> {
    let temple_name = source.temple_group();
    let temple = scene
        .find(&temple_name)
        .ok_or_else(|| Error::missing_reference(&temple_name))?;

    let source_nodes: HashSet<NodeId> = scene.subtree(temple).into_iter().collect();
    let mut copies: HashMap<NodeId, NodeId> = HashMap::new();
    let mut created = Vec::new();
    let mut queue = VecDeque::from([temple]);

    while let Some(original) = queue.pop_front() {
        queue.extend(scene.children(original).iter().copied());

        let copy = scene.duplicate(original)?;
        let name = opposite_name(scene.name(original), source);
        let schema_parent = schema.parent_of(&name).and_then(|parent| scene.find(parent));
        let placed = match schema_parent {
            Some(parent) if source_nodes.contains(&parent) => {
                scene.rename(copy, &name)?;
                false
            }
            _ => match place(scene, Some(copy), &name, schema) {
                Ok(_) => true,
                Err(Error::UnknownSemanticName(_)) => false,
                Err(err) => return Err(err),
            },
        };
        if !placed {
            let parent = scene
                .parent(original)
                .and_then(|parent| copies.get(&parent).copied());
            match parent {
                Some(parent) => scene.attach(copy, parent)?,
                None => log::warn!("mirrored '{}' has no parent", scene.name(copy)),
            }
        }

        if let Some(node) = scene.get_mut(copy) {
            node.transform.location.x = -node.transform.location.x;
            if let Some(mesh) = node.mesh_data_mut() {
                mesh_ops::reflect_x(mesh);
            }
        }

        log::debug!("mirrored '{}' to '{}'", scene.name(original), scene.name(copy));
        copies.insert(original, copy);
        created.push(copy);
    }

    Ok(created)
}
