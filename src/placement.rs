//! Hierarchy placement with lazy ancestor synthesis

use crate::error::{Error, Result};
use crate::scene::{NodeId, Scene, SceneNode};
use crate::schema::SchemaRegistry;

/// Name `node` after `semantic_name` and attach it under its schema parent
///
/// When no node carries the parent's name, an axis-marker placeholder is
/// created for it and placed the same way, so a chain of missing ancestors is
/// synthesized up to the root. Only the node's own name and parent link are
/// changed; its descendants are untouched.
///
/// The whole parent chain is resolved before anything is renamed or created,
/// so a call that returns an error leaves the scene as it was.
///
/// Returns the name actually assigned, which carries a `.NNN` suffix when
/// another node already holds `semantic_name`.
///
/// # Errors
///
/// - [`Error::NoNode`] when `node` is `None`
/// - [`Error::UnknownSemanticName`] when the schema has no parent for the name
/// - [`Error::MissingRoot`] when the chain reaches a root the scene lacks
/// - [`Error::CyclicHierarchy`] when the resolved parent lies inside the
///   node's own subtree
///
/// # Example
///
/// ```
/// use eyewear_qa::{Scene, SceneNode, placement::place, schema::SchemaRegistry};
///
/// let mut scene = Scene::new();
/// let lens = scene.add_node(SceneNode::empty("Sphere"));
/// place(&mut scene, Some(lens), "lens_left", SchemaRegistry::eyewear())?;
///
/// let lenses = scene.find("lenses").unwrap();
/// assert_eq!(scene.parent(lens), Some(lenses));
/// assert_eq!(scene.parent(lenses), Some(scene.root()));
/// # Ok::<(), eyewear_qa::Error>(())
/// ```
pub fn place(
    scene: &mut Scene,
    node: Option<NodeId>,
    semantic_name: &str,
    schema: &SchemaRegistry,
) -> Result<String> {
    let node = node.ok_or_else(|| Error::NoNode("No active object selected".to_string()))?;
    scene.node(node)?;
    let parent_name = schema
        .parent_of(semantic_name)
        .ok_or_else(|| Error::undefined_parent(semantic_name))?;

    let (anchor, missing) = resolve_chain(scene, node, parent_name, schema)?;
    if is_within(scene, anchor, node) {
        return Err(Error::CyclicHierarchy(format!(
            "cannot place '{}' as '{}': '{}' is inside its own subtree",
            scene.name(node),
            semantic_name,
            scene.name(anchor)
        )));
    }

    let assigned = scene.rename(node, semantic_name)?;
    if assigned != semantic_name {
        log::warn!(
            "'{}' is already taken, node was named '{}'",
            semantic_name,
            assigned
        );
    }

    let mut parent = anchor;
    for name in missing.into_iter().rev() {
        let placeholder = scene.add_node(SceneNode::placeholder(name));
        scene.attach(placeholder, parent)?;
        log::debug!("created placeholder '{}'", scene.name(placeholder));
        parent = placeholder;
    }

    scene.attach(node, parent)?;
    log::debug!("placed '{}' under '{}'", assigned, scene.name(parent));
    Ok(assigned)
}

/// Follow schema parents from `parent_name` up to the first existing node.
///
/// Returns that node and the group names to synthesize, nearest first. The
/// node being placed never counts as found, since it is about to be renamed.
fn resolve_chain(
    scene: &Scene,
    node: NodeId,
    parent_name: &'static str,
    schema: &SchemaRegistry,
) -> Result<(NodeId, Vec<&'static str>)> {
    let mut missing = Vec::new();
    let mut name = parent_name;
    loop {
        if let Some(found) = scene.find(name).filter(|&id| id != node) {
            return Ok((found, missing));
        }
        if name == schema.root {
            return Err(Error::MissingRoot(format!(
                "cannot place '{}': no node named '{}'",
                scene.name(node),
                name
            )));
        }
        missing.push(name);
        name = schema
            .parent_of(name)
            .ok_or_else(|| Error::undefined_parent(name))?;
    }
}

/// Whether `id` is `ancestor` or one of its descendants
fn is_within(scene: &Scene, id: NodeId, ancestor: NodeId) -> bool {
    let mut cursor = Some(id);
    while let Some(current) = cursor {
        if current == ancestor {
            return true;
        }
        cursor = scene.parent(current);
    }
    false
}
