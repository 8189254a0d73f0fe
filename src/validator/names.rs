//! Name and hierarchy-shape validation against the schema

use std::collections::HashSet;
use std::fmt;

use crate::scene::{NodeId, Scene};
use crate::schema::{AllowedChildren, SchemaRegistry};
use crate::similarity::best_match;

/// A naming problem found in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFinding {
    /// A node name not allowed at its level
    InvalidName {
        /// The offending name
        name: String,
        /// Closest allowed name, if one is similar enough
        suggestion: Option<String>,
        /// Whether the node's children were left unchecked
        skipped_children: bool,
    },
    /// An obligatory name that never appeared
    MissingNode {
        /// The missing name
        name: String,
    },
}

impl fmt::Display for NameFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameFinding::InvalidName {
                name,
                suggestion,
                skipped_children,
            } => {
                write!(f, "3.1 Invalid name: \"{}\"", name)?;
                if let Some(suggestion) = suggestion {
                    write!(f, ", did you mean \"{}\"?", suggestion)?;
                }
                if *skipped_children {
                    write!(f, " Skipping the check of children of \"{}\".", name)?;
                }
                Ok(())
            }
            NameFinding::MissingNode { name } => write!(f, "3.1 Missing node \"{}\"", name),
        }
    }
}

/// Schema depth being checked
#[derive(Clone, Copy)]
enum Level {
    /// Direct children of the root: the top-level groups
    Groups,
    /// Side groups under a bilateral group
    Sides(&'static [(&'static str, &'static [&'static str])]),
    /// Leaf parts of a group or side
    Leaves(&'static [&'static str]),
}

enum Membership {
    /// Allowed, and its children form the given level
    Descend(Level),
    /// Allowed leaf
    Leaf,
    /// Not allowed; the names that would have been
    Unknown(Vec<&'static str>),
}

struct NameCheck<'a> {
    scene: &'a Scene,
    schema: &'a SchemaRegistry,
    remaining: HashSet<&'static str>,
    findings: Vec<NameFinding>,
}

impl NameCheck<'_> {
    fn classify(&self, level: Level, name: &str) -> Membership {
        match level {
            Level::Groups => match self.schema.allowed_children(name) {
                Some(AllowedChildren::Leaves(names)) => Membership::Descend(Level::Leaves(names)),
                Some(AllowedChildren::Sides(sides)) => Membership::Descend(Level::Sides(sides)),
                None => Membership::Unknown(self.schema.group_names()),
            },
            Level::Sides(sides) => match sides.iter().find(|(side, _)| *side == name) {
                Some((_, leaves)) => Membership::Descend(Level::Leaves(*leaves)),
                None => Membership::Unknown(sides.iter().map(|(side, _)| *side).collect()),
            },
            Level::Leaves(allowed) => {
                if allowed.contains(&name) {
                    Membership::Leaf
                } else {
                    Membership::Unknown(allowed.to_vec())
                }
            }
        }
    }

    fn visit(&mut self, parent: NodeId, level: Level) {
        let scene = self.scene;
        for &child in scene.children(parent) {
            let name = scene.name(child);
            self.remaining.remove(name);

            if SchemaRegistry::is_misc(name) {
                continue;
            }

            match self.classify(level, name) {
                Membership::Descend(next) => self.visit(child, next),
                Membership::Leaf => {}
                Membership::Unknown(candidates) => {
                    let skipped_children = !matches!(level, Level::Leaves(_));
                    self.findings.push(NameFinding::InvalidName {
                        name: name.to_string(),
                        suggestion: best_match(name, candidates).map(str::to_string),
                        skipped_children,
                    });
                }
            }
        }
    }
}

/// Validate the names below `root` against the schema
///
/// Each level of the tree is compared with the names the schema allows
/// there. An unknown name yields an [`NameFinding::InvalidName`] with the
/// closest allowed name as a suggestion, and the subtree under an unknown
/// group is not checked. `misc_` nodes are exempt. After the walk, every
/// obligatory name that was not seen yields a [`NameFinding::MissingNode`],
/// in the schema's declaration order.
pub fn validate_names(scene: &Scene, root: NodeId, schema: &SchemaRegistry) -> Vec<NameFinding> {
    let mut check = NameCheck {
        scene,
        schema,
        remaining: schema.obligatory.iter().copied().collect(),
        findings: Vec::new(),
    };
    check.visit(root, Level::Groups);

    let NameCheck {
        remaining,
        mut findings,
        ..
    } = check;
    findings.extend(
        schema
            .obligatory
            .iter()
            .filter(|name| remaining.contains(*name))
            .map(|name| NameFinding::MissingNode {
                name: name.to_string(),
            }),
    );
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneNode;

    fn add(scene: &mut Scene, parent: NodeId, name: &str) -> NodeId {
        scene.add_child(parent, SceneNode::empty(name)).unwrap()
    }

    #[test]
    fn test_display_formats() {
        let finding = NameFinding::InvalidName {
            name: "fram".into(),
            suggestion: Some("frame".into()),
            skipped_children: true,
        };
        assert_eq!(
            finding.to_string(),
            "3.1 Invalid name: \"fram\", did you mean \"frame\"? Skipping the check of children of \"fram\"."
        );
        let finding = NameFinding::InvalidName {
            name: "xyz".into(),
            suggestion: None,
            skipped_children: false,
        };
        assert_eq!(finding.to_string(), "3.1 Invalid name: \"xyz\"");
        let finding = NameFinding::MissingNode {
            name: "lenses".into(),
        };
        assert_eq!(finding.to_string(), "3.1 Missing node \"lenses\"");
    }

    #[test]
    fn test_empty_tree_reports_every_obligatory_name_in_order() {
        let scene = Scene::new();
        let schema = SchemaRegistry::eyewear();
        let findings = validate_names(&scene, scene.root(), schema);
        let missing: Vec<_> = findings
            .iter()
            .map(|f| match f {
                NameFinding::MissingNode { name } => name.as_str(),
                other => panic!("unexpected finding {other}"),
            })
            .collect();
        assert_eq!(missing, schema.obligatory.to_vec());
    }

    #[test]
    fn test_unknown_group_is_not_descended() {
        let mut scene = Scene::new();
        let root = scene.root();
        let bad = add(&mut scene, root, "fram");
        add(&mut scene, bad, "not_checked");

        let findings = validate_names(&scene, root, SchemaRegistry::eyewear());
        assert_eq!(
            findings[0],
            NameFinding::InvalidName {
                name: "fram".into(),
                suggestion: Some("frame".into()),
                skipped_children: true,
            }
        );
        assert!(
            !findings
                .iter()
                .any(|f| matches!(
                    f,
                    NameFinding::InvalidName { name, .. } if name == "not_checked"
                ))
        );
    }

    #[test]
    fn test_misc_nodes_are_exempt_at_every_level() {
        let mut scene = Scene::new();
        let root = scene.root();
        add(&mut scene, root, "misc_reference_image");
        let frame = add(&mut scene, root, "frame");
        add(&mut scene, frame, "misc_logo");

        let findings = validate_names(&scene, root, SchemaRegistry::eyewear());
        assert!(
            findings
                .iter()
                .all(|f| matches!(f, NameFinding::MissingNode { .. }))
        );
    }

    #[test]
    fn test_side_level_suggests_side_names() {
        let mut scene = Scene::new();
        let root = scene.root();
        let temples = add(&mut scene, root, "temples");
        add(&mut scene, temples, "temple_lft");

        let findings = validate_names(&scene, root, SchemaRegistry::eyewear());
        assert!(findings.contains(&NameFinding::InvalidName {
            name: "temple_lft".into(),
            suggestion: Some("temple_left".into()),
            skipped_children: true,
        }));
    }

    #[test]
    fn test_leaf_on_wrong_side_is_invalid() {
        let mut scene = Scene::new();
        let root = scene.root();
        let temples = add(&mut scene, root, "temples");
        let left = add(&mut scene, temples, "temple_left");
        add(&mut scene, left, "screw_right");

        let findings = validate_names(&scene, root, SchemaRegistry::eyewear());
        assert!(findings.contains(&NameFinding::InvalidName {
            name: "screw_right".into(),
            suggestion: Some("screw_left".into()),
            skipped_children: false,
        }));
    }
}
