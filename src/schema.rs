//! The fixed naming and parenting schema of an eyewear asset

/// Prefix of free-form annotation nodes exempt from membership checks
pub const MISC_PREFIX: &str = "misc_";

/// The two bilateral halves of the asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Wearer's left
    Left,
    /// Wearer's right
    Right,
}

impl Side {
    /// Both sides, left first
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// The token used in node names
    pub fn token(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// The other side
    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Name of this side's temple group, e.g. `temple_left`
    pub fn temple_group(&self) -> String {
        format!("temple_{}", self.token())
    }

    /// Name of this side's screw, e.g. `screw_left`
    pub fn screw(&self) -> String {
        format!("screw_{}", self.token())
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Allowed children of a top-level group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowedChildren {
    /// Children are leaves checked against one name set
    Leaves(&'static [&'static str]),
    /// Children are side groups, each with its own leaf name set
    Sides(&'static [(&'static str, &'static [&'static str])]),
}

/// Immutable schema tables
///
/// Validators and placement take the registry by reference; the process-wide
/// instance is [`SchemaRegistry::eyewear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaRegistry {
    /// Root node name
    pub root: &'static str,
    /// Semantic name → required parent name
    pub parent_of: &'static [(&'static str, &'static str)],
    /// Top-level groups in declaration order with their allowed children
    pub groups: &'static [(&'static str, AllowedChildren)],
    /// Names that must be present somewhere in the tree
    pub obligatory: &'static [&'static str],
}

const FRAME_PARTS: &[&str] = &[
    "front_rim",
    "nose_pad_left",
    "nose_pad_right",
    "hinge_frame_right",
    "hinge_frame_left",
    "nose_bridge",
];

const LENS_PARTS: &[&str] = &["lens_left", "lens_right", "rim_left", "rim_right"];

const TEMPLE_LEFT_PARTS: &[&str] = &[
    "temple_left_inner",
    "temple_left_outer",
    "temple_tip_inner_left",
    "temple_tip_outer_left",
    "hinge_temple_left",
    "screw_left",
];

const TEMPLE_RIGHT_PARTS: &[&str] = &[
    "temple_right_inner",
    "temple_right_outer",
    "temple_tip_inner_right",
    "temple_tip_outer_right",
    "hinge_temple_right",
    "screw_right",
];

static EYEWEAR: SchemaRegistry = SchemaRegistry {
    root: crate::scene::ROOT_NAME,
    parent_of: &[
        ("frame", "Model"),
        ("front_rim", "frame"),
        ("nose_pad_left", "frame"),
        ("nose_pad_right", "frame"),
        ("hinge_frame_right", "frame"),
        ("hinge_frame_left", "frame"),
        ("nose_bridge", "frame"),
        ("lenses", "Model"),
        ("lens_left", "lenses"),
        ("lens_right", "lenses"),
        ("rim_left", "lenses"),
        ("rim_right", "lenses"),
        ("temples", "Model"),
        ("temple_left", "temples"),
        ("temple_right", "temples"),
        ("temple_left_inner", "temple_left"),
        ("temple_left_outer", "temple_left"),
        ("temple_tip_inner_left", "temple_left"),
        ("temple_tip_outer_left", "temple_left"),
        ("hinge_temple_left", "temple_left"),
        ("screw_left", "temple_left"),
        ("temple_right_inner", "temple_right"),
        ("temple_right_outer", "temple_right"),
        ("temple_tip_inner_right", "temple_right"),
        ("temple_tip_outer_right", "temple_right"),
        ("hinge_temple_right", "temple_right"),
        ("screw_right", "temple_right"),
    ],
    groups: &[
        ("frame", AllowedChildren::Leaves(FRAME_PARTS)),
        ("lenses", AllowedChildren::Leaves(LENS_PARTS)),
        (
            "temples",
            AllowedChildren::Sides(&[
                ("temple_left", TEMPLE_LEFT_PARTS),
                ("temple_right", TEMPLE_RIGHT_PARTS),
            ]),
        ),
    ],
    obligatory: &[
        "frame",
        "lenses",
        "temples",
        "temple_left",
        "temple_right",
        "front_rim",
        "lens_left",
        "lens_right",
        "temple_left_outer",
        "temple_right_outer",
    ],
};

impl SchemaRegistry {
    /// The eyewear schema
    pub fn eyewear() -> &'static SchemaRegistry {
        &EYEWEAR
    }

    /// Required parent of a semantic name
    pub fn parent_of(&self, name: &str) -> Option<&'static str> {
        self.parent_of
            .iter()
            .find(|(child, _)| *child == name)
            .map(|(_, parent)| *parent)
    }

    /// Names of the top-level groups in declaration order
    pub fn group_names(&self) -> Vec<&'static str> {
        self.groups.iter().map(|(name, _)| *name).collect()
    }

    /// Allowed children of a top-level group
    pub fn allowed_children(&self, group: &str) -> Option<AllowedChildren> {
        self.groups
            .iter()
            .find(|(name, _)| *name == group)
            .map(|(_, allowed)| *allowed)
    }

    /// Names of the bilateral temple groups
    pub fn side_groups(&self) -> Vec<&'static str> {
        self.groups
            .iter()
            .filter_map(|(_, allowed)| match allowed {
                AllowedChildren::Sides(sides) => Some(sides.iter().map(|(name, _)| *name)),
                AllowedChildren::Leaves(_) => None,
            })
            .flatten()
            .collect()
    }

    /// Whether a name is a free-form annotation
    pub fn is_misc(name: &str) -> bool {
        name.starts_with(MISC_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_parent_is_known_or_root() {
        let schema = SchemaRegistry::eyewear();
        for (child, parent) in schema.parent_of {
            assert!(
                *parent == schema.root || schema.parent_of(parent).is_some(),
                "parent '{}' of '{}' has no entry",
                parent,
                child
            );
        }
    }

    #[test]
    fn test_allowed_sets_agree_with_parent_map() {
        let schema = SchemaRegistry::eyewear();
        for (group, allowed) in schema.groups {
            assert_eq!(schema.parent_of(group), Some("Model"));
            match allowed {
                AllowedChildren::Leaves(names) => {
                    for name in *names {
                        assert_eq!(schema.parent_of(name), Some(*group));
                    }
                }
                AllowedChildren::Sides(sides) => {
                    for (side, names) in *sides {
                        assert_eq!(schema.parent_of(side), Some(*group));
                        for name in *names {
                            assert_eq!(schema.parent_of(name), Some(*side));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_side_groups() {
        assert_eq!(
            SchemaRegistry::eyewear().side_groups(),
            vec!["temple_left", "temple_right"]
        );
    }

    #[test]
    fn test_side_names() {
        assert_eq!(Side::Left.temple_group(), "temple_left");
        assert_eq!(Side::Right.screw(), "screw_right");
        assert_eq!(Side::Left.opposite(), Side::Right);
    }

    #[test]
    fn test_unknown_name_has_no_parent() {
        assert_eq!(SchemaRegistry::eyewear().parent_of("Model"), None);
        assert_eq!(SchemaRegistry::eyewear().parent_of("bridge"), None);
    }
}
