//! Placement commands offered to the host
//!
//! The host builds its "assign part" menu from [`PLACEMENT_MENU`] and routes
//! every entry through [`run_placement`].

use crate::error::Result;
use crate::placement::place;
use crate::scene::{NodeId, Scene};
use crate::schema::SchemaRegistry;

/// One dispatchable placement: the semantic name to assign and its label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementCommand {
    /// Name the node receives, a key of the schema's parent map
    pub semantic_name: &'static str,
    /// Human-readable menu label
    pub label: &'static str,
}

/// A row of the placement menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    /// Non-actionable section heading
    Section(&'static str),
    /// A placement command
    Place(PlacementCommand),
}

const fn place_as(semantic_name: &'static str, label: &'static str) -> MenuEntry {
    MenuEntry::Place(PlacementCommand {
        semantic_name,
        label,
    })
}

/// The placement menu, grouped by section
pub const PLACEMENT_MENU: &[MenuEntry] = &[
    MenuEntry::Section("Frame"),
    place_as("front_rim", "Front Rim"),
    place_as("nose_bridge", "Nose Bridge"),
    place_as("nose_pad_left", "Left Nose Pad"),
    place_as("nose_pad_right", "Right Nose Pad"),
    place_as("hinge_frame_left", "Left Hinge Frame"),
    place_as("hinge_frame_right", "Right Hinge Frame"),
    MenuEntry::Section("Lenses"),
    place_as("lens_left", "Left Lens"),
    place_as("lens_right", "Right Lens"),
    place_as("rim_left", "Left Rim"),
    place_as("rim_right", "Right Rim"),
    MenuEntry::Section("Left Temple"),
    place_as("temple_left_inner", "Left Inner Temple"),
    place_as("temple_left_outer", "Left Outer Temple"),
    place_as("hinge_temple_left", "Left Hinge Temple"),
    place_as("screw_left", "Left Screw"),
    MenuEntry::Section("Right Temple"),
    place_as("temple_right_inner", "Right Inner Temple"),
    place_as("temple_right_outer", "Right Outer Temple"),
    place_as("hinge_temple_right", "Right Hinge Temple"),
    place_as("screw_right", "Right Screw"),
];

/// The placement commands of the menu, without section headings
pub fn placement_commands() -> impl Iterator<Item = &'static PlacementCommand> {
    PLACEMENT_MENU.iter().filter_map(|entry| match entry {
        MenuEntry::Place(command) => Some(command),
        MenuEntry::Section(_) => None,
    })
}

/// The menu command assigning `semantic_name`
pub fn placement_entry(semantic_name: &str) -> Option<&'static PlacementCommand> {
    placement_commands().find(|command| command.semantic_name == semantic_name)
}

/// Execute a menu command on the host's active node
pub fn run_placement(
    scene: &mut Scene,
    node: Option<NodeId>,
    command: &PlacementCommand,
) -> Result<String> {
    log::info!("running placement '{}'", command.label);
    place(scene, node, command.semantic_name, SchemaRegistry::eyewear())
}
