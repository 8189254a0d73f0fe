//! # eyewear-qa
//!
//! Validation and normalization of eyewear frame assets authored as a scene
//! graph of named, transformable nodes.
//!
//! An asset is a tree under the root `"Model"` whose node names follow a fixed
//! schema (`frame`, `lenses`, `temples/temple_left/...`). This library checks
//! such a tree and repairs the common authoring mistakes.
//!
//! ## Features
//!
//! - Name validation with "did you mean" suggestions and obligatory parts
//! - Geometric checks: unit scale, origins, triangle budget, n-gons,
//!   UV channel and material counts
//! - Placement of a node under its schema parent, creating missing groups
//! - Alignment of each temple's origin to its hinge screw
//! - Mirroring a temple to the opposite side
//!
//! ## Example
//!
//! ```
//! use eyewear_qa::{Category, QaConfig, Scene, SceneNode, check_model, placement::place};
//! use eyewear_qa::schema::SchemaRegistry;
//!
//! # fn main() -> eyewear_qa::Result<()> {
//! let mut scene = Scene::new();
//! let node = scene.add_node(SceneNode::empty("fram"));
//! scene.attach(node, scene.root())?;
//!
//! let report = check_model(&scene, scene.root(), &QaConfig::default())?;
//! assert!(report
//!     .get(Category::Error)
//!     .iter()
//!     .any(|line| line.contains("did you mean \"frame\"")));
//!
//! place(&mut scene, Some(node), "frame", SchemaRegistry::eyewear())?;
//! assert_eq!(scene.name(node), "frame");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod alignment;
pub mod commands;
pub mod config;
pub mod error;
pub mod mesh_ops;
pub mod mirror;
pub mod placement;
pub mod report;
pub mod scene;
pub mod schema;
pub mod session;
pub mod similarity;
pub mod validator;

pub use alignment::{SideAlignment, align_temples, align_temples_detailed};
pub use commands::{
    MenuEntry, PLACEMENT_MENU, PlacementCommand, placement_commands, placement_entry, run_placement,
};
pub use config::QaConfig;
pub use error::{Error, Result};
pub use mesh_ops::{BoundingBox, FaceTally};
pub use report::{Category, Report, check_model, check_model_with_schema};
pub use scene::{
    EmptyDisplay, MaterialRef, MeshData, NodeId, NodeKind, Polygon, ROOT_NAME, Scene, SceneNode,
    Transform,
};
pub use schema::{SchemaRegistry, Side};
pub use session::QaSession;
