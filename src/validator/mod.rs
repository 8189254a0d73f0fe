//! Validation of an eyewear asset tree
//!
//! Every check is a read-only aggregation over a subtree that returns its
//! findings by value. [`crate::check_model`] turns the findings into report
//! lines; the functions are public so hosts can run a single check.
//!
//! - Names and hierarchy shape against the [`crate::schema::SchemaRegistry`]
//! - Unit scale on every node
//! - Root and temple origins
//! - Triangle and n-gon counts
//! - UV channel and material cardinality

mod geometry;
mod names;

pub use geometry::{
    LocationFinding, ScaleViolation, check_faces, check_location, check_origins,
    check_root_origin, check_scale, count_materials, count_uv_maps,
};
pub(crate) use geometry::vec_matches;
pub use names::{NameFinding, validate_names};
