//! Error types for scene graph operations
//!
//! Validation never produces an [`Error`]: findings are accumulated into a
//! [`crate::Report`]. Errors come only from the mutating operations
//! (placement, alignment, mirroring) and from the scene graph itself.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: Scene graph structure errors
//! - **E2xxx**: Operation errors (bad input to placement, missing reference nodes)
//! - **E3xxx**: Precondition violations
//!
//! ## Error Codes
//!
//! - `E1001`: Node handle does not resolve to a node in the scene
//! - `E1002`: Attach would create a cycle
//! - `E1003`: The root node `"Model"` is missing
//! - `E2001`: No node supplied to an operation
//! - `E2002`: Semantic name has no parent in the schema
//! - `E2003`: Reference node required by an operation is missing
//! - `E3001`: Subtree scale is not the unit vector

use thiserror::Error;

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by scene graph mutation and the corrective operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A node handle does not resolve to a live node
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - The node was removed by the host after the handle was taken
    /// - A handle from another scene was used
    #[error("[E1001] Node not found: {0}")]
    NodeNotFound(String),

    /// Re-parenting would make a node its own ancestor
    ///
    /// **Error Code**: E1002
    #[error("[E1002] Cyclic hierarchy: {0}")]
    CyclicHierarchy(String),

    /// The pre-existing root `"Model"` could not be found
    ///
    /// **Error Code**: E1003
    ///
    /// **Suggestions**:
    /// - Create the asset through [`crate::Scene::new`], which links the root
    /// - Do not rename or delete the root node
    #[error("[E1003] Missing root node: {0}")]
    MissingRoot(String),

    /// An operation was invoked without a node to operate on
    ///
    /// **Error Code**: E2001
    #[error("[E2001] No object selected: {0}")]
    NoNode(String),

    /// The requested semantic name has no parent entry in the schema
    ///
    /// **Error Code**: E2002
    ///
    /// **Suggestions**:
    /// - Use one of the names listed in [`crate::PLACEMENT_MENU`]
    #[error("[E2002] Unknown semantic name: {0}")]
    UnknownSemanticName(String),

    /// A node the operation reads from is not present in the scene
    ///
    /// **Error Code**: E2003
    ///
    /// **Common Causes**:
    /// - `screw_left`/`screw_right` not authored yet when aligning temples
    /// - Mirroring a side whose temple group does not exist
    #[error("[E2003] Missing reference node: {0}")]
    MissingReference(String),

    /// A node in the operated subtree does not have unit scale
    ///
    /// **Error Code**: E3001
    ///
    /// **Suggestions**:
    /// - Apply scale on the offending nodes before aligning
    #[error("[E3001] Precondition violated: {0}")]
    NonUnitScale(String),
}

impl Error {
    /// Create a NodeNotFound error for a stale or foreign handle
    pub fn stale_handle(context: &str) -> Self {
        Error::NodeNotFound(format!(
            "{}: handle does not belong to a live node of this scene",
            context
        ))
    }

    /// Create an UnknownSemanticName error for a name without a schema parent
    ///
    /// # Example
    /// ```
    /// use eyewear_qa::Error;
    ///
    /// let err = Error::undefined_parent("bridge");
    /// assert!(err.to_string().contains("'bridge'"));
    /// ```
    pub fn undefined_parent(name: &str) -> Self {
        Error::UnknownSemanticName(format!(
            "Object '{}' does not have a defined parent in the hierarchy",
            name
        ))
    }

    /// Create a MissingReference error naming the node that was looked up
    pub fn missing_reference(name: &str) -> Self {
        Error::MissingReference(format!("no object named '{}' in the scene", name))
    }

    /// Create a NonUnitScale error listing the offending node names
    pub fn non_unit_scale(group: &str, offenders: &[String]) -> Self {
        Error::NonUnitScale(format!(
            "nodes under '{}' must have scale (1, 1, 1); offending: {}",
            group,
            offenders.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_in_messages() {
        assert!(Error::NodeNotFound("x".into()).to_string().contains("[E1001]"));
        assert!(Error::CyclicHierarchy("x".into()).to_string().contains("[E1002]"));
        assert!(Error::MissingRoot("x".into()).to_string().contains("[E1003]"));
        assert!(Error::NoNode("x".into()).to_string().contains("[E2001]"));
        assert!(Error::undefined_parent("x").to_string().contains("[E2002]"));
        assert!(Error::missing_reference("x").to_string().contains("[E2003]"));
        assert!(Error::non_unit_scale("g", &[]).to_string().contains("[E3001]"));
    }

    #[test]
    fn test_undefined_parent_helper() {
        let err = Error::undefined_parent("bridge");
        assert_eq!(
            err.to_string(),
            "[E2002] Unknown semantic name: Object 'bridge' does not have a defined parent in the hierarchy"
        );
    }

    #[test]
    fn test_non_unit_scale_lists_offenders() {
        let err = Error::non_unit_scale(
            "temple_left",
            &["temple_left_inner".to_string(), "screw_left".to_string()],
        );
        let msg = err.to_string();
        assert!(msg.contains("'temple_left'"));
        assert!(msg.contains("temple_left_inner, screw_left"));
    }
}
