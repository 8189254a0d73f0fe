//! Categorized QA report
//!
//! [`check_model`] runs every check against the true root of the selected
//! node and sorts the findings into four presentational buckets. Checks never
//! short-circuit each other: every check contributes its own lines.

use crate::config::QaConfig;
use crate::error::Result;
use crate::scene::{NodeId, Scene};
use crate::schema::SchemaRegistry;
use crate::validator::{
    check_faces, check_location, check_origins, check_root_origin, check_scale, count_materials,
    count_uv_maps, validate_names,
};

/// Number of characters of the root name quoted in the selection warning
const ROOT_NAME_PREVIEW: usize = 20;

/// Report bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// A violated invariant
    Error,
    /// Something the user should know about the run itself
    Warning,
    /// A check that found nothing
    Passed,
    /// Summary information
    Info,
}

impl Category {
    /// Order in which hosts display the buckets
    pub const DISPLAY_ORDER: [Category; 4] = [
        Category::Warning,
        Category::Passed,
        Category::Error,
        Category::Info,
    ];

    /// Upper-case label, e.g. `ERROR`
    pub fn label(&self) -> &'static str {
        match self {
            Category::Error => "ERROR",
            Category::Warning => "WARNING",
            Category::Passed => "PASSED",
            Category::Info => "INFO",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Four ordered sequences of diagnostic strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    errors: Vec<String>,
    warnings: Vec<String>,
    passed: Vec<String>,
    info: Vec<String>,
}

impl Report {
    /// An empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line to a bucket
    pub fn push(&mut self, category: Category, message: impl Into<String>) {
        self.bucket_mut(category).push(message.into());
    }

    /// Lines of one bucket, in insertion order
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Error => &self.errors,
            Category::Warning => &self.warnings,
            Category::Passed => &self.passed,
            Category::Info => &self.info,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Error => &mut self.errors,
            Category::Warning => &mut self.warnings,
            Category::Passed => &mut self.passed,
            Category::Info => &mut self.info,
        }
    }

    /// ERROR lines
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Whether any ERROR line was recorded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether every bucket is empty
    pub fn is_empty(&self) -> bool {
        Category::DISPLAY_ORDER
            .iter()
            .all(|&category| self.get(category).is_empty())
    }

    /// All lines in display order (WARNING, PASSED, ERROR, INFO)
    pub fn iter(&self) -> impl Iterator<Item = (Category, &str)> + '_ {
        Category::DISPLAY_ORDER.into_iter().flat_map(move |category| {
            self.get(category)
                .iter()
                .map(move |line| (category, line.as_str()))
        })
    }
}

/// Run every check with the eyewear schema
///
/// See [`check_model_with_schema`].
///
/// # Example
///
/// ```
/// use eyewear_qa::{Category, QaConfig, Scene, check_model};
///
/// let scene = Scene::new();
/// let report = check_model(&scene, scene.root(), &QaConfig::default())?;
/// assert!(report.get(Category::Error).iter().any(|l| l.contains("Missing node")));
/// # Ok::<(), eyewear_qa::Error>(())
/// ```
pub fn check_model(scene: &Scene, selected: NodeId, config: &QaConfig) -> Result<Report> {
    check_model_with_schema(scene, selected, config, SchemaRegistry::eyewear())
}

/// Run every check on the tree containing `selected`
///
/// When `selected` is not the root, the checks run on its topmost ancestor
/// and a WARNING names that ancestor. Fails only when `selected` is not a
/// node of `scene`.
pub fn check_model_with_schema(
    scene: &Scene,
    selected: NodeId,
    config: &QaConfig,
    schema: &SchemaRegistry,
) -> Result<Report> {
    let mut report = Report::new();
    let root = scene.root_of(selected)?;
    let root_name = scene.name(root);
    let tolerance = config.tolerance();

    if root != selected {
        let preview: String = root_name.chars().take(ROOT_NAME_PREVIEW).collect();
        report.push(
            Category::Warning,
            format!(
                "Didn't select root node, running the check on the root parent \"{}...\"",
                preview
            ),
        );
    }

    // 2.1
    let scale = check_scale(scene, root, tolerance);
    if scale.is_empty() {
        report.push(Category::Passed, "2.1 Scale of all nodes = 1");
    }
    for violation in &scale {
        report.push(Category::Error, violation.to_string());
    }

    // 2.1 / 2.3
    let mut location: Vec<_> = check_root_origin(scene, root, tolerance).into_iter().collect();
    if config.strict_origins() {
        location.extend(check_origins(scene, root, schema, tolerance));
    }
    location.extend(check_location(scene, root, schema, tolerance));
    if location.is_empty() {
        report.push(
            Category::Passed,
            if config.strict_origins() {
                "2.1/2.3 Origin of all nodes in (0,0,0), except temples"
            } else {
                "2.1/2.3 Root in (0,0,0), temples away from the origin"
            },
        );
    }
    for finding in &location {
        report.push(Category::Error, finding.to_string());
    }

    // 3.1 / 3.2
    let names = validate_names(scene, root, schema);
    if names.is_empty() {
        report.push(
            Category::Passed,
            "3.1 No invalid names, contains obligatory nodes",
        );
        report.push(Category::Passed, "3.2 Temples groups existing");
    }
    for finding in &names {
        report.push(Category::Error, finding.to_string());
    }

    // 3.12 / 3.13
    let faces = check_faces(scene, root);
    if faces.triangles > config.triangle_limit() {
        report.push(
            Category::Error,
            format!(
                "3.12 Number of triangles too big: {} (limit {})",
                faces.triangles,
                config.triangle_limit()
            ),
        );
    } else {
        report.push(
            Category::Passed,
            format!(
                "3.12 Number of triangles <= {}: {}",
                config.triangle_limit(),
                faces.triangles
            ),
        );
    }
    if faces.ngons > 0 {
        report.push(
            Category::Error,
            format!("3.13 Number of ngons >0: {}", faces.ngons),
        );
    } else {
        report.push(Category::Passed, "3.13 All faces are triangles");
    }

    // 4.1
    if config.check_uv_maps() {
        let uv_maps = count_uv_maps(scene, root);
        if uv_maps == 1 {
            report.push(Category::Passed, "4.1 Number of UV maps: 1");
        } else {
            report.push(
                Category::Error,
                format!("4.1 Number of UV maps is not 1: {}", uv_maps),
            );
        }
    }

    // 5.12
    if config.check_materials() {
        let materials = count_materials(scene, root);
        if materials == 1 {
            report.push(Category::Passed, "5.12 Number of materials: 1");
        } else {
            report.push(
                Category::Error,
                format!("5.12 Number of materials: {}", materials),
            );
        }
    }

    report.push(
        Category::Info,
        format!(
            "Checked \"{}\": {} nodes, {} triangles",
            root_name,
            scene.subtree(root).len(),
            faces.triangles
        ),
    );

    log::debug!(
        "check of '{}' finished with {} errors",
        root_name,
        report.errors().len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneNode;

    #[test]
    fn test_iter_follows_display_order() {
        let mut report = Report::new();
        report.push(Category::Info, "i");
        report.push(Category::Error, "e");
        report.push(Category::Passed, "p");
        report.push(Category::Warning, "w");
        let order: Vec<_> = report.iter().collect();
        assert_eq!(
            order,
            vec![
                (Category::Warning, "w"),
                (Category::Passed, "p"),
                (Category::Error, "e"),
                (Category::Info, "i"),
            ]
        );
    }

    #[test]
    fn test_empty_report() {
        let report = Report::new();
        assert!(report.is_empty());
        assert!(!report.has_errors());
        assert_eq!(report.iter().count(), 0);
    }

    #[test]
    fn test_selection_warning_truncates_root_name() {
        let mut scene = Scene::new();
        let root = scene.root();
        let long = scene
            .add_child(root, SceneNode::empty("a_very_long_group_name_indeed"))
            .unwrap();
        let child = scene.add_child(long, SceneNode::empty("leaf")).unwrap();
        scene.detach(long).unwrap();

        let report = check_model(&scene, child, &QaConfig::default()).unwrap();
        assert_eq!(
            report.get(Category::Warning),
            &[
                "Didn't select root node, running the check on the root parent \"a_very_long_group_na...\""
                    .to_string()
            ]
        );
        assert!(
            report.get(Category::Info)[0]
                .starts_with("Checked \"a_very_long_group_name_indeed\": 2 nodes")
        );
    }

    #[test]
    fn test_no_warning_when_root_selected() {
        let scene = Scene::new();
        let report = check_model(&scene, scene.root(), &QaConfig::default()).unwrap();
        assert!(report.get(Category::Warning).is_empty());
    }

    #[test]
    fn test_optional_checks_can_be_disabled() {
        let scene = Scene::new();
        let config = QaConfig::new()
            .with_uv_check(false)
            .with_material_check(false);
        let report = check_model(&scene, scene.root(), &config).unwrap();
        assert!(
            !report
                .iter()
                .any(|(_, line)| line.starts_with("4.1") || line.starts_with("5.12"))
        );
    }

    #[test]
    fn test_stale_selection_is_an_error() {
        let mut scene = Scene::new();
        let root = scene.root();
        let id = scene.add_child(root, SceneNode::empty("frame")).unwrap();
        scene.remove(id).unwrap();
        assert!(check_model(&scene, id, &QaConfig::default()).is_err());
    }
}
