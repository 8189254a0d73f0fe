//! Host-facing session state
//!
//! A [`QaSession`] sits between the host's panel and the engine. It owns the
//! configuration and the last report, so the report lives exactly as long as
//! the selection it was produced for.

use crate::alignment::align_temples_detailed;
use crate::commands::{PlacementCommand, run_placement};
use crate::config::QaConfig;
use crate::error::{Error, Result};
use crate::mirror::mirror;
use crate::report::{Report, check_model};
use crate::scene::{NodeId, Scene};
use crate::schema::{SchemaRegistry, Side};

/// Status line shown after a successful temple alignment
pub const ALIGN_SUCCESS_MESSAGE: &str = "Moved temples to screws";

/// Configuration plus the report of the last check
#[derive(Debug, Clone, Default)]
pub struct QaSession {
    config: QaConfig,
    report: Option<Report>,
}

impl QaSession {
    /// A session with the given configuration and no report
    pub fn new(config: QaConfig) -> Self {
        Self {
            config,
            report: None,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &QaConfig {
        &self.config
    }

    /// Replace the configuration; the stored report is dropped
    pub fn set_config(&mut self, config: QaConfig) {
        self.config = config;
        self.report = None;
    }

    /// Check the tree containing `selected` and keep the report
    pub fn check(&mut self, scene: &Scene, selected: Option<NodeId>) -> Result<&Report> {
        let selected =
            selected.ok_or_else(|| Error::NoNode("select an object to check".to_string()))?;
        let report = check_model(scene, selected, &self.config)?;
        log::info!("Finished automatic QA");
        Ok(&*self.report.insert(report))
    }

    /// Forget the report when the host's selection becomes empty
    pub fn on_selection_changed(&mut self, selection: &[NodeId]) {
        if selection.is_empty() {
            self.clear();
        }
    }

    /// Drop the stored report
    pub fn clear(&mut self) {
        self.report = None;
    }

    /// The last report, if any
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// ERROR lines of the last report separated by blank lines, for copying
    /// to the clipboard. `None` when there is nothing to copy.
    pub fn error_text(&self) -> Option<String> {
        self.report
            .as_ref()
            .filter(|report| report.has_errors())
            .map(|report| report.errors().join("\n\n"))
    }

    /// Run a placement command on the host's active node
    pub fn place(
        &mut self,
        scene: &mut Scene,
        node: Option<NodeId>,
        command: &PlacementCommand,
    ) -> Result<String> {
        let assigned = run_placement(scene, node, command)?;
        self.report = None;
        Ok(assigned)
    }

    /// Align both temple origins to their screws
    ///
    /// Both sides are attempted; the first failure is returned after the
    /// other side has run.
    pub fn align_temples(&mut self, scene: &mut Scene) -> Result<&'static str> {
        let outcomes = align_temples_detailed(scene, &self.config);
        self.report = None;
        for (_, outcome) in outcomes {
            outcome?;
        }
        Ok(ALIGN_SUCCESS_MESSAGE)
    }

    /// Mirror one side's temple subtree to the other side
    pub fn mirror(&mut self, scene: &mut Scene, side: Side) -> Result<String> {
        let created = mirror(scene, side, SchemaRegistry::eyewear())?;
        self.report = None;
        Ok(format!(
            "Mirrored {} to {} ({} objects)",
            side.temple_group(),
            side.opposite().temple_group(),
            created.len()
        ))
    }
}
