//! Document remediation

use axs_a11y::{FixReport, IdGenerator, TableFixer};
use axs_dom::{Document, DomTree, NodeId};
use serde::Serialize;

use crate::{EngineError, RemediationConfig};

/// Document-level totals aggregated over every fixed table
#[derive(Debug, Default, Clone, Serialize)]
pub struct RemediationReport {
    /// Tables encountered in the document
    pub tables: usize,
    /// Tables whose header block validated
    pub tables_with_valid_header: usize,
    /// Header cells given `scope="col"`
    pub column_headers: usize,
    /// Header cells given `scope="row"`
    pub row_headers: usize,
    /// Data cells that gained header references
    pub cells_associated: usize,
}

impl RemediationReport {
    fn absorb(&mut self, fix: &FixReport) {
        self.tables += 1;
        if fix.header_valid {
            self.tables_with_valid_header += 1;
        }
        self.column_headers += fix.column_headers;
        self.row_headers += fix.row_headers;
        self.cells_associated += fix.cells_associated;
    }
}

/// Applies table accessibility fixes across a document
///
/// The only state shared between tables is the identifier counter, which
/// is confined to this instance.
pub struct Remediator {
    config: RemediationConfig,
    ids: IdGenerator,
}

impl Remediator {
    /// Create a remediator with the given configuration
    pub fn new(config: RemediationConfig) -> Self {
        let ids = IdGenerator::new(&config.id_prefix);
        tracing::info!("AXS engine {} initialized", crate::VERSION);
        Self { config, ids }
    }

    /// Engine configuration
    pub fn config(&self) -> &RemediationConfig {
        &self.config
    }

    /// Fix every table in the document, in document order.
    pub fn remediate_document(&mut self, document: &mut Document) -> RemediationReport {
        let tree = document.tree_mut();
        let tables = tree.descendants_by_tag(tree.root(), "table");

        let mut report = RemediationReport::default();
        for table in tables {
            match self.remediate_table(tree, table) {
                Ok(fix) => report.absorb(&fix),
                Err(err) => tracing::debug!("skipping node: {}", err),
            }
        }

        tracing::info!(
            "remediated {} tables ({} with valid header): {} col headers, {} row headers, {} cells associated",
            report.tables,
            report.tables_with_valid_header,
            report.column_headers,
            report.row_headers,
            report.cells_associated
        );
        report
    }

    /// Fix a single table element.
    pub fn remediate_table(
        &mut self,
        tree: &mut DomTree,
        table: NodeId,
    ) -> Result<FixReport, EngineError> {
        let fix = TableFixer::new(tree, &mut self.ids)
            .column_association(self.config.column_headers)
            .row_association(self.config.row_headers)
            .fix(table)?;
        tracing::debug!(
            "table fixed: header valid {}, {} col headers, {} row headers, {} cells",
            fix.header_valid,
            fix.column_headers,
            fix.row_headers,
            fix.cells_associated
        );
        Ok(fix)
    }
}

impl Default for Remediator {
    fn default() -> Self {
        Self::new(RemediationConfig::default())
    }
}
