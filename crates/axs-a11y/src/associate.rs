//! Header/data-cell association
//!
//! One read-build-associate-mutate pass per table. Two strategies run over
//! the rebuilt grid:
//! - column association: data cells reference the header cells above their
//!   logical column; requires a rectangular header block
//! - row association: data cells reference header cells earlier in the
//!   same logical row; independent of header validity
//!
//! Mutations are `scope` on header cells, minted `id`s, and merged
//! `headers` token lists on data cells. Every per-cell mutation is applied
//! at most once, keyed by handle identity, so spanned cells are never
//! double-processed and re-running the pass is idempotent.

use std::collections::{HashMap, HashSet};

use axs_dom::{DomTree, NodeId};

use crate::A11yError;
use crate::cell::{CellHandle, CellKind, CellPool, expand_row};
use crate::grid::{Matrix, build_matrix, header_is_valid};
use crate::ids::IdGenerator;

/// Outcome of fixing one table
#[derive(Debug, Default, Clone)]
pub struct FixReport {
    /// Whether the header block validated as rectangular
    pub header_valid: bool,
    /// Header cells given `scope="col"`
    pub column_headers: usize,
    /// Header cells given `scope="row"`
    pub row_headers: usize,
    /// Data cells that gained at least one header reference
    pub cells_associated: usize,
}

/// Per-table association state
#[derive(Default)]
struct AssocCtx {
    /// Identifier per touched header cell; doubles as the visited-set
    ids: HashMap<CellHandle, String>,
    /// Data cells whose `headers` attribute changed
    associated: HashSet<CellHandle>,
}

/// Associates header and data cells of a single table
pub struct TableFixer<'a> {
    tree: &'a mut DomTree,
    ids: &'a mut IdGenerator,
    column_association: bool,
    row_association: bool,
}

impl<'a> TableFixer<'a> {
    pub fn new(tree: &'a mut DomTree, ids: &'a mut IdGenerator) -> Self {
        Self {
            tree,
            ids,
            column_association: true,
            row_association: true,
        }
    }

    /// Enable or disable the column strategy
    pub fn column_association(mut self, enable: bool) -> Self {
        self.column_association = enable;
        self
    }

    /// Enable or disable the row strategy
    pub fn row_association(mut self, enable: bool) -> Self {
        self.row_association = enable;
        self
    }

    /// Run the full pass on one `<table>` element.
    ///
    /// A table with no rows produces no mutations; malformed spans and
    /// irregular headers degrade the amount of association, never fail.
    pub fn fix(mut self, table: NodeId) -> Result<FixReport, A11yError> {
        match self.tree.tag_name(table) {
            Some("table") => {}
            other => {
                return Err(A11yError::NotATable(other.unwrap_or("#text").to_string()));
            }
        }

        let (head_rows, body_rows, foot_rows) = self.collect_rows(table);
        if head_rows.is_empty() && body_rows.is_empty() && foot_rows.is_empty() {
            return Ok(FixReport::default());
        }

        // Sections are expanded and grid-built independently; spans do not
        // cross row groups.
        let mut pool = CellPool::new();
        let header = self.build_section(&head_rows, &mut pool);
        let body = self.build_section(&body_rows, &mut pool);
        let foot = self.build_section(&foot_rows, &mut pool);

        let mut report = FixReport {
            header_valid: header_is_valid(&header),
            ..FixReport::default()
        };
        tracing::debug!(
            "table grid: header {}x{}, body {} rows, foot {} rows",
            header.row_count(),
            header.width(),
            body.row_count(),
            foot.row_count()
        );

        let mut ctx = AssocCtx::default();
        if self.column_association && report.header_valid {
            self.associate_columns(&header, &body, &foot, &pool, &mut ctx, &mut report);
        }
        if self.row_association {
            self.associate_rows(&body, &foot, &pool, &mut ctx, &mut report);
        }

        report.cells_associated = ctx.associated.len();
        Ok(report)
    }

    /// Split the table's rows into header, body, and footer sections.
    ///
    /// `thead` rows form the header; `tbody` rows and stray `tr` children
    /// of the table itself form the body; `tfoot` rows form the footer.
    fn collect_rows(&self, table: NodeId) -> (Vec<NodeId>, Vec<NodeId>, Vec<NodeId>) {
        let mut head = Vec::new();
        let mut body = Vec::new();
        let mut foot = Vec::new();
        for child in self.tree.children(table) {
            match self.tree.tag_name(child) {
                Some("thead") => head.extend(self.tree.children_by_tag(child, "tr")),
                Some("tbody") => body.extend(self.tree.children_by_tag(child, "tr")),
                Some("tfoot") => foot.extend(self.tree.children_by_tag(child, "tr")),
                Some("tr") => body.push(child),
                _ => {}
            }
        }
        (head, body, foot)
    }

    fn build_section(&self, rows: &[NodeId], pool: &mut CellPool) -> Matrix {
        let expanded: Vec<Vec<CellHandle>> = rows
            .iter()
            .map(|&row| expand_row(self.tree, row, pool))
            .collect();
        build_matrix(&expanded, pool)
    }

    /// Column strategy: scope header-block cells "col" and hand their
    /// identifiers down to width-matched body/footer rows.
    fn associate_columns(
        &mut self,
        header: &Matrix,
        body: &Matrix,
        foot: &Matrix,
        pool: &CellPool,
        ctx: &mut AssocCtx,
        report: &mut FixReport,
    ) {
        let Some(width) = header.rows().next().map(|row| row.len()) else {
            return;
        };

        // Identifiers per column, top-to-bottom, duplicates suppressed.
        let mut columns: Vec<Vec<String>> = vec![Vec::new(); width];
        for row in header.rows() {
            for (col, slot) in row.iter().enumerate() {
                let Some(handle) = *slot else { continue };
                if pool.get(handle).kind != CellKind::Header {
                    continue;
                }
                let (id, first) = self.mark_header(handle, pool, ctx, "col");
                if first {
                    report.column_headers += 1;
                }
                let column = &mut columns[col];
                if !column.contains(&id) {
                    column.push(id);
                }
            }
        }

        for matrix in [body, foot] {
            for row in matrix.rows() {
                if row.len() != width {
                    if !row.is_empty() {
                        tracing::debug!(
                            "row of width {} skipped for column association (header width {})",
                            row.len(),
                            width
                        );
                    }
                    continue;
                }
                for (col, slot) in row.iter().enumerate() {
                    let Some(handle) = *slot else { continue };
                    let info = pool.get(handle);
                    if info.kind != CellKind::Data {
                        continue;
                    }
                    let column = &columns[col];
                    if !column.is_empty() && self.append_headers(info.node, column) {
                        ctx.associated.insert(handle);
                    }
                }
            }
        }
    }

    /// Row strategy: scan each body/footer row left to right, scoping
    /// header cells "row" and handing the accumulated identifiers to every
    /// data cell that follows them.
    fn associate_rows(
        &mut self,
        body: &Matrix,
        foot: &Matrix,
        pool: &CellPool,
        ctx: &mut AssocCtx,
        report: &mut FixReport,
    ) {
        for matrix in [body, foot] {
            for row in matrix.rows() {
                let mut row_ids: Vec<String> = Vec::new();
                for slot in row {
                    let Some(handle) = *slot else { continue };
                    let info = pool.get(handle);
                    match info.kind {
                        CellKind::Header => {
                            let (id, first) = self.mark_header(handle, pool, ctx, "row");
                            if first {
                                report.row_headers += 1;
                            }
                            if !row_ids.contains(&id) {
                                row_ids.push(id);
                            }
                        }
                        CellKind::Data => {
                            if !row_ids.is_empty() && self.append_headers(info.node, &row_ids) {
                                ctx.associated.insert(handle);
                            }
                        }
                    }
                }
            }
        }
    }

    /// First touch of a header cell: set its scope and allocate its
    /// identifier. Later touches return the cached identifier unchanged.
    fn mark_header(
        &mut self,
        handle: CellHandle,
        pool: &CellPool,
        ctx: &mut AssocCtx,
        scope: &str,
    ) -> (String, bool) {
        if let Some(id) = ctx.ids.get(&handle) {
            return (id.clone(), false);
        }
        let info = pool.get(handle);
        self.tree.set_attr(info.node, "scope", scope);
        let id = self.ids.ensure_id(self.tree, info.node);
        ctx.ids.insert(handle, id.clone());
        (id, true)
    }

    /// Merge identifiers into the cell's `headers` attribute.
    ///
    /// Order-preserving and duplicate-free; pre-existing tokens are kept.
    /// Returns whether the attribute changed.
    fn append_headers(&mut self, node: NodeId, ids: &[String]) -> bool {
        let existing = self.tree.attr(node, "headers").unwrap_or("").to_string();
        let mut tokens: Vec<&str> = existing.split_whitespace().collect();
        let before = tokens.len();
        for id in ids {
            if !tokens.iter().any(|t| *t == id.as_str()) {
                tokens.push(id.as_str());
            }
        }
        if tokens.len() == before {
            return false;
        }
        let value = tokens.join(" ");
        self.tree.set_attr(node, "headers", &value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn append_row(tree: &mut DomTree, parent: NodeId, cells: &[&str]) -> NodeId {
        let tr = tree.create_element("tr");
        for tag in cells {
            let cell = tree.create_element(tag);
            tree.append_child(tr, cell);
        }
        tree.append_child(parent, tr);
        tr
    }

    #[test]
    fn test_not_a_table() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let mut ids = IdGenerator::default();

        let err = TableFixer::new(&mut tree, &mut ids).fix(div);
        assert!(matches!(err, Err(A11yError::NotATable(tag)) if tag == "div"));
    }

    #[test]
    fn test_empty_table_is_a_noop() {
        let mut tree = DomTree::new();
        let table = tree.create_element("table");
        let mut ids = IdGenerator::default();

        let report = TableFixer::new(&mut tree, &mut ids).fix(table).unwrap();
        assert!(!report.header_valid);
        assert_eq!(report.cells_associated, 0);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_row_association_basic() {
        let mut tree = DomTree::new();
        let table = tree.create_element("table");
        let tr = append_row(&mut tree, table, &["th", "td", "td"]);
        let cells: Vec<NodeId> = tree.children(tr).collect();

        let mut ids = IdGenerator::default();
        let report = TableFixer::new(&mut tree, &mut ids).fix(table).unwrap();

        assert_eq!(report.row_headers, 1);
        assert_eq!(report.cells_associated, 2);
        assert_eq!(tree.attr(cells[0], "scope"), Some("row"));
        let id = tree.attr(cells[0], "id").unwrap().to_string();
        assert_eq!(tree.attr(cells[1], "headers"), Some(id.as_str()));
        assert_eq!(tree.attr(cells[2], "headers"), Some(id.as_str()));
    }

    #[test]
    fn test_data_before_row_header_gets_nothing() {
        let mut tree = DomTree::new();
        let table = tree.create_element("table");
        let tr = append_row(&mut tree, table, &["td", "th", "td"]);
        let cells: Vec<NodeId> = tree.children(tr).collect();

        let mut ids = IdGenerator::default();
        TableFixer::new(&mut tree, &mut ids).fix(table).unwrap();

        assert!(!tree.has_attr(cells[0], "headers"));
        assert!(tree.has_attr(cells[2], "headers"));
    }

    #[test]
    fn test_strategies_can_be_disabled() {
        let mut tree = DomTree::new();
        let table = tree.create_element("table");
        append_row(&mut tree, table, &["th", "td"]);

        let mut ids = IdGenerator::default();
        let report = TableFixer::new(&mut tree, &mut ids)
            .row_association(false)
            .fix(table)
            .unwrap();

        assert_eq!(report.row_headers, 0);
        assert_eq!(report.cells_associated, 0);
    }

    #[test]
    fn test_existing_headers_tokens_survive_merge() {
        let mut tree = DomTree::new();
        let table = tree.create_element("table");
        let tr = append_row(&mut tree, table, &["th", "td"]);
        let cells: Vec<NodeId> = tree.children(tr).collect();
        tree.set_attr(cells[1], "headers", "legacy");

        let mut ids = IdGenerator::default();
        TableFixer::new(&mut tree, &mut ids).fix(table).unwrap();

        let headers = tree.attr(cells[1], "headers").unwrap();
        let tokens: Vec<&str> = headers.split_whitespace().collect();
        assert_eq!(tokens[0], "legacy");
        assert_eq!(tokens.len(), 2);
    }
}
