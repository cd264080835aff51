//! End-to-end table association scenarios
//!
//! Each test builds a table the way markup would declare it, runs one fix
//! pass, and checks the attributes written back onto the cells.

use axs_a11y::{FixReport, IdGenerator, TableFixer};
use axs_dom::{DomTree, NodeId};

fn child(tree: &mut DomTree, parent: NodeId, tag: &str) -> NodeId {
    let node = tree.create_element(tag);
    tree.append_child(parent, node);
    node
}

fn cell(tree: &mut DomTree, row: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let node = child(tree, row, tag);
    for (name, value) in attrs {
        tree.set_attr(node, name, value);
    }
    node
}

fn fix(tree: &mut DomTree, table: NodeId) -> FixReport {
    let mut ids = IdGenerator::default();
    TableFixer::new(tree, &mut ids).fix(table).unwrap()
}

fn headers_of(tree: &DomTree, node: NodeId) -> Vec<String> {
    tree.attr(node, "headers")
        .unwrap_or("")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn id_of(tree: &DomTree, node: NodeId) -> String {
    tree.attr(node, "id").expect("cell should have an id").to_string()
}

// ============================================================================
// SCENARIO A: spanning header cell feeds every row of its column
// ============================================================================

/// 2x3 header whose first cell spans both header rows, 2-row body of
/// width 3: every body cell references all header cells of its column.
#[test]
fn test_spanning_header_association() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let table = child(&mut tree, root, "table");

    let thead = child(&mut tree, table, "thead");
    let tr1 = child(&mut tree, thead, "tr");
    let a = cell(&mut tree, tr1, "th", &[("rowspan", "2")]);
    let b = cell(&mut tree, tr1, "th", &[]);
    let c = cell(&mut tree, tr1, "th", &[]);
    let tr2 = child(&mut tree, thead, "tr");
    let d = cell(&mut tree, tr2, "th", &[]);
    let e = cell(&mut tree, tr2, "th", &[]);

    let tbody = child(&mut tree, table, "tbody");
    let mut body_cells = Vec::new();
    for _ in 0..2 {
        let tr = child(&mut tree, tbody, "tr");
        let row: Vec<NodeId> = (0..3).map(|_| cell(&mut tree, tr, "td", &[])).collect();
        body_cells.push(row);
    }

    let report = fix(&mut tree, table);

    assert!(report.header_valid);
    assert_eq!(report.column_headers, 5);
    assert_eq!(report.cells_associated, 6);

    for header in [a, b, c, d, e] {
        assert_eq!(tree.attr(header, "scope"), Some("col"));
    }

    let (ia, ib, ic, id, ie) = (
        id_of(&tree, a),
        id_of(&tree, b),
        id_of(&tree, c),
        id_of(&tree, d),
        id_of(&tree, e),
    );
    for row in &body_cells {
        assert_eq!(headers_of(&tree, row[0]), vec![ia.clone()]);
        assert_eq!(headers_of(&tree, row[1]), vec![ib.clone(), id.clone()]);
        assert_eq!(headers_of(&tree, row[2]), vec![ic.clone(), ie.clone()]);
    }
}

// ============================================================================
// SCENARIO B: headerless table, row-only association
// ============================================================================

#[test]
fn test_headerless_row_association() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let table = child(&mut tree, root, "table");

    let tr1 = child(&mut tree, table, "tr");
    let a = cell(&mut tree, tr1, "th", &[]);
    let b = cell(&mut tree, tr1, "td", &[]);
    let c = cell(&mut tree, tr1, "td", &[]);

    let tr2 = child(&mut tree, table, "tr");
    let d = cell(&mut tree, tr2, "td", &[]);
    let e = cell(&mut tree, tr2, "td", &[]);

    let report = fix(&mut tree, table);

    assert!(!report.header_valid);
    assert_eq!(report.column_headers, 0);
    assert_eq!(report.row_headers, 1);
    assert_eq!(tree.attr(a, "scope"), Some("row"));

    let ia = id_of(&tree, a);
    assert_eq!(headers_of(&tree, b), vec![ia.clone()]);
    assert_eq!(headers_of(&tree, c), vec![ia]);
    // Row 2 has no header cell, so no association at all.
    assert!(!tree.has_attr(d, "headers"));
    assert!(!tree.has_attr(e, "headers"));
}

// ============================================================================
// SCENARIO C: irregular header disables column association only
// ============================================================================

#[test]
fn test_irregular_header_degrades_to_row_association() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let table = child(&mut tree, root, "table");

    // Header rows of lengths 3 and 2: not rectangular.
    let thead = child(&mut tree, table, "thead");
    let tr1 = child(&mut tree, thead, "tr");
    let head_cells = [
        cell(&mut tree, tr1, "th", &[]),
        cell(&mut tree, tr1, "th", &[]),
        cell(&mut tree, tr1, "th", &[]),
    ];
    let tr2 = child(&mut tree, thead, "tr");
    cell(&mut tree, tr2, "th", &[]);
    cell(&mut tree, tr2, "th", &[]);

    let tbody = child(&mut tree, table, "tbody");
    let tr = child(&mut tree, tbody, "tr");
    let row_header = cell(&mut tree, tr, "th", &[]);
    let data = cell(&mut tree, tr, "td", &[]);

    let report = fix(&mut tree, table);

    assert!(!report.header_valid);
    assert_eq!(report.column_headers, 0);
    for header in head_cells {
        assert!(!tree.has_attr(header, "scope"));
        assert!(!tree.has_attr(header, "id"));
    }

    // Row association still proceeds in the body.
    assert_eq!(report.row_headers, 1);
    assert_eq!(tree.attr(row_header, "scope"), Some("row"));
    assert_eq!(headers_of(&tree, data), vec![id_of(&tree, row_header)]);
}

// ============================================================================
// SCENARIO D: width-mismatched body row is skipped for columns only
// ============================================================================

#[test]
fn test_wide_row_excluded_from_column_association() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let table = child(&mut tree, root, "table");

    let thead = child(&mut tree, table, "thead");
    let tr = child(&mut tree, thead, "tr");
    let col_headers = [
        cell(&mut tree, tr, "th", &[]),
        cell(&mut tree, tr, "th", &[]),
        cell(&mut tree, tr, "th", &[]),
    ];

    let tbody = child(&mut tree, table, "tbody");
    // Row of logical width 4: a row header plus a td spanning 3 columns.
    let wide_tr = child(&mut tree, tbody, "tr");
    let row_header = cell(&mut tree, wide_tr, "th", &[]);
    let wide = cell(&mut tree, wide_tr, "td", &[("colspan", "3")]);
    // Row of matching width 3.
    let normal_tr = child(&mut tree, tbody, "tr");
    let normal: Vec<NodeId> = (0..3).map(|_| cell(&mut tree, normal_tr, "td", &[])).collect();

    let report = fix(&mut tree, table);
    assert!(report.header_valid);

    // The wide cell got only the row header's identifier.
    assert_eq!(headers_of(&tree, wide), vec![id_of(&tree, row_header)]);

    // The width-matched row still received column identifiers.
    assert_eq!(headers_of(&tree, normal[0]), vec![id_of(&tree, col_headers[0])]);
    assert_eq!(headers_of(&tree, normal[1]), vec![id_of(&tree, col_headers[1])]);
    assert_eq!(headers_of(&tree, normal[2]), vec![id_of(&tree, col_headers[2])]);
}

// ============================================================================
// IDEMPOTENCE AND MERGING
// ============================================================================

#[test]
fn test_rerunning_does_not_duplicate_references() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let table = child(&mut tree, root, "table");

    let thead = child(&mut tree, table, "thead");
    let tr = child(&mut tree, thead, "tr");
    cell(&mut tree, tr, "th", &[]);
    cell(&mut tree, tr, "th", &[]);

    let tbody = child(&mut tree, table, "tbody");
    let body_tr = child(&mut tree, tbody, "tr");
    let data = [
        cell(&mut tree, body_tr, "td", &[]),
        cell(&mut tree, body_tr, "td", &[]),
    ];

    let first = fix(&mut tree, table);
    let after_first: Vec<Vec<String>> = data.iter().map(|&d| headers_of(&tree, d)).collect();
    assert_eq!(first.cells_associated, 2);

    let second = fix(&mut tree, table);
    let after_second: Vec<Vec<String>> = data.iter().map(|&d| headers_of(&tree, d)).collect();

    assert_eq!(after_first, after_second);
    // Nothing changed the second time around.
    assert_eq!(second.cells_associated, 0);
}

#[test]
fn test_authored_ids_and_references_are_preserved() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let table = child(&mut tree, root, "table");

    let thead = child(&mut tree, table, "thead");
    let tr = child(&mut tree, thead, "tr");
    let year = cell(&mut tree, tr, "th", &[("id", "year")]);
    cell(&mut tree, tr, "th", &[]);

    let tbody = child(&mut tree, table, "tbody");
    let body_tr = child(&mut tree, tbody, "tr");
    let first = cell(&mut tree, body_tr, "td", &[("headers", "note")]);
    cell(&mut tree, body_tr, "td", &[]);

    fix(&mut tree, table);

    assert_eq!(id_of(&tree, year), "year");
    let merged = headers_of(&tree, first);
    assert_eq!(merged[0], "note");
    assert!(merged.contains(&"year".to_string()));
}

// ============================================================================
// SECTIONS AND FOOTERS
// ============================================================================

#[test]
fn test_footer_rows_are_associated() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let table = child(&mut tree, root, "table");

    let thead = child(&mut tree, table, "thead");
    let tr = child(&mut tree, thead, "tr");
    let col = cell(&mut tree, tr, "th", &[]);
    let col2 = cell(&mut tree, tr, "th", &[]);

    let tfoot = child(&mut tree, table, "tfoot");
    let foot_tr = child(&mut tree, tfoot, "tr");
    let total_label = cell(&mut tree, foot_tr, "th", &[]);
    let total = cell(&mut tree, foot_tr, "td", &[]);

    fix(&mut tree, table);

    // Footer data cell gets both its column header and the row header.
    let got = headers_of(&tree, total);
    assert!(got.contains(&id_of(&tree, col2)));
    assert!(got.contains(&id_of(&tree, total_label)));
    assert_eq!(tree.attr(total_label, "scope"), Some("row"));
    assert_eq!(tree.attr(col, "scope"), Some("col"));
}

#[test]
fn test_overshooting_rowspan_makes_header_irregular() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let table = child(&mut tree, root, "table");

    // A header cell claiming more rows than its section has extends the
    // header matrix downward into ragged rows, so the header is invalid.
    let thead = child(&mut tree, table, "thead");
    let tr = child(&mut tree, thead, "tr");
    let spanning = cell(&mut tree, tr, "th", &[("rowspan", "5")]);
    cell(&mut tree, tr, "th", &[]);

    let tbody = child(&mut tree, table, "tbody");
    let body_tr = child(&mut tree, tbody, "tr");
    let first = cell(&mut tree, body_tr, "td", &[]);
    cell(&mut tree, body_tr, "td", &[]);

    let report = fix(&mut tree, table);

    assert!(!report.header_valid);
    assert!(!tree.has_attr(spanning, "scope"));
    // Column association was skipped and the body row holds no header
    // cells, so no references were written at all.
    assert!(!tree.has_attr(first, "headers"));
    assert_eq!(report.cells_associated, 0);
}
